/*!
 * Sanitizer properties: alphabet restriction and idempotence
 */

use secure_shell::gate::sanitize;

fn in_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.' | '@' | '_' | '/')
}

#[test]
fn test_alphabet_restriction_over_all_bytes() {
    for b in 0u8..=255 {
        let input = format!("ping {}host", b as char);
        for c in sanitize(&input).chars() {
            assert!(in_alphabet(c), "byte {:#04x} leaked {:?}", b, c);
        }
    }
}

#[test]
fn test_idempotence_over_hostile_inputs() {
    let hostile = [
        "ping $(whoami)",
        "ssh `id` user@host",
        "tracepath a;b|c&d",
        "ping\u{0}\u{7}\u{1b}[31mhost",
        "ssh ho\tst -p2222",
        "пинг хост",
    ];
    for input in hostile {
        let once = sanitize(input);
        assert_eq!(sanitize(&once), once, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_command_substitution_is_neutralized() {
    // The substitution syntax collapses into a bare word that the
    // grammar then judges on its own
    assert_eq!(sanitize("ping $(whoami)"), "ping whoami");
    assert_eq!(sanitize("ping $(cat /etc/shadow)"), "ping cat /etc/shadow");
}

#[test]
fn test_order_is_preserved() {
    assert_eq!(sanitize("a!b@c#d$e"), "ab@cde");
}
