/*!
 * Input Sanitizer
 * Lossy character filtering down to the gate's restricted alphabet
 */

/// Characters outside this set never reach the tokenizer or the grammars,
/// so dropping (rather than escaping) them means no substitution can
/// synthesize a forbidden token downstream.
fn is_permitted(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.' | '@' | '_' | '/')
}

/// Reduce a raw input line to the restricted character set, preserving
/// order. Tabs, quotes, backticks, shell metacharacters, and non-ASCII
/// bytes are all dropped silently.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| is_permitted(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permitted_characters_pass_through() {
        let line = "ping -c 4 host-1.example.com user@host _a/b";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_shell_metacharacters_are_dropped() {
        assert_eq!(sanitize("ping $(whoami)"), "ping whoami");
        assert_eq!(sanitize("ssh host; rm -rf /"), "ssh host rm -rf /");
        assert_eq!(sanitize("ping `id`"), "ping id");
        assert_eq!(sanitize("ping a|b&c>d<e"), "ping abcde");
        assert_eq!(sanitize("ping \"quoted\" 'host'"), "ping quoted host");
    }

    #[test]
    fn test_tabs_and_non_ascii_are_dropped() {
        assert_eq!(sanitize("ping\thost"), "pinghost");
        assert_eq!(sanitize("ping hôst"), "ping hst");
        assert_eq!(sanitize("ping ho\u{202e}st"), "ping host");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "ping 8.8.8.8",
            "ssh -p2222 user@host",
            "echo $(rm -rf /tmp); `ls` | wc",
            "\t\n\r\x07",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_output_alphabet_is_restricted() {
        let hostile: String = (0u8..=255u8).map(|b| b as char).collect();
        for c in sanitize(&hostile).chars() {
            assert!(
                c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.' | '@' | '_' | '/'),
                "forbidden character survived: {:?}",
                c
            );
        }
    }
}
