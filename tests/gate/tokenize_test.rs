/*!
 * Tokenizer bounds enforcement
 */

use secure_shell::gate::{tokenize, GateError};

#[test]
fn test_bound_is_max_args_times_max_arg_length() {
    let input = "x".repeat(41);
    assert!(matches!(
        tokenize(&input, 4, 10),
        Err(GateError::InputTooLong {
            length: 41,
            limit: 40
        })
    ));
    assert!(tokenize(&"x".repeat(40), 4, 10).is_ok());
}

#[test]
fn test_cardinality_bound_counts_the_verb() {
    // max_args bounds the token count including the verb itself
    let result = tokenize("ping a b c d e f g h i j", 10, 100);
    assert!(matches!(
        result,
        Err(GateError::TooManyArguments {
            count: 11,
            limit: 10
        })
    ));
    assert!(tokenize("ping a b c d e f g h i", 10, 100).is_ok());
}

#[test]
fn test_whitespace_runs_yield_no_empty_tokens() {
    let tokens = tokenize("  ping    8.8.8.8  ", 10, 100).unwrap();
    assert_eq!(tokens, vec!["ping", "8.8.8.8"]);
    assert!(tokens.iter().all(|t| !t.is_empty()));
}

#[test]
fn test_blank_line_is_silently_empty() {
    assert!(tokenize("", 10, 100).unwrap().is_empty());
}
