/*!
 * Tokenizer & Bounds Check
 * Whitespace splitting with length and cardinality enforcement
 */

use super::types::{GateError, GateResult};

/// Split a sanitized line into tokens, enforcing the total-length and
/// token-count bounds. An empty line yields an empty vector; the caller
/// continues silently in that case.
pub fn tokenize(input: &str, max_args: usize, max_arg_length: usize) -> GateResult<Vec<String>> {
    let limit = max_args * max_arg_length;
    if input.len() > limit {
        return Err(GateError::InputTooLong {
            length: input.len(),
            limit,
        });
    }

    let tokens: Vec<String> = input.split_ascii_whitespace().map(str::to_string).collect();
    if tokens.len() > max_args {
        return Err(GateError::TooManyArguments {
            count: tokens.len(),
            limit: max_args,
        });
    }

    Ok(tokens)
}
