/*!
 * Command Gate
 * Input sanitization, token bounds, and per-verb argument grammar
 */

mod grammar;
mod sanitize;
mod tokenize;
mod types;

pub use grammar::admit;
pub use sanitize::sanitize;
pub use tokenize::tokenize;
pub use types::{AllowedCommand, GateError, GateResult, Invocation};
