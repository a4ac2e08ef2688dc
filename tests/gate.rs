/*!
 * Gate subsystem tests entry point
 */

#[path = "gate/sanitize_test.rs"]
mod sanitize_test;

#[path = "gate/tokenize_test.rs"]
mod tokenize_test;

#[path = "gate/grammar_test.rs"]
mod grammar_test;
