//! Token listing

use crate::bbtext::token::Token;

/// Render tokens one per line, in the form of their `Display`.
pub fn tokens_to_debug_string(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        output.push_str(&token.to_string());
        output.push('\n');
    }
    output
}
