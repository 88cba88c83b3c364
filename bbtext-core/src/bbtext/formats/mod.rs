//! Debug formats
//!
//!     Text renderings of the intermediate stages, used by tests and by the command line
//!     tool:
//!
//!         - [tokens_to_debug_string]: one token per line
//!         - [tree_to_treeviz]: one node per line, nesting drawn with box characters
//!         - [buffer_to_debug_string]: one run per line with its range, traits and link
//!
//!     For machine readable dumps the tokens, trees and buffers are `serde::Serialize`.

mod run_listing;
mod token_listing;
mod treeviz;

pub use run_listing::buffer_to_debug_string;
pub use token_listing::tokens_to_debug_string;
pub use treeviz::tree_to_treeviz;
