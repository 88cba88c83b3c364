//! # bbtext
//!
//! Conversion engine for a small bracket-tag markup (`[b]bold[/b]`, `[url href="..."]`)
//! to a styled text buffer and back.
//!
//! Layout
//!
//! src/bbtext
//!   ├── token         Token and attribute types shared by every stage
//!   ├── lexing        Markup → tokens (logos based, lenient)
//!   ├── parsing       Tokens → arena tag tree (stack based, lenient)
//!   ├── styling       Tree → styled buffer (trait sets, runs, normalization)
//!   ├── serializing   Styled buffer → tree → markup
//!   ├── editing       Selection scoped trait toggling
//!   ├── detection     Detector capability and link overlay
//!   ├── pipeline      The load and export directions composed from the stages
//!   ├── document      Configuration aware facade tying the stages together
//!   ├── config        Immutable engine configuration (features, detection, colours)
//!   ├── formats       Debug output (token listing, treeviz, run listing)
//!   └── testing       Fluent assertions for buffers and trees
//!
//! Every stage from markup to buffer and back is total: malformed input degrades to
//! literal content and never produces an error.
//!
//! For test helpers, see the [testing module](bbtext::testing).

pub mod bbtext;
