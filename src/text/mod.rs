//! Text preprocessing applied before the encoder sees the input.
//!
//! Raw text is cleaned by `TextNormalizer` and then passed through
//! `SlangExpander`. Both are total: any string in, a string out.

mod contractions;
mod emoji;
mod normalizer;
mod slang;

pub use normalizer::TextNormalizer;
pub use slang::SlangExpander;
