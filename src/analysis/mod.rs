//! Token-analysis pipeline: tokenizers, filters, and analyzers.
//!
//! The same pipeline is applied to indexed text and to query terms, which
//! is what makes normalized wildcard and fuzzy matching possible. An
//! [`Analyzer`] opens one isolated [`TokenSession`] per analyzed text;
//! concrete pipelines are a [`Tokenizer`] followed by a chain of
//! [`TokenFilter`]s, assembled with [`TextAnalyzer::builder`] or looked up
//! by name with [`analyzer_by_name`].

pub mod analyzer;
pub mod filters;
pub mod token;
pub mod tokenizer;

pub use analyzer::{
    Analyzer, PerFieldAnalyzer, TextAnalyzer, analyzer_by_name, collect_tokens, standard_analyzer,
};
pub use filters::{AsciiFoldingFilter, LengthFilter, LowercaseFilter, StopWordFilter, TokenFilter};
pub use token::{Token, TokenSession};
pub use tokenizer::{KeywordTokenizer, StandardTokenizer, Tokenizer, WhitespaceTokenizer};
