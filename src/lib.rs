//! # Quern - Analyzing Query Parser
//!
//! Quern parses full-text search queries and routes every term, including
//! the literal portions of wildcard, fuzzy, and range terms, through the
//! same token-analysis pipeline applied to indexed text. A query like
//! `H?user` matches what `Häuser` was indexed as, because the literal
//! chunks around the `?` are lowercased and accent-folded exactly like an
//! ordinary term would be.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`analysis`] - Token-analysis pipeline (tokenizers, filters, per-field dispatch)
//! - [`term`] - Term segmentation, chunk analysis, and rewriting
//! - [`query`] - Query grammar and AST
//! - [`config`] - Parser configuration
//! - [`output`] - Colored rendering of queries, tokens, and spans
//! - [`error`] - Parse and analysis error types
//!
//! ## Quick Start
//!
//! ```ignore
//! use quern::config::ParserConfig;
//! use quern::query::QueryParser;
//!
//! let config = ParserConfig::default();
//! let analyzer = config.build_analyzer().unwrap();
//! let parser = QueryParser::new(config, analyzer);
//!
//! let query = parser.parse("title:Run*ing Häuser~").unwrap();
//! println!("{:?}", query.root);
//! ```
//!
//! ## Why analyze wildcard terms?
//!
//! Parsers that treat `Run*ing` as an opaque literal compare `Run` against
//! an index that only contains `run`, and the pattern silently never
//! matches. Quern splits the term into literal and wildcard spans, reduces
//! each literal chunk to exactly one normalized token, and splices the
//! pieces back together in order. A chunk the pipeline erases (a stopword)
//! or expands (a multi-token split) fails the parse loudly instead of
//! corrupting the pattern.

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod query;
pub mod term;
