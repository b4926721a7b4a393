//! Term preprocessing: segmentation, chunk analysis, and rewriting.
//!
//! A raw wildcard term like `Run*ing` splits into literal and wildcard
//! spans ([`segment`]); each literal chunk is reduced to exactly one
//! normalized token ([`chunk`]); and the pieces are reassembled in order
//! with wildcard runs untouched ([`rewrite`]), yielding `run*ing` for an
//! index whose analyzer lowercases.

pub mod chunk;
pub mod rewrite;
pub mod segment;

pub use chunk::analyze_chunk;
pub use rewrite::{AnalyzingRewriter, PassthroughRewriter, TermRewriter};
pub use segment::{Span, SpanKind, segment, spans};
