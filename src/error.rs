//! Error types for query parsing and term analysis.

use std::io;
use thiserror::Error;

/// Failure of the token-analysis pipeline on a single term chunk.
///
/// A chunk must map to exactly one normalized token; anything else is a
/// terminal failure for the term. There is no fallback to the raw text,
/// since that would reintroduce the normalization mismatch the analyzing
/// paths exist to prevent.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The pipeline produced no tokens, typically because a stopword
    /// filter removed the entire chunk.
    #[error("analyzer returned no token for \"{chunk}\" in field \"{field}\"")]
    Empty { field: String, chunk: String },

    /// The pipeline expanded one chunk into several tokens. A multi-token
    /// result cannot be spliced back into the surrounding pattern as a
    /// drop-in replacement, so it is rejected rather than truncated.
    #[error(
        "analyzer returned {count} tokens for \"{chunk}\" in field \"{field}\": {list}",
        count = .tokens.len(),
        list = .tokens.join(", ")
    )]
    MultiToken {
        field: String,
        chunk: String,
        tokens: Vec<String>,
    },

    /// The pipeline itself failed with an I/O-class fault.
    #[error("analysis of \"{chunk}\" in field \"{field}\" failed: {source}")]
    Io {
        field: String,
        chunk: String,
        #[source]
        source: io::Error,
    },
}

/// Error returned by query parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The term begins with `*` or `?` and the configuration forbids it.
    #[error("leading wildcard is not allowed: \"{term}\" in field \"{field}\"")]
    LeadingWildcard { field: String, term: String },

    /// A range clause did not match `[lower TO upper]` / `{lower TO upper}`.
    #[error("malformed range in field \"{field}\": expected \"[lower TO upper]\"")]
    MalformedRange { field: String },

    /// Term analysis failed; surfaced unchanged as a parse failure.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_token_message_names_all_tokens() {
        let err = AnalysisError::MultiToken {
            field: "body".to_string(),
            chunk: "wi-fi".to_string(),
            tokens: vec!["wi".to_string(), "fi".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 tokens"));
        assert!(msg.contains("wi, fi"));
        assert!(msg.contains("body"));
        assert!(msg.contains("wi-fi"));
    }

    #[test]
    fn test_empty_message_names_field_and_chunk() {
        let err = AnalysisError::Empty {
            field: "title".to_string(),
            chunk: "the".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("title"));
        assert!(msg.contains("the"));
    }

    #[test]
    fn test_analysis_error_converts_to_parse_error() {
        let err = AnalysisError::Empty {
            field: "f".to_string(),
            chunk: "c".to_string(),
        };
        let parse: ParseError = err.into();
        assert!(matches!(parse, ParseError::Analysis(_)));
    }
}
