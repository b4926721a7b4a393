use crate::analysis::Analyzer;
use crate::error::ParseError;
use crate::term::chunk::analyze_chunk;
use crate::term::segment::{SpanKind, spans};
use log::debug;
use std::sync::Arc;

/// Normalization hooks the grammar invokes for special-syntax terms.
///
/// The grammar hands over the raw term text and splices the returned
/// string into the query it constructs; the strategy decides what
/// normalization, if any, happens in between. For prefix queries the
/// grammar strips the trailing bare `*` before calling `wildcard_term`.
pub trait TermRewriter: Send + Sync {
    /// Normalize a wildcard term, preserving `*` / `?` syntax characters.
    fn wildcard_term(&self, field: &str, raw: &str) -> Result<String, ParseError>;

    /// Normalize a fuzzy term as one undivided chunk. The similarity
    /// parameter stays with the grammar, which carries it onto the query
    /// node unchanged.
    fn fuzzy_term(&self, field: &str, raw: &str) -> Result<String, ParseError>;

    /// Normalize one range endpoint as one undivided chunk.
    fn range_bound(&self, field: &str, raw: &str) -> Result<String, ParseError>;
}

fn check_leading_wildcard(field: &str, raw: &str, allow: bool) -> Result<(), ParseError> {
    if !allow && matches!(raw.as_bytes().first(), Some(b'*') | Some(b'?')) {
        return Err(ParseError::LeadingWildcard {
            field: field.to_string(),
            term: raw.to_string(),
        });
    }
    Ok(())
}

/// Rewriter that routes the literal portions of special terms through the
/// analysis pipeline, so a wildcard term matches the index the same way an
/// ordinary term does.
pub struct AnalyzingRewriter {
    analyzer: Arc<dyn Analyzer>,
    allow_leading_wildcard: bool,
}

impl AnalyzingRewriter {
    pub fn new(analyzer: Arc<dyn Analyzer>, allow_leading_wildcard: bool) -> Self {
        Self {
            analyzer,
            allow_leading_wildcard,
        }
    }
}

impl TermRewriter for AnalyzingRewriter {
    fn wildcard_term(&self, field: &str, raw: &str) -> Result<String, ParseError> {
        check_leading_wildcard(field, raw, self.allow_leading_wildcard)?;

        let mut out = String::with_capacity(raw.len());
        // Consecutive literal and escaped spans form one analyzer chunk;
        // only genuine wildcard runs break the term. Escaped characters
        // are therefore never analyzed in isolation.
        let mut chunk = String::new();
        for span in spans(raw) {
            match span.kind {
                SpanKind::Literal | SpanKind::Escaped => chunk.push_str(span.text),
                SpanKind::Wildcard => {
                    if !chunk.is_empty() {
                        out.push_str(&analyze_chunk(self.analyzer.as_ref(), field, &chunk)?);
                        chunk.clear();
                    }
                    out.push_str(span.text);
                }
            }
        }
        if !chunk.is_empty() {
            out.push_str(&analyze_chunk(self.analyzer.as_ref(), field, &chunk)?);
        }

        debug!("rewrote wildcard term \"{raw}\" as \"{out}\" in field \"{field}\"");
        Ok(out)
    }

    fn fuzzy_term(&self, field: &str, raw: &str) -> Result<String, ParseError> {
        Ok(analyze_chunk(self.analyzer.as_ref(), field, raw)?)
    }

    fn range_bound(&self, field: &str, raw: &str) -> Result<String, ParseError> {
        Ok(analyze_chunk(self.analyzer.as_ref(), field, raw)?)
    }
}

/// Rewriter that leaves term text untouched, the way parsers without
/// query-time analysis behave. Useful as a baseline and for hosting the
/// grammar without an analyzer.
pub struct PassthroughRewriter {
    allow_leading_wildcard: bool,
}

impl PassthroughRewriter {
    pub fn new(allow_leading_wildcard: bool) -> Self {
        Self {
            allow_leading_wildcard,
        }
    }
}

impl TermRewriter for PassthroughRewriter {
    fn wildcard_term(&self, field: &str, raw: &str) -> Result<String, ParseError> {
        check_leading_wildcard(field, raw, self.allow_leading_wildcard)?;
        Ok(raw.to_string())
    }

    fn fuzzy_term(&self, _field: &str, raw: &str) -> Result<String, ParseError> {
        Ok(raw.to_string())
    }

    fn range_bound(&self, _field: &str, raw: &str) -> Result<String, ParseError> {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyzer_by_name, standard_analyzer};
    use crate::error::AnalysisError;

    fn analyzing(allow_leading: bool) -> AnalyzingRewriter {
        AnalyzingRewriter::new(Arc::new(standard_analyzer::<&str>(&[])), allow_leading)
    }

    fn identity(allow_leading: bool) -> AnalyzingRewriter {
        AnalyzingRewriter::new(
            Arc::new(analyzer_by_name::<&str>("keyword", &[]).unwrap()),
            allow_leading,
        )
    }

    #[test]
    fn test_literal_chunks_are_normalized_around_wildcards() {
        let rewriter = analyzing(false);
        assert_eq!(rewriter.wildcard_term("body", "Run*ing").unwrap(), "run*ing");
    }

    #[test]
    fn test_no_wildcards_equals_whole_term_analysis() {
        let rewriter = analyzing(false);
        assert_eq!(rewriter.wildcard_term("body", "Häuser").unwrap(), "hauser");
    }

    #[test]
    fn test_wildcard_only_term_passes_through() {
        let rewriter = analyzing(false);
        // leading wildcards allowed: the term is nothing but wildcards
        let rewriter_allowing = analyzing(true);
        assert_eq!(rewriter_allowing.wildcard_term("body", "**??").unwrap(), "**??");
        assert!(rewriter.wildcard_term("body", "**??").is_err());
    }

    #[test]
    fn test_empty_term_yields_empty_output() {
        let rewriter = analyzing(false);
        assert_eq!(rewriter.wildcard_term("body", "").unwrap(), "");
    }

    #[test]
    fn test_leading_wildcard_rejected_when_disallowed() {
        let rewriter = analyzing(false);
        let err = rewriter.wildcard_term("body", "*foo").unwrap_err();
        match err {
            ParseError::LeadingWildcard { field, term } => {
                assert_eq!(field, "body");
                assert_eq!(term, "*foo");
            }
            other => panic!("expected LeadingWildcard, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_wildcard_allowed_when_configured() {
        let rewriter = analyzing(true);
        assert_eq!(rewriter.wildcard_term("body", "*Foo").unwrap(), "*foo");
        assert_eq!(rewriter.wildcard_term("body", "?Foo").unwrap(), "?foo");
    }

    #[test]
    fn test_escaped_leading_wildcard_is_not_leading() {
        // the term starts with a backslash, not a wildcard
        let rewriter = identity(false);
        assert_eq!(rewriter.wildcard_term("id", "\\*Foo").unwrap(), "\\*Foo");
    }

    #[test]
    fn test_escaped_wildcard_stays_inside_its_chunk() {
        // identity pipeline: the whole literal text, escape included, comes
        // back unchanged by wildcard handling
        let rewriter = identity(false);
        assert_eq!(rewriter.wildcard_term("id", "H\\?user").unwrap(), "H\\?user");
    }

    #[test]
    fn test_stopword_chunk_fails_whole_call() {
        let rewriter = analyzing(false);
        let err = rewriter.wildcard_term("body", "the*").unwrap_err();
        match err {
            ParseError::Analysis(AnalysisError::Empty { field, chunk }) => {
                assert_eq!(field, "body");
                assert_eq!(chunk, "the");
            }
            other => panic!("expected Empty analysis error, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_token_chunk_fails_naming_tokens() {
        let rewriter = analyzing(false);
        let err = rewriter.wildcard_term("body", "wi-fi*").unwrap_err();
        match err {
            ParseError::Analysis(AnalysisError::MultiToken { tokens, .. }) => {
                assert_eq!(tokens, vec!["wi", "fi"]);
            }
            other => panic!("expected MultiToken analysis error, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzzy_term_is_one_chunk() {
        let rewriter = analyzing(false);
        assert_eq!(rewriter.fuzzy_term("body", "Häuser").unwrap(), "hauser");
    }

    #[test]
    fn test_fuzzy_term_does_not_split_on_wildcards() {
        // fuzzy terms are analyzed whole; a `*` inside one is not syntax,
        // and the standard tokenizer splits on it, which must fail
        let rewriter = analyzing(false);
        let err = rewriter.fuzzy_term("body", "Run*ing").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Analysis(AnalysisError::MultiToken { .. })
        ));
    }

    #[test]
    fn test_range_bound_is_one_chunk() {
        let rewriter = analyzing(false);
        assert_eq!(rewriter.range_bound("body", "Alpha").unwrap(), "alpha");
    }

    #[test]
    fn test_passthrough_leaves_terms_alone() {
        let rewriter = PassthroughRewriter::new(true);
        assert_eq!(rewriter.wildcard_term("body", "Run*ing").unwrap(), "Run*ing");
        assert_eq!(rewriter.fuzzy_term("body", "Häuser").unwrap(), "Häuser");
    }

    #[test]
    fn test_passthrough_still_honors_leading_wildcard_policy() {
        let rewriter = PassthroughRewriter::new(false);
        assert!(rewriter.wildcard_term("body", "?foo").is_err());
    }
}
