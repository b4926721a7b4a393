use crate::analysis::filters::{
    AsciiFoldingFilter, LowercaseFilter, StopWordFilter, TokenFilter,
};
use crate::analysis::token::{Token, TokenSession};
use crate::analysis::tokenizer::{KeywordTokenizer, StandardTokenizer, Tokenizer, WhitespaceTokenizer};
use rustc_hash::FxHashMap;
use std::io;
use std::sync::Arc;

/// Opaque handle to the token-analysis pipeline.
///
/// Implementations must be safe for concurrent independent invocations:
/// each call to `open_session` yields an isolated per-call stream that
/// shares no mutable state with other sessions.
pub trait Analyzer: Send + Sync {
    /// Open a token session over `text` for `field`.
    fn open_session(&self, field: &str, text: &str) -> io::Result<Box<dyn TokenSession + '_>>;
}

/// Drive a full session over `text` and collect every token.
pub fn collect_tokens(analyzer: &dyn Analyzer, field: &str, text: &str) -> io::Result<Vec<Token>> {
    let mut session = analyzer.open_session(field, text)?;
    let mut tokens = Vec::new();
    while let Some(token) = session.next()? {
        tokens.push(token);
    }
    session.end()?;
    Ok(tokens)
}

/// A tokenizer followed by an ordered chain of token filters.
pub struct TextAnalyzer {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn builder(tokenizer: impl Tokenizer + 'static) -> TextAnalyzerBuilder {
        TextAnalyzerBuilder {
            tokenizer: Box::new(tokenizer),
            filters: Vec::new(),
        }
    }

    fn run_pipeline(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.apply(tokens);
        }
        tokens
    }
}

impl Analyzer for TextAnalyzer {
    fn open_session(&self, _field: &str, text: &str) -> io::Result<Box<dyn TokenSession + '_>> {
        Ok(Box::new(BufferedSession {
            tokens: self.run_pipeline(text).into_iter(),
        }))
    }
}

/// Builder for [`TextAnalyzer`] pipelines.
pub struct TextAnalyzerBuilder {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzerBuilder {
    pub fn filter(mut self, filter: impl TokenFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn build(self) -> TextAnalyzer {
        TextAnalyzer {
            tokenizer: self.tokenizer,
            filters: self.filters,
        }
    }
}

/// Session over a pre-computed token buffer.
struct BufferedSession {
    tokens: std::vec::IntoIter<Token>,
}

impl TokenSession for BufferedSession {
    fn next(&mut self) -> io::Result<Option<Token>> {
        Ok(self.tokens.next())
    }

    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Dispatches to a different analyzer per field name.
pub struct PerFieldAnalyzer {
    default: Arc<dyn Analyzer>,
    overrides: FxHashMap<String, Arc<dyn Analyzer>>,
}

impl PerFieldAnalyzer {
    pub fn new(default: Arc<dyn Analyzer>) -> Self {
        Self {
            default,
            overrides: FxHashMap::default(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, analyzer: Arc<dyn Analyzer>) -> Self {
        self.overrides.insert(field.into(), analyzer);
        self
    }
}

impl Analyzer for PerFieldAnalyzer {
    fn open_session(&self, field: &str, text: &str) -> io::Result<Box<dyn TokenSession + '_>> {
        self.overrides
            .get(field)
            .unwrap_or(&self.default)
            .open_session(field, text)
    }
}

/// The default pipeline: tokenize, lowercase, fold accents, drop stopwords.
pub fn standard_analyzer<S: AsRef<str>>(extra_stopwords: &[S]) -> TextAnalyzer {
    let mut stopwords = StopWordFilter::english();
    stopwords.add_words(extra_stopwords.iter().map(|w| w.as_ref().to_string()));
    TextAnalyzer::builder(StandardTokenizer)
        .filter(LowercaseFilter)
        .filter(AsciiFoldingFilter)
        .filter(stopwords)
        .build()
}

/// Build one of the named analyzers, or `None` for an unknown name.
pub fn analyzer_by_name<S: AsRef<str>>(name: &str, extra_stopwords: &[S]) -> Option<TextAnalyzer> {
    match name {
        "standard" => Some(standard_analyzer(extra_stopwords)),
        "simple" => Some(
            TextAnalyzer::builder(StandardTokenizer)
                .filter(LowercaseFilter)
                .build(),
        ),
        "whitespace" => Some(
            TextAnalyzer::builder(WhitespaceTokenizer)
                .filter(LowercaseFilter)
                .build(),
        ),
        "keyword" => Some(TextAnalyzer::builder(KeywordTokenizer).build()),
        _ => None,
    }
}
