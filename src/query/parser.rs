use crate::analysis::{Analyzer, collect_tokens};
use crate::config::ParserConfig;
use crate::error::{AnalysisError, ParseError};
use crate::term::rewrite::{AnalyzingRewriter, TermRewriter};
use log::debug;
use std::sync::Arc;

/// Similarity used for `term~` when no value follows the tilde.
const DEFAULT_FUZZY_SIMILARITY: f32 = 0.5;

/// Parsed query
#[derive(Debug, Clone)]
pub struct Query {
    pub root: QueryNode,
}

impl Query {
    /// Check if the query matched nothing but whitespace or dropped clauses
    pub fn is_empty(&self) -> bool {
        matches!(self.root, QueryNode::Empty)
    }
}

/// Query AST node
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Single normalized term
    Term { field: String, text: String },
    /// Quoted phrase, analyzed into its token sequence
    Phrase { field: String, terms: Vec<String> },
    /// Prefix match (single trailing `*`)
    Prefix { field: String, text: String },
    /// Pattern with `*` / `?` wildcards, literal portions normalized
    Wildcard { field: String, pattern: String },
    /// Fuzzy match with a similarity threshold
    Fuzzy {
        field: String,
        text: String,
        similarity: f32,
    },
    /// Range over term values; a `None` bound is open
    Range {
        field: String,
        lower: Option<String>,
        upper: Option<String>,
        inclusive: bool,
    },
    /// Boolean AND (all must match)
    And(Vec<QueryNode>),
    /// Boolean OR (any can match)
    Or(Vec<QueryNode>),
    /// Boolean NOT (exclude matches)
    Not(Box<QueryNode>),
    /// Empty query
    Empty,
}

/// Parse a query string with the default configuration and analyzer.
pub fn parse_query(input: &str) -> Result<Query, ParseError> {
    let config = ParserConfig::default();
    let analyzer = Arc::new(crate::analysis::standard_analyzer(&config.extra_stopwords));
    QueryParser::new(config, analyzer).parse(input)
}

/// Query parser.
///
/// The grammar recognizes `|` (OR), juxtaposition (AND), `-` (NOT),
/// parentheses, quoted phrases, `field:` scoping, `[a TO b]` / `{a TO b}`
/// ranges, `term~sim` fuzzy terms, and `*` / `?` wildcards. Special terms
/// are routed through a [`TermRewriter`] so their literal portions are
/// normalized the same way ordinary terms are; plain terms and phrases go
/// through the analyzer directly.
pub struct QueryParser {
    config: ParserConfig,
    analyzer: Arc<dyn Analyzer>,
    rewriter: Box<dyn TermRewriter>,
}

impl QueryParser {
    /// Parser wired with the analyzing rewriter.
    pub fn new(config: ParserConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        let rewriter = Box::new(AnalyzingRewriter::new(
            analyzer.clone(),
            config.allow_leading_wildcard,
        ));
        Self {
            config,
            analyzer,
            rewriter,
        }
    }

    /// Substitute a different term-rewriting strategy.
    pub fn with_rewriter(mut self, rewriter: Box<dyn TermRewriter>) -> Self {
        self.rewriter = rewriter;
        self
    }

    pub fn parse(&self, input: &str) -> Result<Query, ParseError> {
        debug!("parsing query: {input}");
        let mut cursor = Cursor {
            parser: self,
            input,
            pos: 0,
        };
        let root = cursor.parse_or()?;
        Ok(Query { root })
    }
}

/// Scan state over one query string.
struct Cursor<'a> {
    parser: &'a QueryParser,
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn parse_or(&mut self) -> Result<QueryNode, ParseError> {
        let mut nodes = vec![self.parse_and()?];

        self.skip_whitespace();
        while self.consume_char('|') {
            self.skip_whitespace();
            nodes.push(self.parse_and()?);
            self.skip_whitespace();
        }

        nodes.retain(|n| !matches!(n, QueryNode::Empty));
        Ok(match nodes.len() {
            0 => QueryNode::Empty,
            1 => nodes.pop().unwrap(),
            _ => QueryNode::Or(nodes),
        })
    }

    fn parse_and(&mut self) -> Result<QueryNode, ParseError> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_eof() || self.peek_char() == Some(')') || self.peek_char() == Some('|') {
                break;
            }

            nodes.push(self.parse_unary()?);
        }

        // Clauses dropped by the analyzer (stopwords) vanish here
        nodes.retain(|n| !matches!(n, QueryNode::Empty));
        Ok(match nodes.len() {
            0 => QueryNode::Empty,
            1 => nodes.pop().unwrap(),
            _ => QueryNode::And(nodes),
        })
    }

    fn parse_unary(&mut self) -> Result<QueryNode, ParseError> {
        self.skip_whitespace();

        if self.consume_char('-') {
            let inner = self.parse_primary()?;
            if matches!(inner, QueryNode::Empty) {
                return Ok(QueryNode::Empty);
            }
            return Ok(QueryNode::Not(Box::new(inner)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<QueryNode, ParseError> {
        self.skip_whitespace();

        // Parenthesized expression
        if self.consume_char('(') {
            let node = self.parse_or()?;
            self.skip_whitespace();
            self.consume_char(')');
            return Ok(node);
        }

        // Quoted phrase on the default field
        if self.peek_char() == Some('"') {
            let field = self.parser.config.default_field.clone();
            return self.parse_phrase(&field);
        }

        // Range on the default field
        if matches!(self.peek_char(), Some('[') | Some('{')) {
            let field = self.parser.config.default_field.clone();
            return self.parse_range(&field);
        }

        self.parse_term()
    }

    fn parse_term(&mut self) -> Result<QueryNode, ParseError> {
        let start = self.pos;

        // Optional field prefix
        while !self.is_eof() {
            let ch = self.peek_char().unwrap();
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else if ch == ':' && self.pos > start {
                let field = self.input[start..self.pos].to_string();
                self.advance();
                return self.parse_scoped(&field);
            } else {
                break;
            }
        }

        self.pos = start;
        let field = self.parser.config.default_field.clone();
        self.parse_term_payload(&field)
    }

    fn parse_scoped(&mut self, field: &str) -> Result<QueryNode, ParseError> {
        match self.peek_char() {
            Some('"') => self.parse_phrase(field),
            Some('[') | Some('{') => self.parse_range(field),
            _ => self.parse_term_payload(field),
        }
    }

    fn parse_phrase(&mut self, field: &str) -> Result<QueryNode, ParseError> {
        self.consume_char('"');
        let mut raw = String::new();

        while !self.is_eof() {
            let ch = self.peek_char().unwrap();
            if ch == '"' {
                break;
            }
            if ch == '\\' {
                self.advance();
                raw.push('\\');
                if let Some(next) = self.peek_char() {
                    raw.push(next);
                    self.advance();
                }
            } else {
                raw.push(ch);
                self.advance();
            }
        }
        self.consume_char('"');

        self.analyzed_clause(field, &unescape(&raw))
    }

    fn parse_range(&mut self, field: &str) -> Result<QueryNode, ParseError> {
        let inclusive = self.peek_char() == Some('[');
        self.advance(); // opening bracket

        self.skip_whitespace();
        let lower = self.scan_range_word();
        self.skip_whitespace();
        if !self.consume_keyword("TO") {
            return Err(ParseError::MalformedRange {
                field: field.to_string(),
            });
        }
        self.skip_whitespace();
        let upper = self.scan_range_word();
        self.skip_whitespace();
        let closed = self.consume_char(']') || self.consume_char('}');

        if !closed || lower.is_empty() || upper.is_empty() {
            return Err(ParseError::MalformedRange {
                field: field.to_string(),
            });
        }

        Ok(QueryNode::Range {
            field: field.to_string(),
            lower: self.range_bound(field, &lower)?,
            upper: self.range_bound(field, &upper)?,
            inclusive,
        })
    }

    /// `*` means an open bound; everything else is normalized.
    fn range_bound(&self, field: &str, raw: &str) -> Result<Option<String>, ParseError> {
        if raw == "*" {
            return Ok(None);
        }
        Ok(Some(self.parser.rewriter.range_bound(field, raw)?))
    }

    fn scan_range_word(&mut self) -> String {
        let mut raw = String::new();
        while !self.is_eof() {
            let ch = self.peek_char().unwrap();
            if ch.is_whitespace() || ch == ']' || ch == '}' {
                break;
            }
            if ch == '\\' {
                self.advance();
                raw.push('\\');
                if let Some(next) = self.peek_char() {
                    raw.push(next);
                    self.advance();
                }
            } else {
                raw.push(ch);
                self.advance();
            }
        }
        raw
    }

    fn parse_term_payload(&mut self, field: &str) -> Result<QueryNode, ParseError> {
        let mut raw = String::new();
        let mut wildcards = 0usize;
        let mut trailing_star = false;
        let mut similarity: Option<f32> = None;

        while !self.is_eof() {
            let ch = self.peek_char().unwrap();
            match ch {
                c if c.is_whitespace() => break,
                '|' | '(' | ')' | '"' => break,
                '\\' => {
                    self.advance();
                    raw.push('\\');
                    trailing_star = false;
                    if let Some(next) = self.peek_char() {
                        raw.push(next);
                        self.advance();
                    }
                }
                '~' => {
                    self.advance();
                    similarity = Some(self.parse_similarity());
                    break;
                }
                '*' | '?' => {
                    wildcards += 1;
                    trailing_star = ch == '*';
                    raw.push(ch);
                    self.advance();
                }
                _ => {
                    trailing_star = false;
                    raw.push(ch);
                    self.advance();
                }
            }
        }

        if raw.is_empty() {
            return Ok(QueryNode::Empty);
        }

        if let Some(similarity) = similarity {
            let text = self.parser.rewriter.fuzzy_term(field, &raw)?;
            return Ok(QueryNode::Fuzzy {
                field: field.to_string(),
                text,
                similarity,
            });
        }

        if wildcards > 0 {
            // A single bare trailing star is a prefix query; the star is
            // stripped before the term reaches the rewriter
            if wildcards == 1 && trailing_star && raw.len() > 1 {
                let stripped = &raw[..raw.len() - 1];
                let text = self.parser.rewriter.wildcard_term(field, stripped)?;
                return Ok(QueryNode::Prefix {
                    field: field.to_string(),
                    text,
                });
            }
            let pattern = self.parser.rewriter.wildcard_term(field, &raw)?;
            return Ok(QueryNode::Wildcard {
                field: field.to_string(),
                pattern,
            });
        }

        self.analyzed_clause(field, &unescape(&raw))
    }

    /// Analyze plain clause text. Zero tokens drops the clause (ordinary
    /// stopword behavior), one becomes a term, several become a phrase.
    fn analyzed_clause(&self, field: &str, text: &str) -> Result<QueryNode, ParseError> {
        let tokens =
            collect_tokens(self.parser.analyzer.as_ref(), field, text).map_err(|source| {
                AnalysisError::Io {
                    field: field.to_string(),
                    chunk: text.to_string(),
                    source,
                }
            })?;

        Ok(match tokens.len() {
            0 => QueryNode::Empty,
            1 => QueryNode::Term {
                field: field.to_string(),
                text: tokens.into_iter().next().unwrap().text,
            },
            _ => QueryNode::Phrase {
                field: field.to_string(),
                terms: tokens.into_iter().map(|t| t.text).collect(),
            },
        })
    }

    fn parse_similarity(&mut self) -> f32 {
        let start = self.pos;
        while !self.is_eof() {
            let ch = self.peek_char().unwrap();
            if ch.is_ascii_digit() || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.pos]
            .parse()
            .unwrap_or(DEFAULT_FUZZY_SIMILARITY)
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        if let Some(after) = self.remaining().strip_prefix(keyword)
            && after.chars().next().is_some_and(|c| c.is_whitespace())
        {
            self.pos += keyword.len();
            return true;
        }
        false
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.peek_char().map(|c| c.is_whitespace()).unwrap_or(false) {
            self.advance();
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }
}

/// Resolve backslash escapes: `\x` becomes `x`. A trailing lone backslash
/// stays literal.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
