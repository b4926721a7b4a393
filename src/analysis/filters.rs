use crate::analysis::token::Token;
use ahash::AHashSet;

/// Trait for filters that transform or drop tokens.
pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// Name for logs and configuration.
    fn name(&self) -> &'static str;
}

/// Lowercases token text.
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.text = t.text.to_lowercase();
                t
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// Folds accented Latin characters to their ASCII base form, so that
/// `Häuser` and `Hauser` normalize to the same token.
pub struct AsciiFoldingFilter;

impl TokenFilter for AsciiFoldingFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut t| {
                if t.text.chars().any(|c| !c.is_ascii()) {
                    t.text = fold_to_ascii(&t.text);
                }
                t
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}

fn fold_to_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => out.push('A'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => out.push('O'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("Ae"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("Oe"),
            _ => out.push(c),
        }
    }
    out
}

/// Drops tokens found in a stopword set.
pub struct StopWordFilter {
    words: AHashSet<String>,
}

impl StopWordFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    /// Common English stopwords.
    pub fn english() -> Self {
        Self::new([
            "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has",
            "have", "if", "in", "into", "is", "it", "its", "no", "not", "of", "on", "or", "such",
            "that", "the", "their", "then", "there", "these", "they", "this", "to", "was", "were",
            "will", "with",
        ])
    }

    /// Add words on top of the current set.
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.words.insert(word.into().to_lowercase());
        }
    }
}

impl TokenFilter for StopWordFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|t| !self.words.contains(&t.text.to_lowercase()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "stopwords"
    }
}

/// Drops tokens outside a byte-length range.
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl TokenFilter for LengthFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|t| t.text.len() >= self.min && t.text.len() <= self.max)
            .collect()
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, 0, t.len(), i))
            .collect()
    }

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_lowercase() {
        let out = LowercaseFilter.apply(toks(&["RunNing", "ärger"]));
        assert_eq!(texts(&out), vec!["running", "ärger"]);
    }

    #[test]
    fn test_ascii_folding() {
        let out = AsciiFoldingFilter.apply(toks(&["Häuser", "façade", "Straße"]));
        assert_eq!(texts(&out), vec!["Hauser", "facade", "Strasse"]);
    }

    #[test]
    fn test_ascii_folding_leaves_ascii_untouched() {
        let out = AsciiFoldingFilter.apply(toks(&["plain"]));
        assert_eq!(texts(&out), vec!["plain"]);
    }

    #[test]
    fn test_stopwords() {
        let filter = StopWordFilter::english();
        let out = filter.apply(toks(&["the", "quick", "fox"]));
        assert_eq!(texts(&out), vec!["quick", "fox"]);
    }

    #[test]
    fn test_stopwords_extra_words() {
        let mut filter = StopWordFilter::english();
        filter.add_words(["quick"]);
        let out = filter.apply(toks(&["the", "quick", "fox"]));
        assert_eq!(texts(&out), vec!["fox"]);
    }

    #[test]
    fn test_stopwords_case_insensitive() {
        let filter = StopWordFilter::english();
        let out = filter.apply(toks(&["The", "Fox"]));
        assert_eq!(texts(&out), vec!["Fox"]);
    }

    #[test]
    fn test_length_filter() {
        let filter = LengthFilter::new(2, 5);
        let out = filter.apply(toks(&["a", "fox", "jumping"]));
        assert_eq!(texts(&out), vec!["fox"]);
    }
}
