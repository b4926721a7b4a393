use crate::analysis::token::Token;

/// Maximum token length emitted by the standard tokenizer.
/// Longer runs are almost always noise (hashes, base64 blobs) rather than
/// searchable words.
const MAX_TOKEN_LEN: usize = 128;

/// Trait for tokenizers that split text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Name for logs and configuration.
    fn name(&self) -> &'static str;
}

/// Splits on any character that is not alphanumeric or `_`.
///
/// This is the tokenizer used for ordinary prose and identifier-like
/// fields; punctuation, whitespace, and symbols all end a token.
pub struct StandardTokenizer;

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = 0;
        let mut start = 0;
        let mut in_word = false;

        for (i, ch) in text.char_indices() {
            let is_word_char = ch.is_alphanumeric() || ch == '_';

            if is_word_char {
                if !in_word {
                    start = i;
                    in_word = true;
                }
            } else if in_word {
                push_word(&mut tokens, text, start, i, &mut position);
                in_word = false;
            }
        }

        if in_word {
            push_word(&mut tokens, text, start, text.len(), &mut position);
        }

        tokens
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

fn push_word(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize, position: &mut usize) {
    let word = &text[start..end];
    if !word.is_empty() && word.len() <= MAX_TOKEN_LEN {
        tokens.push(Token::new(word, start, end, *position));
        *position += 1;
    }
}

/// Splits on whitespace only; punctuation stays attached to tokens.
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = 0;
        let mut start = 0;
        let mut in_word = false;

        for (i, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if in_word {
                    tokens.push(Token::new(&text[start..i], start, i, position));
                    position += 1;
                    in_word = false;
                }
            } else if !in_word {
                start = i;
                in_word = true;
            }
        }

        if in_word {
            tokens.push(Token::new(&text[start..], start, text.len(), position));
        }

        tokens
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Emits the entire input as a single token; empty input yields none.
pub struct KeywordTokenizer;

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            Vec::new()
        } else {
            vec![Token::new(text, 0, text.len(), 0)]
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_splits_on_punctuation() {
        let tokens = StandardTokenizer.tokenize("wi-fi router");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["wi", "fi", "router"]);
    }

    #[test]
    fn test_standard_offsets() {
        let tokens = StandardTokenizer.tokenize("foo bar");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 3);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].end, 7);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_standard_keeps_unicode_words() {
        let tokens = StandardTokenizer.tokenize("Häuser am See");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Häuser", "am", "See"]);
    }

    #[test]
    fn test_standard_empty_input() {
        assert!(StandardTokenizer.tokenize("").is_empty());
        assert!(StandardTokenizer.tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_whitespace_keeps_punctuation() {
        let tokens = WhitespaceTokenizer.tokenize("wi-fi  router ");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["wi-fi", "router"]);
    }

    #[test]
    fn test_keyword_whole_input() {
        let tokens = KeywordTokenizer.tokenize("Run ing");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Run ing");
        assert_eq!(tokens[0].end, 7);
    }

    #[test]
    fn test_keyword_empty_input() {
        assert!(KeywordTokenizer.tokenize("").is_empty());
    }
}
