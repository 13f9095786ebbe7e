//! Tokenizer for free-text player input.

use logos::Logos;

/// Raw token kinds. Everything that is not a word or a number is skipped.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[^a-zA-Z0-9]+")]
enum RawToken {
    #[regex(r"[a-zA-Z][a-zA-Z']*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,
}

/// Common words that carry no intent signal.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "please", "s", "their", "his", "her", "my", "your", "them", "him", "some",
    "just", "now", "quickly", "quick", "let", "lets", "me", "i", "you", "we", "can", "could",
    "would", "will", "to", "of", "for", "on", "at", "and", "is", "are", "do", "does", "any",
    "there", "this", "that", "it", "be", "go", "ahead", "okay", "ok", "im", "ill",
];

/// Whether `word` is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Lowercase a word and fold its apostrophes: `Patient's` → `patient`,
/// `don't` → `dont`.
fn normalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let stem = lower.strip_suffix("'s").unwrap_or(&lower);
    stem.chars().filter(|&c| c != '\'').collect()
}

/// Split text into normalized word and number tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut lexer = RawToken::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(RawToken::Word) => {
                let word = normalize(lexer.slice());
                if !word.is_empty() {
                    tokens.push(word);
                }
            }
            Ok(RawToken::Number) => tokens.push(lexer.slice().to_string()),
            Err(()) => {}
        }
    }
    tokens
}
