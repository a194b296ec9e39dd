use regex::Regex;
use std::sync::OnceLock;

/// Queries shorter than this are assumed to be a bare title.
const SHORT_QUERY_WORDS: usize = 5;

const MOVIE_KEYWORDS: &[&str] = &["movie", "film", "watch", "see", "about"];
const QUOTES: &[char] = &['"', '\''];
const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// A known question prefix was stripped off.
    High,
    /// The whole query is used as the title.
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleGuess {
    pub title: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    MovieLookup(TitleGuess),
    General,
}

static PREFIX: OnceLock<Regex> = OnceLock::new();

fn prefix_pattern() -> &'static Regex {
    PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^(tell me about|what is|do you know|have you seen)\b\s*").unwrap()
    })
}

/// Decide whether a query is about one particular movie.
pub fn classify(query: &str) -> Intent {
    let query = query.trim();
    if query.is_empty() {
        return Intent::General;
    }

    let lower = query.to_lowercase();
    let short = query.split_whitespace().count() < SHORT_QUERY_WORDS;
    if short || MOVIE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Intent::MovieLookup(extract_title(query))
    } else {
        Intent::General
    }
}

/// Pull a candidate title out of a question like "have you seen Hereditary?".
pub fn extract_title(query: &str) -> TitleGuess {
    let query = query.trim();

    let (rest, confidence) = match prefix_pattern().find(query) {
        Some(m) => (&query[m.end()..], Confidence::High),
        None => (query, Confidence::Low),
    };

    let quote = |c: char| c.is_whitespace() || QUOTES.contains(&c);
    let title = rest
        .trim_start_matches(quote)
        .trim_end_matches(|c: char| quote(c) || TRAILING_PUNCTUATION.contains(&c))
        .to_string();

    // "what is?" leaves nothing behind; fall back to the full query.
    if title.is_empty() {
        return TitleGuess {
            title: query.to_string(),
            confidence: Confidence::Low,
        };
    }

    TitleGuess { title, confidence }
}
