//! Line tokenizer
//!
//! Source is line oriented: each line is trimmed and split on runs of
//! whitespace. Lines starting with `;` are comments.

/// One classified source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Comment,
    Tokens(Vec<String>),
}

/// A tokenized source line with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-indexed)
    pub number: usize,
    pub tokens: Vec<String>,
}

/// Classify a single line of source
pub fn classify(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Blank
    } else if trimmed.starts_with(';') {
        Line::Comment
    } else {
        Line::Tokens(trimmed.split_whitespace().map(str::to_string).collect())
    }
}

/// Tokenize a whole source text, skipping blank and comment lines
pub fn tokenize(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match classify(line) {
            Line::Tokens(tokens) => Some(SourceLine {
                number: index + 1,
                tokens,
            }),
            Line::Blank | Line::Comment => None,
        })
        .collect()
}
