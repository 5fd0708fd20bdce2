//! Token model — the atomic unit stored in the transition chain.

/// Which position a token occupies in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Begin,
    End,
    Prefix,
    Suffix,
    Word,
}

/// One fragment of a tokenized text.
///
/// `Begin` and `End` are sentinels with no payload. `Prefix` and `Suffix`
/// hold punctuation that was stripped from the front or back of a
/// whitespace-separated fragment; they decide where spaces go when the
/// tokens are joined back together. Equality and hashing are structural
/// over kind and content, so tokens are used directly as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Begin,
    End,
    Prefix(String),
    Suffix(String),
    Word(String),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Begin => TokenKind::Begin,
            Self::End => TokenKind::End,
            Self::Prefix(_) => TokenKind::Prefix,
            Self::Suffix(_) => TokenKind::Suffix,
            Self::Word(_) => TokenKind::Word,
        }
    }

    /// Text payload; `None` for the sentinels.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Begin | Self::End => None,
            Self::Prefix(s) | Self::Suffix(s) | Self::Word(s) => Some(s),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Begin | Self::End)
    }

    /// A copy of this token with its content lower-cased.
    pub fn lowercased(&self) -> Token {
        match self {
            Self::Begin => Self::Begin,
            Self::End => Self::End,
            Self::Prefix(s) => Self::Prefix(s.to_lowercase()),
            Self::Suffix(s) => Self::Suffix(s.to_lowercase()),
            Self::Word(s) => Self::Word(s.to_lowercase()),
        }
    }

    /// Reclassify as a `Word`, keeping the content. Sentinels are unchanged.
    pub fn into_word(self) -> Token {
        match self {
            Self::Prefix(s) | Self::Suffix(s) => Self::Word(s),
            other => other,
        }
    }

    /// True for `@user` mentions and `http:`/`https:` links, which are left
    /// out of the chain.
    pub fn is_mention_or_link(&self) -> bool {
        match self {
            Self::Word(s) => {
                if s.starts_with('@') {
                    return true;
                }
                let lower = s.to_lowercase();
                lower.starts_with("http:") || lower.starts_with("https:")
            }
            _ => false,
        }
    }
}
