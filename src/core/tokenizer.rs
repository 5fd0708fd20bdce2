/// Tokenizer — splits raw text into punctuation-aware tokens.
use crate::schema::token::Token;

/// Characters peeled off the front and back of each whitespace-separated
/// fragment. `@`, `#`, `/` and `-` are deliberately absent so mentions,
/// hashtags, links and hyphenated words stay whole.
pub const PUNCTUATION: &[char] = &[
    '"', '\'', '“', '”', '‘', '’', '«', '»', '(', ')', '[', ']', '{', '}', '<', '>', '.', ',',
    '!', '?', ';', ':', '…', '$', '£', '€', '¥', '%', '*', '~',
];

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Tokenize one text into `[Begin, ..., End]`.
///
/// Leading punctuation becomes `Prefix` tokens and trailing punctuation
/// becomes `Suffix` tokens, both in their original order around the `Word`
/// core. A fragment made entirely of punctuation has no core; its last token
/// is then reclassified as a `Word` so that whatever follows is spaced from
/// it normally when the tokens are joined again.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = vec![Token::Begin];

    for fragment in text.split_whitespace() {
        let mut remaining = fragment;

        while let Some(first) = remaining.chars().next() {
            if !is_punctuation(first) {
                break;
            }
            tokens.push(Token::Prefix(first.to_string()));
            remaining = &remaining[first.len_utf8()..];
        }

        // Collected back to front.
        let mut suffixes = Vec::new();
        while let Some(last) = remaining.chars().next_back() {
            if !is_punctuation(last) {
                break;
            }
            suffixes.push(Token::Suffix(last.to_string()));
            remaining = &remaining[..remaining.len() - last.len_utf8()];
        }

        if remaining.is_empty() {
            // All punctuation: the last prefix pushed for this fragment
            // becomes its word.
            if let Some(last) = tokens.pop() {
                tokens.push(last.into_word());
            }
        } else {
            tokens.push(Token::Word(remaining.to_string()));
            tokens.extend(suffixes.into_iter().rev());
        }
    }

    tokens.push(Token::End);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::join_tokens;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    fn prefix(s: &str) -> Token {
        Token::Prefix(s.to_string())
    }

    fn suffix(s: &str) -> Token {
        Token::Suffix(s.to_string())
    }

    fn inner(text: &str) -> Vec<Token> {
        let mut tokens = tokenize(text);
        assert_eq!(tokens.first(), Some(&Token::Begin));
        assert_eq!(tokens.last(), Some(&Token::End));
        tokens.remove(0);
        tokens.pop();
        tokens
    }

    #[test]
    fn empty_input_is_begin_end() {
        assert_eq!(tokenize(""), vec![Token::Begin, Token::End]);
        assert_eq!(tokenize("   \t\n "), vec![Token::Begin, Token::End]);
    }

    #[test]
    fn tokenize_basic() {
        assert_eq!(
            inner("Hello, world."),
            vec![word("Hello"), suffix(","), word("world"), suffix(".")]
        );
    }

    #[test]
    fn quotes_and_brackets_split_off() {
        assert_eq!(
            inner("\"(Really?!)\""),
            vec![
                prefix("\""),
                prefix("("),
                word("Really"),
                suffix("?"),
                suffix("!"),
                suffix(")"),
                suffix("\""),
            ]
        );
    }

    #[test]
    fn inner_punctuation_stays_in_word() {
        assert_eq!(inner("don't e.g. $5"), vec![
            word("don't"),
            word("e.g"),
            suffix("."),
            prefix("$"),
            word("5"),
        ]);
    }

    #[test]
    fn punctuation_only_fragment_ends_in_word() {
        assert_eq!(
            inner("wait ... what"),
            vec![word("wait"), prefix("."), prefix("."), word("."), word("what")]
        );
        assert_eq!(inner("!"), vec![word("!")]);
    }

    #[test]
    fn multibyte_punctuation() {
        assert_eq!(
            inner("“café…”"),
            vec![prefix("“"), word("café"), suffix("…"), suffix("”")]
        );
    }

    #[test]
    fn mentions_and_links_are_kept_as_words() {
        assert_eq!(
            inner("@bob: http://x.com/a?b"),
            vec![word("@bob"), suffix(":"), word("http://x.com/a?b")]
        );
    }

    #[test]
    fn round_trips_through_join() {
        for text in [
            "Hello, world.",
            "wait ... what",
            "She said \"hi\" (twice)!",
            "is it $5 or 5%?",
            "one two three",
            "ok !",
        ] {
            assert_eq!(join_tokens(&inner(text)), text, "round trip of {text:?}");
        }
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(join_tokens(&inner("  a\tb \n c ")), "a b c");
    }
}
