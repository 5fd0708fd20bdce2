/// Renderer — joins generated tokens back into display text.
use crate::schema::token::Token;

/// Default maximum rendered length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 140;

/// Join, sentence-case, then truncate to `max_len` characters.
pub fn render(tokens: &[Token], max_len: usize) -> String {
    truncate(&sentence_case(&join_tokens(tokens)), max_len)
}

/// Reassemble tokens into text.
///
/// A space goes before every token except the first, a `Suffix`, or a token
/// following a `Prefix`. Sentinels carry no text and are skipped.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        let Some(content) = token.content() else {
            continue;
        };
        let attach = match previous {
            None => true,
            Some(Token::Prefix(_)) => true,
            Some(_) => matches!(token, Token::Suffix(_)),
        };
        if !attach {
            result.push(' ');
        }
        result.push_str(content);
        previous = Some(token);
    }
    result
}

/// Uppercase the first letter of the text and any character that directly
/// follows `". "`, `"! "` or `"; "`.
pub fn sentence_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut seen_letter = false;
    let mut before_last: Option<char> = None;
    let mut last: Option<char> = None;

    for c in text.chars() {
        let after_break = matches!(
            (before_last, last),
            (Some('.' | '!' | ';'), Some(' '))
        );
        let first_letter = !seen_letter && c.is_alphabetic();

        if first_letter || after_break {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }

        seen_letter |= c.is_alphabetic();
        before_last = last;
        last = Some(c);
    }
    result
}

/// Cut `text` to at most `max_len` characters without splitting a word.
///
/// Text that already fits is returned as-is. Otherwise the first `max_len`
/// characters are kept; when the character right after them is not a space
/// the partial last word is dropped too. A single word longer than
/// `max_len` is hard-cut. Trailing whitespace is trimmed from a cut result.
pub fn truncate(text: &str, max_len: usize) -> String {
    let Some((cut, next)) = text.char_indices().nth(max_len) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let kept = if next == ' ' {
        head
    } else {
        match head.rfind(' ') {
            Some(space) => &head[..space],
            None => head,
        }
    };
    kept.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn reassemble_attaches_punctuation() {
        let tokens = vec![
            word("hello"),
            Token::Suffix(",".into()),
            Token::Prefix("\"".into()),
            word("world"),
            Token::Suffix("\"".into()),
            Token::Suffix(".".into()),
        ];
        assert_eq!(join_tokens(&tokens), "hello, \"world\".");
    }

    #[test]
    fn join_skips_sentinels() {
        let tokens = vec![Token::Begin, word("a"), word("b"), Token::End];
        assert_eq!(join_tokens(&tokens), "a b");
        assert_eq!(join_tokens(&[]), "");
    }

    #[test]
    fn leading_suffix_gets_no_space() {
        let tokens = vec![Token::Suffix(".".into()), word("a")];
        assert_eq!(join_tokens(&tokens), ". a");
    }

    #[test]
    fn sentence_case_after_terminators() {
        assert_eq!(sentence_case("hello. world"), "Hello. World");
        assert_eq!(sentence_case("wow! yes; no? maybe"), "Wow! Yes; No? maybe");
    }

    #[test]
    fn sentence_case_skips_leading_punctuation() {
        assert_eq!(sentence_case("\"hi\" there"), "\"Hi\" there");
        assert_eq!(sentence_case("3 cats"), "3 Cats");
        assert_eq!(sentence_case(""), "");
    }

    #[test]
    fn sentence_case_keeps_existing_capitals() {
        assert_eq!(sentence_case("I said NO. ok"), "I said NO. Ok");
    }

    #[test]
    fn truncate_drops_partial_word() {
        assert_eq!(truncate("The quick brown fox", 10), "The quick");
    }

    #[test]
    fn truncate_at_space_boundary() {
        // Character 9 is a space, so the nine-character prefix is whole.
        assert_eq!(truncate("The quick brown fox", 9), "The quick");
        assert_eq!(truncate("ab  cd", 3), "ab");
    }

    #[test]
    fn truncate_leaves_short_text() {
        assert_eq!(truncate("short", 140), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_hard_cuts_single_long_word() {
        assert_eq!(truncate("abcdefghijkl", 5), "abcde");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 8), "héllo");
    }

    #[test]
    fn render_runs_every_stage() {
        let tokens = vec![
            word("hello"),
            Token::Suffix(".".into()),
            word("this"),
            word("is"),
            word("long"),
        ];
        assert_eq!(render(&tokens, 140), "Hello. This is long");
        assert_eq!(render(&tokens, 15), "Hello. This is");
    }
}
