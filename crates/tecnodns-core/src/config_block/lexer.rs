//! Tokenizer for the block configuration language
//!
//! Splits input on whitespace while tracking line numbers. Supports `#`
//! comments, `"double quoted"` tokens with `\"` escapes, and `` `raw` ``
//! backtick tokens. Braces are ordinary characters; a standalone `{` or `}`
//! token is treated as a block delimiter by the [`Dispenser`](super::Dispenser).

use crate::{Error, Result};

/// A single token with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// File the token came from
    pub file: String,
    /// 1-based line the token starts on
    pub line: usize,
    /// Token text with quotes removed
    pub text: String,
    /// Whether the token was quoted in the source
    pub quoted: bool,
}

impl Token {
    /// Whether this token opens a block
    pub fn is_open_brace(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    /// Whether this token closes a block
    pub fn is_close_brace(&self) -> bool {
        !self.quoted && self.text == "}"
    }

    /// Last line this token occupies (quoted tokens may span lines)
    pub(crate) fn end_line(&self) -> usize {
        self.line + self.text.matches('\n').count()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Double,
    Backtick,
}

/// Tokenize `input`, attributing every token to `file`.
///
/// Fails on an unterminated quote or on unbalanced block braces.
pub fn tokenize(input: &str, file: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut quoted = false;
    let mut comment = false;
    let mut line = 1;
    let mut start_line = 1;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if comment {
            if ch == '\n' {
                comment = false;
                line += 1;
            }
            continue;
        }

        match quote {
            Quote::Double => {
                if ch == '\\' && chars.peek() == Some(&'"') {
                    text.push('"');
                    chars.next();
                    continue;
                }
                if ch == '"' {
                    quote = Quote::None;
                    continue;
                }
                if ch == '\n' {
                    line += 1;
                }
                text.push(ch);
                continue;
            }
            Quote::Backtick => {
                if ch == '`' {
                    quote = Quote::None;
                    continue;
                }
                if ch == '\n' {
                    line += 1;
                }
                text.push(ch);
                continue;
            }
            Quote::None => {}
        }

        if ch.is_whitespace() {
            if in_token {
                tokens.push(Token {
                    file: file.to_string(),
                    line: start_line,
                    text: std::mem::take(&mut text),
                    quoted,
                });
                in_token = false;
                quoted = false;
            }
            if ch == '\n' {
                line += 1;
            }
            continue;
        }

        if !in_token {
            if ch == '#' {
                comment = true;
                continue;
            }
            in_token = true;
            start_line = line;
            match ch {
                '"' => {
                    quote = Quote::Double;
                    quoted = true;
                    continue;
                }
                '`' => {
                    quote = Quote::Backtick;
                    quoted = true;
                    continue;
                }
                _ => {}
            }
        }

        text.push(ch);
    }

    if quote != Quote::None {
        return Err(Error::syntax(file, start_line, "unterminated quoted token"));
    }

    if in_token {
        tokens.push(Token {
            file: file.to_string(),
            line: start_line,
            text,
            quoted,
        });
    }

    check_braces(&tokens, file)?;

    Ok(tokens)
}

fn check_braces(tokens: &[Token], file: &str) -> Result<()> {
    let mut open: Vec<usize> = Vec::new();

    for token in tokens {
        if token.is_open_brace() {
            open.push(token.line);
        } else if token.is_close_brace() && open.pop().is_none() {
            return Err(Error::syntax(
                file,
                token.line,
                "unexpected '}' because no matching opening brace",
            ));
        }
    }

    match open.last() {
        Some(line) => Err(Error::syntax(file, *line, "unexpected EOF, expecting '}'")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_block() {
        let tokens = tokenize("tecnocratica {\n  api_token abc\n}", "Testfile").unwrap();

        assert_eq!(texts(&tokens), vec!["tecnocratica", "{", "api_token", "abc", "}"]);
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_placeholders_stay_in_words() {
        let tokens = tokenize("api_token prefix_{env.SUFFIX} {env.X}", "Testfile").unwrap();

        assert_eq!(texts(&tokens), vec!["api_token", "prefix_{env.SUFFIX}", "{env.X}"]);
        assert!(!tokens[2].is_open_brace());
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = tokenize("# header\nfoo bar # trailing\nbaz", "Testfile").unwrap();

        assert_eq!(texts(&tokens), vec!["foo", "bar", "baz"]);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_quoted_tokens() {
        let tokens = tokenize(r#"a "b c" "say \"hi\"" `raw \"` """#, "Testfile").unwrap();

        assert_eq!(texts(&tokens), vec!["a", "b c", r#"say "hi""#, r#"raw \""#, ""]);
        assert!(tokens[1].quoted);
        assert!(!tokens[0].quoted);
    }

    #[test]
    fn test_quoted_brace_is_not_delimiter() {
        let tokens = tokenize(r#"foo "{""#, "Testfile").unwrap();
        assert!(!tokens[1].is_open_brace());
    }

    #[test]
    fn test_multiline_quote_tracks_lines() {
        let tokens = tokenize("a \"x\ny\"\nb", "Testfile").unwrap();

        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[1].end_line(), 2);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("a\n\"open", "Testfile").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(matches!(
            tokenize("a {\n b", "Testfile").unwrap_err(),
            Error::Syntax { line: 1, .. }
        ));
        assert!(matches!(
            tokenize("a\n}", "Testfile").unwrap_err(),
            Error::Syntax { line: 2, .. }
        ));
    }
}
