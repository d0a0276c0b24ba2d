//! Forward-only cursor over a token stream
//!
//! Modules parse their configuration by pulling tokens from a [`Dispenser`]:
//!
//! ```rust
//! use tecnodns_core::config_block::Dispenser;
//!
//! let mut d = Dispenser::from_str("example arg {\n  key value\n}").unwrap();
//! assert!(d.next());            // directive name
//! assert!(d.next_arg());        // "arg"
//! while d.next_block(0) {
//!     assert_eq!(d.val(), "key");
//!     assert!(d.next_arg());
//!     assert_eq!(d.val(), "value");
//! }
//! assert!(!d.next_arg());
//! ```

use std::fmt;
use std::path::Path;

use super::lexer::{Token, tokenize};
use crate::{Error, Result};

/// File name used for tokens that did not come from a file
pub const TEST_FILE: &str = "Testfile";

/// Token cursor with block-nesting awareness
#[derive(Debug, Clone)]
pub struct Dispenser {
    tokens: Vec<Token>,
    cursor: isize,
    nesting: usize,
}

impl Dispenser {
    /// Create a dispenser over already-lexed tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: -1,
            nesting: 0,
        }
    }

    /// Lex `input` and wrap it in a dispenser
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Ok(Self::new(tokenize(input, TEST_FILE)?))
    }

    /// Read and lex a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        Ok(Self::new(tokenize(&input, &path.display().to_string())?))
    }

    /// Advance to the next token, wherever it is
    pub fn next(&mut self) -> bool {
        if self.cursor < self.tokens.len() as isize - 1 {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Advance to the next token only if it is an argument on the current
    /// line. Block braces are never arguments.
    ///
    /// A bare `}` is refused as well as `{`, so a block closed on the
    /// directive's own line (`name arg }`) ends the argument list. Quote a
    /// brace (`"}"`) to pass it as an argument.
    pub fn next_arg(&mut self) -> bool {
        if !self.next_on_same_line() {
            return false;
        }
        if self.current().is_some_and(|t| t.is_open_brace() || t.is_close_brace()) {
            self.cursor -= 1;
            return false;
        }
        true
    }

    /// Iterate the directives of a block opened at `initial_nesting`.
    ///
    /// The first call consumes the `{` that must follow on the current line
    /// and moves to the first directive. Each later call moves to the next
    /// token inside the block and returns `false` once the closing `}` has
    /// been consumed. Directives must consume their own arguments.
    pub fn next_block(&mut self, initial_nesting: usize) -> bool {
        if self.nesting > initial_nesting {
            if !self.next() {
                return false;
            }
            if let Some(token) = self.current() {
                if token.is_close_brace() {
                    self.nesting -= 1;
                } else if token.is_open_brace() {
                    self.nesting += 1;
                }
            }
            return self.nesting > initial_nesting;
        }

        if !self.next_on_same_line() {
            return false;
        }
        if !self.current().is_some_and(Token::is_open_brace) {
            self.cursor -= 1;
            return false;
        }
        if !self.next() {
            return false;
        }
        if self.current().is_some_and(Token::is_close_brace) {
            return false;
        }
        self.nesting += 1;
        true
    }

    /// Text of the current token, or `""` before the first token
    pub fn val(&self) -> &str {
        self.current().map(|t| t.text.as_str()).unwrap_or_default()
    }

    /// Line of the current token (0 before the first token)
    pub fn line(&self) -> usize {
        self.current().map(|t| t.line).unwrap_or_default()
    }

    /// File of the current token
    pub fn file(&self) -> &str {
        self.current()
            .or_else(|| self.tokens.first())
            .map(|t| t.file.as_str())
            .unwrap_or(TEST_FILE)
    }

    /// Text of the next token without advancing
    pub fn peek(&self) -> Option<&str> {
        self.tokens
            .get((self.cursor + 1) as usize)
            .map(|t| t.text.as_str())
    }

    /// Current block nesting depth
    pub fn nesting(&self) -> usize {
        self.nesting
    }

    /// Rewind to before the first token
    pub fn reset(&mut self) {
        self.cursor = -1;
        self.nesting = 0;
    }

    /// Syntax error at the current token
    pub fn err(&self, message: impl Into<String>) -> Error {
        Error::syntax(self.file(), self.line(), message)
    }

    /// Syntax error with a formatted message at the current token
    pub fn errf(&self, args: fmt::Arguments<'_>) -> Error {
        self.err(args.to_string())
    }

    /// Syntax error for a missing or surplus argument
    pub fn arg_err(&self) -> Error {
        self.errf(format_args!(
            "wrong argument count or unexpected line ending after '{}'",
            self.val()
        ))
    }

    fn current(&self) -> Option<&Token> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|i| self.tokens.get(i))
    }

    fn next_on_same_line(&mut self) -> bool {
        let Some(curr) = self.current() else {
            return self.next();
        };
        let Some(next) = self.tokens.get(self.cursor as usize + 1) else {
            return false;
        };
        if curr.file == next.file && curr.end_line() == next.line {
            self.cursor += 1;
            true
        } else {
            false
        }
    }
}
