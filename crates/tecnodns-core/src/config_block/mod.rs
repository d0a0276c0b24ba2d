//! Block-structured configuration language
//!
//! A configuration block is a directive name, optional inline arguments, and
//! an optional brace-delimited body of sub-directives:
//!
//! ```text
//! tecnocratica [<api_token>] {
//!     api_token <api_token>
//!     api_url <api_url>
//! }
//! ```
//!
//! [`tokenize`] turns text into [`Token`]s and [`Dispenser`] lets a module
//! walk them.

pub mod dispenser;
pub mod lexer;

pub use dispenser::{Dispenser, TEST_FILE};
pub use lexer::{Token, tokenize};
