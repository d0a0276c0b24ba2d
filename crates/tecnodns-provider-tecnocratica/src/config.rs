//! Provider configuration and its config-block parser
//!
//! Syntax:
//!
//! ```text
//! tecnocratica [<api_token>] {
//!     api_token <api_token>
//!     api_url <api_url>
//! }
//! ```
//!
//! The token may be given inline or with `api_token`, never both. Values are
//! stored verbatim; placeholders such as `{env.TECNOCRATICA_TOKEN}` are
//! resolved later, at provisioning time.

use serde::{Deserialize, Serialize};
use std::fmt;
use tecnodns_core::Dispenser;
use thiserror::Error;

/// Tecnocrática provider configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API token (may be a placeholder until provisioned)
    /// ⚠️ NEVER log this value
    #[serde(rename = "api_token")]
    pub token: String,

    /// API base URL; empty means the client default
    #[serde(rename = "api_url", default)]
    pub url: String,
}

// Custom Debug implementation that hides the API token
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("token", &if self.token.is_empty() { "" } else { "<REDACTED>" })
            .field("url", &self.url)
            .finish()
    }
}

/// What was wrong with a configuration block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Inline token and `api_token`, or `api_token` twice
    #[error("API token already set")]
    DuplicateToken,

    /// `api_token` or `api_url` without a value
    #[error("wrong argument count or unexpected line ending after '{0}'")]
    MissingArgument(String),

    /// Unknown key inside the block
    #[error("unrecognized subdirective '{0}'")]
    UnrecognizedDirective(String),

    /// Extra positional token after the block
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    /// No token supplied at all
    #[error("missing API token")]
    MissingToken,
}

/// A [`ConfigError`] with the position of the offending token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}:{line} - Error during parsing: {kind}")]
pub struct ConfigSyntaxError {
    /// File the block came from
    pub file: String,
    /// Line of the offending token
    pub line: usize,
    /// The violation
    pub kind: ConfigError,
}

impl ConfigSyntaxError {
    fn at(d: &Dispenser, kind: ConfigError) -> Self {
        Self {
            file: d.file().to_string(),
            line: d.line(),
            kind,
        }
    }
}

impl From<ConfigSyntaxError> for tecnodns_core::Error {
    fn from(err: ConfigSyntaxError) -> Self {
        tecnodns_core::Error::syntax(err.file, err.line, err.kind.to_string())
    }
}

impl ProviderConfig {
    /// Parse one `tecnocratica` block from the dispenser.
    ///
    /// Stops at the first violation. Pure: no I/O and no placeholder
    /// expansion.
    pub fn parse(d: &mut Dispenser) -> Result<Self, ConfigSyntaxError> {
        let mut config = ProviderConfig::default();

        d.next(); // consume directive name

        if d.next_arg() {
            config.token = d.val().to_string();
        }

        let nesting = d.nesting();
        while d.next_block(nesting) {
            let key = d.val().to_string();
            match key.as_str() {
                "api_token" => {
                    if !config.token.is_empty() {
                        return Err(ConfigSyntaxError::at(d, ConfigError::DuplicateToken));
                    }
                    if !d.next_arg() {
                        return Err(ConfigSyntaxError::at(d, ConfigError::MissingArgument(key)));
                    }
                    config.token = d.val().to_string();
                }
                "api_url" => {
                    // A later api_url silently replaces an earlier one
                    if !d.next_arg() {
                        return Err(ConfigSyntaxError::at(d, ConfigError::MissingArgument(key)));
                    }
                    config.url = d.val().to_string();
                }
                _ => {
                    return Err(ConfigSyntaxError::at(d, ConfigError::UnrecognizedDirective(key)));
                }
            }
        }

        if d.next_arg() {
            let extra = d.val().to_string();
            return Err(ConfigSyntaxError::at(d, ConfigError::UnexpectedArgument(extra)));
        }

        if config.token.is_empty() {
            return Err(ConfigSyntaxError::at(d, ConfigError::MissingToken));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<ProviderConfig, ConfigSyntaxError> {
        let mut d = Dispenser::from_str(input).expect("input lexes");
        ProviderConfig::parse(&mut d)
    }

    fn kind(input: &str) -> ConfigError {
        parse(input).expect_err("parse should fail").kind
    }

    #[test]
    fn test_api_token_only() {
        let config = parse("tecnocratica {\n  api_token test_token\n}").unwrap();
        assert_eq!(config.token, "test_token");
        assert_eq!(config.url, "");
    }

    #[test]
    fn test_api_token_and_api_url() {
        let config =
            parse("tecnocratica {\n  api_token test_token\n  api_url https://api.neodigit.net/v1\n}")
                .unwrap();
        assert_eq!(config.token, "test_token");
        assert_eq!(config.url, "https://api.neodigit.net/v1");
    }

    #[test]
    fn test_inline_token() {
        let config = parse("tecnocratica test_token").unwrap();
        assert_eq!(config.token, "test_token");
        assert_eq!(config.url, "");
    }

    #[test]
    fn test_inline_token_with_url_block() {
        let config = parse("tecnocratica test_token {\n  api_url https://x.example\n}").unwrap();
        assert_eq!(config.token, "test_token");
        assert_eq!(config.url, "https://x.example");
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(kind("tecnocratica"), ConfigError::MissingToken);
        assert_eq!(
            kind("tecnocratica {\n  api_url https://x.example\n}"),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn test_duplicate_token() {
        assert_eq!(
            kind("tecnocratica inline_token {\n  api_token block_token\n}"),
            ConfigError::DuplicateToken
        );
        assert_eq!(
            kind("tecnocratica {\n  api_token token1\n  api_token token2\n}"),
            ConfigError::DuplicateToken
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            kind("tecnocratica {\n  api_token\n}"),
            ConfigError::MissingArgument("api_token".to_string())
        );
        assert_eq!(
            kind("tecnocratica {\n  api_token test_token\n  api_url\n}"),
            ConfigError::MissingArgument("api_url".to_string())
        );
    }

    #[test]
    fn test_unrecognized_subdirective() {
        let err = parse("tecnocratica {\n  api_token test_token\n  invalid_directive value\n}")
            .unwrap_err();
        assert_eq!(
            err.kind,
            ConfigError::UnrecognizedDirective("invalid_directive".to_string())
        );
        assert_eq!(err.line, 3);
        assert!(err.to_string().contains("unrecognized subdirective 'invalid_directive'"));
    }

    #[test]
    fn test_unexpected_argument() {
        let err = parse("tecnocratica token1 token2").unwrap_err();
        assert_eq!(err.kind, ConfigError::UnexpectedArgument("token2".to_string()));
        assert!(err.to_string().contains("unexpected argument 'token2'"));
    }

    #[test]
    fn test_unexpected_argument_after_block() {
        assert_eq!(
            kind("tecnocratica {\n  api_token t\n} extra"),
            ConfigError::UnexpectedArgument("extra".to_string())
        );
    }

    #[test]
    fn test_later_api_url_overwrites() {
        let config = parse(
            "tecnocratica {\n  api_token t\n  api_url https://first.example\n  api_url https://second.example\n}",
        )
        .unwrap();
        assert_eq!(config.url, "https://second.example");
    }

    #[test]
    fn test_placeholders_are_stored_verbatim() {
        let config = parse(
            "tecnocratica {\n  api_token {env.TECNOCRATICA_TOKEN}\n  api_url {env.TECNOCRATICA_URL}\n}",
        )
        .unwrap();
        assert_eq!(config.token, "{env.TECNOCRATICA_TOKEN}");
        assert_eq!(config.url, "{env.TECNOCRATICA_URL}");
    }

    #[test]
    fn test_empty_block_requires_token() {
        assert_eq!(kind("tecnocratica { }"), ConfigError::MissingToken);
    }

    #[test]
    fn test_converts_to_core_syntax_error() {
        let err: tecnodns_core::Error = parse("tecnocratica").unwrap_err().into();
        match err {
            tecnodns_core::Error::Syntax { file, line, message } => {
                assert_eq!(file, "Testfile");
                assert_eq!(line, 1);
                assert_eq!(message, "missing API token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig {
            token: "secret_token_12345".to_string(),
            url: String::new(),
        };
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_token"));
        assert!(debug_str.contains("<REDACTED>"));
    }

    #[test]
    fn test_json_field_names() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"api_token":"{env.T}"}"#).unwrap();
        assert_eq!(config.token, "{env.T}");
        assert_eq!(config.url, "");
    }
}
