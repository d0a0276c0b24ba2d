// # Tecnocrática DNS Provider
//
// This crate provides the `dns.providers.tecnocratica` module: a thin adapter
// between a host's module registry and the Tecnocrática (Neodigit) DNS API.
//
// ## Configuration
//
// ```text
// tecnocratica [<api_token>] {
//     api_token <api_token>
//     api_url <api_url>
// }
// ```
//
// Values may contain placeholders such as `{env.TECNOCRATICA_TOKEN}`; they
// are expanded once, when the module is provisioned.
//
// ## Architectural Constraints
//
// - Record operations are forwarded to the client unchanged
// - No retry, backoff or caching in this crate
// - API token NEVER appears in logs
//
// ## Usage
//
// ```rust,ignore
// use tecnodns_core::{registry, Context, Dispenser};
//
// tecnodns_provider_tecnocratica::register(registry::global())?;
//
// let mut d = Dispenser::from_str("tecnocratica {env.TECNOCRATICA_TOKEN}")?;
// let provider = registry::global().load_module("dns.providers", &mut d, &Context::new())?;
// let records = provider.get_records("example.com").await?;
// ```

pub mod client;
pub mod config;
pub mod provider;

pub use client::TecnocraticaClient;
pub use config::{ConfigError, ConfigSyntaxError, ProviderConfig};
pub use provider::{FromProviderConfig, MODULE_ID, TecnocraticaProvider};

use tecnodns_core::{Module, ModuleRegistry, Result};

/// Register the Tecnocrática module with a registry
///
/// # Returns
///
/// - `Err(Error::Config)`: If `dns.providers.tecnocratica` is already registered
pub fn register(registry: &ModuleRegistry) -> Result<()> {
    registry.register_module(TecnocraticaProvider::<TecnocraticaClient>::module_info())
}
