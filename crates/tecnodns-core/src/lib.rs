// # tecnodns-core
//
// Core library for pluggable DNS record provider modules.
//
// ## Architecture Overview
//
// This library provides what a host needs to load a DNS provider from a
// configuration block and drive it:
// - **Record / RecordType**: Zone-relative DNS record model
// - **RecordGetter / RecordAppender / RecordSetter / RecordDeleter**: The four
//   record capabilities every provider client implements
// - **config_block**: Lexer and token dispenser for the block config language
// - **Replacer**: `{env.X}`-style placeholder expansion
// - **Module / Unmarshaler / Provisioner**: The module lifecycle contract
// - **ModuleRegistry**: Plugin-based registry of module constructors
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Providers own API calls, hosts own lifecycle
// 2. **Plugin-Based**: Modules are registered by ID, no hard-coded if-else
// 3. **Library-First**: All functionality can be used as a library
// 4. **Pass-Through**: No retries or caching between host and provider

pub mod config_block;
pub mod error;
pub mod module;
pub mod record;
pub mod registry;
pub mod replacer;
pub mod traits;

// Re-export core types for convenience
pub use config_block::Dispenser;
pub use error::{Error, Result};
pub use module::{Context, DnsProviderModule, Module, ModuleId, ModuleInfo, Provisioner, Unmarshaler};
pub use record::{Record, RecordType};
pub use registry::ModuleRegistry;
pub use replacer::Replacer;
pub use traits::{RecordAppender, RecordClient, RecordDeleter, RecordGetter, RecordSetter};
