//! Plugin-based module registry
//!
//! The registry maps module IDs to constructors, so hosts can instantiate
//! providers named in their configuration without hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tecnodns_core::config_block::Dispenser;
//! use tecnodns_core::module::Context;
//! use tecnodns_core::registry;
//!
//! // Once, during start-up
//! tecnodns_provider_tecnocratica::register(registry::global())?;
//!
//! // Whenever a config block names a provider
//! let mut d = Dispenser::from_file("dns.conf")?;
//! let provider = registry::global().load_module("dns.providers", &mut d, &Context::new())?;
//! let records = provider.get_records("example.com.").await?;
//! ```
//!
//! ## Registration
//!
//! Provider crates expose a `register` function that adds their
//! [`ModuleInfo`]. Registration is permanent for the life of the registry.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::config_block::Dispenser;
use crate::error::{Error, Result};
use crate::module::{Context, DnsProviderModule, ModuleInfo};

static GLOBAL: OnceLock<ModuleRegistry> = OnceLock::new();

/// Process-wide registry, created on first use
pub fn global() -> &'static ModuleRegistry {
    GLOBAL.get_or_init(ModuleRegistry::new)
}

/// Registry of module constructors keyed by module ID
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, ModuleInfo>>,
}

impl ModuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module type
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The module is now available under `info.id`
    /// - `Err(Error::Config)`: A module with the same ID is already registered
    pub fn register_module(&self, info: ModuleInfo) -> Result<()> {
        let id = info.id.as_str();
        let mut modules = self.modules.write().unwrap();

        if modules.contains_key(id) {
            return Err(Error::config(format!("module already registered: {}", id)));
        }

        tracing::debug!(module = id, "registered module");
        modules.insert(id.to_string(), info);
        Ok(())
    }

    /// Construct a fresh, unconfigured instance of a module
    pub fn new_module(&self, id: &str) -> Result<Box<dyn DnsProviderModule>> {
        let constructor = {
            let modules = self.modules.read().unwrap();
            modules
                .get(id)
                .map(|info| info.new)
                .ok_or_else(|| Error::config(format!("unknown module: {}", id)))?
        };

        Ok(constructor())
    }

    /// Construct, configure and provision the module named by the next
    /// directive in `d`.
    ///
    /// The directive name is resolved inside `namespace` (`dns.providers` +
    /// `tecnocratica` → `dns.providers.tecnocratica`). The module parses its
    /// block, then is provisioned with `ctx`.
    pub fn load_module(
        &self,
        namespace: &str,
        d: &mut Dispenser,
        ctx: &Context,
    ) -> Result<Box<dyn DnsProviderModule>> {
        let name = d
            .peek()
            .ok_or_else(|| d.err("expected a module name"))?
            .to_string();

        let id = if namespace.is_empty() {
            name
        } else {
            format!("{}.{}", namespace, name)
        };

        let mut module = self.new_module(&id)?;
        module.unmarshal_config(d)?;
        module.provision(ctx)?;

        tracing::debug!(module = %id, "module loaded");
        Ok(module)
    }

    /// Look up a module's registration record
    pub fn get_module(&self, id: &str) -> Option<ModuleInfo> {
        let modules = self.modules.read().unwrap();
        modules.get(id).copied()
    }

    /// List all registered module IDs, sorted
    pub fn list_modules(&self) -> Vec<String> {
        let modules = self.modules.read().unwrap();
        let mut ids: Vec<String> = modules.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if a module ID is registered
    pub fn has_module(&self, id: &str) -> bool {
        let modules = self.modules.read().unwrap();
        modules.contains_key(id)
    }
}
