//! Module contract between a host and a provider module
//!
//! A host selects a module by its [`ModuleId`], constructs it through
//! [`ModuleInfo::new`], then calls the two lifecycle hooks in a fixed order:
//!
//! 1. [`Unmarshaler::unmarshal_config`] with the module's configuration block
//! 2. [`Provisioner::provision`] with the host [`Context`]
//!
//! Only after both succeed is the module used as a [`RecordClient`].

use std::fmt;

use crate::Result;
use crate::config_block::Dispenser;
use crate::replacer::Replacer;
use crate::traits::RecordClient;

/// Dotted module identifier, e.g. `dns.providers.tecnocratica`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(&'static str);

impl ModuleId {
    /// Wrap a static identifier
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// Full identifier
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Everything before the last label (`dns.providers`)
    pub fn namespace(&self) -> &'static str {
        self.0.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
    }

    /// The last label (`tecnocratica`)
    pub fn name(&self) -> &'static str {
        self.0.rsplit_once('.').map(|(_, name)| name).unwrap_or(self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Registration record for a module type
#[derive(Clone, Copy)]
pub struct ModuleInfo {
    /// Identifier the host selects the module by
    pub id: ModuleId,
    /// Zero-argument constructor
    pub new: fn() -> Box<dyn DnsProviderModule>,
}

impl fmt::Debug for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInfo").field("id", &self.id).finish()
    }
}

/// A type the host can register and instantiate
pub trait Module: Send + Sync {
    /// Registration record for this module type
    fn module_info() -> ModuleInfo
    where
        Self: Sized;

    /// Identifier of this instance's module type
    fn module_id(&self) -> ModuleId;
}

/// Populates a module from its configuration block
pub trait Unmarshaler {
    /// Parse the block the dispenser is positioned before.
    ///
    /// Must not perform I/O or resolve placeholders.
    fn unmarshal_config(&mut self, d: &mut Dispenser) -> Result<()>;
}

/// Prepares a module for use after configuration
pub trait Provisioner {
    /// Resolve placeholders and build runtime resources
    fn provision(&mut self, ctx: &Context) -> Result<()>;
}

/// Everything a DNS provider module must implement
pub trait DnsProviderModule: Module + Unmarshaler + Provisioner + RecordClient {}

impl<T> DnsProviderModule for T where T: Module + Unmarshaler + Provisioner + RecordClient {}

/// Host context handed to [`Provisioner::provision`]
#[derive(Debug, Clone, Default)]
pub struct Context {
    replacer: Replacer,
}

impl Context {
    /// Context backed by the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with a specific replacer
    pub fn with_replacer(replacer: Replacer) -> Self {
        Self { replacer }
    }

    /// Placeholder replacer for configuration values
    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    /// Span that scopes a module's log events
    pub fn logger(&self, id: ModuleId) -> tracing::Span {
        tracing::info_span!("module", id = %id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_parts() {
        let id = ModuleId::new("dns.providers.tecnocratica");
        assert_eq!(id.namespace(), "dns.providers");
        assert_eq!(id.name(), "tecnocratica");
        assert_eq!(id.to_string(), "dns.providers.tecnocratica");

        let bare = ModuleId::new("standalone");
        assert_eq!(bare.namespace(), "");
        assert_eq!(bare.name(), "standalone");
    }
}
