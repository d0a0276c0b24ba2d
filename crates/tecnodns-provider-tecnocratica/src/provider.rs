//! The `dns.providers.tecnocratica` module
//!
//! Wraps a record client with the module lifecycle: parse the config block,
//! expand placeholders once at provisioning, then forward every record
//! operation to the client with logging around it.

use async_trait::async_trait;
use tecnodns_core::traits::{RecordAppender, RecordClient, RecordDeleter, RecordGetter, RecordSetter};
use tecnodns_core::{
    Context, Dispenser, DnsProviderModule, Error, Module, ModuleId, ModuleInfo, Provisioner,
    Record, Result, Unmarshaler,
};
use tracing::Instrument;

use crate::client::TecnocraticaClient;
use crate::config::ProviderConfig;

/// Identifier the module is registered under
pub const MODULE_ID: ModuleId = ModuleId::new("dns.providers.tecnocratica");

/// Record clients that can be built from a provisioned configuration
///
/// Construction cannot fail; problems with the values (an unusable URL, an
/// empty token) are reported by the record operations.
pub trait FromProviderConfig: Sized {
    /// Build a client from expanded configuration values
    fn from_provider_config(config: &ProviderConfig) -> Self;
}

impl FromProviderConfig for TecnocraticaClient {
    fn from_provider_config(config: &ProviderConfig) -> Self {
        TecnocraticaClient::new(config.token.clone(), config.url.clone())
    }
}

/// Tecnocrática DNS provider module
///
/// # Lifecycle
///
/// 1. Constructed empty by the registry
/// 2. [`Unmarshaler::unmarshal_config`] fills [`ProviderConfig`]
/// 3. [`Provisioner::provision`] expands placeholders and builds the client
///
/// Record operations before step 3 fail with `Error::NotProvisioned`.
pub struct TecnocraticaProvider<C = TecnocraticaClient> {
    config: ProviderConfig,
    client: Option<C>,
    span: tracing::Span,
}

impl<C> Default for TecnocraticaProvider<C> {
    fn default() -> Self {
        Self {
            config: ProviderConfig::default(),
            client: None,
            span: tracing::Span::none(),
        }
    }
}

impl<C> std::fmt::Debug for TecnocraticaProvider<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TecnocraticaProvider")
            .field("config", &self.config)
            .field("provisioned", &self.client.is_some())
            .finish()
    }
}

impl TecnocraticaProvider {
    /// Empty, unconfigured module
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> TecnocraticaProvider<C> {
    /// Module with a pre-parsed configuration, still to be provisioned
    pub fn from_config(config: ProviderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Module that is already provisioned with `client`
    ///
    /// `config` is kept for inspection only; it is not expanded again.
    pub fn with_client(config: ProviderConfig, client: C) -> Self {
        Self {
            config,
            client: Some(client),
            span: tracing::Span::none(),
        }
    }

    /// Current configuration (expanded once provisioned)
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn client(&self) -> Result<&C> {
        self.client
            .as_ref()
            .ok_or_else(|| Error::not_provisioned(MODULE_ID.as_str()))
    }
}

fn new_module<C>() -> Box<dyn DnsProviderModule>
where
    C: RecordClient + FromProviderConfig + 'static,
{
    Box::new(TecnocraticaProvider::<C>::default())
}

impl<C> Module for TecnocraticaProvider<C>
where
    C: RecordClient + FromProviderConfig + 'static,
{
    fn module_info() -> ModuleInfo {
        ModuleInfo {
            id: MODULE_ID,
            new: new_module::<C>,
        }
    }

    fn module_id(&self) -> ModuleId {
        MODULE_ID
    }
}

impl<C> Unmarshaler for TecnocraticaProvider<C> {
    fn unmarshal_config(&mut self, d: &mut Dispenser) -> Result<()> {
        self.config = ProviderConfig::parse(d)?;
        Ok(())
    }
}

impl<C: FromProviderConfig> Provisioner for TecnocraticaProvider<C> {
    fn provision(&mut self, ctx: &Context) -> Result<()> {
        self.span = ctx.logger(MODULE_ID);

        if self.client.is_some() {
            tracing::debug!(parent: &self.span, "already provisioned");
            return Ok(());
        }

        let replacer = ctx.replacer();
        let expanded = ProviderConfig {
            token: replacer.replace_all(&self.config.token, ""),
            url: replacer.replace_all(&self.config.url, ""),
        };

        tracing::info!(
            parent: &self.span,
            api_url = %expanded.url,
            has_token = !expanded.token.is_empty(),
            "tecnocratica DNS provider provisioned"
        );

        self.client = Some(C::from_provider_config(&expanded));
        self.config = expanded;
        Ok(())
    }
}

#[async_trait]
impl<C: RecordGetter> RecordGetter for TecnocraticaProvider<C> {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        tracing::debug!(parent: &self.span, zone, "getting DNS records");

        let result = self
            .client()?
            .get_records(zone)
            .instrument(self.span.clone())
            .await;

        match &result {
            Ok(records) => tracing::debug!(
                parent: &self.span,
                zone,
                record_count = records.len(),
                "retrieved DNS records"
            ),
            Err(e) => tracing::error!(parent: &self.span, zone, error = %e, "failed to get DNS records"),
        }
        result
    }
}

#[async_trait]
impl<C: RecordAppender> RecordAppender for TecnocraticaProvider<C> {
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        tracing::info!(
            parent: &self.span,
            zone,
            record_count = records.len(),
            "appending DNS records"
        );
        for (index, record) in records.iter().enumerate() {
            tracing::debug!(
                parent: &self.span,
                index,
                name = %record.name,
                record_type = %record.record_type,
                value = %record.data,
                "record to append"
            );
        }

        let result = self
            .client()?
            .append_records(zone, records)
            .instrument(self.span.clone())
            .await;

        match &result {
            Ok(appended) => tracing::info!(
                parent: &self.span,
                zone,
                appended_count = appended.len(),
                "appended DNS records"
            ),
            Err(e) => tracing::error!(parent: &self.span, zone, error = %e, "failed to append DNS records"),
        }
        result
    }
}

#[async_trait]
impl<C: RecordSetter> RecordSetter for TecnocraticaProvider<C> {
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        tracing::info!(
            parent: &self.span,
            zone,
            record_count = records.len(),
            "setting DNS records"
        );

        let result = self
            .client()?
            .set_records(zone, records)
            .instrument(self.span.clone())
            .await;

        match &result {
            Ok(set) => tracing::info!(
                parent: &self.span,
                zone,
                set_count = set.len(),
                "set DNS records"
            ),
            Err(e) => tracing::error!(parent: &self.span, zone, error = %e, "failed to set DNS records"),
        }
        result
    }
}

#[async_trait]
impl<C: RecordDeleter> RecordDeleter for TecnocraticaProvider<C> {
    async fn delete_records(&self, zone: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        tracing::info!(
            parent: &self.span,
            zone,
            record_count = records.len(),
            "deleting DNS records"
        );

        let result = self
            .client()?
            .delete_records(zone, records)
            .instrument(self.span.clone())
            .await;

        match &result {
            Ok(deleted) => tracing::info!(
                parent: &self.span,
                zone,
                deleted_count = deleted.len(),
                "deleted DNS records"
            ),
            Err(e) => tracing::error!(parent: &self.span, zone, error = %e, "failed to delete DNS records"),
        }
        result
    }
}
