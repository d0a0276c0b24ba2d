//! Minimal embedding example for tecnodns
//!
//! Shows how a host application registers the Tecnocrática module, loads it
//! from a config block file and drives record operations.
//!
//! ```bash
//! export TECNOCRATICA_TOKEN=your_token
//! cat > dns.conf <<'EOF'
//! tecnocratica {
//!     api_token {env.TECNOCRATICA_TOKEN}
//! }
//! EOF
//!
//! embedded_usage dns.conf example.com                      # list records
//! embedded_usage dns.conf example.com set-txt _test hello  # upsert TXT
//! embedded_usage dns.conf example.com delete-txt _test     # remove TXT
//! ```
//!
//! `TECNODNS_LOG_LEVEL` selects the log level (default `info`).

use anyhow::{Context as _, Result, bail};
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tecnodns_core::traits::{RecordDeleter, RecordGetter, RecordSetter};
use tecnodns_core::{Context, Dispenser, DnsProviderModule, Module, Record, RecordType, registry};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the example
#[derive(Debug, Clone, Copy)]
enum DemoExitCode {
    Success = 0,
    /// Bad arguments or configuration
    ConfigError = 1,
    /// The API call failed
    RuntimeError = 2,
}

impl From<DemoExitCode> for ExitCode {
    fn from(code: DemoExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// What to do with the zone
enum Action {
    List,
    SetTxt { name: String, value: String },
    DeleteTxt { name: String },
}

struct Args {
    config_path: String,
    zone: String,
    action: Action,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let config_path = args.next().context("missing config file argument")?;
        let zone = args.next().context("missing zone argument")?;

        let action = match args.next().as_deref() {
            None | Some("get") => Action::List,
            Some("set-txt") => Action::SetTxt {
                name: args.next().context("set-txt needs a record name")?,
                value: args.next().context("set-txt needs a value")?,
            },
            Some("delete-txt") => Action::DeleteTxt {
                name: args.next().context("delete-txt needs a record name")?,
            },
            Some(other) => bail!("unknown action '{}'", other),
        };

        Ok(Self {
            config_path,
            zone,
            action,
        })
    }
}

fn log_level() -> Level {
    match env::var("TECNODNS_LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Register, parse and provision the provider named in the config file
fn load_provider(path: &str) -> Result<Box<dyn DnsProviderModule>> {
    tecnodns_provider_tecnocratica::register(registry::global())?;

    let mut dispenser = Dispenser::from_file(path)?;
    let provider = registry::global().load_module("dns.providers", &mut dispenser, &Context::new())?;

    info!(module = %provider.module_id(), "provider loaded");
    Ok(provider)
}

async fn run(args: Args, provider: &dyn DnsProviderModule) -> Result<()> {
    match args.action {
        Action::List => {
            let records = provider.get_records(&args.zone).await?;
            for record in records {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.name,
                    record.ttl.as_secs(),
                    record.record_type,
                    record.data
                );
            }
        }
        Action::SetTxt { name, value } => {
            let record = Record::new(name, RecordType::Txt, value).with_ttl(Duration::from_secs(300));
            let set = provider.set_records(&args.zone, vec![record]).await?;
            info!(count = set.len(), "TXT record set");
        }
        Action::DeleteTxt { name } => {
            let filter = Record::new(name, RecordType::Txt, "");
            let deleted = provider.delete_records(&args.zone, vec![filter]).await?;
            info!(count = deleted.len(), "TXT records deleted");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(log_level()).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DemoExitCode::ConfigError.into();
    }

    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Usage error: {:#}", e);
            eprintln!("usage: embedded_usage <config-file> <zone> [get|set-txt <name> <value>|delete-txt <name>]");
            return DemoExitCode::ConfigError.into();
        }
    };

    let provider = match load_provider(&args.config_path) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to load provider: {:#}", e);
            return DemoExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DemoExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(args, provider.as_ref()));
    match result {
        Ok(()) => DemoExitCode::Success.into(),
        Err(e) => {
            error!("Operation failed: {:#}", e);
            DemoExitCode::RuntimeError.into()
        }
    }
}
