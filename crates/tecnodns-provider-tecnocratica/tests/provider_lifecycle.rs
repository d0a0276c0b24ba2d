//! Contract Test: Module Lifecycle
//!
//! This test drives the module the way a host does: register, load from a
//! config block, provision, then call record operations against a mock API.
//!
//! Constraints verified:
//! - The module is reachable as `dns.providers.tecnocratica`
//! - Placeholders are expanded from the host context at provisioning
//! - Record operations reach the API with the expanded token and URL
//! - API errors reach the host unchanged in kind
//!
//! If this test fails, hosts can no longer load or use the provider.

use std::collections::HashMap;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tecnodns_core::traits::{RecordAppender, RecordGetter};
use tecnodns_core::{Context, Dispenser, Error, ModuleRegistry, Record, RecordType, Replacer, registry};

fn context_with(vars: &[(&str, &str)]) -> Context {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Context::with_replacer(Replacer::with_env(env))
}

#[test]
fn global_registry_knows_the_module() {
    // Another test may have registered already
    let _ = tecnodns_provider_tecnocratica::register(registry::global());

    assert!(registry::global().has_module("dns.providers.tecnocratica"));
    assert!(
        registry::global()
            .list_modules()
            .contains(&"dns.providers.tecnocratica".to_string())
    );
}

#[test]
fn unknown_provider_name_is_rejected() {
    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let mut d = Dispenser::from_str("cloudflare token").unwrap();
    assert!(matches!(
        registry.load_module("dns.providers", &mut d, &Context::new()),
        Err(Error::Config(_))
    ));
}

#[test]
fn load_fails_on_bad_block() {
    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let mut d = Dispenser::from_str("tecnocratica {\n    api_url https://x.example\n}").unwrap();
    match registry.load_module("dns.providers", &mut d, &Context::new()) {
        Err(Error::Syntax { message, .. }) => assert_eq!(message, "missing API token"),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("block without a token must not load"),
    }
}

#[tokio::test]
async fn loaded_module_uses_expanded_settings() {
    let server = MockServer::start_async().await;
    let zones = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dns/zones")
                .header("x-tcpanel-token", "secret-from-env");
            then.status(200)
                .json_body(json!([{ "id": 5, "name": "example.com" }]));
        })
        .await;
    let records = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dns/zones/5/records")
                .header("x-tcpanel-token", "secret-from-env");
            then.status(200).json_body(json!([
                { "id": 11, "name": "www", "type": "A", "content": "192.0.2.1", "ttl": 600 }
            ]));
        })
        .await;

    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let url = server.base_url();
    let ctx = context_with(&[
        ("TECNOCRATICA_TOKEN", "secret-from-env"),
        ("TECNOCRATICA_URL", url.as_str()),
    ]);
    let mut d = Dispenser::from_str(
        "tecnocratica {\n    api_token {env.TECNOCRATICA_TOKEN}\n    api_url {env.TECNOCRATICA_URL}\n}",
    )
    .unwrap();
    let provider = registry.load_module("dns.providers", &mut d, &ctx).unwrap();

    let result = provider.get_records("example.com").await.unwrap();

    zones.assert_async().await;
    records.assert_async().await;
    assert_eq!(
        result,
        vec![
            Record::new("www", RecordType::A, "192.0.2.1")
                .with_ttl(Duration::from_secs(600))
                .with_id("11")
        ]
    );
}

#[tokio::test]
async fn process_environment_is_the_default_source() {
    let server = MockServer::start_async().await;
    let zones = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/dns/zones")
                .header("x-tcpanel-token", "process-env-token");
            then.status(200).json_body(json!([]));
        })
        .await;

    // SAFETY: the variable name is unique to this test
    unsafe { std::env::set_var("TECNODNS_LIFECYCLE_TEST_TOKEN", "process-env-token") };

    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let block = format!(
        "tecnocratica {{env.TECNODNS_LIFECYCLE_TEST_TOKEN}} {{\n    api_url {}\n}}",
        server.base_url()
    );
    let mut d = Dispenser::from_str(&block).unwrap();
    let provider = registry
        .load_module("dns.providers", &mut d, &Context::new())
        .unwrap();

    let err = provider.get_records("example.com").await.unwrap_err();

    zones.assert_async().await;
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn api_errors_reach_the_host() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dns/zones");
            then.status(403).body("forbidden");
        })
        .await;

    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let url = server.base_url();
    let ctx = context_with(&[("URL", url.as_str())]);
    let mut d = Dispenser::from_str("tecnocratica wrong-token {\n    api_url {env.URL}\n}").unwrap();
    let provider = registry.load_module("dns.providers", &mut d, &ctx).unwrap();

    let record = Record::new("www", RecordType::A, "192.0.2.1");
    let err = provider.append_records("example.com", vec![record]).await.unwrap_err();
    assert!(matches!(err, Error::Authentication(_)));
}

#[tokio::test]
async fn unusable_url_does_not_stop_loading() {
    let registry = ModuleRegistry::new();
    tecnodns_provider_tecnocratica::register(&registry).unwrap();

    let ctx = context_with(&[("U", "api.example.com/v1")]);
    let mut d = Dispenser::from_str("tecnocratica t {\n    api_url {env.U}\n}").unwrap();
    let provider = registry.load_module("dns.providers", &mut d, &ctx).unwrap();

    match provider.get_records("example.com").await.unwrap_err() {
        Error::Config(message) => assert!(message.contains("api.example.com/v1")),
        other => panic!("unexpected error: {other:?}"),
    }
}
