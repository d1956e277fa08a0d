use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use extops_browser::context::{
    BrowserContext, ContextError, ContextResult, ExtensionRecord, SidepanelHandle,
};
use extops_browser::tools::{baseline_registry, experimental_extension_support};
use extops_dispatch::DispatchError;
use extops_primitives::{ConditionSet, ExtensionId};
use serde_json::json;

/// Browser backend double with per-capability call counters.
#[derive(Default)]
struct MockBrowser {
    installs: AtomicUsize,
    uninstalls: AtomicUsize,
    sidepanel_opens: AtomicUsize,
    extensions: Mutex<HashMap<String, ExtensionRecord>>,
}

impl MockBrowser {
    fn with_extension(record: ExtensionRecord) -> Self {
        let browser = Self::default();
        browser
            .extensions
            .lock()
            .unwrap()
            .insert(record.id.to_string(), record);
        browser
    }

    fn install_calls(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserContext for MockBrowser {
    async fn install_extension(&self, _path: &Path) -> ContextResult<ExtensionId> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(ExtensionId::new("abc123").unwrap())
    }

    async fn uninstall_extension(&self, id: &ExtensionId) -> ContextResult<()> {
        self.uninstalls.fetch_add(1, Ordering::SeqCst);
        let mut extensions = self.extensions.lock().unwrap();
        if extensions.remove(id.as_str()).is_none() {
            return Err(ContextError::UnknownExtension { id: id.clone() });
        }
        Ok(())
    }

    async fn get_extension(&self, id: &ExtensionId) -> Option<ExtensionRecord> {
        self.extensions.lock().unwrap().get(id.as_str()).cloned()
    }

    async fn open_extension_sidepanel(&self, id: &ExtensionId) -> ContextResult<SidepanelHandle> {
        self.sidepanel_opens.fetch_add(1, Ordering::SeqCst);
        if self.extensions.lock().unwrap().get(id.as_str()).is_none() {
            return Err(ContextError::Sidepanel {
                id: id.clone(),
                reason: "extension has no running service worker".into(),
            });
        }
        Ok(SidepanelHandle {
            url: format!("chrome-extension://{id}/panel.html"),
            note: Some("Opened in the active window.".into()),
            window_id: Some(7),
        })
    }
}

fn record(id: &str, source_path: Option<&str>) -> ExtensionRecord {
    ExtensionRecord {
        id: ExtensionId::new(id).unwrap(),
        name: "Demo Extension".into(),
        version: "1.0.0".into(),
        enabled: true,
        source_path: source_path.map(PathBuf::from),
    }
}

fn experimental() -> ConditionSet {
    [experimental_extension_support()].into_iter().collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn install_reports_the_assigned_id() {
    init_tracing();
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let response = registry
        .dispatch(
            "install_extension",
            json!({ "path": "/tmp/ext" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect("response");

    assert_eq!(response.lines(), ["Extension installed. Id: abc123"]);
    assert!(response.list_extensions());
    assert_eq!(browser.install_calls(), 1);
}

#[tokio::test]
async fn install_without_path_is_rejected_before_the_context() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let err = registry
        .dispatch("install_extension", json!({}), &ConditionSet::new(), &browser)
        .await
        .expect_err("validation failure");

    let DispatchError::Validation(validation) = err else {
        panic!("expected validation failure, got {err}");
    };
    assert!(validation.names_field("path"));
    assert_eq!(browser.install_calls(), 0);
}

#[tokio::test]
async fn reload_of_unknown_extension_never_reinstalls() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let err = registry
        .dispatch(
            "reload_extension",
            json!({ "id": "missing" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect_err("handler failure");

    assert!(matches!(err, DispatchError::Handler { .. }));
    assert!(err.to_string().contains("missing"));
    assert_eq!(browser.install_calls(), 0);
}

#[tokio::test]
async fn reload_reinstalls_from_the_recorded_source_path() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::with_extension(record("oldid", Some("/src/demo-ext")));

    let response = registry
        .dispatch(
            "reload_extension",
            json!({ "id": "oldid" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect("response");

    assert_eq!(response.lines(), ["Extension reloaded. Id: abc123"]);
    assert_eq!(browser.uninstalls.load(Ordering::SeqCst), 1);
    assert_eq!(browser.install_calls(), 1);
}

#[tokio::test]
async fn reload_of_store_extension_fails_without_side_effects() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::with_extension(record("storeext", None));

    let err = registry
        .dispatch(
            "reload_extension",
            json!({ "id": "storeext" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect_err("handler failure");

    assert!(matches!(err, DispatchError::Handler { .. }));
    assert_eq!(browser.uninstalls.load(Ordering::SeqCst), 0);
    assert_eq!(browser.install_calls(), 0);
}

#[tokio::test]
async fn uninstall_renders_its_own_failure_text() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let response = registry
        .dispatch(
            "uninstall_extension",
            json!({ "id": "nosuch" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect("self-caught failure still succeeds");

    assert_eq!(response.lines().len(), 1);
    assert!(response.lines()[0].contains("Could not uninstall extension nosuch"));
    assert!(!response.list_extensions());
}

#[tokio::test]
async fn uninstall_of_known_extension_succeeds() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::with_extension(record("gone", None));

    let response = registry
        .dispatch(
            "uninstall_extension",
            json!({ "id": "gone" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect("response");

    assert_eq!(response.lines(), ["Extension uninstalled. Id: gone"]);
    assert!(response.list_extensions());
}

#[tokio::test]
async fn list_extensions_only_requests_the_inventory() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let response = registry
        .dispatch("list_extensions", json!({}), &ConditionSet::new(), &browser)
        .await
        .expect("response");

    assert!(response.lines().is_empty());
    assert!(response.list_extensions());
    assert!(!response.include_pages());
}

#[tokio::test]
async fn sidepanel_is_gated_on_the_experimental_condition() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::with_extension(record("panelext", None));

    let hidden: Vec<_> = registry
        .list_available(&ConditionSet::new())
        .map(|s| s.name)
        .collect();
    assert!(!hidden.contains(&"open_extension_sidepanel".to_owned()));

    let err = registry
        .dispatch(
            "open_extension_sidepanel",
            json!({ "id": "panelext" }),
            &ConditionSet::new(),
            &browser,
        )
        .await
        .expect_err("gated");
    assert!(matches!(err, DispatchError::NotFound { .. }));
    assert_eq!(browser.sidepanel_opens.load(Ordering::SeqCst), 0);

    let visible: Vec<_> = registry
        .list_available(&experimental())
        .map(|s| s.name)
        .collect();
    assert!(visible.contains(&"open_extension_sidepanel".to_owned()));
}

#[tokio::test]
async fn sidepanel_renders_url_note_and_window() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::with_extension(record("panelext", None));

    let response = registry
        .dispatch(
            "open_extension_sidepanel",
            json!({ "id": "panelext" }),
            &experimental(),
            &browser,
        )
        .await
        .expect("response");

    assert_eq!(
        response.lines(),
        [
            "Side panel opened: chrome-extension://panelext/panel.html",
            "Opened in the active window.",
            "Window: 7",
        ]
    );
    assert!(response.include_pages());
}

#[tokio::test]
async fn concurrent_dispatches_keep_their_builders_apart() {
    let registry = baseline_registry().unwrap();
    let browser = MockBrowser::default();

    let conditions_a = ConditionSet::new();
    let conditions_b = ConditionSet::new();
    let (a, b) = tokio::join!(
        registry.dispatch(
            "install_extension",
            json!({ "path": "/tmp/a" }),
            &conditions_a,
            &browser,
        ),
        registry.dispatch(
            "install_extension",
            json!({ "path": "/tmp/b" }),
            &conditions_b,
            &browser,
        ),
    );

    let a = a.expect("response a");
    let b = b.expect("response b");
    assert_eq!(a.lines().len(), 1);
    assert_eq!(b.lines().len(), 1);
    assert_ne!(a.invocation(), b.invocation());
    assert_eq!(browser.install_calls(), 2);
}
