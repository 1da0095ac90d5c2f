use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use triage_core::prelude::*;
use triage_core::LoadError;
use triage_test_utils::{dataset_json, FixtureRow, SAMPLE_DATASET};

mock! {
    pub Source {}

    #[async_trait]
    impl DatasetSource for Source {
        async fn fetch(&self) -> Result<String, LoadError>;
        fn describe(&self) -> String;
    }
}

fn quick_policy(max_attempts: u32) -> LoadPolicy {
    LoadPolicy {
        timeout_ms: 1_000,
        max_attempts,
        retry_backoff_ms: 0,
    }
}

fn flaky_source(failures: u32) -> MockSource {
    let calls = Arc::new(AtomicU32::new(0));
    let mut source = MockSource::new();
    source.expect_describe().return_const("mock".to_string());
    source.expect_fetch().returning(move || {
        if calls.fetch_add(1, Ordering::SeqCst) < failures {
            Err(LoadError::transport("mock", "connection reset"))
        } else {
            Ok(SAMPLE_DATASET.to_string())
        }
    });
    source
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let config = TriageConfig::new().with_load_policy(quick_policy(3));
    let mut session = Session::new(config);
    let status = session.load(&flaky_source(2)).await;
    assert_eq!(status, SessionStatus::Ready);
}

#[tokio::test]
async fn exhausted_retries_fail_with_retry_affordance() {
    let config = TriageConfig::new().with_load_policy(quick_policy(2));
    let mut session = Session::new(config);
    let source = flaky_source(5);

    assert_eq!(session.load(&source).await, SessionStatus::Failed);
    let err = session.last_error().unwrap();
    assert!(err.is_retryable());
    assert!(matches!(
        err,
        TriageError::Load(LoadError::Exhausted { attempts: 2, .. })
    ));

    // Calls three and four fail again; the third load fails once, then succeeds
    assert_eq!(session.load(&source).await, SessionStatus::Failed);
    assert_eq!(session.load(&source).await, SessionStatus::Ready);
}

#[tokio::test]
async fn malformed_payload_is_not_retried() {
    let mut source = MockSource::new();
    source.expect_describe().return_const("mock".to_string());
    source
        .expect_fetch()
        .times(1)
        .returning(|| Ok("\"not a dataset\"".to_string()));

    let mut session = Session::new(TriageConfig::new().with_load_policy(quick_policy(3)));
    assert_eq!(session.load(&source).await, SessionStatus::Failed);
    let err = session.last_error().unwrap();
    assert!(matches!(err, TriageError::DataFormat(_)));
    assert!(!err.is_retryable());
}

struct SlowSource;

#[async_trait]
impl DatasetSource for SlowSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("[]".to_string())
    }

    fn describe(&self) -> String {
        "slow".to_string()
    }
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let policy = LoadPolicy {
        timeout_ms: 100,
        max_attempts: 1,
        retry_backoff_ms: 0,
    };
    let err = triage_core::fetch_with_policy(&SlowSource, &policy)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "timed out after 100ms fetching slow");
}

#[tokio::test]
async fn file_source_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_DATASET.as_bytes()).unwrap();

    let mut session = Session::new(TriageConfig::default());
    let status = session.load(&FileSource::new(file.path())).await;
    assert_eq!(status, SessionStatus::Ready);
    assert_eq!(session.catalog().unwrap().summary().records, 8);
}

#[test]
fn config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dataset = \"sheet.json\"\n[load]\ntimeout_ms = 250").unwrap();
    let config = TriageConfig::load(file.path()).unwrap();
    assert_eq!(config.dataset.unwrap().to_str(), Some("sheet.json"));
    assert_eq!(config.load.timeout_ms, 250);
    assert_eq!(config.load.max_attempts, 3);
}

async fn ready(text: String) -> Session {
    let mut session = Session::new(TriageConfig::default());
    assert_eq!(
        session.load(&StaticSource::new("inline", text)).await,
        SessionStatus::Ready
    );
    session
}

#[tokio::test]
async fn duplicate_ids_index_once_with_first_description() {
    let session = ready(dataset_json(vec![
        FixtureRow::new("S-1", "First text").support("a"),
        FixtureRow::new("S-2", "Other").support("b"),
        FixtureRow::new("S-1", "Second text").support("c"),
    ]))
    .await;

    let all = session.search("").unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "S-1");
    assert_eq!(all[0].description, "First text");
}

#[tokio::test]
async fn full_flow_search_select_confirm() {
    let mut session = ready(SAMPLE_DATASET.to_string()).await;

    let hits = session.search("DOES NOT").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].label(), "S-1 — Unit does not start");

    let resolution = session.select_symptom(&hits[0].id).unwrap();
    let labels: Vec<_> = resolution.blocks.iter().map(|b| b.label.clone()).collect();
    assert_eq!(labels, ["Power supply", "Controller"]);
    let first = resolution.groups().next().unwrap().group_ref();

    let plan = session.confirm_group(&first).unwrap().clone();
    assert_eq!(plan.checklist, ["1_Measure voltage on L1/N", "2_Replace fuse F1"]);
    assert_eq!(plan.spare_part.as_deref(), Some("Fuse 5A"));

    let (confirmed, _) = session.selection().unwrap().confirmed().unwrap();
    assert_eq!(confirmed, &first);
}

#[tokio::test]
async fn unknown_symptom_is_an_empty_result_not_an_error() {
    let mut session = ready(SAMPLE_DATASET.to_string()).await;
    let resolution = session.select_symptom("S-404").unwrap();
    assert!(resolution.is_empty());
}

#[tokio::test]
async fn ordering_spare_and_how_to_examples() {
    let mut session = ready(dataset_json(vec![
        FixtureRow::new("S-3", "Low flow")
            .sub("Filter")
            .support("Inspect filter housing")
            .action("2_Replace filter")
            .spare("Filter X")
            .sop("I"),
        FixtureRow::new("S-3", "Low flow")
            .sub("Filter")
            .support("Read inlet gauge")
            .action("1_Check pressure")
            .spare("/")
            .sop("https://sop.example/pressure"),
        FixtureRow::new("S-3", "Low flow")
            .sub("Filter")
            .support("  /  ")
            .action("0_Never shown"),
    ]))
    .await;

    let resolution = session.select_symptom("S-3").unwrap().clone();
    let groups: Vec<_> = resolution.groups().collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].support_text, "Read inlet gauge");
    assert_eq!(groups[0].how_to_target(), Some("https://sop.example/pressure"));
    assert_eq!(groups[1].support_text, "Inspect filter housing");
    assert!(!groups[1].has_how_to());

    let pressure = session.confirm_group(&groups[0].group_ref()).unwrap().clone();
    assert_eq!(pressure.spare_part, None);

    let filter = session.confirm_group(&groups[1].group_ref()).unwrap().clone();
    assert_eq!(filter.spare_part.as_deref(), Some("Filter X"));
    assert_eq!(filter.checklist, ["2_Replace filter"]);
}

/// Source that waits for a signal before returning its document
struct GatedSource {
    gate: tokio::sync::Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
    body: String,
}

impl GatedSource {
    fn new(body: impl Into<String>) -> (Self, tokio::sync::oneshot::Sender<()>) {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let source = Self {
            gate: tokio::sync::Mutex::new(Some(rx)),
            body: body.into(),
        };
        (source, tx)
    }
}

#[async_trait]
impl DatasetSource for GatedSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        if let Some(rx) = self.gate.lock().await.take() {
            let _ = rx.await;
        }
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

#[tokio::test]
async fn status_is_loading_while_fetch_is_in_flight() {
    let handle = SessionHandle::new(TriageConfig::default());
    let (source, tx) = GatedSource::new("[]");
    let loader = handle.clone();
    let task = tokio::spawn(async move { loader.load(&source).await });

    while handle.status() != SessionStatus::Loading {
        tokio::task::yield_now().await;
    }
    assert!(matches!(
        handle.read(|s| s.search("")),
        Err(TriageError::NotReady { status: SessionStatus::Loading })
    ));

    tx.send(()).unwrap();
    assert_eq!(task.await.unwrap(), SessionStatus::Ready);
    assert_eq!(handle.status(), SessionStatus::Ready);
}

#[tokio::test]
async fn older_load_finishing_late_does_not_replace_newer_one() {
    let handle = SessionHandle::new(TriageConfig::default());
    let stale = dataset_json(vec![FixtureRow::new("S-99", "Stale row")
        .sub("Old")
        .support("Old check")
        .action("1_Old step")]);
    let (source, tx) = GatedSource::new(stale);
    let loader = handle.clone();
    let older = tokio::spawn(async move { loader.load(&source).await });

    while handle.status() != SessionStatus::Loading {
        tokio::task::yield_now().await;
    }

    let newer = handle.load(&StaticSource::new("fixture", SAMPLE_DATASET)).await;
    assert_eq!(newer, SessionStatus::Ready);
    handle.write(|s| s.select_symptom("S-1").map(|_| ())).unwrap();

    tx.send(()).unwrap();
    assert_eq!(older.await.unwrap(), SessionStatus::Ready);

    let ids: Vec<String> = handle
        .read(|s| s.search(""))
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, ["S-1", "S-10", "S-2"]);
    let selected = handle.read(|s| s.selection().map(|sel| sel.symptom_id().to_string()));
    assert_eq!(selected.as_deref(), Some("S-1"));
}
