use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::catalog::ImageRegistry;
use quiz_core::model::ImageHandle;
use services::{ImageLoadError, ImageLoader, QuizCatalogs, SELECTIONS_KEY};
use storage::repository::{InMemoryRepository, SlotRepository, Storage, StorageError};
use tokio::sync::Notify;

use super::test_harness::{
    HarnessSetup, ViewKind, setup_router_harness, setup_view_harness, setup_view_harness_with,
};

fn storage_with_answers(raw: &str) -> Storage {
    Storage {
        slots: Arc::new(InMemoryRepository::new().with_slot(SELECTIONS_KEY, raw).unwrap()),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_hero() {
    let mut harness = setup_view_harness(ViewKind::Home, Storage::in_memory());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("PRIMITIVE"), "missing title in {html}");
    assert!(html.contains("START"), "missing start link in {html}");
    assert!(html.contains("Apply to PRIMITIVE"), "missing apply link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Question, Storage::in_memory());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question number 1"), "missing prompt in {html}");
    assert!(html.contains("Left"), "missing choice in {html}");
    assert!(html.contains("Right"), "missing choice in {html}");
    assert!(html.contains("33%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_resumes_partial_run() {
    let mut harness = setup_view_harness(ViewKind::Question, storage_with_answers("[1]"));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question number 2"), "expected second question in {html}");
    assert!(html.contains("66%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_restarts_completed_run() {
    let mut harness = setup_view_harness(ViewKind::Question, storage_with_answers("[1,0,1]"));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question number 1"), "expected restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_answer_persists_and_advances() {
    let mut harness = setup_view_harness(ViewKind::Question, Storage::in_memory());
    harness.rebuild();
    harness.settle().await;

    harness.answer(1);
    harness.settle().await;

    let stored = harness
        .storage
        .slots
        .get_slot(SELECTIONS_KEY)
        .await
        .expect("read slot");
    assert_eq!(stored.as_deref(), Some("[1]"));
    let html = harness.render();
    assert!(html.contains("Question number 2"), "expected second question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_ignores_clicks_while_saving() {
    let mut harness = setup_view_harness(ViewKind::Question, Storage::in_memory());
    harness.rebuild();
    harness.settle().await;

    harness.answer_burst(&[0, 0]);
    harness.settle().await;

    let stored = harness
        .storage
        .slots
        .get_slot(SELECTIONS_KEY)
        .await
        .expect("read slot");
    assert_eq!(stored.as_deref(), Some("[0]"));
    let html = harness.render();
    assert!(html.contains("Question number 2"), "expected second question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_cannot_load_state() {
    let setup = HarnessSetup {
        catalogs: QuizCatalogs::default(),
        ..HarnessSetup::default()
    };
    let mut harness = setup_view_harness_with(ViewKind::Question, Storage::in_memory(), setup);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Questions could not be loaded."), "missing fallback in {html}");
    assert!(!html.contains("answer-button"), "unexpected choices in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Result, Storage::in_memory());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No answers yet."), "missing empty state in {html}");
    assert!(html.contains("Start the questions"), "missing call to action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_best_match() {
    let mut harness = setup_view_harness(ViewKind::Result, storage_with_answers("[1,0,1]"));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Backend Lead [김철수]"), "missing title in {html}");
    assert!(html.contains("Ship small, ship often"), "missing quote in {html}");
    assert!(html.contains("Keeps the build green."), "missing description in {html}");
    assert!(html.contains("3 / 3 answers matched"), "missing score in {html}");
    assert!(html.contains("result-image__placeholder"), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_inlines_profile_photo() {
    let (images, rejected) = ImageRegistry::from_paths(vec!["members/2001_chulsoo.png".into()]);
    assert!(rejected.is_empty());
    let setup = HarnessSetup {
        images,
        image_bytes: Some(b"png-bytes".to_vec()),
        ..HarnessSetup::default()
    };
    let mut harness = setup_view_harness_with(ViewKind::Result, storage_with_answers("[1,0,1]"), setup);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("data:image/png;base64,"), "missing photo in {html}");
    assert!(!html.contains("result-image__placeholder"), "unexpected placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_falls_back_when_photo_fails() {
    let (images, _) = ImageRegistry::from_paths(vec!["members/2001_chulsoo.png".into()]);
    let setup = HarnessSetup {
        images,
        ..HarnessSetup::default()
    };
    let mut harness = setup_view_harness_with(ViewKind::Result, storage_with_answers("[1,0,1]"), setup);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("result-image__placeholder"), "missing placeholder in {html}");
    assert!(html.contains("Backend Lead [김철수]"), "missing title in {html}");
}

/// Holds every load until the gate opens.
struct GatedImageLoader {
    gate: Arc<Notify>,
    started: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl ImageLoader for GatedImageLoader {
    async fn load(&self, _handle: &ImageHandle) -> Result<Vec<u8>, ImageLoadError> {
        self.started.store(true, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(b"late-bytes".to_vec())
    }
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_discards_photo_after_unmount() {
    let gate = Arc::new(Notify::new());
    let started = Arc::new(AtomicBool::new(false));
    let (images, _) = ImageRegistry::from_paths(vec!["members/2001_chulsoo.png".into()]);
    let setup = HarnessSetup {
        images,
        image_loader: Some(Arc::new(GatedImageLoader {
            gate: Arc::clone(&gate),
            started: Arc::clone(&started),
        })),
        ..HarnessSetup::default()
    };
    let mut harness = setup_view_harness_with(ViewKind::Result, storage_with_answers("[1,0,1]"), setup);
    harness.rebuild();
    harness.settle().await;

    assert!(started.load(Ordering::SeqCst), "photo load never started");
    let html = harness.render();
    assert!(html.contains("result-image__placeholder"), "missing placeholder in {html}");

    harness.switch_to(ViewKind::Home);
    harness.settle().await;
    gate.notify_one();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("START"), "expected landing page in {html}");
    assert!(!html.contains("data:image"), "late photo rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_path_redirects_to_landing() {
    let mut harness = setup_router_harness("/nope", Storage::in_memory());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("hero__title"), "expected landing page in {html}");
    assert!(html.contains("START"), "missing start link in {html}");
}

struct FailingSlotRepo;

#[async_trait::async_trait]
impl SlotRepository for FailingSlotRepo {
    async fn get_slot(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn put_slot(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_error_state() {
    let storage = Storage {
        slots: Arc::new(FailingSlotRepo),
    };
    let mut harness = setup_view_harness(ViewKind::Result, storage);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
