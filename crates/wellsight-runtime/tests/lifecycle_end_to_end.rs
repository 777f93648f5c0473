//! End-to-end lifecycle tests against real history stores.

use std::sync::Arc;

use wellsight_runtime::{
    LifecycleConfig, LifecycleEvent, LifecycleStatus, PredictionController, StorageConfig,
};
use wellsight_store::{HistoryStore, JsonFileHistoryStore};
use wellsight_types::{PredictionDraft, Recommendation};

fn clay_draft() -> PredictionDraft {
    PredictionDraft::new()
        .soil("clay")
        .rock("sedimentary")
        .depth(60)
        .coordinates(40.7128, -74.006)
}

#[tokio::test]
async fn clay_sedimentary_sixty_meters() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileHistoryStore::in_dir(dir.path()));
    let controller =
        PredictionController::with_mock_scorer(LifecycleConfig::immediate(), store).await;

    let result = controller.submit(clay_draft()).await.unwrap().wait().await.unwrap();

    assert_eq!(result.confidence, 83);
    assert_eq!(result.water_level, 40);
    assert_eq!(result.estimated_yield, 60);
    assert_eq!(result.recommendation, Recommendation::Excellent);
    assert_eq!(result.location.latitude, 40.7128);
    assert_eq!(result.location.longitude, -74.006);
    assert_eq!(controller.status().await, LifecycleStatus::Succeeded);
}

#[tokio::test]
async fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageConfig::JsonFile {
        path: dir.path().join("history").join("predictions.json"),
    };

    let first = {
        let controller =
            PredictionController::with_mock_scorer(LifecycleConfig::immediate(), storage.open())
                .await;
        let a = controller.submit(clay_draft()).await.unwrap().wait().await.unwrap();
        let b = controller
            .submit(clay_draft().soil("sandy").depth(25))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
        vec![a, b]
    };

    let reopened =
        PredictionController::with_mock_scorer(LifecycleConfig::immediate(), storage.open()).await;
    let snapshot = reopened.snapshot().await;

    assert_eq!(snapshot.status, LifecycleStatus::Idle);
    assert!(snapshot.current.is_none());
    assert_eq!(snapshot.history, first);
    assert!(first[0].id < first[1].id);
}

#[tokio::test]
async fn corrupt_history_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = Arc::new(JsonFileHistoryStore::new(&path));
    let controller =
        PredictionController::with_mock_scorer(LifecycleConfig::immediate(), store.clone()).await;
    assert!(controller.history().await.is_empty());

    let result = controller.submit(clay_draft()).await.unwrap().wait().await.unwrap();
    assert_eq!(store.load().await.unwrap(), vec![result]);
}

#[tokio::test]
async fn events_follow_the_lifecycle() {
    let controller = PredictionController::with_mock_scorer(
        LifecycleConfig::immediate(),
        StorageConfig::Memory.open(),
    )
    .await;
    let mut events = controller.subscribe();

    let _ = controller.submit(PredictionDraft::new()).await;
    controller.submit(clay_draft()).await.unwrap().wait().await.unwrap();
    assert!(controller.clear().await);

    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        kinds.push(match event {
            LifecycleEvent::Submitted { .. } => "submitted",
            LifecycleEvent::Succeeded { .. } => "succeeded",
            LifecycleEvent::Failed { .. } => "failed",
            LifecycleEvent::PersistenceFailed { .. } => "persistence_failed",
            LifecycleEvent::Cleared => "cleared",
        });
    }
    assert_eq!(kinds, ["failed", "submitted", "succeeded", "cleared"]);
}

#[tokio::test]
async fn summary_reflects_history() {
    let controller = PredictionController::with_mock_scorer(
        LifecycleConfig::immediate(),
        StorageConfig::Memory.open(),
    )
    .await;

    for depth in [20, 40, 60] {
        controller
            .submit(clay_draft().depth(depth))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
    }

    let summary = controller.summary().await;
    assert_eq!(summary.total, 3);
    assert_eq!(summary.best_confidence, Some(83));
    // 70, 77, 83
    assert_eq!(summary.excellent_sites, 2);
}
