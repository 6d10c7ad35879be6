//! Integration tests for the pinned-posts loader.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chatkit::adapters::mock::{MockPostSource, RecordedCall};
use chatkit::error::FetchError;
use chatkit::pinned::{PinnedPostsLoader, PinnedState};

use common::post_ids;

#[tokio::test]
async fn load_reaches_loaded_with_post_ids() {
    common::init_tracing();
    let source = MockPostSource::new();
    source.set_pinned("chan1", Ok(post_ids(3)));
    let loader = PinnedPostsLoader::new(Arc::new(source.clone()), "chan1");

    assert_eq!(loader.state(), PinnedState::Idle);
    loader.load().await;

    assert_eq!(loader.state(), PinnedState::Loaded { post_ids: post_ids(3) });
    assert_eq!(
        source.calls(),
        vec![RecordedCall::GetPinnedPosts { channel_id: "chan1".to_string() }]
    );
}

#[tokio::test]
async fn empty_channel_is_still_loaded() {
    let source = MockPostSource::new();
    source.set_pinned("chan1", Ok(vec![]));
    let loader = PinnedPostsLoader::new(Arc::new(source), "chan1");

    loader.load().await;

    assert_eq!(loader.state(), PinnedState::Loaded { post_ids: vec![] });
}

#[tokio::test]
async fn fetch_failure_sets_failed() {
    let source = MockPostSource::new();
    source.set_pinned("chan1", Err(FetchError::connection("offline")));
    let loader = PinnedPostsLoader::new(Arc::new(source), "chan1");

    loader.load().await;

    assert_eq!(loader.state(), PinnedState::Failed);
}

#[tokio::test]
async fn retry_after_failure_can_succeed() {
    let source = MockPostSource::new();
    source.set_pinned("chan1", Err(FetchError::connection("offline")));
    let loader = PinnedPostsLoader::new(Arc::new(source.clone()), "chan1");

    loader.load().await;
    assert_eq!(loader.state(), PinnedState::Failed);

    source.set_pinned("chan1", Ok(post_ids(2)));
    loader.retry().await;

    assert_eq!(loader.state(), PinnedState::Loaded { post_ids: post_ids(2) });
}

#[tokio::test]
async fn overlapping_loads_collapse() {
    let source = MockPostSource::new();
    source.set_pinned("chan1", Ok(post_ids(1)));
    source.set_latency(Duration::from_millis(20));
    let loader = PinnedPostsLoader::new(Arc::new(source.clone()), "chan1");

    tokio::join!(loader.load(), loader.load());

    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn teardown_suppresses_transitions() {
    let source = MockPostSource::new();
    source.set_pinned("chan1", Ok(post_ids(1)));
    source.set_latency(Duration::from_millis(100));
    let loader = Arc::new(PinnedPostsLoader::new(Arc::new(source), "chan1"));

    let task = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader.load().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    loader.close();
    task.await.unwrap();

    // Loading was applied before teardown; Loaded was dropped after it.
    assert_eq!(loader.state(), PinnedState::Loading);
}
