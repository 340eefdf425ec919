use std::sync::Arc;

use testresult::TestResult;

use crate::shared::{MemoryStore, explorer_with};

#[tokio::test]
async fn finds_queue_names_behind_meta_markers() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_hash("bull:emails:meta", &[("opts", "{}")]);
    store.put_hash("bull:billing:meta", &[("opts", "{}")]);
    store.put_hash("bull:emails:meta", &[("opts", "{}")]);
    // non-marker keys in the same namespace are ignored
    store.put_list("bull:emails:wait", &["1"]);
    store.put_hash("bull:emails:1", &[("name", "welcome")]);
    let explorer = explorer_with(&store);

    let queues = explorer.list_queues().await?;
    assert_eq!(queues, ["billing", "emails"]);
    Ok(())
}

#[tokio::test]
async fn ignores_marker_keys_with_too_few_segments() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_hash("bull:meta", &[("opts", "{}")]);
    let explorer = explorer_with(&store);

    assert!(explorer.list_queues().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn respects_the_configured_prefix() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_hash("custom:jobs:meta", &[("opts", "{}")]);
    store.put_hash("bull:other:meta", &[("opts", "{}")]);
    let explorer = bullscope::Explorer::with_store(
        Arc::clone(&store) as Arc<dyn bullscope::StoreCommands>,
        "custom",
    );

    assert_eq!(explorer.list_queues().await?, ["jobs"]);
    Ok(())
}
