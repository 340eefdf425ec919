use std::sync::Arc;

use bullscope::{JobQuery, JobState, SortBy, StateCounts};
use testresult::TestResult;

use crate::shared::{MemoryStore, explorer_with, job_ids, seed_emails_queue};

fn by_id_ascending() -> JobQuery {
    JobQuery {
        sort: SortBy::Id,
        descending: false,
        ..JobQuery::default()
    }
}

#[tokio::test]
async fn merges_states_counts_and_hydrates_the_page() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("emails", &by_id_ascending()).await?;

    assert_eq!(job_ids(&page), ["1", "2", "3"]);
    assert_eq!(page.total, 3);
    assert_eq!(
        page.counts,
        StateCounts {
            wait: 2,
            completed: 2,
            ..StateCounts::default()
        }
    );

    // job "2" sits in two collections at once
    assert_eq!(page.jobs[0].state, "wait");
    assert_eq!(page.jobs[1].state, "completed,wait");
    assert_eq!(page.jobs[2].state, "completed");

    // only job "1" has a hash record; its payload is re-serialized compactly
    let welcome = &page.jobs[0];
    assert_eq!(welcome.name, "welcome");
    assert_eq!(welcome.data_preview, r#"{"to":"a@x.com"}"#);
    assert_eq!(welcome.timestamp.len(), 19);
    assert!(welcome.timestamp.starts_with("2023-11-1"));

    // jobs "2" and "3" have no record at all, fields fall back
    assert_eq!(page.jobs[1].name, "");
    assert_eq!(page.jobs[1].timestamp, "-");
    Ok(())
}

#[tokio::test]
async fn search_matches_payload_substring() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        search: "a@x.com".to_string(),
        ..by_id_ascending()
    };
    let page = explorer.list_jobs("emails", &query).await?;

    assert_eq!(job_ids(&page), ["1"]);
    assert_eq!(page.total, 1);
    // counts stay raw, unaffected by filtering
    assert_eq!(page.counts.wait, 2);
    assert_eq!(page.counts.completed, 2);
    Ok(())
}

#[tokio::test]
async fn search_matches_id_even_without_a_record() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        search: "3".to_string(),
        ..by_id_ascending()
    };
    let page = explorer.list_jobs("emails", &query).await?;

    assert_eq!(job_ids(&page), ["3"]);
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["1"]);
    store.put_hash("bull:q:1", &[("data", "Hello WORLD")]);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        search: "world".to_string(),
        ..by_id_ascending()
    };
    assert_eq!(explorer.list_jobs("q", &query).await?.total, 1);

    let query = JobQuery {
        search: "HELLO".to_string(),
        ..by_id_ascending()
    };
    assert_eq!(explorer.list_jobs("q", &query).await?.total, 1);
    Ok(())
}

#[tokio::test]
async fn status_filter_narrows_but_counts_stay_raw() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        status: Some(JobState::Completed),
        ..by_id_ascending()
    };
    let page = explorer.list_jobs("emails", &query).await?;

    assert_eq!(job_ids(&page), ["2", "3"]);
    assert_eq!(page.total, 2);
    assert_eq!(page.counts.wait, 2);
    Ok(())
}

#[tokio::test]
async fn reads_every_collection_type_the_store_uses() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:mixed:wait", &["a"]);
    store.put_sorted_set("bull:mixed:delayed", &["b", "a"]);
    store.put_set("bull:mixed:failed", &["c"]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("mixed", &by_id_ascending()).await?;

    assert_eq!(job_ids(&page), ["a", "b", "c"]);
    assert_eq!(page.counts.wait, 1);
    assert_eq!(page.counts.delayed, 2);
    assert_eq!(page.counts.failed, 1);
    assert_eq!(page.jobs[0].state, "delayed,wait");
    Ok(())
}

#[tokio::test]
async fn unsupported_collection_type_contributes_nothing() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["1"]);
    // a hash where a state collection should be
    store.put_hash("bull:q:active", &[("bogus", "value")]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("q", &by_id_ascending()).await?;

    assert_eq!(job_ids(&page), ["1"]);
    assert_eq!(page.counts.active, 0);
    Ok(())
}

#[tokio::test]
async fn empty_queue_yields_empty_page_and_zero_counts() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("ghost", &by_id_ascending()).await?;

    assert!(page.jobs.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.counts, StateCounts::default());
    Ok(())
}

#[tokio::test]
async fn duplicate_ids_count_per_slot_but_list_once() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["1", "1"]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("q", &by_id_ascending()).await?;

    assert_eq!(page.counts.wait, 2);
    assert_eq!(job_ids(&page), ["1"]);
    assert_eq!(page.total, 1);
    Ok(())
}

#[tokio::test]
async fn orphaned_hash_records_never_appear() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["1"]);
    store.put_hash("bull:q:99", &[("name", "orphan")]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("q", &by_id_ascending()).await?;

    assert_eq!(job_ids(&page), ["1"]);
    Ok(())
}

#[tokio::test]
async fn paginates_with_stable_total() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["1", "2", "3", "4", "5"]);
    let explorer = explorer_with(&store);

    let mut query = by_id_ascending();
    query.page_size = 2;

    let first = explorer.list_jobs("q", &query).await?;
    assert_eq!(job_ids(&first), ["1", "2"]);
    assert_eq!(first.total, 5);

    query.page = 3;
    let last = explorer.list_jobs("q", &query).await?;
    assert_eq!(job_ids(&last), ["5"]);
    assert_eq!(last.total, 5);

    query.page = 9;
    let beyond = explorer.list_jobs("q", &query).await?;
    assert!(beyond.jobs.is_empty());
    assert_eq!(beyond.total, 5);
    Ok(())
}

#[tokio::test]
async fn timestamp_orderings_reverse_exactly() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["a", "b", "c"]);
    store.put_hash("bull:q:a", &[("timestamp", "3000")]);
    store.put_hash("bull:q:b", &[("timestamp", "1000")]);
    store.put_hash("bull:q:c", &[("timestamp", "2000")]);
    let explorer = explorer_with(&store);

    let ascending = JobQuery {
        sort: SortBy::Timestamp,
        descending: false,
        ..JobQuery::default()
    };
    let page = explorer.list_jobs("q", &ascending).await?;
    assert_eq!(job_ids(&page), ["b", "c", "a"]);

    let descending = JobQuery {
        descending: true,
        ..ascending
    };
    let page = explorer.list_jobs("q", &descending).await?;
    assert_eq!(job_ids(&page), ["a", "c", "b"]);
    Ok(())
}

#[tokio::test]
async fn malformed_timestamps_sort_first_and_hydrate_raw() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["a", "b"]);
    store.put_hash("bull:q:a", &[("timestamp", "not-a-number")]);
    store.put_hash("bull:q:b", &[("timestamp", "1000")]);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        sort: SortBy::Timestamp,
        descending: false,
        ..JobQuery::default()
    };
    let page = explorer.list_jobs("q", &query).await?;

    assert_eq!(job_ids(&page), ["a", "b"]);
    assert_eq!(page.jobs[0].timestamp, "not-a-number");
    Ok(())
}

#[tokio::test]
async fn id_order_mixes_numeric_and_text_ids() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    store.put_list("bull:q:wait", &["10", "9", "alpha", "2"]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("q", &by_id_ascending()).await?;
    assert_eq!(job_ids(&page), ["2", "9", "10", "alpha"]);

    let query = JobQuery {
        descending: true,
        ..by_id_ascending()
    };
    let page = explorer.list_jobs("q", &query).await?;
    assert_eq!(job_ids(&page), ["alpha", "10", "9", "2"]);
    Ok(())
}

#[tokio::test]
async fn non_json_payload_previews_as_truncated_raw_text() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    let long = "plain text ".repeat(30);
    store.put_list("bull:q:wait", &["1"]);
    store.put_hash("bull:q:1", &[("data", long.as_str())]);
    let explorer = explorer_with(&store);

    let page = explorer.list_jobs("q", &by_id_ascending()).await?;

    assert_eq!(page.jobs[0].data_preview.chars().count(), 140);
    assert!(long.starts_with(&page.jobs[0].data_preview));
    Ok(())
}

#[tokio::test]
async fn round_trips_stay_constant_per_query_shape() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    // id sort, no search: hydration is the only batch
    explorer.list_jobs("emails", &by_id_ascending()).await?;
    assert_eq!(store.batch_calls(), 1);

    // adding a search term costs exactly one more batched payload fetch
    let query = JobQuery {
        search: "a@x.com".to_string(),
        ..by_id_ascending()
    };
    explorer.list_jobs("emails", &query).await?;
    assert_eq!(store.batch_calls(), 3);

    // timestamp sort adds one batched timestamp fetch on top of both
    let query = JobQuery {
        search: "a@x.com".to_string(),
        sort: SortBy::Timestamp,
        descending: false,
        ..JobQuery::default()
    };
    explorer.list_jobs("emails", &query).await?;
    assert_eq!(store.batch_calls(), 6);
    Ok(())
}
