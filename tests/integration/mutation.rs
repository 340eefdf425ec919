use std::sync::Arc;

use bullscope::{JobQuery, SortBy};
use testresult::TestResult;

use crate::shared::{MemoryStore, explorer_with, job_ids, seed_emails_queue};

#[tokio::test]
async fn delete_removes_every_membership_and_both_records() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    store.put_hash("bull:emails:2", &[("name", "digest")]);
    store.put_hash("bull:emails:2:logs", &[("0", "started")]);
    let explorer = explorer_with(&store);

    explorer.delete_job("emails", "2").await?;

    assert_eq!(store.members("bull:emails:wait"), ["1"]);
    assert_eq!(store.members("bull:emails:completed"), ["3"]);
    assert!(!store.has_key("bull:emails:2"));
    assert!(!store.has_key("bull:emails:2:logs"));

    let query = JobQuery {
        sort: SortBy::Id,
        descending: false,
        ..JobQuery::default()
    };
    let page = explorer.list_jobs("emails", &query).await?;
    assert_eq!(job_ids(&page), ["1", "3"]);
    assert_eq!(page.counts.wait, 1);
    assert_eq!(page.counts.completed, 1);

    // a post-delete detail lookup finds nothing, and does not fail
    let detail = explorer.job_detail("emails", "2").await?.unwrap();
    assert_eq!(detail.state, "");
    assert_eq!(detail.data_raw, "");
    Ok(())
}

#[tokio::test]
async fn deleting_an_absent_job_is_a_no_op() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    explorer.delete_job("emails", "404").await?;

    assert_eq!(store.members("bull:emails:wait"), ["1", "2"]);
    assert_eq!(store.members("bull:emails:completed"), ["2", "3"]);
    Ok(())
}

#[tokio::test]
async fn delete_issues_a_single_batched_round_trip() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    explorer.delete_job("emails", "2").await?;

    assert_eq!(store.batch_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_and_refresh_returns_the_next_page() -> TestResult {
    let store = Arc::new(MemoryStore::default());
    seed_emails_queue(&store);
    let explorer = explorer_with(&store);

    let query = JobQuery {
        sort: SortBy::Id,
        descending: false,
        ..JobQuery::default()
    };
    let page = explorer.delete_job_and_refresh("emails", "1", &query).await?;

    assert_eq!(job_ids(&page), ["2", "3"]);
    assert_eq!(page.total, 2);
    Ok(())
}
