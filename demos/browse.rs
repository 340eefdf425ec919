use bullscope::{Explorer, JobQuery, SortBy};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
pub async fn main() -> Result<(), bullscope::BullscopeError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let prefix = std::env::var("BULL_PREFIX").unwrap_or_default();

    let mut explorer = Explorer::new();
    explorer.connect(&url, &prefix).await?;

    if let Some(info) = explorer.server_info().await? {
        println!(
            "redis {} ({}), {} used / {} total, {} clients",
            info.version, info.mode, info.used_memory, info.total_memory, info.clients
        );
    }

    let queues = explorer.list_queues().await?;
    if queues.is_empty() {
        println!("no queues found under prefix {:?}", explorer.prefix());
        return Ok(());
    }

    for queue in &queues {
        let query = JobQuery {
            sort: SortBy::Id,
            descending: false,
            ..JobQuery::default()
        };
        let page = explorer.list_jobs(queue, &query).await?;
        println!(
            "\n{queue}: {} jobs (wait={} active={} delayed={} completed={} failed={})",
            page.total,
            page.counts.wait,
            page.counts.active,
            page.counts.delayed,
            page.counts.completed,
            page.counts.failed,
        );
        for job in &page.jobs {
            println!(
                "  {:<12} {:<20} [{}] {} {}",
                job.id, job.name, job.state, job.timestamp, job.data_preview
            );
        }
    }

    explorer.disconnect();
    Ok(())
}
