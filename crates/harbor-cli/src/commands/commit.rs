//! Commit subcommand handlers.

use chrono::Utc;

use harbor_config::HarborConfig;
use harbor_db::query::commit::CommitQuery;
use harbor_db::service::HarborService;

use crate::cli::{CommitAction, GlobalFlags, OutputFormat};
use crate::commands::shared::effective_limit;
use crate::output::output;

pub async fn handle(
    action: CommitAction,
    svc: &HarborService,
    config: &HarborConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommitAction::Record {
            repository_id,
            hash,
            summary,
            author,
        } => {
            let commit = svc
                .record_commit(
                    repository_id,
                    &hash,
                    summary.as_deref(),
                    author.as_deref(),
                    Utc::now(),
                )
                .await?;
            output(&commit, flags.format)
        }
        CommitAction::Log {
            repository_id,
            after,
        } => {
            let limit = effective_limit(None, flags.limit, config.general.default_limit);
            let mut query = CommitQuery::new()
                .with_repository_ids([repository_id])
                .limit(limit);
            if let Some(after) = after {
                query = query.after(after);
            }

            let page = query.load_page(svc).await?;
            match flags.format {
                OutputFormat::Json => output(&page, flags.format),
                OutputFormat::Table => {
                    output(&page.items, flags.format)?;
                    if let Some(cursor) = page.next_cursor {
                        println!("next cursor: {cursor}");
                    }
                    Ok(())
                }
            }
        }
    }
}
