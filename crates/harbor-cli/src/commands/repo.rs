//! Repository subcommand handlers.

use harbor_config::HarborConfig;
use harbor_core::enums::VcsType;
use harbor_db::query::repository::RepositoryQuery;
use harbor_db::service::HarborService;

use crate::cli::{GlobalFlags, OutputFormat, RepoAction};
use crate::commands::shared::{effective_limit, parse_enum};
use crate::output::output;

pub async fn handle(
    action: RepoAction,
    svc: &HarborService,
    config: &HarborConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RepoAction::Create {
            name,
            vcs,
            callsign,
        } => {
            let vcs: VcsType = parse_enum(&vcs, "vcs")?;
            let repository = svc
                .create_repository(&name, vcs, callsign.as_deref())
                .await?;
            output(&repository, flags.format)
        }
        RepoAction::List {
            status,
            ids,
            uids,
            callsigns,
            counts,
            last_commit,
            after,
        } => {
            let limit = effective_limit(None, flags.limit, config.general.default_limit);
            let mut query = RepositoryQuery::new()
                .limit(limit)
                .with_ids(ids)
                .with_uids(uids)
                .with_callsigns(callsigns)
                .need_commit_counts(counts)
                .need_most_recent_commits(last_commit);
            if let Some(status) = status {
                query = query.with_status(status);
            }
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
        RepoAction::Track { id } => {
            let repository = svc.set_repository_tracked(id, true).await?;
            output(&repository, flags.format)
        }
        RepoAction::Untrack { id } => {
            let repository = svc.set_repository_tracked(id, false).await?;
            output(&repository, flags.format)
        }
    }
}
