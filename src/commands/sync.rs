//! Audit how the remote store and local files line up

use anyhow::Result;

use crate::merge::{sync_report, SyncState};
use crate::remote::FetchScope;
use crate::Blog;

/// Print the sync state of every slug, including unpublished remote rows
pub async fn run(blog: &Blog, json: bool) -> Result<()> {
    let sources = blog.fetch_sources(FetchScope::All).await?;
    let report = sync_report(&sources.api, &sources.file);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Sync report ({} slugs):", report.len());
    for entry in &report {
        match &entry.state {
            SyncState::ApiOnly => println!("  remote only  {}", entry.slug),
            SyncState::FileOnly => println!("  local only   {}", entry.slug),
            SyncState::InSync => println!("  in sync      {}", entry.slug),
            SyncState::Conflict { resolved } => println!(
                "  conflict     {} -> keep {:?} copy, tags [{}]",
                entry.slug,
                resolved.source,
                resolved.tags.join(", ")
            ),
        }
    }
    Ok(())
}
