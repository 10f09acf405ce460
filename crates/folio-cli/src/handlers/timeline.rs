//! Timeline command handlers.

use anyhow::Result;
use folio_core::NewTimelineEntry;

use crate::bootstrap::CliContext;
use crate::commands::TimelineCommand;
use crate::presentation::display_timeline;

/// Execute a timeline subcommand.
pub async fn execute(ctx: &CliContext, command: TimelineCommand) -> Result<()> {
    let session = ctx.session()?;
    let admin = ctx.admin();

    match command {
        TimelineCommand::Add {
            item_id,
            title,
            date,
            description,
            image,
        } => {
            let mut entry = NewTimelineEntry::new(item_id, title, date);
            entry.description = description;
            entry.image = image;
            let created = admin.add_timeline_entry(&session, entry).await?;
            println!(
                "Added '{}' to the timeline at position {} (entry {}).",
                created.title,
                created.position + 1,
                created.id
            );
        }
        TimelineCommand::Remove { entry_id } => {
            admin.remove_timeline_entry(&session, &entry_id).await?;
            println!("Removed timeline entry {entry_id}.");
        }
        TimelineCommand::Move {
            item_id,
            entry_id,
            direction,
        } => {
            let entries = admin
                .move_timeline_entry(&session, &item_id, &entry_id, direction.into())
                .await?;
            display_timeline(&entries);
        }
    }
    Ok(())
}
