//! Show command handler.

use anyhow::Result;
use folio_core::Category;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{display_item, display_timeline};

/// Execute the show command: one item, plus its timeline for commissions.
pub async fn execute(ctx: &CliContext, id: &str) -> Result<()> {
    let Some(item) = ctx.admin().get(id).await? else {
        return Err(CliError::NotFound(format!("no catalog item with ID '{id}'")).into());
    };

    display_item(&item);
    if item.category == Category::Commission {
        let entries = ctx.admin().timeline(&item.id).await?;
        println!();
        display_timeline(&entries);
    }
    Ok(())
}
