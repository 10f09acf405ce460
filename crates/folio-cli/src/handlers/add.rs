//! Add command handler.

use anyhow::Result;
use folio_core::NewCatalogItem;

use crate::bootstrap::CliContext;

/// Execute the add command.
pub async fn execute(ctx: &CliContext, item: NewCatalogItem) -> Result<()> {
    let session = ctx.session()?;
    let created = ctx.admin().create(&session, item).await?;
    println!(
        "Added '{}' to {} (ID {}).",
        created.title,
        created.category.label(),
        created.id
    );
    Ok(())
}
