//! Tags command handler.

use anyhow::Result;
use folio_core::Category;

use crate::bootstrap::CliContext;

/// Execute the tags command: print the category's tag index.
pub async fn execute(ctx: &CliContext, category: Category) -> Result<()> {
    let mut store = ctx.store();
    store.load(category).await?;

    if store.tag_index().is_empty() {
        println!("No tags used in {category}.");
        return Ok(());
    }
    for tag in store.tag_index() {
        println!("{tag}");
    }
    Ok(())
}
