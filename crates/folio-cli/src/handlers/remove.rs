//! Remove command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_item;
use crate::utils::input;

/// Execute the remove command.
///
/// Shows the item and asks for confirmation unless `force` is set. The
/// session is checked before prompting.
pub async fn execute(ctx: &CliContext, id: &str, force: bool) -> Result<()> {
    let session = ctx.session()?;
    let Some(item) = ctx.admin().get(id).await? else {
        return Err(CliError::NotFound(format!("no catalog item with ID '{id}'")).into());
    };

    if !force {
        display_item(&item);
        println!();
        if !input::prompt_confirmation("Remove this item from the catalog?")? {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    ctx.admin().delete(&session, &item.id).await?;
    println!("Removed '{}' (ID {}).", item.title, item.id);
    Ok(())
}
