//! Tag command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::format_tags;

/// What to do with a single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    Add(String),
    Remove(String),
}

/// Execute the tag command.
pub async fn execute(ctx: &CliContext, id: &str, action: TagAction) -> Result<()> {
    let session = ctx.session()?;
    let item = match action {
        TagAction::Add(tag) => ctx.admin().add_tag(&session, id, &tag).await?,
        TagAction::Remove(tag) => ctx.admin().remove_tag(&session, id, &tag).await?,
    };
    println!("Tags of '{}': {}", item.title, format_tags(&item.tags));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;
    use folio_core::{Category, NewCatalogItem};

    #[tokio::test]
    async fn test_add_is_idempotent_and_remove_works() {
        let (_db, ctx) = test_context().await;
        let session = ctx.session().unwrap();
        let item = ctx
            .admin()
            .create(&session, NewCatalogItem::new("Pier", Category::Inventory).with_tags(["Sea"]))
            .await
            .unwrap();

        execute(&ctx, &item.id, TagAction::Add("Dusk".into())).await.unwrap();
        execute(&ctx, &item.id, TagAction::Add("Dusk".into())).await.unwrap();
        assert_eq!(ctx.admin().find(&item.id).await.unwrap().tags, ["Sea", "Dusk"]);

        execute(&ctx, &item.id, TagAction::Remove("Sea".into())).await.unwrap();
        assert_eq!(ctx.admin().find(&item.id).await.unwrap().tags, ["Dusk"]);
    }
}
