//! Edit command handler.

use anyhow::Result;
use folio_core::{CatalogItemPatch, Category};

use crate::bootstrap::CliContext;
use crate::commands::ClearField;

/// Field changes requested on the command line.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub year: Option<String>,
    pub clear: Vec<ClearField>,
}

impl EditArgs {
    /// Build the patch; `--clear` wins over a value given for the same field.
    pub fn into_patch(self) -> CatalogItemPatch {
        let clears = |field| self.clear.contains(&field);
        let set_or_clear = |value: Option<String>, field| {
            if clears(field) { Some(None) } else { value.map(Some) }
        };
        CatalogItemPatch {
            image: set_or_clear(self.image, ClearField::Image),
            description: set_or_clear(self.description, ClearField::Description),
            year: set_or_clear(self.year, ClearField::Year),
            title: self.title,
            category: self.category,
            tags: None,
        }
    }
}

/// Execute the edit command.
pub async fn execute(ctx: &CliContext, id: &str, args: EditArgs) -> Result<()> {
    let patch = args.into_patch();
    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let session = ctx.session()?;
    let updated = ctx.admin().update(&session, id, patch).await?;
    println!("Updated '{}' (ID {}).", updated.title, updated.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;
    use folio_core::NewCatalogItem;

    #[test]
    fn test_into_patch() {
        let patch = EditArgs {
            title: Some("New".into()),
            image: Some("/assets/x.png".into()),
            year: Some("2020".into()),
            clear: vec![ClearField::Year, ClearField::Description],
            ..EditArgs::default()
        }
        .into_patch();

        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.image, Some(Some("/assets/x.png".to_string())));
        assert_eq!(patch.year, Some(None));
        assert_eq!(patch.description, Some(None));
        assert!(patch.category.is_none());
        assert!(patch.tags.is_none());
    }

    #[test]
    fn test_no_args_is_empty_patch() {
        assert!(EditArgs::default().into_patch().is_empty());
    }

    #[tokio::test]
    async fn test_edit_moves_category() {
        let (_db, ctx) = test_context().await;
        let session = ctx.session().unwrap();
        let item = ctx
            .admin()
            .create(&session, NewCatalogItem::new("Fields", Category::Commission).with_year("2019"))
            .await
            .unwrap();

        let args = EditArgs {
            category: Some(Category::Inventory),
            clear: vec![ClearField::Year],
            ..EditArgs::default()
        };
        execute(&ctx, &item.id, args).await.unwrap();

        let edited = ctx.admin().find(&item.id).await.unwrap();
        assert_eq!(edited.category, Category::Inventory);
        assert_eq!(edited.year, None);
    }
}
