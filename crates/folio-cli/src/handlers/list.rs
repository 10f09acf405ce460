//! List command handler.
//!
//! Loads one category, applies the requested tags and prints what stays
//! visible.

use anyhow::Result;
use folio_core::{CatalogItem, Category};
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, format_tags, print_separator, truncate_string};

/// Load `category` and return the items visible under `tags`.
///
/// Tags are combined with OR; no tags shows everything. Tags the category
/// does not use select nothing and are reported.
pub async fn visible_items(
    ctx: &CliContext,
    category: Category,
    tags: &[String],
    with_images: bool,
) -> Result<Vec<CatalogItem>> {
    let mut store = ctx.store();
    store.load(category).await?;

    for tag in tags {
        if !store.tag_index().contains(tag) {
            warn!(%tag, %category, "Tag is not used in this category");
        }
        if !store.filter().is_selected(tag) {
            store.toggle_tag(tag);
        }
    }

    let visible = if with_images {
        store.visible_with_images()
    } else {
        store.visible()
    };
    Ok(visible.into_iter().cloned().collect())
}

/// Execute the list command.
pub async fn execute(
    ctx: &CliContext,
    category: Category,
    tags: &[String],
    with_images: bool,
) -> Result<()> {
    let items = visible_items(ctx, category, tags, with_images).await?;

    if items.is_empty() {
        if tags.is_empty() {
            println!("No {category} items yet.");
        } else {
            println!("No {category} items tagged {}.", tags.join(" or "));
        }
        return Ok(());
    }

    println!("{} {} item(s):\n", items.len(), category.label());
    println!("{:<10} {:<30} {:<6} Tags", "ID", "Title", "Year");
    print_separator(80);
    for item in &items {
        println!(
            "{:<10} {:<30} {:<6} {}",
            truncate_string(&item.id, 10),
            truncate_string(&item.title, 30),
            format_optional(item.year.as_deref(), "--"),
            format_tags(&item.tags)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;
    use folio_core::NewCatalogItem;

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_visible_items_or_semantics() {
        let (_db, ctx) = test_context().await;
        let session = ctx.session().unwrap();
        let admin = ctx.admin();
        for (title, tags) in [("One", vec!["A"]), ("Two", vec!["B"]), ("Three", vec!["C"])] {
            admin
                .create(
                    &session,
                    NewCatalogItem::new(title, Category::Inventory).with_tags(tags),
                )
                .await
                .unwrap();
        }

        let all = visible_items(&ctx, Category::Inventory, &[], false).await.unwrap();
        assert_eq!(all.len(), 3);

        let tags = ["A".to_string(), "C".to_string(), "A".to_string()];
        let some = visible_items(&ctx, Category::Inventory, &tags, false).await.unwrap();
        let mut titles = ids(&some);
        titles.sort_unstable();
        assert_eq!(titles, ["One", "Three"]);
    }

    #[tokio::test]
    async fn test_with_images_drops_imageless_items() {
        let (_db, ctx) = test_context().await;
        let session = ctx.session().unwrap();
        let admin = ctx.admin();
        admin
            .create(
                &session,
                NewCatalogItem::new("Pictured", Category::Commission).with_image("/assets/a.jpg"),
            )
            .await
            .unwrap();
        admin
            .create(
                &session,
                NewCatalogItem::new("Blank", Category::Commission).with_image(""),
            )
            .await
            .unwrap();

        let items = visible_items(&ctx, Category::Commission, &[], true).await.unwrap();
        assert_eq!(ids(&items), ["Pictured"]);
        assert!(execute(&ctx, Category::Commission, &[], true).await.is_ok());
    }
}
