//! Item and timeline display.

use chrono::{DateTime, Utc};
use folio_core::{CatalogItem, TimelineEntry};

use super::tables::{format_optional, print_separator};

/// Comma-separated tags, or `--` when there are none.
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "--".to_string()
    } else {
        tags.join(", ")
    }
}

fn format_added(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Print every field of one item.
pub fn display_item(item: &CatalogItem) {
    println!("ID:          {}", item.id);
    println!("Title:       {}", item.title);
    println!("Category:    {}", item.category.label());
    println!("Tags:        {}", format_tags(&item.tags));
    println!("Year:        {}", format_optional(item.year.as_deref(), "--"));
    println!("Image:       {}", format_optional(item.image_url(), "--"));
    println!("Added:       {}", format_added(item.created_at));
    if let Some(description) = item.description.as_deref() {
        println!();
        println!("{description}");
    }
}

/// Print a timeline as a numbered list.
pub fn display_timeline(entries: &[TimelineEntry]) {
    println!("Timeline ({} stage(s)):", entries.len());
    print_separator(60);
    for (n, entry) in entries.iter().enumerate() {
        println!("{:>2}. {} [{}] (entry {})", n + 1, entry.title, entry.date, entry.id);
        if let Some(description) = entry.description.as_deref() {
            println!("    {description}");
        }
        if let Some(image) = entry.image.as_deref() {
            println!("    {image}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&[]), "--");
        assert_eq!(
            format_tags(&["Mural".to_string(), "Outdoor".to_string()]),
            "Mural, Outdoor"
        );
    }

    #[test]
    fn test_format_added() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_added(at), "2023-11-14 22:13");
    }
}
