//! Terminal formatting helpers shared by the handlers.

mod item_display;
mod tables;

pub use item_display::{display_item, display_timeline, format_tags};
pub use tables::{format_optional, print_separator, truncate_string};
