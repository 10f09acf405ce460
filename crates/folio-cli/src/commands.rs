//! Main commands enum and subcommands.

use std::path::PathBuf;

use clap::{ArgGroup, Subcommand, ValueEnum};
use folio_core::{AssetKind, Category, MoveDirection};

/// Available catalog commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the items of a category, optionally filtered by tags (any match)
    List {
        /// Category to load (commission or inventory)
        #[arg(short, long)]
        category: Category,
        /// Show items carrying this tag; repeat to widen the selection
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Only show items that have an image
        #[arg(long)]
        with_images: bool,
    },

    /// Print the distinct tags used in a category
    Tags {
        /// Category to index
        #[arg(short, long)]
        category: Category,
    },

    /// Show one item and its timeline
    Show {
        /// Item ID
        id: String,
    },

    /// Add an item to the catalog
    Add {
        #[arg(long)]
        title: String,
        #[arg(short, long)]
        category: Category,
        /// Tag to attach; repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },

    /// Edit fields of an item
    Edit {
        /// Item ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        year: Option<String>,
        /// Clear an optional field; repeatable
        #[arg(long, value_enum)]
        clear: Vec<ClearField>,
    },

    /// Add or remove a single tag
    #[command(group(ArgGroup::new("action").required(true).args(["add", "remove"])))]
    Tag {
        /// Item ID
        id: String,
        #[arg(long)]
        add: Option<String>,
        #[arg(long)]
        remove: Option<String>,
    },

    /// Remove an item from the catalog
    Remove {
        /// Item ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Upload an image and print its public URL
    Upload {
        /// Image file to upload
        file: PathBuf,
        /// Folder the image belongs to (portfolio, timeline or tour)
        #[arg(short, long, default_value = "portfolio")]
        kind: AssetKind,
    },

    /// Manage the progress timeline of a commission
    Timeline {
        #[command(subcommand)]
        command: TimelineCommand,
    },

    /// Print the URL an image would be requested from
    ImageUrl {
        /// Image reference
        src: String,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Quality hint (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,
        /// Also fetch the image and report whether it loads
        #[arg(long)]
        check: bool,
    },
}

/// Timeline subcommands.
#[derive(Subcommand)]
pub enum TimelineCommand {
    /// Append an entry to an item's timeline
    Add {
        /// Item ID
        item_id: String,
        #[arg(long)]
        title: String,
        /// Free-form date label, e.g. "March 2024"
        #[arg(long)]
        date: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },

    /// Remove a timeline entry
    Remove {
        /// Entry ID
        entry_id: String,
    },

    /// Move an entry one step up or down
    Move {
        /// Item ID
        item_id: String,
        /// Entry ID
        entry_id: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
}

/// Optional item fields `edit --clear` can reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearField {
    Image,
    Description,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
        }
    }
}
