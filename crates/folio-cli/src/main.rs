//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the context and routes
//! each command to its handler.

use clap::{CommandFactory, Parser};
use folio_core::NewCatalogItem;
use tracing_subscriber::EnvFilter;

use folio_cli::handlers::edit::EditArgs;
use folio_cli::handlers::image_url::ImageUrlArgs;
use folio_cli::handlers::tag::TagAction;
use folio_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config).await?;

    match command {
        Commands::List {
            category,
            tags,
            with_images,
        } => handlers::list::execute(&ctx, category, &tags, with_images).await,
        Commands::Tags { category } => handlers::tags::execute(&ctx, category).await,
        Commands::Show { id } => handlers::show::execute(&ctx, &id).await,
        Commands::Add {
            title,
            category,
            tags,
            image,
            description,
            year,
        } => {
            let mut item = NewCatalogItem::new(title, category).with_tags(tags);
            item.image = image;
            item.description = description;
            item.year = year;
            handlers::add::execute(&ctx, item).await
        }
        Commands::Edit {
            id,
            title,
            category,
            image,
            description,
            year,
            clear,
        } => {
            let args = EditArgs {
                title,
                category,
                image,
                description,
                year,
                clear,
            };
            handlers::edit::execute(&ctx, &id, args).await
        }
        Commands::Tag { id, add, remove } => {
            let action = match (add, remove) {
                (Some(tag), _) => TagAction::Add(tag),
                (None, Some(tag)) => TagAction::Remove(tag),
                (None, None) => {
                    return Err(CliError::Arguments("--add or --remove is required".into()).into());
                }
            };
            handlers::tag::execute(&ctx, &id, action).await
        }
        Commands::Remove { id, force } => handlers::remove::execute(&ctx, &id, force).await,
        Commands::Upload { file, kind } => handlers::upload::execute(&ctx, &file, kind).await,
        Commands::Timeline { command } => handlers::timeline::execute(&ctx, command).await,
        Commands::ImageUrl {
            src,
            width,
            height,
            quality,
            check,
        } => {
            let args = ImageUrlArgs {
                src,
                width,
                height,
                quality,
                check,
            };
            handlers::image_url::execute(&ctx, args).await
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads FOLIO_ADMIN_PASSWORD
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(CliError::exit_code_for(&e));
    }
}
