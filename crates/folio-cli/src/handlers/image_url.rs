//! Image URL command handler.
//!
//! Prints the URL an image would be requested from and optionally runs one
//! load through an [`ImageSlot`] to report the resulting phase.

use std::time::Duration;

use anyhow::Result;
use folio_core::{ImagePhase, ImageRequest, ImageSlot, preload};
use folio_rest::ReqwestImageFetcher;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Options for one image lookup.
#[derive(Debug, Default)]
pub struct ImageUrlArgs {
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub check: bool,
}

/// Build the request, defaulting quality from settings.
pub fn build_request(ctx: &CliContext, args: &ImageUrlArgs) -> ImageRequest {
    let mut request = ImageRequest::new(args.src.trim(), "")
        .with_quality(args.quality.unwrap_or_else(|| ctx.settings().effective_image_quality()));
    if let Some(width) = args.width {
        request = request.with_width(width);
    }
    if let Some(height) = args.height {
        request = request.with_height(height);
    }
    request
}

/// Execute the image-url command.
pub async fn execute(ctx: &CliContext, args: ImageUrlArgs) -> Result<()> {
    if args.src.trim().is_empty() {
        return Err(CliError::Arguments("image reference cannot be empty".to_string()).into());
    }
    let request = build_request(ctx, &args);
    let mut slot = ImageSlot::new(ctx.settings().image_hosts());
    let Some(token) = slot.request(request) else {
        return Ok(());
    };
    println!("{}", token.url());

    if args.check {
        let timeout: Duration = ctx.settings().effective_fetch_timeout();
        let fetcher =
            ReqwestImageFetcher::new(timeout).map_err(|e| CliError::Config(e.to_string()))?;
        slot.complete(preload(&fetcher, token).await);
        match slot.phase() {
            ImagePhase::Loaded { .. } => println!("loaded"),
            ImagePhase::Error { message } => {
                return Err(CliError::Backend(message.clone()).into());
            }
            ImagePhase::Loading => println!("still loading"),
        }
    }
    Ok(())
}
