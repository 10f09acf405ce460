//! Upload command handler.

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::AssetKind;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the upload command: store the file and print its public URL.
pub async fn execute(ctx: &CliContext, file: &Path, kind: AssetKind) -> Result<()> {
    let session = ctx.session()?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Arguments(format!("not a file: {}", file.display())))?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let url = ctx
        .admin()
        .upload_image(&session, bytes, file_name, kind)
        .await?;
    println!("{url}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::tests::test_context;

    #[tokio::test]
    async fn test_upload_file() {
        let (_db, ctx) = test_context().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        assert!(execute(&ctx, &path, AssetKind::Timeline).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let (_db, ctx) = test_context().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        std::fs::write(&path, b"").unwrap();

        let err = execute(&ctx, &path, AssetKind::Portfolio).await.unwrap_err();
        assert_eq!(CliError::exit_code_for(&err), 64);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (_db, ctx) = test_context().await;
        let err = execute(&ctx, Path::new("/definitely/not/here.jpg"), AssetKind::Tour)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
