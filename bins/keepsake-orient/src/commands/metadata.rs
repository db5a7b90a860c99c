//! Metadata command - stored and displayed dimensions

use super::{image_error, Context};
use keepsake_cli::output::{format_size, Status};
use keepsake_core::{Error, ErrorCode, Result};
use keepsake_image::{extract_metadata, read_header_from_path, ImageMetadata};
use serde_json::json;
use std::fs;
use std::path::Path;

/// Run metadata command
pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let mut meta = load(ctx, path)?;
    meta.size_bytes = usize::try_from(fs::metadata(path)?.len()).unwrap_or(usize::MAX);

    let transform = meta.display_transform();
    let (display_width, display_height) = meta.display_dimensions();

    if ctx.json {
        let output = json!({
            "path": path,
            "metadata": meta,
            "display_width": display_width,
            "display_height": display_height,
            "transform": transform.css(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header(&path.display().to_string());
    println!("  {:<13} {}x{}", "Stored:", meta.width, meta.height);
    println!("  {:<13} {}x{}", "Displayed:", display_width, display_height);
    match meta.orientation {
        Some(o) => println!("  {:<13} {}", "Orientation:", o),
        None => println!("  {:<13} unknown", "Orientation:"),
    }
    println!("  {:<13} {}", "Transform:", transform.css());
    println!("  {:<13} {}", "Size:", format_size(meta.size_bytes as u64));

    Ok(())
}

/// Frame header is usually inside the prefix; large EXIF thumbnails can push it out.
fn load(ctx: &Context, path: &Path) -> Result<ImageMetadata> {
    let header = read_header_from_path(path, ctx.config.schema.scan.header_bytes)
        .map_err(|e| image_error(e, path))?;
    if let Some(meta) = extract_metadata(&header) {
        return Ok(meta);
    }

    tracing::debug!(path = %path.display(), "Frame header not in prefix, reading whole file");
    let data = fs::read(path)?;
    extract_metadata(&data).ok_or_else(|| {
        Error::new(
            ErrorCode::InvalidFormat,
            format!("No JPEG frame header found in {}", path.display()),
        )
    })
}
