//! Read command - orientation of a single photo

use super::{image_error, Context};
use keepsake_core::Result;
use keepsake_image::{read_header_from_path, ScanResult};
use keepsake_telemetry::metrics;
use std::path::Path;

/// Run read command
///
/// An unknown orientation is a normal outcome and exits 0.
pub fn run(ctx: &Context, path: &Path, header_bytes: Option<usize>, explain: bool) -> Result<()> {
    let limit = ctx.header_bytes(header_bytes)?;
    let data = read_header_from_path(path, limit).map_err(|e| image_error(e, path))?;
    let result = ScanResult::from_bytes(path, &data);

    if result.orientation.is_some() {
        metrics().increment("orientation.found");
    } else {
        metrics().increment("orientation.unknown");
    }
    tracing::info!(
        path = %path.display(),
        bytes = data.len(),
        orientation = ?result.orientation,
        "Read orientation"
    );

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.orientation {
        Some(orientation) => println!("{:<12} {}", "Orientation:", orientation),
        None => println!("{:<12} unknown", "Orientation:"),
    }
    println!("{:<12} {}", "Transform:", result.transform);

    if explain {
        if let Some(reason) = &result.reason {
            println!("{:<12} {}", "Reason:", reason);
        }
    }

    Ok(())
}
