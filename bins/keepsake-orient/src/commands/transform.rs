//! Transform command - display transform for an orientation code

use super::Context;
use keepsake_core::{Error, Result};
use keepsake_image::Orientation;
use serde_json::json;

/// Run transform command
pub fn run(ctx: &Context, code: u16) -> Result<()> {
    let orientation = Orientation::try_from(code).map_err(|e| {
        Error::validation(e).with_suggestion("EXIF orientation codes run from 1 to 8")
    })?;
    let transform = orientation.display_transform();

    if ctx.json {
        let output = json!({
            "code": orientation.to_exif(),
            "description": orientation.description(),
            "transform": transform.css(),
            "degrees": transform.degrees(),
            "mirrored": transform.is_mirrored(),
            "swaps_dimensions": transform.swaps_dimensions(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", transform.css());
    Ok(())
}
