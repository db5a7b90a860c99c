//! Scan command - orientation of every photo under a folder

use super::Context;
use keepsake_cli::output::{format_count, format_duration, orientation_row, Status};
use keepsake_cli::progress::{file_progress, finish_success};
use keepsake_core::file_scanner::GalleryScanner;
use keepsake_core::{Result, ResultExt};
use keepsake_image::{scan_files, summarize, Orientation, ScanResult, ScanSummary};
use keepsake_telemetry::{metrics, Timer};
use serde::Serialize;
use std::path::Path;

/// Files handed to the parallel scanner between progress updates
const CHUNK_SIZE: usize = 64;

/// JSON output for scan
#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    results: &'a [ScanResult],
    summary: ScanSummary,
}

/// Run scan command
pub fn run(ctx: &Context, dir: &Path, header_bytes: Option<usize>) -> Result<()> {
    let limit = ctx.header_bytes(header_bytes)?;
    let paths = GalleryScanner::from_config(dir, &ctx.config.schema.scan)
        .and_then(|scanner| scanner.scan())
        .context("Scanning gallery")?;
    tracing::info!(dir = %dir.display(), files = paths.len(), "Discovered photos");

    let timer = Timer::start("scan.duration_ms");
    let pb = file_progress(paths.len() as u64, !ctx.json && !paths.is_empty());
    let mut results = Vec::with_capacity(paths.len());
    for chunk in paths.chunks(CHUNK_SIZE) {
        results.extend(scan_files(chunk, limit));
        pb.inc(chunk.len() as u64);
    }
    let elapsed = timer.stop();

    let summary = summarize(&results);
    metrics().increment_by("scan.files", summary.total as u64);
    metrics().increment_by("orientation.found", summary.oriented as u64);
    metrics().increment_by("orientation.unknown", summary.unknown as u64);
    metrics().increment_by("scan.failed", summary.failed as u64);

    if ctx.json {
        pb.finish_and_clear();
        let report = ScanReport {
            results: &results,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if paths.is_empty() {
        pb.finish_and_clear();
        Status::info(&format!("No photos found in {}", dir.display()));
        return Ok(());
    }

    let photos = |n| format_count(n, "photo", "photos");
    finish_success(
        &pb,
        &format!("Scanned {} in {}", photos(summary.total), format_duration(elapsed)),
    );

    Status::header(&format!("Orientation of {}", dir.display()));
    for result in &results {
        let path = result.path.display().to_string();
        match &result.error {
            Some(error) => Status::warning(&format!("{}: {}", path, error)),
            None => {
                let code = result.orientation.map(Orientation::to_exif);
                println!("{}", orientation_row(code, &result.transform, &path));
            }
        }
    }

    println!();
    Status::success(&format!(
        "{} scanned, {} need a transform",
        photos(summary.total),
        summary.rotated
    ));
    if summary.unknown > 0 {
        Status::info(&format!("{} with unknown orientation", photos(summary.unknown)));
    }
    if summary.failed > 0 {
        Status::warning(&format!("{} could not be read", photos(summary.failed)));
    }

    Ok(())
}
