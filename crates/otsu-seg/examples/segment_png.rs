//! Segment a grayscale PNG and write a JSON report.
//!
//! Usage: `cargo run --example segment_png -- <image.png> [report.json]`

use std::{env, fs, path::PathBuf};

use image::ImageReader;
use log::{info, warn, LevelFilter};
use serde::Serialize;

use otsu_seg::core::init_with_level;
use otsu_seg::{
    label_regions, AutoSegmentation, GrayImageView, ImageGeometry, PipelinedSegmenter, Region,
    RegionParams, Segmenter,
};

#[derive(Debug, Serialize)]
struct Report {
    image_path: String,
    geometry: ImageGeometry,
    auto: AutoSegmentation,
    regions: Vec<Region>,
    total_foreground: u32,
    truncated: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let mut args = env::args().skip(1);
    let image_path = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: segment_png <image.png> [report.json]")?;
    let report_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tmpdata/segment_report.json"));

    let img = ImageReader::open(&image_path)?.decode()?.to_luma8();
    let geometry = ImageGeometry::new(img.width() as usize, img.height() as usize);
    let view = GrayImageView::new(geometry, img.as_raw())?;
    info!("loaded {} ({geometry})", image_path.display());

    let mut engine = PipelinedSegmenter::new(geometry);
    let (mask, auto) = engine.segment_auto(&view)?;
    info!(
        "mode {}: threshold {} keeps {} foreground pixels",
        auto.result.mode_used, auto.result.threshold, auto.result.foreground_pixels
    );

    let analysis = label_regions(&mask, &RegionParams::default());
    analysis.log_summary();
    if analysis.truncated {
        warn!("region list truncated at the cap");
    }

    let report = Report {
        image_path: image_path.to_string_lossy().into_owned(),
        geometry,
        auto,
        regions: analysis.regions.clone(),
        total_foreground: analysis.total_foreground,
        truncated: analysis.truncated,
    };
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
    println!("wrote report JSON to {}", report_path.display());
    Ok(())
}
