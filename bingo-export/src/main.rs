use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bingo_core::{
    BackgroundImage, BingoTile, FontBook, ImageSource, PngExportSettings, RenderError,
    RenderMode, export_scale_for_target, item_image_file_name, render_board,
};
use flexi_logger::Logger;
use futures::executor::block_on;
use futures::future::pending;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportJob {
    dimension: usize,
    board: Vec<BingoTile>,
    settings: Option<PngExportSettings>,
    // Path to an image file, relative to the job file.
    background_image: Option<PathBuf>,
}

/// Item images read from `{dir}/{Stem}_detail.png`.
struct IconDir {
    dir: Option<PathBuf>,
}

impl ImageSource for IconDir {
    async fn fetch(&self, item: &str) -> bingo_core::Result<Vec<u8>> {
        let Some(dir) = &self.dir else {
            return Err(RenderError::Fetch(format!("no icon directory for '{item}'")));
        };
        let path = dir.join(item_image_file_name(item));
        fs::read(&path).map_err(|e| RenderError::Fetch(format!("{}: {e}", path.display())))
    }
}

fn load_background(job_path: &Path, image: &Path) -> Option<BackgroundImage> {
    let path = match job_path.parent() {
        Some(base) if image.is_relative() => base.join(image),
        _ => image.to_path_buf(),
    };
    match fs::read(&path) {
        Ok(bytes) => Some(BackgroundImage::new(path.display().to_string(), bytes)),
        Err(e) => {
            log::warn!("background image {} not read: {e}", path.display());
            None
        }
    }
}

fn parse_target(arg: Option<&str>) -> Result<Option<u32>, String> {
    arg.map(|s| {
        s.parse::<u32>()
            .map_err(|e| format!("invalid target_px '{s}': {e}"))
    })
    .transpose()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: bingo-export <board.json> <output.png> [target_px] [icons_dir]");
        std::process::exit(2);
    }
    let input = Path::new(&args[1]);
    let output = &args[2];
    let target = parse_target(args.get(3).map(String::as_str))?;
    let icons = IconDir {
        dir: args.get(4).map(PathBuf::from),
    };

    let txt = fs::read_to_string(input)?;
    let job: ExportJob = serde_json::from_str(&txt)?;
    let mut settings = job
        .settings
        .unwrap_or_else(|| PngExportSettings::for_dimension(job.dimension));
    if let Some(image) = &job.background_image {
        settings.background_image = load_background(input, image);
    }
    if let Some(t) = target {
        settings.export_scale = export_scale_for_target(job.dimension, &settings, t)?;
    }

    let fonts = FontBook::with_system_fonts();
    fonts.ensure_faces()?;
    let rendered = block_on(render_board(
        &job.board,
        job.dimension,
        &settings,
        RenderMode::Export,
        &fonts,
        &icons,
        pending(),
    ))?;
    if !rendered.missing_images.is_empty() {
        log::info!("{} item images missing", rendered.missing_images.len());
    }

    fs::write(output, rendered.to_png()?)?;
    log::info!("wrote {output} ({}x{})", rendered.width(), rendered.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_argument_must_be_a_pixel_count() {
        assert_eq!(parse_target(None), Ok(None));
        assert_eq!(parse_target(Some("2048")), Ok(Some(2048)));
        assert!(parse_target(Some("2048px")).is_err());
        assert!(parse_target(Some("-1")).is_err());
    }
}
