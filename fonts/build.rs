use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use zip::ZipArchive;

const ZIP_URL: &str = "https://github.com/adobe-fonts/source-han-sans/releases/download/2.005R/09_SourceHanSansSC.zip";
const ZIP_MEMBER: &str = "SourceHanSansSC-Regular.otf";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FONT_TTF");
    println!("cargo:rerun-if-env-changed=FONTS_DOWNLOAD");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let target_font = out_dir.join("embedded-font.otf");

    // Explicit font always wins.
    if let Ok(path) = env::var("FONT_TTF") {
        match fs::copy(&path, &target_font) {
            Ok(_) => return,
            Err(e) => println!("cargo:warning=failed to copy FONT_TTF {path}: {e}"),
        }
    }

    // Incremental build with a real font already in place.
    if fs::metadata(&target_font).map(|m| m.len() > 0).unwrap_or(false) {
        return;
    }

    // The browser has no system fonts, so wasm builds must embed a real one.
    let wasm = env::var("CARGO_CFG_TARGET_ARCH").as_deref() == Ok("wasm32");
    let download = match env::var("FONTS_DOWNLOAD").as_deref() {
        Ok("1") => true,
        Ok("0") => false,
        _ => wasm,
    };
    if download {
        match download_and_extract(&out_dir, &target_font) {
            Ok(()) => return,
            Err(e) => println!("cargo:warning=font download failed: {e}"),
        }
    }
    if wasm {
        panic!("wasm builds need an embedded font. Provide FONT_TTF or allow network.");
    }

    // Native builds fall back to system fonts at run time.
    fs::write(&target_font, []).expect("write empty font placeholder");
}

fn download_and_extract(out_dir: &Path, target_font: &Path) -> Result<(), String> {
    let zip_path = out_dir.join("SourceHanSansSC.zip");
    let zip_str = zip_path.to_str().ok_or("non-utf8 OUT_DIR")?;
    let fetched = Command::new("curl")
        .args(["-L", "-f", "--max-time", "120", "-o", zip_str, ZIP_URL])
        .status()
        .map(|st| st.success())
        .unwrap_or(false)
        || Command::new("wget")
            .args(["-O", zip_str, ZIP_URL])
            .status()
            .map(|st| st.success())
            .unwrap_or(false);
    if !fetched {
        return Err(format!("could not fetch {ZIP_URL}"));
    }

    let mut data = Vec::new();
    fs::File::open(&zip_path)
        .and_then(|mut f| f.read_to_end(&mut data))
        .map_err(|e| format!("zip read: {e}"))?;
    let mut zip =
        ZipArchive::new(std::io::Cursor::new(data)).map_err(|e| format!("zip parse: {e}"))?;
    for i in 0..zip.len() {
        let mut file = zip.by_index(i).map_err(|e| format!("zip entry: {e}"))?;
        if file.name().ends_with(ZIP_MEMBER) {
            let mut buf = Vec::new();
            std::io::copy(&mut file, &mut buf).map_err(|e| format!("extract: {e}"))?;
            fs::write(target_font, &buf).map_err(|e| format!("write font: {e}"))?;
            return Ok(());
        }
    }
    Err(format!("{ZIP_MEMBER} not found in archive"))
}
