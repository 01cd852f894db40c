//! `sheetmark-inspect`: print how a saved payload projects onto a page.
//!
//! Usage:
//!
//! ```text
//! sheetmark-inspect <payload.json> <width> <height> [--config path] [--rotation deg] [--page n]
//! ```
//!
//! Reads a save payload, loads it against a page of the given natural size
//! and prints the selected page's boxes in view space as JSON.

use sheetmark::geom::{DocSize, Rotation};
use sheetmark::{Editor, EditorConfig, Error, Result, SavePayload};
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Args {
    payload: PathBuf,
    width: f64,
    height: f64,
    config: Option<PathBuf>,
    rotation: Option<Rotation>,
    page: u32,
}

const USAGE: &str = "usage: sheetmark-inspect <payload.json> <width> <height> \
                     [--config path] [--rotation deg] [--page n]";

fn parse_number<T: std::str::FromStr>(name: &str, value: Option<String>) -> Result<T> {
    let Some(value) = value else {
        return Err(Error::invalid_config(format!("missing {}", name)));
    };
    value.parse().map_err(|_| {
        let message = format!("invalid {}: {}", name, value);
        Error::invalid_config(message)
    })
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut rotation = None;
    let mut page = 1;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| Error::invalid_config("missing --config path"))?;
                config = Some(PathBuf::from(path));
            }
            "--rotation" => {
                let degrees = parse_number("--rotation", args.next())?;
                rotation = Some(Rotation::from_degrees(degrees)?);
            }
            "--page" => page = parse_number("--page", args.next())?,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let payload = positional
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::invalid_config(USAGE))?;
    let width = parse_number("width", positional.next())?;
    let height = parse_number("height", positional.next())?;

    Ok(Args {
        payload,
        width,
        height,
        config,
        rotation,
        page,
    })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path),
        None => Ok(EditorConfig::load_from_default_path()?.unwrap_or_default()),
    }
}

fn run(args: Args, config: EditorConfig) -> Result<String> {
    let json = std::fs::read_to_string(&args.payload)?;
    let payload = SavePayload::from_json(&json)?;
    let boxes = payload.boxes()?;
    let page_count = boxes.iter().map(|b| b.page).max().unwrap_or(1);

    let mut editor = Editor::new(config);
    editor.load_document_with_rotation(
        DocSize::new(args.width, args.height),
        page_count,
        boxes,
        payload.rotation(),
    )?;
    if let Some(rotation) = args.rotation {
        editor.set_rotation(rotation);
    }
    let page = editor.set_page(args.page);
    log::info!("Showing page {}/{}", page, editor.page_count());

    Ok(serde_json::to_string_pretty(&editor.view_boxes())?)
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match run(args, config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmark::geom::{CanonicalRect, GeomError};
    use sheetmark::{BBox, BoxKind};

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    fn write_payload(dir: &Path, boxes: &[BBox], rotation: Rotation) -> PathBuf {
        let path = dir.join("payload.json");
        let payload = SavePayload::from_boxes(boxes, rotation).unwrap();
        std::fs::write(&path, payload.to_json().unwrap()).unwrap();
        path
    }

    fn title_block() -> Vec<BBox> {
        vec![BBox::new(
            "title",
            BoxKind::Title,
            CanonicalRect::new(10.0, 20.0, 100.0, 50.0),
            1,
        )]
    }

    #[test]
    fn test_positional_arguments() {
        let parsed = args(&["p.json", "600", "800", "--page", "2"]).unwrap();
        assert_eq!(parsed.payload, PathBuf::from("p.json"));
        assert_eq!((parsed.width, parsed.height), (600.0, 800.0));
        assert_eq!(parsed.page, 2);
        assert!(parsed.rotation.is_none());
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_missing_positional_is_an_error() {
        assert!(matches!(args(&[]), Err(Error::InvalidConfig { .. })));
        assert!(matches!(
            args(&["p.json", "600"]),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            args(&["p.json", "wide", "800"]),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            args(&["p.json", "600", "800", "--config"]),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rotation_is_strict() {
        assert!(matches!(
            args(&["p.json", "600", "800", "--rotation", "45"]),
            Err(Error::Geom(GeomError::UnsupportedRotation(45)))
        ));
        let parsed = args(&["p.json", "600", "800", "--rotation", "-90"]).unwrap();
        assert_eq!(parsed.rotation, Some(Rotation::Deg270));
    }

    #[test]
    fn test_run_prints_rotated_view() {
        let dir = tempfile::tempdir().unwrap();
        let payload = write_payload(dir.path(), &title_block(), Rotation::Deg0);
        let path = payload.to_str().unwrap();

        let parsed = args(&[path, "600", "800", "--rotation", "90"]).unwrap();
        let output = run(parsed, EditorConfig::default()).unwrap();
        let view: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(view[0]["id"], "title");
        assert_eq!(view[0]["type"], "title");
        assert_eq!(view[0]["rect"]["x"], 730.0);
        assert_eq!(view[0]["rect"]["y"], 10.0);
        assert_eq!(view[0]["rect"]["width"], 50.0);
        assert_eq!(view[0]["rect"]["height"], 100.0);
    }

    #[test]
    fn test_run_uses_saved_rotation_and_clamps_page() {
        let dir = tempfile::tempdir().unwrap();
        let payload = write_payload(dir.path(), &title_block(), Rotation::Deg90);
        let path = payload.to_str().unwrap();

        let parsed = args(&[path, "600", "800", "--page", "7"]).unwrap();
        let output = run(parsed, EditorConfig::default()).unwrap();
        let view: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(view.as_array().map(Vec::len), Some(1));
        assert_eq!(view[0]["rect"]["x"], 730.0);
    }

    #[test]
    fn test_run_reports_missing_payload() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let parsed = args(&[missing.to_str().unwrap(), "600", "800"]).unwrap();
        assert!(matches!(
            run(parsed, EditorConfig::default()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"min_scale": 3.0, "max_scale": 2.0}"#).unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
