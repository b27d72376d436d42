use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::debug;

use crate::error::{KenBurnsError, KenBurnsResult};
use crate::source::FromPath;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> KenBurnsResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_image = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if is_image {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(KenBurnsError::EmptySource(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// EXIF orientation tag of an encoded image, 1 (upright) when absent.
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            debug!(error = %e, "no usable EXIF data");
            1
        }
    }
}

/// Clockwise quarter turns that bring an image with this EXIF orientation
/// upright. Mirrored orientations (2, 4, 5, 7) are left as is.
pub fn quarter_turns(orientation: u16) -> i32 {
    match orientation {
        3 => 2,  // Bottom-right (180 deg)
        6 => 1,  // Top-right (90 deg clockwise)
        8 => -1, // Bottom-left (90 deg counter-clockwise)
        _ => 0,
    }
}

// --- Load Image, Apply EXIF Rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> KenBurnsResult<Image> {
    let file_bytes = fs::read(image_path)?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // Only JPEG reliably carries orientation
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| KenBurnsError::decode(image_path, e.to_string()))?;

    let turns = quarter_turns(orientation);
    if turns < 0 {
        image.rotate_ccw();
    }
    for _ in 0..turns.max(0) {
        image.rotate_cw();
    }
    if turns != 0 {
        debug!(path = %image_path.display(), orientation, "applied EXIF rotation");
    }

    Ok(image)
}

impl FromPath for Image {
    fn from_path(path: &Path) -> KenBurnsResult<Self> {
        load_image_with_exif_rotation(path)
    }
}
