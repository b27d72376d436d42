use std::path::PathBuf;

use kenburns::{FromPath, KenBurnsDatasource};
use raylib::prelude::*;
use tracing::warn;

/// Decodes `paths[index]` only when the view asks for it.
pub struct DirectoryDatasource {
    paths: Vec<PathBuf>,
}

impl DirectoryDatasource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl KenBurnsDatasource<Image> for DirectoryDatasource {
    fn number_of_images(&self) -> usize {
        self.paths.len()
    }

    fn image_at(&self, index: usize) -> Option<Image> {
        let path = self.paths.get(index)?;
        match Image::from_path(path) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load image");
                None
            }
        }
    }
}
