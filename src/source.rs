use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use raylib::prelude::*;

use crate::error::{KenBurnsError, KenBurnsResult};

/// Pixel dimensions of something the view can show.
pub trait ImageSize {
    fn size(&self) -> Vector2;
}

/// Images that can be loaded straight from a file path.
pub trait FromPath: Sized {
    fn from_path(path: &Path) -> KenBurnsResult<Self>;
}

/// Pull-based image supply. Queried lazily, one index at a time.
pub trait KenBurnsDatasource<I> {
    fn number_of_images(&self) -> usize;

    /// `None` marks the image as unavailable, the view skips it.
    fn image_at(&self, index: usize) -> Option<I>;
}

impl ImageSize for Image {
    fn size(&self) -> Vector2 {
        Vector2::new(self.width() as f32, self.height() as f32)
    }
}

/// Where the images of the current run come from. Exactly one is active.
pub(crate) enum ImageSource<I> {
    Images(Vec<Rc<I>>),
    Paths {
        paths: Vec<PathBuf>,
        load: fn(&Path) -> KenBurnsResult<I>,
    },
    Datasource {
        datasource: Weak<dyn KenBurnsDatasource<I>>,
        count: usize,
    },
}

impl<I> ImageSource<I> {
    pub(crate) fn len(&self) -> usize {
        match self {
            ImageSource::Images(images) => images.len(),
            ImageSource::Paths { paths, .. } => paths.len(),
            ImageSource::Datasource { count, .. } => *count,
        }
    }

    pub(crate) fn resolve(&self, index: usize) -> KenBurnsResult<Rc<I>> {
        match self {
            ImageSource::Images(images) => images
                .get(index)
                .cloned()
                .ok_or_else(|| KenBurnsError::unresolvable(index, "index out of range")),
            ImageSource::Paths { paths, load } => {
                let path = paths
                    .get(index)
                    .ok_or_else(|| KenBurnsError::unresolvable(index, "index out of range"))?;
                load(path)
                    .map(Rc::new)
                    .map_err(|e| KenBurnsError::unresolvable(index, e.to_string()))
            }
            ImageSource::Datasource { datasource, .. } => {
                let datasource = datasource
                    .upgrade()
                    .ok_or_else(|| KenBurnsError::unresolvable(index, "datasource was dropped"))?;
                datasource
                    .image_at(index)
                    .map(Rc::new)
                    .ok_or_else(|| KenBurnsError::unresolvable(index, "datasource returned no image"))
            }
        }
    }
}
