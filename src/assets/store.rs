use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::decode_image,
    foundation::error::{FramewrightError, FramewrightResult},
    scene::model::SceneGraph,
};

#[derive(Clone, Debug)]
/// Decoded still image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug, Default)]
/// Immutable set of decoded images keyed by the `href` used in scene graphs.
pub struct ImageStore {
    root: PathBuf,
    images: HashMap<String, PreparedImage>,
}

impl ImageStore {
    /// Empty store resolving relative hrefs against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Read and decode every href once. Relative hrefs resolve against `root`.
    ///
    /// All IO happens here so rasterization stays IO-free.
    #[tracing::instrument(skip(hrefs, root))]
    pub fn prepare<'a>(
        hrefs: impl IntoIterator<Item = &'a str>,
        root: impl Into<PathBuf>,
    ) -> FramewrightResult<Self> {
        let mut out = Self::new(root);
        for href in hrefs {
            if out.images.contains_key(href) {
                continue;
            }
            let bytes = out.read_bytes(href)?;
            let image = decode_image(&bytes)
                .with_context(|| format!("decode image '{}'", out.resolve(href).display()))
                .map_err(FramewrightError::from)?;
            tracing::debug!(href, width = image.width, height = image.height, "decoded image");
            out.images.insert(href.to_owned(), image);
        }
        Ok(out)
    }

    /// Prepare every image referenced by `scene`.
    pub fn prepare_scene(scene: &SceneGraph, root: impl Into<PathBuf>) -> FramewrightResult<Self> {
        Self::prepare(scene.image_hrefs(), root)
    }

    /// Register an already decoded image.
    pub fn insert(&mut self, href: impl Into<String>, image: PreparedImage) {
        self.images.insert(href.into(), image);
    }

    /// Directory relative hrefs resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of distinct images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when no image is stored.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// True when `href` was prepared.
    pub fn contains(&self, href: &str) -> bool {
        self.images.contains_key(href)
    }

    /// Look up a prepared image; a missing one is a `Render` error.
    pub fn get(&self, href: &str) -> FramewrightResult<&PreparedImage> {
        self.images
            .get(href)
            .ok_or_else(|| FramewrightError::render(format!("image '{href}' was not prepared")))
    }

    fn resolve(&self, href: &str) -> PathBuf {
        // Absolute hrefs replace the root.
        self.root.join(Path::new(href))
    }

    fn read_bytes(&self, href: &str) -> FramewrightResult<Vec<u8>> {
        let path = self.resolve(href);
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(FramewrightError::from)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
