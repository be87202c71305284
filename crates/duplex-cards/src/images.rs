use crate::raster::{FlatImage, flatten_image};
use crate::types::{Card, CardError, ImageRef, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Encoded image bytes keyed by `ImageRef::key`, read before a render pass.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: HashMap<String, Vec<u8>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(key.into(), bytes);
    }

    pub fn get(&self, image: &ImageRef) -> Option<&[u8]> {
        self.images.get(&image.key()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decode one image for drawing. The result is meant to be dropped
    /// right after the draw call.
    pub fn decode(&self, image: &ImageRef) -> Result<FlatImage> {
        let bytes = self
            .get(image)
            .ok_or_else(|| CardError::ImageUnavailable(image.key()))?;
        flatten_image(bytes).map_err(|e| match e {
            CardError::ImageUnavailable(reason) => {
                CardError::ImageUnavailable(format!("{}: {reason}", image.key()))
            }
            other => other,
        })
    }

    /// Read every image the deck references, relative to `base_dir`.
    ///
    /// Files that cannot be read are left out; the renderer draws a
    /// placeholder for them.
    pub async fn preload(cards: &[Card], base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let refs: BTreeMap<String, PathBuf> = cards
            .iter()
            .filter_map(|card| card.image.as_ref())
            .map(|image| (image.key(), base_dir.join(image.relative_path())))
            .collect();

        let mut store = Self::new();
        for (key, path) in refs {
            match tokio::fs::read(&path).await {
                Ok(bytes) => store.insert(key, bytes),
                Err(e) => log::warn!("Image {} unavailable: {e}", path.display()),
            }
        }

        log::debug!("Preloaded {} image(s)", store.len());
        store
    }
}
