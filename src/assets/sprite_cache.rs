use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::assets::decode::{Sprite, decode_image, scale_to_sprite};
use crate::foundation::core::PixelSize;
use crate::foundation::error::{RenderError, RenderResult};

/// Cache key: asset path plus the exact target size. Different sizes never share an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    /// Resolved file path.
    pub path: PathBuf,
    /// Target size in pixels.
    pub size: PixelSize,
}

/// Memoizes decoded-and-scaled sprites for one pipeline instance.
///
/// Entries are created on first use and never evicted: the set of `(asset, size)` pairs is
/// fixed by the visual vocabulary of the game. Decoded base images are kept too, so a new
/// size for a known file only pays for the rescale.
#[derive(Debug)]
pub struct SpriteCache {
    graphics_root: PathBuf,
    bases: HashMap<PathBuf, Arc<image::RgbaImage>>,
    sprites: HashMap<SpriteKey, Arc<Sprite>>,
    decodes: u64,
}

impl SpriteCache {
    /// Cache resolving sprite names under `graphics_root`.
    pub fn new(graphics_root: impl Into<PathBuf>) -> Self {
        Self {
            graphics_root: graphics_root.into(),
            bases: HashMap::new(),
            sprites: HashMap::new(),
            decodes: 0,
        }
    }

    /// Directory sprite names are resolved against.
    pub fn graphics_root(&self) -> &Path {
        &self.graphics_root
    }

    /// `<graphics_root>/<name>.png`.
    pub fn sprite_path(&self, name: &str) -> PathBuf {
        self.graphics_root.join(format!("{name}.png"))
    }

    /// Sprite `name` scaled to `size`.
    pub fn get(&mut self, name: &str, size: PixelSize) -> RenderResult<Arc<Sprite>> {
        let path = self.sprite_path(name);
        self.get_path(path, size)
    }

    /// Sprite at `path` scaled to `size`; loads, scales and stores it on first request.
    pub fn get_path(&mut self, path: PathBuf, size: PixelSize) -> RenderResult<Arc<Sprite>> {
        let key = SpriteKey { path, size };
        if let Some(sprite) = self.sprites.get(&key) {
            tracing::trace!(path = %key.path.display(), w = size.w, h = size.h, "sprite cache hit");
            return Ok(Arc::clone(sprite));
        }

        tracing::debug!(path = %key.path.display(), w = size.w, h = size.h, "sprite cache miss");
        let base = self.base_image(&key.path)?;
        let sprite = Arc::new(scale_to_sprite(&base, size)?);
        self.sprites.insert(key, Arc::clone(&sprite));
        Ok(sprite)
    }

    fn base_image(&mut self, path: &Path) -> RenderResult<Arc<image::RgbaImage>> {
        if let Some(img) = self.bases.get(path) {
            return Ok(Arc::clone(img));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::asset(format!("read sprite '{}': {e}", path.display())))?;
        let img = decode_image(&bytes).map_err(|e| {
            RenderError::asset(format!("decode sprite '{}': {e}", path.display()))
        })?;
        self.decodes += 1;

        let img = Arc::new(img);
        self.bases.insert(path.to_path_buf(), Arc::clone(&img));
        Ok(img)
    }

    /// Number of cached `(path, size)` entries.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Return `true` when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Number of files decoded from disk so far.
    pub fn decode_count(&self) -> u64 {
        self.decodes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sprite_cache.rs"]
mod tests;
