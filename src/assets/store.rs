use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::foundation::error::{MazeError, MazeResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Build a single-color image, handy for tests and placeholder themes.
    pub fn solid(width: u32, height: u32, rgba_premul: [u8; 4]) -> Self {
        let px = (width as usize).saturating_mul(height as usize);
        let mut bytes = Vec::with_capacity(px.saturating_mul(4));
        for _ in 0..px {
            bytes.extend_from_slice(&rgba_premul);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        }
    }
}

/// Themed textures, one per cell role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetSlot {
    /// Wall texture (stone bricks).
    Wall,
    /// Empty passage texture (dirt path).
    Floor,
    /// Frontier texture (ender pearl).
    Frontier,
    /// Dead-end texture (grass).
    DeadEnd,
    /// Final path texture (bricks).
    Path,
    /// Start marker sprite (Steve).
    Start,
    /// End marker sprite (chest).
    End,
}

impl AssetSlot {
    /// Every slot.
    pub const ALL: [Self; 7] = [
        Self::Wall,
        Self::Floor,
        Self::Frontier,
        Self::DeadEnd,
        Self::Path,
        Self::Start,
        Self::End,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Floor => 1,
            Self::Frontier => 2,
            Self::DeadEnd => 3,
            Self::Path => 4,
            Self::Start => 5,
            Self::End => 6,
        }
    }

    /// Conventional file name inside a theme directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Wall => "Minecraft-Stone-Bricks.jpg",
            Self::Floor => "Minecraft-Dirt-Path.webp",
            Self::Frontier => "Minecraft-Ender-Pearl.png",
            Self::DeadEnd => "Minecraft-Grass.png",
            Self::Path => "Minecraft-Bricks.jpg",
            Self::Start => "Minecraft-Steve.jpeg",
            Self::End => "Minecraft-Chest.jpeg",
        }
    }
}

/// Theme textures with per-slot readiness.
///
/// A slot is "ready" once an image has been installed; readiness never reverts. Rendering never
/// waits on a slot, it falls back to flat fills instead.
#[derive(Clone, Debug, Default)]
pub struct ThemeAssets {
    slots: [Option<PreparedImage>; 7],
}

impl ThemeAssets {
    /// Theme with nothing loaded; everything renders with fallback fills.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` once `slot` has an image.
    pub fn is_ready(&self, slot: AssetSlot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Image for `slot`, if loaded.
    pub fn get(&self, slot: AssetSlot) -> Option<&PreparedImage> {
        self.slots[slot.index()].as_ref()
    }

    /// Install a decoded image for `slot`.
    pub fn install(&mut self, slot: AssetSlot, image: PreparedImage) -> MazeResult<()> {
        let expected = (image.width as usize)
            .saturating_mul(image.height as usize)
            .saturating_mul(4);
        if image.width == 0 || image.height == 0 || image.rgba8_premul.len() != expected {
            return Err(MazeError::validation(format!(
                "asset {slot:?} has inconsistent dimensions {}x{} for {} bytes",
                image.width,
                image.height,
                image.rgba8_premul.len()
            )));
        }
        self.slots[slot.index()] = Some(image);
        Ok(())
    }

    /// Decode encoded bytes and install them for `slot`.
    pub fn install_encoded(&mut self, slot: AssetSlot, bytes: &[u8]) -> MazeResult<()> {
        let image = decode_image(bytes)?;
        self.install(slot, image)
    }

    /// Load every slot whose conventional file exists under `dir`.
    ///
    /// Missing or undecodable files are logged and skipped; those slots stay on fallback
    /// rendering. Returns the slots that were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Vec<AssetSlot> {
        let mut loaded = Vec::new();
        for slot in AssetSlot::ALL {
            let path = dir.join(slot.file_name());
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(slot = ?slot, path = %path.display(), "theme asset unavailable: {e}");
                    continue;
                }
            };
            match self.install_encoded(slot, &bytes) {
                Ok(()) => loaded.push(slot),
                Err(e) => {
                    tracing::warn!(slot = ?slot, path = %path.display(), "theme asset rejected: {e}");
                }
            }
        }
        loaded
    }

    /// Number of ready slots.
    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
