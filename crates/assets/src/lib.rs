//! Asset catalog loading for Golem Knight.
//!
//! Images are described by name in `assets/catalog.json`. Native builds read
//! the file from disk, WASM builds use the copy embedded at compile time.

use std::collections::HashMap;
use std::sync::Arc;

use common::{GameError, GameResult};
use serde::Deserialize;

pub const PLAYER: &str = "player";
pub const ENEMY: &str = "enemy";
pub const BUTTON_IDLE: &str = "button-idle";
pub const BUTTON_HOVER: &str = "button-hover";
pub const BUTTON_PRESSED: &str = "button-pressed";
pub const BUTTON_DISABLED: &str = "button-disabled";
pub const HUD_FONT: &str = "hud";

/// Drawable image for a sprite. The `width`/`height` box is used for collisions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteImage {
    pub name: String,
    pub glyph: char,
    pub fg: [u8; 3],
    pub bg: [u8; 3],
    pub width: i32,
    pub height: i32,
}

/// Bitmap font used by the console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub name: String,
    pub file: String,
    pub tile_width: u32,
    pub tile_height: u32,
}

#[derive(Deserialize)]
struct RawImage {
    glyph: char,
    fg: [u8; 3],
    bg: [u8; 3],
    width: i32,
    height: i32,
}

#[derive(Deserialize)]
struct RawFont {
    file: String,
    tile_width: u32,
    tile_height: u32,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    sprites: HashMap<String, RawImage>,
    #[serde(default)]
    fonts: HashMap<String, RawFont>,
}

/// Named images and fonts available to the game.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    images: HashMap<String, Arc<SpriteImage>>,
    fonts: HashMap<String, FontFace>,
}

impl AssetCatalog {
    /// Returns the image registered under `name`.
    pub fn image(&self, name: &str) -> GameResult<Arc<SpriteImage>> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::MissingAsset(name.to_string()))
    }

    /// Returns the font face registered under `name`.
    pub fn font(&self, name: &str) -> GameResult<&FontFace> {
        self.fonts
            .get(name)
            .ok_or_else(|| GameError::MissingAsset(name.to_string()))
    }
}

/// Loads an [`AssetCatalog`] from the given JSON file path.
pub fn load_catalog(path: &str) -> GameResult<AssetCatalog> {
    let data = std::fs::read_to_string(path)?;
    parse_catalog(&data)
}

/// Loads the [`AssetCatalog`] embedded at compile time (used on WASM).
pub fn load_catalog_embedded() -> GameResult<AssetCatalog> {
    parse_catalog(include_str!("../../../assets/catalog.json"))
}

/// Parses and validates catalog JSON.
pub fn parse_catalog(data: &str) -> GameResult<AssetCatalog> {
    let raw: RawCatalog =
        serde_json::from_str(data).map_err(|e| GameError::Parse(e.to_string()))?;

    let mut images = HashMap::with_capacity(raw.sprites.len());
    for (name, img) in raw.sprites {
        if img.width <= 0 || img.height <= 0 {
            return Err(GameError::InvalidAsset {
                name,
                reason: format!("non-positive size {}x{}", img.width, img.height),
            });
        }
        let image = SpriteImage {
            name: name.clone(),
            glyph: img.glyph,
            fg: img.fg,
            bg: img.bg,
            width: img.width,
            height: img.height,
        };
        images.insert(name, Arc::new(image));
    }

    let mut fonts = HashMap::with_capacity(raw.fonts.len());
    for (name, font) in raw.fonts {
        if font.file.trim().is_empty() {
            return Err(GameError::FontFace {
                name,
                reason: "empty font file name".to_string(),
            });
        }
        if font.tile_width == 0 || font.tile_height == 0 {
            return Err(GameError::FontFace {
                name,
                reason: format!("tile size {}x{}", font.tile_width, font.tile_height),
            });
        }
        fonts.insert(
            name.clone(),
            FontFace {
                name,
                file: font.file,
                tile_width: font.tile_width,
                tile_height: font.tile_height,
            },
        );
    }

    log::debug!("loaded {} images and {} fonts", images.len(), fonts.len());
    Ok(AssetCatalog { images, fonts })
}
