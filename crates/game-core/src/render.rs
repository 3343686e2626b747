use super::*;
use assets::FontFace;

const HUD_TEXT: common::Point = common::Point { x: 20, y: 40 };

/// Maps the pixel play field onto console cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub tile_width: i32,
    pub tile_height: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Screen {
    pub fn new(field: Bounds, font: &FontFace) -> Self {
        let tile_width = font.tile_width as i32;
        let tile_height = font.tile_height as i32;
        Self {
            tile_width,
            tile_height,
            cols: (field.width + tile_width - 1) / tile_width,
            rows: (field.height + tile_height - 1) / tile_height,
        }
    }

    /// Cell containing the pixel `p`.
    pub fn to_cell(&self, p: common::Point) -> (i32, i32) {
        (p.x / self.tile_width, p.y / self.tile_height)
    }

    /// Cells covered by a sprite; partially covered cells are included.
    pub fn sprite_rect(&self, sprite: &Sprite) -> Rect {
        let b = sprite.aabb();
        let (x1, y1) = self.to_cell(common::Point::new(b.x, b.y));
        let x2 = (b.x + b.w + self.tile_width - 1) / self.tile_width;
        let y2 = (b.y + b.h + self.tile_height - 1) / self.tile_height;
        Rect::with_exact(x1, y1, x2, y2)
    }
}

impl GolemGame {
    /// Draws the play field once, then the overlay when the round is over.
    pub(crate) fn draw(&self, ctx: &mut BTerm) {
        let background = RGB::named(CRIMSON);
        ctx.cls_bg(background);
        draw_sprite(ctx, &self.screen, &self.player);
        for enemy in &self.enemies {
            draw_sprite(ctx, &self.screen, enemy);
        }
        let (x, y) = self.screen.to_cell(HUD_TEXT);
        ui::draw_score(ctx, x, y, self.score, background);
        if self.mode == GameMode::RoundComplete {
            self.overlay.draw(ctx);
        }
    }
}

fn draw_sprite(ctx: &mut BTerm, screen: &Screen, sprite: &Sprite) {
    let img = &sprite.image;
    ctx.fill_region(
        screen.sprite_rect(sprite),
        to_cp437(img.glyph),
        RGB::from_u8(img.fg[0], img.fg[1], img.fg[2]),
        RGB::from_u8(img.bg[0], img.bg[1], img.bg[2]),
    );
}
