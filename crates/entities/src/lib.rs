//! Sprites, wall clamping and collision sweeps.
use std::sync::Arc;

use assets::SpriteImage;
use bracket_lib::prelude::RandomNumberGenerator;
use common::{Bounds, Point};

/// Axis-aligned box in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Aabb {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap on both axes; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Positioned, drawable game object.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub image: Arc<SpriteImage>,
    pub pos: Point,
    pub vel: Point,
}

impl Sprite {
    /// Creates a resting sprite at `pos`.
    pub fn new(image: Arc<SpriteImage>, pos: Point) -> Self {
        Self {
            image,
            pos,
            vel: Point::ZERO,
        }
    }

    pub fn width(&self) -> i32 {
        self.image.width
    }

    pub fn height(&self) -> i32 {
        self.image.height
    }

    /// Bounding box at the current position.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width(), self.height())
    }

    /// Returns `true` when the two sprites' boxes overlap.
    pub fn collides(&self, other: &Sprite) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    /// Applies velocity, vertical axis first, clamping to `bounds`.
    ///
    /// A sprite that hits a wall stops dead: the velocity on the clamped axis
    /// is reset to zero.
    pub fn advance(&mut self, bounds: Bounds) {
        let (y, dy) = step_axis(self.pos.y, self.vel.y, self.height(), bounds.height);
        self.pos.y = y;
        self.vel.y = dy;
        let (x, dx) = step_axis(self.pos.x, self.vel.x, self.width(), bounds.width);
        self.pos.x = x;
        self.vel.x = dx;
    }
}

fn step_axis(pos: i32, vel: i32, size: i32, limit: i32) -> (i32, i32) {
    let next = pos + vel;
    if next <= 0 {
        (0, 0)
    } else if next + size > limit {
        ((limit - size).max(0), 0)
    } else {
        (next, vel)
    }
}

/// Removes every enemy overlapping `player` and returns how many were removed.
pub fn sweep_collisions(player: &Sprite, enemies: &mut Vec<Sprite>) -> u32 {
    let before = enemies.len();
    enemies.retain(|enemy| !player.collides(enemy));
    let hits = before - enemies.len();
    if hits > 0 {
        log::debug!("{} enemies hit, {} left", hits, enemies.len());
    }
    hits as u32
}

/// Spawns `count` resting enemies at random positions fully inside `bounds`.
pub fn spawn_wave(
    image: &Arc<SpriteImage>,
    count: usize,
    bounds: Bounds,
    rng: &mut RandomNumberGenerator,
) -> Vec<Sprite> {
    let max_x = (bounds.width - image.width).max(1);
    let max_y = (bounds.height - image.height).max(1);
    (0..count)
        .map(|_| {
            let pos = Point::new(rng.range(0, max_x), rng.range(0, max_y));
            Sprite::new(Arc::clone(image), pos)
        })
        .collect()
}
