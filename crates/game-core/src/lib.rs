//! Game engine entry point.

mod app;
mod input;
mod render;

use bracket_lib::prelude::*;

use assets::AssetCatalog;
use common::{Action, Bounds, GameResult};
use entities::{spawn_wave, sweep_collisions, Sprite};
use ui::Overlay;

pub use app::GolemApp;
pub use input::{EdgeTracker, InputConfig, InputFrame};
pub use render::Screen;

const TITLE: &str = "Golem Knight The IV";
const GAME_WIDTH: i32 = 1400;
const GAME_HEIGHT: i32 = 700;
const FIELD: Bounds = Bounds {
    width: GAME_WIDTH,
    height: GAME_HEIGHT,
};
const PLAYER_SPEED: i32 = 5;
const PLAYER_START: common::Point = common::Point { x: 200, y: 300 };
const WAVE_SIZE: usize = 10;
const ROUND_SCORE: u32 = 10;
const CONFIG_PATH: &str = "golem.toml";

/// Current game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Playing,
    /// All enemies of the round are gone; the overlay is shown.
    RoundComplete,
}

/// What the app layer should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Game state: the player, the current enemy wave and the score.
pub struct GolemGame {
    player: Sprite,
    enemies: Vec<Sprite>,
    enemy_image: std::sync::Arc<assets::SpriteImage>,
    score: u32,
    mode: GameMode,
    overlay: Overlay,
    keys: InputConfig,
    screen: Screen,
    rng: RandomNumberGenerator,
}

impl GolemGame {
    /// Creates a new game with a fresh wave of enemies.
    pub fn new(
        catalog: &AssetCatalog,
        keys: InputConfig,
        mut rng: RandomNumberGenerator,
    ) -> GameResult<Self> {
        let player_image = catalog.image(assets::PLAYER)?;
        let enemy_image = catalog.image(assets::ENEMY)?;
        let font = catalog.font(assets::HUD_FONT)?;
        let screen = Screen::new(FIELD, font);
        let overlay = Overlay::new(catalog, screen.cols, screen.rows)?;
        let enemies = spawn_wave(&enemy_image, WAVE_SIZE, FIELD, &mut rng);
        Ok(Self {
            player: Sprite::new(player_image, PLAYER_START),
            enemies,
            enemy_image,
            score: 0,
            mode: GameMode::Playing,
            overlay,
            keys,
            screen,
            rng,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn enemies(&self) -> &[Sprite] {
        &self.enemies
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Runs one update step for the given input.
    pub fn update(&mut self, frame: &InputFrame) -> Transition {
        match self.mode {
            GameMode::Playing => {
                self.steer(frame);
                self.player.advance(FIELD);
                let hits = sweep_collisions(&self.player, &mut self.enemies);
                self.award(hits);
                Transition::Continue
            }
            GameMode::RoundComplete => {
                // Field is frozen, but key edges still drive velocity.
                self.steer(frame);
                let action = self
                    .overlay
                    .update(frame.pointer)
                    .or_else(|| self.shortcut(frame));
                match action {
                    Some(action) => self.apply(action),
                    None => Transition::Continue,
                }
            }
        }
    }

    /// Consumes a UI action.
    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::Quit => {
                log::info!("quit requested with score {}", self.score);
                Transition::Quit
            }
            Action::Restart if self.mode == GameMode::RoundComplete => {
                self.restart();
                Transition::Continue
            }
            Action::Restart => {
                log::debug!("restart ignored while playing");
                Transition::Continue
            }
        }
    }

    fn shortcut(&self, frame: &InputFrame) -> Option<Action> {
        if frame.pressed(self.keys.quit) {
            Some(Action::Quit)
        } else if frame.pressed(self.keys.restart) {
            Some(Action::Restart)
        } else {
            None
        }
    }

    fn steer(&mut self, frame: &InputFrame) {
        let keys = &self.keys;
        self.player.vel.y = axis_velocity(frame, keys.up, keys.down, self.player.vel.y);
        self.player.vel.x = axis_velocity(frame, keys.left, keys.right, self.player.vel.x);
    }

    fn award(&mut self, hits: u32) {
        if hits == 0 {
            return;
        }
        let before = self.score;
        self.score += hits;
        log::debug!("score {} -> {}", before, self.score);
        if self.score / ROUND_SCORE > before / ROUND_SCORE {
            log::info!("round complete with score {}", self.score);
            self.mode = GameMode::RoundComplete;
        }
    }

    fn restart(&mut self) {
        self.enemies = spawn_wave(&self.enemy_image, WAVE_SIZE, FIELD, &mut self.rng);
        self.overlay.reset();
        self.mode = GameMode::Playing;
        log::info!("new round started");
    }
}

/// Velocity for one axis: a fresh press wins, a release stops.
fn axis_velocity(
    frame: &InputFrame,
    negative: VirtualKeyCode,
    positive: VirtualKeyCode,
    current: i32,
) -> i32 {
    if frame.pressed(negative) {
        -PLAYER_SPEED
    } else if frame.pressed(positive) {
        PLAYER_SPEED
    } else if frame.released(negative) || frame.released(positive) {
        0
    } else {
        current
    }
}

fn load_assets() -> GameResult<AssetCatalog> {
    #[cfg(target_arch = "wasm32")]
    {
        assets::load_catalog_embedded()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/catalog.json");
        assets::load_catalog(path)
    }
}

fn load_keys() -> GameResult<InputConfig> {
    #[cfg(target_arch = "wasm32")]
    {
        Ok(InputConfig::default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        InputConfig::load(CONFIG_PATH)
    }
}

/// Runs the game loop using [`bracket-lib`].
pub fn run() -> BError {
    let catalog = load_assets()?;
    let font = catalog.font(assets::HUD_FONT)?.clone();
    let game = GolemGame::new(&catalog, load_keys()?, RandomNumberGenerator::new())?;
    let screen = game.screen().clone();
    log::info!(
        "starting {}x{} field on a {}x{} console",
        GAME_WIDTH,
        GAME_HEIGHT,
        screen.cols,
        screen.rows
    );

    let context = BTermBuilder::new()
        .with_title(TITLE)
        .with_dimensions(screen.cols, screen.rows)
        .with_tile_dimensions(font.tile_width, font.tile_height)
        .with_font(&font.file, font.tile_width, font.tile_height)
        .with_simple_console(screen.cols, screen.rows, &font.file)
        .with_advanced_input(true)
        .build()?;
    main_loop(context, GolemApp::new(game))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use ui::Pointer;

    pub(crate) fn game() -> GolemGame {
        let catalog = assets::load_catalog_embedded().expect("catalog");
        GolemGame::new(
            &catalog,
            InputConfig::default(),
            RandomNumberGenerator::seeded(3),
        )
        .expect("game")
    }

    fn image(w: i32, h: i32) -> Arc<assets::SpriteImage> {
        Arc::new(assets::SpriteImage {
            name: "box".into(),
            glyph: '#',
            fg: [0, 0, 0],
            bg: [0, 0, 0],
            width: w,
            height: h,
        })
    }

    fn enemy_at(x: i32, y: i32, w: i32, h: i32) -> Sprite {
        Sprite::new(image(w, h), common::Point::new(x, y))
    }

    pub(crate) fn press(keys: &[VirtualKeyCode]) -> InputFrame {
        InputFrame {
            just_pressed: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn release(keys: &[VirtualKeyCode]) -> InputFrame {
        InputFrame {
            just_released: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    /// Puts the player in a 50x50 box at the origin with no enemies around.
    fn boxed_player(game: &mut GolemGame) {
        game.player = Sprite::new(image(50, 50), common::Point::new(0, 0));
        game.enemies.clear();
    }

    #[test]
    fn new_game_starts_playing_with_full_wave() {
        let game = game();
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.enemies().len(), WAVE_SIZE);
        assert_eq!(game.score(), 0);
        assert_eq!(game.player().pos, PLAYER_START);
        assert_eq!(game.player().vel, common::Point::ZERO);
    }

    #[test]
    fn missing_player_image_fails() {
        let catalog = assets::parse_catalog(r#"{ "sprites": {} }"#).unwrap();
        let result = GolemGame::new(
            &catalog,
            InputConfig::default(),
            RandomNumberGenerator::seeded(0),
        );
        assert!(matches!(result, Err(common::GameError::MissingAsset(_))));
    }

    #[test]
    fn press_sets_velocity_and_release_stops() {
        let mut game = game();
        game.enemies.clear();
        game.update(&press(&[VirtualKeyCode::Right]));
        assert_eq!(game.player().vel.x, PLAYER_SPEED);
        assert_eq!(game.player().pos.x, PLAYER_START.x + PLAYER_SPEED);
        game.update(&idle());
        assert_eq!(game.player().pos.x, PLAYER_START.x + 2 * PLAYER_SPEED);
        game.update(&release(&[VirtualKeyCode::Right]));
        assert_eq!(game.player().vel.x, 0);
        assert_eq!(game.player().pos.x, PLAYER_START.x + 2 * PLAYER_SPEED);
    }

    #[test]
    fn axes_are_independent() {
        let mut game = game();
        game.enemies.clear();
        game.update(&press(&[VirtualKeyCode::Up, VirtualKeyCode::Left]));
        assert_eq!(game.player().vel, common::Point::new(-PLAYER_SPEED, -PLAYER_SPEED));
        game.update(&release(&[VirtualKeyCode::Left]));
        assert_eq!(game.player().vel, common::Point::new(0, -PLAYER_SPEED));
    }

    #[test]
    fn latest_press_on_axis_wins() {
        let mut game = game();
        game.enemies.clear();
        game.update(&press(&[VirtualKeyCode::Up]));
        game.update(&press(&[VirtualKeyCode::Down]));
        assert_eq!(game.player().vel.y, PLAYER_SPEED);
    }

    #[test]
    fn upward_press_at_top_keeps_player_at_zero() {
        let mut game = game();
        boxed_player(&mut game);
        game.update(&press(&[VirtualKeyCode::Up]));
        assert_eq!(game.player().pos.y, 0);
        assert_eq!(game.player().vel.y, 0);
    }

    #[test]
    fn overlapping_enemy_scores_and_is_removed() {
        let mut game = game();
        boxed_player(&mut game);
        game.enemies.push(enemy_at(40, 40, 50, 50));
        game.update(&idle());
        assert_eq!(game.score(), 1);
        assert!(game.enemies().is_empty());
    }

    #[test]
    fn edge_touching_enemy_is_ignored() {
        let mut game = game();
        boxed_player(&mut game);
        game.enemies.push(enemy_at(50, 0, 40, 40));
        game.update(&idle());
        assert_eq!(game.score(), 0);
        assert_eq!(game.enemies().len(), 1);
    }

    #[test]
    fn simultaneous_hits_each_count_once() {
        let mut game = game();
        boxed_player(&mut game);
        game.enemies.push(enemy_at(10, 10, 20, 20));
        game.enemies.push(enemy_at(30, 30, 20, 20));
        game.enemies.push(enemy_at(600, 600, 20, 20));
        game.update(&idle());
        assert_eq!(game.score(), 2);
        assert_eq!(game.enemies().len(), 1);
        game.update(&idle());
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn tenth_hit_completes_round_and_restart_refills() {
        let mut game = game();
        boxed_player(&mut game);
        game.score = 9;
        game.enemies.push(enemy_at(5, 5, 10, 10));
        game.update(&idle());
        assert_eq!(game.score(), 10);
        assert_eq!(game.mode(), GameMode::RoundComplete);

        assert_eq!(game.apply(Action::Restart), Transition::Continue);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.enemies().len(), WAVE_SIZE);
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn round_stays_playing_after_restart_at_same_score() {
        let mut game = game();
        boxed_player(&mut game);
        game.score = 10;
        game.update(&idle());
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn round_complete_freezes_the_field() {
        let mut game = game();
        boxed_player(&mut game);
        game.mode = GameMode::RoundComplete;
        game.enemies.push(enemy_at(5, 5, 10, 10));
        game.update(&press(&[VirtualKeyCode::Right]));
        assert_eq!(game.player().pos, common::Point::new(0, 0));
        assert_eq!(game.score(), 0);
        assert_eq!(game.enemies().len(), 1);
    }

    /// Ends a round while Right is held, leaving the player at x = 5.
    fn finish_round_moving_right(game: &mut GolemGame) {
        boxed_player(game);
        game.score = 9;
        game.enemies.push(enemy_at(5, 5, 10, 10));
        game.update(&press(&[VirtualKeyCode::Right]));
        assert_eq!(game.mode(), GameMode::RoundComplete);
        assert_eq!(game.player().vel.x, PLAYER_SPEED);
    }

    #[test]
    fn release_on_overlay_stops_player_after_restart() {
        let mut game = game();
        finish_round_moving_right(&mut game);
        game.update(&release(&[VirtualKeyCode::Right]));
        assert_eq!(game.player().vel.x, 0);

        game.apply(Action::Restart);
        game.enemies.clear();
        let start = game.player().pos;
        for _ in 0..10 {
            game.update(&idle());
        }
        assert_eq!(game.player().pos, start);
        assert_eq!(game.player().vel, common::Point::ZERO);
    }

    #[test]
    fn press_on_overlay_carries_into_next_round() {
        let mut game = game();
        boxed_player(&mut game);
        game.mode = GameMode::RoundComplete;
        game.update(&press(&[VirtualKeyCode::Down]));
        assert_eq!(game.player().pos, common::Point::new(0, 0));

        game.apply(Action::Restart);
        game.enemies.clear();
        game.update(&idle());
        assert_eq!(game.player().pos, common::Point::new(0, PLAYER_SPEED));
    }

    #[test]
    fn restart_key_in_round_complete() {
        let mut game = game();
        game.mode = GameMode::RoundComplete;
        game.enemies.clear();
        assert_eq!(game.update(&press(&[VirtualKeyCode::R])), Transition::Continue);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.enemies().len(), WAVE_SIZE);
    }

    #[test]
    fn quit_key_in_round_complete() {
        let mut game = game();
        game.mode = GameMode::RoundComplete;
        assert_eq!(game.update(&press(&[VirtualKeyCode::Q])), Transition::Quit);
    }

    #[test]
    fn overlay_click_restarts() {
        let mut game = game();
        game.mode = GameMode::RoundComplete;
        game.enemies.clear();
        let rect = game.overlay.button_rect(Action::Restart).unwrap();
        let frame = InputFrame {
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            pointer: Pointer {
                x: rect.x1,
                y: rect.y1,
                down: true,
                clicked: true,
            },
        };
        assert_eq!(game.update(&frame), Transition::Continue);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.enemies().len(), WAVE_SIZE);
    }

    #[test]
    fn restart_while_playing_is_ignored() {
        let mut game = game();
        game.enemies.truncate(4);
        assert_eq!(game.apply(Action::Restart), Transition::Continue);
        assert_eq!(game.enemies().len(), 4);
    }

    #[test]
    fn quit_is_reported_not_executed() {
        let mut game = game();
        assert_eq!(game.apply(Action::Quit), Transition::Quit);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn playing_all_ten_enemies_ends_round() {
        let mut game = game();
        boxed_player(&mut game);
        for i in 0..WAVE_SIZE as i32 {
            game.enemies.push(enemy_at(100 + i * 60, 0, 40, 40));
        }
        game.update(&press(&[VirtualKeyCode::Right]));
        let mut ticks = 0;
        while game.mode() == GameMode::Playing && ticks < 1000 {
            game.update(&idle());
            ticks += 1;
        }
        assert_eq!(game.mode(), GameMode::RoundComplete);
        assert_eq!(game.score(), ROUND_SCORE);
        assert!(game.enemies().is_empty());
    }
}
