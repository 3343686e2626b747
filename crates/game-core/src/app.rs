use std::collections::HashSet;

use super::{GolemGame, Transition};
use crate::input::{EdgeTracker, InputFrame};
use bracket_lib::prelude::*;

/// bracket-lib state wrapper: samples input, runs the game, draws it.
pub struct GolemApp {
    game: GolemGame,
    tracker: EdgeTracker,
}

impl GolemApp {
    pub fn new(game: GolemGame) -> Self {
        Self {
            game,
            tracker: EdgeTracker::default(),
        }
    }

    /// Reads held keys and the mouse for this tick.
    fn sample(&mut self, ctx: &BTerm) -> InputFrame {
        let tracked = self.game.keys.tracked();
        let (held, down) = {
            let input = INPUT.lock();
            let held: HashSet<VirtualKeyCode> = input
                .key_pressed_set()
                .iter()
                .copied()
                .filter(|k| tracked.contains(k))
                .collect();
            (held, input.is_mouse_button_pressed(0))
        };
        let (x, y) = ctx.mouse_pos();
        let pointer = ui::Pointer {
            x,
            y,
            down,
            clicked: ctx.left_click,
        };
        self.tracker.advance(held, pointer)
    }

    /// Returns `true` when the app should quit.
    fn update_state(&mut self, frame: &InputFrame) -> bool {
        self.game.update(frame) == Transition::Quit
    }
}

impl GameState for GolemApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let frame = self.sample(ctx);
        if self.update_state(&frame) {
            ctx.quit();
            return;
        }
        self.game.draw(ctx);
    }
}
