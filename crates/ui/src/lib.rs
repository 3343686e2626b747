//! HUD text and the round-complete overlay.
//!
//! The overlay is a small retained widget tree. Widgets never act on the game
//! directly: clicking a button yields the [`Action`] it was built with and the
//! caller decides what to do with it.
use std::sync::Arc;

use assets::{AssetCatalog, SpriteImage};
use bracket_lib::prelude::{to_cp437, BTerm, Point, Rect, RGB, WHITE};
use common::{Action, GameResult};

const PANEL_WIDTH: i32 = 64;
const PADDING: i32 = 2;
const SPACING: i32 = 2;
const BUTTON_HEIGHT: i32 = 3;
const LABEL_HEIGHT: i32 = 1;

pub const QUIT_TEXT: &str = "Exit the game";
pub const RESTART_TEXT: &str = "Play again";
pub const ROUND_MESSAGE: &str = "Pheeeeew!! They're all dead. I really need to retire....";

/// Pointer state sampled once per tick, in console cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    /// Left button held.
    pub down: bool,
    /// Left button went down this tick.
    pub clicked: bool,
}

/// Visual state of a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Hover,
    Pressed,
    Disabled,
}

/// Images for each [`ButtonState`].
#[derive(Clone, Debug)]
pub struct ButtonImage {
    pub idle: Arc<SpriteImage>,
    pub hover: Arc<SpriteImage>,
    pub pressed: Arc<SpriteImage>,
    pub disabled: Arc<SpriteImage>,
}

impl ButtonImage {
    /// Looks up all four button images; any missing one is an error.
    pub fn from_catalog(catalog: &AssetCatalog) -> GameResult<Self> {
        Ok(Self {
            idle: catalog.image(assets::BUTTON_IDLE)?,
            hover: catalog.image(assets::BUTTON_HOVER)?,
            pressed: catalog.image(assets::BUTTON_PRESSED)?,
            disabled: catalog.image(assets::BUTTON_DISABLED)?,
        })
    }

    fn for_state(&self, state: ButtonState) -> &SpriteImage {
        match state {
            ButtonState::Idle => &self.idle,
            ButtonState::Hover => &self.hover,
            ButtonState::Pressed => &self.pressed,
            ButtonState::Disabled => &self.disabled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Button {
    pub text: String,
    pub action: Action,
    // None of the overlay buttons is disabled today; the disabled look is
    // loaded so the button image set is complete.
    enabled: bool,
    rect: Rect,
    state: ButtonState,
}

impl Button {
    pub fn new(text: &str, action: Action) -> Self {
        Self {
            text: text.to_string(),
            action,
            enabled: true,
            rect: Rect::with_size(0, 0, 0, 0),
            state: ButtonState::Idle,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    fn update(&mut self, pointer: Pointer) -> Option<Action> {
        if !self.enabled {
            self.state = ButtonState::Disabled;
            return None;
        }
        let over = self.rect.point_in_rect(Point::new(pointer.x, pointer.y));
        self.state = match (over, pointer.down) {
            (true, true) => ButtonState::Pressed,
            (true, false) => ButtonState::Hover,
            _ => ButtonState::Idle,
        };
        if over && pointer.clicked {
            Some(self.action)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub color: RGB,
    rect: Rect,
}

impl Label {
    pub fn new(text: &str, color: RGB) -> Self {
        Self {
            text: text.to_string(),
            color,
            rect: Rect::with_size(0, 0, 0, 0),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Widget {
    Button(Button),
    Label(Label),
}

impl Widget {
    fn height(&self) -> i32 {
        match self {
            Widget::Button(_) => BUTTON_HEIGHT,
            Widget::Label(_) => LABEL_HEIGHT,
        }
    }

    fn set_rect(&mut self, rect: Rect) {
        match self {
            Widget::Button(b) => b.rect = rect,
            Widget::Label(l) => l.rect = rect,
        }
    }
}

/// Single column container; each child gets a full-width row.
#[derive(Clone, Debug)]
pub struct Container {
    pub background: RGB,
    rect: Rect,
    children: Vec<Widget>,
}

impl Container {
    pub fn new(background: RGB) -> Self {
        Self {
            background,
            rect: Rect::with_size(0, 0, 0, 0),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, widget: Widget) {
        self.children.push(widget);
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    /// Total height needed by the children including padding and spacing.
    fn content_height(&self) -> i32 {
        let rows: i32 = self.children.iter().map(Widget::height).sum();
        let gaps = SPACING * (self.children.len() as i32 - 1).max(0);
        PADDING * 2 + rows + gaps
    }

    /// Centers the container on a `cols` x `rows` console and lays out its rows.
    fn layout(&mut self, cols: i32, rows: i32) {
        let width = PANEL_WIDTH.min(cols);
        let height = self.content_height().min(rows);
        let x = (cols - width) / 2;
        let y = (rows - height) / 2;
        self.rect = Rect::with_size(x, y, width, height);

        let mut row_y = y + PADDING;
        for child in &mut self.children {
            let h = child.height();
            child.set_rect(Rect::with_size(x, row_y, width, h));
            row_y += h + SPACING;
        }
    }
}

/// The round-complete overlay: quit and restart buttons plus a message.
#[derive(Clone, Debug)]
pub struct Overlay {
    root: Container,
    images: ButtonImage,
}

impl Overlay {
    /// Builds the widget tree for a console of `cols` x `rows` cells.
    pub fn new(catalog: &AssetCatalog, cols: i32, rows: i32) -> GameResult<Self> {
        let images = ButtonImage::from_catalog(catalog)?;
        let mut root = Container::new(RGB::from_u8(40, 40, 40));
        root.add_child(Widget::Button(Button::new(QUIT_TEXT, Action::Quit)));
        root.add_child(Widget::Button(Button::new(RESTART_TEXT, Action::Restart)));
        root.add_child(Widget::Label(Label::new(ROUND_MESSAGE, RGB::named(WHITE))));
        root.layout(cols, rows);
        Ok(Self { root, images })
    }

    /// Feeds the pointer to every button; returns the action of a clicked one.
    pub fn update(&mut self, pointer: Pointer) -> Option<Action> {
        let mut fired = None;
        for child in &mut self.root.children {
            if let Widget::Button(button) = child {
                if let Some(action) = button.update(pointer) {
                    fired = Some(action);
                }
            }
        }
        if let Some(action) = fired {
            log::info!("overlay action {:?}", action);
        }
        fired
    }

    /// Clears hover/pressed looks, e.g. when the overlay is hidden.
    pub fn reset(&mut self) {
        for child in &mut self.root.children {
            if let Widget::Button(button) = child {
                if button.enabled {
                    button.state = ButtonState::Idle;
                }
            }
        }
    }

    /// Console rectangle of the button emitting `action`.
    pub fn button_rect(&self, action: Action) -> Option<Rect> {
        self.root.children.iter().find_map(|child| match child {
            Widget::Button(b) if b.action == action => Some(b.rect),
            _ => None,
        })
    }

    pub fn button(&self, action: Action) -> Option<&Button> {
        self.root.children.iter().find_map(|child| match child {
            Widget::Button(b) if b.action == action => Some(b),
            _ => None,
        })
    }

    pub fn draw(&self, ctx: &mut BTerm) {
        ctx.fill_region(
            self.root.rect,
            to_cp437(' '),
            RGB::named(WHITE),
            self.root.background,
        );
        for child in &self.root.children {
            match child {
                Widget::Button(b) => {
                    let img = self.images.for_state(b.state);
                    let fg = RGB::from_u8(img.fg[0], img.fg[1], img.fg[2]);
                    let bg = RGB::from_u8(img.bg[0], img.bg[1], img.bg[2]);
                    ctx.fill_region(b.rect, to_cp437(img.glyph), fg, bg);
                    let (x, y) = centered(&b.rect, &b.text);
                    ctx.print_color(x, y, fg, bg, &b.text);
                }
                Widget::Label(l) => {
                    let (x, y) = centered(&l.rect, &l.text);
                    ctx.print_color(x, y, l.color, self.root.background, &l.text);
                }
            }
        }
    }
}

fn centered(rect: &Rect, text: &str) -> (i32, i32) {
    let len = text.chars().count() as i32;
    let x = rect.x1 + ((rect.width() - len) / 2).max(0);
    let y = rect.y1 + rect.height() / 2;
    (x, y)
}

/// Draws the score as white text at the given cell.
pub fn draw_score(ctx: &mut BTerm, x: i32, y: i32, score: u32, bg: RGB) {
    ctx.print_color(x, y, RGB::named(WHITE), bg, score_string(score));
}

fn score_string(score: u32) -> String {
    format!("{}", score)
}
