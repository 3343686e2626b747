use std::collections::HashSet;

use bracket_lib::prelude::VirtualKeyCode;
use common::{GameError, GameResult};
use serde::Deserialize;
use ui::Pointer;

/// Configuration for keyboard controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputConfig {
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub restart: VirtualKeyCode,
    pub quit: VirtualKeyCode,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            up: Up,
            down: Down,
            left: Left,
            right: Right,
            restart: R,
            quit: Q,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawBindings {
    up: Option<String>,
    down: Option<String>,
    left: Option<String>,
    right: Option<String>,
    restart: Option<String>,
    quit: Option<String>,
}

impl InputConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&data)
    }

    /// Parses `key = "Name"` bindings; unknown key names keep the default.
    pub fn parse(data: &str) -> GameResult<Self> {
        let raw: RawBindings = toml::from_str(data).map_err(|e| GameError::Parse(e.to_string()))?;
        let mut cfg = Self::default();
        let slots = [
            (raw.up, &mut cfg.up),
            (raw.down, &mut cfg.down),
            (raw.left, &mut cfg.left),
            (raw.right, &mut cfg.right),
            (raw.restart, &mut cfg.restart),
            (raw.quit, &mut cfg.quit),
        ];
        for (name, slot) in slots {
            let Some(name) = name else { continue };
            match parse_key(&name) {
                Some(kc) => *slot = kc,
                None => log::warn!("unknown key `{}` in bindings, keeping default", name),
            }
        }
        Ok(cfg)
    }

    /// Keys whose held state is tracked between ticks.
    pub fn tracked(&self) -> [VirtualKeyCode; 6] {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.restart,
            self.quit,
        ]
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(Left),
        "right" => Some(Right),
        "up" => Some(Up),
        "down" => Some(Down),
        "w" => Some(W),
        "a" => Some(A),
        "s" => Some(S),
        "d" => Some(D),
        "h" => Some(H),
        "j" => Some(J),
        "k" => Some(K),
        "l" => Some(L),
        "q" => Some(Q),
        "r" => Some(R),
        "n" => Some(N),
        "escape" => Some(Escape),
        "return" => Some(Return),
        "space" => Some(Space),
        _ => None,
    }
}

/// Edge-triggered input for one tick.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    pub just_pressed: HashSet<VirtualKeyCode>,
    pub just_released: HashSet<VirtualKeyCode>,
    pub pointer: Pointer,
}

impl InputFrame {
    pub fn pressed(&self, key: VirtualKeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn released(&self, key: VirtualKeyCode) -> bool {
        self.just_released.contains(&key)
    }
}

/// Turns level-triggered key samples into press/release edges.
#[derive(Debug, Default)]
pub struct EdgeTracker {
    held: HashSet<VirtualKeyCode>,
}

impl EdgeTracker {
    /// Diffs `now` against the previous sample and remembers it.
    pub fn advance(&mut self, now: HashSet<VirtualKeyCode>, pointer: Pointer) -> InputFrame {
        let just_pressed = now.difference(&self.held).copied().collect();
        let just_released = self.held.difference(&now).copied().collect();
        self.held = now;
        InputFrame {
            just_pressed,
            just_released,
            pointer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn keys(list: &[VirtualKeyCode]) -> HashSet<VirtualKeyCode> {
        list.iter().copied().collect()
    }

    #[test]
    fn load_nonexistent_returns_default() {
        let cfg = InputConfig::load("/no/such/golem.toml").unwrap();
        assert_eq!(cfg, InputConfig::default());
        assert_eq!(cfg.up, VirtualKeyCode::Up);
    }

    #[test]
    fn load_overrides_fields() {
        let mut path = std::env::temp_dir();
        path.push("test_golem_bindings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "up = \"W\"").unwrap();
        writeln!(file, "restart = \"space\"").unwrap();
        let cfg = InputConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(cfg.up, VirtualKeyCode::W);
        assert_eq!(cfg.restart, VirtualKeyCode::Space);
        assert_eq!(cfg.down, VirtualKeyCode::Down);
    }

    #[test]
    fn unknown_key_name_keeps_default() {
        let cfg = InputConfig::parse("quit = \"F13\"").unwrap();
        assert_eq!(cfg.quit, VirtualKeyCode::Q);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        assert!(matches!(
            InputConfig::parse("up = "),
            Err(GameError::Parse(_))
        ));
    }

    #[test]
    fn press_is_reported_once() {
        let mut tracker = EdgeTracker::default();
        let frame = tracker.advance(keys(&[VirtualKeyCode::Up]), Pointer::default());
        assert!(frame.pressed(VirtualKeyCode::Up));
        let frame = tracker.advance(keys(&[VirtualKeyCode::Up]), Pointer::default());
        assert!(!frame.pressed(VirtualKeyCode::Up));
        assert!(!frame.released(VirtualKeyCode::Up));
    }

    #[test]
    fn release_is_reported_once() {
        let mut tracker = EdgeTracker::default();
        tracker.advance(keys(&[VirtualKeyCode::Left]), Pointer::default());
        let frame = tracker.advance(keys(&[]), Pointer::default());
        assert!(frame.released(VirtualKeyCode::Left));
        let frame = tracker.advance(keys(&[]), Pointer::default());
        assert!(!frame.released(VirtualKeyCode::Left));
    }

    #[test]
    fn simultaneous_press_and_release() {
        let mut tracker = EdgeTracker::default();
        tracker.advance(keys(&[VirtualKeyCode::Up]), Pointer::default());
        let frame = tracker.advance(keys(&[VirtualKeyCode::Down]), Pointer::default());
        assert!(frame.pressed(VirtualKeyCode::Down));
        assert!(frame.released(VirtualKeyCode::Up));
    }
}
