//! Navigation Controller
//!
//! Maps key presses to scrolling the deck container by one viewport height.

/// A navigation key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Space,
    ArrowDown,
    ArrowRight,
    ArrowUp,
    ArrowLeft,
}

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl NavKey {
    /// Parse a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(NavKey::Space),
            "ArrowDown" => Some(NavKey::ArrowDown),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "ArrowUp" => Some(NavKey::ArrowUp),
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            _ => None,
        }
    }

    /// Direction this key moves the deck
    pub fn direction(self) -> Direction {
        match self {
            NavKey::Space | NavKey::ArrowDown | NavKey::ArrowRight => Direction::Forward,
            NavKey::ArrowUp | NavKey::ArrowLeft => Direction::Backward,
        }
    }
}

/// A scroll to issue on the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Vertical offset in CSS pixels (negative scrolls up)
    pub top: f64,
    /// Animate the scroll
    pub smooth: bool,
    /// Suppress the key's default browser action
    pub prevent_default: bool,
}

/// Turns key codes into scroll commands
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationController;

impl NavigationController {
    /// Create a controller
    pub fn new() -> Self {
        Self
    }

    /// Command for a key press, or `None` if the key is not a navigation key.
    ///
    /// The container clamps the result itself, so scrolling past either end
    /// does nothing.
    pub fn command(&self, code: &str, viewport_height: f64) -> Option<ScrollCommand> {
        let key = NavKey::from_code(code)?;
        let top = match key.direction() {
            Direction::Forward => viewport_height,
            Direction::Backward => -viewport_height,
        };
        Some(ScrollCommand {
            top,
            smooth: true,
            prevent_default: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_keys() {
        let nav = NavigationController::new();
        for code in ["Space", "ArrowDown", "ArrowRight"] {
            let cmd = nav.command(code, 900.0).unwrap();
            assert_eq!(cmd.top, 900.0, "{code}");
            assert!(cmd.smooth);
            assert!(cmd.prevent_default);
        }
    }

    #[test]
    fn test_retreat_keys() {
        let nav = NavigationController::new();
        for code in ["ArrowUp", "ArrowLeft"] {
            assert_eq!(nav.command(code, 720.0).unwrap().top, -720.0, "{code}");
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let nav = NavigationController::new();
        for code in ["KeyJ", "Enter", "PageDown", "Tab", ""] {
            assert!(nav.command(code, 800.0).is_none(), "{code}");
        }
    }

    #[test]
    fn test_key_directions() {
        assert_eq!(NavKey::Space.direction(), Direction::Forward);
        assert_eq!(NavKey::ArrowLeft.direction(), Direction::Backward);
        assert_eq!(NavKey::from_code("arrowup"), None);
    }
}
