use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::icons::Icon;

/// Things the user can ask the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Press one of the four buttons
    Button(Icon),

    /// Advance the server's simulation by one step
    Step,

    /// Double the cell size
    GrowCells,

    /// Halve the cell size
    ShrinkCells,

    /// Double the frametime
    SlowDown,

    /// Halve the frametime
    SpeedUp,

    /// Show or hide the button bar
    ToggleButtons,

    /// The terminal was resized, redraw
    Redraw,

    /// Exit the application
    Exit,
}

/// Path of the single step control endpoint
pub const STEP_ENDPOINT: &str = "/step";

/// Converts a crossterm event into a viewer action
pub fn convert_event(event: CrossTermEvent) -> Option<Action> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            } => Some(Action::Exit),
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => Some(Action::Button(Icon::Clear)),
            KeyEvent {
                code: KeyCode::Char('r'),
                ..
            } => Some(Action::Button(Icon::Randomize)),
            KeyEvent {
                code: KeyCode::Char('g'),
                ..
            } => Some(Action::Button(Icon::Glider)),
            KeyEvent {
                code: KeyCode::Char(' ' | 'f'),
                ..
            } => Some(Action::Button(Icon::Refresh)),
            KeyEvent {
                code: KeyCode::Char('s'),
                ..
            } => Some(Action::Step),
            KeyEvent {
                code: KeyCode::Char('b'),
                ..
            } => Some(Action::ToggleButtons),
            KeyEvent {
                code: KeyCode::Char('+' | '='),
                ..
            } => Some(Action::GrowCells),
            KeyEvent {
                code: KeyCode::Char('-'),
                ..
            } => Some(Action::ShrinkCells),
            KeyEvent {
                code: KeyCode::Char('['),
                ..
            } => Some(Action::SpeedUp),
            KeyEvent {
                code: KeyCode::Char(']'),
                ..
            } => Some(Action::SlowDown),
            _ => None,
        },
        CrossTermEvent::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Exit)
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Exit)
        );
    }

    #[test]
    fn plain_c_clears() {
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(Action::Button(Icon::Clear))
        );
    }

    #[test]
    fn buttons_and_controls() {
        let cases = [
            ('r', Action::Button(Icon::Randomize)),
            ('g', Action::Button(Icon::Glider)),
            (' ', Action::Button(Icon::Refresh)),
            ('s', Action::Step),
            ('b', Action::ToggleButtons),
            ('+', Action::GrowCells),
            ('-', Action::ShrinkCells),
            ('[', Action::SpeedUp),
            (']', Action::SlowDown),
        ];

        for (c, action) in cases {
            assert_eq!(
                convert_event(key(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(action)
            );
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert_eq!(convert_event(CrossTermEvent::Key(release)), None);
    }

    #[test]
    fn resize_redraws() {
        assert_eq!(
            convert_event(CrossTermEvent::Resize(80, 24)),
            Some(Action::Redraw)
        );
        assert_eq!(convert_event(CrossTermEvent::FocusGained), None);
    }
}
