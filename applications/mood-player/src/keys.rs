//! Keyboard shortcuts

/// A key press as reported by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowLeft,
    Char(char),
}

/// Available shortcut actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Back to mood selection
    ReturnToPick,
    /// Play or pause playback
    TogglePlay,
    /// Skip to next track (with a fresh copy line)
    Next,
    /// Go back one track
    Previous,
}

/// Map a key press to its action
///
/// Nothing fires while focus is in a text input.
pub fn shortcut_for(key: Key, typing: bool) -> Option<ShortcutAction> {
    if typing {
        return None;
    }

    match key {
        Key::Escape => Some(ShortcutAction::ReturnToPick),
        Key::Enter | Key::Space => Some(ShortcutAction::TogglePlay),
        Key::ArrowLeft => Some(ShortcutAction::Previous),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'n' => Some(ShortcutAction::Next),
            'p' => Some(ShortcutAction::Previous),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_shortcut() {
        assert_eq!(shortcut_for(Key::Escape, false), Some(ShortcutAction::ReturnToPick));
        assert_eq!(shortcut_for(Key::Enter, false), Some(ShortcutAction::TogglePlay));
        assert_eq!(shortcut_for(Key::Space, false), Some(ShortcutAction::TogglePlay));
        assert_eq!(shortcut_for(Key::Char('n'), false), Some(ShortcutAction::Next));
        assert_eq!(shortcut_for(Key::Char('N'), false), Some(ShortcutAction::Next));
        assert_eq!(shortcut_for(Key::ArrowLeft, false), Some(ShortcutAction::Previous));
        assert_eq!(shortcut_for(Key::Char('P'), false), Some(ShortcutAction::Previous));
        assert_eq!(shortcut_for(Key::Char('x'), false), None);
    }

    #[test]
    fn typing_swallows_everything() {
        for key in [
            Key::Escape,
            Key::Enter,
            Key::Space,
            Key::ArrowLeft,
            Key::Char('n'),
            Key::Char('p'),
        ] {
            assert_eq!(shortcut_for(key, true), None);
        }
    }
}
