use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which layer currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Overlay,
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    FocusControl(i32),
    Activate,
    OpenSettings,
    Delete,
    Submit,
    Dismiss,
    NextField,
    PrevField,
    Edit(KeyEvent),
    None,
}

pub fn classify(key: &KeyEvent, context: InputContext) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('s') | KeyCode::Char('S') if context == InputContext::Dialog => {
                KeyCommand::Submit
            }
            _ => KeyCommand::None,
        };
    }

    match context {
        InputContext::Overlay => match key.code {
            KeyCode::Left | KeyCode::BackTab => KeyCommand::FocusControl(-1),
            KeyCode::Right | KeyCode::Tab => KeyCommand::FocusControl(1),
            KeyCode::Enter | KeyCode::Char(' ') => KeyCommand::Activate,
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::OpenSettings,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => KeyCommand::Delete,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyCommand::Quit,
            _ => KeyCommand::None,
        },
        InputContext::Dialog => match key.code {
            KeyCode::Esc => KeyCommand::Dismiss,
            KeyCode::Tab | KeyCode::Down => KeyCommand::NextField,
            KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
            KeyCode::Enter => KeyCommand::Submit,
            _ => KeyCommand::Edit(*key),
        },
    }
}

pub fn help_text(context: InputContext, has_settings: bool) -> &'static str {
    match (context, has_settings) {
        (InputContext::Dialog, _) => "Ctrl+S/Enter save • Esc close • Tab next field",
        (InputContext::Overlay, true) => {
            "←/→ choose • Enter activate • s settings • d delete • q quit"
        }
        (InputContext::Overlay, false) => "Enter/d delete • q quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let chord = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&chord, InputContext::Overlay), KeyCommand::Quit);
        assert_eq!(classify(&chord, InputContext::Dialog), KeyCommand::Quit);
    }

    #[test]
    fn ctrl_s_submits_only_inside_dialog() {
        let chord = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(classify(&chord, InputContext::Dialog), KeyCommand::Submit);
        assert_eq!(classify(&chord, InputContext::Overlay), KeyCommand::None);
    }

    #[test]
    fn overlay_shortcuts() {
        let ctx = InputContext::Overlay;
        assert_eq!(
            classify(&key(KeyCode::Char('s'), KeyModifiers::NONE), ctx),
            KeyCommand::OpenSettings
        );
        assert_eq!(
            classify(&key(KeyCode::Delete, KeyModifiers::NONE), ctx),
            KeyCommand::Delete
        );
        assert_eq!(
            classify(&key(KeyCode::BackTab, KeyModifiers::SHIFT), ctx),
            KeyCommand::FocusControl(-1)
        );
    }

    #[test]
    fn dialog_letters_are_edits() {
        let typed = key(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(
            classify(&typed, InputContext::Dialog),
            KeyCommand::Edit(typed)
        );
        assert_eq!(
            classify(&key(KeyCode::Esc, KeyModifiers::NONE), InputContext::Dialog),
            KeyCommand::Dismiss
        );
    }
}
