//! Translation of terminal events into controller actions.
//!
//! Keys with a dedicated meaning become [`AppAction`]s; everything else is
//! handed to the input field as an edit.

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::core::app::{App, AppAction};

pub const PAGE_SCROLL_LINES: u16 = 10;
pub const WHEEL_SCROLL_LINES: u16 = 3;

/// What a single terminal event asks of the loop.
#[derive(Debug, Default)]
pub struct EventOutcome {
    pub action: Option<AppAction>,
    pub request_redraw: bool,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self {
            action: None,
            request_redraw: true,
        }
    }

    fn action(action: AppAction) -> Self {
        Self {
            action: Some(action),
            request_redraw: true,
        }
    }
}

pub fn action_for_key(key: &KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(AppAction::Quit),
        KeyCode::Char('k') if ctrl => Some(AppAction::ClearHistory),
        KeyCode::F(12) => Some(AppAction::ClearHistory),
        KeyCode::Enter => Some(AppAction::SubmitInput),
        // Ctrl+M would insert a line break in the editor
        KeyCode::Char('m') if ctrl => Some(AppAction::SubmitInput),
        KeyCode::PageUp => Some(AppAction::ScrollUp {
            lines: PAGE_SCROLL_LINES,
        }),
        KeyCode::PageDown => Some(AppAction::ScrollDown {
            lines: PAGE_SCROLL_LINES,
        }),
        _ => None,
    }
}

pub fn action_for_mouse(mouse: &MouseEvent, mouse_enabled: bool) -> Option<AppAction> {
    if !mouse_enabled {
        return None;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp {
            lines: WHEEL_SCROLL_LINES,
        }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown {
            lines: WHEEL_SCROLL_LINES,
        }),
        _ => None,
    }
}

pub fn handle_event(app: &mut App, event: Event) -> EventOutcome {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return EventOutcome::default();
            }
            match action_for_key(&key) {
                Some(action) => EventOutcome::action(action),
                None => {
                    app.ui.apply_textarea_edit(|textarea| {
                        textarea.input(key);
                    });
                    EventOutcome::redraw()
                }
            }
        }
        Event::Paste(text) => EventOutcome::action(AppAction::InsertIntoInput { text }),
        Event::Mouse(mouse) => match action_for_mouse(&mouse, app.ui.mouse_enabled) {
            Some(action) => EventOutcome::action(action),
            None => EventOutcome::default(),
        },
        Event::Resize(_, _) => EventOutcome::redraw(),
        _ => EventOutcome::default(),
    }
}
