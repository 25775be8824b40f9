use super::App;
use crate::core::chat_client::{ChatCompletion, ChatParams};

#[derive(Debug)]
pub enum AppAction {
    SubmitInput,
    InsertIntoInput { text: String },
    ChatCompleted(ChatCompletion),
    ClearHistory,
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    Quit,
}

/// Side effects the event loop performs on the controller's behalf.
#[derive(Debug)]
pub enum AppCommand {
    SendChat(ChatParams),
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => {
            let text = app.ui.get_input_text();
            let params = app.submit(&text)?;
            app.ui.clear_input();
            Some(AppCommand::SendChat(params))
        }
        AppAction::InsertIntoInput { text } => {
            if !text.is_empty() {
                app.ui.insert_paste(&text);
            }
            None
        }
        AppAction::ChatCompleted(ChatCompletion { request_id, result }) => {
            match result {
                Ok(reply) => app.on_reply(reply, request_id),
                Err(err) => app.on_error(err, request_id),
            }
            None
        }
        AppAction::ClearHistory => {
            app.clear();
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.output.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.output.scroll_down(lines);
            None
        }
        AppAction::Quit => {
            app.exit_requested = true;
            None
        }
    }
}
