//! Main chat event loop.
//!
//! The loop owns the [`App`] and the terminal. Key presses arrive from a
//! reader task and chat outcomes from [`ChatService`] tasks, both over
//! channels, so every mutation of the controller and every draw happens here.

mod keybindings;
mod lifecycle;

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{debug, info};

use self::keybindings::handle_event;
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::{actions::apply_actions, App, AppAction, AppCommand};
use crate::core::chat_client::{ChatClient, ChatCompletion, ChatService};
use crate::core::config::ChatSettings;
use crate::ui::renderer::ui;

const IDLE_SLEEP: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Run an interactive session until the user quits.
///
/// A transcript that cannot be loaded stops the session before the terminal
/// is touched; every later failure is shown inside the interface.
pub async fn run_chat(settings: ChatSettings) -> Result<(), Box<dyn Error>> {
    let mut app = App::bootstrap(settings)?;
    let mouse_enabled = app.settings.mouse_enabled;

    let client = ChatClient::new(app.settings.endpoint.clone());
    let (chat_service, mut completions) = ChatService::new(client);

    info!(
        endpoint = %app.settings.endpoint,
        model = %app.settings.model,
        mouse = mouse_enabled,
        "starting chat session"
    );

    let mut terminal = setup_terminal(mouse_enabled)?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &chat_service,
        &mut event_rx,
        &mut completions,
    )
    .await;

    event_reader_handle.abort();
    restore_terminal(&mut terminal, mouse_enabled)?;
    info!("chat session ended");
    result
}

async fn run_event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    chat_service: &ChatService,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    completions: &mut mpsc::UnboundedReceiver<ChatCompletion>,
) -> Result<(), Box<dyn Error>> {
    let mut request_redraw = true;

    loop {
        if app.exit_requested {
            return Ok(());
        }

        if request_redraw {
            terminal.draw(|f| ui(f, app))?;
            request_redraw = false;
        }

        let mut actions = Vec::new();
        let mut events_processed = false;
        while let Ok(UiEvent::Crossterm(ev)) = event_rx.try_recv() {
            events_processed = true;
            let outcome = handle_event(app, ev);
            request_redraw |= outcome.request_redraw;
            actions.extend(outcome.action);
        }

        let mut received_any = false;
        while let Ok(completion) = completions.try_recv() {
            received_any = true;
            debug!(request_id = completion.request_id, "chat completion received");
            actions.push(AppAction::ChatCompleted(completion));
        }
        request_redraw |= received_any;

        for command in apply_actions(app, actions) {
            match command {
                AppCommand::SendChat(params) => chat_service.spawn_request(params),
            }
        }

        if !events_processed && !received_any && !request_redraw {
            tokio::time::sleep(IDLE_SLEEP).await;
        }
    }
}
