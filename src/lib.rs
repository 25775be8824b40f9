//! Palaver is a full-screen terminal chat client for a locally running
//! language model served over Ollama's HTTP chat API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript, its on-disk persistence, the HTTP
//!   transport, configuration, and the controller state machine.
//! - [`ui`] renders the three-pane terminal interface and runs the
//!   interactive event loop that feeds key presses and replies to the
//!   controller.
//! - [`api`] defines the chat request/reply payloads exchanged with the
//!   model server.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! resolves settings and dispatches into [`ui::chat_loop`] for interactive
//! sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
