//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that feeds key presses and chat outcomes
//!   to [`crate::core::app`].
//! - [`renderer`]: the three-pane frame (header, output, input).
//! - [`output`] and [`markup`]: the scrollback and its inline color tags.
//! - [`theme`]: the palette every color is drawn from.

pub mod chat_loop;
pub mod markup;
pub mod output;
pub mod renderer;
pub mod theme;
