use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::ui::output::OutputPane;
use crate::ui::theme::Theme;

const INPUT_PLACEHOLDER: &str = "Type a prompt and press Enter";

/// Everything the renderer needs that is not part of the conversation itself.
pub struct UiState {
    pub theme: Theme,
    pub output: OutputPane,
    pub mouse_enabled: bool,
    textarea: TextArea<'static>,
}

impl UiState {
    pub fn new(theme: Theme, mouse_enabled: bool) -> Self {
        let mut state = Self {
            theme,
            output: OutputPane::new(),
            mouse_enabled,
            textarea: TextArea::default(),
        };
        state.configure_textarea();
        state
    }

    pub(crate) fn configure_textarea(&mut self) {
        self.textarea.set_style(self.theme.input_text_style);
        self.textarea
            .set_cursor_style(self.theme.input_cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_placeholder_text(INPUT_PLACEHOLDER);
        self.textarea
            .set_placeholder_style(self.theme.input_placeholder_style);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// The input field is single-line; any stray line breaks read as spaces.
    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let single_line = text.replace(['\r', '\n'], " ");
        self.textarea = if single_line.is_empty() {
            TextArea::default()
        } else {
            TextArea::from([single_line])
        };
        self.textarea.move_cursor(CursorMove::End);
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.set_input_text("");
    }

    pub fn insert_paste(&mut self, text: &str) {
        let single_line = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.textarea.insert_str(single_line);
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }
}
