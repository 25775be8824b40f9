//! Scrollback for the output pane.
//!
//! Entries are appended as markup lines (see [`crate::ui::markup`]); the pane
//! never rewrites earlier lines except through [`OutputPane::clear`].

use crate::core::constants::{MODEL_OUTPUT_SEPARATOR, USER_INPUT_SEPARATOR};
use crate::core::message::{Message, Role};
use crate::ui::markup::{self, escape, RESET};
use crate::ui::theme::Theme;

const TAB_WIDTH: usize = 4;

#[derive(Debug, Default, Clone)]
pub struct OutputPane {
    lines: Vec<String>,
    // Lines scrolled up from the bottom; 0 follows new output.
    scroll_back: u16,
}

fn content_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(|line| escape(&line.replace('\t', &" ".repeat(TAB_WIDTH))))
}

impl OutputPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, theme: &Theme, content: &str) {
        let text_tag = markup::tag(theme.user_text_color);
        let mut block = vec![format!(
            "{}{USER_INPUT_SEPARATOR}{RESET}",
            markup::tag(theme.user_marker_color)
        )];
        block.extend(content_lines(content).map(|line| format!("{text_tag}{line}")));
        self.push_block(block);
    }

    pub fn push_assistant(&mut self, theme: &Theme, content: &str) {
        let text_tag = markup::tag(theme.model_text_color);
        let mut block = vec![format!(
            "{}{MODEL_OUTPUT_SEPARATOR}{RESET}",
            markup::tag(theme.model_marker_color)
        )];
        block.extend(content_lines(content).map(|line| format!("{text_tag}{line}")));
        self.push_block(block);
    }

    pub fn push_message(&mut self, theme: &Theme, message: &Message) {
        match message.role {
            Role::User => self.push_user(theme, &message.content),
            Role::Assistant => self.push_assistant(theme, &message.content),
        }
    }

    pub fn push_error(&mut self, theme: &Theme, message: &str) {
        let tag = markup::tag(theme.error_color);
        let block = content_lines(message)
            .enumerate()
            .map(|(idx, line)| {
                if idx == 0 {
                    format!("{tag}Error: {line}")
                } else {
                    format!("{tag}{line}")
                }
            })
            .collect();
        self.push_block(block);
    }

    pub fn push_notice(&mut self, theme: &Theme, message: &str) {
        let tag = markup::tag(theme.notice_color);
        let block = content_lines(message)
            .map(|line| format!("{tag}{line}"))
            .collect();
        self.push_block(block);
    }

    fn push_block(&mut self, block: Vec<String>) {
        if block.is_empty() {
            return;
        }
        // Blank spacer between entries
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.extend(block);
        self.snap_to_bottom();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_back = 0;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The pane's text with markup removed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| markup::strip(line)).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.plain_lines().iter().any(|line| line.contains(needle))
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Cap the scroll offset once the renderer knows how far it can go.
    pub fn clamp_scroll(&mut self, max_scroll_back: u16) {
        self.scroll_back = self.scroll_back.min(max_scroll_back);
    }

    pub fn snap_to_bottom(&mut self) {
        self.scroll_back = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_entry_has_separator_then_content() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();

        pane.push_user(&theme, "hi\nthere");

        assert_eq!(
            pane.plain_lines(),
            vec![USER_INPUT_SEPARATOR.to_string(), "hi".into(), "there".into()]
        );
        assert!(pane.lines()[0].starts_with(&markup::tag(theme.user_marker_color)));
    }

    #[test]
    fn entries_are_separated_by_blank_lines() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();

        pane.push_user(&theme, "hi");
        pane.push_assistant(&theme, "Hello!");

        assert_eq!(
            pane.plain_lines(),
            vec![
                USER_INPUT_SEPARATOR.to_string(),
                "hi".into(),
                String::new(),
                MODEL_OUTPUT_SEPARATOR.to_string(),
                "Hello!".into(),
            ]
        );
    }

    #[test]
    fn content_brackets_cannot_inject_colors() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();

        pane.push_assistant(&theme, "use [#ff0000] or [-] literally");

        assert_eq!(pane.plain_lines()[1], "use [#ff0000] or [-] literally");
    }

    #[test]
    fn error_lines_are_prefixed() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();

        pane.push_error(&theme, "Could not connect to llama3.1. Is it running?");

        assert_eq!(
            pane.plain_lines(),
            vec!["Error: Could not connect to llama3.1. Is it running?".to_string()]
        );
        assert!(pane.lines()[0].starts_with(&markup::tag(theme.error_color)));
    }

    #[test]
    fn new_output_snaps_back_to_bottom() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();
        pane.push_user(&theme, "one");
        pane.scroll_up(5);
        assert_eq!(pane.scroll_back(), 5);

        pane.push_assistant(&theme, "two");

        assert_eq!(pane.scroll_back(), 0);
    }

    #[test]
    fn scrolling_saturates_and_clamps() {
        let mut pane = OutputPane::new();
        pane.scroll_down(3);
        assert_eq!(pane.scroll_back(), 0);

        pane.scroll_up(u16::MAX);
        pane.scroll_up(1);
        assert_eq!(pane.scroll_back(), u16::MAX);

        pane.clamp_scroll(4);
        assert_eq!(pane.scroll_back(), 4);
    }

    #[test]
    fn clear_empties_pane() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();
        pane.push_notice(&theme, "History cleared.");
        pane.scroll_up(2);

        pane.clear();

        assert!(pane.is_empty());
        assert_eq!(pane.scroll_back(), 0);
    }

    #[test]
    fn tabs_expand_to_spaces() {
        let theme = Theme::dracula();
        let mut pane = OutputPane::new();
        pane.push_assistant(&theme, "\tindented");
        assert_eq!(pane.plain_lines()[1], "    indented");
    }
}
