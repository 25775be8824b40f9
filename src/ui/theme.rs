use ratatui::style::{Color, Modifier, Style};

pub type Rgb = (u8, u8, u8);

/// The fixed set of RGB values every interface color is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub header_border: Rgb,
    pub output_border: Rgb,
    pub input_border: Rgb,
    pub input_background: Rgb,
    pub user_accent: Rgb,
    pub model_accent: Rgb,
    pub error: Rgb,
    pub muted: Rgb,
}

pub const DRACULA: Palette = Palette {
    background: (40, 42, 54),
    foreground: (248, 248, 242),
    header_border: (80, 250, 123),
    output_border: (189, 147, 249),
    input_border: (139, 233, 253),
    input_background: (68, 71, 90),
    user_accent: (80, 250, 123),
    model_accent: (255, 184, 108),
    error: (255, 85, 85),
    muted: (98, 114, 164),
};

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    pub text_color: Color,

    // Chrome
    pub header_border_style: Style,
    pub header_text_style: Style,
    pub output_border_style: Style,
    pub input_border_style: Style,

    // Transcript colors, emitted as markup tags in the output pane
    pub user_marker_color: Color,
    pub user_text_color: Color,
    pub model_marker_color: Color,
    pub model_text_color: Color,
    pub error_color: Color,
    pub notice_color: Color,

    // Input field
    pub input_label_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_placeholder_style: Style,
}

impl Theme {
    pub fn from_palette(palette: &Palette) -> Self {
        let background = rgb(palette.background);
        let input_background = rgb(palette.input_background);
        let foreground = rgb(palette.foreground);

        Theme {
            background_color: background,
            text_color: foreground,

            header_border_style: Style::default().fg(rgb(palette.header_border)).bg(background),
            header_text_style: Style::default()
                .fg(foreground)
                .bg(background)
                .add_modifier(Modifier::BOLD),
            output_border_style: Style::default().fg(rgb(palette.output_border)).bg(background),
            input_border_style: Style::default().fg(rgb(palette.input_border)).bg(background),

            user_marker_color: rgb(palette.user_accent),
            user_text_color: foreground,
            model_marker_color: rgb(palette.model_accent),
            model_text_color: rgb(palette.output_border),
            error_color: rgb(palette.error),
            notice_color: rgb(palette.muted),

            input_label_style: Style::default()
                .fg(foreground)
                .bg(input_background)
                .add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(foreground).bg(input_background),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_placeholder_style: Style::default().fg(rgb(palette.muted)).bg(input_background),
        }
    }

    pub fn dracula() -> Self {
        Self::from_palette(&DRACULA)
    }

    /// Base style for text in the output pane before any markup applies.
    pub fn output_text_style(&self) -> Style {
        Style::default().fg(self.text_color).bg(self.background_color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_color_comes_from_the_palette() {
        let theme = Theme::dracula();
        let palette_colors: Vec<Color> = [
            DRACULA.background,
            DRACULA.foreground,
            DRACULA.header_border,
            DRACULA.output_border,
            DRACULA.input_border,
            DRACULA.input_background,
            DRACULA.user_accent,
            DRACULA.model_accent,
            DRACULA.error,
            DRACULA.muted,
        ]
        .into_iter()
        .map(rgb)
        .collect();

        for color in [
            theme.background_color,
            theme.text_color,
            theme.user_marker_color,
            theme.user_text_color,
            theme.model_marker_color,
            theme.model_text_color,
            theme.error_color,
            theme.notice_color,
        ] {
            assert!(palette_colors.contains(&color), "{color:?} not in palette");
        }
    }

    #[test]
    fn user_and_model_markers_differ() {
        let theme = Theme::dracula();
        assert_ne!(theme.user_marker_color, theme.model_marker_color);
        assert_ne!(theme.output_border_style.fg, theme.input_border_style.fg);
        assert_ne!(theme.header_border_style.fg, theme.output_border_style.fg);
    }
}
