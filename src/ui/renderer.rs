use crate::core::app::App;
use crate::ui::markup::parse_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const INPUT_LABEL: &str = "Prompt: ";

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = &app.ui.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_output(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let mut spans = vec![Span::styled(
        format!("Model: {}", app.settings.model),
        theme.header_text_style,
    )];
    if app.is_awaiting_reply() {
        spans.push(Span::styled(
            "  • waiting for reply…",
            Style::default().fg(theme.notice_color),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.header_border_style)
                .title(format!(" Palaver v{} ", env!("CARGO_PKG_VERSION")))
                .style(Style::default().bg(theme.background_color)),
        );
    f.render_widget(header, area);
}

fn render_output(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.output_border_style)
        .title(" Output ")
        .style(Style::default().bg(app.ui.theme.background_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let base = app.ui.theme.output_text_style();
    let height = usize::from(inner.height);
    let wanted = height + usize::from(app.ui.output.scroll_back());

    // Only the tail that can reach the screen is parsed and measured
    let mut tail: Vec<Line<'static>> = Vec::new();
    let mut rows = 0usize;
    for line in app.ui.output.lines().iter().rev() {
        if rows >= wanted {
            break;
        }
        let parsed = parse_line(line, base);
        rows += wrapped_rows(&parsed, inner.width);
        tail.push(parsed);
    }
    tail.reverse();

    if rows < wanted {
        // The whole history fit in the walk, so its top is known
        let max_scroll_back = u16::try_from(rows.saturating_sub(height)).unwrap_or(u16::MAX);
        app.ui.output.clamp_scroll(max_scroll_back);
    }
    let bottom = height + usize::from(app.ui.output.scroll_back());
    let top = u16::try_from(rows.saturating_sub(bottom))
        .unwrap_or(u16::MAX)
        .min(u16::MAX - inner.height);

    let paragraph = Paragraph::new(tail)
        .style(base)
        .wrap(Wrap { trim: false })
        .scroll((top, 0));
    f.render_widget(paragraph, inner);
}

fn wrapped_rows(line: &Line<'static>, width: u16) -> usize {
    Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width)
        .max(1)
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .style(theme.input_text_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [label_area, field_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(INPUT_LABEL.len() as u16),
            Constraint::Min(0),
        ])
        .areas(inner);

    f.render_widget(
        Paragraph::new(INPUT_LABEL).style(theme.input_label_style),
        label_area,
    );
    f.render_widget(app.ui.textarea(), field_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ChatSettings;
    use crate::core::transcript::TranscriptStore;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let settings = ChatSettings {
            transcript_path: dir.path().join("chat.json"),
            ..ChatSettings::default()
        };
        let store = TranscriptStore::new(settings.transcript_path.clone());
        App::new(settings, store, Vec::new(), Theme::dracula())
    }

    fn buffer_rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| ui(f, app)).expect("draw");
        buffer_rows(terminal.backend().buffer())
    }

    #[test]
    fn renders_three_panes() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);

        let rows = draw(&mut app, 60, 12);

        assert!(rows[1].contains("Model: llama3.1"));
        assert!(rows[3].contains("Output"));
        assert!(rows[10].contains("Prompt: "));
        assert_eq!(rows.len(), 12);
    }

    #[test]
    fn header_shows_waiting_marker() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);
        app.submit("hello").expect("sent");

        let rows = draw(&mut app, 60, 12);

        assert!(rows[1].contains("waiting for reply"));
        assert!(rows.iter().any(|row| row.contains("hello")));
    }

    #[test]
    fn output_follows_latest_lines() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);
        for idx in 0..30 {
            let theme = app.ui.theme.clone();
            app.ui.output.push_notice(&theme, &format!("notice {idx:02}"));
        }

        let rows = draw(&mut app, 40, 14);

        assert!(rows.iter().any(|row| row.contains("notice 29")));
        assert!(!rows.iter().any(|row| row.contains("notice 00")));
    }

    #[test]
    fn scroll_back_is_clamped_to_content() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);
        for idx in 0..30 {
            let theme = app.ui.theme.clone();
            app.ui.output.push_notice(&theme, &format!("notice {idx:02}"));
        }
        app.ui.output.scroll_up(u16::MAX);

        let rows = draw(&mut app, 40, 14);

        assert!(rows.iter().any(|row| row.contains("notice 00")));
        assert!(app.ui.output.scroll_back() < 100);
    }

    #[test]
    fn history_taller_than_u16_rows_still_shows_latest() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);
        let theme = app.ui.theme.clone();
        // Each notice plus its spacer is two rows, well past u16::MAX in total
        for idx in 0..35_000 {
            app.ui.output.push_notice(&theme, &format!("notice {idx:05}"));
        }

        let rows = draw(&mut app, 40, 14);
        assert!(rows.iter().any(|row| row.contains("notice 34999")));

        app.ui.output.scroll_up(u16::MAX);
        let rows = draw(&mut app, 40, 14);
        assert!(!rows.iter().any(|row| row.contains("notice 34999")));
        assert!(rows.iter().any(|row| row.contains("notice ")));
    }

    #[test]
    fn long_lines_wrap_inside_output() {
        let dir = TempDir::new().expect("tempdir");
        let mut app = test_app(&dir);
        let theme = app.ui.theme.clone();
        app.ui
            .output
            .push_assistant(&theme, "alpha beta gamma delta epsilon zeta eta theta");

        let rows = draw(&mut app, 24, 14);

        assert!(rows.iter().any(|row| row.contains("theta")));
    }
}
