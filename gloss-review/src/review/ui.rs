//! UI rendering logic
//!
//! Handles layout and rendering of the review screen using Ratatui.
//! Layout structure:
//! - Upper section (responsive height):
//!   - Corpus panel (80% width): candidate fields in the title, corpus
//!     lines in the body
//!   - Controls panel (20% width): key reference for the active mode
//! - Lower section (fixed height):
//!   - Tag bar (80% width): numbered tags, lit when set
//!   - Command panel (20% width): pending command or status message

use super::app::{App, Mode};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Height of the lower tag/command row
const COMMAND_PANEL_HEIGHT: u16 = 5;
/// Width share of the corpus panel and the tag bar
const MAIN_PANEL_PERCENT: u16 = 80;

const NAVIGATE_CONTROLS: &str = "\
a: previous token
d: next token
w: scroll up corpus
s: scroll down corpus
<numbers>: toggle tag
:q: quit
:e: save
:f: edit token
:<number>: go to token";

const TOKEN_EDIT_CONTROLS: &str = "\
--Edit token--

z: left expand
x: left shrink
c: right shrink
v: right expand
b: undo changes
<tab>: edit translation
<Enter>: save changes";

const TRANSLATION_EDIT_CONTROLS: &str = "\
--Edit translation--

<char>: append char
<backspace>: remove char
<tab>: edit token";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    // Split layout vertically: corpus row on top, tags/command row below
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1), // Corpus and controls - expand to fill available space
            Constraint::Length(COMMAND_PANEL_HEIGHT), // Tags and command
        ])
        .split(frame.area());

    render_upper_section(frame, chunks[0], app);
    render_lower_section(frame, chunks[1], app);
}

fn render_upper_section(frame: &mut Frame, area: Rect, app: &App) {
    // Split horizontally: corpus panel and controls panel
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(MAIN_PANEL_PERCENT),
            Constraint::Percentage(100 - MAIN_PANEL_PERCENT),
        ])
        .split(area);

    render_corpus_panel(frame, chunks[0], app);
    render_controls_panel(frame, chunks[1], app);
}

fn render_lower_section(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(MAIN_PANEL_PERCENT),
            Constraint::Percentage(100 - MAIN_PANEL_PERCENT),
        ])
        .split(area);

    render_tag_bar(frame, chunks[0], app);
    render_command_panel(frame, chunks[1], app);
}

fn render_corpus_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(title_line(app));

    // Get inner area for content (inside the border)
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let marked = app.window.selection().is_some();
    let token = app.window.field(0);

    let mut lines = Vec::new();
    for (row, text) in app.window.visible().iter().enumerate() {
        let mut spans = Vec::new();
        if app.window.selection() == Some(row) {
            spans.push(Span::styled(
                ">> ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        } else if marked {
            // Keep unselected lines aligned with the marked one
            spans.push(Span::raw("   "));
        }
        spans.extend(highlight_occurrences(text, token));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner_area);
}

/// Panel title: the token position followed by every candidate field, with
/// the field under edit shown black on white.
fn title_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{}.", app.position()))];

    for (i, field) in app.window.candidate().iter().enumerate() {
        spans.push(Span::raw(" | "));
        if app.window.highlight() == Some(i) {
            spans.push(Span::styled(
                field.clone(),
                Style::default().fg(Color::Black).bg(Color::White),
            ));
        } else {
            spans.push(Span::raw(field.clone()));
        }
    }

    Line::from(spans)
}

/// Split a corpus line into spans, marking every occurrence of the token.
fn highlight_occurrences(text: &str, token: &str) -> Vec<Span<'static>> {
    if token.is_empty() {
        return vec![Span::raw(text.to_string())];
    }

    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find(token) {
        if at > 0 {
            spans.push(Span::raw(rest[..at].to_string()));
        }
        spans.push(Span::styled(
            token.to_string(),
            Style::default().fg(Color::Yellow),
        ));
        rest = &rest[at + token.len()..];
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    spans
}

fn render_controls_panel(frame: &mut Frame, area: Rect, app: &App) {
    let controls = match app.mode {
        Mode::TokenEdit => TOKEN_EDIT_CONTROLS,
        Mode::TranslationEdit => TRANSLATION_EDIT_CONTROLS,
        Mode::Navigate | Mode::Command => NAVIGATE_CONTROLS,
    };

    let block = Block::default().borders(Borders::ALL).title("Controls");
    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(controls), inner_area);
}

fn render_tag_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (i, name) in app.tag_names().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let text = format!("{}. {}", i + 1, name);
        if app.tags()[i] {
            spans.push(Span::styled(text, Style::default().fg(Color::Yellow)));
        } else {
            spans.push(Span::raw(text));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_command_panel(frame: &mut Frame, area: Rect, app: &App) {
    // While a command is being typed it takes the panel over from the
    // status message.
    let content = if app.mode == Mode::Command {
        app.command_buffer()
    } else {
        app.status()
    };

    let block = Block::default().borders(Borders::ALL).title("Command");
    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(content), inner_area);
}
