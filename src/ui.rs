use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::chord::{ChordGroup, ROOT_CHOICES};
use crate::view::{ChordView, KeyPaint};

// ── Top-level routing ─────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // title bar
            Constraint::Length(8),  // selectors
            Constraint::Length(10), // piano keyboard
            Constraint::Length(5),  // legend
            Constraint::Length(3),  // status
            Constraint::Min(0),     // help
        ])
        .split(area);

    draw_title(f, chunks[0], app);
    draw_selectors(f, chunks[1], app);
    draw_piano(f, chunks[2], app);
    draw_legend(f, chunks[3], &app.view);
    draw_status(f, chunks[4], app);
    draw_help(f, chunks[5]);
}

/// Highlight colour for the chord note at root-position `index`.
pub fn position_color(index: usize) -> Color {
    const PALETTE: [Color; 7] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Magenta,
        Color::Cyan,
        Color::LightYellow,
        Color::LightRed,
    ];
    PALETTE[index % PALETTE.len()]
}

fn group_color(group: ChordGroup) -> Color {
    match group {
        ChordGroup::Triad     => Color::Magenta,
        ChordGroup::Seventh   => Color::Yellow,
        ChordGroup::Extended  => Color::Red,
        ChordGroup::AddedTone => Color::Blue,
    }
}

// ── Title bar ─────────────────────────────────────────────────────────────────

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let text = format!(
        "  Chord Visualizer  ─  {}  ─  Focus: {}",
        app.view.title(),
        app.focus.name()
    );
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ── Selectors ─────────────────────────────────────────────────────────────────

fn button(label: &str, selected: bool, color: Color) -> Span<'static> {
    let style = if selected {
        Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!(" {label} "), style)
}

fn row_label(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if focused { "►" } else { " " };
    Span::styled(format!("{marker} {label:<11}"), style)
}

fn draw_selectors(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    // Root row
    let mut row = vec![row_label("Root:", app.focus == Focus::Root)];
    for root in ROOT_CHOICES {
        row.push(button(root, root == app.root(), Color::Blue));
    }
    lines.push(Line::from(row));

    // One row per chord-type group, each in its own colour
    for (gi, group) in ChordGroup::ALL.into_iter().enumerate() {
        let label = if gi == 0 { "Type:" } else { "" };
        let mut row = vec![row_label(label, gi == 0 && app.focus == Focus::Type)];
        for &kind in group.types() {
            row.push(button(kind, kind == app.chord_type(), group_color(group)));
        }
        row.push(Span::styled(format!("  {}", group.name()), Style::default().fg(Color::DarkGray)));
        lines.push(Line::from(row));
    }

    // Inversion row
    let mut row = vec![row_label("Inversion:", app.focus == Focus::Inversion)];
    for i in 0..app.inversion_count() {
        let label = if i == 0 { "Root".to_string() } else { i.to_string() };
        row.push(button(&label, i == app.view.effective_inversion, Color::Green));
    }
    if app.inversion_count() == 0 {
        row.push(Span::styled("─", Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(row));

    f.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Chord ").borders(Borders::ALL)),
        area,
    );
}

// ── Piano keyboard ────────────────────────────────────────────────────────────

fn draw_piano(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Keyboard ({} {}–{}) ",
        app.keyboard.spelling.name(),
        app.keyboard.keys().next().map(|k| k.to_string()).unwrap_or_default(),
        app.keyboard.keys().last().map(|k| k.to_string()).unwrap_or_default(),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    let paints = app.view.paint_keys(&app.keyboard);
    f.render_widget(Paragraph::new(piano_lines(&paints)), inner);
}

fn white_style(paint: &KeyPaint) -> Style {
    match paint.position {
        Some(i) => Style::default().bg(position_color(i)).fg(Color::Black).add_modifier(Modifier::BOLD),
        None    => Style::default().bg(Color::White).fg(Color::Black),
    }
}

fn black_style(paint: &KeyPaint) -> Style {
    match paint.position {
        Some(i) => Style::default().bg(position_color(i)).fg(Color::Black).add_modifier(Modifier::BOLD),
        None    => Style::default().bg(Color::Black).fg(Color::Gray),
    }
}

/// Name of a key without its octave.
fn pitch_name(paint: &KeyPaint) -> &str {
    crate::pitch::strip_octave(&paint.key)
}

/// Three label characters for a black key, spread over the right edge of
/// one white key, the divider, and the left edge of the next.
fn black_label(paint: &KeyPaint) -> [String; 3] {
    let padded = format!("{:^3}", pitch_name(paint));
    let mut chars = padded.chars().map(String::from);
    [
        chars.next().unwrap_or_default(),
        chars.next().unwrap_or_default(),
        chars.next().unwrap_or_default(),
    ]
}

/// Text rows for the keyboard. Each white key is three cells wide plus a
/// divider; a black key covers the divider and one cell either side.
pub fn piano_lines(paints: &[KeyPaint]) -> Vec<Line<'static>> {
    let whites: Vec<usize> = (0..paints.len()).filter(|&i| !paints[i].accidental).collect();
    let left_black  = |i: usize| i.checked_sub(1).and_then(|j| paints.get(j)).filter(|p| p.accidental);
    let right_black = |i: usize| paints.get(i + 1).filter(|p| p.accidental);

    let mut lines: Vec<Line> = Vec::new();

    // Top border
    {
        let mut s = String::from("┌");
        for (n, _) in whites.iter().enumerate() {
            s.push_str("───");
            s.push(if n + 1 < whites.len() { '┬' } else { '┐' });
        }
        lines.push(Line::from(s));
    }

    // Black key body + label rows
    for row in 0..3usize {
        let label_row = row == 2;
        let mut s = vec![Span::raw("│")];
        for &wi in &whites {
            let w_sty = white_style(&paints[wi]);
            let lc = match left_black(wi) {
                Some(b) if label_row => Span::styled(black_label(b)[2].clone(), black_style(b)),
                Some(b)              => Span::styled(" ", black_style(b)),
                None                 => Span::styled(" ", w_sty),
            };
            let (rc, sep) = match right_black(wi) {
                Some(b) if label_row => {
                    let [c0, c1, _] = black_label(b);
                    (Span::styled(c0, black_style(b)), Span::styled(c1, black_style(b)))
                }
                Some(b) => (Span::styled(" ", black_style(b)), Span::styled(" ", black_style(b))),
                None    => (Span::styled(" ", w_sty), Span::raw("│")),
            };
            s.push(lc); s.push(Span::styled(" ", w_sty)); s.push(rc); s.push(sep);
        }
        lines.push(Line::from(s));
    }

    // Separator under the black keys
    {
        let mut s = vec![Span::raw("│")];
        for &wi in &whites {
            let sty = white_style(&paints[wi]);
            s.push(Span::styled(if left_black(wi).is_some() { "┘" } else { " " }, sty));
            s.push(Span::styled(" ", sty));
            s.push(Span::styled(if right_black(wi).is_some() { "└" } else { " " }, sty));
            s.push(Span::raw("│"));
        }
        lines.push(Line::from(s));
    }

    // White key names
    {
        let mut s = vec![Span::raw("│")];
        for &wi in &whites {
            s.push(Span::styled(format!("{:^3}", pitch_name(&paints[wi])), white_style(&paints[wi])));
            s.push(Span::raw("│"));
        }
        lines.push(Line::from(s));
    }

    // Octave numbers under each C
    {
        let mut s = vec![Span::raw("│")];
        for &wi in &whites {
            let p = &paints[wi];
            let octave = if pitch_name(p) == "C" { &p.key[1..] } else { "" };
            s.push(Span::styled(format!("{:^3}", octave), white_style(p).fg(Color::DarkGray)));
            s.push(Span::raw("│"));
        }
        lines.push(Line::from(s));
    }

    // Bottom border
    {
        let mut s = String::from("└");
        for (n, _) in whites.iter().enumerate() {
            s.push_str("───");
            s.push(if n + 1 < whites.len() { '┴' } else { '┘' });
        }
        lines.push(Line::from(s));
    }

    lines
}

// ── Legend ────────────────────────────────────────────────────────────────────

fn draw_legend(f: &mut Frame, area: Rect, view: &ChordView) {
    let mut notes = Vec::new();
    let mut roles = Vec::new();
    for entry in &view.legend {
        let width = entry.note.len().max(entry.role.label.len()) + 2;
        let note_sty = match entry.role.index {
            Some(i) => Style::default().bg(position_color(i)).fg(Color::Black).add_modifier(Modifier::BOLD),
            None    => Style::default().fg(Color::White),
        };
        notes.push(Span::styled(format!("{:^width$}", entry.note), note_sty));
        notes.push(Span::raw(" "));
        roles.push(Span::styled(format!("{:^width$}", entry.role.label), Style::default().fg(Color::Gray)));
        roles.push(Span::raw(" "));
    }

    let lines = if view.legend.is_empty() {
        vec![Line::from(Span::styled(
            format!("No notes for {}", view.chord.symbol),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        vec![
            Line::from(notes),
            Line::from(roles),
            Line::from(vec![
                Span::styled("Root position: ", Style::default().fg(Color::DarkGray)),
                Span::raw(view.chord.notes.join(" ")),
            ]),
        ]
    };

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title(format!(" {} ", view.title())).borders(Borders::ALL)),
        area,
    );
}

// ── Status bar ────────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let chord_name = app.view.chord.type_name.as_deref().unwrap_or("unknown");
    let text = Line::from(vec![
        Span::styled("Symbol: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.view.chord.symbol.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("  │  "),
        Span::styled("Type: ", Style::default().fg(Color::DarkGray)),
        Span::styled(chord_name.to_string(), Style::default().fg(Color::Green)),
        Span::raw("  │  "),
        Span::styled(app.status_msg.clone(), Style::default().fg(Color::Yellow)),
    ]);

    f.render_widget(
        Paragraph::new(text)
            .block(Block::default().title(" Status ").borders(Borders::ALL))
            .wrap(Wrap { trim: false }),
        area,
    );
}

// ── Help ──────────────────────────────────────────────────────────────────────

fn draw_help(f: &mut Frame, area: Rect) {
    let w = Style::default().fg(Color::White);
    let line = Line::from(vec![
        Span::styled("[Tab/↑↓] ", w), Span::raw("Focus  │  "),
        Span::styled("[←→] ",     w), Span::raw("Select  │  "),
        Span::styled("[0-9] ",    w), Span::raw("Inversion  │  "),
        Span::styled("[s] ",      w), Span::raw("Sharps/flats  │  "),
        Span::styled("[Esc/q] ",  w), Span::raw("Quit"),
    ]);

    f.render_widget(
        Paragraph::new(line)
            .block(Block::default().title(" Help ").borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::chord::Dictionary;
    use crate::config::Settings;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_default_chord() {
        let app = App::new(Box::new(Dictionary), Settings::default());
        let text = screen(&app);
        assert!(text.contains("Chord Visualizer"));
        assert!(text.contains("Cmajor"));
        assert!(text.contains("Major Third"));
        assert!(text.contains("Root position: C E G"));
        assert!(text.contains(" maj7 "));
    }

    #[test]
    fn test_draw_unknown_chord() {
        let mut app = App::new(Box::new(Dictionary), Settings::default());
        app.set_chord_type("bogus");
        let text = screen(&app);
        assert!(text.contains("No notes for Cbogus"));
        assert!(text.contains("Inversion: ─"));
        assert!(!text.contains('—'));
    }

    #[test]
    fn test_piano_lines_width() {
        let app = App::new(Box::new(Dictionary), Settings::default());
        let paints = app.view.paint_keys(&app.keyboard);
        let lines = piano_lines(&paints);
        assert_eq!(lines.len(), 8);
        // 22 white keys, 4 columns each, plus the left edge
        for line in &lines {
            assert_eq!(line.width(), 22 * 4 + 1);
        }
    }

    #[test]
    fn test_piano_highlights_chord_keys() {
        let app = App::new(Box::new(Dictionary), Settings::default());
        let paints = app.view.paint_keys(&app.keyboard);
        let lines = piano_lines(&paints);
        let names = &lines[5];
        let highlighted: Vec<String> = names
            .spans
            .iter()
            .filter(|s| s.style.bg.is_some_and(|bg| bg != Color::White))
            .map(|s| s.content.trim().to_string())
            .collect();
        assert_eq!(highlighted, ["C", "E", "G", "C", "E", "G", "C", "E", "G", "C"]);
    }

    #[test]
    fn test_black_key_label_spans_divider() {
        let app = App::new(Box::new(Dictionary), Settings::default());
        let paints = app.view.paint_keys(&app.keyboard);
        let label_row: String = piano_lines(&paints)[3]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(label_row.starts_with("│  C#  D#   │"));
    }
}
