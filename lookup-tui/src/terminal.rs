//! Terminal drawing.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthChar;

use lookup::{LookupView, Phase};

/// How a line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Bold,
    Dim,
    Highlight,
}

/// One screen row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Rows reserved below the dropdown for the status line.
const STATUS_ROWS: usize = 2;

/// Lay the view out as screen rows: header, trigger button, then (when open)
/// the search field followed by the visible window of options.
pub fn layout_lines(view: &LookupView, status: &str, width: u16, height: u16) -> Vec<Line> {
    let width = width as usize;
    let height = height as usize;
    let mut lines = vec![
        Line::new("City lookup", LineStyle::Bold),
        Line::new(
            "Enter/Down open   type to search   Enter pick   Esc close   Ctrl+C quit",
            LineStyle::Dim,
        ),
        Line::new("", LineStyle::Normal),
        Line::new(
            format!("[ {} {} ]", view.button_label, if view.open { "^" } else { "v" }),
            LineStyle::Bold,
        ),
    ];

    if view.open {
        let searching = if view.phase == Phase::SearchPending {
            "  (searching...)"
        } else {
            ""
        };
        if view.search_text.is_empty() {
            lines.push(Line::new(
                format!("  {}{}", view.search_placeholder, searching),
                LineStyle::Dim,
            ));
        } else {
            lines.push(Line::new(
                format!("  > {}_{}", view.search_text, searching),
                LineStyle::Normal,
            ));
        }

        let room = height.saturating_sub(lines.len() + STATUS_ROWS).max(1);
        let offset = (view.cursor + 1).saturating_sub(room);
        for entry in view.options.iter().skip(offset).take(room) {
            let style = if entry.index == view.cursor {
                LineStyle::Highlight
            } else {
                LineStyle::Normal
            };
            lines.push(Line::new(format!("  {}", entry.label), style));
        }
    }

    lines.truncate(height.saturating_sub(STATUS_ROWS));
    while lines.len() + 1 < height {
        lines.push(Line::new("", LineStyle::Normal));
    }
    lines.push(Line::new(status, LineStyle::Dim));

    for line in &mut lines {
        line.text = truncate(&line.text, width);
    }
    lines
}

fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Raw-mode alternate-screen terminal, restored on drop.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide) {
            // No Terminal exists yet, so Drop will not restore the tty
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }

        Ok(Self { stdout })
    }

    /// Redraw the whole screen.
    pub fn draw(&mut self, view: &LookupView, status: &str) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let lines = layout_lines(view, status, width, height);

        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let attribute = match line.style {
                LineStyle::Normal => Attribute::Reset,
                LineStyle::Bold => Attribute::Bold,
                LineStyle::Dim => Attribute::Dim,
                LineStyle::Highlight => Attribute::Reverse,
            };
            queue!(
                self.stdout,
                cursor::MoveTo(0, row as u16),
                SetAttribute(attribute),
                Print(&line.text),
                SetAttribute(Attribute::Reset)
            )?;
        }
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
