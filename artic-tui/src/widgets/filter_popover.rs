//! Title column filter popover: a numeric input and a "select" button.

use artic_lib::api::query::RowFilter;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

/// Result of pressing "select".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSubmit {
    /// Keep rows starting in or after the entered year.
    Apply(RowFilter),
    /// The input was empty; drop any filter.
    Clear,
    /// The input is not a number; nothing happens.
    Invalid,
}

/// Open/closed overlay holding the numeric input buffer.
#[derive(Debug, Clone, Default)]
pub struct FilterPopover {
    open: bool,
    input: String,
}

impl FilterPopover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Accepts digits, and a minus sign in first position.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '-' && self.input.is_empty()) {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Turns the input into a filter. Closes the popover unless the input
    /// is invalid.
    pub fn submit(&mut self) -> FilterSubmit {
        let result = if self.input.is_empty() {
            FilterSubmit::Clear
        } else {
            match self.input.parse::<i32>() {
                Ok(year) => FilterSubmit::Apply(RowFilter::min_start_year(year)),
                Err(_) => FilterSubmit::Invalid,
            }
        };

        if result != FilterSubmit::Invalid {
            self.open = false;
        }
        result
    }

    /// Draws the popover anchored below `anchor` (the title header cell).
    pub fn render(&self, frame: &mut Frame, anchor: Rect) {
        if !self.open {
            return;
        }

        let screen = frame.area();
        let width = 24.min(screen.width);
        let height = 5.min(screen.height);
        let x = anchor.x.min(screen.width.saturating_sub(width));
        let y = (anchor.y + 1).min(screen.height.saturating_sub(height));
        let area = Rect::new(x, y, width, height);

        let input = if self.input.is_empty() {
            Span::styled("start year", Style::default().dim())
        } else {
            Span::raw(self.input.as_str())
        };
        let lines = vec![
            Line::from(vec![Span::raw("▏"), input, Span::raw("▕")]),
            Line::from(""),
            Line::from(Span::styled(
                "[ select ]",
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(Block::bordered()), area);
    }
}
