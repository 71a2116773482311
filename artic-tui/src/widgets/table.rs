//! Selectable artwork table.
//!
//! Plays the table widget: it renders the current page with a checkbox
//! column and turns key presses into [`TableEvent`]s for the controller.

use artic_lib::model::{Artwork, ArtworkColumn};
use artic_lib::table::{TableController, TableEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Row, Table, TableState};

use super::Paginator;

const CHECKBOX_WIDTH: u16 = 3;

/// Cursor position plus the selection logic of the checkbox column.
#[derive(Debug, Clone, Default)]
pub struct ArtworkTable {
    cursor: usize,
}

impl ArtworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, rows: usize) {
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    /// Keeps the cursor on an existing row after the page changed size.
    pub fn clamp(&mut self, rows: usize) {
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Selection after toggling the row under the cursor.
    pub fn toggle_row(&self, records: &[Artwork], selected: &[Artwork]) -> Option<TableEvent> {
        let row = records.get(self.cursor)?;
        let mut next = selected.to_vec();
        match next.iter().position(|s| s == row) {
            Some(pos) => {
                next.remove(pos);
            }
            None => next.push(row.clone()),
        }
        Some(TableEvent::Selection(next))
    }

    /// Selection after the header checkbox: selects every visible row, or
    /// deselects them all if they already are. Rows from other pages are
    /// left alone.
    pub fn toggle_page(records: &[Artwork], selected: &[Artwork]) -> TableEvent {
        let all_selected = !records.is_empty() && records.iter().all(|r| selected.contains(r));

        let next = if all_selected {
            selected
                .iter()
                .filter(|s| !records.contains(s))
                .cloned()
                .collect()
        } else {
            let mut next = selected.to_vec();
            next.extend(records.iter().filter(|r| !selected.contains(r)).cloned());
            next
        };
        TableEvent::Selection(next)
    }

    /// Draws the table and returns the area of the title header cell.
    pub fn render(&self, frame: &mut Frame, area: Rect, table: &TableController) -> Rect {
        let records = table.records();
        let selection = table.selection();
        let all_selected = !records.is_empty() && records.iter().all(|r| selection.is_selected(r));

        let mut header_cells = vec![Cell::from(checkbox(all_selected))];
        header_cells.extend(ArtworkColumn::ALL.iter().map(|column| match column {
            ArtworkColumn::Title => Cell::from(format!("▾ {}", column.header())),
            _ => Cell::from(column.header()),
        }));
        let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

        let rows = records.iter().map(|artwork| {
            let mut cells = vec![Cell::from(checkbox(selection.is_selected(artwork)))];
            cells.extend(ArtworkColumn::ALL.iter().map(|c| Cell::from(artwork.cell(*c))));
            Row::new(cells)
        });

        let widths = [
            Constraint::Length(CHECKBOX_WIDTH),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let paginator = Paginator::of(table);
        let mut title = String::from(" Artworks ");
        if let Some(filter) = table.row_filter() {
            title.push_str(&format!("· {} ", filter));
        }
        if table.is_loading() {
            title.push_str("· loading… ");
        }
        let block = Block::bordered()
            .title(title)
            .title_bottom(Line::from(format!(" {} ", paginator.label())).centered());

        let widget = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().bg(Color::DarkGray));

        let mut state = TableState::default().with_selected((!records.is_empty()).then_some(self.cursor()));
        frame.render_stateful_widget(widget, area, &mut state);

        // Border, then checkbox column and its spacing
        Rect::new(area.x + 1 + CHECKBOX_WIDTH + 1, area.y + 1, 20, 1)
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
