//! The artwork table screen and its event loop.

use artic_lib::ArticClient;
use artic_lib::table::{Applied, FetchOutcome, FetchRequest, TableConfig, TableController, TableEvent};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::terminal::TerminalGuard;
use crate::widgets::{ArtworkTable, FilterPopover, FilterSubmit, Paginator};

const HELP: &str = "↑↓ move · space select · a select page · ←→ page · f filter · q quit";

/// Single-screen app: one table controller, its widget state, and the
/// channel fetch tasks report back on.
pub struct App {
    client: ArticClient,
    table: TableController,
    view: ArtworkTable,
    popover: FilterPopover,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
    quit: bool,
}

impl App {
    /// Creates the app and the receiving end of its fetch channel.
    pub fn new(client: ArticClient, config: TableConfig) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            client,
            table: TableController::new(config),
            view: ArtworkTable::new(),
            popover: FilterPopover::new(),
            outcomes: tx,
            quit: false,
        };
        (app, rx)
    }

    /// Runs until the user quits or the terminal event stream ends.
    pub async fn run(
        mut self,
        terminal: &mut TerminalGuard,
        mut outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    ) -> Result<(), AppError> {
        let mut events = EventStream::new();

        let request = self.table.start();
        self.spawn_fetch(request);

        while !self.quit {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                Some(outcome) = outcomes.recv() => self.on_outcome(outcome),
                event = events.next() => match event {
                    Some(Ok(event)) => self.on_terminal_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }

        info!("Quitting");
        Ok(())
    }

    /// Runs a fetch on its own task; the UI stays interactive meanwhile.
    fn spawn_fetch(&self, request: FetchRequest) {
        let client = self.client.clone();
        let tx = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = request.run(&client).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(outcome);
        });
    }

    fn on_outcome(&mut self, outcome: FetchOutcome) {
        if self.table.apply(outcome) == Applied::Updated {
            self.view.clamp(self.table.records().len());
        }
    }

    fn on_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.on_key(key);
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        if self.popover.is_open() {
            self.on_popover_key(key.code);
            return;
        }

        let paginator = Paginator::of(&self.table);
        let records = self.table.records();
        let selected = self.table.selection().selected();

        let event = match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.view.move_down(records.len());
                None
            }
            KeyCode::Char(' ') => self.view.toggle_row(records, selected),
            KeyCode::Char('a') => Some(ArtworkTable::toggle_page(records, selected)),
            KeyCode::Left | KeyCode::Char('h') => page_event(paginator.prev()),
            KeyCode::Right | KeyCode::Char('l') => page_event(paginator.next()),
            KeyCode::Home => page_event(paginator.first_page()),
            KeyCode::End => page_event(paginator.last_page()),
            KeyCode::Char('f') => {
                self.popover.toggle();
                None
            }
            _ => None,
        };

        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn on_popover_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('f') => self.popover.close(),
            KeyCode::Backspace => self.popover.backspace(),
            KeyCode::Enter => match self.popover.submit() {
                FilterSubmit::Apply(filter) => {
                    info!("Filtering rows: {}", filter);
                    let request = self.table.set_row_filter(Some(filter));
                    self.spawn_fetch(request);
                }
                FilterSubmit::Clear => {
                    if self.table.row_filter().is_some() {
                        info!("Clearing row filter");
                        let request = self.table.set_row_filter(None);
                        self.spawn_fetch(request);
                    }
                }
                FilterSubmit::Invalid => debug!("Ignoring filter input {:?}", self.popover.input()),
            },
            KeyCode::Char(c) => self.popover.push_char(c),
            _ => {}
        }
    }

    fn dispatch(&mut self, event: TableEvent) {
        let page_change = matches!(event, TableEvent::Page { .. });
        if let Some(request) = self.table.handle(event) {
            self.spawn_fetch(request);
        }
        if page_change {
            self.view.reset();
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(2)]).areas(frame.area());

        let title_cell = self.view.render(frame, table_area, &self.table);

        let footer = vec![
            Line::from(vec![
                Span::raw("Number of selected rows: "),
                Span::styled(
                    self.table.selected_count().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(HELP, Style::default().add_modifier(Modifier::DIM))),
        ];
        frame.render_widget(Paragraph::new(footer), footer_area);

        self.popover.render(frame, title_cell);
    }
}

fn page_event(target: Option<usize>) -> Option<TableEvent> {
    target.map(|page| TableEvent::Page { page: Some(page) })
}
