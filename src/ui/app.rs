use std::io;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::map;
use crate::models::{BusinessRecord, Field};
use crate::store::RecordStore;

use super::forms::{BusinessForm, ConfirmDelete, LABEL_WIDTH};
use super::helpers::{centered_rect, record_detail_lines, surface_error};
use super::screens::DirectoryScreen;

/// Height of the search bar at the top of the screen.
const SEARCH_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Launches URLs in the user's browser. Swappable so tests never spawn one.
pub type LinkOpener = fn(&str) -> io::Result<()>;

fn open_in_browser(url: &str) -> io::Result<()> {
    open::that(url)
}

/// Fine-grained modes layered over the directory screen.
enum Mode {
    Normal,
    Searching,
    Adding(BusinessForm),
    Editing { id: String, form: BusinessForm },
    ConfirmDelete(ConfirmDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The record store is the
/// only thing that mutates businesses; the app merely forwards user intent.
pub struct App {
    store: RecordStore,
    screen: DirectoryScreen,
    mode: Mode,
    status: Option<StatusMessage>,
    open_link: LinkOpener,
}

impl App {
    pub fn new(store: RecordStore) -> Self {
        let screen = DirectoryScreen::new(store.records());
        let mut app = Self {
            store,
            screen,
            mode: Mode::Normal,
            status: None,
            open_link: open_in_browser,
        };

        if let Some(warning) = app.store.warning() {
            let text = warning.to_string();
            app.set_status(text, StatusKind::Warning);
        } else if app.store.is_empty() {
            app.set_status(
                "No business data found. Press '+' to add one.",
                StatusKind::Warning,
            );
        } else {
            app.set_status(app.screen.summary(), StatusKind::Info);
        }
        app
    }

    /// Replace the browser launcher used for map lookups.
    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.open_link = opener;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Businesses currently listed, after search and sort.
    pub fn visible(&self) -> &[BusinessRecord] {
        &self.screen.results
    }

    pub fn selected(&self) -> Option<&BusinessRecord> {
        self.screen.current()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Feed one key press through the current mode. Returns `true` when the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching => self.handle_search(code)?,
            Mode::Adding(form) => self.handle_add(code, form)?,
            Mode::Editing { id, form } => self.handle_edit(code, id, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.screen.has_query() {
                    self.clear_search();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('/') | KeyCode::Char('f') => return Ok(Mode::Searching),
            KeyCode::Char('c') | KeyCode::Char('C') => self.clear_search(),
            KeyCode::Char('o') | KeyCode::Char('O') => {
                let option = self.screen.cycle_sort(self.store.records());
                self.set_status(format!("Sorted by {}.", option.label()), StatusKind::Info);
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::Adding(BusinessForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(record) = self.screen.current() {
                    let mode = Mode::Editing {
                        id: record.id().to_string(),
                        form: BusinessForm::from_record(record),
                    };
                    self.clear_status();
                    return Ok(mode);
                }
                self.set_status("No business selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(record) = self.screen.current() {
                    let confirm = ConfirmDelete::from(record);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                self.set_status("No business selected to delete.", StatusKind::Error);
            }
            KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char('M') => self.open_map(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_search(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.clear_search();
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => return Ok(Mode::Normal),
            KeyCode::Up => {
                self.screen.move_selection(-1);
                return Ok(Mode::Searching);
            }
            KeyCode::Down => {
                self.screen.move_selection(1);
                return Ok(Mode::Searching);
            }
            KeyCode::PageUp => {
                self.screen.move_selection(-PAGE_STEP);
                return Ok(Mode::Searching);
            }
            KeyCode::PageDown => {
                self.screen.move_selection(PAGE_STEP);
                return Ok(Mode::Searching);
            }
            KeyCode::Backspace => {
                let mut query = self.screen.query.clone();
                query.pop();
                self.screen.set_query(query, self.store.records());
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut query = self.screen.query.clone();
                query.push(ch);
                self.screen.set_query(query, self.store.records());
            }
            _ => return Ok(Mode::Searching),
        }

        self.set_status(self.screen.summary(), StatusKind::Info);
        Ok(Mode::Searching)
    }

    fn handle_add(&mut self, code: KeyCode, mut form: BusinessForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add business cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => match self.store.insert(&form.draft) {
                Ok(record) => {
                    self.screen.refresh(self.store.records());
                    self.screen.focus(record.id());
                    self.set_status(format!("Added {}.", record.name()), StatusKind::Info);
                    return Ok(Mode::Normal);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            _ => Self::edit_form(&mut form, code),
        }
        Ok(Mode::Adding(form))
    }

    fn handle_edit(&mut self, code: KeyCode, id: String, mut form: BusinessForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => match self.store.update(&id, &form.draft) {
                Ok(record) => {
                    self.screen.refresh(self.store.records());
                    self.screen.focus(record.id());
                    self.set_status(format!("Updated {}.", record.name()), StatusKind::Info);
                    return Ok(Mode::Normal);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            _ => Self::edit_form(&mut form, code),
        }
        Ok(Mode::Editing { id, form })
    }

    /// Keys shared by the add and edit forms: focus movement and typing.
    fn edit_form(form: &mut BusinessForm, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete(&confirm.id) {
                    Ok(removed) => {
                        self.screen.refresh(self.store.records());
                        if removed {
                            self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
                        } else {
                            self.set_status(
                                format!("{} was already removed.", confirm.name),
                                StatusKind::Warning,
                            );
                        }
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn clear_search(&mut self) {
        self.screen.set_query(String::new(), self.store.records());
        self.set_status(self.screen.summary(), StatusKind::Info);
    }

    fn open_map(&mut self) {
        let Some(record) = self.screen.current() else {
            self.set_status("No business selected.", StatusKind::Error);
            return;
        };

        let url = map::record_url(record);
        let text = format!(
            "Opening map for {} at {}...",
            record.name(),
            record.address()
        );
        let Some(url) = url else {
            self.set_status(
                "No name or address available for this business.",
                StatusKind::Warning,
            );
            return;
        };

        match (self.open_link)(&url) {
            Ok(()) => {
                info!(%url, "opened map lookup");
                self.set_status(text, StatusKind::Info);
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to open map lookup");
                self.set_status(format!("Could not open map: {err}"), StatusKind::Error);
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);
        self.draw_results(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Adding(form) => self.draw_form(frame, area, "Add New Business", form),
            Mode::Editing { form, .. } => self.draw_form(frame, area, "Edit Business", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal | Mode::Searching => {}
        }
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let searching = matches!(self.mode, Mode::Searching);
        let border_style = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("Search • Sort: {}", self.screen.sort.label()));
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", self.screen.query)))
            .block(block.clone());
        frame.render_widget(paragraph, area);

        if searching {
            let inner = block.inner(area);
            let cursor_x =
                inner.x + "Search: ".len() as u16 + self.screen.query.chars().count() as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        if self.screen.results.is_empty() {
            let text = if self.store.is_empty() {
                "No businesses yet. Press '+' to add one."
            } else {
                "No results found for your query. Try adding a new business!"
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Businesses"));
            frame.render_widget(message, area);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let items: Vec<ListItem> = self
            .screen
            .results
            .iter()
            .map(|record| {
                let mut spans = vec![Span::styled(
                    record.name().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if !record.category().trim().is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", record.category()),
                        Style::default().fg(Color::Gray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = format!(
            "Businesses ({}/{})",
            self.screen.results.len(),
            self.store.len()
        );
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(Some(self.screen.selected));
        frame.render_stateful_widget(list, columns[0], &mut state);

        let details = self
            .screen
            .current()
            .map(record_detail_lines)
            .unwrap_or_default();
        let paragraph = Paragraph::new(details)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, columns[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[/]", " Search   "),
                ("[o]", " Sort   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[m]", " Map   "),
                ("[c]", " Clear   "),
                ("[q]", " Quit"),
            ],
            Mode::Searching => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Done   "),
                ("[Esc]", " Clear search"),
            ],
            Mode::Adding(_) | Mode::Editing { .. } => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDelete(_) => &[("[y]", " Delete   "), ("[n]", " Keep")],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BusinessForm) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = Field::EDITABLE
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x =
            inner.x + LABEL_WIDTH as u16 + form.value_len(form.active_field()) as u16;
        let cursor_y = inner.y + form.active_row() as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(Span::styled(
                "Confirm Delete",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Are you sure you want to delete '{}'?", confirm.name)),
            Line::from(""),
            Line::from(Span::styled(
                "y / Enter to delete • n / Esc to keep",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Delete Business"));
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
