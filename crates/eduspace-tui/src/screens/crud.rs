//! List screen shared by departments, students and teachers: a filtered
//! table, a department scope line, a modal form and a delete prompt.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::join::ViewRow;
use eduspace_core::view::{
    DeleteTicket, FormMode, LoadTicket, Overlay, Resource, SubmitTicket, ViewController,
};
use eduspace_core::{
    Department, Entity, EntityId, Field, MemoryBackend, Route, Session, Student, Teacher,
};

use super::{Ctx, spawn_call};
use crate::action::{Action, Completion, CrudCompletion};
use crate::component::Component;
use crate::theme;
use crate::widgets::centered;
use crate::widgets::sub_tabs::render_sub_tabs;

/// Screen-side knowledge about a listed kind.
pub trait CrudResource: Resource {
    const TITLE: &'static str;

    fn wrap(event: CrudCompletion<Self>) -> Completion;

    /// `None` when the completion belongs to another kind.
    fn unwrap(completion: Completion) -> Option<CrudCompletion<Self>>;

    /// Where Enter on a row leads.
    fn detail_route(_id: &EntityId) -> Option<Route> {
        None
    }
}

impl CrudResource for Department {
    const TITLE: &'static str = "Departments";

    fn wrap(event: CrudCompletion<Self>) -> Completion {
        Completion::Departments(event)
    }

    fn unwrap(completion: Completion) -> Option<CrudCompletion<Self>> {
        match completion {
            Completion::Departments(event) => Some(event),
            _ => None,
        }
    }
}

impl CrudResource for Student {
    const TITLE: &'static str = "Students";

    fn wrap(event: CrudCompletion<Self>) -> Completion {
        Completion::Students(event)
    }

    fn unwrap(completion: Completion) -> Option<CrudCompletion<Self>> {
        match completion {
            Completion::Students(event) => Some(event),
            _ => None,
        }
    }
}

impl CrudResource for Teacher {
    const TITLE: &'static str = "Teachers";

    fn wrap(event: CrudCompletion<Self>) -> Completion {
        Completion::Teachers(event)
    }

    fn unwrap(completion: Completion) -> Option<CrudCompletion<Self>> {
        match completion {
            Completion::Teachers(event) => Some(event),
            _ => None,
        }
    }

    fn detail_route(id: &EntityId) -> Option<Route> {
        Some(Route::TeacherDetails(id.clone()))
    }
}

// ── Screen ───────────────────────────────────────────────────────────

pub struct CrudScreen<E: CrudResource> {
    view: ViewController<E, MemoryBackend>,
    backend: Arc<MemoryBackend>,
    table_state: TableState,
    searching: bool,
    /// Focused input in the modal form.
    field: usize,
    throbber: ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl<E: CrudResource> CrudScreen<E> {
    pub fn new(ctx: &Ctx) -> Self {
        Self {
            view: ViewController::new(ctx),
            backend: Arc::clone(&ctx.backend),
            table_state: TableState::default(),
            searching: false,
            field: 0,
            throbber: ThrobberState::default(),
            action_tx: None,
        }
    }

    // ── Spawned calls ───────────────────────────────────────────

    fn spawn_load(&self, ticket: LoadTicket) {
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            let loaded = ticket.run::<E, MemoryBackend>(backend.as_ref()).await;
            Action::Completed(E::wrap(CrudCompletion::Loaded(loaded)))
        });
    }

    fn spawn_submit(&self, ticket: SubmitTicket<E>) {
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            let submitted = ticket.run(backend.as_ref()).await;
            Action::Completed(E::wrap(CrudCompletion::Submitted(submitted)))
        });
    }

    fn spawn_delete(&self, ticket: DeleteTicket) {
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            let deleted = ticket.run::<E, MemoryBackend>(backend.as_ref()).await;
            Action::Completed(E::wrap(CrudCompletion::Deleted(deleted)))
        });
    }

    // ── Selection ───────────────────────────────────────────────

    fn selected_row(&self) -> Option<&ViewRow<E>> {
        self.view.rows().get(self.table_state.selected()?)
    }

    fn selected_id(&self) -> Option<EntityId> {
        self.selected_row().map(|row| row.record.id().clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.view.rows().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        self.move_selection(0);
    }

    // ── Key handling per mode ───────────────────────────────────

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut query = self.view.query().to_owned();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.searching = false;
                return;
            }
            KeyCode::Backspace => {
                if query.pop().is_none() {
                    return;
                }
            }
            KeyCode::Char(c) => query.push(c),
            _ => return,
        }
        let ticket = self.view.set_query(query);
        self.clamp_selection();
        self.spawn_load(ticket);
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.cancel_modal();
            }
            KeyCode::Enter => {
                if let Some(ticket) = self.view.begin_submit() {
                    self.spawn_submit(ticket);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.move_field(true),
            KeyCode::BackTab | KeyCode::Up => self.move_field(false),
            code => self.edit_field(code),
        }
    }

    fn move_field(&mut self, forward: bool) {
        let count = E::FORM_FIELDS.len();
        self.field = if forward {
            (self.field + 1) % count
        } else {
            (self.field + count - 1) % count
        };
    }

    fn focused_field(&self) -> Option<Field> {
        E::FORM_FIELDS.get(self.field).copied()
    }

    fn edit_field(&mut self, code: KeyCode) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field == Field::Department {
            let forward = match code {
                KeyCode::Right | KeyCode::Char(' ') => true,
                KeyCode::Left => false,
                _ => return,
            };
            self.cycle_department(forward);
            return;
        }
        let Some(value) = self.view.form_mut().and_then(|f| f.value_mut(field)) else {
            return;
        };
        match code {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => {}
        }
    }

    /// Step the department select through the loaded departments.
    fn cycle_department(&mut self, forward: bool) {
        let options: Vec<EntityId> = self
            .view
            .departments()
            .iter()
            .map(|d| d.id.clone())
            .collect();
        if options.is_empty() {
            return;
        }
        let Some(form) = self.view.form_mut() else {
            return;
        };
        let current = options
            .iter()
            .position(|id| id.as_str() == form.get(Field::Department));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        if let Some(id) = options.get(next) {
            form.set(Field::Department, id.as_str());
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(ticket) = self.view.confirm_delete() {
                    self.spawn_delete(ticket);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.view.cancel_delete();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.table_state.select(Some(0)),
            KeyCode::Char('G') => self.move_selection(isize::MAX),
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('f') if E::JOINS_DEPARTMENTS => {
                let ticket = self.view.cycle_department_scope();
                self.spawn_load(ticket);
            }
            KeyCode::Char('r') => {
                let ticket = self.view.begin_load();
                self.spawn_load(ticket);
            }
            KeyCode::Char('n') => {
                if self.view.open_create() {
                    self.field = 0;
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    if self.view.open_edit(&id) {
                        self.field = 0;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.view.request_delete(&id);
                }
            }
            KeyCode::Enter => {
                return self
                    .selected_id()
                    .and_then(|id| E::detail_route(&id))
                    .map(Action::Navigate);
            }
            _ => {}
        }
        None
    }

    // ── Rendering ───────────────────────────────────────────────

    fn scope_line(&self) -> Line<'static> {
        let mut labels = vec!["All".to_owned()];
        labels.extend(self.view.departments().iter().map(|d| d.name.clone()));
        let active = self.view.department_scope().map_or(0, |scope| {
            self.view
                .departments()
                .iter()
                .position(|d| &d.id == scope)
                .map_or(usize::MAX, |i| i + 1)
        });
        let mut line = render_sub_tabs(&labels, active);
        line.spans.insert(0, Span::styled(" Department  ", theme::label()));
        line
    }

    fn search_line(&self) -> Line<'static> {
        let query = self.view.query();
        let mut spans = vec![Span::styled(" / ", theme::key_hint_key())];
        if query.is_empty() && !self.searching {
            spans.push(Span::styled(
                format!("Search {}...", E::KIND.plural()),
                theme::key_hint(),
            ));
        } else {
            spans.push(Span::styled(query.to_owned(), theme::value()));
        }
        if self.searching {
            spans.push(Span::styled("▎", Style::default().fg(theme::AMBER)));
        }
        Line::from(spans)
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let rows = self.view.rows();
        if rows.is_empty() && !self.view.is_loading() {
            let message = format!("  No {} found.", E::KIND.plural());
            frame.render_widget(Paragraph::new(Span::styled(message, theme::label())), area);
            return;
        }

        let header = Row::new(
            E::COLUMNS
                .iter()
                .map(|c| Cell::from(c.title).style(theme::table_header())),
        );
        let body = rows.iter().map(|row| {
            Row::new(
                E::COLUMNS
                    .iter()
                    .map(|c| Cell::from(row.cell(c.field).to_owned())),
            )
            .style(theme::table_row())
        });
        let widths = vec![Constraint::Fill(1); E::COLUMNS.len()];
        let table = Table::new(body, widths)
            .header(header)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸");

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn department_label(&self, id: &str) -> String {
        if id.is_empty() {
            return "(select)".into();
        }
        self.view
            .departments()
            .iter()
            .find(|d| d.id.as_str() == id)
            .map_or_else(|| id.to_owned(), |d| d.name.clone())
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let Overlay::Form {
            mode,
            form,
            submitting,
        } = self.view.overlay()
        else {
            return;
        };
        let height = u16::try_from(E::FORM_FIELDS.len()).unwrap_or(u16::MAX) + 6;
        let popup = centered(area, 64, height);
        frame.render_widget(Clear, popup);

        let verb = match mode {
            FormMode::Create => "New",
            FormMode::Edit(_) => "Edit",
        };
        let block = Block::default()
            .title(format!(" {verb} {} ", E::KIND))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme::border_modal());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![Line::from("")];
        for (idx, (field, value)) in form.fields().enumerate() {
            let focused = idx == self.field;
            let label_style = if focused {
                theme::label_focused()
            } else {
                theme::label()
            };
            let required = if E::REQUIRED.contains(&field) { "*" } else { " " };
            let shown = if field == Field::Department {
                format!("◂ {} ▸", self.department_label(value))
            } else {
                value.to_owned()
            };
            let cursor = focused && field != Field::Department;
            lines.push(Line::from(vec![
                Span::styled(if focused { "▸ " } else { "  " }, label_style),
                Span::styled(format!("{:<16}{required} ", field.to_string()), label_style),
                Span::styled(shown, theme::value()),
                Span::styled(if cursor { "▎" } else { "" }, Style::default().fg(theme::AMBER)),
            ]));
        }
        lines.push(Line::from(""));

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        frame.render_widget(Paragraph::new(lines), body);

        if *submitting {
            let throbber = Throbber::default()
                .label("  Saving...")
                .style(Style::default().fg(theme::TEAL))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, footer, &mut self.throbber.clone());
        } else {
            let hints = Line::from(vec![
                Span::styled("  Tab", theme::key_hint_key()),
                Span::styled(" next  ", theme::key_hint()),
                Span::styled("◂ ▸", theme::key_hint_key()),
                Span::styled(" department  ", theme::key_hint()),
                Span::styled("Enter", theme::key_hint_key()),
                Span::styled(" save  ", theme::key_hint()),
                Span::styled("Esc", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), footer);
        }
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect) {
        let Some(prompt) = self.view.confirm_prompt() else {
            return;
        };
        let popup = centered(area, 60, 7);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm delete ")
            .title_style(Style::default().fg(theme::BRICK))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BRICK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {prompt}"), theme::value())),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y", theme::key_hint_key()),
                Span::styled(" delete  ", theme::key_hint()),
                Span::styled("n", theme::key_hint_key()),
                Span::styled(" cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl<E: CrudResource> Component for CrudScreen<E> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn mount(&mut self, _session: &Session) {
        let ticket = self.view.begin_load();
        self.spawn_load(ticket);
    }

    fn unmount(&mut self) {
        self.view.unmount();
        self.searching = false;
        self.field = 0;
        self.table_state.select(None);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.view.overlay() {
            Overlay::Form { .. } => self.handle_form_key(key),
            Overlay::ConfirmDelete(_) => self.handle_confirm_key(key),
            Overlay::None if self.searching => self.handle_search_key(key),
            Overlay::None => return Ok(self.handle_list_key(key)),
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.view.is_loading() => self.throbber.calc_next(),
            Action::Completed(completion) => match E::unwrap(completion) {
                Some(CrudCompletion::Loaded(loaded)) => {
                    if self.view.finish_load(loaded) {
                        self.clamp_selection();
                    }
                }
                Some(CrudCompletion::Submitted(submitted)) => {
                    if let Some(ticket) = self.view.finish_submit(submitted) {
                        self.spawn_load(ticket);
                    }
                }
                Some(CrudCompletion::Deleted(deleted)) => {
                    if let Some(ticket) = self.view.finish_delete(deleted) {
                        self.spawn_load(ticket);
                    }
                }
                None => {}
            },
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ({}) ", E::TITLE, self.view.rows().len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let scope_height = u16::from(E::JOINS_DEPARTMENTS);
        let [search_area, scope_area, table_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(scope_height),
            Constraint::Min(1),
        ])
        .areas(inner);

        let [query_area, spinner_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(14)]).areas(search_area);
        frame.render_widget(Paragraph::new(self.search_line()), query_area);
        if self.view.is_loading() {
            let throbber = Throbber::default()
                .label("Loading")
                .style(Style::default().fg(theme::TEAL))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, spinner_area, &mut self.throbber.clone());
        }
        if E::JOINS_DEPARTMENTS {
            frame.render_widget(Paragraph::new(self.scope_line()), scope_area);
        }

        self.render_table(frame, table_area);
        self.render_form(frame, area);
        self.render_confirm(frame, area);
    }

    fn captures_input(&self) -> bool {
        self.searching || !matches!(self.view.overlay(), Overlay::None)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if E::JOINS_DEPARTMENTS {
            &[
                ("/", "search"),
                ("f", "department"),
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
            ]
        } else {
            &[("/", "search"), ("n", "new"), ("e", "edit"), ("d", "delete")]
        }
    }

    fn id(&self) -> &'static str {
        E::TITLE
    }
}
