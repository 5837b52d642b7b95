//! Dashboard: a greeting and one card per record count.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::view::Dashboard;
use eduspace_core::{MemoryBackend, Session};

use super::{Ctx, spawn_call};
use crate::action::{Action, Completion};
use crate::component::Component;
use crate::theme;

pub struct DashboardScreen {
    dashboard: Dashboard<MemoryBackend>,
    backend: Arc<MemoryBackend>,
    user_name: Option<String>,
    throbber: ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl DashboardScreen {
    pub fn new(ctx: &Ctx) -> Self {
        Self {
            dashboard: Dashboard::new(ctx),
            backend: Arc::clone(&ctx.backend),
            user_name: None,
            throbber: ThrobberState::default(),
            action_tx: None,
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, title: &str, count: Option<usize>, color: Color) {
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let value = count.map_or_else(|| "…".to_owned(), |n| n.to_string());
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value,
                Style::default().fg(theme::CHALK).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(body, area);
    }
}

impl Component for DashboardScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn mount(&mut self, session: &Session) {
        if let Session::SignedIn { user, .. } = session {
            self.user_name = Some(user.name.clone());
        }
        let ticket = self.dashboard.begin_load();
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            Action::Completed(Completion::Dashboard(ticket.run(backend.as_ref()).await))
        });
    }

    fn unmount(&mut self) {
        self.dashboard.unmount();
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.dashboard.is_loading() => self.throbber.calc_next(),
            Action::Completed(Completion::Dashboard(loaded)) => {
                self.dashboard.finish_load(loaded);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Dashboard ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [greeting_area, _, cards_area, status_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .areas(inner);

        let name = self.user_name.as_deref().unwrap_or("there");
        let greeting = vec![
            Line::from(Span::styled(format!("  Welcome back, {name}"), theme::title_style())),
            Line::from(Span::styled(
                "  Overview of the school records",
                theme::label(),
            )),
        ];
        frame.render_widget(Paragraph::new(greeting), greeting_area);

        let counts = self.dashboard.counts();
        let cards: [Rect; 3] = Layout::horizontal([Constraint::Fill(1); 3])
            .spacing(1)
            .areas(cards_area);
        Self::render_card(
            frame,
            cards[0],
            "Departments",
            counts.map(|c| c.departments),
            theme::INDIGO,
        );
        Self::render_card(
            frame,
            cards[1],
            "Students",
            counts.map(|c| c.students),
            theme::TEAL,
        );
        Self::render_card(
            frame,
            cards[2],
            "Teachers",
            counts.map(|c| c.teachers),
            theme::LEAF,
        );

        if self.dashboard.is_loading() {
            let throbber = Throbber::default()
                .label("  Counting records...")
                .style(Style::default().fg(theme::TEAL))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, status_area, &mut self.throbber.clone());
        }
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("1-4", "switch"), ("L", "logout")]
    }

    fn id(&self) -> &'static str {
        "Dashboard"
    }
}
