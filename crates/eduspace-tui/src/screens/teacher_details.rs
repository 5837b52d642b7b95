//! One teacher's profile and the students of their department.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::view::{DetailsOutcome, TeacherDetails, TeacherProfile};
use eduspace_core::{MemoryBackend, Route, Session};

use super::{Ctx, spawn_call};
use crate::action::{Action, Completion};
use crate::component::Component;
use crate::theme;

pub struct TeacherDetailsScreen {
    details: TeacherDetails<MemoryBackend>,
    backend: Arc<MemoryBackend>,
    throbber: ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl TeacherDetailsScreen {
    pub fn new(ctx: &Ctx) -> Self {
        Self {
            details: TeacherDetails::new(ctx),
            backend: Arc::clone(&ctx.backend),
            throbber: ThrobberState::default(),
            action_tx: None,
        }
    }

    fn render_profile(frame: &mut Frame, area: Rect, profile: &TeacherProfile) {
        let teacher = &profile.teacher;
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<16}"), theme::label()),
                Span::styled(value, theme::value()),
            ])
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("  {}", teacher.full_name()),
                Style::default()
                    .fg(theme::AMBER)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            row("Email", teacher.email.clone()),
            row("Department", profile.department_name.clone()),
            row("Specialization", teacher.specialization.clone()),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_students(frame: &mut Frame, area: Rect, profile: &TeacherProfile) {
        let block = Block::default()
            .title(format!(
                " Students in {} ({}) ",
                profile.department_name,
                profile.students.len()
            ))
            .title_style(theme::title_style())
            .borders(Borders::TOP)
            .border_style(theme::border_default());

        if profile.students.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "  No students in this department.",
                theme::label(),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            ["Name", "Email", "Enrolled"].map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows = profile.students.iter().map(|s| {
            Row::new(vec![
                Cell::from(s.full_name()),
                Cell::from(s.email.clone()),
                Cell::from(s.enrollment_date.clone()),
            ])
            .style(theme::table_row())
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }
}

impl Component for TeacherDetailsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn mount(&mut self, session: &Session) {
        let Session::SignedIn {
            route: Route::TeacherDetails(id),
            ..
        } = session
        else {
            return;
        };
        let ticket = self.details.begin_load(id.clone());
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            Action::Completed(Completion::Details(ticket.run(backend.as_ref()).await))
        });
    }

    fn unmount(&mut self) {
        self.details.unmount();
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.details.is_loading() => self.throbber.calc_next(),
            Action::Completed(Completion::Details(loaded)) => {
                if self.details.finish_load(loaded) == DetailsOutcome::Missing {
                    return Ok(Some(Action::DetailsMissing));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Teacher ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(profile) = self.details.profile() else {
            if self.details.is_loading() {
                let throbber = Throbber::default()
                    .label("  Loading teacher...")
                    .style(Style::default().fg(theme::TEAL))
                    .throbber_style(Style::default().fg(theme::AMBER));
                let [line, _] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
                frame.render_stateful_widget(throbber, line, &mut self.throbber.clone());
            }
            return;
        };

        let [profile_area, students_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(3)]).areas(inner);
        Self::render_profile(frame, profile_area, profile);
        Self::render_students(frame, students_area, profile);
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("Esc", "back to teachers")]
    }

    fn id(&self) -> &'static str {
        "TeacherDetails"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eduspace_core::EntityId;
    use tokio::sync::mpsc;

    use super::*;
    use crate::screens::testing;

    fn mounted(ctx: &Ctx, id: &str) -> (TeacherDetailsScreen, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut screen = TeacherDetailsScreen::new(ctx);
        screen.init(tx).unwrap();
        screen.mount(&testing::signed_in(Route::TeacherDetails(EntityId::from(id))));
        (screen, rx)
    }

    #[tokio::test]
    async fn shows_profile_and_department_students() {
        let (ctx, _center) = testing::context();
        let (mut screen, mut rx) = mounted(&ctx, "1");
        let done = rx.recv().await.unwrap();
        assert!(screen.update(done).unwrap().is_none());

        let text = testing::render(&screen, 90, 18);
        assert!(text.contains("Dr. Emily Brown"));
        assert!(text.contains("Students in Computer Science (1)"));
        assert!(text.contains("Alice Smith"));
        assert!(!text.contains("Bob Johnson"));
    }

    #[tokio::test]
    async fn unknown_teacher_asks_to_leave() {
        let (ctx, _center) = testing::context();
        let (mut screen, mut rx) = mounted(&ctx, "404");
        let done = rx.recv().await.unwrap();
        let follow_up = screen.update(done).unwrap();
        assert!(matches!(follow_up, Some(Action::DetailsMissing)));
    }
}
