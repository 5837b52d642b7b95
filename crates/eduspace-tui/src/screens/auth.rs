//! Login and register pages, toggled with Ctrl-R.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::view::AuthController;
use eduspace_core::{AuthPage, MemoryBackend, Session};

use super::{Ctx, spawn_call};
use crate::action::{Action, Completion};
use crate::component::Component;
use crate::theme;
use crate::widgets::centered;

const LOGIN_LABELS: [&str; 2] = ["Email", "Password"];
const REGISTER_LABELS: [&str; 4] = ["Name", "Email", "Password", "Confirm"];

pub struct AuthScreen {
    auth: AuthController<MemoryBackend>,
    backend: Arc<MemoryBackend>,
    page: AuthPage,
    field: usize,
    throbber: ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl AuthScreen {
    pub fn new(ctx: &Ctx) -> Self {
        Self {
            auth: AuthController::new(ctx),
            backend: Arc::clone(&ctx.backend),
            page: AuthPage::Login,
            field: 0,
            throbber: ThrobberState::default(),
            action_tx: None,
        }
    }

    fn labels(&self) -> &'static [&'static str] {
        match self.page {
            AuthPage::Login => &LOGIN_LABELS,
            AuthPage::Register => &REGISTER_LABELS,
        }
    }

    fn value(&self, idx: usize) -> &str {
        match (self.page, idx) {
            (AuthPage::Login, 0) => &self.auth.login.email,
            (AuthPage::Login, _) => &self.auth.login.password,
            (AuthPage::Register, 0) => &self.auth.register.name,
            (AuthPage::Register, 1) => &self.auth.register.email,
            (AuthPage::Register, 2) => &self.auth.register.password,
            (AuthPage::Register, _) => &self.auth.register.confirm_password,
        }
    }

    fn value_mut(&mut self) -> &mut String {
        match (self.page, self.field) {
            (AuthPage::Login, 0) => &mut self.auth.login.email,
            (AuthPage::Login, _) => &mut self.auth.login.password,
            (AuthPage::Register, 0) => &mut self.auth.register.name,
            (AuthPage::Register, 1) => &mut self.auth.register.email,
            (AuthPage::Register, 2) => &mut self.auth.register.password,
            (AuthPage::Register, _) => &mut self.auth.register.confirm_password,
        }
    }

    fn is_secret(&self, idx: usize) -> bool {
        match self.page {
            AuthPage::Login => idx == 1,
            AuthPage::Register => idx >= 2,
        }
    }

    fn move_field(&mut self, forward: bool) {
        let count = self.labels().len();
        self.field = if forward {
            (self.field + 1) % count
        } else {
            (self.field + count - 1) % count
        };
    }

    fn submit(&mut self) {
        let ticket = match self.page {
            AuthPage::Login => self.auth.begin_login(),
            AuthPage::Register => self.auth.begin_register(),
        };
        let Some(ticket) = ticket else {
            return;
        };
        let backend = Arc::clone(&self.backend);
        spawn_call(self.action_tx.as_ref(), async move {
            Action::Completed(Completion::Auth(ticket.run(backend.as_ref()).await))
        });
    }

    fn render_fields(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (idx, label) in self.labels().iter().enumerate() {
            let focused = idx == self.field;
            let label_style = if focused {
                theme::label_focused()
            } else {
                theme::label()
            };
            let shown = if self.is_secret(idx) {
                "•".repeat(self.value(idx).chars().count())
            } else {
                self.value(idx).to_owned()
            };
            lines.push(Line::from(vec![
                Span::styled(if focused { "▸ " } else { "  " }, label_style),
                Span::styled(format!("{label:<10}"), label_style),
                Span::styled(shown, theme::value()),
                Span::styled(if focused { "▎" } else { "" }, Style::default().fg(theme::AMBER)),
            ]));
        }
        lines
    }
}

impl Component for AuthScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn mount(&mut self, session: &Session) {
        if let Session::SignedOut { page } = session {
            self.page = *page;
        }
        self.field = 0;
    }

    fn unmount(&mut self) {
        self.auth.reset();
        self.field = 0;
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok((key.code == KeyCode::Char('r')).then_some(Action::ToggleAuthPage));
        }
        if self.auth.is_loading() {
            return Ok(None);
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_field(true),
            KeyCode::BackTab | KeyCode::Up => self.move_field(false),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.value_mut().pop();
            }
            KeyCode::Char(c) => self.value_mut().push(c),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.auth.is_loading() => self.throbber.calc_next(),
            Action::Completed(Completion::Auth(outcome)) => {
                return Ok(self.auth.finish(outcome).map(Action::SignedIn));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let (title, height) = match self.page {
            AuthPage::Login => (" EduSpace · Sign in ", 11),
            AuthPage::Register => (" EduSpace · Create account ", 13),
        };
        let card = centered(area, 56, height);
        frame.render_widget(Clear, card);

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_modal());
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(self.render_fields()), rows[1]);

        if self.auth.is_loading() {
            let label = match self.page {
                AuthPage::Login => "  Signing in...",
                AuthPage::Register => "  Creating account...",
            };
            let throbber = Throbber::default()
                .label(label)
                .style(Style::default().fg(theme::TEAL))
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, rows[2], &mut self.throbber.clone());
        } else if self.page == AuthPage::Login {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  Demo: admin@school.edu / password",
                    theme::key_hint(),
                )),
                rows[2],
            );
        }

        let toggle = match self.page {
            AuthPage::Login => " register",
            AuthPage::Register => " sign in",
        };
        let hints = Line::from(vec![
            Span::styled("  Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" submit  ", theme::key_hint()),
            Span::styled("Ctrl-R", theme::key_hint_key()),
            Span::styled(toggle, theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[3]);
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("Ctrl-C", "quit")]
    }

    fn id(&self) -> &'static str {
        "Auth"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::screens::testing;

    fn press(screen: &mut AuthScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn login_page_shows_demo_account_with_masked_password() {
        let (ctx, _center) = testing::context();
        let screen = AuthScreen::new(&ctx);
        let text = testing::render(&screen, 70, 20);
        assert!(text.contains("Sign in"));
        assert!(text.contains("admin@school.edu"));
        assert!(text.contains("••••••••"));
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let (ctx, _center) = testing::context();
        let mut screen = AuthScreen::new(&ctx);
        for _ in 0.."admin@school.edu".len() {
            press(&mut screen, KeyCode::Backspace);
        }
        for c in "dana@school.edu".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        assert_eq!(screen.auth.login.email, "dana@school.edu");

        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char('!'));
        assert_eq!(screen.auth.login.password, "password!");
    }

    #[test]
    fn ctrl_r_asks_for_the_other_page() {
        let (ctx, _center) = testing::context();
        let mut screen = AuthScreen::new(&ctx);
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(action, Some(Action::ToggleAuthPage)));
    }

    #[test]
    fn register_page_cycles_four_fields() {
        let (ctx, _center) = testing::context();
        let mut screen = AuthScreen::new(&ctx);
        screen.mount(&Session::SignedOut {
            page: AuthPage::Register,
        });
        for _ in 0..3 {
            press(&mut screen, KeyCode::Tab);
        }
        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.auth.register.confirm_password, "x");
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.field, 0);
        assert!(testing::render(&screen, 70, 20).contains("Create account"));
    }

    #[test]
    fn unmount_restores_the_prefilled_login() {
        let (ctx, _center) = testing::context();
        let mut screen = AuthScreen::new(&ctx);
        press(&mut screen, KeyCode::Backspace);
        screen.unmount();
        assert_eq!(screen.auth.login.email, "admin@school.edu");
    }
}
