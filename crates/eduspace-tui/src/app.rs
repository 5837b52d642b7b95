//! Application core: event loop, navigation, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use eduspace_core::{Navigator, NotificationCenter, Severity, Transition};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{Ctx, create_screens};
use crate::theme;
use crate::tui::Tui;

const TOAST_WIDTH: u16 = 46;
const MAX_TOASTS: usize = 4;

/// Top-level application state and event loop.
pub struct App {
    navigator: Navigator,
    notifications: NotificationCenter,
    /// Screen of the navigator's current view.
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    tick_rate: Duration,
    render_rate: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(
        ctx: &Ctx,
        notifications: NotificationCenter,
        tick_rate: Duration,
        render_rate: Duration,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(ctx).into_iter().collect();

        Self {
            navigator: Navigator::new(),
            notifications,
            active_screen: ScreenId::Auth,
            screens,
            running: true,
            help_visible: false,
            tick_rate,
            render_rate,
            action_tx,
            action_rx,
        }
    }

    /// Hand every screen the action sender, then mount the first view.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        self.active_screen = ScreenId::for_view(self.navigator.current_view());
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.mount(self.navigator.session());
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(self.tick_rate, self.render_rate);
        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    fn active(&self) -> Option<&dyn Component> {
        self.screens.get(&self.active_screen).map(Box::as_ref)
    }

    /// Ctrl-C always quits. A screen holding a text field or a modal gets
    /// every other key; otherwise global keys win over the screen's own.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let captured = self.active().is_some_and(|s| s.captures_input());
        if !captured {
            let global = match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Char(c @ '1'..='4') => c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(ScreenId::from_number)
                    .map(Action::SwitchScreen),
                KeyCode::Tab => Some(Action::SwitchScreen(self.active_screen.next())),
                KeyCode::BackTab => Some(Action::SwitchScreen(self.active_screen.prev())),
                KeyCode::Esc => Some(Action::GoBack),
                KeyCode::Char('L') => Some(Action::Logout),
                KeyCode::Char('x') => Some(Action::DismissNotifications),
                _ => None,
            };
            if global.is_some() {
                return Ok(global);
            }
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                self.notifications.tick();
                self.update_screen(self.active_screen, Action::Tick)?;
            }

            Action::Render => {}
            Action::Resize(width, height) => debug!(width, height, "terminal resized"),

            Action::SwitchScreen(target) => {
                if let Some(route) = target.route() {
                    let transition = self.navigator.navigate(route);
                    self.apply_transition(transition);
                }
            }
            Action::Navigate(route) => {
                let transition = self.navigator.navigate(route);
                self.apply_transition(transition);
            }
            Action::GoBack => {
                let transition = self.navigator.back();
                self.apply_transition(transition);
            }
            Action::ToggleAuthPage => {
                let transition = self.navigator.toggle_auth_page();
                self.apply_transition(transition);
            }
            Action::SignedIn(user) => {
                let transition = self.navigator.sign_in(user);
                self.apply_transition(transition);
            }
            Action::Logout => {
                let transition = self.navigator.logout();
                self.apply_transition(transition);
            }
            Action::DetailsMissing => {
                let transition = self.navigator.details_missing();
                self.apply_transition(transition);
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::DismissNotifications => self.notifications.clear(),

            // Late results go to their owner even after it unmounted;
            // the controller's generation check discards them.
            Action::Completed(completion) => {
                self.update_screen(completion.screen(), Action::Completed(completion))?;
            }
        }
        Ok(())
    }

    fn update_screen(&mut self, id: ScreenId, action: Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Unmount the view that went away and mount the one that appeared.
    fn apply_transition(&mut self, transition: Option<Transition>) {
        let Some(Transition { unmounted, mounted }) = transition else {
            return;
        };
        debug!(from = %unmounted, to = %mounted, "transition");
        self.notifications.retire_source(unmounted);
        if let Some(screen) = self.screens.get_mut(&ScreenId::for_view(unmounted)) {
            screen.unmount();
        }
        self.active_screen = ScreenId::for_view(mounted);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.mount(self.navigator.session());
            debug!(screen = screen.id(), "mounted");
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.navigator.user().is_none() {
            if let Some(screen) = self.active() {
                screen.render(frame, area);
            }
        } else {
            let [content, tab_bar, status_bar] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

            if let Some(screen) = self.active() {
                screen.render(frame, content);
            }
            self.render_tab_bar(frame, tab_bar);
            self.render_status_bar(frame, status_bar);
        }

        self.render_toasts(frame, area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let current = self.active_screen.tab();
        let titles: Vec<Line> = ScreenId::TABS
            .iter()
            .map(|&id| {
                let style = if Some(id) == current {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let number = id.number().unwrap_or_default();
                Line::from(Span::styled(format!(" {number} {} ", id.label()), style))
            })
            .collect();

        let selected = ScreenId::TABS
            .iter()
            .position(|&s| Some(s) == current)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        if let Some(user) = self.navigator.user() {
            spans.push(Span::styled(
                format!("● {} ({})", user.name, user.role),
                Style::default().fg(theme::LEAF),
            ));
            spans.push(Span::styled(" │", theme::key_hint()));
        }
        let screen_hints = self.active().map(|s| s.hints()).unwrap_or_default();
        for (key, label) in screen_hints
            .iter()
            .chain([("?", "help"), ("q", "quit")].iter())
        {
            spans.push(Span::styled(format!(" {key}"), theme::key_hint_key()));
            spans.push(Span::styled(format!(" {label}"), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// The latest toasts stacked in the top-right corner, in arrival order.
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let mut y = area.y + 1;
        let toasts: Vec<_> = self.notifications.visible().collect();
        let skip = toasts.len().saturating_sub(MAX_TOASTS);
        for toast in toasts.iter().skip(skip) {
            let height = 3;
            if y + height > area.bottom() {
                break;
            }
            let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, height);
            let style = theme::toast(toast.severity);
            let icon = match toast.severity {
                Severity::Success => "✓",
                Severity::Error => "✗",
            };
            let stamp = toast.created_at.with_timezone(&Local).format("%H:%M:%S");
            let block = Block::default()
                .title(format!(" {icon} {stamp} "))
                .title_style(style.add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style);
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Span::styled(toast.message.as_str(), theme::value()))
                    .wrap(Wrap { trim: true })
                    .block(block),
                rect,
            );
            y += height;
        }
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_area = crate::widgets::centered(area, 58, 22);
        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_modal());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |name: &'static str| {
            Line::from(Span::styled(
                format!("  {name}"),
                Style::default().fg(theme::TEAL),
            ))
        };
        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-4", "Jump to tab"),
            entry("Tab", "Next tab"),
            entry("Esc", "Back / close"),
            entry("L", "Log out"),
            Line::from(""),
            section("Lists"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("g/G", "Top / bottom"),
            entry("/", "Search"),
            entry("f", "Cycle department filter"),
            entry("n e d", "New / edit / delete"),
            entry("Enter", "Open teacher details"),
            entry("r", "Reload"),
            Line::from(""),
            section("Global"),
            entry("x", "Dismiss notifications"),
            entry("?", "This help"),
            entry("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                      Esc or ? to close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use eduspace_core::{EntityId, Route, ViewKind};

    use super::*;
    use crate::screens::testing;

    fn app() -> App {
        let (ctx, center) = testing::context();
        let mut app = App::new(
            &ctx,
            center,
            Duration::from_millis(250),
            Duration::from_millis(33),
        );
        app.init_screens().unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(KeyEvent::from(code)).unwrap() {
            app.process_action(action).unwrap();
        }
    }

    /// Process queued actions until `done` holds, waiting on spawned calls.
    async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        while !done(app) {
            let action = app.action_rx.recv().await.unwrap();
            app.process_action(action).unwrap();
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        testing::buffer_text(terminal.backend().buffer())
    }

    async fn signed_in_app() -> App {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        settle(&mut app, |a| a.navigator.user().is_some()).await;
        app
    }

    #[tokio::test]
    async fn demo_login_lands_on_the_dashboard() {
        let mut app = signed_in_app().await;
        assert_eq!(app.active_screen, ScreenId::Dashboard);

        app.notifications.tick();
        let text = screen_text(&app);
        assert!(text.contains("Welcome back, Admin User"));
        assert!(text.contains("Logged in successfully"));
        assert!(text.contains("1 Dashboard"));
    }

    #[tokio::test]
    async fn global_keys_are_ignored_while_signed_out() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.active_screen, ScreenId::Auth);

        let quit = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(quit, Some(Action::Quit)));
    }

    #[tokio::test]
    async fn number_keys_and_back_follow_the_navigator() {
        let mut app = signed_in_app().await;
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_screen, ScreenId::Students);
        assert_eq!(app.navigator.current_view(), ViewKind::Students);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_screen, ScreenId::Teachers);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_screen, ScreenId::Students);
    }

    #[tokio::test]
    async fn missing_teacher_falls_back_to_the_list() {
        let mut app = signed_in_app().await;
        app.process_action(Action::Navigate(Route::TeacherDetails(EntityId::from(
            "999",
        ))))
        .unwrap();
        assert_eq!(app.active_screen, ScreenId::TeacherDetails);

        settle(&mut app, |a| a.active_screen == ScreenId::Teachers).await;
        assert_eq!(app.navigator.route(), Some(&Route::Teachers));
    }

    #[tokio::test]
    async fn logout_returns_to_the_login_page() {
        let mut app = signed_in_app().await;
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.active_screen, ScreenId::Auth);
        assert!(app.navigator.user().is_none());
        assert!(screen_text(&app).contains("Sign in"));
    }

    #[tokio::test]
    async fn help_overlay_swallows_keys_until_closed() {
        let mut app = signed_in_app().await;
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        assert!(screen_text(&app).contains("Keyboard Shortcuts"));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_screen, ScreenId::Dashboard);

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible);
    }

    #[tokio::test]
    async fn dismiss_clears_visible_toasts() {
        let mut app = signed_in_app().await;
        app.notifications.tick();
        assert!(!app.notifications.is_empty());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.notifications.is_empty());
    }
}
