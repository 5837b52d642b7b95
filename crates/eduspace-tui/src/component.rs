//! Component trait: what every screen implements.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::Session;

use crate::action::Action;

/// Lifecycle: `init` once, then `mount` → (`handle_key_event` | `update`
/// | `render`)* → `unmount`, repeated each time navigation enters the view.
pub trait Component: Send {
    /// Receives the sender spawned backend calls report through.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// Navigation entered this screen.
    fn mount(&mut self, _session: &Session) {}

    /// Navigation left this screen; drop view state.
    fn unmount(&mut self) {}

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process an action routed here. May return a follow-up action.
    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// While true the screen receives every key, including the global ones.
    fn captures_input(&self) -> bool {
        false
    }

    /// One-line key hints for the status bar.
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn id(&self) -> &'static str;
}
