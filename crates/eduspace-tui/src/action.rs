//! Every state change in the console is expressed as an Action.
//!
//! Backend calls run on spawned tasks; their results come back as
//! [`Action::Completed`] and are routed to the screen that started them.

use eduspace_core::view::{Authenticated, CountsLoaded, Deleted, DetailsLoaded, Loaded, Submitted};
use eduspace_core::{Department, Route, Student, Teacher, User};

use crate::screen::ScreenId;

/// Result of a list view's spawned call.
#[derive(Debug)]
pub enum CrudCompletion<E> {
    Loaded(Loaded<E>),
    Submitted(Submitted<E>),
    Deleted(Deleted),
}

#[derive(Debug)]
pub enum Completion {
    Auth(Authenticated),
    Dashboard(CountsLoaded),
    Details(DetailsLoaded),
    Departments(CrudCompletion<Department>),
    Students(CrudCompletion<Student>),
    Teachers(CrudCompletion<Teacher>),
}

impl Completion {
    /// The screen that issued the call.
    pub fn screen(&self) -> ScreenId {
        match self {
            Self::Auth(_) => ScreenId::Auth,
            Self::Dashboard(_) => ScreenId::Dashboard,
            Self::Details(_) => ScreenId::TeacherDetails,
            Self::Departments(_) => ScreenId::Departments,
            Self::Students(_) => ScreenId::Students,
            Self::Teachers(_) => ScreenId::Teachers,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    Navigate(Route),
    GoBack,
    ToggleAuthPage,
    SignedIn(User),
    Logout,
    /// The teacher detail fetch failed.
    DetailsMissing,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    DismissNotifications,

    // ── Backend results ───────────────────────────────────────────
    Completed(Completion),
}
