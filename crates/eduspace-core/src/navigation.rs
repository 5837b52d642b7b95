// ── Navigation state machine ──
//
// Decides which view is mounted. Signed out, the user sees one of two
// auth pages; signed in, exactly one route. Every transition reports the
// view it unmounted so its owner can retire that view's notifications.

use strum::Display;
use tracing::info;

use crate::model::{EntityId, User};

/// Identifies a mounted view, independent of any route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ViewKind {
    Login,
    Register,
    Dashboard,
    Departments,
    Students,
    Teachers,
    TeacherDetails,
}

/// A signed-in destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Departments,
    Students,
    Teachers,
    /// Detail view for one teacher; cannot be entered without an id.
    TeacherDetails(EntityId),
}

impl Route {
    pub fn view(&self) -> ViewKind {
        match self {
            Self::Dashboard => ViewKind::Dashboard,
            Self::Departments => ViewKind::Departments,
            Self::Students => ViewKind::Students,
            Self::Teachers => ViewKind::Teachers,
            Self::TeacherDetails(_) => ViewKind::TeacherDetails,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPage {
    #[default]
    Login,
    Register,
}

impl AuthPage {
    pub fn view(self) -> ViewKind {
        match self {
            Self::Login => ViewKind::Login,
            Self::Register => ViewKind::Register,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    SignedOut {
        page: AuthPage,
    },
    SignedIn {
        user: User,
        route: Route,
        previous: Option<Route>,
    },
}

impl Session {
    fn view(&self) -> ViewKind {
        match self {
            Self::SignedOut { page } => page.view(),
            Self::SignedIn { route, .. } => route.view(),
        }
    }
}

/// Outcome of a state change: which view went away, which one appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub unmounted: ViewKind,
    pub mounted: ViewKind,
}

/// Holds the current [`Session`] and applies user-initiated transitions.
#[derive(Debug, Clone)]
pub struct Navigator {
    session: Session,
}

impl Navigator {
    /// Starts signed out, on the login page.
    pub fn new() -> Self {
        Self {
            session: Session::SignedOut {
                page: AuthPage::Login,
            },
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_view(&self) -> ViewKind {
        self.session.view()
    }

    pub fn route(&self) -> Option<&Route> {
        match &self.session {
            Session::SignedIn { route, .. } => Some(route),
            Session::SignedOut { .. } => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.session {
            Session::SignedIn { user, .. } => Some(user),
            Session::SignedOut { .. } => None,
        }
    }

    // ── Signed-out transitions ───────────────────────────────────────

    /// Flip between the login and register pages. No-op when signed in.
    pub fn toggle_auth_page(&mut self) -> Option<Transition> {
        let Session::SignedOut { page } = &self.session else {
            return None;
        };
        let next = match page {
            AuthPage::Login => AuthPage::Register,
            AuthPage::Register => AuthPage::Login,
        };
        self.replace(Session::SignedOut { page: next })
    }

    /// A successful login or registration lands on the dashboard.
    pub fn sign_in(&mut self, user: User) -> Option<Transition> {
        info!(email = %user.email, "signed in");
        self.replace(Session::SignedIn {
            user,
            route: Route::Dashboard,
            previous: None,
        })
    }

    // ── Signed-in transitions ────────────────────────────────────────

    /// Move to `route`. Ignored when signed out or already there.
    pub fn navigate(&mut self, route: Route) -> Option<Transition> {
        let Session::SignedIn {
            user,
            route: current,
            ..
        } = &self.session
        else {
            return None;
        };
        if *current == route {
            return None;
        }
        info!(from = %current.view(), to = %route.view(), "navigate");
        let next = Session::SignedIn {
            user: user.clone(),
            previous: Some(current.clone()),
            route,
        };
        self.replace(next)
    }

    /// Leave the current route. Teacher details always return to the
    /// teacher list; other routes return to where the user came from.
    pub fn back(&mut self) -> Option<Transition> {
        let Session::SignedIn {
            route, previous, ..
        } = &self.session
        else {
            return None;
        };
        if matches!(route, Route::TeacherDetails(_)) {
            return self.leave_details();
        }
        let target = previous.clone()?;
        self.navigate(target)
    }

    /// The detail fetch failed; fall back to the teacher list.
    pub fn details_missing(&mut self) -> Option<Transition> {
        match self.route() {
            Some(Route::TeacherDetails(_)) => self.leave_details(),
            _ => None,
        }
    }

    /// Back to the teacher list with no history, so a further "back"
    /// cannot reopen the detail view.
    fn leave_details(&mut self) -> Option<Transition> {
        let transition = self.navigate(Route::Teachers);
        if let Session::SignedIn { previous, .. } = &mut self.session {
            *previous = None;
        }
        transition
    }

    /// Always lands on the login page, discarding the signed-in state.
    pub fn logout(&mut self) -> Option<Transition> {
        info!("logged out");
        self.replace(Session::SignedOut {
            page: AuthPage::Login,
        })
    }

    fn replace(&mut self, next: Session) -> Option<Transition> {
        if self.session == next {
            return None;
        }
        let unmounted = self.session.view();
        let mounted = next.view();
        self.session = next;
        Some(Transition { unmounted, mounted })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
