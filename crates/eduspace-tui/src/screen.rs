//! Screen identifiers and their mapping to navigation views.

use std::fmt;

use eduspace_core::{Route, ViewKind};

/// One mounted component per variant. Only the four tabs are reachable
/// by number keys; the others are entered through navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Login and register pages.
    Auth,
    Dashboard,
    Departments,
    Students,
    Teachers,
    TeacherDetails,
}

impl ScreenId {
    /// Tabs in tab-bar order.
    pub const TABS: [ScreenId; 4] = [
        Self::Dashboard,
        Self::Departments,
        Self::Students,
        Self::Teachers,
    ];

    pub fn for_view(view: ViewKind) -> Self {
        match view {
            ViewKind::Login | ViewKind::Register => Self::Auth,
            ViewKind::Dashboard => Self::Dashboard,
            ViewKind::Departments => Self::Departments,
            ViewKind::Students => Self::Students,
            ViewKind::Teachers => Self::Teachers,
            ViewKind::TeacherDetails => Self::TeacherDetails,
        }
    }

    /// Number key (1-4) for a tab; `None` for the rest.
    pub fn number(self) -> Option<u8> {
        Self::TABS
            .iter()
            .position(|&s| s == self)
            .and_then(|i| u8::try_from(i + 1).ok())
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::TABS.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// The tab a screen belongs to. Teacher details sits under Teachers.
    pub fn tab(self) -> Option<Self> {
        match self {
            Self::Auth => None,
            Self::TeacherDetails => Some(Self::Teachers),
            tab => Some(tab),
        }
    }

    /// Next tab, wrapping.
    pub fn next(self) -> Self {
        let idx = self.tab_index().unwrap_or(0);
        Self::TABS[(idx + 1) % Self::TABS.len()]
    }

    /// Previous tab, wrapping.
    pub fn prev(self) -> Self {
        let idx = self.tab_index().unwrap_or(0);
        Self::TABS[(idx + Self::TABS.len() - 1) % Self::TABS.len()]
    }

    fn tab_index(self) -> Option<usize> {
        let tab = self.tab()?;
        Self::TABS.iter().position(|&s| s == tab)
    }

    /// Route that opens this tab.
    pub fn route(self) -> Option<Route> {
        match self {
            Self::Dashboard => Some(Route::Dashboard),
            Self::Departments => Some(Route::Departments),
            Self::Students => Some(Route::Students),
            Self::Teachers => Some(Route::Teachers),
            Self::Auth | Self::TeacherDetails => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Departments => "Departments",
            Self::Students => "Students",
            Self::Teachers => "Teachers",
            Self::TeacherDetails => "Teacher",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_cover_the_tabs_only() {
        assert_eq!(ScreenId::from_number(1), Some(ScreenId::Dashboard));
        assert_eq!(ScreenId::from_number(4), Some(ScreenId::Teachers));
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(5), None);
        assert_eq!(ScreenId::Students.number(), Some(3));
        assert_eq!(ScreenId::Auth.number(), None);
    }

    #[test]
    fn tab_cycling_wraps_and_details_count_as_teachers() {
        assert_eq!(ScreenId::Teachers.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Teachers);
        assert_eq!(ScreenId::TeacherDetails.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::TeacherDetails.prev(), ScreenId::Students);
    }

    #[test]
    fn every_view_has_a_screen() {
        assert_eq!(ScreenId::for_view(ViewKind::Register), ScreenId::Auth);
        assert_eq!(
            ScreenId::for_view(ViewKind::TeacherDetails),
            ScreenId::TeacherDetails
        );
        assert_eq!(ScreenId::Students.route(), Some(Route::Students));
        assert_eq!(ScreenId::TeacherDetails.route(), None);
    }
}
