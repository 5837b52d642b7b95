pub mod auth;
pub mod crud;
pub mod dashboard;
pub mod teacher_details;

use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;

use eduspace_core::{AppContext, Department, MemoryBackend, Student, Teacher};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;

pub use auth::AuthScreen;
pub use crud::CrudScreen;
pub use dashboard::DashboardScreen;
pub use teacher_details::TeacherDetailsScreen;

pub type Ctx = AppContext<MemoryBackend>;

/// One component per screen, all sharing `ctx`.
pub fn create_screens(ctx: &Ctx) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Auth, Box::new(AuthScreen::new(ctx))),
        (ScreenId::Dashboard, Box::new(DashboardScreen::new(ctx))),
        (
            ScreenId::Departments,
            Box::new(CrudScreen::<Department>::new(ctx)),
        ),
        (ScreenId::Students, Box::new(CrudScreen::<Student>::new(ctx))),
        (ScreenId::Teachers, Box::new(CrudScreen::<Teacher>::new(ctx))),
        (
            ScreenId::TeacherDetails,
            Box::new(TeacherDetailsScreen::new(ctx)),
        ),
    ]
}

/// Run `call` on the runtime and post its action when it resolves.
/// Without a sender (before `init`) the call is not started.
pub(crate) fn spawn_call<F>(action_tx: Option<&UnboundedSender<Action>>, call: F)
where
    F: Future<Output = Action> + Send + 'static,
{
    let Some(tx) = action_tx.cloned() else {
        return;
    };
    tokio::spawn(async move {
        let _ = tx.send(call.await);
    });
}
