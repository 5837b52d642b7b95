// ── Headless view controllers ──
//
// Every view the console mounts, without any rendering. A front end
// forwards user intents to these controllers and draws their state.

mod auth;
mod controller;
mod dashboard;
mod details;
mod form;
mod resource;

pub use auth::{AuthController, AuthTicket, Authenticated, LoginForm, MIN_PASSWORD_LEN, RegisterForm};
pub use controller::{
    DeleteTicket, Deleted, FormKind, FormMode, LoadTicket, Loaded, Overlay, SubmitTicket,
    Submitted, ViewController, ViewState,
};
pub use dashboard::{Counts, CountsLoaded, CountsTicket, Dashboard};
pub use details::{DetailsLoaded, DetailsOutcome, DetailsTicket, TeacherDetails, TeacherProfile};
pub use form::Form;
pub use resource::{Column, Resource};
