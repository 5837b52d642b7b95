// ── Login and registration ──
//
// Holds both auth forms, validates them client-side and turns the
// backend's answer into a notification plus, on success, a `User` for
// the navigator.

use secrecy::SecretString;
use tracing::warn;

use crate::backend::Backend;
use crate::context::AppContext;
use crate::error::CoreError;
use crate::model::User;

/// Minimum length of a newly registered credential.
pub const MIN_PASSWORD_LEN: usize = 6;

const DEMO_EMAIL: &str = "admin@school.edu";
const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Default for LoginForm {
    /// Pre-filled with the demo administrator.
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.into(),
            password: DEMO_PASSWORD.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    fn validate(&self) -> Result<(), CoreError> {
        if self.password != self.confirm_password {
            return Err(CoreError::validation("Passwords do not match"));
        }
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.chars().count() < MIN_PASSWORD_LEN
        {
            return Err(CoreError::validation(format!(
                "Please fill all fields and ensure password is at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum AuthRequest {
    Login {
        email: String,
        credential: SecretString,
    },
    Register {
        name: String,
        email: String,
        credential: SecretString,
    },
}

#[derive(Debug, Clone)]
pub struct AuthTicket {
    generation: u64,
    request: AuthRequest,
}

#[derive(Debug)]
pub struct Authenticated {
    generation: u64,
    registered: bool,
    result: Result<User, CoreError>,
}

impl AuthTicket {
    pub async fn run<B: Backend>(self, backend: &B) -> Authenticated {
        let generation = self.generation;
        match self.request {
            AuthRequest::Login { email, credential } => Authenticated {
                generation,
                registered: false,
                result: backend.login(&email, &credential).await,
            },
            AuthRequest::Register {
                name,
                email,
                credential,
            } => Authenticated {
                generation,
                registered: true,
                result: backend.register(&name, &email, &credential).await,
            },
        }
    }
}

pub struct AuthController<B: Backend> {
    ctx: AppContext<B>,
    pub login: LoginForm,
    pub register: RegisterForm,
    loading: bool,
    generation: u64,
}

impl<B: Backend> AuthController<B> {
    pub fn new(ctx: &AppContext<B>) -> Self {
        Self {
            // Untagged: the sign-in toast must outlive the auth page.
            ctx: ctx.clone(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            loading: false,
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_login(&mut self) -> Option<AuthTicket> {
        if self.loading {
            return None;
        }
        if self.login.email.trim().is_empty() || self.login.password.is_empty() {
            self.ctx.notifier.error("Email and password are required");
            return None;
        }
        self.loading = true;
        self.generation += 1;
        Some(AuthTicket {
            generation: self.generation,
            request: AuthRequest::Login {
                email: self.login.email.trim().to_owned(),
                credential: SecretString::from(self.login.password.clone()),
            },
        })
    }

    /// Checks run before any backend call: the two passwords match,
    /// then every field is filled and the password is long enough.
    pub fn begin_register(&mut self) -> Option<AuthTicket> {
        if self.loading {
            return None;
        }
        if let Err(e) = self.register.validate() {
            self.ctx.notifier.error(e.to_string());
            return None;
        }
        self.loading = true;
        self.generation += 1;
        Some(AuthTicket {
            generation: self.generation,
            request: AuthRequest::Register {
                name: self.register.name.trim().to_owned(),
                email: self.register.email.trim().to_owned(),
                credential: SecretString::from(self.register.password.clone()),
            },
        })
    }

    /// Release loading and report. Returns the signed-in user on success.
    /// An outcome from before the latest submit or reset is dropped.
    pub fn finish(&mut self, outcome: Authenticated) -> Option<User> {
        if outcome.generation != self.generation {
            return None;
        }
        self.loading = false;
        match outcome.result {
            Ok(user) => {
                let message = if outcome.registered {
                    "Registration successful! Logging you in."
                } else {
                    "Logged in successfully"
                };
                self.ctx.notifier.success(message);
                Some(user)
            }
            Err(e) => {
                warn!(error = %e, "authentication failed");
                self.ctx.notifier.error(e.to_string());
                None
            }
        }
    }

    /// Back to pristine forms, as after a logout.
    pub fn reset(&mut self) {
        self.login = LoginForm::default();
        self.register = RegisterForm::default();
        self.loading = false;
        self.generation += 1;
    }

    pub async fn submit_login(&mut self) -> Option<User> {
        let ticket = self.begin_login()?;
        let backend = std::sync::Arc::clone(&self.ctx.backend);
        let outcome = ticket.run(backend.as_ref()).await;
        self.finish(outcome)
    }

    pub async fn submit_register(&mut self) -> Option<User> {
        let ticket = self.begin_register()?;
        let backend = std::sync::Arc::clone(&self.ctx.backend);
        let outcome = ticket.run(backend.as_ref()).await;
        self.finish(outcome)
    }
}
