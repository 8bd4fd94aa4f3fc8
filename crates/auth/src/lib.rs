//! `storefront-auth`: session context and credential forms.
//!
//! This crate is intentionally decoupled from HTTP: it validates what the user
//! typed and holds the session established by a successful login.

pub mod login;
pub mod registration;
pub mod session;

pub use login::{LoginError, LoginForm, LoginRequest};
pub use registration::{RegisterRequest, RegistrationError, RegistrationForm};
pub use session::{BearerToken, Session, SessionContext};
