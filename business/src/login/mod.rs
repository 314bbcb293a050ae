//! Login flow: validation, authentication and post-login routing.

mod api;
mod flow;
mod input;
mod outcome;

pub use api::{LOOPBACK_IP, LoginRequest, resolve_public_ip, submit_login};
pub use flow::{LoginForm, LoginPhase, authenticate, login, logout};
pub use input::{
    CHECK_CREDENTIALS_MESSAGE, INVALID_EMAIL_MESSAGE, LoginErrors, LoginInput, MIN_PASSWORD_LEN,
    SHORT_PASSWORD_MESSAGE, is_valid_email,
};
pub use outcome::{
    DEFAULT_LOGIN_ERROR, LoginOutcome, NETWORK_ERROR_MESSAGE, UNEXPECTED_RESPONSE_MESSAGE,
    WELCOME_MESSAGE, interpret_login_response,
};
