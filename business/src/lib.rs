mod config;
mod error;
pub mod http;
mod json;
pub mod login;
mod route;
pub mod session;
pub mod users;

pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_IP_LOOKUP_URL};
pub use error::{ApiError, FieldErrors};
pub use json::{field_is_truthy, id_to_string, is_truthy};
pub use route::Route;
pub use session::{SessionCredentials, SessionError, SessionKey, SessionStore};
