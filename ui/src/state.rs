use log::{info, warn};
use roster_business::session::MemorySessionStore;
use roster_business::{BusinessConfig, Route, SessionCredentials, SessionKey, SessionStore};

use crate::pages::{LoginPageState, UserListPage};

/// The main application state.
pub struct State {
    pub config: BusinessConfig,
    /// Only touched on the UI thread.
    pub session: Box<dyn SessionStore>,
    route: Route,
    pub login: LoginPageState,
    /// Present while the user list route is active.
    pub users: Option<UserListPage>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(default_config(), default_session())
    }
}

impl State {
    /// Starts on the user list when a usable session is already stored.
    pub fn new(config: BusinessConfig, session: Box<dyn SessionStore>) -> Self {
        let mut state = Self {
            config,
            session,
            route: Route::Login,
            login: LoginPageState::default(),
            users: None,
        };

        if SessionCredentials::from_store(&*state.session).is_some() {
            state.navigate(Route::UserList);
        }
        state
    }

    /// Signed-out state against a mock server, without public IP lookup.
    pub fn test(base_url: String) -> Self {
        Self::new(
            BusinessConfig::new(base_url).without_ip_lookup(),
            Box::new(MemorySessionStore::default()),
        )
    }

    /// Signed-in state (token `t`, company `5`) against a mock server.
    pub fn test_signed_in(base_url: String) -> Self {
        let mut session = MemorySessionStore::default();
        for (key, value) in [(SessionKey::Token, "t"), (SessionKey::CompanyId, "5")] {
            if let Err(e) = session.set(key, value) {
                warn!("Failed to seed test session: {e}");
            }
        }
        Self::new(
            BusinessConfig::new(base_url).without_ip_lookup(),
            Box::new(session),
        )
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switches screens. Leaving the user list unmounts it; entering it mounts a fresh one.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route && (route != Route::UserList || self.users.is_some()) {
            return;
        }

        if let Some(mut page) = self.users.take() {
            page.unmount();
        }
        if route == Route::UserList {
            self.users = Some(UserListPage::default());
        }

        info!("Navigating to {}", route.path());
        self.route = route;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_config() -> BusinessConfig {
    BusinessConfig::from_env().unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        BusinessConfig::default()
    })
}

#[cfg(target_arch = "wasm32")]
fn default_config() -> BusinessConfig {
    BusinessConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn default_session() -> Box<dyn SessionStore> {
    use roster_business::session::FileSessionStore;

    match FileSessionStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Session file unavailable ({e}), keeping the session in memory");
            Box::new(MemorySessionStore::default())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_session() -> Box<dyn SessionStore> {
    use roster_business::session::WebSessionStore;

    match WebSessionStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("localStorage unavailable ({e}), keeping the session in memory");
            Box::new(MemorySessionStore::default())
        }
    }
}
