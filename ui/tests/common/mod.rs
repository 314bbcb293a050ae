use std::time::Duration;

use egui_kittest::Harness;
use roster_ui::RosterApp;
use roster_ui::state::State;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DEFAULT_NETWORK_WAIT_MS: u64 = 20;
const MAX_STEPS: usize = 100;

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }
}

impl<'a> TestCtx<'a, State> {
    /// Runs `app` against a signed-in state pointed at `mock_server`.
    #[allow(unused)]
    pub fn signed_in(
        mock_server: MockServer,
        app: impl FnMut(&mut egui::Ui, &mut State) + 'a,
    ) -> Self {
        let state = State::test_signed_in(mock_server.uri());
        let harness = Harness::new_ui_state(app, state);
        Self {
            mock_server,
            harness,
        }
    }
}

impl<'a> TestCtx<'a, RosterApp> {
    /// The whole app, signed out, with `prepare` applied to the state first.
    #[allow(unused)]
    pub fn new_app(mock_server: MockServer, prepare: impl FnOnce(&mut State)) -> Self {
        let mut state = State::test(mock_server.uri());
        prepare(&mut state);
        let app = RosterApp::new(state);
        let harness = Harness::new_eframe(|_| app);
        Self {
            mock_server,
            harness,
        }
    }
}

/// Gives spawned requests and the mock server time to run.
pub async fn yield_wait_for_network(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Steps the harness until `done` holds, waiting for the network between frames.
#[allow(unused)]
pub async fn step_until<'a, T>(
    harness: &mut Harness<'a, T>,
    mut done: impl FnMut(&Harness<'a, T>) -> bool,
) -> bool {
    for _ in 0..MAX_STEPS {
        harness.step();
        if done(harness) {
            return true;
        }
        yield_wait_for_network(DEFAULT_NETWORK_WAIT_MS).await;
    }
    false
}

#[allow(unused)]
pub fn user(id: i64, first_name: &str, active: bool) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": null,
        "email": format!("{}@example.com", first_name.to_lowercase().replace(' ', ".")),
        "initials": null,
        "phone": null,
        "role": { "title": "Manager" },
        "status": u8::from(active),
        "title": null
    })
}

#[allow(unused)]
pub async fn mount_user_list(server: &MockServer, users: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": users
        })))
        .mount(server)
        .await;
}
