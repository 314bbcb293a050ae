//! Login page.
//!
//! Displays the sign-in form centered on the screen. The request runs in the
//! background and its result is applied on a later frame.

use egui::{Align, Button, Key, Layout, Response, TextEdit, Ui};
use flume::{Receiver, Sender};
use log::warn;
use roster_business::login::{LoginForm, authenticate};
use roster_business::{ApiError, BusinessConfig, Route, SessionStore};
use serde_json::Value;

use crate::state::State;
use crate::tasks;
use crate::utils::colors::COLOR_RED;

type LoginResult = Result<Value, ApiError>;

pub struct LoginPageState {
    pub form: LoginForm,
    sender: Sender<LoginResult>,
    receiver: Receiver<LoginResult>,
}

impl Default for LoginPageState {
    fn default() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            form: LoginForm::default(),
            sender,
            receiver,
        }
    }
}

impl LoginPageState {
    /// Validates the form and starts the request. Returns false when nothing was sent.
    pub fn submit(&mut self, config: &BusinessConfig, ctx: &egui::Context) -> bool {
        let Some(input) = self.form.begin_submit() else {
            return false;
        };

        let config = config.clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();
        tasks::spawn(async move {
            let result = authenticate(&config, &input).await;
            if sender.send(result).is_err() {
                warn!("Login page closed before the response arrived");
            }
            ctx.request_repaint();
        });
        true
    }

    /// Applies a finished request. Returns where to go on success.
    pub fn poll(&mut self, session: &mut dyn SessionStore) -> Option<Route> {
        let result = self.receiver.try_recv().ok()?;
        self.form.finish_submit(result, session)
    }
}

fn field_error(ui: &mut Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.colored_label(COLOR_RED, error);
    }
}

pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    if let Some(route) = state.login.poll(&mut *state.session) {
        state.navigate(route);
    }

    let mut should_submit = false;
    let form = &mut state.login.form;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Sign in to your Account");
            ui.label("Welcome back! please enter your details");
            ui.add_space(32.0);

            if let Some(error) = &form.errors.general {
                ui.colored_label(COLOR_RED, error);
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Email:");
                ui.add(
                    TextEdit::singleline(&mut form.input.email)
                        .hint_text("you@example.com")
                        .desired_width(220.0),
                );
            });
            field_error(ui, form.errors.email.as_deref());

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Password:");
                let password = ui.add(
                    TextEdit::singleline(&mut form.input.password)
                        .password(true)
                        .hint_text("at least 6 characters")
                        .desired_width(220.0),
                );
                if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    should_submit = true;
                }
            });
            field_error(ui, form.errors.password.as_deref());

            ui.add_space(16.0);

            let label = if form.is_submitting() {
                "Loading..."
            } else {
                "Sign In"
            };
            if ui
                .add_enabled(form.can_submit(), Button::new(label))
                .clicked()
            {
                should_submit = true;
            }
        })
        .response;

    if should_submit {
        state.login.submit(&state.config, ui.ctx());
    }

    response
}
