//! Login screen state: two fields and a four-state request flow.

use tracing::info;

use crate::api::{Credentials, HttpClient};
use crate::cli::input::LineEdit;
use crate::error::LoginError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Login,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub login: LineEdit,
    pub password: LineEdit,
    pub focus: LoginField,
    pub state: LoginState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            login: LineEdit::default(),
            password: LineEdit::masked(),
            focus: LoginField::Login,
            state: LoginState::Idle,
        }
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_mut(&mut self) -> &mut LineEdit {
        match self.focus {
            LoginField::Login => &mut self.login,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Login => LoginField::Password,
            LoginField::Password => LoginField::Login,
        };
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            login: self.login.value.clone(),
            password: self.password.value.clone(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == LoginState::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoginState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Drops the previous error and marks the request as pending.
    pub fn begin(&mut self) {
        self.state = LoginState::Submitting;
    }

    pub fn finish(&mut self, result: Result<(), LoginError>) {
        self.state = match result {
            Ok(()) => {
                info!(login = %self.login.value, "logged in");
                LoginState::Success
            }
            Err(e) => LoginState::Error(e.user_message().to_string()),
        };
    }

    pub async fn submit(&mut self, client: &HttpClient) -> &LoginState {
        self.begin();
        let result = client.login(&self.credentials()).await;
        self.finish(result);
        &self.state
    }
}
