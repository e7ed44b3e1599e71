use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::BudgetApi;
use crate::budget::BudgetData;
use crate::error::{ApiError, LoginError};

const LOGIN_PATH: &str = "/user/login";
const BUDGET_PATH: &str = "/api/budget";

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub login: String,
    #[serde(rename = "passwd")]
    pub password: String,
}

/// Talks to the backend over HTTP. Cookies set by the login response are kept
/// and sent with every later request, so the budget calls ride the session.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, creds: &Credentials) -> Result<(), LoginError> {
        debug!(login = %creds.login, "sending login request");
        let resp = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(creds)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "login request got no response");
                LoginError::Connection(e.to_string())
            })?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!(status = status.as_u16(), "login rejected");
            Err(LoginError::Rejected { status: status.as_u16() })
        }
    }
}

#[async_trait]
impl BudgetApi for HttpClient {
    async fn get_budget(&self) -> Result<BudgetData, ApiError> {
        let resp = self.http.get(self.url(BUDGET_PATH)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16() });
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn save_budget(&self, data: &BudgetData) -> Result<(), ApiError> {
        let resp = self.http.put(self.url(BUDGET_PATH)).json(data).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_use_backend_field_names() {
        let creds = Credentials {
            login: "ala".into(),
            password: "kot".into(),
        };
        let v = serde_json::to_value(&creds).unwrap();
        assert_eq!(v, serde_json::json!({ "login": "ala", "passwd": "kot" }));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = HttpClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url(LOGIN_PATH), "http://localhost:3000/user/login");
    }
}
