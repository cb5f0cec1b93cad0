// Session endpoints
//
// Cookie-based login/logout, identity lookup and registration. The login
// endpoint sets a session cookie in the client's jar; every later request
// sends it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginResponse, Me, Message};

/// Fields submitted by `POST /auth/register`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl ApiClient {
    /// Who the current session belongs to.
    ///
    /// `GET /auth/me`. An anonymous session still answers `200` with
    /// `{"authenticated": false}`.
    pub async fn me(&self) -> Result<Me, Error> {
        self.get("/auth/me").await
    }

    /// Authenticate with email and password.
    ///
    /// `POST /auth/login`. On success the session cookie is stored in the
    /// client's jar and used for all subsequent requests.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("/auth/login", &body).await
    }

    /// End the current session.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<Message, Error> {
        debug!("logging out");
        self.post_empty::<Option<Message>>("/auth/logout")
            .await
            .map(Option::unwrap_or_default)
    }

    /// Create a user account. The new account still has to log in.
    ///
    /// `POST /auth/register`
    pub async fn register(&self, registration: &Registration) -> Result<Message, Error> {
        debug!(email = %registration.email, "registering account");
        let body = json!({
            "name": registration.name,
            "email": registration.email,
            "password": registration.password.expose_secret(),
        });
        self.post::<Option<Message>>("/auth/register", &body)
            .await
            .map(Option::unwrap_or_default)
    }
}
