// API HTTP client
//
// Wraps `reqwest::Client` with `/api` URL construction, session cookie
// handling and error extraction. Endpoint groups (auth, admin, user) are
// implemented as inherent methods in separate files so this module stays
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Path prefix every endpoint lives under.
const API_PREFIX: &str = "/api";

/// Failure body shape: `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Per-request options: method, optional JSON body and header overrides.
///
/// Headers set here replace the client defaults (`Content-Type` and
/// `Accept` are both `application/json` unless overridden).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Serialization)?);
        Ok(self)
    }

    /// Override (or add) a single header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the parkly backend.
///
/// Every request targets `{base_url}/api{path}` and carries the session
/// cookie from the shared jar. A single attempt is made per call: no
/// retries and no caching.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference for persisting and restoring the session.
    cookie_jar: Option<Arc<Jar>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the backend authenticates with a session cookie).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// Cookie persistence is unavailable: the jar (if any) belongs to the
    /// caller's client.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The backend base URL (without the `/api` prefix).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Session cookie ───────────────────────────────────────────────

    /// The `Cookie` header value the jar would send to the backend.
    ///
    /// Returns `None` before login or when no jar is attached.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    /// Seed the jar from a previously captured `Cookie` header value.
    pub fn restore_cookies(&self, header: &str) {
        let Some(jar) = self.cookie_jar.as_ref() else {
            return;
        };
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.add_cookie_str(pair, &self.base_url);
        }
        trace!("session cookie restored");
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build the full URL for an API path: `{base}/api{path}`.
    pub fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}{API_PREFIX}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one request and decode the JSON response body.
    ///
    /// On a non-success status the error carries the backend's `error`
    /// field, or the status text when the body has none.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("{} {}", options.method, url);

        let mut builder = self.http.request(options.method, url).headers(options.headers);
        if let Some(ref body) = options.body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;

        parse_response(resp).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(path, RequestOptions::get()).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(path, RequestOptions::post()).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        self.request(path, RequestOptions::put().json(body)?).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(path, RequestOptions::delete()).await
    }
}

/// Turn a response into `T`, or into an [`Error::Api`] on failure status.
///
/// An empty success body decodes as JSON `null`.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = error_message(status, &body);
        debug!(status = status.as_u16(), %message, "request rejected");
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let text = if body.trim().is_empty() {
        "null"
    } else {
        body.as_str()
    };

    serde_json::from_str(text).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status_text(status))
}

/// The reason phrase for a status, or its number when there is none.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_field() {
        let msg = error_message(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid credentials"}"#);
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn error_message_falls_back_to_status_text() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Bad Gateway"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"message":"gone"}"#),
            "Not Found"
        );
        assert_eq!(error_message(StatusCode::FORBIDDEN, r#"{"error":""}"#), "Forbidden");
    }

    #[test]
    fn status_text_without_reason_uses_number() {
        let status = StatusCode::from_u16(599).expect("valid status");
        assert_eq!(status_text(status), "599");
    }

    #[test]
    fn api_url_keeps_base_path() {
        let base = Url::parse("https://parking.example.com/app/").expect("valid url");
        let client = ApiClient::with_client(reqwest::Client::new(), base);
        let url = client.api_url("/auth/me").expect("valid path");
        assert_eq!(url.as_str(), "https://parking.example.com/app/api/auth/me");
    }
}
