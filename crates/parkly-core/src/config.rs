// ── Runtime client configuration ──
//
// These types describe *how* to reach a parkly backend. The CLI builds a
// `ClientConfig` from its profile and flags and hands it in; core never
// reads config files.

use std::path::PathBuf;
use std::time::Duration;

use parkly_api::transport::{TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend URL without the `/api` prefix (e.g. `http://localhost:5000`).
    pub url: Url,
    pub tls: TlsVerification,
    /// Request timeout. `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
    /// A previously saved `Cookie` header, restored into the jar on start.
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: None,
            session_cookie: None,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar()
    }
}
