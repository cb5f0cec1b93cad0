//! CLI configuration: thin wrapper around `parkly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --insecure, ...).

use std::time::Duration;

use parkly_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use parkly_config::{
    Config, Defaults, Profile, SessionFile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The backend a command talks to once profile and flags are merged.
#[derive(Debug, Clone)]
pub struct Target {
    pub profile_name: String,
    /// The stored profile, or an empty one when running from flags alone.
    pub profile: Profile,
    pub client: ClientConfig,
}

impl Target {
    /// Where this profile's session cookie is kept between runs.
    pub fn session_file(&self) -> SessionFile {
        SessionFile::for_profile(&self.profile_name)
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Load the config and merge the active profile with global flags.
///
/// Without a stored profile, `--server` alone is enough. Naming a missing
/// profile explicitly is an error.
pub fn resolve_target(global: &GlobalOpts) -> Result<Target, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() && global.server.is_none() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    let client = resolve_profile(&profile, global, &cfg.defaults)?;
    Ok(Target {
        profile_name,
        profile,
        client,
    })
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values, which take
/// priority over `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ClientConfig, CliError> {
    // 1. Server URL (flag > env > profile)
    let server = global
        .server
        .as_deref()
        .or(Some(profile.server.as_str()))
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let url = parkly_config::parse_server(server)?;

    // 2. TLS verification
    let insecure = global.insecure || profile.insecure.unwrap_or(defaults.insecure);
    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 3. Timeout (unset means none)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .or(defaults.timeout)
        .map(Duration::from_secs);

    Ok(ClientConfig {
        url,
        tls,
        timeout,
        session_cookie: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["parkly"];
        argv.extend_from_slice(args);
        argv.push("me");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn campus() -> Profile {
        Profile {
            server: "https://parking.example.com".into(),
            ca_cert: Some(PathBuf::from("/etc/parkly/ca.pem")),
            timeout: Some(20),
            ..Profile::default()
        }
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let cfg = resolve_profile(&campus(), &global(&[]), &Defaults::default()).unwrap();
        assert_eq!(cfg.url.as_str(), "https://parking.example.com/");
        assert_eq!(
            cfg.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/parkly/ca.pem"))
        );
        assert_eq!(cfg.timeout, Some(Duration::from_secs(20)));
        assert!(cfg.session_cookie.is_none());
    }

    #[test]
    fn flags_override_profile() {
        let flags = global(&["--server", "http://localhost:5000", "-k", "--timeout", "3"]);
        let cfg = resolve_profile(&campus(), &flags, &Defaults::default()).unwrap();
        assert_eq!(cfg.url.as_str(), "http://localhost:5000/");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn defaults_fill_gaps() {
        let profile = Profile {
            server: "http://localhost:5000".into(),
            ..Profile::default()
        };
        let defaults = Defaults {
            insecure: true,
            timeout: Some(9),
            ..Defaults::default()
        };
        let cfg = resolve_profile(&profile, &global(&[]), &defaults).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(9)));
    }

    #[test]
    fn missing_server_is_no_config() {
        let err = resolve_profile(&Profile::default(), &global(&[]), &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn profile_name_prefers_flag() {
        let cfg = Config {
            default_profile: Some("campus".into()),
            ..Config::default()
        };
        assert_eq!(active_profile_name(&global(&[]), &cfg), "campus");
        assert_eq!(active_profile_name(&global(&["-p", "home"]), &cfg), "home");
        assert_eq!(available_profiles(&cfg), "(none)");
    }
}
