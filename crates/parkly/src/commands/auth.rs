//! Session commands: me, login, logout, register.

use std::io::IsTerminal;

use secrecy::SecretString;
use tracing::warn;

use parkly_core::{Controller, Identity, RegisterRequest, Route};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::config::Target;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Rendering ───────────────────────────────────────────────────────

fn identity_detail(identity: &Identity) -> String {
    if !identity.is_authenticated() {
        return "Not logged in".into();
    }
    output::detail_lines(&[
        ("Name", util::or_dash(identity.name.as_deref())),
        ("Email", util::or_dash(identity.email.as_deref())),
        ("Role", util::or_dash(identity.role)),
        ("Home", Route::landing(identity).path().to_owned()),
    ])
}

/// Print who the session belongs to.
pub fn print_identity(identity: &Identity, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, identity, identity_detail, |i| {
        i.email.clone().unwrap_or_else(|| "anonymous".into())
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn me(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = controller.refresh_identity().await?;
    print_identity(&identity, global)
}

pub async fn login(
    controller: &Controller,
    target: &Target,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interactive = std::io::stdin().is_terminal();
    let no_credentials = || CliError::NoCredentials {
        profile: target.profile_name.clone(),
    };

    let email = match args.email.or_else(|| target.profile.email.clone()) {
        Some(email) => email,
        None if interactive => util::prompt_text("Email", "email")?,
        None => return Err(no_credentials()),
    };
    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => match parkly_config::resolve_password(&target.profile, &target.profile_name) {
            Some(password) => password,
            None if interactive => util::prompt_password("Password: ")?,
            None => return Err(no_credentials()),
        },
    };

    let identity = controller.login(&email, &password).await?;

    match controller.session_cookie() {
        Some(cookie) => {
            if let Err(e) = target.session_file().save(&cookie) {
                warn!(error = %e, "failed to persist session");
            }
        }
        None => warn!("backend did not set a session cookie"),
    }

    output::print_notice(
        &format!(
            "Logged in as {} ({})",
            identity.display_name(),
            util::or_dash(identity.role)
        ),
        global,
    );
    output::print_hint(
        &format!("Next: parkly open {}", Route::landing(&identity).path()),
        global,
    );
    Ok(())
}

pub async fn logout(
    controller: &Controller,
    target: &Target,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    controller.logout().await?;
    if let Err(e) = target.session_file().clear() {
        warn!(error = %e, "failed to remove saved session");
    }
    output::print_notice("Logged out", global);
    Ok(())
}

pub async fn register(
    controller: &Controller,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => util::prompt_password("Choose a password: ")?,
    };

    let notice = controller
        .register(RegisterRequest {
            name: args.name,
            email: args.email,
            password,
        })
        .await?;
    util::report_mutation(controller, &notice, global);
    Ok(())
}

#[cfg(test)]
mod tests {
    use parkly_core::Role;

    use super::*;

    #[test]
    fn anonymous_detail() {
        assert_eq!(identity_detail(&Identity::anonymous()), "Not logged in");
    }

    #[test]
    fn user_detail_names_landing_page() {
        let identity = Identity {
            role: Some(Role::User),
            name: Some("Asha".into()),
            email: Some("asha@example.com".into()),
        };
        let detail = identity_detail(&identity);
        assert!(detail.contains("asha@example.com"));
        assert!(detail.contains("user"));
        assert!(detail.contains("/dashboard"));
    }
}
