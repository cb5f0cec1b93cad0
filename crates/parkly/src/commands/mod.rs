//! Command dispatch: bridges CLI args -> controller operations -> output formatting.

pub mod admin;
pub mod auth;
pub mod config_cmd;
pub mod lots;
pub mod reservations;
pub mod util;
pub mod views;

use parkly_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Target};
use crate::error::CliError;

/// Build a controller for the active profile, restoring its saved session.
pub fn connect(global: &GlobalOpts) -> Result<(Controller, Target), CliError> {
    let target = config::resolve_target(global)?;
    let mut client = target.client.clone();
    client.session_cookie = target.session_file().load();
    let controller = Controller::new(client)?;
    Ok((controller, target))
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    target: &Target,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Me => auth::me(controller, global).await,
        Command::Login(args) => auth::login(controller, target, args, global).await,
        Command::Logout => auth::logout(controller, target, global).await,
        Command::Register(args) => auth::register(controller, args, global).await,
        Command::Lots(args) => lots::handle(controller, args, global).await,
        Command::Book { lot_id } => reservations::book(controller, &lot_id, global).await,
        Command::Release { reservation_id } => {
            reservations::release(controller, &reservation_id, global).await
        }
        Command::History(args) => reservations::history(controller, &args, global).await,
        Command::Export => reservations::export(controller, global).await,
        Command::Users => admin::users(controller, global).await,
        Command::Summary => admin::summary(controller, global).await,
        // Local commands are handled before dispatch
        Command::Config(_) | Command::Completions(_) | Command::Routes | Command::Open { .. } => {
            unreachable!()
        }
    }
}
