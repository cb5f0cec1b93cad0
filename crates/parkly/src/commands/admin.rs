//! Admin overviews (users, occupancy) and the role-dependent summary.

use tabled::Tabled;

use parkly_core::{Controller, LotOccupancy, UserAccount};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{reservations, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&UserAccount> for UserRow {
    fn from(u: &UserAccount) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

#[derive(Tabled)]
struct OccupancyRow {
    #[tabled(rename = "Lot")]
    lot: String,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Occupied")]
    occupied: u32,
    #[tabled(rename = "Free")]
    free: u32,
    #[tabled(rename = "Occupancy")]
    occupancy: String,
}

impl From<&LotOccupancy> for OccupancyRow {
    fn from(o: &LotOccupancy) -> Self {
        Self {
            lot: o.lot.clone(),
            total: o.total,
            occupied: o.occupied,
            free: o.free(),
            occupancy: format!("{:.0}%", o.occupancy_percent()),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

pub fn print_users(users: &[UserAccount], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        users,
        |u| UserRow::from(u),
        |u| u.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn print_occupancy(rows: &[LotOccupancy], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        rows,
        |o| OccupancyRow::from(o),
        |o| o.lot.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn users(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let users = controller.list_users().await?;
    print_users(&users, global)
}

/// Occupancy per lot for admins, spending totals for users.
pub async fn summary(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = util::require_session(controller).await?;
    if identity.is_admin() {
        let rows = controller.occupancy_summary().await?;
        print_occupancy(&rows, global)
    } else {
        reservations::print_summary(&controller.history_summary(), global)
    }
}
