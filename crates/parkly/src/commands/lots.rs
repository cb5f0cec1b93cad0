//! Lot command handlers.

use std::sync::Arc;

use tabled::Tabled;

use parkly_core::{
    Controller, CreateLotRequest, Lot, LotFilter, Spot, SpotStatus, UpdateLotRequest,
};

use crate::cli::{GlobalOpts, LotsArgs, LotsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Pin")]
    pin_code: String,
    #[tabled(rename = "Price/h")]
    price: String,
    #[tabled(rename = "Free")]
    free: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&Arc<Lot>> for LotRow {
    fn from(l: &Arc<Lot>) -> Self {
        Self {
            id: l.id.to_string(),
            name: l.name.clone(),
            address: l.address.clone(),
            pin_code: l.pin_code.clone(),
            price: format!("{:.2}", l.price),
            free: util::or_dash(l.free_spots()),
            total: util::or_dash(l.total_spots),
        }
    }
}

#[derive(Tabled)]
struct SpotRow {
    #[tabled(rename = "Spot")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Spot> for SpotRow {
    fn from(s: &Spot) -> Self {
        Self {
            id: s.id.to_string(),
            status: s.status.to_string(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

pub fn print_lots(lots: &[Arc<Lot>], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        lots,
        |l| LotRow::from(l),
        |l| l.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn print_spots(spots: &[Spot], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        spots,
        |s| SpotRow::from(s),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
        let free = spots
            .iter()
            .filter(|s| s.status == SpotStatus::Available)
            .count();
        eprintln!("{free} of {} spots free", spots.len());
    }
    Ok(())
}

/// Loaded lots passing `filter`.
pub fn filtered(controller: &Controller, filter: &LotFilter) -> Vec<Arc<Lot>> {
    controller.store().subscribe_lots().matching(filter)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: LotsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LotsCommand::List { available } => {
            util::require_session(controller).await?;
            let filter = if available {
                LotFilter::Available
            } else {
                LotFilter::All
            };
            print_lots(&filtered(controller, &filter), global)
        }

        LotsCommand::Search { query } => {
            util::require_session(controller).await?;
            print_lots(&controller.search_lots(&query), global)
        }

        LotsCommand::Create {
            name,
            address,
            pin_code,
            price,
            spots,
        } => {
            let notice = controller
                .create_lot(CreateLotRequest {
                    name,
                    address,
                    pin_code,
                    price,
                    number_of_spots: spots,
                })
                .await?;
            util::report_mutation(controller, &notice, global);
            Ok(())
        }

        LotsCommand::Update {
            id,
            name,
            address,
            pin_code,
            price,
            spots,
        } => {
            let update = UpdateLotRequest {
                name,
                address,
                pin_code,
                price,
                number_of_spots: spots,
            };
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one of --name, --address, \
                             --pin-code, --price, --spots"
                        .into(),
                });
            }
            let notice = controller.update_lot(util::parse_id(&id), update).await?;
            util::report_mutation(controller, &notice, global);
            Ok(())
        }

        LotsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete lot {id}?"), global.yes)? {
                return Ok(());
            }
            let notice = controller.delete_lot(util::parse_id(&id)).await?;
            util::report_mutation(controller, &notice, global);
            Ok(())
        }

        LotsCommand::Spots { id } => {
            let spots = controller.lot_spots(&util::parse_id(&id)).await?;
            print_spots(&spots, global)
        }
    }
}

#[cfg(test)]
mod tests {
    use parkly_core::Id;

    use super::*;

    #[test]
    fn lot_row_formats_price_and_counts() {
        let lot = Arc::new(Lot {
            id: Id::Number(1),
            name: "Central".into(),
            address: "MG Road".into(),
            pin_code: "560001".into(),
            price: 50.0,
            total_spots: Some(10),
            occupied_spots: Some(4),
            available_spots: None,
        });
        let row = LotRow::from(&lot);
        assert_eq!(row.id, "1");
        assert_eq!(row.price, "50.00");
        assert_eq!(row.free, "6");
        assert_eq!(row.total, "10");
    }

    #[test]
    fn lot_row_without_counts_shows_dashes() {
        let lot = Arc::new(Lot {
            id: Id::Text("L1".into()),
            name: "East".into(),
            address: String::new(),
            pin_code: String::new(),
            price: 20.5,
            total_spots: None,
            occupied_spots: None,
            available_spots: None,
        });
        let row = LotRow::from(&lot);
        assert_eq!(row.free, "-");
        assert_eq!(row.total, "-");
    }
}
