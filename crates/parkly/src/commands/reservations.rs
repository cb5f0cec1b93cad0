//! Reservation command handlers: book, release, history, export.

use std::sync::Arc;

use chrono::TimeDelta;
use tabled::Tabled;

use parkly_core::{Controller, HistorySummary, Notice, Reservation, ReservationFilter};

use crate::cli::{GlobalOpts, HistoryArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReservationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Lot")]
    lot: String,
    #[tabled(rename = "Spot")]
    spot: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Parked")]
    parked: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Arc<Reservation>> for ReservationRow {
    fn from(r: &Arc<Reservation>) -> Self {
        Self {
            id: r.id.to_string(),
            lot: util::or_dash(r.lot.as_deref()),
            spot: util::or_dash(r.spot_id.as_ref()),
            from: util::or_dash(r.from.as_deref()),
            to: util::or_dash(r.to.as_deref()),
            parked: util::or_dash(r.duration().map(format_duration)),
            cost: util::or_dash(r.cost.map(|c| format!("{c:.2}"))),
            status: r.status().to_string(),
        }
    }
}

fn format_duration(d: TimeDelta) -> String {
    let minutes = d.num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

// ── Rendering ───────────────────────────────────────────────────────

pub fn print_history(history: &[Arc<Reservation>], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        history,
        |r| ReservationRow::from(r),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn summary_detail(s: &HistorySummary) -> String {
    output::detail_lines(&[
        ("Reservations", s.reservations.to_string()),
        ("Active", s.active.to_string()),
        ("Completed", s.completed.to_string()),
        ("Total spent", format!("{:.2}", s.total_spent)),
        ("Favourite lot", util::or_dash(s.favourite_lot.as_deref())),
    ])
}

pub fn print_summary(summary: &HistorySummary, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, summary, summary_detail, |s| {
        format!("{:.2}", s.total_spent)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Loaded history passing `filter`.
pub fn filtered(controller: &Controller, filter: &ReservationFilter) -> Vec<Arc<Reservation>> {
    controller.store().subscribe_history().matching(filter)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn book(
    controller: &Controller,
    lot_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let notice = controller.book(util::parse_id(lot_id)).await?;
    util::report_mutation(controller, &notice, global);
    if let Notice::Booked {
        reservation_id: Some(ref reservation_id),
        ..
    } = notice
    {
        output::print_hint(&format!("Release with: parkly release {reservation_id}"), global);
    }
    Ok(())
}

pub async fn release(
    controller: &Controller,
    reservation_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let notice = controller.release(util::parse_id(reservation_id)).await?;
    util::report_mutation(controller, &notice, global);
    Ok(())
}

pub async fn history(
    controller: &Controller,
    args: &HistoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_session(controller).await?;
    let filter = if args.active {
        ReservationFilter::Active
    } else if args.completed {
        ReservationFilter::Completed
    } else {
        ReservationFilter::All
    };
    print_history(&filtered(controller, &filter), global)
}

pub async fn export(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let notice = controller.export().await?;
    util::report_mutation(controller, &notice, global);
    Ok(())
}

#[cfg(test)]
mod tests {
    use parkly_core::Id;

    use super::*;

    #[test]
    fn durations_read_naturally() {
        assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
        assert_eq!(format_duration(TimeDelta::minutes(120)), "2h");
        assert_eq!(format_duration(TimeDelta::minutes(95)), "1h 35m");
    }

    #[test]
    fn completed_row_shows_cost_and_time_parked() {
        let r = Arc::new(Reservation {
            id: Id::Text("R7".into()),
            spot_id: Some(Id::Text("S3".into())),
            lot: Some("Central".into()),
            from: Some("2024-05-01T09:00:00".into()),
            to: Some("2024-05-01T10:30:00".into()),
            cost: Some(42.0),
        });
        let row = ReservationRow::from(&r);
        assert_eq!(row.spot, "S3");
        assert_eq!(row.parked, "1h 30m");
        assert_eq!(row.cost, "42.00");
        assert_eq!(row.status, "Completed");
    }

    #[test]
    fn active_row_has_no_end() {
        let r = Arc::new(Reservation {
            id: Id::Number(8),
            spot_id: None,
            lot: Some("East".into()),
            from: Some("2024-05-02 08:00:00".into()),
            to: None,
            cost: None,
        });
        let row = ReservationRow::from(&r);
        assert_eq!(row.to, "-");
        assert_eq!(row.parked, "-");
        assert_eq!(row.status, "Active");
    }
}
