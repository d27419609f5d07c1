//! Exit processing - duration/fee computation and exit-state persistence.
//!
//! The surrounding system historically kept two representations of "this
//! vehicle left": the in-place `exit_time`/`is_parked` update on the vehicle
//! row, and a standalone `vehicle_exits` row. The engine treats both as
//! projections of one exit event; [`ExitWriteMode`] selects which to persist
//! per deployment. All writes for one exit happen in a single transaction.

use crate::config::Settings;
use crate::core::fees::FeeSchedule;
use crate::core::lookup::find_vehicle_by_ticket;
use crate::entities::{ParkingTicket, VehicleExit, parking_ticket, vehicle, vehicle_exit};
use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*,
};
use serde::Serialize;
use tracing::info;

/// Which projection(s) of the exit event get persisted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExitWriteMode {
    /// Only update the vehicle row in place
    VehicleOnly,
    /// Only create a `vehicle_exits` row
    ExitRecordOnly,
    /// Update the vehicle row and create an exit record
    #[default]
    Both,
}

/// Parked duration as a pure function of the two timestamps, exact to the
/// second. Never derived from anything but `exit - entry`.
#[must_use]
pub fn parked_duration(entry: DateTime<Utc>, exit: DateTime<Utc>) -> Duration {
    exit - entry
}

/// What the exit flow hands back for receipt printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitReceipt {
    /// Ticket number that was presented
    pub ticket_number: String,
    /// Plate number of the exiting vehicle
    pub vehicle_number: String,
    /// Entry timestamp, fixed `YYYY-MM-DD HH:MM:SS` format
    pub entry_time: String,
    /// Exit timestamp, fixed `YYYY-MM-DD HH:MM:SS` format
    pub exit_time: String,
    /// Parked duration in whole seconds
    pub duration_seconds: i64,
    /// Fee computed by the fee schedule
    pub fee: f64,
    /// Identifier of the created exit record, when one was written
    pub exit_record_id: Option<i64>,
}

/// Processes a vehicle exit against a presented ticket number.
///
/// Looks up the vehicle, computes duration and fee, marks the paired ticket
/// used, and persists the exit event per `mode` - all within one transaction.
/// An unknown ticket fails with [`Error::TicketNotFound`] and writes nothing.
pub async fn process_exit(
    db: &DatabaseConnection,
    ticket_number: &str,
    now: DateTime<Utc>,
    schedule: &impl FeeSchedule,
    mode: ExitWriteMode,
) -> Result<ExitReceipt> {
    let ticket_number = ticket_number.trim();
    if ticket_number.is_empty() {
        return Err(Error::InvalidInput {
            message: "exit ticket number is required".to_string(),
        });
    }

    let txn = db.begin().await?;

    let vehicle =
        find_vehicle_by_ticket(&txn, ticket_number)
            .await?
            .ok_or_else(|| Error::TicketNotFound {
                ticket: ticket_number.to_string(),
            })?;

    let duration = parked_duration(vehicle.entry_time, now);
    let fee = schedule.amount(duration, &vehicle.vehicle_type);

    if matches!(mode, ExitWriteMode::VehicleOnly | ExitWriteMode::Both) {
        let mut vehicle_model: vehicle::ActiveModel = vehicle.clone().into();
        vehicle_model.exit_time = Set(Some(now));
        vehicle_model.is_parked = Set(false);
        vehicle_model.update(&txn).await?;
    }

    // The ticket is consumed regardless of which exit projection is written
    if let Some(ticket) = ParkingTicket::find()
        .filter(parking_ticket::Column::TicketNumber.eq(ticket_number))
        .one(&txn)
        .await?
    {
        let mut ticket_model: parking_ticket::ActiveModel = ticket.into();
        ticket_model.is_used = Set(true);
        ticket_model.amount = Set(fee);
        ticket_model.update(&txn).await?;
    }

    let exit_record_id = if matches!(mode, ExitWriteMode::ExitRecordOnly | ExitWriteMode::Both) {
        let record = vehicle_exit::ActiveModel {
            ticket_number: Set(ticket_number.to_string()),
            vehicle_number: Set(vehicle.plate_number.clone()),
            exit_time: Set(now),
            print_count: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        Some(record.id)
    } else {
        None
    };

    txn.commit().await?;

    info!(
        ticket = %ticket_number,
        plate = %vehicle.plate_number,
        duration_seconds = duration.num_seconds(),
        fee,
        "vehicle exit processed"
    );

    Ok(ExitReceipt {
        ticket_number: ticket_number.to_string(),
        vehicle_number: vehicle.plate_number,
        entry_time: crate::core::format_timestamp(vehicle.entry_time),
        exit_time: crate::core::format_timestamp(now),
        duration_seconds: duration.num_seconds(),
        fee,
        exit_record_id,
    })
}

/// Records one physical receipt print by atomically incrementing the exit
/// record's print count at the database level.
///
/// Deliberately not idempotent: each physical print triggers one call, so
/// repeated calls increment repeatedly.
pub async fn acknowledge_print<C>(db: &C, exit_record_id: i64) -> Result<vehicle_exit::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the exit record exists
    VehicleExit::find_by_id(exit_record_id)
        .one(db)
        .await?
        .ok_or(Error::ExitRecordNotFound { id: exit_record_id })?;

    // Perform atomic update: print_count = print_count + 1
    VehicleExit::update_many()
        .col_expr(
            vehicle_exit::Column::PrintCount,
            Expr::col(vehicle_exit::Column::PrintCount).add(1),
        )
        .filter(vehicle_exit::Column::Id.eq(exit_record_id))
        .exec(db)
        .await?;

    // Return the updated record
    VehicleExit::find_by_id(exit_record_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::StorageInconsistent {
            message: format!("exit record {exit_record_id} vanished during print update"),
        })
}

/// Lists the most recent exit records, newest first.
///
/// `limit` defaults to the configured page size and is clamped to the
/// configured maximum.
pub async fn list_recent_exits(
    db: &DatabaseConnection,
    limit: Option<u64>,
    settings: &Settings,
) -> Result<Vec<vehicle_exit::Model>> {
    VehicleExit::find()
        .order_by_desc(vehicle_exit::Column::ExitTime)
        .limit(crate::core::effective_limit(limit, settings))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::fees::RateTable;
    use crate::entities::Vehicle;
    use crate::test_utils::{
        enter_test_vehicle, enter_vehicle_at, fixed_clock, setup_test_db, test_settings,
    };
    use chrono::TimeZone;
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_parked_duration_is_exact() {
        let entry = fixed_clock();
        let exit = Utc.with_ymd_and_hms(2025, 1, 1, 14, 30, 0).unwrap();
        assert_eq!(parked_duration(entry, exit).num_seconds(), 9000);
        assert_eq!(parked_duration(entry, entry).num_seconds(), 0);
        // A skewed clock yields a negative duration rather than a lie
        assert_eq!(parked_duration(exit, entry).num_seconds(), -9000);
    }

    #[tokio::test]
    async fn test_process_exit_full_flow() -> Result<()> {
        let db = setup_test_db().await?;
        let receipt = enter_test_vehicle(&db, "B 1234 XYZ").await?;

        let exit_at = Utc.with_ymd_and_hms(2025, 1, 1, 14, 30, 0).unwrap();
        let schedule = RateTable::default();
        let exit = process_exit(
            &db,
            &receipt.ticket_number,
            exit_at,
            &schedule,
            ExitWriteMode::Both,
        )
        .await?;

        assert_eq!(exit.ticket_number, receipt.ticket_number);
        assert_eq!(exit.vehicle_number, "B 1234 XYZ");
        assert_eq!(exit.entry_time, "2025-01-01 12:00:00");
        assert_eq!(exit.exit_time, "2025-01-01 14:30:00");
        assert_eq!(exit.duration_seconds, 9000);
        assert_eq!(exit.fee, 5000.0);
        let exit_record_id = exit.exit_record_id.unwrap();

        // Vehicle projection updated
        let vehicle = Vehicle::find_by_id(receipt.vehicle_id)
            .one(&db)
            .await?
            .unwrap();
        assert!(!vehicle.is_parked);
        assert_eq!(vehicle.exit_time, Some(exit_at));

        // Ticket consumed with the fee recorded
        let ticket = ParkingTicket::find()
            .filter(parking_ticket::Column::TicketNumber.eq(receipt.ticket_number.as_str()))
            .one(&db)
            .await?
            .unwrap();
        assert!(ticket.is_used);
        assert_eq!(ticket.amount, 5000.0);

        // Exit record projection written
        let record = VehicleExit::find_by_id(exit_record_id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(record.ticket_number, receipt.ticket_number);
        assert_eq!(record.vehicle_number, "B 1234 XYZ");
        assert_eq!(record.print_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_process_exit_unknown_ticket_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        enter_test_vehicle(&db, "B 1234 XYZ").await?;

        let result = process_exit(
            &db,
            "TKT19990101000000",
            fixed_clock(),
            &RateTable::default(),
            ExitWriteMode::Both,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::TicketNotFound { ticket } if ticket == "TKT19990101000000"
        ));

        assert_eq!(VehicleExit::find().count(&db).await?, 0);
        let vehicle = Vehicle::find().one(&db).await?.unwrap();
        assert!(vehicle.is_parked);
        assert!(vehicle.exit_time.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_process_exit_blank_ticket_is_invalid() -> Result<()> {
        let db = setup_test_db().await?;

        let result = process_exit(
            &db,
            "  ",
            fixed_clock(),
            &RateTable::default(),
            ExitWriteMode::Both,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidInput { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_process_exit_vehicle_only_mode() -> Result<()> {
        let db = setup_test_db().await?;
        let receipt = enter_test_vehicle(&db, "B 1234 XYZ").await?;

        let exit = process_exit(
            &db,
            &receipt.ticket_number,
            fixed_clock() + Duration::hours(1),
            &RateTable::default(),
            ExitWriteMode::VehicleOnly,
        )
        .await?;

        assert!(exit.exit_record_id.is_none());
        assert_eq!(VehicleExit::find().count(&db).await?, 0);

        let vehicle = Vehicle::find_by_id(receipt.vehicle_id)
            .one(&db)
            .await?
            .unwrap();
        assert!(!vehicle.is_parked);

        Ok(())
    }

    #[tokio::test]
    async fn test_process_exit_exit_record_only_mode() -> Result<()> {
        let db = setup_test_db().await?;
        let receipt = enter_test_vehicle(&db, "B 1234 XYZ").await?;

        let exit = process_exit(
            &db,
            &receipt.ticket_number,
            fixed_clock() + Duration::hours(1),
            &RateTable::default(),
            ExitWriteMode::ExitRecordOnly,
        )
        .await?;

        assert!(exit.exit_record_id.is_some());

        // Vehicle row untouched in this mode
        let vehicle = Vehicle::find_by_id(receipt.vehicle_id)
            .one(&db)
            .await?
            .unwrap();
        assert!(vehicle.is_parked);
        assert!(vehicle.exit_time.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_acknowledge_print_increments_by_exactly_one() -> Result<()> {
        let db = setup_test_db().await?;
        let receipt = enter_test_vehicle(&db, "B 1234 XYZ").await?;

        let exit = process_exit(
            &db,
            &receipt.ticket_number,
            fixed_clock() + Duration::hours(2),
            &RateTable::default(),
            ExitWriteMode::Both,
        )
        .await?;
        let exit_record_id = exit.exit_record_id.unwrap();

        // Not idempotent: N calls increment by exactly N
        for expected in 1..=3 {
            let record = acknowledge_print(&db, exit_record_id).await?;
            assert_eq!(record.print_count, expected);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_acknowledge_print_unknown_record() -> Result<()> {
        let db = setup_test_db().await?;

        let result = acknowledge_print(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ExitRecordNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_recent_exits_order_and_default_limit() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = test_settings();

        for i in 0..3_i64 {
            let receipt = enter_vehicle_at(
                &db,
                crate::core::entry::EntryInput::default(),
                crate::core::ticket::TicketScheme::Offline,
                fixed_clock() + Duration::minutes(i),
            )
            .await?;
            process_exit(
                &db,
                &receipt.ticket_number,
                fixed_clock() + Duration::hours(1) + Duration::minutes(i),
                &RateTable::default(),
                ExitWriteMode::Both,
            )
            .await?;
        }

        let recent = list_recent_exits(&db, None, &settings).await?;
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].ticket_number, "OFF0003");
        assert_eq!(recent[2].ticket_number, "OFF0001");

        let limited = list_recent_exits(&db, Some(1), &settings).await?;
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].ticket_number, "OFF0003");

        Ok(())
    }
}
