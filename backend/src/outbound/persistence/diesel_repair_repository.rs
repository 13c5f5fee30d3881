//! PostgreSQL-backed `RepairRepository` implementation using Diesel ORM.
//!
//! Creation and status changes run in a transaction so a repair is never
//! visible without its progress entry. Status changes lock the repair row
//! (`FOR UPDATE`) and re-check its status before writing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{RepairRepository, RepairRepositoryError};
use crate::domain::{
    NewRepair, ProgressEntry, Repair, RepairDraft, RepairId, RepairStatus, SeedEntry,
    StatusChange, TrackingCode, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewProgressRow, NewRepairRow, ProgressRow, RepairRow, RepairStatusUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{repair_progress, repairs};

/// Diesel-backed implementation of the repair repository port.
#[derive(Clone)]
pub struct DieselRepairRepository {
    pool: DbPool,
}

impl DieselRepairRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failures raised inside a transaction body.
#[derive(Debug)]
enum TxError {
    Diesel(DieselError),
    Repository(RepairRepositoryError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> RepairRepositoryError {
    map_basic_pool_error(error, RepairRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> RepairRepositoryError {
    map_basic_diesel_error(
        error,
        RepairRepositoryError::query,
        RepairRepositoryError::connection,
    )
}

/// Only `repairs_tracking_code_key` is unique on the tables touched during
/// creation, so any unique violation there is a code collision.
fn map_create_error(error: DieselError, code: &TrackingCode) -> RepairRepositoryError {
    if unique_violation_constraint(&error).is_some() {
        return RepairRepositoryError::duplicate_tracking_code(code.as_str());
    }
    map_diesel_error(error)
}

fn map_tx_error(error: TxError) -> RepairRepositoryError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::Repository(error) => error,
    }
}

fn parse_status(raw: &str) -> Result<RepairStatus, RepairRepositoryError> {
    raw.parse::<RepairStatus>()
        .map_err(|err| RepairRepositoryError::query(format!("corrupted status in database: {err}")))
}

fn row_to_repair(row: RepairRow) -> Result<Repair, RepairRepositoryError> {
    let RepairRow {
        id,
        user_id,
        tracking_code,
        device_type,
        device_model,
        issue_description,
        status,
        estimated_completion,
        created_at,
        updated_at,
        customer_name,
        customer_email,
        customer_phone,
        technician_notes,
        technician_id,
    } = row;

    let tracking_code = TrackingCode::parse(&tracking_code).map_err(|err| {
        RepairRepositoryError::query(format!("corrupted tracking code in database: {err}"))
    })?;

    Repair::new(RepairDraft {
        id: RepairId::new(id),
        user_id: user_id.map(UserId::new),
        tracking_code,
        device_type,
        device_model,
        issue_description,
        status: parse_status(&status)?,
        estimated_completion,
        created_at,
        updated_at,
        customer_name,
        customer_email,
        customer_phone,
        technician_notes,
        technician_id,
    })
    .map_err(|err| RepairRepositoryError::query(err.to_string()))
}

fn row_to_progress(row: ProgressRow) -> Result<ProgressEntry, RepairRepositoryError> {
    Ok(ProgressEntry {
        id: row.id,
        repair_id: RepairId::new(row.repair_id),
        status: parse_status(&row.status)?,
        notes: row.notes,
        timestamp: row.recorded_at,
    })
}

fn rows_to_repairs(rows: Vec<RepairRow>) -> Result<Vec<Repair>, RepairRepositoryError> {
    rows.into_iter().map(row_to_repair).collect()
}

#[async_trait]
impl RepairRepository for DieselRepairRepository {
    async fn find_by_id(&self, id: RepairId) -> Result<Option<Repair>, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = repairs::table
            .find(id.as_i64())
            .select(RepairRow::as_select())
            .first::<RepairRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_repair).transpose()
    }

    async fn find_by_tracking_code(
        &self,
        code: &str,
    ) -> Result<Option<Repair>, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = repairs::table
            .filter(repairs::tracking_code.eq(code))
            .select(RepairRow::as_select())
            .first::<RepairRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_repair).transpose()
    }

    async fn list(&self) -> Result<Vec<Repair>, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = repairs::table
            .order_by(repairs::id.asc())
            .select(RepairRow::as_select())
            .load::<RepairRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_repairs(rows)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Repair>, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = repairs::table
            .filter(repairs::user_id.eq(user_id.as_i64()))
            .order_by(repairs::id.asc())
            .select(RepairRow::as_select())
            .load::<RepairRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_repairs(rows)
    }

    async fn create_with_seed(
        &self,
        repair: NewRepair,
        seed: SeedEntry,
    ) -> Result<Repair, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let code = repair.tracking_code.clone();

        let row = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let intake = &repair.intake;
                    let new_row = NewRepairRow {
                        user_id: repair.user_id.map(UserId::as_i64),
                        tracking_code: repair.tracking_code.as_str(),
                        device_type: intake.device_type(),
                        device_model: intake.device_model(),
                        issue_description: intake.issue_description(),
                        status: RepairStatus::Received.as_str(),
                        estimated_completion: repair.estimated_completion,
                        created_at: repair.received_at,
                        updated_at: repair.received_at,
                        customer_name: intake.customer_name(),
                        customer_email: intake.customer_email().as_str(),
                        customer_phone: intake.customer_phone(),
                    };
                    let inserted: RepairRow = diesel::insert_into(repairs::table)
                        .values(&new_row)
                        .returning(RepairRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(repair_progress::table)
                        .values(&NewProgressRow {
                            repair_id: inserted.id,
                            status: RepairStatus::Received.as_str(),
                            notes: Some(seed.notes.as_str()),
                            recorded_at: seed.timestamp,
                        })
                        .execute(conn)
                        .await?;

                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_create_error(err, &code))?;

        row_to_repair(row)
    }

    async fn apply_status_change(
        &self,
        change: StatusChange,
    ) -> Result<Repair, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let id = change.repair_id.as_i64();
                    let current: RepairRow = repairs::table
                        .find(id)
                        .select(RepairRow::as_select())
                        .for_update()
                        .get_result(conn)
                        .await
                        .optional()?
                        .ok_or(TxError::Repository(RepairRepositoryError::not_found(id)))?;

                    if current.status != change.expected.as_str() {
                        return Err(TxError::Repository(RepairRepositoryError::status_conflict(
                            id,
                            change.expected.as_str(),
                            current.status,
                        )));
                    }

                    let at = change.at.max(current.updated_at);
                    let updated: RepairRow = diesel::update(repairs::table.find(id))
                        .set(&RepairStatusUpdate {
                            status: change.next.as_str(),
                            updated_at: at,
                        })
                        .returning(RepairRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(repair_progress::table)
                        .values(&NewProgressRow {
                            repair_id: id,
                            status: change.next.as_str(),
                            notes: Some(change.notes.as_str()),
                            recorded_at: at,
                        })
                        .execute(conn)
                        .await?;

                    Ok(updated)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;

        row_to_repair(row)
    }

    async fn list_progress(
        &self,
        repair_id: RepairId,
    ) -> Result<Vec<ProgressEntry>, RepairRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = repair_progress::table
            .filter(repair_progress::repair_id.eq(repair_id.as_i64()))
            .order_by((repair_progress::recorded_at.asc(), repair_progress::id.asc()))
            .select(ProgressRow::as_select())
            .load::<ProgressRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_progress).collect()
    }
}
