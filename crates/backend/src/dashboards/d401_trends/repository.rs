use anyhow::Result;
use contracts::enums::EntityKind;
use sea_orm::{FromQueryResult, Statement};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct DailyPoint {
    pub date: String,
    pub daily_revenue: f64,
}

/// Daily revenue for one entity across [date_from, date_to], ordered by date.
pub async fn get_daily_series(
    entity_id: &str,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<DailyPoint>> {
    let db = get_connection();

    let sql = r#"
        SELECT date, daily_revenue
        FROM a003_daily_revenue_fact
        WHERE entity_id = ? AND date >= ? AND date <= ? AND is_deleted = 0
        ORDER BY date
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [entity_id.into(), date_from.into(), date_to.into()],
    );

    let results = DailyPoint::find_by_statement(stmt).all(db).await?;
    Ok(results)
}

/// Combined daily revenue across all entities of one kind, summed per date.
pub async fn get_combined_daily_series(
    kind: EntityKind,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<DailyPoint>> {
    let db = get_connection();

    let sql = r#"
        SELECT date, COALESCE(SUM(daily_revenue), 0) AS daily_revenue
        FROM a003_daily_revenue_fact
        WHERE entity_kind = ? AND date >= ? AND date <= ? AND is_deleted = 0
        GROUP BY date
        ORDER BY date
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [kind.as_str().into(), date_from.into(), date_to.into()],
    );

    let results = DailyPoint::find_by_statement(stmt).all(db).await?;
    Ok(results)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct MtdSnapshotRow {
    pub date: String,
    pub entity_name: String,
    pub mtd_revenue: f64,
}

/// Every (date, entity) MTD snapshot of one kind within a range, with the
/// entity's display name resolved for charting.
pub async fn get_mtd_snapshots(
    kind: EntityKind,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<MtdSnapshotRow>> {
    let db = get_connection();

    let sql = match kind {
        EntityKind::Store => {
            r#"
            SELECT f.date, s.description AS entity_name, f.mtd_revenue
            FROM a003_daily_revenue_fact f
            JOIN a001_store s ON f.entity_id = s.id
            WHERE f.entity_kind = 'store' AND f.date >= ? AND f.date <= ? AND f.is_deleted = 0
            ORDER BY f.date, s.description
            "#
        }
        EntityKind::Rep => {
            r#"
            SELECT f.date, r.full_name AS entity_name, f.mtd_revenue
            FROM a003_daily_revenue_fact f
            JOIN a002_sales_rep r ON f.entity_id = r.id
            WHERE f.entity_kind = 'rep' AND f.date >= ? AND f.date <= ? AND f.is_deleted = 0
            ORDER BY f.date, r.full_name
            "#
        }
    };

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [date_from.into(), date_to.into()],
    );

    let results = MtdSnapshotRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}
