use anyhow::Result;
use contracts::enums::EntityKind;
use sea_orm::{FromQueryResult, Statement};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Latest fact snapshot per entity within a date range.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct LatestFactRow {
    pub entity_id: String,
    pub date: String,
    pub mtd_revenue: f64,
    pub ly_revenue: Option<f64>,
}

/// For each entity with facts in [date_from, date_to], the row with the
/// maximum date. The snapshot on that row is trusted as-is.
pub async fn get_latest_facts(
    kind: EntityKind,
    date_from: &str,
    date_to: &str,
) -> Result<Vec<LatestFactRow>> {
    let db = get_connection();

    let sql = r#"
        SELECT f.entity_id, f.date, f.mtd_revenue, f.ly_revenue
        FROM a003_daily_revenue_fact f
        JOIN (
            SELECT entity_id, MAX(date) AS max_date
            FROM a003_daily_revenue_fact
            WHERE entity_kind = ? AND date >= ? AND date <= ? AND is_deleted = 0
            GROUP BY entity_id
        ) latest ON f.entity_id = latest.entity_id AND f.date = latest.max_date
        WHERE f.entity_kind = ? AND f.is_deleted = 0
        ORDER BY f.entity_id
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [
            kind.as_str().into(),
            date_from.into(),
            date_to.into(),
            kind.as_str().into(),
        ],
    );

    let results = LatestFactRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct GoalRow {
    pub entity_id: String,
    pub goal_amount: f64,
}

pub async fn get_goals_for_month(kind: EntityKind, month: &str) -> Result<Vec<GoalRow>> {
    let db = get_connection();

    let sql = r#"
        SELECT entity_id, goal_amount
        FROM a004_monthly_goal
        WHERE entity_kind = ? AND month = ? AND is_deleted = 0
        ORDER BY entity_id
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [kind.as_str().into(), month.into()],
    );

    let results = GoalRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}

/// Display name plus detail column for active entities of one kind.
/// Detail is the region for stores, the role for reps.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct EntityNameRow {
    pub id: String,
    pub name: String,
    pub detail: Option<String>,
}

pub async fn get_active_entities(kind: EntityKind) -> Result<Vec<EntityNameRow>> {
    let db = get_connection();

    let sql = match kind {
        EntityKind::Store => {
            r#"
            SELECT id, description AS name, region AS detail
            FROM a001_store
            WHERE is_deleted = 0 AND is_active = 1
            ORDER BY description
            "#
        }
        EntityKind::Rep => {
            r#"
            SELECT id, full_name AS name, role AS detail
            FROM a002_sales_rep
            WHERE is_deleted = 0 AND is_active = 1
            ORDER BY full_name
            "#
        }
    };

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, []);
    let results = EntityNameRow::find_by_statement(stmt).all(db).await?;
    Ok(results)
}
