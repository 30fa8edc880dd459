use chrono::{NaiveDate, Utc};
use contracts::domain::a003_daily_revenue_fact::aggregate::{DailyRevenueFact, DailyRevenueFactId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_daily_revenue_fact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub date: String, // stored as YYYY-MM-DD
    pub entity_id: String,
    pub entity_kind: String,
    pub daily_revenue: f64,
    pub mtd_revenue: f64,
    pub ly_revenue: Option<f64>,
    pub goal_revenue: Option<f64>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DailyRevenueFact {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let date = NaiveDate::parse_from_str(&m.date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());
        let entity_kind = EntityKind::from_str(&m.entity_kind).unwrap_or(EntityKind::Store);

        DailyRevenueFact {
            base: BaseAggregate::with_metadata(
                DailyRevenueFactId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            date,
            entity_id: m.entity_id,
            entity_kind,
            daily_revenue: m.daily_revenue,
            mtd_revenue: m.mtd_revenue,
            ly_revenue: m.ly_revenue,
            goal_revenue: m.goal_revenue,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &DailyRevenueFact) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        date: Set(aggregate.date.format("%Y-%m-%d").to_string()),
        entity_id: Set(aggregate.entity_id.clone()),
        entity_kind: Set(aggregate.entity_kind.as_str().to_string()),
        daily_revenue: Set(aggregate.daily_revenue),
        mtd_revenue: Set(aggregate.mtd_revenue),
        ly_revenue: Set(aggregate.ly_revenue),
        goal_revenue: Set(aggregate.goal_revenue),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_key(
    date: NaiveDate,
    entity_id: &str,
) -> anyhow::Result<Option<DailyRevenueFact>> {
    let result = Entity::find()
        .filter(Column::Date.eq(date.format("%Y-%m-%d").to_string()))
        .filter(Column::EntityId.eq(entity_id))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Facts for one entity within [date_from, date_to], ordered by date.
pub async fn list_for_entity(
    entity_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<DailyRevenueFact>> {
    let items = Entity::find()
        .filter(Column::EntityId.eq(entity_id))
        .filter(Column::Date.gte(date_from.format("%Y-%m-%d").to_string()))
        .filter(Column::Date.lte(date_to.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Date)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// All facts of one kind within [date_from, date_to], ordered by date.
pub async fn list_for_kind(
    kind: EntityKind,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<DailyRevenueFact>> {
    let items = Entity::find()
        .filter(Column::EntityKind.eq(kind.as_str()))
        .filter(Column::Date.gte(date_from.format("%Y-%m-%d").to_string()))
        .filter(Column::Date.lte(date_to.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Date)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Latest fact date on file for a kind, across all entities.
pub async fn latest_date_for_kind(kind: EntityKind) -> anyhow::Result<Option<NaiveDate>> {
    let item = Entity::find()
        .filter(Column::EntityKind.eq(kind.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::Date)
        .one(conn())
        .await?;
    Ok(item.and_then(|m| NaiveDate::parse_from_str(&m.date, "%Y-%m-%d").ok()))
}

pub async fn insert(aggregate: &DailyRevenueFact) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &DailyRevenueFact) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}
