use chrono::{NaiveDate, Utc};
use contracts::domain::a005_rep_activity_fact::aggregate::{RepActivityFact, RepActivityFactId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_rep_activity_fact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub date: String, // YYYY-MM-DD
    pub rep_id: String,
    pub calls: i32,
    pub emails: i32,
    pub meetings: i32,
    pub notes: i32,
    pub sms: i32,
    pub total_activities: i32,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RepActivityFact {
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

        RepActivityFact {
            base: BaseAggregate::with_metadata(
                RepActivityFactId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            date,
            rep_id: m.rep_id,
            calls: m.calls,
            emails: m.emails,
            meetings: m.meetings,
            notes: m.notes,
            sms: m.sms,
            total_activities: m.total_activities,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &RepActivityFact) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        date: Set(aggregate.date.format("%Y-%m-%d").to_string()),
        rep_id: Set(aggregate.rep_id.clone()),
        calls: Set(aggregate.calls),
        emails: Set(aggregate.emails),
        meetings: Set(aggregate.meetings),
        notes: Set(aggregate.notes),
        sms: Set(aggregate.sms),
        total_activities: Set(aggregate.total_activities),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_key(date: NaiveDate, rep_id: &str) -> anyhow::Result<Option<RepActivityFact>> {
    let result = Entity::find()
        .filter(Column::Date.eq(date.format("%Y-%m-%d").to_string()))
        .filter(Column::RepId.eq(rep_id))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Activity rows within [date_from, date_to], ordered by date then rep.
pub async fn list_for_range(
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<RepActivityFact>> {
    let items = Entity::find()
        .filter(Column::Date.gte(date_from.format("%Y-%m-%d").to_string()))
        .filter(Column::Date.lte(date_to.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Date)
        .order_by_asc(Column::RepId)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn list_for_rep(
    rep_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<RepActivityFact>> {
    let items = Entity::find()
        .filter(Column::RepId.eq(rep_id))
        .filter(Column::Date.gte(date_from.format("%Y-%m-%d").to_string()))
        .filter(Column::Date.lte(date_to.format("%Y-%m-%d").to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Date)
        .all(conn())
        .await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn insert(aggregate: &RepActivityFact) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &RepActivityFact) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}
