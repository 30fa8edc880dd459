use chrono::Utc;
use contracts::domain::a004_monthly_goal::aggregate::{MonthlyGoal, MonthlyGoalId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_monthly_goal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub month: String, // YYYY-MM
    pub entity_id: String,
    pub entity_kind: String,
    pub goal_amount: f64,
    pub ly_revenue_reference: Option<f64>,
    pub work_days: Option<i32>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MonthlyGoal {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let entity_kind = EntityKind::from_str(&m.entity_kind).unwrap_or(EntityKind::Store);

        MonthlyGoal {
            base: BaseAggregate::with_metadata(
                MonthlyGoalId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            month: m.month,
            entity_id: m.entity_id,
            entity_kind,
            goal_amount: m.goal_amount,
            ly_revenue_reference: m.ly_revenue_reference,
            work_days: m.work_days,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &MonthlyGoal) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        month: Set(aggregate.month.clone()),
        entity_id: Set(aggregate.entity_id.clone()),
        entity_kind: Set(aggregate.entity_kind.as_str().to_string()),
        goal_amount: Set(aggregate.goal_amount),
        ly_revenue_reference: Set(aggregate.ly_revenue_reference),
        work_days: Set(aggregate.work_days),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_key(month: &str, entity_id: &str) -> anyhow::Result<Option<MonthlyGoal>> {
    let result = Entity::find()
        .filter(Column::Month.eq(month))
        .filter(Column::EntityId.eq(entity_id))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<MonthlyGoal>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// All goals for a month, optionally narrowed to one entity kind.
pub async fn list_for_month(
    month: &str,
    kind: Option<EntityKind>,
) -> anyhow::Result<Vec<MonthlyGoal>> {
    let mut query = Entity::find()
        .filter(Column::Month.eq(month))
        .filter(Column::IsDeleted.eq(false));
    if let Some(kind) = kind {
        query = query.filter(Column::EntityKind.eq(kind.as_str()));
    }
    let items = query.order_by_asc(Column::EntityId).all(conn()).await?;
    Ok(items.into_iter().map(Into::into).collect())
}

pub async fn insert(aggregate: &MonthlyGoal) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &MonthlyGoal) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
