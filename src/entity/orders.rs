//! Order entity (billing service table, read only here)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: Option<i64>,
    pub plan_type: String,
    pub payment_status: String,
    pub is_active: bool,
    pub end_date: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Returns `None` for plan types this service does not know
    pub fn into_order(self) -> Option<crate::models::orders::entities::Order> {
        use crate::models::orders::entities::{Order, PlanType};
        use chrono::{DateTime, Utc};

        let plan_type = self.plan_type.parse::<PlanType>().ok()?;
        Some(Order {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            plan_type,
            payment_status: self.payment_status,
            is_active: self.is_active,
            end_date: self
                .end_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}
