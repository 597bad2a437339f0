//! Course entity (catalogue service table, read only here)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::live_classes::Entity")]
    LiveClasses,
}

impl Related<super::live_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
