use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Family enrolled in one of the sponsorship programs
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "families")]
pub struct Model {
    /// Family ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Household name
    pub name: String,

    /// Program the family belongs to (e.g. "ifashe")
    pub program: String,

    /// Lifecycle status: active, suspended, archived
    pub status: String,

    /// Set by the archive bulk action
    pub archived_at: Option<DateTimeWithTimeZone>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
