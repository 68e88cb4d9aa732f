//! `SeaORM` Entity for commission_rules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "commission_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub tier1_from: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub tier1_to: Decimal,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))")]
    pub tier1_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub tier2_from: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub tier2_to: Decimal,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))")]
    pub tier2_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub tier3_from: Decimal,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))")]
    pub tier3_rate: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
