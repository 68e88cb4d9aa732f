//! `SeaORM` entity definitions.

pub mod prelude;

pub mod collection_records;
pub mod commission_rules;
pub mod companies;
pub mod representatives;
pub mod sales_records;
pub mod sea_orm_active_enums;
pub mod users;
