//! `SeaORM` entity prelude.

pub use super::collection_records::Entity as CollectionRecords;
pub use super::commission_rules::Entity as CommissionRules;
pub use super::companies::Entity as Companies;
pub use super::representatives::Entity as Representatives;
pub use super::sales_records::Entity as SalesRecords;
pub use super::users::Entity as Users;
