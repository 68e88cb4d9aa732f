//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod collection;
pub mod commission_rule;
pub mod company;
pub mod error;
mod names;
pub mod representative;
pub mod sales;
pub mod user;

pub use collection::{CollectionRecordInput, CollectionRecordRepository};
pub use commission_rule::CommissionRuleRepository;
pub use company::{CompanyRepository, CreateCompanyInput, UpdateCompanyInput};
pub use error::RepositoryError;
pub use representative::{
    CreateRepresentativeInput, RepresentativeRepository, UpdateRepresentativeInput,
};
pub use sales::{SalesRecordInput, SalesRecordRepository};
pub use user::{CreateUserInput, UserRepository};
