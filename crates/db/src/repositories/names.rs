//! Joined-name lookup for sales and collection rows.

use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use super::{CompanyRepository, RepresentativeRepository};
use crate::mapping::NameLookup;

/// Fetches representative and company names for a batch of rows.
pub(crate) async fn lookup_names(
    db: &DatabaseConnection,
    rows: impl IntoIterator<Item = (Uuid, Uuid)>,
) -> Result<NameLookup, DbErr> {
    let (mut representative_ids, mut company_ids): (Vec<Uuid>, Vec<Uuid>) =
        rows.into_iter().unzip();
    representative_ids.sort_unstable();
    representative_ids.dedup();
    company_ids.sort_unstable();
    company_ids.dedup();

    let representatives = RepresentativeRepository::new(db.clone())
        .names_by_ids(&representative_ids)
        .await?;
    let companies = CompanyRepository::new(db.clone())
        .names_by_ids(&company_ids)
        .await?;

    Ok(NameLookup {
        representatives,
        companies,
    })
}
