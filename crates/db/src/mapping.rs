//! Conversions from entity models to core domain types.

use std::collections::HashMap;

use komisi_core::auth::UserRole as CoreUserRole;
use komisi_core::commission::{CollectionRecord, CommissionRule, SalesRecord};
use komisi_shared::types::{
    CollectionRecordId, CommissionRuleId, CompanyId, RepresentativeId, SalesRecordId,
};
use uuid::Uuid;

use crate::entities::{
    collection_records, commission_rules, sales_records, sea_orm_active_enums::UserRole,
};

/// Representative and company names keyed by ID, used to fill joined names.
///
/// A missing key leaves the name `None`.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    /// Representative names.
    pub representatives: HashMap<Uuid, String>,
    /// Company names.
    pub companies: HashMap<Uuid, String>,
}

impl NameLookup {
    fn representative(&self, id: Uuid) -> Option<String> {
        self.representatives.get(&id).cloned()
    }

    fn company(&self, id: Uuid) -> Option<String> {
        self.companies.get(&id).cloned()
    }

    /// Builds a core sales record from a row.
    #[must_use]
    pub fn sales_record(&self, model: sales_records::Model) -> SalesRecord {
        SalesRecord {
            id: SalesRecordId::from_uuid(model.id),
            representative_id: RepresentativeId::from_uuid(model.representative_id),
            representative_name: self.representative(model.representative_id),
            company_id: CompanyId::from_uuid(model.company_id),
            company_name: self.company(model.company_id),
            category: model.category,
            sales: model.sales,
            target: model.target,
            year: model.year,
            month: model.month,
        }
    }

    /// Builds a core collection record from a row.
    #[must_use]
    pub fn collection_record(&self, model: collection_records::Model) -> CollectionRecord {
        CollectionRecord {
            id: CollectionRecordId::from_uuid(model.id),
            representative_id: RepresentativeId::from_uuid(model.representative_id),
            representative_name: self.representative(model.representative_id),
            company_id: CompanyId::from_uuid(model.company_id),
            company_name: self.company(model.company_id),
            year: model.year,
            month: model.month,
            amount: model.amount,
        }
    }
}

impl From<commission_rules::Model> for CommissionRule {
    fn from(model: commission_rules::Model) -> Self {
        Self {
            id: CommissionRuleId::from_uuid(model.id),
            category: model.category,
            tier1_from: model.tier1_from,
            tier1_to: model.tier1_to,
            tier1_rate: model.tier1_rate,
            tier2_from: model.tier2_from,
            tier2_to: model.tier2_to,
            tier2_rate: model.tier2_rate,
            tier3_from: model.tier3_from,
            tier3_rate: model.tier3_rate,
        }
    }
}

impl From<UserRole> for CoreUserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::SuperAdmin => Self::SuperAdmin,
            UserRole::Admin => Self::Admin,
            UserRole::FinancialAuditor => Self::FinancialAuditor,
            UserRole::DataEntry => Self::DataEntry,
        }
    }
}

impl From<CoreUserRole> for UserRole {
    fn from(role: CoreUserRole) -> Self {
        match role {
            CoreUserRole::SuperAdmin => Self::SuperAdmin,
            CoreUserRole::Admin => Self::Admin,
            CoreUserRole::FinancialAuditor => Self::FinancialAuditor,
            CoreUserRole::DataEntry => Self::DataEntry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sales_row(representative_id: Uuid, company_id: Uuid) -> sales_records::Model {
        let now = Utc::now().into();
        sales_records::Model {
            id: Uuid::now_v7(),
            representative_id,
            company_id,
            category: "pharma".to_string(),
            sales: dec!(150000.0000),
            target: dec!(100000.0000),
            year: 2024,
            month: 3,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sales_record_fills_known_names() {
        let rep = Uuid::now_v7();
        let company = Uuid::now_v7();
        let mut names = NameLookup::default();
        names.representatives.insert(rep, "Rina".to_string());
        names.companies.insert(company, "PT Sehat".to_string());

        let record = names.sales_record(sales_row(rep, company));

        assert_eq!(record.representative_id.into_inner(), rep);
        assert_eq!(record.representative_name.as_deref(), Some("Rina"));
        assert_eq!(record.company_name.as_deref(), Some("PT Sehat"));
        assert_eq!(record.sales, dec!(150000));
    }

    #[test]
    fn test_unknown_names_are_none() {
        let record = NameLookup::default().sales_record(sales_row(Uuid::now_v7(), Uuid::now_v7()));
        assert_eq!(record.representative_name, None);
        assert_eq!(record.company_name, None);
    }

    #[rstest]
    #[case(UserRole::SuperAdmin, CoreUserRole::SuperAdmin)]
    #[case(UserRole::Admin, CoreUserRole::Admin)]
    #[case(UserRole::FinancialAuditor, CoreUserRole::FinancialAuditor)]
    #[case(UserRole::DataEntry, CoreUserRole::DataEntry)]
    fn test_role_conversion(#[case] stored: UserRole, #[case] core: CoreUserRole) {
        assert_eq!(CoreUserRole::from(stored), core);
        assert_eq!(UserRole::from(core), stored);
    }

    #[rstest]
    #[case(Some("Rina"), Some("PT Sehat"))]
    #[case(Some("Rina"), None)]
    #[case(None, Some("PT Sehat"))]
    fn test_collection_record_names(
        #[case] representative: Option<&str>,
        #[case] company: Option<&str>,
    ) {
        let rep = Uuid::now_v7();
        let company_id = Uuid::now_v7();
        let mut names = NameLookup::default();
        if let Some(name) = representative {
            names.representatives.insert(rep, name.to_string());
        }
        if let Some(name) = company {
            names.companies.insert(company_id, name.to_string());
        }
        let now = Utc::now().into();

        let record = names.collection_record(collection_records::Model {
            id: Uuid::now_v7(),
            representative_id: rep,
            company_id,
            amount: dec!(750.2500),
            year: 2024,
            month: 3,
            created_by: None,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(record.representative_name.as_deref(), representative);
        assert_eq!(record.company_name.as_deref(), company);
        assert_eq!(record.amount, dec!(750.25));
    }
}
