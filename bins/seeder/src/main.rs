//! Sample data for local development.
//!
//! Creates one user per role, a few representatives and companies, two
//! commission rules, and a quarter of sales and collections. Running it
//! twice is harmless: users are skipped by email, and the sample book is
//! skipped once any commission rule exists.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use komisi_core::auth::{UserRole, hash_password};
use komisi_core::commission::{CommissionRuleInput, validate_rule};
use komisi_db::repositories::{
    CollectionRecordInput, CollectionRecordRepository, CommissionRuleRepository,
    CompanyRepository, CreateCompanyInput, CreateRepresentativeInput, CreateUserInput,
    RepresentativeRepository, SalesRecordInput, SalesRecordRepository, UserRepository,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

const SEED_YEAR: i32 = 2025;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let password =
        std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "komisi-dev-password".to_string());

    println!("Connecting to database...");
    let db = komisi_db::connect(&database_url, 2, 1).await?;

    println!("Seeding users...");
    seed_users(&db, &password).await?;

    if CommissionRuleRepository::new(db.clone())
        .list_all()
        .await?
        .is_empty()
    {
        println!("Seeding sample commission book...");
        seed_book(&db).await?;
    } else {
        println!("  Commission rules already exist, skipping sample book...");
    }

    println!("Seeding complete!");
    Ok(())
}

async fn seed_users(db: &DatabaseConnection, password: &str) -> anyhow::Result<()> {
    let repo = UserRepository::new(db.clone());
    let users = [
        ("admin@komisi.dev", "Super Admin", UserRole::SuperAdmin),
        ("manager@komisi.dev", "Sales Manager", UserRole::Admin),
        ("auditor@komisi.dev", "Finance Auditor", UserRole::FinancialAuditor),
        ("entry@komisi.dev", "Data Entry Clerk", UserRole::DataEntry),
    ];

    for (email, full_name, role) in users {
        if repo.email_exists(email).await? {
            println!("  {email} already exists, skipping...");
            continue;
        }
        repo.create(CreateUserInput {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            full_name: full_name.to_string(),
            role: role.into(),
        })
        .await?;
        println!("  Created {role} user: {email}");
    }
    Ok(())
}

fn rule(category: &str, rates: [Decimal; 3]) -> anyhow::Result<CommissionRuleInput> {
    let input = CommissionRuleInput {
        category: category.to_string(),
        tier1_from: dec!(0),
        tier1_to: dec!(70),
        tier1_rate: rates[0],
        tier2_from: dec!(71),
        tier2_to: dec!(100),
        tier2_rate: rates[1],
        tier3_from: dec!(101),
        tier3_rate: rates[2],
    };
    validate_rule(&input)?;
    Ok(input)
}

async fn seed_book(db: &DatabaseConnection) -> anyhow::Result<()> {
    let rules = CommissionRuleRepository::new(db.clone());
    rules
        .create(rule("Pharma", [dec!(0.0025), dec!(0.003), dec!(0.004)])?)
        .await?;
    rules
        .create(rule("Medical Devices", [dec!(0.002), dec!(0.0035), dec!(0.005)])?)
        .await?;
    println!("  Created 2 commission rules");

    let representatives = RepresentativeRepository::new(db.clone());
    let mut rep_ids: Vec<Uuid> = Vec::new();
    for name in ["Andi Pratama", "Siti Rahma", "Budi Santoso"] {
        let rep = representatives
            .create(CreateRepresentativeInput {
                name: name.to_string(),
                email: None,
                phone: None,
            })
            .await?;
        rep_ids.push(rep.id);
    }
    println!("  Created {} representatives", rep_ids.len());

    let companies = CompanyRepository::new(db.clone());
    let mut company_ids: Vec<Uuid> = Vec::new();
    for (name, code) in [("Apotek Sehat", "APS"), ("RS Harapan", "RSH")] {
        let company = companies
            .create(CreateCompanyInput {
                name: name.to_string(),
                code: code.to_string(),
            })
            .await?;
        company_ids.push(company.id);
    }
    println!("  Created {} companies", company_ids.len());

    let sales = SalesRecordRepository::new(db.clone());
    let collections = CollectionRecordRepository::new(db.clone());
    let mut sales_count = 0;
    let mut collection_count = 0;

    // Achievement runs from below tier 2 up past target.
    let results = [dec!(60000), dec!(85000), dec!(150000)];
    for (i, representative_id) in rep_ids.iter().copied().enumerate() {
        let company_id = company_ids[i % company_ids.len()];
        for (offset, month) in (1..=3).enumerate() {
            let category = if month == 2 { "Medical Devices" } else { "Pharma" };
            let amount = results[(i + offset) % results.len()];

            sales
                .create(
                    SalesRecordInput {
                        representative_id,
                        company_id,
                        category: category.to_string(),
                        sales: amount,
                        target: dec!(100000),
                        year: SEED_YEAR,
                        month,
                    },
                    None,
                )
                .await?;
            sales_count += 1;

            collections
                .create(
                    CollectionRecordInput {
                        representative_id,
                        company_id,
                        amount: amount * dec!(0.8),
                        year: SEED_YEAR,
                        month,
                    },
                    None,
                )
                .await?;
            collection_count += 1;
        }
    }
    println!("  Created {sales_count} sales and {collection_count} collection records");

    Ok(())
}
