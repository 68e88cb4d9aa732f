//! Initial schema: staff users, representatives, companies, commission rules,
//! sales and collection records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(REPRESENTATIVES_SQL).await?;
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(COMMISSION_RULES_SQL).await?;
        db.execute_unprepared(SALES_RECORDS_SQL).await?;
        db.execute_unprepared(COLLECTION_RECORDS_SQL).await?;

        db.execute_unprepared(TRIGGERS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM (
    'super_admin',
    'admin',
    'financial_auditor',
    'data_entry'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'data_entry',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;
";

const REPRESENTATIVES_SQL: &str = r"
CREATE TABLE representatives (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_representatives_name ON representatives(name);
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50) NOT NULL UNIQUE,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const COMMISSION_RULES_SQL: &str = r"
-- Bounds are achievement percentages, rates are multipliers
CREATE TABLE commission_rules (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category VARCHAR(100) NOT NULL UNIQUE,
    tier1_from NUMERIC(8, 4) NOT NULL,
    tier1_to NUMERIC(8, 4) NOT NULL,
    tier1_rate NUMERIC(9, 6) NOT NULL,
    tier2_from NUMERIC(8, 4) NOT NULL,
    tier2_to NUMERIC(8, 4) NOT NULL,
    tier2_rate NUMERIC(9, 6) NOT NULL,
    tier3_from NUMERIC(8, 4) NOT NULL,
    tier3_rate NUMERIC(9, 6) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rule_tier_order CHECK (tier1_to < tier2_from AND tier2_to < tier3_from),
    CONSTRAINT chk_rule_rates CHECK (
        tier1_rate > 0 AND tier1_rate <= 1 AND
        tier2_rate > 0 AND tier2_rate <= 1 AND
        tier3_rate > 0 AND tier3_rate <= 1
    )
);
";

const SALES_RECORDS_SQL: &str = r"
CREATE TABLE sales_records (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    representative_id UUID NOT NULL REFERENCES representatives(id),
    company_id UUID NOT NULL REFERENCES companies(id),
    category VARCHAR(100) NOT NULL,
    sales NUMERIC(19, 4) NOT NULL CHECK (sales >= 0),
    target NUMERIC(19, 4) NOT NULL CHECK (target >= 0),
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    created_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_sales_records_period ON sales_records(year DESC, month DESC);
CREATE INDEX idx_sales_records_representative ON sales_records(representative_id, year, month);
";

const COLLECTION_RECORDS_SQL: &str = r"
CREATE TABLE collection_records (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    representative_id UUID NOT NULL REFERENCES representatives(id),
    company_id UUID NOT NULL REFERENCES companies(id),
    amount NUMERIC(19, 4) NOT NULL CHECK (amount >= 0),
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    created_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_collection_records_period ON collection_records(year DESC, month DESC);
CREATE INDEX idx_collection_records_representative ON collection_records(representative_id, year, month);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_representatives_updated_at BEFORE UPDATE ON representatives
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_companies_updated_at BEFORE UPDATE ON companies
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_commission_rules_updated_at BEFORE UPDATE ON commission_rules
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_sales_records_updated_at BEFORE UPDATE ON sales_records
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
CREATE TRIGGER trg_collection_records_updated_at BEFORE UPDATE ON collection_records
    FOR EACH ROW EXECUTE FUNCTION touch_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS collection_records CASCADE;
DROP TABLE IF EXISTS sales_records CASCADE;
DROP TABLE IF EXISTS commission_rules CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TABLE IF EXISTS representatives CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP FUNCTION IF EXISTS touch_updated_at();

DROP TYPE IF EXISTS user_role;
";
