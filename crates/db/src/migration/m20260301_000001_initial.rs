//! Initial database migration.
//!
//! Creates the enums, core tables, and indexes for the procurement schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(VENDORS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(WORK_CONTRACTS_SQL).await?;
        db.execute_unprepared(VARIATION_ORDERS_SQL).await?;
        db.execute_unprepared(SYSTEM_SETTINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
-- Document approval lifecycle
CREATE TYPE document_status AS ENUM (
    'draft',
    'pending',
    'approved',
    'rejected'
);

-- Budget partition: charged against the project budget or supplementary
CREATE TYPE document_scope AS ENUM ('project', 'extra');

-- Project status
CREATE TYPE project_status AS ENUM ('in_progress', 'completed', 'on_hold');

-- User roles
CREATE TYPE user_role AS ENUM ('viewer', 'procurement', 'pm', 'admin');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    display_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    role user_role NOT NULL DEFAULT 'viewer',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_email ON users(email) WHERE is_active = true;
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(64) NOT NULL,
    budget NUMERIC(19,4) NOT NULL DEFAULT 0,
    status project_status NOT NULL DEFAULT 'in_progress',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_projects_status ON projects(status);
";

const VENDORS_SQL: &str = r"
CREATE TABLE vendors (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    tax_id VARCHAR(64),
    contact_name VARCHAR(255),
    phone VARCHAR(64),
    email VARCHAR(255),
    address TEXT,
    map_url TEXT,
    categories JSONB NOT NULL DEFAULT '[]',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_vendors_active ON vendors(is_active);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY,
    po_number VARCHAR(64) NOT NULL,
    project_id UUID NOT NULL REFERENCES projects(id),
    vendor_id UUID REFERENCES vendors(id),
    vendor_name VARCHAR(255),
    scope document_scope NOT NULL DEFAULT 'project',
    items JSONB NOT NULL DEFAULT '[]',
    sub_total NUMERIC(19,4) NOT NULL DEFAULT 0,
    vat_rate NUMERIC(7,4) NOT NULL DEFAULT 7,
    vat_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    total_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    status document_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL REFERENCES users(id),
    submitted_by UUID REFERENCES users(id),
    submitted_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    rejected_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_po_project ON purchase_orders(project_id);
CREATE INDEX idx_po_project_status ON purchase_orders(project_id, status);
";

const WORK_CONTRACTS_SQL: &str = r"
CREATE TABLE work_contracts (
    id UUID PRIMARY KEY,
    wc_number VARCHAR(64) NOT NULL,
    project_id UUID NOT NULL REFERENCES projects(id),
    vendor_id UUID REFERENCES vendors(id),
    vendor_name VARCHAR(255),
    scope document_scope NOT NULL DEFAULT 'project',
    items JSONB NOT NULL DEFAULT '[]',
    sub_total NUMERIC(19,4) NOT NULL DEFAULT 0,
    vat_rate NUMERIC(7,4) NOT NULL DEFAULT 7,
    vat_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    total_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    start_date DATE,
    end_date DATE,
    payment_terms TEXT,
    notes TEXT,
    signature_url TEXT,
    status document_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL REFERENCES users(id),
    submitted_by UUID REFERENCES users(id),
    submitted_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    rejected_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_wc_project ON work_contracts(project_id);
CREATE INDEX idx_wc_project_status ON work_contracts(project_id, status);
";

const VARIATION_ORDERS_SQL: &str = r"
CREATE TABLE variation_orders (
    id UUID PRIMARY KEY,
    vo_number VARCHAR(64) NOT NULL,
    project_id UUID NOT NULL REFERENCES projects(id),
    title VARCHAR(255) NOT NULL,
    reason TEXT,
    items JSONB NOT NULL DEFAULT '[]',
    sub_total NUMERIC(19,4) NOT NULL DEFAULT 0,
    vat_rate NUMERIC(7,4) NOT NULL DEFAULT 7,
    vat_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    total_amount NUMERIC(19,4) NOT NULL DEFAULT 0,
    status document_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL REFERENCES users(id),
    submitted_by UUID REFERENCES users(id),
    submitted_at TIMESTAMPTZ,
    approved_by UUID REFERENCES users(id),
    approved_at TIMESTAMPTZ,
    rejected_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_vo_project ON variation_orders(project_id);
CREATE INDEX idx_vo_project_status ON variation_orders(project_id, status);
";

const SYSTEM_SETTINGS_SQL: &str = r"
CREATE TABLE system_settings (
    id VARCHAR(64) PRIMARY KEY,
    company_name VARCHAR(255),
    company_address TEXT,
    company_phone VARCHAR(64),
    company_tax_id VARCHAR(64),
    company_logo_url TEXT,
    line_token TEXT,
    vendor_categories JSONB NOT NULL DEFAULT '[]',
    units JSONB NOT NULL DEFAULT '[]',
    approver_signature_urls JSONB NOT NULL DEFAULT '[]',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS system_settings CASCADE;
DROP TABLE IF EXISTS variation_orders CASCADE;
DROP TABLE IF EXISTS work_contracts CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;
DROP TABLE IF EXISTS vendors CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS users CASCADE;

-- Drop enums
DROP TYPE IF EXISTS user_role CASCADE;
DROP TYPE IF EXISTS project_status CASCADE;
DROP TYPE IF EXISTS document_scope CASCADE;
DROP TYPE IF EXISTS document_status CASCADE;
";
