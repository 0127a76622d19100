//! Ledger entries migration.
//!
//! Creates the ledger_entries table holding account master records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_ENTRIES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS ledger_entries CASCADE;")
            .await?;
        Ok(())
    }
}

const LEDGER_ENTRIES_SQL: &str = r#"
-- Ledger account master records. Rows are soft-deleted via "isActive";
-- ids are never reused.
CREATE TABLE ledger_entries (
    id SERIAL PRIMARY KEY,
    "ledgerName" VARCHAR(255) NOT NULL,
    "printName" VARCHAR(255) NOT NULL DEFAULT '',
    "ledgerType" VARCHAR(100) NOT NULL DEFAULT '',
    address1 VARCHAR(255) NOT NULL DEFAULT '',
    address2 VARCHAR(255) NOT NULL DEFAULT '',
    address3 VARCHAR(255) NOT NULL DEFAULT '',
    state VARCHAR(100) NOT NULL DEFAULT '',
    "pinCode" VARCHAR(20) NOT NULL DEFAULT '',
    "gstNumber" VARCHAR(50) NOT NULL DEFAULT '',
    contact VARCHAR(100) NOT NULL DEFAULT '',
    "mobileNumber" VARCHAR(20) NOT NULL DEFAULT '',
    "phoneNumber" VARCHAR(20) NOT NULL DEFAULT '',
    email VARCHAR(100) NOT NULL DEFAULT '',
    "openingBalance" DECIMAL(18, 2) NOT NULL DEFAULT 0,
    "balanceType" VARCHAR(10) NOT NULL DEFAULT 'Dr',
    "isActive" BOOLEAN NOT NULL DEFAULT TRUE,
    "createdAt" TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for the active listing (most common read)
CREATE INDEX idx_ledger_entries_active_created
    ON ledger_entries ("createdAt" DESC) WHERE "isActive";
"#;
