//! Upload slots migration.
//!
//! Creates the table tracking issued upload authorizations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(UPLOAD_SLOTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS upload_slots CASCADE; \
             DROP TYPE IF EXISTS slot_status; \
             DROP TYPE IF EXISTS upload_purpose;",
        )
        .await?;
        Ok(())
    }
}

const UPLOAD_SLOTS_SQL: &str = r"
CREATE TYPE upload_purpose AS ENUM ('avatar', 'cv');
CREATE TYPE slot_status AS ENUM ('pending', 'bound');

-- One row per issued upload; the object key is '{purpose}/{id}'
CREATE TABLE upload_slots (
    id UUID PRIMARY KEY,
    purpose upload_purpose NOT NULL,
    content_type VARCHAR(127) NOT NULL,
    max_size BIGINT NOT NULL CHECK (max_size > 0),
    owner_code VARCHAR(32) NOT NULL,
    status slot_status NOT NULL DEFAULT 'pending',
    url TEXT,
    expires_at TIMESTAMPTZ NOT NULL,
    bound_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expires_future CHECK (expires_at > created_at),
    CONSTRAINT chk_bound_has_url CHECK (
        (status = 'pending' AND url IS NULL AND bound_at IS NULL)
        OR (status = 'bound' AND url IS NOT NULL AND bound_at IS NOT NULL)
    )
);

-- Index for the expired-slot sweeper
CREATE INDEX idx_upload_slots_expired ON upload_slots(expires_at) WHERE status = 'pending';
";
