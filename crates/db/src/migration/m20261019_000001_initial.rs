//! Initial database migration.
//!
//! Creates users, students, companies and the scan/save activity tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PRINCIPALS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(STUDENTS_SQL).await?;
        db.execute_unprepared(COMPANIES_SQL).await?;

        // ============================================================
        // PART 3: ACTIVITY
        // ============================================================
        db.execute_unprepared(ACTIVITY_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('student', 'company', 'admin');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    role user_role NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const STUDENTS_SQL: &str = r"
CREATE TABLE students (
    code VARCHAR(32) PRIMARY KEY,
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    year INTEGER NOT NULL CHECK (year > 0),
    image TEXT,
    cv TEXT,
    bio VARCHAR(255),
    linkedin TEXT,
    github TEXT,
    interests JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_interests_array CHECK (jsonb_typeof(interests) = 'array')
);

CREATE UNIQUE INDEX idx_students_user ON students(user_id) WHERE user_id IS NOT NULL;
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACTIVITY_SQL: &str = r"
-- Every badge scan, repeated scans included
CREATE TABLE scans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_code VARCHAR(32) NOT NULL REFERENCES students(code) ON DELETE CASCADE,
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    scanned_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_scans_student ON scans(student_code, company_id);

-- A company keeps a student at most once
CREATE TABLE saved_students (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_code VARCHAR(32) NOT NULL REFERENCES students(code) ON DELETE CASCADE,
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    saved_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_saved_student_company UNIQUE (student_code, company_id)
);

CREATE INDEX idx_saved_students_recent ON saved_students(student_code, saved_at DESC);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS saved_students CASCADE;
DROP TABLE IF EXISTS scans CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TABLE IF EXISTS students CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS user_role;
";
