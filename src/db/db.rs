// db/db.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::models::skillmodel::DEFAULT_SKILLS;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(50) UNIQUE NOT NULL,
    email VARCHAR(100) UNIQUE NOT NULL,
    password VARCHAR(255) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS skills (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) UNIQUE NOT NULL,
    description VARCHAR(500),
    category VARCHAR(50) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

DO $$ BEGIN
    CREATE TYPE exchange_status AS ENUM (
        'PENDING', 'ACCEPTED', 'REJECTED', 'IN_PROGRESS', 'COMPLETED', 'CANCELLED'
    );
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS skill_exchanges (
    id SERIAL PRIMARY KEY,
    requester_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    provider_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    requested_skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    offered_skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    status exchange_status NOT NULL DEFAULT 'PENDING',
    message VARCHAR(1000),
    requester_rating INTEGER CHECK (requester_rating >= 1 AND requester_rating <= 5),
    provider_rating INTEGER CHECK (provider_rating >= 1 AND provider_rating <= 5),
    requester_feedback VARCHAR(1000),
    provider_feedback VARCHAR(1000),
    scheduled_date TIMESTAMPTZ,
    completed_date TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (requester_id <> provider_id)
);

CREATE UNIQUE INDEX IF NOT EXISTS skill_exchanges_open_request_idx
    ON skill_exchanges (requester_id, provider_id, requested_skill_id, offered_skill_id)
    WHERE status = 'PENDING';

CREATE INDEX IF NOT EXISTS skill_exchanges_requester_idx ON skill_exchanges (requester_id);
CREATE INDEX IF NOT EXISTS skill_exchanges_provider_idx ON skill_exchanges (provider_id);

CREATE TABLE IF NOT EXISTS messages (
    id SERIAL PRIMARY KEY,
    sender_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    receiver_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content VARCHAR(2000) NOT NULL,
    exchange_id INTEGER REFERENCES skill_exchanges(id) ON DELETE SET NULL,
    is_read BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (sender_id <> receiver_id)
);

DO $$ BEGIN
    CREATE TYPE skill_type AS ENUM ('OFFER', 'LEARN');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS user_skills (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    skill_id INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    skill_type skill_type NOT NULL,
    proficiency_level INTEGER CHECK (proficiency_level >= 1 AND proficiency_level <= 5),
    description VARCHAR(1000),
    is_available BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (user_id, skill_id, skill_type)
);

CREATE INDEX IF NOT EXISTS user_skills_user_idx ON user_skills (user_id);

CREATE INDEX IF NOT EXISTS messages_pair_idx ON messages (sender_id, receiver_id, created_at);
CREATE INDEX IF NOT EXISTS messages_unread_idx ON messages (receiver_id) WHERE is_read = FALSE;
"#;

// Arbitrary key for pg_advisory_xact_lock, held while the schema is applied.
const SCHEMA_LOCK_KEY: i64 = 0x5c11_5a4a;

#[derive(Debug, Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }

    /// Create tables, types and indexes that are missing. Safe to run on every
    /// start, including from several processes at once.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        sqlx::raw_sql(SCHEMA).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Insert the default skill catalog when the table is empty.
    pub async fn seed_skills(&self) -> Result<u64, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for (name, description, category) in DEFAULT_SKILLS {
            sqlx::query(
                r#"
                INSERT INTO skills (name, description, category, is_active)
                VALUES ($1, $2, $3, TRUE)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(description)
            .bind(category)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!("Seeded {} default skills", DEFAULT_SKILLS.len());
        Ok(DEFAULT_SKILLS.len() as u64)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
pub trait HealthExt {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl HealthExt for DBClient {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
