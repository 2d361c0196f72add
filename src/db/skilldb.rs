// db/skilldb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::skillmodel::Skill;

#[async_trait]
pub trait SkillExt {
    async fn get_skill(&self, skill_id: i32) -> Result<Option<Skill>, Error>;

    async fn get_skills(&self) -> Result<Vec<Skill>, Error>;

    async fn get_skill_categories(&self) -> Result<Vec<String>, Error>;

    async fn get_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, Error>;
}

#[async_trait]
impl SkillExt for DBClient {
    async fn get_skill(&self, skill_id: i32) -> Result<Option<Skill>, Error> {
        sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, is_active, created_at
            FROM skills
            WHERE id = $1
            "#,
        )
        .bind(skill_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_skills(&self) -> Result<Vec<Skill>, Error> {
        sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, is_active, created_at
            FROM skills
            WHERE is_active = TRUE
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_skill_categories(&self) -> Result<Vec<String>, Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM skills
            WHERE is_active = TRUE
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, Error> {
        sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, is_active, created_at
            FROM skills
            WHERE category = $1 AND is_active = TRUE
            ORDER BY name ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }
}
