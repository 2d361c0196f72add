// db/userskilldb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::userskillmodel::*;

const USER_SKILL_COLUMNS: &str = r#"
    id, user_id, skill_id, skill_type, proficiency_level, description, is_available,
    created_at, updated_at
"#;

#[async_trait]
pub trait UserSkillExt {
    /// Returns `None` when the user already lists this skill with the same type.
    async fn create_user_skill(
        &self,
        user_id: i32,
        skill_id: i32,
        skill_type: SkillType,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: bool,
    ) -> Result<Option<UserSkill>, Error>;

    async fn get_user_skill(&self, user_skill_id: i32) -> Result<Option<UserSkill>, Error>;

    async fn get_user_skills(&self, user_id: i32) -> Result<Vec<UserSkillDetails>, Error>;

    /// Overwrites proficiency and description. `is_available` is left alone
    /// when `None`.
    async fn update_user_skill(
        &self,
        user_skill_id: i32,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: Option<bool>,
    ) -> Result<Option<UserSkill>, Error>;

    /// `false` when there was no such row.
    async fn delete_user_skill(&self, user_skill_id: i32) -> Result<bool, Error>;
}

#[async_trait]
impl UserSkillExt for DBClient {
    async fn create_user_skill(
        &self,
        user_id: i32,
        skill_id: i32,
        skill_type: SkillType,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: bool,
    ) -> Result<Option<UserSkill>, Error> {
        let query = format!(
            r#"
            INSERT INTO user_skills
                (user_id, skill_id, skill_type, proficiency_level, description, is_available)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, skill_id, skill_type) DO NOTHING
            RETURNING {}
            "#,
            USER_SKILL_COLUMNS
        );

        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .bind(skill_id)
            .bind(skill_type)
            .bind(proficiency_level)
            .bind(description)
            .bind(is_available)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_skill(&self, user_skill_id: i32) -> Result<Option<UserSkill>, Error> {
        let query = format!("SELECT {} FROM user_skills WHERE id = $1", USER_SKILL_COLUMNS);

        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_skill_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_skills(&self, user_id: i32) -> Result<Vec<UserSkillDetails>, Error> {
        sqlx::query_as::<_, UserSkillDetails>(
            r#"
            SELECT us.id, us.user_id, us.skill_id, us.skill_type, us.proficiency_level,
                   us.description, us.is_available, us.created_at, us.updated_at,
                   s.name AS skill_name, s.category AS skill_category
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            WHERE us.user_id = $1
            ORDER BY us.created_at DESC, us.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_user_skill(
        &self,
        user_skill_id: i32,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: Option<bool>,
    ) -> Result<Option<UserSkill>, Error> {
        let query = format!(
            r#"
            UPDATE user_skills
            SET proficiency_level = $2,
                description = $3,
                is_available = COALESCE($4, is_available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_SKILL_COLUMNS
        );

        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_skill_id)
            .bind(proficiency_level)
            .bind(description)
            .bind(is_available)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_user_skill(&self, user_skill_id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM user_skills WHERE id = $1")
            .bind(user_skill_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
