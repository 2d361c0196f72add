// models/userskillmodel.rs
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a member teaches a skill or wants to learn it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "skill_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillType {
    Offer,
    Learn,
}

impl SkillType {
    pub fn to_str(&self) -> &str {
        match self {
            SkillType::Offer => "OFFER",
            SkillType::Learn => "LEARN",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OFFER" => Ok(SkillType::Offer),
            "LEARN" => Ok(SkillType::Learn),
            other => Err(format!("Unknown skill type '{}', expected OFFER or LEARN", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSkill {
    pub id: i32,
    pub user_id: i32,
    pub skill_id: i32,
    pub skill_type: SkillType,
    pub proficiency_level: Option<i32>,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A registry entry joined with the catalog entry it points at.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSkillDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user_skill: UserSkill,
    pub skill_name: String,
    pub skill_category: String,
}
