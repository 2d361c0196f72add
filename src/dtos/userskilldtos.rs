use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserSkillDto {
    #[validate(range(min = 1, message = "A valid user is required"))]
    pub user_id: i32,

    #[validate(range(min = 1, message = "A valid skill is required"))]
    pub skill_id: i32,

    #[validate(length(min = 1, message = "Skill type is required"))]
    pub skill_type: String,

    #[validate(range(min = 1, max = 5, message = "Proficiency level must be between 1 and 5"))]
    pub proficiency_level: Option<i32>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    pub is_available: Option<bool>,
}

#[derive(Validate, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSkillDto {
    #[validate(range(min = 1, max = 5, message = "Proficiency level must be between 1 and 5"))]
    pub proficiency_level: Option<i32>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    pub is_available: Option<bool>,
}
