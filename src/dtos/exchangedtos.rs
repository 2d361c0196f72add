use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeDto {
    #[validate(range(min = 1, message = "A valid provider is required"))]
    pub provider_id: i32,

    #[validate(range(min = 1, message = "A valid requested skill is required"))]
    pub requested_skill_id: i32,

    #[validate(range(min = 1, message = "A valid offered skill is required"))]
    pub offered_skill_id: i32,

    #[validate(length(max = 1000, message = "Message must not exceed 1000 characters"))]
    pub message: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExchangeStatusDto {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFeedbackDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Feedback must not exceed 1000 characters"))]
    #[serde(default)]
    pub feedback: String,

    pub is_requester: bool,
}
