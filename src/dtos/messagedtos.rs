use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDto {
    #[validate(range(min = 1, message = "A valid receiver is required"))]
    pub receiver_id: i32,

    #[validate(length(min = 1, max = 2000, message = "Message must be between 1-2000 characters"))]
    pub content: String,

    pub exchange_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountDto {
    pub unread_count: i64,
}
