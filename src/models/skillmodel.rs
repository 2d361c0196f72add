use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Catalog entries inserted on first start: (name, description, category).
pub const DEFAULT_SKILLS: [(&str, &str, &str); 10] = [
    ("Web Development", "Frontend and backend web development skills", "Technology"),
    ("Digital Marketing", "SEO, social media, and content marketing", "Business"),
    ("Language Learning", "Teaching and learning foreign languages", "Education"),
    ("Photography", "Portrait, landscape, and commercial photography", "Arts"),
    ("Data Science", "Python, machine learning, and data analysis", "Technology"),
    ("Cooking", "Various cuisines and cooking techniques", "Lifestyle"),
    ("Music", "Guitar, piano, and music theory", "Arts"),
    ("Fitness Training", "Yoga, weight training, and nutrition", "Health"),
    ("Graphic Design", "Adobe Creative Suite and design principles", "Arts"),
    ("Public Speaking", "Presentation skills and communication", "Business"),
];
