// db/memorydb.rs
//! In-memory implementation of the storage traits, used by service and
//! router tests in place of Postgres.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Error;

use super::{
    db::HealthExt, exchangedb::ExchangeExt, messagedb::MessageExt, skilldb::SkillExt,
    userdb::UserExt, userskilldb::UserSkillExt,
};
use crate::models::{
    exchangemodel::*, messagemodel::*, skillmodel::Skill, usermodel::User, userskillmodel::*,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    skills: Vec<Skill>,
    exchanges: Vec<SkillExchange>,
    messages: Vec<Message>,
    user_skills: Vec<UserSkill>,
    next_user_skill_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: tables.users.len() as i32 + 1,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: String::new(),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn add_skill(&self, name: &str, category: &str) -> Skill {
        let mut tables = self.tables.lock().unwrap();
        let skill = Skill {
            id: tables.skills.len() as i32 + 1,
            name: name.to_string(),
            description: None,
            category: category.to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        tables.skills.push(skill.clone());
        skill
    }

    /// While set, user lookups and pings fail like a lost connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::PoolTimedOut);
        }
        Ok(())
    }

    pub fn message(&self, message_id: i32) -> Option<Message> {
        let tables = self.tables.lock().unwrap();
        tables.messages.iter().find(|m| m.id == message_id).cloned()
    }
}

impl Tables {
    fn user(&self, user_id: i32) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    fn skill_name(&self, skill_id: i32) -> Option<String> {
        self.skills
            .iter()
            .find(|s| s.id == skill_id)
            .map(|s| s.name.clone())
    }

    fn details(&self, exchange: &SkillExchange) -> Option<ExchangeDetails> {
        let requester = self.user(exchange.requester_id)?;
        let provider = self.user(exchange.provider_id)?;

        Some(ExchangeDetails {
            exchange: exchange.clone(),
            requester_username: requester.username.clone(),
            requester_first_name: requester.first_name.clone(),
            requester_last_name: requester.last_name.clone(),
            provider_username: provider.username.clone(),
            provider_first_name: provider.first_name.clone(),
            provider_last_name: provider.last_name.clone(),
            requested_skill_name: self.skill_name(exchange.requested_skill_id)?,
            offered_skill_name: self.skill_name(exchange.offered_skill_id)?,
        })
    }

    fn with_users(&self, message: &Message) -> Option<MessageWithUsers> {
        Some(MessageWithUsers {
            message: message.clone(),
            sender_username: self.user(message.sender_id)?.username.clone(),
            receiver_username: self.user(message.receiver_id)?.username.clone(),
        })
    }
}

#[async_trait]
impl HealthExt for MemoryStore {
    async fn ping(&self) -> Result<(), Error> {
        self.check_available()
    }
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(
        &self,
        user_id: Option<i32>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        self.check_available()?;
        let tables = self.tables.lock().unwrap();
        let user = tables.users.iter().find(|u| {
            if let Some(user_id) = user_id {
                u.id == user_id
            } else if let Some(username) = username {
                u.username == username
            } else if let Some(email) = email {
                u.email == email
            } else {
                false
            }
        });
        Ok(user.cloned())
    }

    async fn save_user(
        &self,
        username: String,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Result<User, Error> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: tables.users.len() as i32 + 1,
            username,
            email,
            password,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl SkillExt for MemoryStore {
    async fn get_skill(&self, skill_id: i32) -> Result<Option<Skill>, Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.skills.iter().find(|s| s.id == skill_id).cloned())
    }

    async fn get_skills(&self) -> Result<Vec<Skill>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut skills: Vec<Skill> = tables.skills.iter().filter(|s| s.is_active).cloned().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn get_skill_categories(&self) -> Result<Vec<String>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut categories: Vec<String> = tables
            .skills
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn get_skills_by_category(&self, category: &str) -> Result<Vec<Skill>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut skills: Vec<Skill> = tables
            .skills
            .iter()
            .filter(|s| s.is_active && s.category == category)
            .cloned()
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }
}

#[async_trait]
impl UserSkillExt for MemoryStore {
    async fn create_user_skill(
        &self,
        user_id: i32,
        skill_id: i32,
        skill_type: SkillType,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: bool,
    ) -> Result<Option<UserSkill>, Error> {
        let mut tables = self.tables.lock().unwrap();

        let duplicate = tables.user_skills.iter().any(|us| {
            us.user_id == user_id && us.skill_id == skill_id && us.skill_type == skill_type
        });
        if duplicate {
            return Ok(None);
        }

        // Ids are never reused after a delete, like a SERIAL column.
        tables.next_user_skill_id += 1;
        let now = Utc::now();
        let user_skill = UserSkill {
            id: tables.next_user_skill_id,
            user_id,
            skill_id,
            skill_type,
            proficiency_level,
            description,
            is_available,
            created_at: now,
            updated_at: now,
        };
        tables.user_skills.push(user_skill.clone());
        Ok(Some(user_skill))
    }

    async fn get_user_skill(&self, user_skill_id: i32) -> Result<Option<UserSkill>, Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.user_skills.iter().find(|us| us.id == user_skill_id).cloned())
    }

    async fn get_user_skills(&self, user_id: i32) -> Result<Vec<UserSkillDetails>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut entries: Vec<UserSkillDetails> = tables
            .user_skills
            .iter()
            .filter(|us| us.user_id == user_id)
            .filter_map(|us| {
                let skill = tables.skills.iter().find(|s| s.id == us.skill_id)?;
                Some(UserSkillDetails {
                    user_skill: us.clone(),
                    skill_name: skill.name.clone(),
                    skill_category: skill.category.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            (b.user_skill.created_at, b.user_skill.id).cmp(&(a.user_skill.created_at, a.user_skill.id))
        });
        Ok(entries)
    }

    async fn update_user_skill(
        &self,
        user_skill_id: i32,
        proficiency_level: Option<i32>,
        description: Option<String>,
        is_available: Option<bool>,
    ) -> Result<Option<UserSkill>, Error> {
        let mut tables = self.tables.lock().unwrap();
        let user_skill = tables.user_skills.iter_mut().find(|us| us.id == user_skill_id);

        Ok(user_skill.map(|us| {
            us.proficiency_level = proficiency_level;
            us.description = description;
            if let Some(is_available) = is_available {
                us.is_available = is_available;
            }
            us.updated_at = Utc::now();
            us.clone()
        }))
    }

    async fn delete_user_skill(&self, user_skill_id: i32) -> Result<bool, Error> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.user_skills.len();
        tables.user_skills.retain(|us| us.id != user_skill_id);
        Ok(tables.user_skills.len() < before)
    }
}

#[async_trait]
impl ExchangeExt for MemoryStore {
    async fn create_exchange(
        &self,
        requester_id: i32,
        provider_id: i32,
        requested_skill_id: i32,
        offered_skill_id: i32,
        message: Option<String>,
    ) -> Result<Option<SkillExchange>, Error> {
        let mut tables = self.tables.lock().unwrap();

        let duplicate = tables.exchanges.iter().any(|e| {
            e.status == ExchangeStatus::Pending
                && e.requester_id == requester_id
                && e.provider_id == provider_id
                && e.requested_skill_id == requested_skill_id
                && e.offered_skill_id == offered_skill_id
        });
        if duplicate {
            return Ok(None);
        }

        let now = Utc::now();
        let exchange = SkillExchange {
            id: tables.exchanges.len() as i32 + 1,
            requester_id,
            provider_id,
            requested_skill_id,
            offered_skill_id,
            status: ExchangeStatus::Pending,
            message,
            requester_rating: None,
            provider_rating: None,
            requester_feedback: None,
            provider_feedback: None,
            scheduled_date: None,
            completed_date: None,
            created_at: now,
            updated_at: now,
        };
        tables.exchanges.push(exchange.clone());
        Ok(Some(exchange))
    }

    async fn get_exchange(&self, exchange_id: i32) -> Result<Option<SkillExchange>, Error> {
        // Interleave with other futures the way separate connections would.
        tokio::task::yield_now().await;
        let tables = self.tables.lock().unwrap();
        Ok(tables.exchanges.iter().find(|e| e.id == exchange_id).cloned())
    }

    async fn get_exchange_details(
        &self,
        exchange_id: i32,
    ) -> Result<Option<ExchangeDetails>, Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .exchanges
            .iter()
            .find(|e| e.id == exchange_id)
            .and_then(|e| tables.details(e)))
    }

    async fn get_user_exchanges(&self, user_id: i32) -> Result<Vec<ExchangeDetails>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut exchanges: Vec<ExchangeDetails> = tables
            .exchanges
            .iter()
            .filter(|e| e.requester_id == user_id || e.provider_id == user_id)
            .filter_map(|e| tables.details(e))
            .collect();
        exchanges.sort_by(|a, b| {
            (b.exchange.created_at, b.exchange.id).cmp(&(a.exchange.created_at, a.exchange.id))
        });
        Ok(exchanges)
    }

    async fn update_exchange_status(
        &self,
        exchange_id: i32,
        expected: ExchangeStatus,
        next: ExchangeStatus,
    ) -> Result<Option<ExchangeStatusUpdate>, Error> {
        tokio::task::yield_now().await;
        let mut tables = self.tables.lock().unwrap();
        let exchange = tables
            .exchanges
            .iter_mut()
            .find(|e| e.id == exchange_id && e.status == expected);

        Ok(exchange.map(|e| {
            e.status = next;
            e.updated_at = Utc::now();
            ExchangeStatusUpdate {
                id: e.id,
                status: e.status,
                updated_at: e.updated_at,
            }
        }))
    }

    async fn record_feedback(
        &self,
        exchange_id: i32,
        role: ExchangeRole,
        rating: i32,
        feedback: String,
    ) -> Result<Option<SkillExchange>, Error> {
        let mut tables = self.tables.lock().unwrap();
        let exchange = tables
            .exchanges
            .iter_mut()
            .find(|e| e.id == exchange_id && e.status == ExchangeStatus::Completed);

        Ok(exchange.map(|e| {
            match role {
                ExchangeRole::Requester => {
                    e.requester_rating = Some(rating);
                    e.requester_feedback = Some(feedback);
                }
                ExchangeRole::Provider => {
                    e.provider_rating = Some(rating);
                    e.provider_feedback = Some(feedback);
                }
            }
            e.updated_at = Utc::now();
            e.clone()
        }))
    }
}

#[async_trait]
impl MessageExt for MemoryStore {
    async fn send_message(
        &self,
        sender_id: i32,
        receiver_id: i32,
        content: String,
        exchange_id: Option<i32>,
    ) -> Result<Message, Error> {
        let mut tables = self.tables.lock().unwrap();
        let message = Message {
            id: tables.messages.len() as i32 + 1,
            sender_id,
            receiver_id,
            content,
            exchange_id,
            is_read: false,
            created_at: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn get_conversation(
        &self,
        user_id: i32,
        other_user_id: i32,
    ) -> Result<Vec<MessageWithUsers>, Error> {
        let mut tables = self.tables.lock().unwrap();

        let mut thread: Vec<MessageWithUsers> = tables
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_id && m.receiver_id == other_user_id)
                    || (m.sender_id == other_user_id && m.receiver_id == user_id)
            })
            .filter_map(|m| tables.with_users(m))
            .collect();
        thread.sort_by(|a, b| {
            (a.message.created_at, a.message.id).cmp(&(b.message.created_at, b.message.id))
        });

        let seen: Vec<i32> = thread
            .iter()
            .filter(|m| m.message.receiver_id == user_id && !m.message.is_read)
            .map(|m| m.message.id)
            .collect();
        for message in tables.messages.iter_mut().filter(|m| seen.contains(&m.id)) {
            message.is_read = true;
        }

        Ok(thread)
    }

    async fn get_unread_count(&self, user_id: i32) -> Result<i64, Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.receiver_id == user_id && !m.is_read)
            .count() as i64)
    }

    async fn get_user_messages(&self, user_id: i32) -> Result<Vec<MessageWithUsers>, Error> {
        let tables = self.tables.lock().unwrap();
        let mut log: Vec<MessageWithUsers> = tables
            .messages
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .filter_map(|m| tables.with_users(m))
            .collect();
        log.sort_by(|a, b| {
            (a.message.created_at, a.message.id).cmp(&(b.message.created_at, b.message.id))
        });
        Ok(log)
    }
}
