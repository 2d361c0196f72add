pub mod db;
pub mod exchangedb;
pub mod messagedb;
pub mod skilldb;
pub mod userdb;
pub mod userskilldb;

#[cfg(test)]
pub mod memorydb;

use std::fmt::Debug;

use self::{
    db::HealthExt, exchangedb::ExchangeExt, messagedb::MessageExt, skilldb::SkillExt,
    userdb::UserExt, userskilldb::UserSkillExt,
};

/// Everything the services need from storage, usable as `Arc<dyn Store>`.
pub trait Store:
    UserExt + SkillExt + UserSkillExt + ExchangeExt + MessageExt + HealthExt + Debug + Send + Sync
{
}

impl<T> Store for T where
    T: UserExt + SkillExt + UserSkillExt + ExchangeExt + MessageExt + HealthExt + Debug + Send + Sync
{
}
