pub mod contact_error;
pub mod contact_service;
pub mod ownership;
pub mod person_service;
pub mod phone_service;
pub mod session_service;
pub mod user_service;

use crate::biz_service::contact_service::ContactService;
use crate::biz_service::ownership::OwnershipGuard;
use crate::biz_service::person_service::PersonService;
use crate::biz_service::phone_service::PhoneService;
use crate::biz_service::session_service::SessionService;
use crate::biz_service::user_service::UserService;
use crate::entitys::person_entity::PersonEntity;
use crate::entitys::phone_entity::PhoneEntity;
use crate::entitys::user_entity::UserInfoEntity;
use actix_web::web;
use common::config::SessionConfig;
use common::errors::AppError;
use common::memory_repository::MemoryRepository;
use common::repository_util::{BaseRepository, Repository};
use mongodb::Database;
use std::sync::Arc;

/// 三张表的存储句柄，在 Mongo 与内存实现之间切换
#[derive(Clone)]
pub struct ServerRes {
    pub persons: Arc<dyn Repository<PersonEntity>>,
    pub phones: Arc<dyn Repository<PhoneEntity>>,
    pub users: Arc<dyn Repository<UserInfoEntity>>,
}

impl ServerRes {
    pub fn memory() -> Self {
        Self {
            persons: Arc::new(MemoryRepository::<PersonEntity>::indexed()),
            phones: Arc::new(MemoryRepository::<PhoneEntity>::indexed()),
            users: Arc::new(MemoryRepository::<UserInfoEntity>::indexed()),
        }
    }

    /// 连接 Mongo 集合并补建索引
    pub async fn mongo(db: &Database) -> Result<Self, AppError> {
        let persons = BaseRepository::new(db.collection::<PersonEntity>("person"));
        let phones = BaseRepository::new(db.collection::<PhoneEntity>("phone"));
        let users = BaseRepository::new(db.collection::<UserInfoEntity>("user_info"));
        persons.ensure_indexes().await?;
        phones.ensure_indexes().await?;
        users.ensure_indexes().await?;
        Ok(Self { persons: Arc::new(persons), phones: Arc::new(phones), users: Arc::new(users) })
    }

    pub fn guard(&self) -> OwnershipGuard {
        OwnershipGuard::new(self.persons.clone(), self.phones.clone())
    }
}

/// 注册全部业务服务为 actix `app_data`
///
/// 会话服务单独传入，多个 worker 必须共享同一份。
pub fn configure(cfg: &mut web::ServiceConfig, res: ServerRes, sessions: web::Data<SessionService>) {
    let contact_service = ContactService::new(res.persons.clone(), res.phones.clone());
    cfg.app_data(web::Data::new(contact_service));

    let person_service = PersonService::new(res.persons.clone(), res.phones.clone(), res.guard());
    cfg.app_data(web::Data::new(person_service));

    let phone_service = PhoneService::new(res.phones.clone(), res.guard());
    cfg.app_data(web::Data::new(phone_service));

    let user_service = UserService::new(res.users.clone());
    cfg.app_data(web::Data::new(user_service));

    cfg.app_data(sessions);
}

pub fn build_sessions(config: &SessionConfig) -> web::Data<SessionService> {
    web::Data::new(SessionService::new(config))
}
