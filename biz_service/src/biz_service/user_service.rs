use crate::entitys::user_entity::UserInfoEntity;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::errors::AppError;
use common::repository_util::Repository;
use common::util::common_utils::build_id;
use common::util::date_util::now;
use log::info;
use mongodb::bson::doc;
use std::sync::Arc;

/// 账号注册与密码校验
pub struct UserService {
    pub dao: Arc<dyn Repository<UserInfoEntity>>,
}

impl UserService {
    pub fn new(dao: Arc<dyn Repository<UserInfoEntity>>) -> Self {
        Self { dao }
    }

    /// 注册新账号，邮箱重复返回 `Conflict`
    ///
    /// 并发注册时预检可能都通过，最终由 email 唯一索引兜底
    pub async fn register(&self, email: &str, password: &str) -> Result<UserInfoEntity, AppError> {
        let email = normalize_email(email);
        if self.dao.find_one(doc! { "email": email.as_str() }).await?.is_some() {
            return Err(AppError::Conflict);
        }
        let user = UserInfoEntity { id: build_id(), email, password: hash_password(password)?, create_time: now() };
        self.dao.insert(&user).await?;
        info!("user {} registered", user.email);
        Ok(user)
    }

    /// 账号不存在和密码错误都返回 `None`
    pub async fn verify_login(&self, email: &str, password: &str) -> Result<Option<UserInfoEntity>, AppError> {
        let email = normalize_email(email);
        let Some(user) = self.dao.find_one(doc! { "email": email.as_str() }).await? else {
            return Ok(None);
        };
        if verify_password(password, &user.password)? { Ok(Some(user)) } else { Ok(None) }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2id，返回带盐的 PHC 字符串
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid password hash format: {e}")))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::memory_repository::MemoryRepository;
    use mongodb::bson::Document;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryRepository::<UserInfoEntity>::indexed()))
    }

    /// 读永远落后一步：模拟两个注册请求同时通过重复预检
    struct StaleReads(MemoryRepository<UserInfoEntity>);

    #[async_trait]
    impl Repository<UserInfoEntity> for StaleReads {
        async fn find_by_id(&self, _: &str) -> Result<Option<UserInfoEntity>, AppError> {
            Ok(None)
        }
        async fn insert(&self, entity: &UserInfoEntity) -> Result<(), AppError> {
            self.0.insert(entity).await
        }
        async fn find_one(&self, _: Document) -> Result<Option<UserInfoEntity>, AppError> {
            Ok(None)
        }
        async fn query(&self, filter: Document) -> Result<Vec<UserInfoEntity>, AppError> {
            self.0.query(filter).await
        }
        async fn update(&self, filter: Document, update: Document) -> Result<u64, AppError> {
            self.0.update(filter, update).await
        }
        async fn delete(&self, filter: Document) -> Result<u64, AppError> {
            self.0.delete(filter).await
        }
    }

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("letters123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("letters123", &hash).unwrap());
        assert!(!verify_password("letters124", &hash).unwrap());
        assert!(verify_password("letters123", "not-a-hash").is_err());
    }

    #[tokio::test]
    async fn register_normalizes_and_rejects_duplicates() {
        let s = service();
        let user = s.register(" Ann@X.com ", "letters123").await.unwrap();
        assert_eq!(user.email, "ann@x.com");
        assert_ne!(user.password, "letters123");
        assert!(matches!(s.register("ann@x.com", "other1234").await, Err(AppError::Conflict)));
    }

    #[tokio::test]
    async fn email_index_rejects_register_that_passed_precheck() {
        let dao = Arc::new(StaleReads(MemoryRepository::indexed()));
        let s = UserService::new(dao.clone());
        s.register("ann@x.com", "letters123").await.unwrap();
        assert!(matches!(s.register("ANN@x.com", "letters456").await, Err(AppError::Conflict)));
        assert_eq!(dao.query(doc! { "email": "ann@x.com" }).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_checks_password() {
        let s = service();
        s.register("ann@x.com", "letters123").await.unwrap();
        assert!(s.verify_login("ANN@x.com", "letters123").await.unwrap().is_some());
        assert!(s.verify_login("ann@x.com", "wrong12345").await.unwrap().is_none());
        assert!(s.verify_login("bob@x.com", "letters123").await.unwrap().is_none());
    }
}
