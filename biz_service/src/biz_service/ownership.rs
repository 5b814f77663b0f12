use crate::biz_service::contact_error::ContactError;
use crate::entitys::person_entity::PersonEntity;
use crate::entitys::phone_entity::PhoneEntity;
use common::repository_util::Repository;
use log::debug;
use std::sync::Arc;

/// 联系人只允许其 `user_email` 本人读写；无身份一律拒绝
pub fn is_owner(person: &PersonEntity, caller: Option<&str>) -> bool {
    matches!(caller, Some(email) if email == person.user_email)
}

/// 归属校验：查不到与无权限走同一个 `ContactError::Denied`
#[derive(Clone)]
pub struct OwnershipGuard {
    persons: Arc<dyn Repository<PersonEntity>>,
    phones: Arc<dyn Repository<PhoneEntity>>,
}

impl OwnershipGuard {
    pub fn new(persons: Arc<dyn Repository<PersonEntity>>, phones: Arc<dyn Repository<PhoneEntity>>) -> Self {
        Self { persons, phones }
    }

    pub async fn authorize_person(&self, person_id: &str, caller: Option<&str>) -> Result<PersonEntity, ContactError> {
        let Some(person) = self.persons.find_by_id(person_id).await? else {
            debug!("person {} not found", person_id);
            return Err(ContactError::Denied);
        };
        if !is_owner(&person, caller) {
            debug!("person {} denied for {:?}", person_id, caller);
            return Err(ContactError::Denied);
        }
        Ok(person)
    }

    /// 号码的权限取自父联系人；父记录缺失同样拒绝
    pub async fn authorize_phone(&self, phone_id: &str, caller: Option<&str>) -> Result<(PhoneEntity, PersonEntity), ContactError> {
        let Some(phone) = self.phones.find_by_id(phone_id).await? else {
            debug!("phone {} not found", phone_id);
            return Err(ContactError::Denied);
        };
        let person = self.authorize_person(&phone.person_id, caller).await?;
        Ok((phone, person))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::memory_repository::MemoryRepository;

    fn person(id: &str, owner: &str) -> PersonEntity {
        PersonEntity { id: id.to_string(), user_email: owner.to_string(), first_name: "Ann".to_string(), last_name: "Lee".to_string(), ..Default::default() }
    }

    fn phone(id: &str, person_id: &str) -> PhoneEntity {
        PhoneEntity { id: id.to_string(), person_id: person_id.to_string(), number: "555-1111".to_string(), kind: "home".to_string(), ..Default::default() }
    }

    async fn guard() -> OwnershipGuard {
        let persons = Arc::new(MemoryRepository::<PersonEntity>::new());
        let phones = Arc::new(MemoryRepository::<PhoneEntity>::new());
        persons.insert(&person("p1", "a@x.com")).await.unwrap();
        phones.insert(&phone("ph1", "p1")).await.unwrap();
        phones.insert(&phone("orphan", "gone")).await.unwrap();
        OwnershipGuard::new(persons, phones)
    }

    #[test]
    fn owner_check_requires_identity() {
        let p = person("p1", "a@x.com");
        assert!(is_owner(&p, Some("a@x.com")));
        assert!(!is_owner(&p, Some("b@x.com")));
        assert!(!is_owner(&p, None));
    }

    #[tokio::test]
    async fn missing_and_foreign_persons_are_both_denied() {
        let guard = guard().await;
        assert!(guard.authorize_person("p1", Some("a@x.com")).await.is_ok());
        assert!(matches!(guard.authorize_person("p1", Some("b@x.com")).await, Err(ContactError::Denied)));
        assert!(matches!(guard.authorize_person("nope", Some("a@x.com")).await, Err(ContactError::Denied)));
    }

    #[tokio::test]
    async fn phone_access_follows_parent() {
        let guard = guard().await;
        let (ph, p) = guard.authorize_phone("ph1", Some("a@x.com")).await.unwrap();
        assert_eq!(ph.person_id, p.id);
        assert!(matches!(guard.authorize_phone("ph1", Some("b@x.com")).await, Err(ContactError::Denied)));
        assert!(matches!(guard.authorize_phone("orphan", Some("a@x.com")).await, Err(ContactError::Denied)));
        assert!(matches!(guard.authorize_phone("ph1", None).await, Err(ContactError::Denied)));
    }
}
