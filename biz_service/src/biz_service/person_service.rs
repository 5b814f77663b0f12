use crate::biz_service::contact_error::ContactError;
use crate::biz_service::ownership::OwnershipGuard;
use crate::dto::contact_dto::PersonForm;
use crate::entitys::person_entity::PersonEntity;
use crate::entitys::phone_entity::PhoneEntity;
use common::errors::AppError;
use common::repository_util::Repository;
use common::util::common_utils::build_id;
use common::util::date_util::now;
use log::{info, warn};
use mongodb::bson::doc;
use std::sync::Arc;
use validator::Validate;

/// 联系人的增删改
pub struct PersonService {
    pub dao: Arc<dyn Repository<PersonEntity>>,
    phones: Arc<dyn Repository<PhoneEntity>>,
    guard: OwnershipGuard,
}

impl PersonService {
    pub fn new(dao: Arc<dyn Repository<PersonEntity>>, phones: Arc<dyn Repository<PhoneEntity>>, guard: OwnershipGuard) -> Self {
        Self { dao, phones, guard }
    }

    /// 新建联系人，归属固定为调用者
    pub async fn create_person(&self, caller: Option<&str>, form: &PersonForm) -> Result<PersonEntity, ContactError> {
        let email = caller.ok_or(ContactError::Denied)?;
        form.validate()?;
        let form = form.trimmed();
        let time = now();
        let person = PersonEntity {
            id: build_id(),
            user_email: email.to_string(),
            first_name: form.first_name,
            last_name: form.last_name,
            create_time: time,
            update_time: time,
        };
        self.dao.insert(&person).await?;
        info!("person {} created by {}", person.id, email);
        Ok(person)
    }

    /// 编辑页预填
    pub async fn edit_form(&self, person_id: &str, caller: Option<&str>) -> Result<PersonForm, ContactError> {
        let person = self.guard.authorize_person(person_id, caller).await?;
        Ok(PersonForm::from(&person))
    }

    /// 只改姓名，`user_email` 永不改写
    pub async fn update_person(&self, person_id: &str, caller: Option<&str>, form: &PersonForm) -> Result<(), ContactError> {
        let person = self.guard.authorize_person(person_id, caller).await?;
        form.validate()?;
        let form = form.trimmed();
        self.dao
            .update(
                doc! { "_id": person.id.as_str() },
                doc! { "$set": { "first_name": form.first_name, "last_name": form.last_name, "update_time": now() } },
            )
            .await?;
        info!("person {} updated by {}", person.id, person.user_email);
        Ok(())
    }

    /// 删除联系人及其号码；不存在或无权限时静默返回 `false`
    pub async fn delete_person(&self, person_id: &str, caller: Option<&str>) -> Result<bool, AppError> {
        let person = match self.guard.authorize_person(person_id, caller).await {
            Ok(person) => person,
            Err(ContactError::App(e)) => return Err(e),
            Err(_) => {
                warn!("delete person {} refused for {:?}", person_id, caller);
                return Ok(false);
            }
        };
        let phones = self.phones.delete(doc! { "person_id": person.id.as_str() }).await?;
        self.dao.delete(doc! { "_id": person.id.as_str() }).await?;
        info!("person {} deleted by {} ({} phones)", person.id, person.user_email, phones);
        Ok(true)
    }
}
