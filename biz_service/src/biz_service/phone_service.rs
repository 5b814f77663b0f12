use crate::biz_service::contact_error::ContactError;
use crate::biz_service::ownership::OwnershipGuard;
use crate::dto::phone_dto::{PhoneForm, PhoneFormView, PhoneListView, PhoneRow};
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

/// 删除号码的结果
///
/// 跳转目标只取决于路径中的联系人是否属于调用者，不暴露号码本身是否存在或归属谁
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneDeletion {
    Deleted { person_id: String },
    /// 号码不存在或不属于该联系人，什么都不删
    Unchanged { person_id: String },
    /// 路径中的联系人不存在或不属于调用者
    Denied,
}

/// 号码的增删改，权限全部经由父联系人
pub struct PhoneService {
    pub dao: Arc<dyn Repository<PhoneEntity>>,
    guard: OwnershipGuard,
}

impl PhoneService {
    pub fn new(dao: Arc<dyn Repository<PhoneEntity>>, guard: OwnershipGuard) -> Self {
        Self { dao, guard }
    }

    pub async fn list_phones(&self, person_id: &str, caller: Option<&str>) -> Result<PhoneListView, ContactError> {
        let person = self.guard.authorize_person(person_id, caller).await?;
        let phones = self.dao.query(doc! { "person_id": person.id.as_str() }).await?;
        Ok(PhoneListView {
            rows: phones.into_iter().map(PhoneRow::from).collect(),
            contact_person: person.full_name(),
            person_id: person.id,
            user_email: person.user_email,
        })
    }

    /// 新增号码的空表单，附带父联系人姓名
    pub async fn add_form(&self, person_id: &str, caller: Option<&str>) -> Result<PhoneFormView, ContactError> {
        let person = self.guard.authorize_person(person_id, caller).await?;
        Ok(PhoneFormView::new(PhoneForm::default(), &person))
    }

    pub async fn add_phone(&self, person_id: &str, caller: Option<&str>, form: &PhoneForm) -> Result<PhoneEntity, ContactError> {
        let person = self.guard.authorize_person(person_id, caller).await?;
        form.validate()?;
        let form = form.trimmed();
        let time = now();
        let phone = PhoneEntity {
            id: build_id(),
            person_id: person.id,
            number: form.number,
            kind: form.kind,
            create_time: time,
            update_time: time,
        };
        self.dao.insert(&phone).await?;
        info!("phone {} added to person {}", phone.id, phone.person_id);
        Ok(phone)
    }

    /// 号码必须确实属于路径中的联系人
    async fn authorize(&self, person_id: &str, phone_id: &str, caller: Option<&str>) -> Result<(PhoneEntity, PersonEntity), ContactError> {
        let (phone, person) = self.guard.authorize_phone(phone_id, caller).await?;
        if person.id != person_id {
            warn!("phone {} does not belong to person {}", phone_id, person_id);
            return Err(ContactError::Denied);
        }
        Ok((phone, person))
    }

    pub async fn edit_form(&self, person_id: &str, phone_id: &str, caller: Option<&str>) -> Result<PhoneFormView, ContactError> {
        let (phone, person) = self.authorize(person_id, phone_id, caller).await?;
        Ok(PhoneFormView::new(PhoneForm::from(&phone), &person))
    }

    pub async fn update_phone(&self, person_id: &str, phone_id: &str, caller: Option<&str>, form: &PhoneForm) -> Result<(), ContactError> {
        let (phone, _) = self.authorize(person_id, phone_id, caller).await?;
        form.validate()?;
        let form = form.trimmed();
        self.dao
            .update(
                doc! { "_id": phone.id.as_str() },
                doc! { "$set": { "number": form.number, "kind": form.kind, "update_time": now() } },
            )
            .await?;
        info!("phone {} updated", phone.id);
        Ok(())
    }

    pub async fn delete_phone(&self, person_id: &str, phone_id: &str, caller: Option<&str>) -> Result<PhoneDeletion, AppError> {
        let person = match self.guard.authorize_person(person_id, caller).await {
            Ok(person) => person,
            Err(ContactError::App(e)) => return Err(e),
            Err(_) => return Ok(PhoneDeletion::Denied),
        };
        let deleted = self.dao.delete(doc! { "_id": phone_id, "person_id": person.id.as_str() }).await?;
        if deleted == 0 {
            warn!("phone {} not deleted: not under person {}", phone_id, person.id);
            return Ok(PhoneDeletion::Unchanged { person_id: person.id });
        }
        info!("phone {} deleted from person {}", phone_id, person.id);
        Ok(PhoneDeletion::Deleted { person_id: person.id })
    }
}
