use crate::dto::contact_dto::PersonViewModel;
use crate::entitys::person_entity::PersonEntity;
use crate::entitys::phone_entity::PhoneEntity;
use common::errors::AppError;
use common::repository_util::Repository;
use mongodb::bson::doc;
use std::sync::Arc;

/// 联系人列表聚合
pub struct ContactService {
    persons: Arc<dyn Repository<PersonEntity>>,
    phones: Arc<dyn Repository<PhoneEntity>>,
}

impl ContactService {
    pub fn new(persons: Arc<dyn Repository<PersonEntity>>, phones: Arc<dyn Repository<PhoneEntity>>) -> Self {
        Self { persons, phones }
    }

    /// 调用者名下的全部联系人，各自附带号码摘要
    pub async fn build_list_view_model(&self, caller: Option<&str>) -> Result<Vec<PersonViewModel>, AppError> {
        let Some(email) = caller else {
            return Ok(Vec::new());
        };
        let persons = self.persons.query(doc! { "user_email": email }).await?;
        let mut rows = Vec::with_capacity(persons.len());
        for person in persons {
            let phones = self.phones.query(doc! { "person_id": person.id.as_str() }).await?;
            rows.push(PersonViewModel {
                phone_numbers_display: format_phone_numbers(&phones),
                id: person.id,
                first_name: person.first_name,
                last_name: person.last_name,
                delete_url: String::new(),
            });
        }
        Ok(rows)
    }
}

/// `"{number} ({kind})"` 以 `", "` 连接，保持存储顺序
pub fn format_phone_numbers(phones: &[PhoneEntity]) -> String {
    phones.iter().map(|p| format!("{} ({})", p.number, p.kind)).collect::<Vec<_>>().join(", ")
}
