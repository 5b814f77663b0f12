use common::index_trait::MongoIndexModelProvider;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

/// 电话号码，没有独立的归属字段，权限经 `person_id` 传递到联系人
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PhoneEntity {
    #[serde(rename = "_id")]
    pub id: String,
    pub person_id: String,
    pub number: String,
    /// 自由标签，如 home / work
    pub kind: String,
    pub create_time: i64,
    pub update_time: i64,
}

impl MongoIndexModelProvider for PhoneEntity {
    fn index_models() -> Vec<IndexModel> {
        vec![
            IndexModel::builder()
                .keys(doc! { "person_id": 1 })
                .options(IndexOptions::builder().name("idx_phone_person_id".to_string()).build())
                .build(),
        ]
    }
}
