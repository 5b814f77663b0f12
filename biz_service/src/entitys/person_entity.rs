use common::index_trait::MongoIndexModelProvider;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

/// 联系人，归属于创建它的登录用户
///
/// 电话摘要不落库，每次列表时由 `ContactService` 现算。
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PersonEntity {
    #[serde(rename = "_id")]
    pub id: String,
    /// 所属用户邮箱，创建后不可变
    pub user_email: String,
    pub first_name: String,
    pub last_name: String,
    /// 创建时间（Unix 毫秒）
    pub create_time: i64,
    /// 最后更新时间（Unix 毫秒）
    pub update_time: i64,
}

impl PersonEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl MongoIndexModelProvider for PersonEntity {
    fn index_models() -> Vec<IndexModel> {
        vec![
            IndexModel::builder()
                .keys(doc! { "user_email": 1 })
                .options(IndexOptions::builder().name("idx_person_user_email".to_string()).build())
                .build(),
        ]
    }
}
