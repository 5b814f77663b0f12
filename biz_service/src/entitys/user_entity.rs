use common::index_trait::MongoIndexModelProvider;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

/// 登录账号，邮箱即联系人归属身份
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserInfoEntity {
    #[serde(rename = "_id")]
    pub id: String,
    /// 小写邮箱，唯一
    pub email: String,
    /// Argon2 PHC 格式哈希
    pub password: String,
    pub create_time: i64,
}

impl MongoIndexModelProvider for UserInfoEntity {
    fn index_models() -> Vec<IndexModel> {
        vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().name("uniq_user_email".to_string()).unique(true).build())
                .build(),
        ]
    }
}
