use crate::errors::AppError;
use crate::index_trait::MongoIndexModelProvider;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use log::info;
use mongodb::bson::doc;
use mongodb::{Collection, bson::Document};
use serde::{Serialize, de::DeserializeOwned};

/// 存储层统一接口，过滤/更新条件均为 BSON 文档
///
/// 查询结果保持存储的自然顺序（插入顺序）
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError>;
    async fn insert(&self, entity: &T) -> Result<(), AppError>;
    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError>;
    async fn query(&self, filter: Document) -> Result<Vec<T>, AppError>;
    /// 返回命中条数
    async fn update(&self, filter: Document, update: Document) -> Result<u64, AppError>;
    /// 返回删除条数
    async fn delete(&self, filter: Document) -> Result<u64, AppError>;
}

pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }
}

impl<T> BaseRepository<T>
where
    T: MongoIndexModelProvider + Send + Sync,
{
    /// 按名称对比，仅创建缺失的索引
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let existing = self.collection.list_index_names().await?;
        for model in T::index_models() {
            let name = model.options.as_ref().and_then(|o| o.name.clone()).unwrap_or_default();
            if existing.contains(&name) {
                continue;
            }
            self.collection.create_index(model).await?;
            info!("created index {} on {}", name, self.collection.name());
        }
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn insert(&self, entity: &T) -> Result<(), AppError> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        let result = self.collection.find_one(filter).await?;
        Ok(result)
    }

    async fn query(&self, filter: Document) -> Result<Vec<T>, AppError> {
        let cursor = self.collection.find(filter).await?;
        let result: Vec<T> = cursor.try_collect().await?;
        Ok(result)
    }

    async fn update(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        let result = self.collection.update_many(filter, update).await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, filter: Document) -> Result<u64, AppError> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}
