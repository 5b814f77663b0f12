use crate::errors::AppError;
use crate::index_trait::MongoIndexModelProvider;
use crate::repository_util::Repository;
use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document, doc};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tokio::sync::RwLock;

/// 进程内存储：按插入顺序保存 BSON 文档
///
/// 只支持等值过滤与 `$set` 更新，足以覆盖业务层的全部查询。
/// `_id` 与实体声明的唯一索引在写锁内检查，冲突返回 `Conflict`。
pub struct MemoryRepository<T> {
    docs: RwLock<Vec<Document>>,
    unique: Vec<Vec<String>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self { docs: RwLock::new(Vec::new()), unique: Vec::new(), _marker: PhantomData }
    }
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按实体的唯一索引建表
    pub fn indexed() -> Self
    where
        T: MongoIndexModelProvider,
    {
        Self { unique: T::unique_keys(), ..Self::default() }
    }

    /// `candidate` 是否与 `others` 中某条文档撞上 `_id` 或唯一索引
    fn collides<'a>(&self, candidate: &Document, mut others: impl Iterator<Item = &'a Document>) -> bool {
        others.any(|d| {
            d.get("_id") == candidate.get("_id")
                || self.unique.iter().any(|keys| keys.iter().all(|k| d.get(k) == candidate.get(k)))
        })
    }
}

fn check_filter(filter: &Document) -> Result<(), AppError> {
    match filter.keys().find(|k| k.starts_with('$')) {
        Some(op) => Err(AppError::Internal(format!("unsupported filter operator {}", op))),
        None => Ok(()),
    }
}

fn is_match(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match doc.get(key) {
        Some(actual) => actual == expected,
        None => matches!(expected, Bson::Null),
    })
}

fn decode<T: DeserializeOwned>(doc: &Document) -> Result<T, AppError> {
    Ok(bson::from_document(doc.clone())?)
}

#[async_trait]
impl<T> Repository<T> for MemoryRepository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn insert(&self, entity: &T) -> Result<(), AppError> {
        let document = bson::to_document(entity)?;
        let mut docs = self.docs.write().await;
        if self.collides(&document, docs.iter()) {
            return Err(AppError::Conflict);
        }
        docs.push(document);
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        check_filter(&filter)?;
        let docs = self.docs.read().await;
        docs.iter().find(|d| is_match(d, &filter)).map(decode).transpose()
    }

    async fn query(&self, filter: Document) -> Result<Vec<T>, AppError> {
        check_filter(&filter)?;
        let docs = self.docs.read().await;
        docs.iter().filter(|d| is_match(d, &filter)).map(decode).collect()
    }

    async fn update(&self, filter: Document, update: Document) -> Result<u64, AppError> {
        check_filter(&filter)?;
        let set = match update.get_document("$set") {
            Ok(set) if update.len() == 1 => set.clone(),
            _ => return Err(AppError::Internal("only $set updates are supported".to_string())),
        };
        if set.contains_key("_id") {
            return Err(AppError::Internal("_id is immutable".to_string()));
        }
        let mut docs = self.docs.write().await;
        let mut updated = Vec::new();
        for (i, d) in docs.iter().enumerate().filter(|(_, d)| is_match(d, &filter)) {
            let mut next = d.clone();
            for (key, value) in set.iter() {
                next.insert(key.clone(), value.clone());
            }
            let others = docs.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, d)| d);
            if !self.unique.is_empty() && self.collides(&next, others) {
                return Err(AppError::Conflict);
            }
            updated.push((i, next));
        }
        let matched = updated.len() as u64;
        for (i, next) in updated {
            docs[i] = next;
        }
        Ok(matched)
    }

    async fn delete(&self, filter: Document) -> Result<u64, AppError> {
        check_filter(&filter)?;
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| !is_match(d, &filter));
        Ok((before - docs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
        owner: String,
        label: String,
    }

    fn item(id: &str, owner: &str, label: &str) -> Item {
        Item { id: id.to_string(), owner: owner.to_string(), label: label.to_string() }
    }

    #[tokio::test]
    async fn query_keeps_insertion_order() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("b", "ann", "second")).await.unwrap();
        repo.insert(&item("a", "ann", "first")).await.unwrap();
        repo.insert(&item("c", "bob", "other")).await.unwrap();

        let rows = repo.query(doc! { "owner": "ann" }).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_conflict() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        let err = repo.insert(&item("a", "bob", "y")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
    }

    #[tokio::test]
    async fn set_update_touches_only_matching_rows() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        repo.insert(&item("b", "bob", "y")).await.unwrap();

        let n = repo.update(doc! { "_id": "a" }, doc! { "$set": { "label": "z" } }).await.unwrap();
        assert_eq!(n, 1);
        assert_eq!(repo.find_by_id("a").await.unwrap().unwrap().label, "z");
        assert_eq!(repo.find_by_id("b").await.unwrap().unwrap().label, "y");
    }

    #[tokio::test]
    async fn non_set_update_is_rejected() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        assert!(repo.update(doc! { "_id": "a" }, doc! { "label": "z" }).await.is_err());
        assert!(repo.update(doc! { "_id": "a" }, doc! { "$set": { "_id": "b" } }).await.is_err());
    }

    #[tokio::test]
    async fn delete_reports_removed_count() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        repo.insert(&item("b", "ann", "y")).await.unwrap();
        repo.insert(&item("c", "bob", "z")).await.unwrap();

        assert_eq!(repo.delete(doc! { "owner": "ann" }).await.unwrap(), 2);
        assert_eq!(repo.delete(doc! { "owner": "ann" }).await.unwrap(), 0);
        assert_eq!(repo.query(doc! {}).await.unwrap().len(), 1);
    }

    impl MongoIndexModelProvider for Item {
        fn index_models() -> Vec<mongodb::IndexModel> {
            vec![
                mongodb::IndexModel::builder()
                    .keys(doc! { "label": 1 })
                    .options(mongodb::options::IndexOptions::builder().unique(true).build())
                    .build(),
                mongodb::IndexModel::builder().keys(doc! { "owner": 1 }).build(),
            ]
        }
    }

    #[tokio::test]
    async fn unique_index_rejects_duplicates() {
        let repo = MemoryRepository::<Item>::indexed();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        repo.insert(&item("b", "ann", "y")).await.unwrap();
        assert!(matches!(repo.insert(&item("c", "bob", "x")).await, Err(AppError::Conflict)));

        let err = repo.update(doc! { "_id": "b" }, doc! { "$set": { "label": "x" } }).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict));
        assert_eq!(repo.find_by_id("b").await.unwrap().unwrap().label, "y");
        assert_eq!(repo.update(doc! { "_id": "b" }, doc! { "$set": { "label": "y" } }).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn plain_repository_allows_repeated_values() {
        let repo = MemoryRepository::<Item>::new();
        repo.insert(&item("a", "ann", "x")).await.unwrap();
        repo.insert(&item("b", "ann", "x")).await.unwrap();
        assert_eq!(repo.query(doc! { "label": "x" }).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn operator_filters_are_rejected() {
        let repo = MemoryRepository::<Item>::new();
        assert!(repo.query(doc! { "$or": [] }).await.is_err());
    }
}
