use mongodb::IndexModel;

/// 实体声明自己需要的 Mongo 索引，启动时由 `BaseRepository::ensure_indexes` 补建
pub trait MongoIndexModelProvider {
    fn index_models() -> Vec<IndexModel>;

    /// 唯一索引的字段组，内存存储据此拒绝重复写入
    fn unique_keys() -> Vec<Vec<String>> {
        Self::index_models()
            .into_iter()
            .filter(|m| m.options.as_ref().and_then(|o| o.unique).unwrap_or(false))
            .map(|m| m.keys.keys().cloned().collect())
            .collect()
    }
}
