// ==========================================
// 培训管理系统 - 引用目录
// ==========================================
// 职责: 显示名称 → ID 查找（校验前一次性加载,之后只读）
// 规则: 不区分大小写的精确匹配; 不做模糊匹配、不做部分匹配
// ==========================================

use crate::domain::ReferenceEntity;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_traits::ReferenceProvider;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    entities: Vec<ReferenceEntity>,
    by_name: HashMap<String, i64>, // 小写显示名 → ID
}

impl ReferenceCatalog {
    /// 查找键: TRIM + 小写
    fn lookup_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 由实体列表构建目录
    ///
    /// # 说明
    /// - 显示名称（忽略大小写）重复时保留第一次出现的实体
    pub fn from_entities(entities: Vec<ReferenceEntity>) -> Self {
        let mut by_name = HashMap::with_capacity(entities.len());
        for entity in &entities {
            let key = Self::lookup_key(&entity.display_name);
            if key.is_empty() {
                continue;
            }
            if by_name.contains_key(&key) {
                warn!(
                    id = entity.id,
                    display_name = %entity.display_name,
                    "引用数据显示名称重复,保留第一条"
                );
                continue;
            }
            by_name.insert(key, entity.id);
        }
        Self { entities, by_name }
    }

    /// 从远端加载
    pub async fn load(provider: &dyn ReferenceProvider) -> ImportResult<Self> {
        let entities = provider
            .list_reference_entities()
            .await
            .map_err(|e| ImportError::ReferenceLoadError(e.to_string()))?;
        debug!(count = entities.len(), "引用数据加载完成");
        Ok(Self::from_entities(entities))
    }

    /// 按显示名称查找 ID; 未找到返回 None
    pub fn lookup(&self, display_name: &str) -> Option<i64> {
        self.by_name.get(&Self::lookup_key(display_name)).copied()
    }

    pub fn entities(&self) -> &[ReferenceEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::from_entities(vec![
            ReferenceEntity::new(1, "General"),
            ReferenceEntity::new(2, "Data Science"),
        ])
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("general"), Some(1));
        assert_eq!(catalog.lookup("  DATA science "), Some(2));
    }

    #[test]
    fn test_lookup_exact_only() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("Data"), None);
        assert_eq!(catalog.lookup("Generals"), None);
        assert_eq!(catalog.lookup(""), None);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let catalog = ReferenceCatalog::from_entities(vec![
            ReferenceEntity::new(7, "Art"),
            ReferenceEntity::new(8, "ART"),
        ]);
        assert_eq!(catalog.lookup("art"), Some(7));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entities().len(), 2);
    }

    struct FailingProvider;

    #[async_trait]
    impl ReferenceProvider for FailingProvider {
        async fn list_reference_entities(&self) -> anyhow::Result<Vec<ReferenceEntity>> {
            Err(anyhow::anyhow!("503 Service Unavailable"))
        }
    }

    #[tokio::test]
    async fn test_load_failure_maps_to_import_error() {
        let result = ReferenceCatalog::load(&FailingProvider).await;
        assert!(matches!(result, Err(ImportError::ReferenceLoadError(msg)) if msg.contains("503")));
    }
}
