//! In-Memory Rule Repository Adapter
//!
//! Rules are partitioned by category, each partition behind its own
//! `RwLock`: writes to one category never block readers of another.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Category, DomainError, ErrorCode, RuleId};
use crate::domain::rules::Rule;
use crate::ports::RuleRepository;

/// A stored rule with its insertion sequence, used to keep equal
/// priorities in insertion order.
#[derive(Debug, Clone)]
struct StoredRule {
    seq: u64,
    rule: Rule,
}

type Partition = Arc<RwLock<Vec<StoredRule>>>;

/// In-memory rule store
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleRepository {
    partitions: Arc<RwLock<HashMap<Category, Partition>>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemoryRuleRepository {
    /// Create an empty rule store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules across all categories
    pub async fn rule_count(&self) -> usize {
        let partitions = self.partition_list().await;
        let mut total = 0;
        for partition in partitions {
            total += partition.read().await.len();
        }
        total
    }

    async fn partition(&self, category: &Category) -> Option<Partition> {
        self.partitions.read().await.get(category).cloned()
    }

    async fn partition_or_create(&self, category: &Category) -> Partition {
        if let Some(partition) = self.partition(category).await {
            return partition;
        }
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(category.clone())
            .or_insert_with(|| Arc::new(RwLock::new(Vec::new())))
            .clone()
    }

    async fn partition_list(&self) -> Vec<Partition> {
        self.partitions.read().await.values().cloned().collect()
    }

    /// Category currently holding the rule, if any.
    async fn locate(&self, id: &RuleId) -> Option<Category> {
        let partitions: Vec<(Category, Partition)> = self
            .partitions
            .read()
            .await
            .iter()
            .map(|(category, partition)| (category.clone(), partition.clone()))
            .collect();
        for (category, partition) in partitions {
            if partition.read().await.iter().any(|stored| stored.rule.id() == id) {
                return Some(category);
            }
        }
        None
    }

    fn not_found(id: &RuleId) -> DomainError {
        DomainError::new(ErrorCode::RuleNotFound, format!("Rule not found: {}", id))
            .with_detail("id", id.to_string())
    }

    fn duplicate(rule: &Rule) -> DomainError {
        DomainError::new(
            ErrorCode::DuplicateRuleName,
            format!(
                "Rule name '{}' already exists in category {}",
                rule.name(),
                rule.category()
            ),
        )
        .with_detail("name", rule.name())
        .with_detail("category", rule.category().as_str())
    }

    fn name_taken(rules: &[StoredRule], rule: &Rule) -> bool {
        rules
            .iter()
            .any(|stored| stored.rule.name() == rule.name() && stored.rule.id() != rule.id())
    }

    fn sorted(mut stored: Vec<StoredRule>) -> Vec<Rule> {
        stored.sort_by_key(|s| (s.rule.priority(), s.seq));
        stored.into_iter().map(|s| s.rule).collect()
    }
}

#[async_trait]
impl RuleRepository for InMemoryRuleRepository {
    async fn list(&self, category: Option<&Category>) -> Result<Vec<Rule>, DomainError> {
        let mut collected = Vec::new();
        match category {
            Some(category) => {
                let shared = Category::shared();
                let mut wanted = vec![category.clone()];
                if !category.is_shared() {
                    wanted.push(shared);
                }
                for wanted in wanted {
                    if let Some(partition) = self.partition(&wanted).await {
                        collected.extend(partition.read().await.iter().cloned());
                    }
                }
            }
            None => {
                for partition in self.partition_list().await {
                    collected.extend(partition.read().await.iter().cloned());
                }
            }
        }
        Ok(Self::sorted(collected))
    }

    async fn find_by_id(&self, id: &RuleId) -> Result<Option<Rule>, DomainError> {
        for partition in self.partition_list().await {
            let rules = partition.read().await;
            if let Some(stored) = rules.iter().find(|stored| stored.rule.id() == id) {
                return Ok(Some(stored.rule.clone()));
            }
        }
        Ok(None)
    }

    async fn find_by_name(
        &self,
        category: &Category,
        name: &str,
    ) -> Result<Option<Rule>, DomainError> {
        let Some(partition) = self.partition(category).await else {
            return Ok(None);
        };
        let rules = partition.read().await;
        Ok(rules
            .iter()
            .find(|stored| stored.rule.name() == name)
            .map(|stored| stored.rule.clone()))
    }

    async fn save(&self, rule: &Rule) -> Result<(), DomainError> {
        let partition = self.partition_or_create(rule.category()).await;
        let mut rules = partition.write().await;
        if Self::name_taken(&rules, rule) {
            return Err(Self::duplicate(rule));
        }
        rules.push(StoredRule {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            rule: rule.clone(),
        });
        Ok(())
    }

    async fn update(&self, rule: &Rule) -> Result<(), DomainError> {
        let current = self
            .locate(rule.id())
            .await
            .ok_or_else(|| Self::not_found(rule.id()))?;

        if &current == rule.category() {
            let partition = self
                .partition(&current)
                .await
                .ok_or_else(|| Self::not_found(rule.id()))?;
            let mut rules = partition.write().await;
            if Self::name_taken(&rules, rule) {
                return Err(Self::duplicate(rule));
            }
            let stored = rules
                .iter_mut()
                .find(|stored| stored.rule.id() == rule.id())
                .ok_or_else(|| Self::not_found(rule.id()))?;
            stored.rule = rule.clone();
            return Ok(());
        }

        // Moving between categories: lock both partitions in name order.
        let source = self
            .partition(&current)
            .await
            .ok_or_else(|| Self::not_found(rule.id()))?;
        let target = self.partition_or_create(rule.category()).await;
        let (mut source_rules, mut target_rules) = if current.as_str() < rule.category().as_str() {
            let s = source.write().await;
            let t = target.write().await;
            (s, t)
        } else {
            let t = target.write().await;
            let s = source.write().await;
            (s, t)
        };

        if Self::name_taken(&target_rules, rule) {
            return Err(Self::duplicate(rule));
        }
        let position = source_rules
            .iter()
            .position(|stored| stored.rule.id() == rule.id())
            .ok_or_else(|| Self::not_found(rule.id()))?;
        let seq = source_rules.remove(position).seq;
        target_rules.push(StoredRule {
            seq,
            rule: rule.clone(),
        });
        Ok(())
    }

    async fn delete(&self, id: &RuleId) -> Result<(), DomainError> {
        for partition in self.partition_list().await {
            let mut rules = partition.write().await;
            if let Some(position) = rules.iter().position(|stored| stored.rule.id() == id) {
                rules.remove(position);
                return Ok(());
            }
        }
        Err(Self::not_found(id))
    }

    async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let partitions: Vec<(Category, Partition)> = self
            .partitions
            .read()
            .await
            .iter()
            .map(|(category, partition)| (category.clone(), partition.clone()))
            .collect();
        let mut categories = Vec::new();
        for (category, partition) in partitions {
            if !partition.read().await.is_empty() {
                categories.push(category);
            }
        }
        categories.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(categories)
    }
}
