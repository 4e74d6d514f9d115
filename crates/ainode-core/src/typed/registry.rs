//! PipelineRegistry - Pipeline の登録と管理
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Generic methods での登録と型安全性
//! - Arc による共有所有権

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::DynPipeline;
use super::pipeline::Pipeline;

/// PipelineRegistry は Pipeline を名前で登録・管理
///
/// # 使用例
/// ```ignore
/// let mut registry = PipelineRegistry::new();
/// registry.register(MyAiPipeline)?;
///
/// let pipeline = registry.get("my_ai_lib").expect("registered");
/// let output = pipeline.run_dyn(&input)?;
/// ```
#[derive(Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<String, Arc<dyn DynPipeline>>,
}

/// RegistryError は PipelineRegistry の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Pipeline '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self {
            pipelines: HashMap::new(),
        }
    }

    pub fn register<P: Pipeline>(&mut self, pipeline: P) -> Result<(), RegistryError> {
        let name = P::NAME.to_string();
        if self.pipelines.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        self.pipelines.insert(name, Arc::new(pipeline));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DynPipeline>> {
        self.pipelines.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pipelines.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}
