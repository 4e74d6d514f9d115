//! AdapterBuilder - アダプタの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use tracing::debug;

use crate::domain::errors::RunError;
use crate::schema::{InputObject, OutputObject};
use crate::typed::{Pipeline, PipelineRegistry, RegistryError};

/// AdapterBuilder はアダプタを構築
///
/// # 使用例
/// ```ignore
/// let adapter = AdapterBuilder::new()
///     .register(MyAiPipeline)?
///     .expect_pipelines(&["my_ai_lib"])
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect_pipelines() で期待される名前を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す
pub struct AdapterBuilder {
    registry: PipelineRegistry,
    expected: Option<Vec<String>>,
}

/// BuildError はアダプタ構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing pipelines: {0:?}. These pipelines were expected but not registered.")]
    MissingPipelines(Vec<String>),
}

impl AdapterBuilder {
    pub fn new() -> Self {
        Self {
            registry: PipelineRegistry::new(),
            expected: None,
        }
    }

    pub fn register<P: Pipeline>(mut self, pipeline: P) -> Result<Self, RegistryError> {
        self.registry.register(pipeline)?;
        Ok(self)
    }

    pub fn expect_pipelines(mut self, names: &[&str]) -> Self {
        self.expected = Some(names.iter().map(|name| name.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<Adapter, BuildError> {
        if let Some(expected) = &self.expected {
            let registered = self.registry.registered_names();
            let missing: Vec<String> = expected
                .iter()
                .filter(|name| !registered.contains(*name))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingPipelines(missing));
            }
        }
        Ok(Adapter {
            registry: self.registry,
        })
    }
}

impl Default for AdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter はホスト側の入口
///
/// 名前でパイプラインを引き、汎用入力を渡して汎用出力を返します。
pub struct Adapter {
    registry: PipelineRegistry,
}

impl Adapter {
    pub fn registry(&self) -> &PipelineRegistry {
        &self.registry
    }

    /// Runs the pipeline registered under `name`.
    pub fn run(&self, name: &str, input: &InputObject) -> Result<Box<dyn OutputObject>, RunError> {
        let pipeline = self
            .registry
            .get(name)
            .ok_or_else(|| RunError::dispatch(name))?;
        debug!(pipeline = name, "dispatching");
        pipeline.run_dyn(input)
    }
}
