//! DynPipeline - 型消去された Pipeline
//!
//! # 学習ポイント
//! - Object-safe trait (DynPipeline)
//! - Blanket impl による Type erasure (`impl<P: Pipeline> DynPipeline for P`)

use super::pipeline::{Pipeline, run};
use crate::domain::errors::RunError;
use crate::schema::{InputObject, OutputObject};

/// DynPipeline は object-safe な Pipeline の抽象化
///
/// 関連型を持つ `Pipeline` は trait object にできないため、
/// 出力を `Box<dyn OutputObject>` に消去して
/// `HashMap<String, Arc<dyn DynPipeline>>` に格納可能にします。
pub trait DynPipeline: Send + Sync {
    fn name(&self) -> &str;

    fn run_dyn(&self, input: &InputObject) -> Result<Box<dyn OutputObject>, RunError>;
}

impl<P: Pipeline> DynPipeline for P {
    fn name(&self) -> &str {
        P::NAME
    }

    fn run_dyn(&self, input: &InputObject) -> Result<Box<dyn OutputObject>, RunError> {
        let output = run(self, input)?;
        Ok(Box::new(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::pipeline::tests::EchoPipeline;
    use std::sync::Arc;

    #[test]
    fn erased_pipeline_returns_generic_output() {
        let pipeline: Arc<dyn DynPipeline> = Arc::new(EchoPipeline::default());
        assert_eq!(pipeline.name(), "echo");

        let input = InputObject::default().with_field("message", "hello");
        let mut output = pipeline.run_dyn(&input).unwrap();

        let record = output.model_dump().unwrap();
        assert_eq!(record["text"], "hello");
        assert_eq!(record["file"]["name"], "hello.txt");

        let files = output.files_mut();
        assert_eq!(files.len(), 1);
    }
}
