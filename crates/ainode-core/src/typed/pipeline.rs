//! Pipeline trait - validate → invoke → wrap
//!
//! # 学習ポイント
//! - Associated Types（Input / Raw / Output）で各ステップの型を結びつける
//! - Associated Constants（`const NAME`）でレジストリ上の名前を型に持たせる
//! - ステップごとのエラーを境界で `RunError` に正規化する

use tracing::{debug, info, warn};

use crate::domain::errors::{RunError, TaskError, ValidationError};
use crate::domain::ids::RunId;
use crate::schema::{InputObject, InputSchema, OutputObject};

/// Pipeline はタスク 1 つ分の入出力契約
///
/// # 使用例
/// ```ignore
/// struct CaptionPipeline;
///
/// impl Pipeline for CaptionPipeline {
///     const NAME: &'static str = "caption";
///     type Input = CaptionInput;
///     type Raw = String;
///     type Output = CaptionOutput;
///
///     fn invoke(&self, input: &CaptionInput) -> Result<String, TaskError> {
///         caption(&input.image, input.base.device)
///     }
///
///     fn wrap(&self, raw: String) -> Result<CaptionOutput, ValidationError> {
///         Ok(CaptionOutput { text: raw })
///     }
/// }
/// ```
pub trait Pipeline: Send + Sync + 'static {
    const NAME: &'static str;

    /// Concrete input schema the generic input is coerced into.
    type Input: InputSchema;

    /// What the task function returns before wrapping.
    type Raw;

    type Output: OutputObject;

    /// Unpacks the validated fields and calls the task function.
    fn invoke(&self, input: &Self::Input) -> Result<Self::Raw, TaskError>;

    /// Assembles the raw result into the output schema.
    fn wrap(&self, raw: Self::Raw) -> Result<Self::Output, ValidationError>;
}

/// Runs `pipeline` once against a generic input.
///
/// Every failure comes back as a single [`RunError`]; no output is built
/// unless all three steps succeed.
pub fn run<P: Pipeline>(pipeline: &P, input_obj: &InputObject) -> Result<P::Output, RunError> {
    let run_id = RunId::new();
    let span = tracing::info_span!("run", pipeline = P::NAME, %run_id);
    let _guard = span.enter();

    execute(pipeline, input_obj).inspect_err(|e| {
        warn!(kind = %e.kind(), error = %e.message(), "run failed");
    })
}

fn execute<P: Pipeline>(pipeline: &P, input_obj: &InputObject) -> Result<P::Output, RunError> {
    // 1) 汎用入力を具体スキーマに変換（dump → 再構築）
    let input: P::Input = input_obj.validate_as().map_err(RunError::validation)?;
    info!(input = ?input, "input validated");

    // 2) タスク関数を実行
    let raw = pipeline.invoke(&input).map_err(RunError::task)?;
    debug!("task returned");

    // 3) 出力スキーマに包む
    let output = pipeline.wrap(raw).map_err(RunError::validation)?;
    debug!(output = ?output, "output wrapped");

    Ok(output)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::schema::{BaseInput, FileObject, dump_output};
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Serialize, Deserialize)]
    pub(crate) struct EchoInput {
        #[serde(flatten)]
        pub base: BaseInput,
        pub message: String,
    }

    impl InputSchema for EchoInput {
        const NAME: &'static str = "EchoInput";

        fn base(&self) -> &BaseInput {
            &self.base
        }
    }

    #[derive(Debug, Serialize)]
    pub(crate) struct EchoOutput {
        pub text: String,
        pub file: FileObject,
    }

    impl OutputObject for EchoOutput {
        fn model_dump(&self) -> Result<serde_json::Value, ValidationError> {
            dump_output("EchoOutput", self)
        }

        fn files_mut(&mut self) -> Vec<&mut FileObject> {
            vec![&mut self.file]
        }
    }

    /// Echoes `message` back; counts how often the task body ran.
    #[derive(Default)]
    pub(crate) struct EchoPipeline {
        pub calls: AtomicUsize,
    }

    impl Pipeline for EchoPipeline {
        const NAME: &'static str = "echo";
        type Input = EchoInput;
        type Raw = String;
        type Output = EchoOutput;

        fn invoke(&self, input: &EchoInput) -> Result<String, TaskError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input.message == "boom" {
                return Err(TaskError::Model("weights missing".to_string()));
            }
            Ok(input.message.clone())
        }

        fn wrap(&self, raw: String) -> Result<EchoOutput, ValidationError> {
            let file = FileObject::from_bytes(raw.clone().into_bytes(), format!("{raw}.txt"))?;
            Ok(EchoOutput { text: raw, file })
        }
    }

    fn input(message: &str) -> InputObject {
        InputObject::default().with_field("message", message)
    }

    #[test]
    fn run_validates_invokes_and_wraps() {
        let pipeline = EchoPipeline::default();
        let mut out = run(&pipeline, &input("hi")).unwrap();

        assert_eq!(out.text, "hi");
        assert_eq!(out.file.name(), "hi.txt");
        assert_eq!(out.file.read_all().unwrap(), b"hi");
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn validation_failure_skips_the_task() {
        let pipeline = EchoPipeline::default();
        let err = run(&pipeline, &InputObject::default()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("message"));
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn task_failure_keeps_original_message() {
        let err = run(&EchoPipeline::default(), &input("boom")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Task);
        assert!(err.to_string().contains("weights missing"));
    }

    #[test]
    fn wrap_failure_is_a_validation_error() {
        // "a/b" makes an invalid file name during wrap
        let err = run(&EchoPipeline::default(), &input("a/b")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("FileObject.name"));
    }
}
