//! my-ai-lib
//!
//! AI-node に載せるモデルのテンプレート。
//!
//! 1. `MyInput` / `MyOutput` にタスクの入出力フィールドを宣言する
//! 2. `do_ai_task` に推論処理を書く
//! 3. `MyAiPipeline` が検証 → 実行 → 出力の組み立てをつなぐ

pub mod schema;
pub mod task;

use std::fs::File;
use std::path::Path;

use ainode_core::{FileObject, InputObject, Pipeline, RunError, TaskError, ValidationError};

pub use self::schema::{MyInput, MyOutput};
pub use self::task::{RESULT_TEXT, do_ai_task};

/// Display name of the produced image.
pub const OUTPUT_IMAGE_NAME: &str = "output_image.png";

pub struct MyAiPipeline;

impl Pipeline for MyAiPipeline {
    const NAME: &'static str = "my_ai_lib";
    type Input = MyInput;
    type Raw = (String, File);
    type Output = MyOutput;

    fn invoke(&self, input: &MyInput) -> Result<(String, File), TaskError> {
        do_ai_task(
            Path::new(&input.input_image),
            &input.example_param,
            &input.base.model_storage_directory,
            input.base.device,
        )
    }

    fn wrap(&self, (text, output_image): (String, File)) -> Result<MyOutput, ValidationError> {
        let output_image = FileObject::new(output_image, OUTPUT_IMAGE_NAME)?;
        Ok(MyOutput { text, output_image })
    }
}

/// Validates `input_obj` as [`MyInput`], runs the task and returns its output.
pub fn run(input_obj: &InputObject) -> Result<MyOutput, RunError> {
    ainode_core::run(&MyAiPipeline, input_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ainode_core::app::AdapterBuilder;
    use ainode_core::{BaseInput, Device, ErrorKind, InputSchema};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

    #[fixture]
    fn image() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(IMAGE_BYTES).unwrap();
        file
    }

    fn input_for(image: &NamedTempFile) -> InputObject {
        InputObject::default()
            .with_field("input_image", image.path().to_string_lossy().into_owned())
            .with_field("example_param", "example")
    }

    #[rstest]
    fn run_returns_text_and_named_image(image: NamedTempFile) {
        let mut output = run(&input_for(&image)).unwrap();

        assert!(!output.text.is_empty());
        assert_eq!(output.text, RESULT_TEXT);
        assert_eq!(output.output_image.name(), OUTPUT_IMAGE_NAME);
        assert_eq!(output.output_image.read_all().unwrap(), IMAGE_BYTES);
    }

    #[test]
    fn missing_input_image_is_a_validation_error() {
        let input = InputObject::default().with_field("example_param", "example");

        let err = run(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("input_image"));
    }

    #[test]
    fn mistyped_input_image_is_a_validation_error() {
        let input = InputObject::default().with_field("input_image", 7);

        let err = run(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[rstest]
    fn example_param_defaults_to_empty_string(image: NamedTempFile) {
        let input = InputObject::default()
            .with_field("input_image", image.path().to_string_lossy().into_owned());

        let my_input: MyInput = input.validate_as().unwrap();
        assert_eq!(my_input.example_param, json!(""));

        assert!(run(&input).is_ok());
    }

    #[rstest]
    #[case::string(json!("example"))]
    #[case::number(json!(3.5))]
    #[case::object(json!({ "threshold": 0.4, "labels": ["cat"] }))]
    fn example_param_accepts_any_value(image: NamedTempFile, #[case] param: serde_json::Value) {
        let input = InputObject::default()
            .with_field("input_image", image.path().to_string_lossy().into_owned())
            .with_field("example_param", param.clone());

        let my_input: MyInput = input.validate_as().unwrap();
        assert_eq!(my_input.example_param, param);
    }

    #[test]
    fn task_failure_carries_original_message() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let original = std::fs::File::open(&missing).unwrap_err().to_string();

        let input = InputObject::default()
            .with_field("input_image", missing.to_string_lossy().into_owned());

        let err = run(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Task);
        assert!(err.to_string().contains(&original));
    }

    #[rstest]
    fn repeated_runs_are_independent(image: NamedTempFile) {
        let input = input_for(&image);

        let mut first = run(&input).unwrap();
        let mut second = run(&input).unwrap();

        assert_eq!(first.text, second.text);
        // draining one handle leaves the other untouched
        assert_eq!(first.output_image.read_all().unwrap(), IMAGE_BYTES);
        assert_eq!(second.output_image.read_all().unwrap(), IMAGE_BYTES);
    }

    #[test]
    fn my_input_round_trips_through_a_plain_record() {
        let original = MyInput {
            base: BaseInput::new("/srv/models", Device::Gpu),
            input_image: "wiki/aioz.png".to_string(),
            example_param: json!({ "k": [1, 2] }),
        };

        let record = original.model_dump().unwrap();
        assert_eq!(record["input_image"], "wiki/aioz.png");
        assert_eq!(record["device"], "gpu");

        let back = MyInput::model_validate(record).unwrap();
        assert_eq!(back, original);
    }

    #[rstest]
    fn base_fields_reach_the_concrete_input(image: NamedTempFile) {
        let mut input = input_for(&image);
        input.base = BaseInput::new("/srv/models", Device::Cuda);

        let my_input: MyInput = input.validate_as().unwrap();
        assert_eq!(my_input.base, BaseInput::new("/srv/models", Device::Cuda));
    }

    #[rstest]
    fn adapter_runs_the_pipeline_by_name(image: NamedTempFile) {
        let adapter = AdapterBuilder::new()
            .register(MyAiPipeline)
            .unwrap()
            .expect_pipelines(&[MyAiPipeline::NAME])
            .build()
            .unwrap();

        let mut output = adapter.run("my_ai_lib", &input_for(&image)).unwrap();

        let record = output.model_dump().unwrap();
        assert_eq!(
            record,
            json!({ "text": RESULT_TEXT, "output_image": { "name": OUTPUT_IMAGE_NAME } })
        );

        let files = output.files_mut();
        assert_eq!(files.len(), 1);
        assert_eq!(files.into_iter().next().unwrap().read_all().unwrap(), IMAGE_BYTES);
    }
}
