//! AI タスク本体（プレースホルダ）
//!
//! 実際のモデル推論に差し替える場所。入力は型付きスキーマではなく素の値で受け取ります。

use std::fs::File;
use std::path::Path;

use ainode_core::{Device, TaskError};
use serde_json::Value;
use tracing::debug;

pub const RESULT_TEXT: &str = "This is the AI task result";

/// The AI task: load the model, pre-process, infer, post-process.
///
/// Takes plain values rather than `MyInput` so the task stays independent of
/// the schema layer. Returns the raw result; the pipeline wraps it.
///
/// Replace the body with the real model. The placeholder loads nothing and
/// hands the input image back as the output image.
pub fn do_ai_task(
    input_image: &Path,
    example_param: &Value,
    model_storage_directory: &Path,
    device: Device,
) -> Result<(String, File), TaskError> {
    debug!(
        model_storage_directory = %model_storage_directory.display(),
        %device,
        ?example_param,
        "loading model"
    );

    let output_image = File::open(input_image)?;
    debug!(input_image = %input_image.display(), "opened output image");

    Ok((RESULT_TEXT.to_string(), output_image))
}
