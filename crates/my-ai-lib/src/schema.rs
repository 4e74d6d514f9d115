//! Input and output schemas of the `my_ai_lib` task.

use ainode_core::ValidationError;
use ainode_core::schema::{BaseInput, FileObject, InputSchema, OutputObject, dump_output};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input of the image task.
///
/// `example_param` は任意の JSON 値。解釈はタスク側に任せる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyInput {
    #[serde(flatten)]
    pub base: BaseInput,

    pub input_image: String,

    #[serde(default = "default_example_param")]
    pub example_param: Value,
}

fn default_example_param() -> Value {
    Value::String(String::new())
}

impl InputSchema for MyInput {
    const NAME: &'static str = "MyInput";

    fn base(&self) -> &BaseInput {
        &self.base
    }
}

/// Output of the image task. Owns the `output_image` stream.
#[derive(Debug, Serialize)]
pub struct MyOutput {
    pub text: String,
    pub output_image: FileObject,
}

impl OutputObject for MyOutput {
    fn model_dump(&self) -> Result<Value, ValidationError> {
        dump_output("MyOutput", self)
    }

    fn files_mut(&mut self) -> Vec<&mut FileObject> {
        vec![&mut self.output_image]
    }
}
