//! Input schemas.
//!
//! # 二層構造
//! - **汎用（InputObject）**: 共通フィールド + 任意の追加フィールド。呼び出し側が作る
//! - **具体（InputSchema を実装した型）**: タスクが必要とするフィールドを型付きで宣言する
//!
//! 具体スキーマは `#[serde(flatten)] base: BaseInput` を持ち、共通フィールドを
//! 削らずにフィールドを追加します。汎用 → 具体の変換は
//! 「plain record に dump → 具体スキーマとして再構築」で行います。

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::errors::ValidationError;

/// Compute device a task should run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
    Gpu,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
            Device::Gpu => "gpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // serde 側と同じく小文字の完全一致のみ
        match s {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda),
            "gpu" => Ok(Device::Gpu),
            other => Err(ValidationError::field(
                "BaseInput",
                "device",
                format!("unknown device '{other}', expected one of cpu, cuda, gpu"),
            )),
        }
    }
}

/// Fields every input carries, whatever the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseInput {
    pub model_storage_directory: PathBuf,
    pub device: Device,
}

impl BaseInput {
    pub const DEFAULT_MODEL_STORAGE_DIRECTORY: &'static str = "models";

    pub fn new(model_storage_directory: impl Into<PathBuf>, device: Device) -> Self {
        Self {
            model_storage_directory: model_storage_directory.into(),
            device,
        }
    }
}

impl Default for BaseInput {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MODEL_STORAGE_DIRECTORY, Device::default())
    }
}

/// InputSchema は具体的な入力スキーマ
///
/// # 使用例
/// ```ignore
/// #[derive(Debug, Serialize, Deserialize)]
/// struct MyInput {
///     #[serde(flatten)]
///     base: BaseInput,
///     input_image: String,
/// }
///
/// impl InputSchema for MyInput {
///     const NAME: &'static str = "MyInput";
///     fn base(&self) -> &BaseInput { &self.base }
/// }
/// ```
///
/// # Trait Bounds
/// - `Serialize`: plain record への dump のため
/// - `DeserializeOwned`: plain record からの再構築（検証）のため
pub trait InputSchema: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// エラーメッセージに使うスキーマ名
    const NAME: &'static str;

    fn base(&self) -> &BaseInput;

    /// Build the schema from a plain record, failing on missing or mistyped fields.
    fn model_validate(record: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(record).map_err(|source| ValidationError::Decode {
            schema: Self::NAME,
            source,
        })
    }

    fn model_dump(&self) -> Result<Value, ValidationError> {
        serde_json::to_value(self).map_err(|source| ValidationError::Dump {
            schema: Self::NAME,
            source,
        })
    }
}

/// The generic input handed to a pipeline: common fields plus whatever the
/// caller put in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputObject {
    #[serde(flatten)]
    pub base: BaseInput,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl InputObject {
    pub fn new(base: BaseInput) -> Self {
        Self {
            base,
            fields: Map::new(),
        }
    }

    /// Adds an extra field.
    ///
    /// Keys naming a base field are ignored with a warning; use
    /// [`InputObject::try_with_field`] to set those from untyped values.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if is_base_key(&key) {
            warn!(key = %key, "base field ignored by with_field");
            return self;
        }
        self.fields.insert(key, value.into());
        self
    }

    /// Adds a field, routing `device` and `model_storage_directory` into `base`.
    ///
    /// Base values are decoded the same way a record is, so a bad device name
    /// fails here instead of being dropped.
    pub fn try_with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ValidationError> {
        let key = key.into();
        let value = value.into();
        let decode = |source| ValidationError::Decode {
            schema: "BaseInput",
            source,
        };
        match key.as_str() {
            "device" => self.base.device = serde_json::from_value(value).map_err(decode)?,
            "model_storage_directory" => {
                self.base.model_storage_directory =
                    serde_json::from_value(value).map_err(decode)?
            }
            _ => {
                self.fields.insert(key, value);
            }
        }
        Ok(self)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Coerce into a concrete schema by dumping to a plain record and
    /// rebuilding `T` from it.
    pub fn validate_as<T: InputSchema>(&self) -> Result<T, ValidationError> {
        let record = InputSchema::model_dump(self)?;
        T::model_validate(record)
    }
}

fn is_base_key(key: &str) -> bool {
    key == "model_storage_directory" || key == "device"
}

impl InputSchema for InputObject {
    const NAME: &'static str = "InputObject";

    fn base(&self) -> &BaseInput {
        &self.base
    }
}
