//! Errors - エラー型と分類
//!
//! パイプラインの各ステップは固有のエラー型を返し、
//! 呼び出し側との境界では `RunError` 1 つに正規化されます。
//!
//! - `ValidationError`: スキーマへの変換失敗（入力・出力の両方）
//! - `TaskError`: タスク関数の中で起きた失敗
//! - `RunError`: 境界エラー。元のメッセージ・分類・原因 (`source`) を保持する

use std::fmt;

/// ErrorKind は `RunError` の分類
///
/// 文字列を見なくても、呼び出し側が検証失敗とタスク失敗を区別できます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 入力または出力がスキーマに合わない
    Validation,
    /// タスク関数が失敗した
    Task,
    /// 指定された名前のパイプラインが登録されていない
    Dispatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Task => "task",
            ErrorKind::Dispatch => "dispatch",
        };
        f.write_str(s)
    }
}

/// A record could not be coerced into a schema.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{schema}: {source}")]
    Decode {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{schema}: could not dump to a plain record: {source}")]
    Dump {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{schema}.{field}: {reason}")]
    Field {
        schema: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    pub fn field(schema: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Field {
            schema,
            field,
            reason: reason.into(),
        }
    }
}

/// Failure raised by a task function.
///
/// Model loading, I/O and device allocation all belong to the integrator,
/// so the variants stay coarse.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model error: {0}")]
    Model(String),
}

/// RunError はパイプライン境界のエラー
///
/// `Display` は元のエラーメッセージを部分文字列として含みます。
/// 元のエラー自体は `source()` から辿れます。
#[derive(Debug)]
pub struct RunError {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl RunError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn validation(err: ValidationError) -> Self {
        Self::wrap(ErrorKind::Validation, err)
    }

    pub fn task(err: TaskError) -> Self {
        Self::wrap(ErrorKind::Task, err)
    }

    pub fn dispatch(name: &str) -> Self {
        Self::new(
            ErrorKind::Dispatch,
            format!("no pipeline registered under name '{name}'"),
        )
    }

    fn wrap<E>(kind: ErrorKind, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
