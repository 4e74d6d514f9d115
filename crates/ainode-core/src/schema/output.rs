//! Output schemas.
//!
//! 出力は object-safe な `OutputObject` として返り、含まれる `FileObject` は
//! `files_mut` から取り出せます。

use std::fmt;

use serde_json::Value;

use super::file::FileObject;
use crate::domain::errors::ValidationError;

/// OutputObject は出力スキーマの共通インターフェース
///
/// 具体的な出力型（例: `MyOutput`）が実装し、`Box<dyn OutputObject>` として
/// 汎用の出力の代わりに扱えます。
///
/// # Object Safety
/// - ジェネリックメソッドを持たない
/// - `dyn OutputObject` として trait object にできる
pub trait OutputObject: fmt::Debug + Send + 'static {
    /// Fields as a plain record. Files appear as `{"name": ...}`.
    fn model_dump(&self) -> Result<Value, ValidationError>;

    /// Owned file artifacts, for consumers that read or persist them.
    fn files_mut(&mut self) -> Vec<&mut FileObject>;
}

/// Serializes any `Serialize` output into a record, attributing failures to `schema`.
pub fn dump_output<T: serde::Serialize>(
    schema: &'static str,
    output: &T,
) -> Result<Value, ValidationError> {
    serde_json::to_value(output).map_err(|source| ValidationError::Dump { schema, source })
}
