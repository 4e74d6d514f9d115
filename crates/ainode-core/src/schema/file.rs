//! FileObject - ファイル形式の出力を運ぶハンドル
//!
//! # 所有権
//! `FileObject` は読み取りストリームを所有します。
//! ストリームを開いたコンポーネント（タスク関数）から出力オブジェクトへ所有権が移り、
//! 最終的な利用者が読み終えたら drop して解放します。

use std::fmt;
use std::io::{self, Cursor, Read};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::errors::ValidationError;

/// An output artifact: an owned byte stream plus a display name.
///
/// The holder owns the stream and must release it by dropping the
/// `FileObject` (or the reader returned by [`FileObject::into_inner`]).
pub struct FileObject {
    name: String,
    data: Box<dyn Read + Send>,
}

impl FileObject {
    pub const SCHEMA: &'static str = "FileObject";

    pub fn new<R>(data: R, name: impl Into<String>) -> Result<Self, ValidationError>
    where
        R: Read + Send + 'static,
    {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            data: Box::new(data),
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Cursor::new(bytes), name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drains the remaining bytes of the stream.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.data.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn into_inner(self) -> Box<dyn Read + Send> {
        self.data
    }
}

impl Read for FileObject {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl fmt::Debug for FileObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileObject")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Only the name is part of the dumped record; the stream is not serializable.
impl Serialize for FileObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FileObject", 1)?;
        s.serialize_field("name", &self.name)?;
        s.end()
    }
}

// 名前は保存先のファイル名として使われるので、パス区切りを含めない
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::field(FileObject::SCHEMA, "name", "must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ValidationError::field(
            FileObject::SCHEMA,
            "name",
            format!("'{name}' must be a bare file name"),
        ));
    }
    Ok(())
}
