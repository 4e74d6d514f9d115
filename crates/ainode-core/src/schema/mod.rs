//! Schema - 入出力スキーマの基底型
//!
//! - **input**: `BaseInput`, `InputObject`, `InputSchema` trait, `Device`
//! - **output**: `OutputObject` trait
//! - **file**: `FileObject`（ファイル形式の出力）

pub mod file;
pub mod input;
pub mod output;

pub use self::file::FileObject;
pub use self::input::{BaseInput, Device, InputObject, InputSchema};
pub use self::output::{OutputObject, dump_output};
