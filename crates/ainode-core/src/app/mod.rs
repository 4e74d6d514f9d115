//! App - ホスト側のワイヤリング
//!
//! - **builder**: AdapterBuilder（登録 + 起動時検証）と Adapter（名前でディスパッチ）

pub mod builder;

pub use self::builder::{Adapter, AdapterBuilder, BuildError};
