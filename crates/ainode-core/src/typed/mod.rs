//! Typed - 型付き Pipeline API
//!
//! このモジュールは入力検証・タスク実行・出力の組み立てを型で結びつけ、
//! ホスト側からは名前で引ける形に型消去します。
//!
//! # 二層構造
//! - **表層（Typed）**: `Pipeline` trait, `run()` - 型安全
//! - **内部（Dyn）**: `DynPipeline` trait - object-safe, type erasure

pub mod handler;
pub mod pipeline;
pub mod registry;

// 主要な trait/型 を再エクスポート
pub use self::handler::DynPipeline;
pub use self::pipeline::{Pipeline, run};
pub use self::registry::{PipelineRegistry, RegistryError};
