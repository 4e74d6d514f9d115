//! ainode-core
//!
//! Core building blocks for AI-node model adapters.
//!
//! # モジュール構成
//! - **schema**: 入出力スキーマの基底型（BaseInput, InputObject, OutputObject, FileObject）
//! - **domain**: エラー型と分類（ValidationError, TaskError, RunError）、RunId
//! - **typed**: 型付き Pipeline API（Pipeline trait, run, DynPipeline, PipelineRegistry）
//! - **app**: ホスト側のワイヤリング（AdapterBuilder, Adapter）
//! - **config**: 環境変数からの設定

pub mod app;
pub mod config;
pub mod domain;
pub mod schema;
pub mod typed;

pub use self::domain::{ErrorKind, RunError, TaskError, ValidationError};
pub use self::schema::{BaseInput, Device, FileObject, InputObject, InputSchema, OutputObject};
pub use self::typed::{Pipeline, run};
