//! Domain model (errors, invocation ids).

pub mod errors;
pub mod ids;

pub use self::errors::{ErrorKind, RunError, TaskError, ValidationError};
pub use self::ids::RunId;
