//! Process configuration: typed settings, loading from the environment, validation.

pub mod loader;
pub mod types;
pub mod validator;

pub use loader::*;
pub use types::*;
pub use validator::*;
