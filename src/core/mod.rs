pub mod backends;
pub mod generator;
pub mod naming;
pub mod parser;

pub use crate::domain::model::{Backend, BackendSelection, Declaration};
pub use crate::domain::ports::{Emitter, Storage};
pub use crate::utils::error::Result;
