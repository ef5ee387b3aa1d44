pub mod cpp;
pub mod go;

use crate::domain::model::Backend;
use crate::domain::ports::Emitter;

pub use cpp::CppEmitter;
pub use go::GoEmitter;

pub(crate) const BANNER: &str = "// Autogenerated.\n// DO NOT EDIT. All changes will be undone.\n";

pub fn emitter_for(backend: Backend) -> Box<dyn Emitter> {
    match backend {
        Backend::Cpp => Box::new(CppEmitter),
        Backend::Go => Box::new(GoEmitter),
    }
}
