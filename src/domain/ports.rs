use crate::domain::model::{Backend, Declaration};
use std::io;
use std::path::Path;

/// Byte-level file access used by the generator.
pub trait Storage {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// Renders a declaration into the source text of one target language.
pub trait Emitter {
    fn backend(&self) -> Backend;
    fn render(&self, decl: &Declaration) -> String;
}
