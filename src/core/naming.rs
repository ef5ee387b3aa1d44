use crate::utils::error::{GenError, Result};
use std::path::{Path, PathBuf};

/// Derives the generated file's path from the input path.
///
/// The extension after the last `.` of the file name is replaced by `extension`.
/// Without `output_dir` the result stays next to the input
/// (`a/b/foo.proto` -> `a/b/foo.h`); with it, only the file name is kept
/// (`a/b/foo.proto` -> `<output_dir>/foo.h`). A file name without an extension,
/// or made only of a leading dot and a suffix (`.proto`), is malformed.
pub fn output_path(input: &Path, extension: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = match (input.file_stem(), input.extension()) {
        (Some(stem), Some(_)) => stem,
        _ => {
            return Err(GenError::MalformedFileName {
                path: input.to_string_lossy().into_owned(),
            })
        }
    };

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);

    let generated = match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    };
    Ok(generated)
}
