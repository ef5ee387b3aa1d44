use crate::core::backends::emitter_for;
use crate::core::naming::output_path;
use crate::core::parser::parse_declaration;
use crate::domain::model::{Backend, BackendSelection, Declaration};
use crate::domain::ports::Storage;
use crate::utils::error::{GenError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub selection: BackendSelection,
    /// Write outputs here instead of next to each input.
    pub output_dir: Option<PathBuf>,
    /// Parse and plan only, never write.
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            selection: BackendSelection::resolve(&[], &[]),
            output_dir: None,
            dry_run: false,
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    /// `None` when the file declares no service.
    pub declaration: Option<Declaration>,
    /// Generated (or, for a dry run, planned) files.
    pub outputs: Vec<PathBuf>,
}

pub struct Generator<S: Storage> {
    storage: S,
    options: GenerateOptions,
}

impl<S: Storage> Generator<S> {
    pub fn new(storage: S, options: GenerateOptions) -> Self {
        Self { storage, options }
    }

    /// Processes the inputs in order and stops at the first error; files after
    /// a failing one are never touched.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<Vec<FileReport>> {
        let mut reports = Vec::with_capacity(inputs.len());
        for input in inputs {
            reports.push(self.generate_file(input)?);
        }
        Ok(reports)
    }

    pub fn generate_file(&self, input: &Path) -> Result<FileReport> {
        tracing::debug!("reading {}", input.display());
        let bytes = self
            .storage
            .read_file(input)
            .map_err(|source| GenError::InputUnreadable {
                path: input.to_path_buf(),
                source,
            })?;

        let targets = self
            .options
            .selection
            .backends()
            .iter()
            .map(|&backend| {
                output_path(input, backend.extension(), self.options.output_dir.as_deref())
                    .map(|path| (backend, path))
            })
            .collect::<Result<Vec<(Backend, PathBuf)>>>()?;

        let content = String::from_utf8_lossy(&bytes);
        let declaration = parse_declaration(&input.to_string_lossy(), &content)?;

        let Some(decl) = declaration else {
            tracing::info!("no service found in {}, skipped", input.display());
            return Ok(FileReport {
                input: input.to_path_buf(),
                declaration: None,
                outputs: Vec::new(),
            });
        };

        tracing::debug!(
            "parsed {}: {} with {} method(s)",
            input.display(),
            decl.qualified_name(),
            decl.methods.len()
        );

        let mut outputs = Vec::with_capacity(targets.len());
        for (backend, path) in targets {
            if !self.options.dry_run {
                self.emit(&decl, backend, &path)?;
            }
            outputs.push(path);
        }

        Ok(FileReport {
            input: input.to_path_buf(),
            declaration: Some(decl),
            outputs,
        })
    }

    /// Renders `decl` with one backend and overwrites `path` with the result.
    pub fn emit(&self, decl: &Declaration, backend: Backend, path: &Path) -> Result<()> {
        let emitter = emitter_for(backend);
        let source = emitter.render(decl);

        self.storage
            .write_file(path, source.as_bytes())
            .map_err(|source| GenError::OutputUnwritable {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!("generated {} ({})", path.display(), emitter.backend());
        println!("generate {} success", path.display());
        Ok(())
    }
}
