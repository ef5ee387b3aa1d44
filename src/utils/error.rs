use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("failed to open file: {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid proto file name: {path}")]
    MalformedFileName { path: String },

    #[error("find multiple {kind} declarations in file: {path}")]
    DuplicateDeclaration { kind: &'static str, path: String },

    #[error("empty service name in file: {path}")]
    EmptyServiceName { path: String },

    #[error("no method found in service: {service} ({path})")]
    EmptyMethodSet { service: String, path: String },

    #[error("ending '}}' not found for service: {service} ({path})")]
    UnterminatedBlock { service: String, path: String },

    #[error("cannot open file: {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GenError {
    /// 產生器錯誤一律中止整個執行；唯獨輸出檔無法開啟時沿用舊行為回傳 0。
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::OutputUnwritable { .. } => 0,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GenError::InputUnreadable { path, .. } => {
                format!("failed to open file: {}", path.display())
            }
            GenError::OutputUnwritable { path, .. } => {
                format!("cannot open file: {}", path.display())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GenError::InputUnreadable { .. } => "Check that the input file exists and is readable",
            GenError::MalformedFileName { .. } => {
                "Input files need an extension, e.g. 'hello.proto'"
            }
            GenError::DuplicateDeclaration { .. } => {
                "Keep a single package and a single service per file"
            }
            GenError::EmptyServiceName { .. } => "Name the service, e.g. 'service Hello {'",
            GenError::EmptyMethodSet { .. } => "List at least one method inside the service block",
            GenError::UnterminatedBlock { .. } => "Close the service block with '}'",
            GenError::OutputUnwritable { .. } => {
                "Check permissions of the output directory"
            }
            GenError::IoError(_) | GenError::SerializationError(_) => "Retry the command",
            GenError::ConfigError { .. } | GenError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let unwritable = GenError::OutputUnwritable {
            path: PathBuf::from("out/hello.h"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(unwritable.exit_code(), 0);

        let unterminated = GenError::UnterminatedBlock {
            service: "Hello".to_string(),
            path: "hello.proto".to_string(),
        };
        assert_eq!(unterminated.exit_code(), 1);
    }

    #[test]
    fn test_messages_name_file_and_condition() {
        let err = GenError::DuplicateDeclaration {
            kind: "package",
            path: "hello.proto".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "find multiple package declarations in file: hello.proto"
        );

        let err = GenError::UnterminatedBlock {
            service: "Hello".to_string(),
            path: "hello.proto".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ending '}' not found for service: Hello (hello.proto)"
        );
    }
}
