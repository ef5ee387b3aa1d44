use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed content of one interface-definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Dotted package path, possibly empty.
    pub package: String,
    pub service: String,
    /// Method names in source order, duplicates kept.
    pub methods: Vec<String>,
}

impl Declaration {
    /// `"xx.yy"` -> `["xx", "yy"]`; an empty package has no segments.
    pub fn package_segments(&self) -> Vec<&str> {
        if self.package.is_empty() {
            Vec::new()
        } else {
            self.package.split('.').collect()
        }
    }

    /// `pkg.serv`, or just `serv` without a package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.service.clone()
        } else {
            format!("{}.{}", self.package, self.service)
        }
    }

    /// Dispatch key registered for a method, `serv.method`.
    pub fn route_key(&self, method: &str) -> String {
        format!("{}.{}", self.service, method)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Cpp,
    Go,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Cpp, Backend::Go];

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Cpp => "cpp",
            Backend::Go => "go",
        }
    }

    /// Extension of the generated file, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Backend::Cpp => "h",
            Backend::Go => "go",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Backend::Cpp),
            "go" | "golang" => Ok(Backend::Go),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}

/// Backends to run for this invocation, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendSelection {
    backends: Vec<Backend>,
}

impl BackendSelection {
    /// Explicit flags win; otherwise the configured list; otherwise the default backend.
    pub fn resolve(explicit: &[Backend], configured: &[Backend]) -> Self {
        let chosen = if !explicit.is_empty() {
            explicit
        } else {
            configured
        };

        let mut backends: Vec<Backend> = Backend::ALL
            .iter()
            .copied()
            .filter(|b| chosen.contains(b))
            .collect();
        if backends.is_empty() {
            backends.push(Backend::default());
        }

        Self { backends }
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(package: &str) -> Declaration {
        Declaration {
            package: package.to_string(),
            service: "Greeter".to_string(),
            methods: vec!["hello".to_string()],
        }
    }

    #[test]
    fn test_package_segments() {
        assert_eq!(declaration("ns.sub").package_segments(), vec!["ns", "sub"]);
        assert!(declaration("").package_segments().is_empty());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(declaration("ns.sub").qualified_name(), "ns.sub.Greeter");
        assert_eq!(declaration("").qualified_name(), "Greeter");
        assert_eq!(declaration("ns").route_key("hello"), "Greeter.hello");
    }

    #[test]
    fn test_backend_selection_defaults_to_cpp() {
        let selection = BackendSelection::resolve(&[], &[]);
        assert_eq!(selection.backends(), &[Backend::Cpp]);
    }

    #[test]
    fn test_backend_selection_explicit_wins() {
        let selection = BackendSelection::resolve(&[Backend::Go], &[Backend::Cpp]);
        assert_eq!(selection.backends(), &[Backend::Go]);

        let selection = BackendSelection::resolve(&[], &[Backend::Go, Backend::Cpp]);
        assert_eq!(selection.backends(), &[Backend::Cpp, Backend::Go]);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("cpp".parse::<Backend>(), Ok(Backend::Cpp));
        assert_eq!("Golang".parse::<Backend>(), Ok(Backend::Go));
        assert!("java".parse::<Backend>().is_err());
    }
}
