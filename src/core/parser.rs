//! Declaration parser
//!
//! Line-oriented scanner for interface-definition files:
//!
//! ```text
//! package ns.sub        // optional
//! service Greeter {
//!     hello
//!     bye
//! }
//! ```
//!
//! The scan is a two-state machine. While [`State::SeekingService`] it accepts
//! blank lines, comments, the `package` line and the `service` line; the
//! `service` line switches to [`State::InBlock`], where every non-empty line is
//! a method name until the line carrying `}` closes the block. Closing the
//! block ends the parse; anything after it is ignored.

use crate::domain::model::Declaration;
use crate::utils::error::{GenError, Result};

const PACKAGE_PREFIX: &str = "package ";
const SERVICE_PREFIX: &str = "service ";

const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];
const SERVICE_STRIP: &[char] = &[' ', '\t', '\r', '\n', '{'];
const METHOD_STRIP: &[char] = &[' ', '\t', '\r', '\n', ',', ';', '{'];
const CLOSING_STRIP: &[char] = &[' ', '\t', '\r', '\n', ',', ';', '{', '}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    SeekingService,
    InBlock,
}

/// Result of feeding one line to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Closed,
}

/// Splits on `\n`, or on `\r` when the content has no `\n` but does have `\r`.
pub fn split_lines(content: &str) -> std::str::Split<'_, char> {
    let separator = if !content.contains('\n') && content.contains('\r') {
        '\r'
    } else {
        '\n'
    };
    content.split(separator)
}

/// Cuts the line at the first `//`. String literals get no special treatment.
pub fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

pub struct DeclarationParser<'a> {
    path: &'a str,
    state: State,
    package: Option<String>,
    service: Option<String>,
    methods: Vec<String>,
}

impl<'a> DeclarationParser<'a> {
    /// `path` is only used for diagnostics.
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            state: State::SeekingService,
            package: None,
            service: None,
            methods: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the machine over the whole content.
    ///
    /// Returns `Ok(None)` when the file declares no service at all; such files
    /// have nothing to generate.
    pub fn parse(mut self, content: &str) -> Result<Option<Declaration>> {
        for line in split_lines(content) {
            if self.feed(line)? == Step::Closed {
                return self.finish().map(Some);
            }
        }

        match self.state {
            State::SeekingService => {
                tracing::debug!("no service declared in {}", self.path);
                Ok(None)
            }
            State::InBlock => Err(GenError::UnterminatedBlock {
                service: self.service.unwrap_or_default(),
                path: self.path.to_string(),
            }),
        }
    }

    fn feed(&mut self, line: &str) -> Result<Step> {
        match self.state {
            State::SeekingService => self.seek_service(line),
            State::InBlock => Ok(self.scan_block(line)),
        }
    }

    fn seek_service(&mut self, line: &str) -> Result<Step> {
        let line = line.trim_matches(WHITESPACE);
        if line.is_empty() || line.starts_with("//") {
            return Ok(Step::Continue);
        }

        if let Some(rest) = line.strip_prefix(PACKAGE_PREFIX) {
            let package = strip_comment(rest).trim_matches(WHITESPACE);
            Self::declare(&mut self.package, "package", package, self.path)?;
            tracing::debug!("package: {:?}", package);
        } else if let Some(rest) = line.strip_prefix(SERVICE_PREFIX) {
            let rest = strip_comment(rest);
            // The opener may carry the start of the block: `service S { ping }`.
            let (name, tail) = match rest.find('{') {
                Some(pos) => (&rest[..pos], &rest[pos + 1..]),
                None => (rest, ""),
            };
            let service = name.trim_matches(SERVICE_STRIP);
            if service.is_empty() {
                return Err(GenError::EmptyServiceName {
                    path: self.path.to_string(),
                });
            }
            Self::declare(&mut self.service, "service", service, self.path)?;
            tracing::debug!("service: {:?}", service);
            self.state = State::InBlock;
            return Ok(self.scan_block(tail));
        }

        // Other lines outside the service block are ignored.
        Ok(Step::Continue)
    }

    fn scan_block(&mut self, line: &str) -> Step {
        let line = strip_comment(line);

        if line.contains('}') {
            self.push_method(line.trim_matches(CLOSING_STRIP));
            Step::Closed
        } else {
            self.push_method(line.trim_matches(METHOD_STRIP));
            Step::Continue
        }
    }

    fn push_method(&mut self, name: &str) {
        if !name.is_empty() {
            tracing::debug!("method: {:?}", name);
            self.methods.push(name.to_string());
        }
    }

    fn declare(
        slot: &mut Option<String>,
        kind: &'static str,
        value: &str,
        path: &str,
    ) -> Result<()> {
        if slot.is_some() {
            return Err(GenError::DuplicateDeclaration {
                kind,
                path: path.to_string(),
            });
        }
        *slot = Some(value.to_string());
        Ok(())
    }

    fn finish(self) -> Result<Declaration> {
        let service = self.service.unwrap_or_default();
        if self.methods.is_empty() {
            return Err(GenError::EmptyMethodSet {
                service,
                path: self.path.to_string(),
            });
        }

        Ok(Declaration {
            package: self.package.unwrap_or_default(),
            service,
            methods: self.methods,
        })
    }
}

/// Parses one file's content. See [`DeclarationParser::parse`].
pub fn parse_declaration(path: &str, content: &str) -> Result<Option<Declaration>> {
    DeclarationParser::new(path).parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Option<Declaration>> {
        parse_declaration("test.proto", content)
    }

    #[test]
    fn test_parse_greeter() {
        let content = "package ns.sub\nservice Greeter {\n    hello\n    bye\n}\n";
        let decl = parse(content).unwrap().unwrap();

        assert_eq!(decl.package, "ns.sub");
        assert_eq!(decl.service, "Greeter");
        assert_eq!(decl.methods, vec!["hello", "bye"]);
    }

    #[test]
    fn test_comments_are_stripped() {
        let content = r#"
// leading comment
package ns // the package
service Greeter { // the service
    hello, // first
    // commented out
    bye; // second
} // end
"#;
        let decl = parse(content).unwrap().unwrap();

        assert_eq!(decl.package, "ns");
        assert_eq!(decl.service, "Greeter");
        assert_eq!(decl.methods, vec!["hello", "bye"]);
    }

    #[test]
    fn test_carriage_return_only_line_endings() {
        let content = "package a\rservice S {\rping\rpong }\r";
        let decl = parse(content).unwrap().unwrap();

        assert_eq!(decl.package, "a");
        assert_eq!(decl.methods, vec!["ping", "pong"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "service S {\r\n\tping\r\n}\r\n";
        let decl = parse(content).unwrap().unwrap();

        assert_eq!(decl.package, "");
        assert_eq!(decl.methods, vec!["ping"]);
    }

    #[test]
    fn test_closing_brace_on_method_line() {
        let decl = parse("service S {\n  a\n  b }").unwrap().unwrap();
        assert_eq!(decl.methods, vec!["a", "b"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let decl = parse("service S {\nz\na\nz\n}").unwrap().unwrap();
        assert_eq!(decl.methods, vec!["z", "a", "z"]);
    }

    #[test]
    fn test_method_line_is_not_split_on_inner_whitespace() {
        let decl = parse("service S {\nfoo bar\n}").unwrap().unwrap();
        assert_eq!(decl.methods, vec!["foo bar"]);
    }

    #[test]
    fn test_content_after_block_is_ignored() {
        let content = "service S {\nping\n}\npackage late\nservice Other {\n";
        let decl = parse(content).unwrap().unwrap();

        assert_eq!(decl.package, "");
        assert_eq!(decl.service, "S");
    }

    #[test]
    fn test_no_service_is_not_an_error() {
        assert_eq!(parse("package ns\n// nothing here\n").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn test_empty_method_set() {
        let err = parse("service Empty { }").unwrap_err();
        assert!(matches!(err, GenError::EmptyMethodSet { ref service, .. } if service == "Empty"));

        let err = parse("service Empty {\n\n}\n").unwrap_err();
        assert!(matches!(err, GenError::EmptyMethodSet { .. }));
    }

    #[test]
    fn test_duplicate_package() {
        let err = parse("package a\npackage b\nservice S {\nping\n}").unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateDeclaration { kind: "package", .. }
        ));
    }

    #[test]
    fn test_duplicate_empty_package() {
        let err = parse("package // none\npackage b\n").unwrap_err();
        assert!(matches!(
            err,
            GenError::DuplicateDeclaration { kind: "package", .. }
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse("service S {\nping\npong\n").unwrap_err();
        assert!(matches!(err, GenError::UnterminatedBlock { ref service, .. } if service == "S"));
    }

    #[test]
    fn test_single_line_block() {
        let decl = parse("service S { ping }").unwrap().unwrap();
        assert_eq!(decl.service, "S");
        assert_eq!(decl.methods, vec!["ping"]);

        let decl = parse("service S { ping\npong }").unwrap().unwrap();
        assert_eq!(decl.methods, vec!["ping", "pong"]);
    }

    #[test]
    fn test_opening_brace_on_next_line() {
        let decl = parse("service S\n{\nping\n}").unwrap().unwrap();
        assert_eq!(decl.service, "S");
        assert_eq!(decl.methods, vec!["ping"]);
    }

    #[test]
    fn test_empty_service_name() {
        let err = parse("service {\nping\n}").unwrap_err();
        assert!(matches!(err, GenError::EmptyServiceName { .. }));
    }

    #[test]
    fn test_state_transitions() {
        let mut parser = DeclarationParser::new("test.proto");
        assert_eq!(parser.state(), State::SeekingService);

        assert_eq!(parser.feed("package ns").unwrap(), Step::Continue);
        assert_eq!(parser.state(), State::SeekingService);

        assert_eq!(parser.feed("service S {").unwrap(), Step::Continue);
        assert_eq!(parser.state(), State::InBlock);

        assert_eq!(parser.feed("ping").unwrap(), Step::Continue);
        assert_eq!(parser.feed("}").unwrap(), Step::Closed);
    }
}
