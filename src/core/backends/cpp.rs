//! C++ header generation.
//!
//! Emits an abstract class deriving from `rpc::Service`. The constructor binds
//! every method under its `"<service>.<method>"` key; the methods themselves are
//! pure virtual and implemented by hand-written subclasses.

use crate::domain::model::{Backend, Declaration};
use crate::domain::ports::Emitter;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct CppEmitter;

impl Emitter for CppEmitter {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn render(&self, decl: &Declaration) -> String {
        let mut out = String::new();
        let serv = &decl.service;
        let segments = decl.package_segments();

        out.push_str(super::BANNER);
        out.push_str("#pragma once\n\n");
        out.push_str("#include \"co/rpc.h\"\n\n");

        for segment in &segments {
            out.push_str(&format!("namespace {segment} {{\n"));
        }
        if !segments.is_empty() {
            out.push('\n');
        }

        out.push_str(&format!("class {serv} : public rpc::Service {{\n"));
        out.push_str("  public:\n");
        out.push_str(&format!(
            "{INDENT}typedef std::function<void(Json&, Json&)> Fun;\n\n"
        ));

        // constructor: route table
        out.push_str(&format!("{INDENT}{serv}() {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}using std::placeholders::_1;\n"));
        out.push_str(&format!("{INDENT}{INDENT}using std::placeholders::_2;\n"));
        for method in &decl.methods {
            out.push_str(&format!(
                "{INDENT}{INDENT}_methods[\"{}\"] = std::bind(&{serv}::{method}, this, _1, _2);\n",
                decl.route_key(method)
            ));
        }
        out.push_str(&format!("{INDENT}}}\n\n"));
        out.push_str(&format!("{INDENT}virtual ~{serv}() {{}}\n\n"));

        out.push_str(&format!("{INDENT}virtual const char* name() const {{\n"));
        out.push_str(&format!(
            "{INDENT}{INDENT}return \"{}\";\n",
            decl.qualified_name()
        ));
        out.push_str(&format!("{INDENT}}}\n\n"));

        out.push_str(&format!(
            "{INDENT}virtual const co::map<const char*, Fun>& methods() const {{\n"
        ));
        out.push_str(&format!("{INDENT}{INDENT}return _methods;\n"));
        out.push_str(&format!("{INDENT}}}\n\n"));

        for method in &decl.methods {
            out.push_str(&format!(
                "{INDENT}virtual void {method}(Json& req, Json& res) = 0;\n\n"
            ));
        }

        out.push_str("  private:\n");
        out.push_str(&format!("{INDENT}co::map<const char*, Fun> _methods;\n"));
        out.push_str("};\n");

        if !segments.is_empty() {
            out.push('\n');
        }
        for segment in segments.iter().rev() {
            out.push_str(&format!("}} // {segment}\n"));
        }

        out
    }
}
