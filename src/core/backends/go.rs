//! Go source generation.
//!
//! Go has no nested namespaces or abstract classes, so the stub is split in two:
//! a `<Service>Handler` interface carrying the operations to implement, and a
//! `<Service>` struct embedding `rpc.Service` that owns the route table built
//! from a handler.

use crate::domain::model::{Backend, Declaration};
use crate::domain::ports::Emitter;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoEmitter;

impl GoEmitter {
    /// Innermost package segment, or the lowercased service name.
    fn package_name(decl: &Declaration) -> String {
        decl.package_segments()
            .last()
            .map(|s| s.to_string())
            .unwrap_or_else(|| decl.service.to_lowercase())
    }
}

impl Emitter for GoEmitter {
    fn backend(&self) -> Backend {
        Backend::Go
    }

    fn render(&self, decl: &Declaration) -> String {
        let mut out = String::new();
        let serv = &decl.service;

        out.push_str(super::BANNER);
        out.push('\n');
        if !decl.package.is_empty() {
            out.push_str(&format!("// Package path: {}\n", decl.package));
        }
        out.push_str(&format!("package {}\n\n", Self::package_name(decl)));
        out.push_str("import \"co/rpc\"\n\n");

        out.push_str(&format!("type {serv}Handler interface {{\n"));
        for method in &decl.methods {
            out.push_str(&format!("\t{method}(req, res rpc.Json)\n"));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("type {serv} struct {{\n"));
        out.push_str("\trpc.Service\n");
        out.push_str("\tmethods map[string]rpc.Fun\n");
        out.push_str("}\n\n");

        out.push_str(&format!("func New{serv}(h {serv}Handler) *{serv} {{\n"));
        out.push_str(&format!(
            "\ts := &{serv}{{methods: make(map[string]rpc.Fun)}}\n"
        ));
        for method in &decl.methods {
            out.push_str(&format!(
                "\ts.methods[\"{}\"] = h.{method}\n",
                decl.route_key(method)
            ));
        }
        out.push_str("\treturn s\n");
        out.push_str("}\n\n");

        out.push_str(&format!("func (s *{serv}) Name() string {{\n"));
        out.push_str(&format!("\treturn \"{}\"\n", decl.qualified_name()));
        out.push_str("}\n\n");

        out.push_str(&format!(
            "func (s *{serv}) Methods() map[string]rpc.Fun {{\n"
        ));
        out.push_str("\treturn s.methods\n");
        out.push_str("}\n");

        out
    }
}
