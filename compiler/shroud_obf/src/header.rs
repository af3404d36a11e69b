//! Prologue of alias definitions.
//!
//! Value-synthesizing rules register `alias = expression` pairs here. The
//! table is emitted once, as a contiguous block of assignments, ordered by
//! dependency tier and then by first insertion.

use rustc_hash::FxHashSet;
use shroud_ir::{Expr, ExprContext, ExprKind, Module, Span, Stmt, StmtKind};

/// Dependency tier of a header entry.
///
/// An entry may only reference aliases of a lower tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Booleans and the 0 and 1 aliases; built from idioms only.
    Base,
    /// Numbers and codepoints; reference `Base` aliases.
    Value,
    /// Strings; may reference codepoint aliases.
    Derived,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    pub alias: String,
    pub value: String,
    pub tier: Tier,
}

#[derive(Clone, Debug, Default)]
pub struct HeaderTable {
    entries: Vec<HeaderEntry>,
    seen: FxHashSet<String>,
}

impl HeaderTable {
    pub fn new() -> Self {
        HeaderTable::default()
    }

    /// Register `alias = value`. A second insert for the same alias is a
    /// no-op and returns `false`.
    pub fn insert(&mut self, alias: &str, value: impl Into<String>, tier: Tier) -> bool {
        if self.seen.contains(alias) {
            return false;
        }
        self.seen.insert(alias.to_string());
        self.entries.push(HeaderEntry {
            alias: alias.to_string(),
            value: value.into(),
            tier,
        });
        true
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.seen.contains(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in emission order: tier, then insertion.
    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        let mut ordered: Vec<&HeaderEntry> = self.entries.iter().collect();
        // Stable sort keeps insertion order within a tier.
        ordered.sort_by_key(|entry| entry.tier);
        ordered.into_iter()
    }
}

/// Where the prologue goes: after the module docstring and any
/// `from __future__` imports, which must stay first.
fn prologue_index(module: &Module) -> usize {
    let mut index = 0;
    if module.body.first().is_some_and(Stmt::is_docstring) {
        index = 1;
    }
    while module.body.get(index).is_some_and(is_future_import) {
        index += 1;
    }
    index
}

fn is_future_import(stmt: &Stmt) -> bool {
    matches!(
        &stmt.kind,
        StmtKind::ImportFrom { module: Some(path), level: 0, .. } if path == "__future__"
    )
}

/// Emit the header as assignments at the top of `module`.
#[tracing::instrument(level = "debug", skip_all, fields(entries = header.len()))]
pub fn inject(module: &mut Module, header: &HeaderTable) {
    let index = prologue_index(module);
    let prologue: Vec<Stmt> = header
        .iter()
        .map(|entry| {
            let target = Expr::new(
                ExprKind::Name {
                    id: entry.alias.clone(),
                    ctx: ExprContext::Store,
                },
                Span::DUMMY,
            );
            Stmt::new(
                StmtKind::Assign {
                    targets: vec![target],
                    value: Expr::raw(entry.value.clone()),
                },
                Span::DUMMY,
            )
        })
        .collect();
    module.body.splice(index..index, prologue);
}

/// Splice `stmt` into the module body at `index`, clamped to the body length.
pub fn insert_statement_at(module: &mut Module, index: usize, stmt: Stmt) {
    let index = index.min(module.body.len());
    module.body.insert(index, stmt);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn aliases(header: &HeaderTable) -> Vec<&str> {
        header.iter().map(|entry| entry.alias.as_str()).collect()
    }

    #[test]
    fn insert_is_idempotent() {
        let mut header = HeaderTable::new();
        assert!(header.insert("_0x1", "(not())", Tier::Base));
        assert!(!header.insert("_0x1", "other", Tier::Derived));
        assert_eq!(header.len(), 1);
        assert_eq!(header.iter().next().unwrap().value, "(not())");
        assert!(header.contains("_0x1"));
    }

    #[test]
    fn emission_order_is_tier_then_insertion() {
        let mut header = HeaderTable::new();
        header.insert("s", "x", Tier::Derived);
        header.insert("b", "x", Tier::Value);
        header.insert("one", "x", Tier::Base);
        header.insert("a", "x", Tier::Value);
        header.insert("zero", "x", Tier::Base);
        assert_eq!(aliases(&header), ["one", "zero", "b", "a", "s"]);
    }

    #[test]
    fn inject_after_docstring_and_future_imports() {
        let mut module = shroud_parse::parse(
            "'''doc'''\nfrom __future__ import annotations\nimport os\nx = 1\n",
        )
        .unwrap();
        let mut header = HeaderTable::new();
        header.insert("_0x0", "(not[()])", Tier::Base);
        inject(&mut module, &header);
        assert_eq!(
            shroud_fmt::print_module(&module),
            "'doc'\nfrom __future__ import annotations\n_0x0 = (not[()])\nimport os\nx = 1\n"
        );
    }

    #[test]
    fn inject_into_empty_module() {
        let mut module = Module::default();
        let mut header = HeaderTable::new();
        header.insert("a", "(not())", Tier::Base);
        header.insert("b", "(not[()])", Tier::Base);
        inject(&mut module, &header);
        assert_eq!(shroud_fmt::print_module(&module), "a = (not())\nb = (not[()])\n");
    }

    #[test]
    fn insert_statement_clamps() {
        let mut module = shroud_parse::parse("a = 1\nb = 2\n").unwrap();
        insert_statement_at(&mut module, 99, Stmt::new(StmtKind::Pass, Span::DUMMY));
        insert_statement_at(&mut module, 0, Stmt::new(StmtKind::Break, Span::DUMMY));
        assert_eq!(
            shroud_fmt::print_module(&module),
            "break\na = 1\nb = 2\npass\n"
        );
    }
}
