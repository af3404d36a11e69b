//! Alias lookup tables.
//!
//! One scan per enabled category collects the tokens worth hiding; the union
//! is sorted and every token gets a fresh `_0x<n>` alias. Identifier tokens
//! also record the namespace(s) the rename applies to, so a local variable
//! named `data` does not drag every unrelated `.data` attribute with it.
//!
//! # Module Structure
//!
//! - `facts`: whole-program name facts (`ProgramFacts`)
//! - `collect`: per-category collectors
//! - `modules`: whole-module import bindings that can become reflective

mod collect;
mod facts;
mod modules;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use shroud_ir::builtins::is_reserved;
use shroud_ir::{BigInt, Module};

use crate::config::Categories;

pub use facts::ProgramFacts;
pub use modules::{build_module_table, ModuleAliasTable, ModuleRef};

pub(crate) use facts::{is_self, target_names};

bitflags! {
    /// Where an identifier alias applies.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Namespace: u8 {
        /// Bare names: bindings, loads, parameters, keyword arguments.
        const BARE = 1 << 0;
        /// Attribute names after a `.`.
        const ATTR = 1 << 1;
    }
}

/// A float compared and hashed by bit pattern, ordered by `total_cmp`.
#[derive(Copy, Clone, Debug)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Something the table can hide behind an alias.
///
/// The derived order (variant first, then value) fixes alias numbering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Bool(bool),
    Int(BigInt),
    Float(FloatKey),
    Str(String),
    Codepoint(char),
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Bool(value) => write!(f, "bool {value}"),
            Token::Int(value) => write!(f, "int {value}"),
            Token::Float(value) => write!(f, "float {:?}", value.0),
            Token::Str(value) => write!(f, "str {value:?}"),
            Token::Codepoint(c) => write!(f, "codepoint U+{:04X}", u32::from(*c)),
            Token::Ident(name) => write!(f, "ident {name}"),
        }
    }
}

/// Token to alias mapping for one run.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    entries: Vec<(Token, String)>,
    values: FxHashMap<Token, usize>,
    idents: FxHashMap<String, (usize, Namespace)>,
}

impl AliasTable {
    /// Assign aliases over `tokens` in sorted order.
    ///
    /// Candidates that are reserved or spelled somewhere in the input
    /// (`taken`) are skipped; the counter never goes back.
    fn assign(
        tokens: Vec<Token>,
        namespaces: &FxHashMap<String, Namespace>,
        taken: impl Fn(&str) -> bool,
    ) -> Self {
        let mut table = AliasTable::default();
        let mut counter: u64 = 0;
        for token in tokens {
            let alias = loop {
                let candidate = alias_name(counter);
                counter += 1;
                if !is_reserved(&candidate) && !taken(&candidate) {
                    break candidate;
                }
            };
            let index = table.entries.len();
            match &token {
                Token::Ident(name) => {
                    let ns = namespaces.get(name).copied().unwrap_or(Namespace::BARE);
                    table.idents.insert(name.clone(), (index, ns));
                }
                other => {
                    table.values.insert(other.clone(), index);
                }
            }
            table.entries.push((token, alias));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &str)> {
        self.entries
            .iter()
            .map(|(token, alias)| (token, alias.as_str()))
    }

    /// Alias of a literal token. Identifiers go through [`AliasTable::ident`].
    pub fn get(&self, token: &Token) -> Option<&str> {
        if let Token::Ident(name) = token {
            return self.ident_any(name);
        }
        self.values
            .get(token)
            .map(|&index| self.entries[index].1.as_str())
    }

    /// Alias of `name` when it is renamed in any of the namespaces in `ns`.
    pub fn ident(&self, name: &str, ns: Namespace) -> Option<&str> {
        self.idents
            .get(name)
            .filter(|(_, renamed)| renamed.intersects(ns))
            .map(|&(index, _)| self.entries[index].1.as_str())
    }

    /// Alias of `name` regardless of namespace; used at definition sites.
    pub fn ident_any(&self, name: &str) -> Option<&str> {
        self.ident(name, Namespace::all())
    }

    pub fn namespace(&self, name: &str) -> Namespace {
        self.idents
            .get(name)
            .map_or(Namespace::empty(), |&(_, ns)| ns)
    }

    pub fn bool(&self, value: bool) -> Option<&str> {
        self.get(&Token::Bool(value))
    }

    pub fn int(&self, value: &BigInt) -> Option<&str> {
        self.get(&Token::Int(value.clone()))
    }

    pub fn float(&self, value: f64) -> Option<&str> {
        self.get(&Token::Float(FloatKey(value)))
    }

    pub fn string(&self, value: &str) -> Option<&str> {
        self.get(&Token::Str(value.to_string()))
    }

    pub fn codepoint(&self, c: char) -> Option<&str> {
        self.get(&Token::Codepoint(c))
    }
}

/// The `n`-th alias spelling.
pub fn alias_name(n: u64) -> String {
    format!("_0x{n:x}")
}

/// Build the alias table for the enabled `categories`.
pub fn build_alias_table(module: &Module, categories: Categories) -> AliasTable {
    let facts = ProgramFacts::scan(module);
    build_alias_table_with(module, &facts, categories)
}

/// [`build_alias_table`] over facts the caller already scanned.
#[tracing::instrument(level = "debug", skip_all, fields(categories = ?categories))]
pub fn build_alias_table_with(
    module: &Module,
    facts: &ProgramFacts,
    categories: Categories,
) -> AliasTable {
    let collected = collect::collect(module, facts, categories);

    let mut tokens: Vec<Token> = collected.values.into_iter().collect();
    tokens.extend([
        Token::Bool(true),
        Token::Bool(false),
        Token::Int(BigInt::from(0)),
        Token::Int(BigInt::from(1)),
    ]);
    tokens.extend(collected.idents.keys().cloned().map(Token::Ident));
    tokens.sort();
    tokens.dedup();

    let table = AliasTable::assign(tokens, &collected.idents, |candidate| {
        facts.identifiers.contains(candidate)
    });
    tracing::debug!(aliases = table.len(), "alias table built");
    table
}
