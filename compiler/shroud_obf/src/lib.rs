//! Shroud Obfuscator
//!
//! Rewrites Python source so its identifiers, literals and module accesses
//! no longer read as what they are, while the program behaves the same.
//!
//! # Pipeline
//!
//! ```text
//! parse -> alias tables -> rewrite walk -> header prologue -> print -> verify
//! ```
//!
//! 1. [`lut`] scans the tree once per enabled category and gives every
//!    collected token a fresh `_0x<n>` alias.
//! 2. The rewrite walk (`dispatch` plus `rules`) replaces nodes in place.
//!    Synthesized text goes into `Raw` leaves that the printer emits verbatim.
//! 3. Rules that synthesize values register `alias = expression` pairs in a
//!    [`HeaderTable`], injected as a prologue once the walk is done.
//! 4. [`post::verify_header`] checks the printed text defines each header
//!    alias exactly once.
//!
//! # Example
//!
//! ```
//! use shroud_obf::{obfuscate, ObfuscateConfig};
//!
//! let config = ObfuscateConfig::disabled().with_rename_variables(true);
//! let output = obfuscate("total = 1\nprint(total)\n", &config).unwrap();
//! assert_eq!(output, "_0x4 = 1\nprint(_0x4)\n");
//! ```

mod config;
mod dispatch;
pub mod encode;
mod error;
pub mod header;
pub mod lut;
pub mod post;
mod rules;

pub use config::{Categories, ObfuscateConfig, StringMode};
pub use dispatch::Rewriter;
pub use error::ObfuscateError;
pub use header::{insert_statement_at, HeaderTable, Tier};
pub use lut::{build_alias_table, build_module_table, AliasTable, ModuleAliasTable, Token};

use shroud_ir::Module;

use crate::lut::{build_alias_table_with, ProgramFacts};

/// Obfuscate `source` in one call.
pub fn obfuscate(source: &str, config: &ObfuscateConfig) -> Result<String, ObfuscateError> {
    Obfuscator::new(config.clone()).run(source)
}

/// A configured obfuscation pipeline; every run starts from empty tables.
#[derive(Clone, Debug, Default)]
pub struct Obfuscator {
    config: ObfuscateConfig,
}

impl Obfuscator {
    pub fn new(config: ObfuscateConfig) -> Self {
        Obfuscator { config }
    }

    pub fn config(&self) -> &ObfuscateConfig {
        &self.config
    }

    /// Parse, rewrite and print `source`.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn run(&self, source: &str) -> Result<String, ObfuscateError> {
        let mut module = shroud_parse::parse(source)?;
        self.run_module(&mut module)
    }

    /// Rewrite an already parsed module in place and print it.
    pub fn run_module(&self, module: &mut Module) -> Result<String, ObfuscateError> {
        let categories = self.config.categories();
        let facts = ProgramFacts::scan(module);
        let table = build_alias_table_with(module, &facts, categories);
        let modules = if categories.contains(Categories::MODULES) {
            build_module_table(module)
        } else {
            ModuleAliasTable::default()
        };

        let mut rewriter = Rewriter::new(&self.config, &facts, &table, &modules);
        rewriter.rewrite_module(module)?;
        let header = rewriter.into_header();

        header::inject(module, &header);
        let text = shroud_fmt::print_module(module);
        post::verify_header(&text, &header)?;
        tracing::debug!(
            aliases = table.len(),
            modules = modules.len(),
            header = header.len(),
            "obfuscated"
        );
        Ok(text)
    }
}
