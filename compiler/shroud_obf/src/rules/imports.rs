//! Import statement rules.

use shroud_ir::Alias;

use crate::config::Categories;
use crate::dispatch::Rewriter;

impl Rewriter<'_> {
    /// Drop the members of a whole-module import that became reflective.
    /// Returns `false` when no member is left.
    pub(crate) fn import(&self, names: &mut Vec<Alias>) -> bool {
        if !self.enabled(Categories::MODULES) {
            return true;
        }
        let before = names.len();
        names.retain(|alias| !self.modules.contains(alias.binding()));
        if names.len() != before {
            tracing::trace!(removed = before - names.len(), "import members removed");
        }
        !names.is_empty()
    }

    /// Bind imported names under their aliases; the module path stays.
    pub(crate) fn import_from(&self, module: Option<&str>, names: &mut [Alias]) {
        if module == Some("__future__") {
            return;
        }
        for alias in names {
            if alias.name == "*" {
                continue;
            }
            let mut binding = alias.binding().to_string();
            if self.rename_bare(&mut binding) {
                alias.asname = Some(binding);
            }
        }
    }
}
