//! Rewrite rules, one per node kind and context.
//!
//! Rules are methods on `Rewriter` and read its tables directly.
//!
//! | Node | Rule |
//! |------|------|
//! | string constant, f-string literal segment | `literals` |
//! | bool, int and float constants | `literals` |
//! | bare names, definitions, parameters, keyword names | `names` |
//! | attribute names, call targets | `names` |
//! | module attributes, built-in calls | `reflect` |
//! | `import`, `from ... import` | `imports` |
//! | `case` patterns | `patterns` |

mod imports;
mod literals;
mod names;
mod patterns;
mod reflect;

/// Who a call's keyword arguments belong to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallContext {
    /// The callee is defined by the program, so its parameter names are
    /// renamed with it.
    UserCall,
    /// Built-ins, module members and anything unknown; keyword names stay.
    ExternalCall,
}

#[cfg(test)]
mod tests;
