//! Obfuscation settings.

use bitflags::bitflags;

bitflags! {
    /// Which token categories feed the alias table.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Categories: u8 {
        const VARIABLES = 1 << 0;
        const FUNCTIONS = 1 << 1;
        const CLASSES = 1 << 2;
        const MODULES = 1 << 3;
        const NUMBERS = 1 << 4;
        const STRINGS = 1 << 5;
    }
}

/// How string literals are rebuilt.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StringMode {
    /// One escape sequence per character, in place.
    Direct,
    /// `str().join(map(chr, [...]))` over per-codepoint header aliases.
    Reduced,
}

/// Independently togglable passes.
///
/// The default enables everything except `reduce_string_length`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObfuscateConfig {
    pub rename_variables: bool,
    pub rename_functions: bool,
    pub rename_classes: bool,
    pub encode_modules: bool,
    pub encode_numbers: bool,
    pub encode_strings: bool,
    pub reduce_string_length: bool,
}

impl Default for ObfuscateConfig {
    fn default() -> Self {
        ObfuscateConfig {
            rename_variables: true,
            rename_functions: true,
            rename_classes: true,
            encode_modules: true,
            encode_numbers: true,
            encode_strings: true,
            reduce_string_length: false,
        }
    }
}

impl ObfuscateConfig {
    /// Every pass off: the output only re-prints the input.
    pub fn disabled() -> Self {
        ObfuscateConfig {
            rename_variables: false,
            rename_functions: false,
            rename_classes: false,
            encode_modules: false,
            encode_numbers: false,
            encode_strings: false,
            reduce_string_length: false,
        }
    }

    #[must_use]
    pub fn with_rename_variables(mut self, on: bool) -> Self {
        self.rename_variables = on;
        self
    }

    #[must_use]
    pub fn with_rename_functions(mut self, on: bool) -> Self {
        self.rename_functions = on;
        self
    }

    #[must_use]
    pub fn with_rename_classes(mut self, on: bool) -> Self {
        self.rename_classes = on;
        self
    }

    #[must_use]
    pub fn with_encode_modules(mut self, on: bool) -> Self {
        self.encode_modules = on;
        self
    }

    #[must_use]
    pub fn with_encode_numbers(mut self, on: bool) -> Self {
        self.encode_numbers = on;
        self
    }

    #[must_use]
    pub fn with_encode_strings(mut self, on: bool) -> Self {
        self.encode_strings = on;
        self
    }

    #[must_use]
    pub fn with_reduce_string_length(mut self, on: bool) -> Self {
        self.reduce_string_length = on;
        self
    }

    pub fn categories(&self) -> Categories {
        let mut categories = Categories::empty();
        categories.set(Categories::VARIABLES, self.rename_variables);
        categories.set(Categories::FUNCTIONS, self.rename_functions);
        categories.set(Categories::CLASSES, self.rename_classes);
        categories.set(Categories::MODULES, self.encode_modules);
        categories.set(Categories::NUMBERS, self.encode_numbers);
        categories.set(Categories::STRINGS, self.encode_strings);
        categories
    }

    pub fn string_mode(&self) -> StringMode {
        if self.reduce_string_length {
            StringMode::Reduced
        } else {
            StringMode::Direct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_all_but_length_reduction() {
        let config = ObfuscateConfig::default();
        assert_eq!(config.categories(), Categories::all());
        assert_eq!(config.string_mode(), StringMode::Direct);
    }

    #[test]
    fn setters_toggle_single_categories() {
        let config = ObfuscateConfig::disabled()
            .with_encode_numbers(true)
            .with_rename_classes(true)
            .with_reduce_string_length(true);
        assert_eq!(
            config.categories(),
            Categories::NUMBERS | Categories::CLASSES
        );
        assert_eq!(config.string_mode(), StringMode::Reduced);
        assert!(ObfuscateConfig::disabled().categories().is_empty());
    }
}
