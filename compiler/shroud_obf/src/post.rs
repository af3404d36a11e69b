//! Header verification over the printed output.

use crate::header::HeaderTable;
use crate::ObfuscateError;

/// Check that every header alias is defined by exactly one top-level
/// `alias = ...` line of `text`.
#[tracing::instrument(level = "debug", skip_all, fields(entries = header.len()))]
pub fn verify_header(text: &str, header: &HeaderTable) -> Result<(), ObfuscateError> {
    for entry in header.iter() {
        let prefix = format!("{} = ", entry.alias);
        let found = text.lines().filter(|line| line.starts_with(&prefix)).count();
        if found != 1 {
            tracing::debug!(alias = %entry.alias, found, "header definition mismatch");
            return Err(ObfuscateError::PostProcessMismatch {
                alias: entry.alias.clone(),
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::header::Tier;

    fn header() -> HeaderTable {
        let mut header = HeaderTable::new();
        header.insert("_0x2", "x", Tier::Base);
        header
    }

    #[test]
    fn single_definition_passes() {
        assert_eq!(verify_header("_0x2 = (not())\nprint(_0x2)\n", &header()), Ok(()));
    }

    #[test]
    fn missing_definition_reported() {
        assert_eq!(
            verify_header("print(_0x2)\n", &header()),
            Err(ObfuscateError::PostProcessMismatch {
                alias: "_0x2".into(),
                found: 0
            })
        );
    }

    #[test]
    fn duplicate_definition_reported() {
        let err = verify_header("_0x2 = 1\n_0x2 = 2\n", &header()).unwrap_err();
        assert_eq!(
            err,
            ObfuscateError::PostProcessMismatch {
                alias: "_0x2".into(),
                found: 2
            }
        );
    }

    #[test]
    fn indented_and_prefixed_lines_do_not_count() {
        let text = "_0x2 = 1\n    _0x2 = 2\n_0x20 = 3\n";
        assert_eq!(verify_header(text, &header()), Ok(()));
    }
}
