//! Shroud command line driver.
//!
//! Reads one `.py` file, obfuscates it with the categories selected on the
//! command line and writes the result next to it (or to `-o`).

mod args;

use std::path::PathBuf;
use std::sync::Once;

use shroud_ir::LineIndex;
use shroud_obf::{ObfuscateError, Obfuscator};
use thiserror::Error;

pub use args::{default_output, parse_args, Command, Options, USAGE};

/// Everything that makes the driver exit with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing required argument -i/--input")]
    MissingInput,
    #[error("{0} expects a value")]
    MissingValue(String),
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
    #[error("only .py files can be obfuscated, got {}", .0.display())]
    NotPython(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A syntax error, already located as `file:line:col`.
    #[error("{location}: {message}")]
    Syntax { location: String, message: String },
    #[error(transparent)]
    Obfuscate(#[from] ObfuscateError),
}

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=shroud_obf=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Obfuscate `source`, locating syntax errors in `path`.
pub fn obfuscate_source(
    path: &std::path::Path,
    source: &str,
    options: &Options,
) -> Result<String, CliError> {
    Obfuscator::new(options.config.clone())
        .run(source)
        .map_err(|err| match err.as_parse() {
            Some(parse) => {
                let (line, col) = LineIndex::build(source).span_start(source, parse.span);
                CliError::Syntax {
                    location: format!("{}:{line}:{col}", path.display()),
                    message: parse.to_string(),
                }
            }
            None => CliError::Obfuscate(err),
        })
}

/// Read, obfuscate and write one file.
#[tracing::instrument(level = "debug", skip_all, fields(input = %options.input.display()))]
pub fn run(options: &Options) -> Result<(), CliError> {
    let source = std::fs::read_to_string(&options.input).map_err(|source| CliError::Read {
        path: options.input.clone(),
        source,
    })?;
    let output = obfuscate_source(&options.input, &source, options)?;
    std::fs::write(&options.output, output).map_err(|source| CliError::Write {
        path: options.output.clone(),
        source,
    })?;
    tracing::debug!(output = %options.output.display(), "written");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::path::Path;

    use shroud_obf::ObfuscateConfig;

    use super::*;

    fn options(config: ObfuscateConfig) -> Options {
        Options {
            input: PathBuf::from("prog.py"),
            output: PathBuf::from("prog_obf.py"),
            config,
        }
    }

    #[test]
    fn syntax_errors_carry_location() {
        let err = obfuscate_source(
            Path::new("prog.py"),
            "x = 1\ny = (\n",
            &options(ObfuscateConfig::default()),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("prog.py:"), "{message}");
        assert!(matches!(err, CliError::Syntax { .. }));
    }

    #[test]
    fn selected_passes_only() {
        let text = obfuscate_source(
            Path::new("prog.py"),
            "name = 'a'\n",
            &options(ObfuscateConfig::disabled().with_rename_variables(true)),
        )
        .unwrap();
        assert_eq!(text, "_0x4 = 'a'\n");
    }
}
