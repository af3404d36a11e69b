//! Command line options.

use std::path::{Path, PathBuf};

use shroud_obf::ObfuscateConfig;

use crate::CliError;

pub const USAGE: &str = "\
Usage: shroud -i <file.py> [options]

Options:
  -i, --input <file>    Python file to obfuscate (required)
  -o, --output <file>   Output file (default: <input>_obf.py)
  -x, --variable        Rename variables
  -f, --function        Rename functions
  -c, --class           Rename classes
  -p, --pkg             Replace module imports with reflective lookups
  -n, --num             Encode numbers
  -s, --str             Encode strings
  -b, --enc             Build strings from character codes (shorter output)
  -v, --version         Print the version
  -h, --help            Print this help";

/// What the driver was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Obfuscate(Options),
}

/// A resolved obfuscation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: ObfuscateConfig,
}

/// Parse arguments, excluding the program name.
///
/// Every category starts off; each flag switches one on.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut config = ObfuscateConfig::disabled();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-i" | "--input" | "-o" | "--output" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(CliError::MissingValue(arg.to_string()));
                };
                let slot = if matches!(arg, "-i" | "--input") {
                    &mut input
                } else {
                    &mut output
                };
                *slot = Some(PathBuf::from(value));
                i += 1;
            }
            "-x" | "--variable" => config.rename_variables = true,
            "-f" | "--function" => config.rename_functions = true,
            "-c" | "--class" => config.rename_classes = true,
            "-p" | "--pkg" => config.encode_modules = true,
            "-n" | "--num" => config.encode_numbers = true,
            "-s" | "--str" => config.encode_strings = true,
            "-b" | "--enc" => config.reduce_string_length = true,
            _ => {
                if let Some(value) = arg.strip_prefix("--input=") {
                    input = Some(PathBuf::from(value));
                } else if let Some(value) = arg.strip_prefix("--output=") {
                    output = Some(PathBuf::from(value));
                } else {
                    return Err(CliError::UnknownArgument(arg.to_string()));
                }
            }
        }
        i += 1;
    }

    let input = input.ok_or(CliError::MissingInput)?;
    if input.extension().and_then(|ext| ext.to_str()) != Some("py") {
        return Err(CliError::NotPython(input));
    }
    let output = output.unwrap_or_else(|| default_output(&input));
    Ok(Command::Obfuscate(Options {
        input,
        output,
        config,
    }))
}

/// `dir/name.py` becomes `dir/name_obf.py`.
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_obf.py"))
}
