//! Command-line configuration.
//!
//! Flags use the `--name=value` form. Unknown or malformed values are
//! reported as warnings and leave the default in place.

use std::path::PathBuf;

use zeus_diagnostic::ColorMode;

/// Output path used when `compile` is given only an input.
pub const DEFAULT_OUTPUT: &str = "out.s";

/// Settings for one run of the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Worker threads for lexing and parsing imports (`--jobs`). One means
    /// everything runs on the calling thread.
    pub jobs: usize,
    /// Diagnostic coloring (`--color`).
    pub color: ColorMode,
    /// Program stack in KiB (`--stack-size`). Beats the entry file's
    /// `#stack_size` directive when set.
    pub stack_size: Option<u64>,
    pub output: PathBuf,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            jobs: 1,
            color: ColorMode::Auto,
            stack_size: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Flags and positional arguments of one command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: CompileOptions,
    pub positional: Vec<String>,
    /// Human-readable complaints about flags that were ignored.
    pub warnings: Vec<String>,
}

/// Split `args` (everything after the command name) into options and
/// positional arguments.
pub fn parse_args(args: &[String]) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();

    for arg in args {
        if let Some(jobs) = arg.strip_prefix("--jobs=") {
            match jobs.parse::<usize>() {
                Ok(n) if n > 0 => parsed.options.jobs = n,
                _ => parsed
                    .warnings
                    .push(format!("invalid job count '{jobs}', using 1")),
            }
        } else if let Some(color) = arg.strip_prefix("--color=") {
            match ColorMode::parse(color) {
                Some(mode) => parsed.options.color = mode,
                None => parsed.warnings.push(format!(
                    "unknown color mode '{color}', options: auto, always, never"
                )),
            }
        } else if let Some(size) = arg.strip_prefix("--stack-size=") {
            match size.parse::<u64>() {
                Ok(kb) if kb > 0 => parsed.options.stack_size = Some(kb),
                _ => parsed
                    .warnings
                    .push(format!("invalid stack size '{size}', expected KiB > 0")),
            }
        } else if arg.starts_with("--") {
            parsed.warnings.push(format!("unknown option '{arg}'"));
        } else {
            parsed.positional.push(arg.clone());
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults() {
        let parsed = parse_args(&args(&["main.zs"]));
        assert_eq!(parsed.options, CompileOptions::default());
        assert_eq!(parsed.positional, vec!["main.zs".to_string()]);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.options.output, PathBuf::from("out.s"));
    }

    #[test]
    fn flags_mix_with_positionals() {
        let parsed = parse_args(&args(&[
            "--jobs=4",
            "main.zs",
            "--color=never",
            "prog.s",
            "--stack-size=128",
        ]));
        assert_eq!(parsed.options.jobs, 4);
        assert_eq!(parsed.options.color, ColorMode::Never);
        assert_eq!(parsed.options.stack_size, Some(128));
        assert_eq!(
            parsed.positional,
            vec!["main.zs".to_string(), "prog.s".to_string()]
        );
    }

    #[test]
    fn bad_values_warn_and_keep_defaults() {
        let parsed = parse_args(&args(&[
            "--jobs=0",
            "--color=sometimes",
            "--stack-size=big",
            "--fast",
        ]));
        assert_eq!(parsed.options, CompileOptions::default());
        assert_eq!(parsed.warnings.len(), 4);
        assert_eq!(parsed.warnings[3], "unknown option '--fast'");
    }
}
