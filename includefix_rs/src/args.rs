use std::path::PathBuf;

use crate::types::{ColorMode, OutputMode};

pub struct ParsedArgs {
    /// Project root whose headers and sources are scanned and rewritten.
    pub root: PathBuf,
    /// Framework include tree; without it only the allow-list resolves
    /// framework includes.
    pub framework_root: Option<PathBuf>,
    /// Explicit config file path (default: `<root>/.incfix/config.toml`).
    pub config_path: Option<PathBuf>,
    /// Analyze and report without rewriting anything.
    pub dry_run: bool,
    pub color: ColorMode,
    pub output: OutputMode,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            framework_root: None,
            config_path: None,
            dry_run: false,
            color: ColorMode::Auto,
            output: OutputMode::Human,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

fn parse_color_mode(raw: &str) -> Result<ColorMode, String> {
    match raw {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err("--color expects auto|always|never".to_string()),
    }
}

pub fn parse_args() -> Result<ParsedArgs, String> {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();
    let mut roots: Vec<PathBuf> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => {
                parsed.show_help = true;
                i += 1;
            }
            "--version" | "-V" => {
                parsed.show_version = true;
                i += 1;
            }
            "--dry-run" | "-n" => {
                parsed.dry_run = true;
                i += 1;
            }
            "--json" => {
                parsed.output = OutputMode::Json;
                i += 1;
            }
            "--verbose" | "-v" => {
                parsed.verbose = true;
                i += 1;
            }
            "--qt" | "--framework" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("{arg} requires a path"));
                };
                parsed.framework_root = Some(PathBuf::from(value));
                i += 2;
            }
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--config requires a path".to_string());
                };
                parsed.config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--color" | "-c" => {
                if let Some(next) = args.get(i + 1) {
                    if !next.starts_with('-') {
                        parsed.color = parse_color_mode(next)?;
                        i += 2;
                        continue;
                    }
                }
                parsed.color = ColorMode::Always;
                i += 1;
            }
            _ if arg.starts_with("--color=") => {
                let value = arg.trim_start_matches("--color=");
                parsed.color = parse_color_mode(value)?;
                i += 1;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {arg}"));
            }
            _ => {
                roots.push(PathBuf::from(arg));
                i += 1;
            }
        }
    }

    match roots.len() {
        0 => {}
        1 => parsed.root = roots.remove(0),
        _ => return Err("expected at most one project root".to_string()),
    }

    Ok(parsed)
}
