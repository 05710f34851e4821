//! legacy-objconv CLI
//!
//! Usage:
//!   legacy-objconv [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Converter settings (TOML format)
//!   --keep-legacy        Keep unconverted properties under `legacy`
//!   --lint               Report lint warnings on stderr
//!   -v, --verbose        Debug logging on stderr
//!   -f, --formats        Show input/output format reference
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use legacy_objconv::{convert_with_lint, ConvertConfig, ConvertError, Settings};

#[derive(Parser)]
#[command(name = "legacy-objconv")]
#[command(about = "Convert legacy monitoring object definitions to declarative object syntax")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Converter settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep properties without a counterpart under a nested `legacy` map
    #[arg(long)]
    keep_legacy: bool,

    /// Report unresolved parents, duplicates and dropped properties
    #[arg(long)]
    lint: bool,

    /// Debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Show input/output format reference
    #[arg(short, long)]
    formats: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.formats {
        print_formats();
        return;
    }

    // Load settings
    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = ConvertConfig::new()
        .with_settings(settings)
        .with_lint(cli.lint);
    if cli.keep_legacy {
        config = config.with_keep_legacy(true);
    }

    match convert_with_lint(&source, config) {
        Ok((output, warnings)) => {
            for warning in &warnings {
                tracing::warn!(category = %warning.category, "{}", warning.message);
            }
            let mut stdout = io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                eprintln!("Error writing output: {}", e);
                std::process::exit(1);
            }
        }
        Err(ConvertError::Parse(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_formats() {
    println!(
        r#"LEGACY-OBJCONV FORMATS
======================

INPUT
-----
define <type> {{
    <key> <value>
    ...
}}

Blank lines and lines starting with # are ignored, tabs count as spaces.
Every object needs a name: <type>_name, name, or for services
service_description together with host_name.

OUTPUT
------
[abstract] object <type> "<name>" [inherits "<p1>", "<p2>"] {{
	key = "value",
	key = 123,
	nested += {{
		inner = "value",
	}},
}}

CONVERSIONS
-----------
register 0          abstract
use a,b             inherits "a", "b"
command             abstract service template inheriting the bridge template
                    command_line -> check_command
*group              alias kept, members split on ','
service             check_command a!x!y -> inherits "a", macros ARG1/ARG2
                    check_interval/retry_interval minutes -> seconds
                    max_check_attempts -> integer
                    host_name -> host_name, macros.HOSTNAME
                    service_description -> alias
                    _CUSTOM -> macros._CUSTOM
other types         remaining properties kept as strings

SETTINGS (--config)
-------------------
[bridge]
name = "nagios-service"
check_type = "nagios"

[bridge.macros]
USER1 = "/tmp/nagios/plugins"

[output]
escape = "minimal"     # or "legacy"
keep_legacy = false"#
    );
}
