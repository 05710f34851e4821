//! legacy-objconv - converts legacy monitoring object definitions
//!
//! This library reads Nagios-style `define <type> { key value }` blocks and
//! re-emits them as declarative `object` statements with `inherits` lists and
//! nested value literals.
//!
//! # Example
//!
//! ```rust
//! use legacy_objconv::convert;
//!
//! let output = convert("define host {\n  host_name router1\n}\n").unwrap();
//! assert!(output.contains(r#"object host "router1""#));
//! ```

pub mod emitter;
pub mod error;
pub mod lint;
pub mod parser;
pub mod settings;
pub mod transform;

pub use emitter::EscapePolicy;
pub use error::ParseError;
pub use lint::{LintCategory, LintWarning};
pub use parser::{parse, Record, RecordReader};
pub use settings::{Settings, SettingsError};
pub use transform::{ConversionContext, Object, TransformError, Value, ValueMap};

use std::io::BufRead;

use thiserror::Error;

use emitter::ObjectWriter;

/// Errors that can occur during the conversion pipeline
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error while reading records
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error while converting a record
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Configuration for the complete conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Bridge template, escaping and legacy retention
    pub settings: Settings,
    /// Compute lint warnings after converting
    pub lint: bool,
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the converter settings
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the string escaping policy
    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.settings.escape = escape;
        self
    }

    /// Keep unconverted properties under a nested `legacy` map
    pub fn with_keep_legacy(mut self, keep_legacy: bool) -> Self {
        self.settings.keep_legacy = keep_legacy;
        self
    }

    /// Enable or disable lint warnings
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Result of a complete, successful conversion
#[derive(Debug)]
pub struct Conversion {
    /// The emitted document
    pub output: String,
    /// Number of emitted statements, bridge template included
    pub statements: usize,
    /// Registry of every converted object
    pub context: ConversionContext,
}

/// Convert legacy definitions with default configuration
///
/// This is the main entry point for the library. The whole input is
/// converted before anything is returned, so an error never yields
/// partial output.
///
/// # Example
///
/// ```rust
/// use legacy_objconv::convert;
///
/// let output = convert(r#"
/// define service {
///     host_name           router1
///     service_description Ping
///     check_command       check_ping!100.0,20%!500.0,60%
///     check_interval      5
/// }
/// "#).unwrap();
///
/// assert!(output.contains(r#"object service "Ping-router1" inherits "check_ping""#));
/// assert!(output.contains("check_interval = 300,"));
/// ```
pub fn convert(source: &str) -> Result<String, ConvertError> {
    convert_with_config(source, ConvertConfig::default())
}

/// Convert legacy definitions with custom configuration
///
/// # Example
///
/// ```rust
/// use legacy_objconv::{convert_with_config, ConvertConfig, EscapePolicy};
///
/// let config = ConvertConfig::new().with_escape(EscapePolicy::Legacy);
/// let output = convert_with_config("define host {\n host_name a\n notes x_y\n}\n", config).unwrap();
/// assert!(output.contains(r#"notes = "x\_y","#));
/// ```
pub fn convert_with_config(source: &str, config: ConvertConfig) -> Result<String, ConvertError> {
    Ok(convert_reader(source.as_bytes(), &config)?.output)
}

/// Convert and return lint warnings alongside the output
///
/// Warnings are only computed when `config.lint` is set.
pub fn convert_with_lint(
    source: &str,
    config: ConvertConfig,
) -> Result<(String, Vec<LintWarning>), ConvertError> {
    let conversion = convert_reader(source.as_bytes(), &config)?;
    let warnings = if config.lint {
        lint::check(&conversion.context)
    } else {
        Vec::new()
    };
    Ok((conversion.output, warnings))
}

/// Convert records read lazily from any buffered reader
pub fn convert_reader<R: BufRead>(reader: R, config: &ConvertConfig) -> Result<Conversion, ConvertError> {
    let settings = &config.settings;
    let mut context = ConversionContext::new();
    let mut writer = ObjectWriter::new(settings.escape);

    let bridge = settings.bridge.to_object();
    context.register(&bridge, 0);
    writer.write_object(&bridge);

    for record in RecordReader::new(reader) {
        let record = record?;
        let object = transform::transform(&record, settings, &mut context)?;
        writer.write_object(&object);
    }

    tracing::debug!(statements = writer.count(), "conversion finished");
    Ok(Conversion {
        statements: writer.count(),
        output: writer.finish(),
        context,
    })
}
