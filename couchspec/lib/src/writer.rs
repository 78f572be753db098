//! Serialization and persistence of the generated document.
//!
//! YAML support is the `yaml` cargo feature (on by default). A YAML request
//! on a build without it falls back to JSON instead of failing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use strum::{Display, EnumString};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::PersistenceError;
use crate::openapi::OpenApiDocument;

/// Output format for the generated document.
///
/// ## Examples
///
/// ```
/// use couchspec::writer::OutputFormat;
///
/// assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
/// assert_eq!("yaml-like".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
/// assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum OutputFormat {
    #[default]
    #[strum(serialize = "json")]
    Json,
    #[strum(to_string = "yaml", serialize = "yaml-like")]
    Yaml,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Outcome of a successful [`save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Path actually written.
    pub path: PathBuf,
    /// Format actually written.
    pub format: OutputFormat,
    /// `true` when YAML was requested but JSON was written.
    pub fell_back: bool,
}

/// Whether this build includes the YAML encoder.
pub fn yaml_encoder_available() -> bool {
    cfg!(feature = "yaml")
}

/// Adjusts the file extension to match the format actually written.
///
/// For YAML a `.json` extension becomes `.yaml`. A `.yaml` or `.yml`
/// extension becomes `.json` only when a YAML request `fell_back` to JSON;
/// an explicit JSON request keeps the path it was given.
///
/// ## Examples
///
/// ```
/// use std::path::Path;
/// use couchspec::writer::{resolve_output_path, OutputFormat};
///
/// let yaml = resolve_output_path(Path::new("couchdb-openapi.json"), OutputFormat::Yaml, false);
/// assert_eq!(yaml, Path::new("couchdb-openapi.yaml"));
///
/// let explicit = resolve_output_path(Path::new("api.yaml"), OutputFormat::Json, false);
/// assert_eq!(explicit, Path::new("api.yaml"));
///
/// let fallback = resolve_output_path(Path::new("api.yaml"), OutputFormat::Json, true);
/// assert_eq!(fallback, Path::new("api.json"));
/// ```
pub fn resolve_output_path(requested: &Path, format: OutputFormat, fell_back: bool) -> PathBuf {
    let extension = requested.extension().and_then(|e| e.to_str());

    match (format, extension) {
        (OutputFormat::Yaml, Some("json")) => requested.with_extension("yaml"),
        (OutputFormat::Json, Some("yaml" | "yml")) if fell_back => {
            requested.with_extension("json")
        }
        _ => requested.to_path_buf(),
    }
}

/// Encodes the document as text.
///
/// JSON is pretty-printed with two-space indentation, non-ASCII text kept
/// verbatim and a trailing newline.
///
/// ## Errors
///
/// Returns a serialization error, or [`PersistenceError::EncoderUnavailable`]
/// for YAML when the `yaml` feature is disabled.
pub fn encode(document: &OpenApiDocument, format: OutputFormat) -> Result<String, PersistenceError> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(document).map_err(PersistenceError::Json)?;
            text.push('\n');
            Ok(text)
        }
        #[cfg(feature = "yaml")]
        OutputFormat::Yaml => serde_yaml::to_string(document).map_err(PersistenceError::Yaml),
        #[cfg(not(feature = "yaml"))]
        OutputFormat::Yaml => Err(PersistenceError::EncoderUnavailable { format: "yaml" }),
    }
}

/// Encodes and writes the document, falling back to JSON when YAML is
/// requested but not compiled in.
///
/// ## Errors
///
/// Returns [`PersistenceError::Write`] if the file cannot be written.
pub fn save(
    document: &OpenApiDocument,
    requested: &Path,
    format: OutputFormat,
) -> Result<SaveReport, PersistenceError> {
    save_with(document, requested, format, yaml_encoder_available())
}

fn save_with(
    document: &OpenApiDocument,
    requested: &Path,
    format: OutputFormat,
    yaml_available: bool,
) -> Result<SaveReport, PersistenceError> {
    let (format, fell_back) = match format {
        OutputFormat::Yaml if !yaml_available => {
            warn!("YAML encoder not compiled in; writing JSON instead");
            (OutputFormat::Json, true)
        }
        other => (other, false),
    };

    let path = resolve_output_path(requested, format, fell_back);
    let content = encode(document, format)?;
    write_atomic(&path, &content)?;

    info!(path = %path.display(), %format, bytes = content.len(), "OpenAPI document written");

    Ok(SaveReport {
        path,
        format,
        fell_back,
    })
}

/// Writes `content` to a uniquely named temp file in the target directory
/// and renames it over `path`, creating parent directories first.
///
/// The temp file is removed if the rename fails.
///
/// ## Errors
///
/// Returns [`PersistenceError::Write`] naming the path that failed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PersistenceError> {
    let write_error = |path: &Path| {
        let path = path.display().to_string();
        move |source| PersistenceError::Write { path, source }
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error(parent))?;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(write_error(parent))?;
    temp_file
        .write_all(content.as_bytes())
        .and_then(|()| temp_file.as_file().sync_all())
        .map_err(write_error(temp_file.path()))?;

    temp_file
        .persist(path)
        .map_err(|e| write_error(path)(e.error))?;

    Ok(())
}
