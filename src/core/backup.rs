use std::{
    collections::{BTreeSet, HashSet},
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tempdir::TempDir;
use thiserror::Error;
use time::Date;
use zstd::stream::{read::Decoder as ZstdDecoder, write::Encoder as ZstdEncoder};

use crate::core::model::{Project, format_date};
use crate::core::template::default_steps;

pub const SCHEMA_VERSION: u64 = 1;
pub const MIME_TYPE: &str = "application/json";

const VERSION_FIELD: &str = "schemaVersion";
const PROJECTS_FIELD: &str = "projects";
const THEME_FIELD: &str = "theme";
const FAVORITES_FIELD: &str = "favorites";

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const ZSTD_LEVEL: i32 = 3;

/// Everything a backup carries, decoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Backup {
    pub projects: Vec<Project>,
    pub theme: String,
    pub favorites: BTreeSet<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDocument<'a> {
    schema_version: u64,
    projects: &'a [Project],
    theme: &'a str,
    favorites: &'a BTreeSet<String>,
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("malformed file: {0}")]
    MalformedFile(String),

    #[error("invalid backup format: {0}")]
    InvalidBackupFormat(String),

    #[error("unknown import error: {0}")]
    Unknown(String),
}

impl ImportError {
    /// Message suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            ImportError::MalformedFile(detail) => format!(
                "Import failed: the selected file could not be read as a backup, \
                 it is corrupt or not JSON ({detail})."
            ),
            ImportError::InvalidBackupFormat(detail) => {
                format!("Import failed: the file is not a valid backup ({detail}).")
            }
            ImportError::Unknown(detail) => {
                format!("Import failed with an unknown error: {detail}")
            }
        }
    }
}

/// Serialize the collection into the pretty-printed backup document.
pub fn export_json(
    projects: &[Project],
    theme: &str,
    favorites: &BTreeSet<String>,
) -> anyhow::Result<String> {
    let document = BackupDocument {
        schema_version: SCHEMA_VERSION,
        projects,
        theme,
        favorites,
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize backup document")
}

pub fn compress(json: &str) -> anyhow::Result<Vec<u8>> {
    let mut encoder =
        ZstdEncoder::new(Vec::new(), ZSTD_LEVEL).context("Failed to create zstd encoder")?;
    encoder
        .write_all(json.as_bytes())
        .context("Failed to compress backup")?;
    encoder.finish().context("Failed to finalize zstd stream")
}

fn decompress(bytes: &[u8]) -> Result<Vec<u8>, ImportError> {
    let mut decoder = ZstdDecoder::new(bytes)
        .map_err(|e| ImportError::MalformedFile(format!("invalid zstd stream: {e}")))?;
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| ImportError::MalformedFile(format!("invalid zstd stream: {e}")))?;
    Ok(out)
}

/// Decode a backup file. Nothing is applied anywhere; callers replace their
/// state with the returned value only on success.
pub fn import_bytes(bytes: &[u8]) -> Result<Backup, ImportError> {
    let decompressed;
    let bytes = if bytes.starts_with(&ZSTD_MAGIC) {
        decompressed = decompress(bytes)?;
        decompressed.as_slice()
    } else {
        bytes
    };

    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ImportError::MalformedFile(e.to_string()))?;
    let Value::Object(mut document) = value else {
        return Err(ImportError::InvalidBackupFormat(
            "top level is not an object".to_string(),
        ));
    };

    for field in [PROJECTS_FIELD, THEME_FIELD, FAVORITES_FIELD] {
        if !document.contains_key(field) {
            return Err(ImportError::InvalidBackupFormat(format!(
                "missing `{field}` field"
            )));
        }
    }

    if let Some(version) = document.remove(VERSION_FIELD) {
        match version.as_u64() {
            Some(v) if v <= SCHEMA_VERSION => {}
            Some(v) => {
                return Err(ImportError::InvalidBackupFormat(format!(
                    "schema version {v} is newer than supported version {SCHEMA_VERSION}"
                )));
            }
            None => {
                return Err(ImportError::InvalidBackupFormat(format!(
                    "`{VERSION_FIELD}` is not a positive integer"
                )));
            }
        }
    }

    let theme = match document.remove(THEME_FIELD) {
        Some(Value::String(theme)) => theme,
        _ => {
            return Err(ImportError::InvalidBackupFormat(format!(
                "`{THEME_FIELD}` is not a string"
            )));
        }
    };

    let favorites = match document.remove(FAVORITES_FIELD) {
        Some(Value::Array(ids)) => ids
            .into_iter()
            .map(|id| match id {
                Value::String(id) => Ok(id),
                other => Err(ImportError::InvalidBackupFormat(format!(
                    "favorite id {other} is not a string"
                ))),
            })
            .collect::<Result<BTreeSet<_>, _>>()?,
        _ => {
            return Err(ImportError::InvalidBackupFormat(format!(
                "`{FAVORITES_FIELD}` is not an array"
            )));
        }
    };

    let entries = match document.remove(PROJECTS_FIELD) {
        Some(Value::Array(entries)) => entries,
        _ => {
            return Err(ImportError::InvalidBackupFormat(format!(
                "`{PROJECTS_FIELD}` is not an array"
            )));
        }
    };

    for unknown in document.keys() {
        tracing::warn!(field = %unknown, "ignoring unknown backup field");
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut projects = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let project = reconstruct_project(entry)
            .map_err(|e| ImportError::Unknown(format!("project #{index}: {e}")))?;
        if !seen.insert(project.id.clone()) {
            return Err(ImportError::InvalidBackupFormat(format!(
                "duplicate project id `{}`",
                project.id
            )));
        }
        projects.push(project);
    }

    tracing::info!(
        projects = projects.len(),
        favorites = favorites.len(),
        %theme,
        "decoded backup"
    );
    Ok(Backup {
        projects,
        theme,
        favorites,
    })
}

fn reconstruct_project(entry: Value) -> Result<Project, serde_json::Error> {
    let mut project: Project = serde_json::from_value(entry)?;
    if project.steps.is_empty() {
        tracing::debug!(project = %project.id, "filling in default steps");
        project.steps = default_steps();
    }
    let orphaned = project.orphaned_feedback();
    if !orphaned.is_empty() {
        tracing::warn!(project = %project.id, ?orphaned, "feedback for unknown substeps");
    }
    Ok(project)
}

/// Read a whole backup file, then decode it.
pub async fn import_file<P: AsRef<Path>>(path: P) -> Result<Backup, ImportError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ImportError::Unknown(format!("failed to read {}: {e}", path.display())))?;
    import_bytes(&bytes)
}

/// `<prefix>_backup_<YYYY-MM-DD>.json`, with `.zst` appended when compressed.
pub fn backup_file_name(prefix: &str, date: Date, compressed: bool) -> anyhow::Result<String> {
    let extension = if compressed { "json.zst" } else { "json" };
    let stamp = format_date(date).with_context(|| format!("Failed to format date {date}"))?;
    Ok(format!("{prefix}_backup_{stamp}.{extension}"))
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub prefix: String,
    pub date: Date,
    pub compress: bool,
}

/// Write a backup into `dir` and return the path of the written file.
pub fn export_to_dir<P: AsRef<Path>>(
    dir: P,
    backup: &Backup,
    options: &ExportOptions,
) -> anyhow::Result<PathBuf> {
    let json = export_json(&backup.projects, &backup.theme, &backup.favorites)?;
    let bytes = if options.compress {
        compress(&json)?
    } else {
        json.into_bytes()
    };
    let file_name = backup_file_name(&options.prefix, options.date, options.compress)?;
    let path = dir.as_ref().join(file_name);
    write_staged(&path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        mime = MIME_TYPE,
        "exported backup"
    );
    Ok(path)
}

/// Write `bytes` to a staging directory beside `path`, then move the file
/// into place. The staging directory is removed on every exit path.
pub fn write_staged(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {:?}", parent))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("Path has no file name: {:?}", path))?;

    let staging = TempDir::new_in(parent, ".staging")
        .with_context(|| format!("Failed to create staging directory in {:?}", parent))?;
    let staged = staging.path().join(file_name);
    fs::write(&staged, bytes).with_context(|| format!("Failed to write {:?}", staged))?;
    fs::rename(&staged, path)
        .with_context(|| format!("Failed to move {:?} to {:?}", staged, path))?;
    Ok(())
}
