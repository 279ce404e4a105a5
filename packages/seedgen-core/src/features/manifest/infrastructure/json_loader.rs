//! Analysis manifest JSON loader
//!
//! ```json
//! [
//!   {
//!     "Function": "EfiPxeBcUdpRead",
//!     "Arguments": {
//!       "This":    { "arg_type": "EFI_PXE_BASE_CODE_PROTOCOL *", "arg_dir": "IN", "variable": "This" },
//!       "OpFlags": { "arg_type": "UINT16", "arg_dir": "IN" }
//!     }
//!   }
//! ]
//! ```
//!
//! Argument order is the JSON object order. Unknown keys are ignored.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::features::manifest::domain::{
    AnalysisManifest, ArgumentDescriptor, Direction, FunctionManifest,
};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed argument '{argument}' of '{function}': {source}")]
    Argument {
        function: String,
        argument: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "Function", default)]
    function: String,
    #[serde(rename = "Arguments", default)]
    arguments: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArgument {
    arg_type: String,
    arg_dir: String,
    variable: Option<String>,
}

/// Parse a manifest from JSON text
pub fn parse_manifest(json: &str) -> Result<AnalysisManifest, ManifestError> {
    let entries: Vec<RawEntry> = serde_json::from_str(json)?;
    let mut functions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.function.trim().is_empty() {
            warn!(entry = index, "Skipping manifest entry without a function name");
            continue;
        }

        let mut arguments = Vec::with_capacity(entry.arguments.len());
        for (name, value) in entry.arguments {
            let raw: RawArgument =
                serde_json::from_value(value).map_err(|source| ManifestError::Argument {
                    function: entry.function.clone(),
                    argument: name.clone(),
                    source,
                })?;

            let backing_variable = raw
                .variable
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| name.clone());
            arguments.push(ArgumentDescriptor::new(
                name,
                Direction::parse(&raw.arg_dir),
                raw.arg_type,
                backing_variable,
            ));
        }

        functions.push(FunctionManifest::new(entry.function, arguments));
    }

    debug!(functions = functions.len(), "Manifest parsed");
    Ok(AnalysisManifest::new(functions))
}

/// Read and parse a manifest file
pub fn load_manifest(path: impl AsRef<Path>) -> Result<AnalysisManifest, ManifestError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest(&json)
}
