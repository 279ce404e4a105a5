//! Analysis Manifest
//!
//! Function argument layouts consumed by the encoder.

pub mod domain;
pub mod infrastructure;

pub use domain::{AnalysisManifest, ArgumentDescriptor, Direction, FunctionManifest, WidthHint};
pub use infrastructure::{load_manifest, parse_manifest, ManifestError};
