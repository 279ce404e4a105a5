pub mod json_loader;

pub use json_loader::{load_manifest, parse_manifest, ManifestError};
