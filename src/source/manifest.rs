use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::AppResult;
use crate::routes::HandlerDeclaration;

/// On-disk shape of a declaration manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub handlers: Vec<HandlerDeclaration>,
}

/// Loads handler declarations from a JSON manifest, in document order.
pub fn load_manifest(path: &Path) -> AppResult<Vec<HandlerDeclaration>> {
    let content = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    Ok(manifest.handlers)
}
