// Copyright (c) 2026, Carta contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Map document serialization and deserialization.
//!
//! This module handles exporting and importing map documents in YAML
//! and JSON formats.

use crate::models::document::MapDocument;
use anyhow::{bail, Result};
use std::path::Path;

/// Export a map document to YAML format.
pub fn export_yaml(doc: &MapDocument, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(doc)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a map document to JSON format.
pub fn export_json(doc: &MapDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a map document from YAML format.
pub fn import_yaml(path: &Path) -> Result<MapDocument> {
    let yaml = std::fs::read_to_string(path)?;
    let doc = serde_yaml::from_str(&yaml)?;
    Ok(doc)
}

/// Import a map document from JSON format.
pub fn import_json(path: &Path) -> Result<MapDocument> {
    let json = std::fs::read_to_string(path)?;
    let doc = serde_json::from_str(&json)?;
    Ok(doc)
}

/// Export to JSON or YAML depending on the path extension.
pub fn export_document(doc: &MapDocument, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(doc, path),
        Some("json") => export_json(doc, path),
        other => bail!("unsupported file extension: {:?}", other),
    }
}

/// Import from JSON or YAML depending on the path extension.
pub fn import_document(path: &Path) -> Result<MapDocument> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => bail!("unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feature::{Feature, FeatureKind, MapPoint};

    #[test]
    fn test_export_import_json() {
        let mut doc = MapDocument::new("harbour".to_string());
        let mut f = Feature::new("pier 1".to_string(), FeatureKind::LineString);
        f.add_vertex(MapPoint::new(1.0, 2.0));
        f.add_vertex(MapPoint::new(3.0, 4.0));
        doc.add_feature(f);

        let path = std::env::temp_dir().join("carta-serialization-test.json");
        export_document(&doc, &path).unwrap();
        let loaded = import_document(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "harbour");
        assert_eq!(loaded.layers[0].features[0].name, "pier 1");
        assert_eq!(loaded.layers[0].features[0].vertex_count(), 2);
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        let doc = MapDocument::new("x".to_string());
        let path = std::env::temp_dir().join("carta-serialization-test.txt");
        assert!(export_document(&doc, &path).is_err());
    }
}
