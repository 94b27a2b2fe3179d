// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration.

use ifc_export_core::FileHeader;

/// Export session configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Name of the project record.
    pub project_name: String,
    /// Description of the project record.
    pub project_description: Option<String>,
    /// File name written to the header.
    pub file_name: String,
    /// Author written to the header.
    pub author: String,
    /// Organization written to the header.
    pub organization: String,
    /// Originating system written to the header.
    pub originating_system: String,
    /// Fixed header timestamp; the export time is used when unset.
    pub timestamp: Option<String>,
    /// First record identifier.
    pub id_seed: u32,
    /// Sequential instead of random globally unique tags.
    pub deterministic_ids: bool,
    /// Precision of the geometric representation context.
    pub precision: f64,
    /// Names of the synthesized spatial containers.
    pub site_name: String,
    pub building_name: String,
    pub storey_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            project_name: "ifc-export".into(),
            project_description: Some("Exported by ifc-export".into()),
            file_name: "export.ifc".into(),
            author: String::new(),
            organization: String::new(),
            originating_system: "ifc-export".into(),
            timestamp: None,
            id_seed: 1,
            deterministic_ids: false,
            precision: 1e-5,
            site_name: "Site".into(),
            building_name: "Building".into(),
            storey_name: "Storey".into(),
        }
    }
}

impl ExportConfig {
    /// Defaults overridden by `IFC_EXPORT_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            project_name: var("IFC_EXPORT_PROJECT_NAME").unwrap_or(defaults.project_name),
            project_description: var("IFC_EXPORT_PROJECT_DESCRIPTION")
                .or(defaults.project_description),
            file_name: var("IFC_EXPORT_FILE_NAME").unwrap_or(defaults.file_name),
            author: var("IFC_EXPORT_AUTHOR").unwrap_or(defaults.author),
            organization: var("IFC_EXPORT_ORGANIZATION").unwrap_or(defaults.organization),
            originating_system: defaults.originating_system,
            timestamp: var("IFC_EXPORT_TIMESTAMP").or(defaults.timestamp),
            id_seed: var("IFC_EXPORT_ID_SEED")
                .and_then(|v| v.parse().ok())
                .filter(|&seed| seed > 0)
                .unwrap_or(defaults.id_seed),
            deterministic_ids: var("IFC_EXPORT_DETERMINISTIC")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.deterministic_ids),
            precision: var("IFC_EXPORT_PRECISION")
                .and_then(|v| v.parse().ok())
                .filter(|p: &f64| p.is_finite() && *p > 0.0)
                .unwrap_or(defaults.precision),
            site_name: defaults.site_name,
            building_name: defaults.building_name,
            storey_name: defaults.storey_name,
        }
    }

    /// Reproducible output: sequential tags and a fixed timestamp.
    pub fn deterministic(mut self, timestamp: impl Into<String>) -> Self {
        self.deterministic_ids = true;
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Header section for this configuration.
    pub fn header(&self) -> FileHeader {
        let mut header = FileHeader::new(self.file_name.as_str());
        header.time_stamp = self.timestamp.clone();
        header.author = self.author.clone();
        header.organization = self.organization.clone();
        header.originating_system = self.originating_system.clone();
        header
    }
}
