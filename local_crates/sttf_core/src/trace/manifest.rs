// sttf_core
// Copyright (C) 2021  Artois University and CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// Contributors:
//   *   CRIL - initial API and implementation

use crate::TraceError;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The version of the trace format written by this library.
pub const FORMAT_VERSION: &str = "1.0";

/// The tool which produced a bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub tool: String,
    pub version: String,
}

/// The size of a formula, as declared by a manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaMetadata {
    pub variables: i64,
    pub clauses: i64,
}

/// The metadata file of a bundle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub generator: GeneratorInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub original: FormulaMetadata,
    pub simplified: FormulaMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_steps: Option<usize>,
}

impl Manifest {
    /// Builds a manifest stamped with the current UTC time.
    pub fn new(
        tool: &str,
        tool_version: &str,
        original: FormulaMetadata,
        simplified: FormulaMetadata,
        transformation_steps: usize,
    ) -> Self {
        Manifest {
            version: FORMAT_VERSION.to_string(),
            generator: GeneratorInfo {
                tool: tool.to_string(),
                version: tool_version.to_string(),
            },
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
            original,
            simplified,
            transformation_steps: Some(transformation_steps),
        }
    }

    /// Parses and validates a manifest.
    ///
    /// Missing keys, values of the wrong type and non-positive formula sizes are reported as
    /// [`TraceError::ManifestValidation`].
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest = serde_json::from_str::<Manifest>(text)
            .map_err(|e| TraceError::ManifestValidation(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks that the four formula sizes are strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, meta) in [("original", &self.original), ("simplified", &self.simplified)].iter() {
            if meta.variables <= 0 || meta.clauses <= 0 {
                return Err(TraceError::ManifestValidation(format!(
                    "{} formula size must be positive (got {} variables and {} clauses)",
                    name, meta.variables, meta.clauses
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Returns the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("while serializing a manifest")
    }
}
