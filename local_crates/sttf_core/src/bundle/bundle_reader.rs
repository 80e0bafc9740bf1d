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

use crate::{
    read_reconstruct_map, read_transform_log, CnfFormula, DimacsReader, FormulaMetadata, Manifest,
    ReverseRule, TraceError, TransformStep, TransformSummary,
};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// The file holding the formula before the transformation.
pub const ORIGINAL_FILE: &str = "original.cnf";
/// The file holding the formula after the transformation.
pub const SIMPLIFIED_FILE: &str = "simplified.cnf";
/// The file holding the transformation log.
pub const TRANSFORM_LOG_FILE: &str = "transform.log";
/// The file holding the reconstruction map.
pub const RECONSTRUCT_MAP_FILE: &str = "reconstruct.map";
/// The file holding the manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// The files every bundle must contain, in the order they are checked.
pub const REQUIRED_FILES: [&str; 5] = [
    ORIGINAL_FILE,
    SIMPLIFIED_FILE,
    TRANSFORM_LOG_FILE,
    RECONSTRUCT_MAP_FILE,
    MANIFEST_FILE,
];

/// A loaded bundle: the parsed transformation log, reconstruction map and manifest of a bundle directory.
///
/// The two formulas are not read at loading time; see [`read_original`](Self::read_original)
/// and [`read_simplified`](Self::read_simplified).
#[derive(Debug)]
pub struct Bundle {
    path: PathBuf,
    steps: Vec<TransformStep>,
    rules: Vec<ReverseRule>,
    manifest: Manifest,
}

impl Bundle {
    /// Checks that all the required files are present in a directory.
    ///
    /// The error names the first missing file.
    pub fn check_structure(path: &Path) -> Result<()> {
        for file in REQUIRED_FILES.iter() {
            let file_path = path.join(file);
            if !file_path.is_file() {
                return Err(TraceError::Structural(file_path).into());
            }
        }
        Ok(())
    }

    /// Loads a bundle directory.
    pub fn load(path: &Path) -> Result<Self> {
        Bundle::check_structure(path)?;
        let steps = read_transform_log(&read_file(&path.join(TRANSFORM_LOG_FILE))?)
            .context("while reading the transformation log")?;
        let rules = read_reconstruct_map(&read_file(&path.join(RECONSTRUCT_MAP_FILE))?)
            .context("while reading the reconstruction map")?;
        let manifest = Manifest::from_json(&read_file(&path.join(MANIFEST_FILE))?)
            .context("while reading the manifest")?;
        Ok(Bundle {
            path: path.to_path_buf(),
            steps,
            rules,
            manifest,
        })
    }

    /// Returns the bundle directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the steps of the transformation log.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Returns the rules of the reconstruction map.
    pub fn rules(&self) -> &[ReverseRule] {
        &self.rules
    }

    /// Returns the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Returns the text of the original formula.
    pub fn original_text(&self) -> Result<String> {
        read_file(&self.path.join(ORIGINAL_FILE))
    }

    /// Returns the text of the simplified formula.
    pub fn simplified_text(&self) -> Result<String> {
        read_file(&self.path.join(SIMPLIFIED_FILE))
    }

    /// Reads the original formula, passing the warnings of the DIMACS reader to the provided handler.
    pub fn read_original(&self, warning_handler: &mut dyn FnMut(usize, String)) -> Result<CnfFormula> {
        self.read_formula(ORIGINAL_FILE, warning_handler)
    }

    /// Reads the simplified formula, passing the warnings of the DIMACS reader to the provided handler.
    pub fn read_simplified(
        &self,
        warning_handler: &mut dyn FnMut(usize, String),
    ) -> Result<CnfFormula> {
        self.read_formula(SIMPLIFIED_FILE, warning_handler)
    }

    fn read_formula(
        &self,
        file: &str,
        warning_handler: &mut dyn FnMut(usize, String),
    ) -> Result<CnfFormula> {
        let path = self.path.join(file);
        let mut reader = File::open(&path)
            .with_context(|| format!("while opening file {}", path.display()))?;
        let mut dimacs_reader = DimacsReader::default();
        dimacs_reader.add_warning_handler(warning_handler);
        dimacs_reader
            .read(&mut reader)
            .with_context(|| format!("while reading file {}", path.display()))
    }

    /// Returns the summary of the transformation.
    pub fn summary(&self) -> TransformSummary {
        TransformSummary::new(&self.steps, &self.rules, &self.manifest)
    }

    /// Compares the sizes declared by the manifest with the actual formulas and the transformation log.
    ///
    /// Returns a message for each disagreement.
    pub fn manifest_mismatches(&self, original: &CnfFormula, simplified: &CnfFormula) -> Vec<String> {
        let mut mismatches = vec![];
        let mut check = |name: &str, declared: &FormulaMetadata, formula: &CnfFormula| {
            if declared.variables != formula.n_vars() as i64 {
                mismatches.push(format!(
                    "the manifest declares {} variable(s) for the {} formula, but it has {}",
                    declared.variables,
                    name,
                    formula.n_vars()
                ));
            }
            if declared.clauses != formula.n_clauses() as i64 {
                mismatches.push(format!(
                    "the manifest declares {} clause(s) for the {} formula, but it has {}",
                    declared.clauses,
                    name,
                    formula.n_clauses()
                ));
            }
        };
        check("original", &self.manifest.original, original);
        check("simplified", &self.manifest.simplified, simplified);
        if let Some(n) = self.manifest.transformation_steps {
            if n != self.steps.len() {
                mismatches.push(format!(
                    "the manifest declares {} transformation step(s), but the log has {}",
                    n,
                    self.steps.len()
                ));
            }
        }
        mismatches
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("while reading file {}", path.display()))
}
