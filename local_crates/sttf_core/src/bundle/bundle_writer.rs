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

use super::bundle_reader::{
    MANIFEST_FILE, ORIGINAL_FILE, RECONSTRUCT_MAP_FILE, SIMPLIFIED_FILE, TRANSFORM_LOG_FILE,
};
use crate::{
    ClauseId, CnfFormula, FormulaMetadata, Manifest, ReplayEngine, ReverseRule, Transform,
    TransformStep,
};
use anyhow::{Context, Result};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use sttf_logic::{Expr, Literal, VarId};

/// A builder recording the steps of a transformation, then writing the corresponding bundle.
///
/// Steps are numbered from 1. Renamings, eliminations and substitutions also record the reverse rule
/// needed to lift models, so that the written reconstruction map mirrors the log.
///
/// Clause identifiers given to the steps refer to the non-empty clauses of the original formula numbered from 1
/// in order, which is the numbering obtained when the written `original.cnf` is read back.
/// The simplified formula is computed by replaying the recorded log on this renumbered formula.
///
/// # Example
///
/// ```
/// use sttf_core::{BundleWriter, CnfFormula};
///
/// let mut original = CnfFormula::new();
/// for clause in &[vec![1, 2], vec![-1, 3], vec![-2, -3], vec![4]] {
///     original.add_clause(clause.iter().map(|l| l.to_string().parse().unwrap()).collect());
/// }
/// let mut writer = BundleWriter::new(original);
/// writer
///     .var_elim(4.into(), Some("pure_literal"))
///     .clause_remove(4.into(), Some("pure_literal_clause"))
///     .var_rename(3.into(), 5.into());
/// let dir = tempfile::tempdir().unwrap();
/// let manifest = writer.write(dir.path(), "example", "1.0").unwrap();
/// assert_eq!(3, manifest.simplified.clauses);
/// ```
#[derive(Debug)]
pub struct BundleWriter {
    original: CnfFormula,
    steps: Vec<TransformStep>,
    rules: Vec<ReverseRule>,
}

impl BundleWriter {
    /// Builds a writer for a transformation of the given formula.
    pub fn new(original: CnfFormula) -> Self {
        BundleWriter {
            original,
            steps: vec![],
            rules: vec![],
        }
    }

    fn push_step(&mut self, transform: Transform) -> &mut Self {
        let n = self.steps.len() + 1;
        self.steps.push(TransformStep {
            line: n,
            step: n,
            transform,
        });
        self
    }

    /// Records a renaming, and the rule mapping the new variable back to the old one.
    pub fn var_rename(&mut self, from: VarId, to: VarId) -> &mut Self {
        self.rules.push(ReverseRule::Rename { from: to, to: from });
        self.push_step(Transform::VarRename { from, to })
    }

    /// Records an elimination; the eliminated variable is restored as `false`.
    pub fn var_elim(&mut self, var: VarId, reason: Option<&str>) -> &mut Self {
        self.rules.push(ReverseRule::ConstElim { var, value: false });
        self.push_step(Transform::VarElim {
            var,
            reason: reason.map(str::to_string),
        })
    }

    /// Records a substitution; the substituted variable is restored by evaluating the expression.
    pub fn var_subst(&mut self, var: VarId, expr: Expr) -> &mut Self {
        self.rules.push(ReverseRule::ExprElim {
            var,
            expr: expr.clone(),
        });
        self.push_step(Transform::VarSubst { var, expr })
    }

    /// Records the removal of a clause.
    pub fn clause_remove(&mut self, id: ClauseId, reason: Option<&str>) -> &mut Self {
        self.push_step(Transform::ClauseRemove {
            id,
            reason: reason.map(str::to_string),
        })
    }

    /// Records the addition of a clause, which receives the next fresh identifier during replay.
    pub fn clause_add(&mut self, literals: Vec<Literal>, source: Option<&str>) -> &mut Self {
        self.push_step(Transform::ClauseAdd {
            literals,
            source: source.map(str::to_string),
        })
    }

    /// Records the replacement of the literals of a clause.
    pub fn clause_strengthen(&mut self, id: ClauseId, literals: Vec<Literal>) -> &mut Self {
        self.push_step(Transform::ClauseStrengthen { id, literals })
    }

    /// Records a derived unit literal; the formula is left unchanged.
    pub fn unit_derive(&mut self, literal: Literal, source: Option<ClauseId>) -> &mut Self {
        self.push_step(Transform::UnitDerive { literal, source })
    }

    /// Returns the recorded steps.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Returns the recorded reverse rules.
    pub fn rules(&self) -> &[ReverseRule] {
        &self.rules
    }

    /// Computes the simplified formula by replaying the recorded steps.
    pub fn simplified(&self) -> Result<CnfFormula> {
        self.replay(self.written_original())
    }

    fn replay(&self, original: CnfFormula) -> Result<CnfFormula> {
        ReplayEngine::default()
            .replay(original, &self.steps)
            .context("while computing the simplified formula")
    }

    // the original formula as read back from the bundle: empty clauses dropped, ids 1..n
    fn written_original(&self) -> CnfFormula {
        let clauses = self
            .original
            .iter_clauses()
            .filter(|(_, lits)| !lits.is_empty())
            .map(|(_, lits)| lits.to_vec())
            .collect::<Vec<Vec<Literal>>>();
        let mut formula = CnfFormula::new();
        formula.set_declared_header(self.original.n_vars(), clauses.len());
        for lits in clauses {
            formula.add_clause(lits);
        }
        formula
    }

    /// Writes the bundle into a directory (created if needed), and returns its manifest.
    ///
    /// Nothing is written if the manifest would be invalid, i.e. if one of the formulas has no variable or no clause.
    pub fn write(&self, dir: &Path, tool: &str, tool_version: &str) -> Result<Manifest> {
        let original = self.written_original();
        let simplified = self.replay(original.clone())?;
        let manifest = Manifest::new(
            tool,
            tool_version,
            FormulaMetadata {
                variables: original.n_vars() as i64,
                clauses: original.n_clauses() as i64,
            },
            FormulaMetadata {
                variables: simplified.max_active_var() as i64,
                clauses: simplified.n_clauses() as i64,
            },
            self.steps.len(),
        );
        manifest
            .validate()
            .context("while building the manifest of the bundle")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("while creating directory {}", dir.display()))?;
        let files = [
            (ORIGINAL_FILE, original.to_declared_text()),
            (SIMPLIFIED_FILE, simplified.to_canonical_text()),
            (TRANSFORM_LOG_FILE, lines_of(&self.steps)),
            (RECONSTRUCT_MAP_FILE, lines_of(&self.rules)),
            (MANIFEST_FILE, manifest.to_json()?),
        ];
        for (name, content) in files.iter() {
            let path = dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("while writing file {}", path.display()))?;
        }
        Ok(manifest)
    }
}

fn lines_of<T: Display>(items: &[T]) -> String {
    items.iter().map(|i| format!("{}\n", i)).collect()
}
