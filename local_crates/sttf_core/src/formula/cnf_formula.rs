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
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as FmtWrite};
use std::io::Write;
use sttf_logic::{ClauseStatus, Expr, Literal, Model, VarId};

/// A clause identifier.
///
/// Identifiers are allocated by a [`CnfFormula`] in increasing order and are never reused.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ClauseId(usize);

impl From<usize> for ClauseId {
    fn from(u: usize) -> Self {
        ClauseId(u)
    }
}

impl From<ClauseId> for usize {
    fn from(c: ClauseId) -> Self {
        c.0
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A mutable CNF formula whose clauses are indexed by identifiers.
///
/// Besides its active clauses, the formula records the renamings, eliminations and substitutions applied to it.
/// Recording an elimination or a substitution does not remove any clause;
/// removing the clauses mentioning the variable is the responsibility of the caller.
///
/// Clauses are kept in identifier order, which is also their insertion order.
///
/// # Example
///
/// ```
/// use sttf_core::{CnfFormula, Literal};
///
/// let mut formula = CnfFormula::new();
/// let id = formula.add_clause(vec!["1".parse().unwrap(), "-2".parse().unwrap()]);
/// formula.rename_var(2.into(), 5.into());
/// assert_eq!("1 -5", formula.clause(id).unwrap().iter().map(Literal::to_string).collect::<Vec<_>>().join(" "));
/// assert_eq!("p cnf 5 1\n1 -5 0\n", formula.to_canonical_text());
/// ```
#[derive(Clone, Debug)]
pub struct CnfFormula {
    clauses: BTreeMap<ClauseId, Vec<Literal>>,
    next_clause_id: usize,
    renamings: FxHashMap<VarId, VarId>,
    eliminated: FxHashSet<VarId>,
    substitutions: FxHashMap<VarId, Expr>,
    declared_header: Option<(usize, usize)>,
}

/// The result of the evaluation of the clauses of a formula under a model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelCheck {
    /// The number of satisfied clauses.
    pub n_satisfied: usize,
    /// The number of clauses with no true literal and at least one unassigned variable.
    pub n_undetermined: usize,
    /// The identifiers of the falsified clauses.
    pub falsified: Vec<ClauseId>,
}

impl ModelCheck {
    /// Checks if every clause is satisfied.
    pub fn is_model(&self) -> bool {
        self.n_undetermined == 0 && self.falsified.is_empty()
    }
}

impl Default for CnfFormula {
    fn default() -> Self {
        CnfFormula::new()
    }
}

impl CnfFormula {
    /// Builds an empty formula; the first allocated clause identifier is 1.
    pub fn new() -> Self {
        CnfFormula {
            clauses: BTreeMap::new(),
            next_clause_id: 1,
            renamings: FxHashMap::default(),
            eliminated: FxHashSet::default(),
            substitutions: FxHashMap::default(),
            declared_header: None,
        }
    }

    /// Adds a clause under a freshly allocated identifier, and returns this identifier.
    pub fn add_clause(&mut self, literals: Vec<Literal>) -> ClauseId {
        let id = ClauseId(self.next_clause_id);
        self.next_clause_id += 1;
        self.clauses.insert(id, literals);
        id
    }

    /// Adds a clause under the given identifier.
    ///
    /// The identifier must be greater than all the identifiers allocated so far;
    /// the allocation counter then continues after it.
    pub fn insert_clause(&mut self, id: ClauseId, literals: Vec<Literal>) -> Result<ClauseId> {
        if id.0 < self.next_clause_id {
            return Err(TraceError::ClauseIdReused(id).into());
        }
        self.next_clause_id = id.0 + 1;
        self.clauses.insert(id, literals);
        Ok(id)
    }

    /// Removes an active clause, returning its literals.
    ///
    /// Removing an identifier which is not active does nothing and returns `None`.
    pub fn remove_clause(&mut self, id: ClauseId) -> Option<Vec<Literal>> {
        self.clauses.remove(&id)
    }

    /// Replaces the literals of an active clause, keeping its identifier and position.
    ///
    /// Returns `false` (and does nothing) if the identifier is not active.
    pub fn strengthen_clause(&mut self, id: ClauseId, literals: Vec<Literal>) -> bool {
        match self.clauses.get_mut(&id) {
            Some(c) => {
                *c = literals;
                true
            }
            None => false,
        }
    }

    /// Replaces each occurrence of a variable by another one in all the active clauses, keeping the polarities.
    pub fn rename_var(&mut self, old: VarId, new: VarId) {
        self.renamings.insert(old, new);
        for literals in self.clauses.values_mut() {
            for l in literals.iter_mut().filter(|l| l.var_id() == old) {
                *l = l.with_var_id(new);
            }
        }
    }

    /// Records a variable as eliminated.
    pub fn eliminate_var(&mut self, var_id: VarId) {
        self.eliminated.insert(var_id);
    }

    /// Records a variable as substituted by an expression; the variable is also recorded as eliminated.
    pub fn substitute_var(&mut self, var_id: VarId, expr: Expr) {
        self.substitutions.insert(var_id, expr);
        self.eliminated.insert(var_id);
    }

    /// Returns the identifiers of the active clauses containing a variable (in any polarity).
    pub fn clause_ids_with_var(&self, var_id: VarId) -> Vec<ClauseId> {
        self.clauses
            .iter()
            .filter(|(_, lits)| lits.iter().any(|l| l.var_id() == var_id))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Returns the literals of an active clause.
    pub fn clause(&self, id: ClauseId) -> Option<&[Literal]> {
        self.clauses.get(&id).map(Vec::as_slice)
    }

    /// Returns an iterator over the active clauses, in insertion order.
    pub fn iter_clauses(&self) -> impl Iterator<Item = (ClauseId, &[Literal])> + '_ {
        self.clauses.iter().map(|(id, lits)| (*id, lits.as_slice()))
    }

    /// Returns the number of active clauses.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the variables appearing in the active clauses.
    pub fn active_variables(&self) -> BTreeSet<VarId> {
        self.clauses
            .values()
            .flat_map(|lits| lits.iter().map(|l| l.var_id()))
            .collect()
    }

    /// Returns the greatest variable appearing in the active clauses, or 0 if there is none.
    pub fn max_active_var(&self) -> usize {
        self.clauses
            .values()
            .flat_map(|lits| lits.iter().map(|l| usize::from(l.var_id())))
            .max()
            .unwrap_or(0)
    }

    /// Returns the number of variables of the formula.
    ///
    /// This is the variable count announced by the header the formula was read from,
    /// unless an active clause uses a greater variable.
    pub fn n_vars(&self) -> usize {
        let declared = self.declared_header.map(|(n, _)| n).unwrap_or(0);
        usize::max(declared, self.max_active_var())
    }

    /// Returns the variable a variable was last renamed to, if any.
    pub fn renaming_of(&self, var_id: VarId) -> Option<VarId> {
        self.renamings.get(&var_id).copied()
    }

    /// Checks if a variable was recorded as eliminated (directly or through a substitution).
    pub fn is_eliminated(&self, var_id: VarId) -> bool {
        self.eliminated.contains(&var_id)
    }

    /// Returns the eliminated variables, sorted.
    pub fn eliminated_vars(&self) -> Vec<VarId> {
        let mut vars = self.eliminated.iter().copied().collect::<Vec<VarId>>();
        vars.sort_unstable();
        vars
    }

    /// Returns the expression a variable was substituted by, if any.
    pub fn substitution_of(&self, var_id: VarId) -> Option<&Expr> {
        self.substitutions.get(&var_id)
    }

    /// Returns the `(variables, clauses)` counts announced by the header this formula was read from, if any.
    pub fn declared_header(&self) -> Option<(usize, usize)> {
        self.declared_header
    }

    pub(crate) fn set_declared_header(&mut self, n_vars: usize, n_clauses: usize) {
        self.declared_header = Some((n_vars, n_clauses));
    }

    /// Evaluates each active clause under a (partial) model.
    pub fn check_model(&self, model: &Model) -> ModelCheck {
        let mut check = ModelCheck::default();
        for (id, lits) in self.clauses.iter() {
            match model.clause_status(lits) {
                ClauseStatus::Satisfied => check.n_satisfied += 1,
                ClauseStatus::Undetermined => check.n_undetermined += 1,
                ClauseStatus::Falsified => check.falsified.push(*id),
            }
        }
        check
    }

    /// Returns the canonical DIMACS text of the active clauses.
    ///
    /// The header is `p cnf <max active var> <active clause count>`,
    /// followed by one line per clause, in insertion order, each terminated by ` 0`.
    pub fn to_canonical_text(&self) -> String {
        self.to_text(self.max_active_var())
    }

    /// Returns the DIMACS text of the active clauses, with a header announcing [`n_vars`](Self::n_vars) variables.
    pub fn to_declared_text(&self) -> String {
        self.to_text(self.n_vars())
    }

    fn to_text(&self, n_vars: usize) -> String {
        let mut text = String::new();
        // writing into a String cannot fail
        let _ = self.write_fmt_with_header(&mut text, n_vars);
        text
    }

    fn write_fmt_with_header(&self, out: &mut String, n_vars: usize) -> fmt::Result {
        writeln!(out, "p cnf {} {}", n_vars, self.n_clauses())?;
        for lits in self.clauses.values() {
            let line = lits
                .iter()
                .map(Literal::to_string)
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(out, "{} 0", line)?;
        }
        Ok(())
    }

    /// Writes the canonical DIMACS text (see [`to_canonical_text`](Self::to_canonical_text)) to the provided writer.
    pub fn write_dimacs(&self, writer: &mut dyn Write) -> Result<()> {
        writer
            .write_all(self.to_canonical_text().as_bytes())
            .context("while writing a DIMACS formula")?;
        writer.flush().context("while writing a DIMACS formula")
    }
}
