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

//! The interpreter applying a transformation log to a formula.

use crate::{
    read_transform_log, ClauseId, CnfFormula, DimacsReader, TraceError, Transform, TransformStep,
};
use anyhow::{Context, Result};
use sttf_logic::VarId;

/// Replays the steps of a transformation log on a formula, in log order.
///
/// A failing step aborts the replay; the formula is consumed by the replay, so that no half-transformed
/// formula can be observed after an error.
///
/// By default, removing or strengthening a clause which is not active is a no-op reported to the warning handlers.
/// In strict mode, it is a [`TraceError::MissingClause`] error.
///
/// Step numbers are advisory: a step whose number is not greater than the one of the previous step
/// is reported to the warning handlers, and applied anyway.
///
/// # Example
///
/// ```
/// use sttf_core::ReplayEngine;
///
/// let original = "p cnf 4 4\n1 2 0\n-1 3 0\n-2 -3 0\n4 0\n";
/// let log = "1 var_elim 4 pure_literal\n2 clause_remove 4\n3 var_rename 3 5\n";
/// let formula = ReplayEngine::default().replay_text(original, log).unwrap();
/// assert_eq!("p cnf 5 3\n1 2 0\n-1 5 0\n-2 -5 0\n", formula.to_canonical_text());
/// ```
#[derive(Default)]
pub struct ReplayEngine<'a> {
    strict: bool,
    warning_handlers: Vec<&'a mut dyn FnMut(usize, String)>,
}

impl<'a> ReplayEngine<'a> {
    /// Sets whether steps targeting inactive clauses must be rejected.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Adds a function called each time a warning is raised; it receives the log line number and the warning message.
    ///
    /// Warnings of the DIMACS reader used by [`replay_text`](Self::replay_text) are not forwarded.
    pub fn add_warning_handler(&mut self, h: &'a mut dyn FnMut(usize, String)) {
        self.warning_handlers.push(h);
    }

    fn warn(&mut self, line: usize, message: String) {
        for h in self.warning_handlers.iter_mut() {
            (h)(line, message.clone());
        }
    }

    /// Applies the steps to the formula, and returns the transformed formula.
    pub fn replay(&mut self, mut formula: CnfFormula, steps: &[TransformStep]) -> Result<CnfFormula> {
        let mut previous_step = None;
        for step in steps {
            if let Some(p) = previous_step {
                if step.step <= p {
                    self.warn(
                        step.line,
                        format!("step number {} does not follow step number {}", step.step, p),
                    );
                }
            }
            previous_step = Some(step.step);
            self.apply(&mut formula, step).with_context(|| {
                format!("while applying step {} at line {}", step.step, step.line)
            })?;
        }
        Ok(formula)
    }

    /// Reads a DIMACS formula and a transformation log, then replays the log on the formula.
    ///
    /// The whole log is parsed before the replay begins.
    pub fn replay_text(&mut self, original: &str, log: &str) -> Result<CnfFormula> {
        let formula = DimacsReader::default()
            .read(&mut original.as_bytes())
            .context("while reading the original formula")?;
        let steps = read_transform_log(log).context("while reading the transformation log")?;
        self.replay(formula, &steps)
    }

    fn apply(&mut self, formula: &mut CnfFormula, step: &TransformStep) -> Result<()> {
        match &step.transform {
            Transform::VarRename { from, to } => formula.rename_var(*from, *to),
            Transform::VarElim { var, .. } => {
                formula.eliminate_var(*var);
                remove_clauses_with_var(formula, *var);
            }
            Transform::VarSubst { var, expr } => {
                formula.substitute_var(*var, expr.clone());
                remove_clauses_with_var(formula, *var);
            }
            Transform::ClauseRemove { id, .. } => {
                if formula.remove_clause(*id).is_none() {
                    self.missing_clause(step, *id)?;
                }
            }
            Transform::ClauseAdd { literals, .. } => {
                formula.add_clause(literals.clone());
            }
            Transform::ClauseStrengthen { id, literals } => {
                if !formula.strengthen_clause(*id, literals.clone()) {
                    self.missing_clause(step, *id)?;
                }
            }
            Transform::UnitDerive { literal, .. } => {
                formula.add_clause(vec![*literal]);
            }
        }
        Ok(())
    }

    fn missing_clause(&mut self, step: &TransformStep, id: ClauseId) -> Result<()> {
        if self.strict {
            return Err(TraceError::MissingClause(id).into());
        }
        self.warn(
            step.line,
            format!(
                "{} ignored: no active clause with id {}",
                step.transform.opcode(),
                id
            ),
        );
        Ok(())
    }
}

fn remove_clauses_with_var(formula: &mut CnfFormula, var: VarId) {
    for id in formula.clause_ids_with_var(var) {
        formula.remove_clause(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use std::collections::BTreeSet;

    const ORIGINAL: &str = "p cnf 4 4\n1 2 0\n-1 3 0\n-2 -3 0\n4 0\n";

    const COMPLEX_ORIGINAL: &str =
        "p cnf 8 8\n1 2 3 0\n-1 4 0\n-2 5 0\n-3 6 0\n7 8 0\n-4 -5 6 0\n-6 7 0\n-7 -8 0\n";

    const COMPLEX_LOG: &str = "1 var_subst 8 = NOT(7)
2 clause_remove 5 substitution
3 clause_remove 8 substitution
4 var_elim 4 pure_literal
5 clause_remove 2 pure_literal_clause
6 clause_strengthen 6 [-5 6]
";

    fn assert_err_message(expected_chain: Vec<&'static str>, actual: Error) {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(expected_chain, error_chain);
    }

    fn replay_with_warnings(
        original: &str,
        log: &str,
        strict: bool,
    ) -> (Result<CnfFormula>, Vec<(usize, String)>) {
        let mut warnings = vec![];
        let mut handler = |line, message| warnings.push((line, message));
        let mut engine = ReplayEngine::default();
        engine.set_strict(strict);
        engine.add_warning_handler(&mut handler);
        let result = engine.replay_text(original, log);
        drop(engine);
        (result, warnings)
    }

    #[test]
    fn test_simple_scenario() {
        let log = "1 var_elim 4 pure_literal\n2 clause_remove 4 pure_literal_clause\n3 var_rename 3 5\n";
        let (result, warnings) = replay_with_warnings(ORIGINAL, log, false);
        let formula = result.unwrap();
        let expected = vec![1, 2, 5]
            .into_iter()
            .map(VarId::from)
            .collect::<BTreeSet<VarId>>();
        assert_eq!(expected, formula.active_variables());
        assert!(formula.clause_ids_with_var(4.into()).is_empty());
        assert!(formula.clause_ids_with_var(3.into()).is_empty());
        assert!(formula.is_eliminated(4.into()));
        assert_eq!(Some(VarId::from(5)), formula.renaming_of(3.into()));
        // the clause of variable 4 was already removed by the elimination
        assert_eq!(
            vec![(
                2,
                "clause_remove ignored: no active clause with id 4".to_string()
            )],
            warnings
        );
    }

    #[test]
    fn test_replay_is_deterministic() {
        let first = ReplayEngine::default()
            .replay_text(COMPLEX_ORIGINAL, COMPLEX_LOG)
            .unwrap()
            .to_canonical_text();
        for _ in 0..3 {
            assert_eq!(
                first,
                ReplayEngine::default()
                    .replay_text(COMPLEX_ORIGINAL, COMPLEX_LOG)
                    .unwrap()
                    .to_canonical_text()
            );
        }
    }

    #[test]
    fn test_complex_scenario() {
        let (result, warnings) = replay_with_warnings(COMPLEX_ORIGINAL, COMPLEX_LOG, false);
        let formula = result.unwrap();
        assert_eq!(
            "p cnf 7 4\n1 2 3 0\n-2 5 0\n-3 6 0\n-6 7 0\n",
            formula.to_canonical_text()
        );
        assert_eq!("NOT(7)", formula.substitution_of(8.into()).unwrap().source());
        assert_eq!(
            vec![2, 3, 5, 6],
            warnings.iter().map(|(l, _)| *l).collect::<Vec<usize>>()
        );
        assert_eq!(
            "clause_strengthen ignored: no active clause with id 6",
            warnings[3].1
        );
    }

    #[test]
    fn test_strict_mode_rejects_missing_clauses() {
        let (result, warnings) = replay_with_warnings(COMPLEX_ORIGINAL, COMPLEX_LOG, true);
        let err = result.unwrap_err();
        assert_eq!(
            Some(&TraceError::MissingClause(ClauseId::from(5))),
            err.downcast_ref::<TraceError>()
        );
        assert_err_message(
            vec![
                "while applying step 2 at line 2",
                "no active clause with id 5",
            ],
            err,
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_clause_add_and_unit_derive_use_fresh_ids() {
        let log = "1 clause_remove 1\n2 clause_add [1 -3] resolution\n3 unit_derive -2 3\n";
        let formula = ReplayEngine::default().replay_text(ORIGINAL, log).unwrap();
        assert_eq!(
            vec![2, 3, 4, 5, 6],
            formula
                .iter_clauses()
                .map(|(id, _)| usize::from(id))
                .collect::<Vec<usize>>()
        );
        assert_eq!(
            "p cnf 4 5\n-1 3 0\n-2 -3 0\n4 0\n1 -3 0\n-2 0\n",
            formula.to_canonical_text()
        );
    }

    #[test]
    fn test_non_increasing_step_numbers_are_reported() {
        let log = "1 var_rename 1 6\n1 var_rename 2 7\n0 var_rename 3 8\n";
        let (result, warnings) = replay_with_warnings(ORIGINAL, log, true);
        assert_eq!(
            "p cnf 8 4\n6 7 0\n-6 8 0\n-7 -8 0\n4 0\n",
            result.unwrap().to_canonical_text()
        );
        assert_eq!(
            vec![
                (2, "step number 1 does not follow step number 1".to_string()),
                (3, "step number 0 does not follow step number 1".to_string()),
            ],
            warnings
        );
    }

    #[test]
    fn test_unknown_opcode_aborts_before_any_step() {
        let log = "1 var_elim 4\n2 var_frobnicate 1\n";
        let (result, warnings) = replay_with_warnings(ORIGINAL, log, false);
        assert_err_message(
            vec![
                "while reading the transformation log",
                "unknown opcode \"var_frobnicate\" at line 2",
            ],
            result.unwrap_err(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_log_keeps_formula() {
        let formula = ReplayEngine::default().replay_text(ORIGINAL, "").unwrap();
        assert_eq!(ORIGINAL, formula.to_canonical_text());
    }
}
