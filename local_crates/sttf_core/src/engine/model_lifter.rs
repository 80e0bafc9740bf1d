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

use crate::{ReverseRule, TraceError};
use anyhow::{Context, Result};
use sttf_logic::Model;

/// Lifts a model of a simplified formula to a model of the original formula, using the rules of a reconstruction map.
///
/// Rules are applied in order on a copy of the input model, each one reading the values set by the previous ones;
/// values are only added or overwritten, never removed.
/// An expression rule referring to a variable which has no value yet fails with an
/// [`UndefinedVariable`](sttf_logic::LogicError::UndefinedVariable) error.
///
/// By default, a rename rule whose source variable has no value is skipped and reported to the warning handlers.
/// In strict mode, it is a [`TraceError::UnresolvedRename`] error.
///
/// # Example
///
/// ```
/// use sttf_core::{read_reconstruct_map, ModelLifter};
/// use sttf_logic::Model;
///
/// let rules = read_reconstruct_map("rev_elim 4 = false\nrev_map 5 -> 3\n").unwrap();
/// let model = Model::from(vec![(1, true), (2, false), (5, true)]);
/// let lifted = ModelLifter::default().lift(&model, &rules).unwrap();
/// assert_eq!(Some(false), lifted.get(4.into()));
/// assert_eq!(Some(true), lifted.get(3.into()));
/// ```
#[derive(Default)]
pub struct ModelLifter<'a> {
    strict: bool,
    warning_handlers: Vec<&'a mut dyn FnMut(usize, String)>,
}

impl<'a> ModelLifter<'a> {
    /// Sets whether rename rules with an unassigned source must be rejected.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Adds a function called each time a warning is raised; it receives the (1-based) rule index and the warning message.
    pub fn add_warning_handler(&mut self, h: &'a mut dyn FnMut(usize, String)) {
        self.warning_handlers.push(h);
    }

    fn warn(&mut self, rule_index: usize, message: String) {
        for h in self.warning_handlers.iter_mut() {
            (h)(rule_index, message.clone());
        }
    }

    /// Returns the lifted model.
    pub fn lift(&mut self, model: &Model, rules: &[ReverseRule]) -> Result<Model> {
        let mut lifted = model.clone();
        for (i, rule) in rules.iter().enumerate() {
            self.apply(&mut lifted, i + 1, rule)
                .with_context(|| format!("while applying reconstruction rule {} ({})", i + 1, rule))?;
        }
        Ok(lifted)
    }

    fn apply(&mut self, model: &mut Model, rule_index: usize, rule: &ReverseRule) -> Result<()> {
        match rule {
            ReverseRule::Rename { from, to } => match model.get(*from) {
                Some(value) => {
                    model.set(*to, value);
                }
                None if self.strict => {
                    return Err(TraceError::UnresolvedRename {
                        from: *from,
                        to: *to,
                    }
                    .into())
                }
                None => self.warn(
                    rule_index,
                    format!("variable {} has no value; variable {} is left unset", from, to),
                ),
            },
            ReverseRule::ConstElim { var, value } => {
                model.set(*var, *value);
            }
            ReverseRule::ExprElim { var, expr } => {
                let value = expr.eval(model)?;
                model.set(*var, value);
            }
            ReverseRule::ClauseAddNote { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_reconstruct_map;
    use anyhow::Error;
    use sttf_logic::{LogicError, VarId};

    fn assert_err_message(expected_chain: Vec<&'static str>, actual: Error) {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(expected_chain, error_chain);
    }

    fn lift(model: Vec<(usize, bool)>, map: &str) -> Result<Model> {
        let rules = read_reconstruct_map(map).unwrap();
        ModelLifter::default().lift(&Model::from(model), &rules)
    }

    #[test]
    fn test_rename() {
        let lifted = lift(vec![(2, true)], "rev_map 2 -> 1").unwrap();
        assert_eq!(Some(true), lifted.get(1.into()));
        assert_eq!(Some(true), lifted.get(2.into()));
    }

    #[test]
    fn test_const_elim_overwrites() {
        let lifted = lift(vec![(4, true)], "rev_elim 4 = false").unwrap();
        assert_eq!(Some(false), lifted.get(4.into()));
    }

    #[test]
    fn test_expr_elim() {
        let lifted = lift(vec![(1, true), (2, false)], "rev_elim_expr 3 = OR(1,2)").unwrap();
        assert_eq!(Some(true), lifted.get(3.into()));
    }

    #[test]
    fn test_expr_elim_reads_previous_rules() {
        let map = "rev_map 5 -> 7\nrev_elim_expr 8 = NOT(7)\n";
        let lifted = lift(vec![(5, true)], map).unwrap();
        assert_eq!(Some(true), lifted.get(7.into()));
        assert_eq!(Some(false), lifted.get(8.into()));
    }

    #[test]
    fn test_expr_elim_forward_reference() {
        let map = "rev_elim_expr 8 = NOT(7)\nrev_map 5 -> 7\n";
        let err = lift(vec![(5, true)], map).unwrap_err();
        assert_eq!(
            Some(&LogicError::UndefinedVariable(VarId::from(7))),
            err.downcast_ref::<LogicError>()
        );
        assert_err_message(
            vec![
                "while applying reconstruction rule 1 (rev_elim_expr 8 = NOT(7))",
                "undefined variable 7 in model",
            ],
            err,
        );
    }

    #[test]
    fn test_clause_add_note_is_ignored() {
        let lifted = lift(vec![(1, true)], "rev_clause_add 3 [1 -2]").unwrap();
        assert_eq!(Model::from(vec![(1, true)]), lifted);
    }

    #[test]
    fn test_unresolved_rename_is_skipped() {
        let rules = read_reconstruct_map("rev_elim 4 = true\nrev_map 5 -> 3\n").unwrap();
        let mut warnings = vec![];
        let mut handler = |index, message| warnings.push((index, message));
        let mut lifter = ModelLifter::default();
        lifter.add_warning_handler(&mut handler);
        let lifted = lifter.lift(&Model::new(), &rules).unwrap();
        drop(lifter);
        assert_eq!(Model::from(vec![(4, true)]), lifted);
        assert_eq!(
            vec![(
                2,
                "variable 5 has no value; variable 3 is left unset".to_string()
            )],
            warnings
        );
    }

    #[test]
    fn test_unresolved_rename_in_strict_mode() {
        let rules = read_reconstruct_map("rev_map 5 -> 3\n").unwrap();
        let mut lifter = ModelLifter::default();
        lifter.set_strict(true);
        let err = lifter.lift(&Model::new(), &rules).unwrap_err();
        assert_eq!(
            Some(&TraceError::UnresolvedRename {
                from: 5.into(),
                to: 3.into()
            }),
            err.downcast_ref::<TraceError>()
        );
        assert_err_message(
            vec![
                "while applying reconstruction rule 1 (rev_map 5 -> 3)",
                "cannot map variable 5 to 3: 5 has no value",
            ],
            err,
        );
    }

    #[test]
    fn test_input_model_is_not_modified() {
        let model = Model::from(vec![(2, true)]);
        let rules = read_reconstruct_map("rev_map 2 -> 1").unwrap();
        let lifted = ModelLifter::default().lift(&model, &rules).unwrap();
        assert_eq!(1, model.len());
        assert_eq!(2, lifted.len());
    }
}
