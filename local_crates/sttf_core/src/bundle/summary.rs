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

use crate::{FormulaMetadata, Manifest, ReverseRule, TransformStep};
use std::collections::BTreeMap;

/// Statistics about a transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformSummary {
    /// The number of steps of the transformation log.
    pub total_steps: usize,
    /// The number of steps for each opcode used by the log, sorted by opcode name.
    pub opcodes: BTreeMap<&'static str, usize>,
    /// The number of rules of the reconstruction map.
    pub reverse_rules: usize,
    /// The number of rules for each rule kind used by the map, sorted by keyword.
    pub rule_kinds: BTreeMap<&'static str, usize>,
    /// The size of the original formula declared by the manifest.
    pub original: FormulaMetadata,
    /// The size of the simplified formula declared by the manifest.
    pub simplified: FormulaMetadata,
}

impl TransformSummary {
    pub(crate) fn new(steps: &[TransformStep], rules: &[ReverseRule], manifest: &Manifest) -> Self {
        let mut opcodes = BTreeMap::new();
        for step in steps {
            *opcodes.entry(step.transform.opcode().name()).or_insert(0) += 1;
        }
        let mut rule_kinds = BTreeMap::new();
        for rule in rules {
            *rule_kinds.entry(rule.kind()).or_insert(0) += 1;
        }
        TransformSummary {
            total_steps: steps.len(),
            opcodes,
            reverse_rules: rules.len(),
            rule_kinds,
            original: manifest.original,
            simplified: manifest.simplified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_reconstruct_map, read_transform_log};

    #[test]
    fn test_summary() {
        let steps = read_transform_log(
            "1 var_subst 8 = NOT(7)\n2 clause_remove 5\n3 clause_remove 8\n4 var_elim 4\n",
        )
        .unwrap();
        let rules = read_reconstruct_map("rev_elim_expr 8 = NOT(7)\nrev_elim 4 = false\n").unwrap();
        let manifest = Manifest::new(
            "test",
            "1.0",
            FormulaMetadata {
                variables: 8,
                clauses: 8,
            },
            FormulaMetadata {
                variables: 7,
                clauses: 4,
            },
            4,
        );
        let summary = TransformSummary::new(&steps, &rules, &manifest);
        assert_eq!(4, summary.total_steps);
        assert_eq!(
            vec![("clause_remove", 2), ("var_elim", 1), ("var_subst", 1)],
            summary
                .opcodes
                .into_iter()
                .collect::<Vec<(&str, usize)>>()
        );
        assert_eq!(2, summary.reverse_rules);
        assert_eq!(
            vec![("rev_elim", 1), ("rev_elim_expr", 1)],
            summary
                .rule_kinds
                .into_iter()
                .collect::<Vec<(&str, usize)>>()
        );
        assert_eq!(7, summary.simplified.variables);
    }
}
