// sttf_logic
// Copyright (C) 2021  Univ. Artois & CNRS
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

use crate::{Literal, VarId};
use rustc_hash::FxHashMap;
use std::iter::FromIterator;

/// A (partial) assignment of truth values to variables.
///
/// # Examples
///
/// ```
/// use sttf_logic::{Literal, Model, VarId};
///
/// let mut model = Model::new();
/// model.set(VarId::from(1), true);
/// assert_eq!(Some(false), model.value_of("-1".parse::<Literal>().unwrap()));
/// assert_eq!(None, model.get(VarId::from(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    values: FxHashMap<VarId, bool>,
}

/// The truth value of a clause under a partial [`Model`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseStatus {
    /// At least one literal is true.
    Satisfied,
    /// Every literal is false.
    Falsified,
    /// No literal is true and at least one is unassigned.
    Undetermined,
}

impl Model {
    /// Builds an empty model.
    pub fn new() -> Self {
        Model::default()
    }

    /// Returns the value assigned to a variable, if any.
    pub fn get(&self, var_id: VarId) -> Option<bool> {
        self.values.get(&var_id).copied()
    }

    /// Assigns a value to a variable, returning the previous value if any.
    pub fn set(&mut self, var_id: VarId, value: bool) -> Option<bool> {
        self.values.insert(var_id, value)
    }

    /// Returns the number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the truth value of a literal, if its variable is assigned.
    pub fn value_of(&self, literal: Literal) -> Option<bool> {
        self.get(literal.var_id())
            .map(|value| value == literal.polarity())
    }

    /// Evaluates a clause (a disjunction of literals) under this model.
    ///
    /// # Examples
    ///
    /// ```
    /// use sttf_logic::{ClauseStatus, Literal, Model};
    ///
    /// let model = Model::from(vec![(1, false)]);
    /// let clause: Vec<Literal> = vec!["1".parse().unwrap(), "2".parse().unwrap()];
    /// assert_eq!(ClauseStatus::Undetermined, model.clause_status(&clause));
    /// ```
    pub fn clause_status(&self, clause: &[Literal]) -> ClauseStatus {
        let mut undetermined = false;
        for l in clause {
            match self.value_of(*l) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => undetermined = true,
            }
        }
        if undetermined {
            ClauseStatus::Undetermined
        } else {
            ClauseStatus::Falsified
        }
    }

    /// Returns the assignment as a list of literals, sorted by variable.
    pub fn to_literals(&self) -> Vec<Literal> {
        let mut literals = self
            .values
            .iter()
            .map(|(v, b)| Literal::new(*v, *b))
            .collect::<Vec<Literal>>();
        literals.sort_unstable();
        literals
    }
}

impl FromIterator<Literal> for Model {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Model {
            values: iter
                .into_iter()
                .map(|l| (l.var_id(), l.polarity()))
                .collect(),
        }
    }
}

impl FromIterator<(VarId, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (VarId, bool)>>(iter: I) -> Self {
        Model {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<(usize, bool)>> for Model {
    fn from(v: Vec<(usize, bool)>) -> Self {
        v.into_iter().map(|(v, b)| (VarId::from(v), b)).collect()
    }
}
