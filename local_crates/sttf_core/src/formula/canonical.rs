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

/// Normalizes a DIMACS text for comparison purposes.
///
/// Blank lines and comment lines are dropped, whitespace inside the remaining lines is collapsed to single spaces,
/// and the lines are sorted.
/// Since clause order is not significant but literal order is, two formulas written by this crate
/// are considered the same if their normalized lines are equal.
///
/// # Example
///
/// ```
/// use sttf_core::normalize_dimacs;
///
/// let lines = normalize_dimacs("c comment\np cnf 2 2\n-1  2 0\n1 0\n");
/// assert_eq!(vec!["-1 2 0", "1 0", "p cnf 2 2"], lines);
/// ```
pub fn normalize_dimacs(text: &str) -> Vec<String> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('c'))
        .map(|l| l.split_whitespace().collect::<Vec<&str>>().join(" "))
        .collect::<Vec<String>>();
    lines.sort_unstable();
    lines
}

/// Checks if two DIMACS texts have the same normalized lines (see [`normalize_dimacs`]).
pub fn same_normalized_dimacs(first: &str, second: &str) -> bool {
    normalize_dimacs(first) == normalize_dimacs(second)
}
