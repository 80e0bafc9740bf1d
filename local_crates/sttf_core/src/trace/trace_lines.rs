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

use crate::{ClauseId, TraceError};
use sttf_logic::{Literal, VarId};

/// Returns the meaningful lines of a trace file, together with their (1-based) line numbers.
///
/// Lines are trimmed; blank lines and lines beginning with `#` are skipped.
///
/// # Example
///
/// ```
/// use sttf_core::trace_lines;
///
/// let lines = trace_lines("# header\n\n  1 var_elim 4  \n").collect::<Vec<_>>();
/// assert_eq!(vec![(3, "1 var_elim 4")], lines);
/// ```
pub fn trace_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

pub(crate) fn parse_error(line: usize, text: &str, reason: &str) -> TraceError {
    TraceError::Parse {
        line,
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn parse_var(token: &str) -> Result<VarId, String> {
    token.parse::<VarId>().map_err(|e| e.to_string())
}

pub(crate) fn parse_clause_id(token: &str) -> Result<ClauseId, String> {
    match token.parse::<usize>() {
        Ok(id) if id > 0 => Ok(ClauseId::from(id)),
        _ => Err(format!(r#"invalid clause id "{}""#, token)),
    }
}

/// Parses the space-separated literals of a bracketed clause body.
pub(crate) fn parse_literals(text: &str) -> Result<Vec<Literal>, String> {
    text.split_whitespace()
        .map(|t| t.parse::<Literal>().map_err(|e| e.to_string()))
        .collect()
}

pub(crate) fn optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub(crate) fn literals_to_string(literals: &[Literal]) -> String {
    literals
        .iter()
        .map(Literal::to_string)
        .collect::<Vec<String>>()
        .join(" ")
}
