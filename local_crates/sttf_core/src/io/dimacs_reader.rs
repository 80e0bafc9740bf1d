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

use crate::{trace::parse_error, CnfFormula};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::io::{BufRead, BufReader, Read};
use sttf_logic::Literal;

lazy_static! {
    static ref HEADER_PATTERN: Regex = Regex::new(r"^p\s+cnf\s+(\d+)\s+(\d+)$").unwrap();
}

/// A reader for formulas in the DIMACS CNF format.
///
/// Comment lines (beginning with `c`) and blank lines are ignored, and a line beginning with `%` ends the formula.
/// Each other line after the optional `p cnf` header is a clause whose literals are terminated by a `0`.
/// Clauses receive the identifiers `1..n` in file order.
/// A line holding only the terminating `0` is skipped and takes no identifier.
///
/// Some inconsistencies do not prevent the formula from being read;
/// they are reported to the warning handlers, with the line they occur at.
///
/// # Example
///
/// ```
/// use sttf_core::DimacsReader;
///
/// let mut warnings = vec![];
/// let mut handler = |line, message| warnings.push((line, message));
/// let mut reader = DimacsReader::default();
/// reader.add_warning_handler(&mut handler);
/// let formula = reader.read(&mut "p cnf 2 2\n1 -2 0\n".as_bytes()).unwrap();
/// assert_eq!(1, formula.n_clauses());
/// drop(reader);
/// assert_eq!(vec![(1, "the header announces 2 clause(s) but 1 were read".to_string())], warnings);
/// ```
#[derive(Default)]
pub struct DimacsReader<'a> {
    warning_handlers: Vec<&'a mut dyn FnMut(usize, String)>,
}

impl<'a> DimacsReader<'a> {
    /// Adds a function called each time a warning is raised; it receives the line number and the warning message.
    pub fn add_warning_handler(&mut self, h: &'a mut dyn FnMut(usize, String)) {
        self.warning_handlers.push(h);
    }

    fn warn(&mut self, line: usize, message: String) {
        for h in self.warning_handlers.iter_mut() {
            (h)(line, message.clone());
        }
    }

    /// Reads a formula.
    pub fn read(&mut self, reader: &mut dyn Read) -> Result<CnfFormula> {
        let mut formula = CnfFormula::new();
        let mut header_line = None;
        let mut max_var = 0;
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line_index = i + 1;
            let line = line.with_context(|| {
                format!("while reading line {} of a DIMACS formula", line_index)
            })?;
            let l = line.trim();
            if l.is_empty() || l.starts_with('c') {
                continue;
            }
            if l.starts_with('%') {
                break;
            }
            if l.starts_with('p') {
                if header_line.is_some() || formula.n_clauses() > 0 {
                    return Err(parse_error(line_index, l, "unexpected header").into());
                }
                let c = HEADER_PATTERN
                    .captures(l)
                    .ok_or_else(|| parse_error(line_index, l, "expected p cnf <vars> <clauses>"))?;
                let n_vars = c[1]
                    .parse::<usize>()
                    .map_err(|_| parse_error(line_index, l, "invalid variable count"))?;
                let n_clauses = c[2]
                    .parse::<usize>()
                    .map_err(|_| parse_error(line_index, l, "invalid clause count"))?;
                formula.set_declared_header(n_vars, n_clauses);
                header_line = Some(line_index);
                continue;
            }
            let (literals, terminated) =
                read_clause(l).map_err(|reason| parse_error(line_index, l, &reason))?;
            if !terminated {
                self.warn(line_index, "missing terminating 0".to_string());
            }
            max_var = literals
                .iter()
                .map(|lit| usize::from(lit.var_id()))
                .fold(max_var, usize::max);
            if !literals.is_empty() {
                formula.add_clause(literals);
            }
        }
        if let (Some(line), Some((n_vars, n_clauses))) = (header_line, formula.declared_header()) {
            if n_clauses != formula.n_clauses() {
                self.warn(
                    line,
                    format!(
                        "the header announces {} clause(s) but {} were read",
                        n_clauses,
                        formula.n_clauses()
                    ),
                );
            }
            if max_var > n_vars {
                self.warn(
                    line,
                    format!(
                        "the header announces {} variable(s) but variable {} is used",
                        n_vars, max_var
                    ),
                );
            }
        }
        Ok(formula)
    }
}

/// Reads the literals of a clause line, and tells whether the terminating `0` was found.
fn read_clause(line: &str) -> Result<(Vec<Literal>, bool), String> {
    let mut literals = vec![];
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        let value = token
            .parse::<i64>()
            .map_err(|_| format!(r#"invalid literal "{}""#, token))?;
        if value == 0 {
            return match tokens.next() {
                None => Ok((literals, true)),
                Some(t) => Err(format!(r#"unexpected "{}" after the terminating 0"#, t)),
            };
        }
        literals.push(Literal::try_from(value).map_err(|e| e.to_string())?);
    }
    Ok((literals, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceError;

    fn read_with_warnings(content: &str) -> (Result<CnfFormula>, Vec<(usize, String)>) {
        let mut warnings = vec![];
        let mut handler = |line, message| warnings.push((line, message));
        let mut reader = DimacsReader::default();
        reader.add_warning_handler(&mut handler);
        let result = reader.read(&mut content.as_bytes());
        drop(reader);
        (result, warnings)
    }

    fn parse_error_of(content: &str) -> TraceError {
        let (result, _) = read_with_warnings(content);
        result
            .unwrap_err()
            .downcast_ref::<TraceError>()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_read_ok() {
        let (result, warnings) =
            read_with_warnings("c a comment\np cnf 4 4\n1 2 0\n-1 3 0\n\n-2 -3 0\n4 0\n");
        let formula = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(Some((4, 4)), formula.declared_header());
        assert_eq!(
            "p cnf 4 4\n1 2 0\n-1 3 0\n-2 -3 0\n4 0\n",
            formula.to_canonical_text()
        );
    }

    #[test]
    fn test_read_without_header() {
        let (result, warnings) = read_with_warnings("1 2 0\n-1 0\n");
        let formula = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(None, formula.declared_header());
        assert_eq!(2, formula.n_clauses());
    }

    #[test]
    fn test_percent_ends_formula() {
        let (result, _) = read_with_warnings("p cnf 2 1\n1 2 0\n%\n0\n");
        assert_eq!(1, result.unwrap().n_clauses());
    }

    #[test]
    fn test_empty_clause_lines_take_no_id() {
        let (result, warnings) = read_with_warnings("p cnf 3 2\n1 2 0\n0\n3 0\n");
        let formula = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!("p cnf 3 2\n1 2 0\n3 0\n", formula.to_canonical_text());
        assert_eq!(Some(1), formula.clause(2.into()).map(|c| c.len()));
        assert!(formula.clause(3.into()).is_none());
    }

    #[test]
    fn test_clause_ids_follow_skipped_empty_lines_during_replay() {
        let (result, _) = read_with_warnings("p cnf 3 2\n1 2 0\n0\n3 0\n");
        let steps = crate::read_transform_log("1 clause_remove 2\n").unwrap();
        let simplified = crate::ReplayEngine::default()
            .replay(result.unwrap(), &steps)
            .unwrap();
        assert_eq!("p cnf 2 1\n1 2 0\n", simplified.to_canonical_text());
    }

    #[test]
    fn test_warnings() {
        let (result, warnings) = read_with_warnings("p cnf 2 3\n1 -2\n3 0\n");
        assert_eq!(2, result.unwrap().n_clauses());
        assert_eq!(
            vec![
                (2, "missing terminating 0".to_string()),
                (
                    1,
                    "the header announces 3 clause(s) but 2 were read".to_string()
                ),
                (
                    1,
                    "the header announces 2 variable(s) but variable 3 is used".to_string()
                ),
            ],
            warnings
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            TraceError::Parse {
                line: 2,
                text: "1 x 0".to_string(),
                reason: "invalid literal \"x\"".to_string()
            },
            parse_error_of("p cnf 2 1\n1 x 0\n")
        );
        assert_eq!(
            TraceError::Parse {
                line: 1,
                text: "p cnf 2".to_string(),
                reason: "expected p cnf <vars> <clauses>".to_string()
            },
            parse_error_of("p cnf 2\n1 2 0\n")
        );
        assert_eq!(
            TraceError::Parse {
                line: 3,
                text: "p cnf 2 1".to_string(),
                reason: "unexpected header".to_string()
            },
            parse_error_of("p cnf 2 1\n1 2 0\np cnf 2 1\n")
        );
        assert_eq!(
            TraceError::Parse {
                line: 1,
                text: "1 0 2 0".to_string(),
                reason: "unexpected \"2\" after the terminating 0".to_string()
            },
            parse_error_of("1 0 2 0\n")
        );
    }
}
