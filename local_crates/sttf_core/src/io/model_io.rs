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

//! Reading and writing solver models, in the output format of the SAT competitions.

use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};
use sttf_logic::{Literal, Model};

const LITERALS_PER_VALUE_LINE: usize = 10;

/// Reads a model from a solver output.
///
/// The output may contain comment lines (`c ...`), a status line (`s ...`) and value lines (`v ...`);
/// lines made of literals only are accepted as value lines.
/// A `0` ends the model.
///
/// An error is returned if the status is not `SATISFIABLE`, if a token is not a literal,
/// or if a variable is given both polarities.
///
/// # Example
///
/// ```
/// use sttf_core::read_model;
///
/// let model = read_model(&mut "s SATISFIABLE\nv 1 -2\nv 3 0\n".as_bytes()).unwrap();
/// assert_eq!(3, model.len());
/// assert_eq!(Some(false), model.get(2.into()));
/// ```
pub fn read_model(reader: &mut dyn BufRead) -> Result<Model> {
    let mut model = Model::new();
    for (i, line) in reader.lines().enumerate() {
        let line_index = i + 1;
        let line = line.with_context(|| format!("while reading a model (line {})", line_index))?;
        let l = line.trim();
        if l.is_empty() || l.starts_with('c') {
            continue;
        }
        if let Some(status) = l.strip_prefix('s') {
            match status.trim() {
                "SATISFIABLE" => continue,
                s => {
                    return Err(anyhow!(
                        r#"expected a SATISFIABLE status, found "{}" (line {})"#,
                        s,
                        line_index
                    ))
                }
            }
        }
        let values = l.strip_prefix('v').unwrap_or(l);
        for token in values.split_whitespace() {
            if token == "0" {
                return Ok(model);
            }
            let literal = token
                .parse::<Literal>()
                .with_context(|| format!("while reading a model (line {})", line_index))?;
            if model.set(literal.var_id(), literal.polarity()) == Some(!literal.polarity()) {
                return Err(anyhow!(
                    "variable {} is assigned both polarities (line {})",
                    literal.var_id(),
                    line_index
                ));
            }
        }
    }
    Ok(model)
}

/// Writes a model in the SAT competition format.
///
/// Literals are sorted by variable and written at most ten per `v` line; the model ends with a `v 0` line.
pub fn write_model(model: &Model, writer: &mut dyn Write) -> Result<()> {
    let context = "while writing a model";
    writeln!(writer, "s SATISFIABLE").context(context)?;
    for chunk in model.to_literals().chunks(LITERALS_PER_VALUE_LINE) {
        let line = chunk
            .iter()
            .map(Literal::to_string)
            .collect::<Vec<String>>()
            .join(" ");
        writeln!(writer, "v {}", line).context(context)?;
    }
    writeln!(writer, "v 0").context(context)?;
    writer.flush().context(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    fn assert_err_message(expected_chain: Vec<&'static str>, actual: Error) {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(expected_chain, error_chain);
    }

    #[test]
    fn test_read_competition_output() {
        let output = "c solved\ns SATISFIABLE\nv 1 -2 3\nv -5 0\n";
        let model = read_model(&mut output.as_bytes()).unwrap();
        assert_eq!(
            vec!["1", "-2", "3", "-5"],
            model
                .to_literals()
                .iter()
                .map(Literal::to_string)
                .collect::<Vec<String>>()
        );
    }

    #[test]
    fn test_read_bare_literals() {
        let model = read_model(&mut "1 -2\n3\n".as_bytes()).unwrap();
        assert_eq!(3, model.len());
        assert_eq!(Some(true), model.get(3.into()));
    }

    #[test]
    fn test_zero_ends_model() {
        let model = read_model(&mut "v 1 0\nv 2 0\n".as_bytes()).unwrap();
        assert_eq!(1, model.len());
    }

    #[test]
    fn test_unsat_status() {
        assert_err_message(
            vec![r#"expected a SATISFIABLE status, found "UNSATISFIABLE" (line 1)"#],
            read_model(&mut "s UNSATISFIABLE\n".as_bytes()).unwrap_err(),
        );
    }

    #[test]
    fn test_invalid_literal() {
        assert_err_message(
            vec![
                "while reading a model (line 2)",
                r#"invalid literal "x""#,
            ],
            read_model(&mut "s SATISFIABLE\nv 1 x 0\n".as_bytes()).unwrap_err(),
        );
    }

    #[test]
    fn test_conflicting_polarities() {
        assert_err_message(
            vec!["variable 1 is assigned both polarities (line 1)"],
            read_model(&mut "v 1 -1 0\n".as_bytes()).unwrap_err(),
        );
    }

    #[test]
    fn test_write_model() {
        let model = (1..=12)
            .map(|v| (v, v % 3 != 0))
            .collect::<Vec<(usize, bool)>>();
        let mut buffer = Vec::new();
        write_model(&Model::from(model), &mut buffer).unwrap();
        assert_eq!(
            "s SATISFIABLE\nv 1 2 -3 4 5 -6 7 8 -9 10\nv 11 -12\nv 0\n",
            String::from_utf8(buffer).unwrap()
        );
    }

    #[test]
    fn test_write_empty_model() {
        let mut buffer = Vec::new();
        write_model(&Model::new(), &mut buffer).unwrap();
        assert_eq!("s SATISFIABLE\nv 0\n", String::from_utf8(buffer).unwrap());
    }
}
