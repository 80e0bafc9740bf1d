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

//! The transformation log: the ordered steps a preprocessor applied to a formula.
//!
//! Each meaningful line is `<step> <opcode> <arguments>`, where the opcode belongs to a closed set (see [`Opcode`]).
//! The whole log is parsed before any step is applied, so that unknown opcodes and malformed arguments
//! are rejected before a formula is modified.

use super::trace_lines::{
    literals_to_string, optional_text, parse_clause_id, parse_error, parse_literals, parse_var,
    trace_lines,
};
use crate::{ClauseId, TraceError};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use sttf_logic::{Expr, Literal, VarId};

lazy_static! {
    static ref STEP_LINE_PATTERN: Regex = Regex::new(r"^(\d+)\s+(\w+)(?:\s+(.*))?$").unwrap();
    static ref VAR_SUBST_ARGS_PATTERN: Regex = Regex::new(r"^(\d+)\s*=\s*(.+)$").unwrap();
    static ref CLAUSE_ADD_ARGS_PATTERN: Regex =
        Regex::new(r"^\[([^\]]*)\](?:\s+(.*))?$").unwrap();
    static ref CLAUSE_STRENGTHEN_ARGS_PATTERN: Regex =
        Regex::new(r"^(\d+)\s+\[([^\]]*)\]$").unwrap();
}

/// The operation types a transformation log may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    VarRename,
    VarElim,
    VarSubst,
    ClauseRemove,
    ClauseAdd,
    ClauseStrengthen,
    UnitDerive,
}

impl Opcode {
    /// All the opcodes, in declaration order.
    pub const ALL: [Opcode; 7] = [
        Opcode::VarRename,
        Opcode::VarElim,
        Opcode::VarSubst,
        Opcode::ClauseRemove,
        Opcode::ClauseAdd,
        Opcode::ClauseStrengthen,
        Opcode::UnitDerive,
    ];

    /// Returns the name of the opcode, as written in logs.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::VarRename => "var_rename",
            Opcode::VarElim => "var_elim",
            Opcode::VarSubst => "var_subst",
            Opcode::ClauseRemove => "clause_remove",
            Opcode::ClauseAdd => "clause_add",
            Opcode::ClauseStrengthen => "clause_strengthen",
            Opcode::UnitDerive => "unit_derive",
        }
    }

    /// Returns the opcode with the given name, if any.
    pub fn from_name(name: &str) -> Option<Opcode> {
        Opcode::ALL.iter().copied().find(|o| o.name() == name)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A transformation, with its opcode-specific arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    /// `var_rename old new`
    VarRename { from: VarId, to: VarId },
    /// `var_elim v [reason]`
    VarElim { var: VarId, reason: Option<String> },
    /// `var_subst v = expr`
    VarSubst { var: VarId, expr: Expr },
    /// `clause_remove id [reason]`
    ClauseRemove { id: ClauseId, reason: Option<String> },
    /// `clause_add [l1 .. lk] [source]`
    ClauseAdd {
        literals: Vec<Literal>,
        source: Option<String>,
    },
    /// `clause_strengthen id [l1 .. lk]`
    ClauseStrengthen { id: ClauseId, literals: Vec<Literal> },
    /// `unit_derive lit [source clause id]`
    UnitDerive {
        literal: Literal,
        source: Option<ClauseId>,
    },
}

impl Transform {
    /// Returns the opcode of this transformation.
    pub fn opcode(&self) -> Opcode {
        match self {
            Transform::VarRename { .. } => Opcode::VarRename,
            Transform::VarElim { .. } => Opcode::VarElim,
            Transform::VarSubst { .. } => Opcode::VarSubst,
            Transform::ClauseRemove { .. } => Opcode::ClauseRemove,
            Transform::ClauseAdd { .. } => Opcode::ClauseAdd,
            Transform::ClauseStrengthen { .. } => Opcode::ClauseStrengthen,
            Transform::UnitDerive { .. } => Opcode::UnitDerive,
        }
    }

    fn parse_args(opcode: Opcode, args: &str) -> Result<Transform, String> {
        match opcode {
            Opcode::VarRename => {
                let tokens = args.split_whitespace().collect::<Vec<&str>>();
                if tokens.len() != 2 {
                    return Err("expected an old and a new variable".to_string());
                }
                Ok(Transform::VarRename {
                    from: parse_var(tokens[0])?,
                    to: parse_var(tokens[1])?,
                })
            }
            Opcode::VarElim => {
                let (first, rest) = split_first_token(args)?;
                Ok(Transform::VarElim {
                    var: parse_var(first)?,
                    reason: optional_text(rest),
                })
            }
            Opcode::VarSubst => {
                let c = VAR_SUBST_ARGS_PATTERN
                    .captures(args)
                    .ok_or_else(|| "expected <var> = <expression>".to_string())?;
                Ok(Transform::VarSubst {
                    var: parse_var(&c[1])?,
                    expr: Expr::parse(&c[2]).map_err(|e| e.to_string())?,
                })
            }
            Opcode::ClauseRemove => {
                let (first, rest) = split_first_token(args)?;
                Ok(Transform::ClauseRemove {
                    id: parse_clause_id(first)?,
                    reason: optional_text(rest),
                })
            }
            Opcode::ClauseAdd => {
                let c = CLAUSE_ADD_ARGS_PATTERN
                    .captures(args)
                    .ok_or_else(|| "expected [<literals>] [<source>]".to_string())?;
                Ok(Transform::ClauseAdd {
                    literals: parse_literals(&c[1])?,
                    source: optional_text(c.get(2).map(|m| m.as_str())),
                })
            }
            Opcode::ClauseStrengthen => {
                let c = CLAUSE_STRENGTHEN_ARGS_PATTERN
                    .captures(args)
                    .ok_or_else(|| "expected <clause id> [<literals>]".to_string())?;
                Ok(Transform::ClauseStrengthen {
                    id: parse_clause_id(&c[1])?,
                    literals: parse_literals(&c[2])?,
                })
            }
            Opcode::UnitDerive => {
                let tokens = args.split_whitespace().collect::<Vec<&str>>();
                let source = match tokens.len() {
                    1 => None,
                    2 => Some(parse_clause_id(tokens[1])?),
                    _ => return Err("expected a literal and an optional clause id".to_string()),
                };
                Ok(Transform::UnitDerive {
                    literal: tokens[0].parse::<Literal>().map_err(|e| e.to_string())?,
                    source,
                })
            }
        }
    }
}

fn split_first_token(args: &str) -> Result<(&str, Option<&str>), String> {
    let mut parts = args.splitn(2, char::is_whitespace);
    match parts.next() {
        Some(first) if !first.is_empty() => Ok((first, parts.next())),
        _ => Err("missing arguments".to_string()),
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode())?;
        match self {
            Transform::VarRename { from, to } => write!(f, " {} {}", from, to),
            Transform::VarElim { var, reason } => {
                write!(f, " {}", var)?;
                write_optional(f, reason)
            }
            Transform::VarSubst { var, expr } => write!(f, " {} = {}", var, expr),
            Transform::ClauseRemove { id, reason } => {
                write!(f, " {}", id)?;
                write_optional(f, reason)
            }
            Transform::ClauseAdd { literals, source } => {
                write!(f, " [{}]", literals_to_string(literals))?;
                write_optional(f, source)
            }
            Transform::ClauseStrengthen { id, literals } => {
                write!(f, " {} [{}]", id, literals_to_string(literals))
            }
            Transform::UnitDerive { literal, source } => {
                write!(f, " {}", literal)?;
                write_optional(f, source)
            }
        }
    }
}

fn write_optional<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(v) => write!(f, " {}", v),
        None => Ok(()),
    }
}

/// A step of a transformation log.
///
/// The step number is advisory: steps are applied in the order of the log lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformStep {
    /// The line of the log this step was read from (1-based).
    pub line: usize,
    /// The step number written in the log.
    pub step: usize,
    /// The transformation.
    pub transform: Transform,
}

impl TransformStep {
    /// Parses a (trimmed, non-comment) log line.
    ///
    /// # Example
    ///
    /// ```
    /// use sttf_core::{Opcode, TransformStep};
    ///
    /// let step = TransformStep::parse(1, "3 var_elim 4 pure_literal").unwrap();
    /// assert_eq!(3, step.step);
    /// assert_eq!(Opcode::VarElim, step.transform.opcode());
    /// ```
    pub fn parse(line: usize, text: &str) -> Result<TransformStep, TraceError> {
        let c = STEP_LINE_PATTERN
            .captures(text)
            .ok_or_else(|| parse_error(line, text, "expected <step> <opcode> <arguments>"))?;
        let step = c[1]
            .parse::<usize>()
            .map_err(|_| parse_error(line, text, "invalid step number"))?;
        let opcode = Opcode::from_name(&c[2]).ok_or_else(|| TraceError::UnknownOpcode {
            line,
            opcode: c[2].to_string(),
        })?;
        let args = c.get(3).map(|m| m.as_str().trim()).unwrap_or("");
        let transform =
            Transform::parse_args(opcode, args).map_err(|reason| parse_error(line, text, &reason))?;
        Ok(TransformStep {
            line,
            step,
            transform,
        })
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.step, self.transform)
    }
}

/// Reads a whole transformation log.
///
/// The first malformed line aborts the reading; no partial log is returned.
pub fn read_transform_log(text: &str) -> Result<Vec<TransformStep>> {
    let mut steps = vec![];
    for (line, content) in trace_lines(text) {
        steps.push(TransformStep::parse(line, content)?);
    }
    Ok(steps)
}
