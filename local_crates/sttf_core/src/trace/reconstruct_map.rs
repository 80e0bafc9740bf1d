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

use super::trace_lines::{
    literals_to_string, parse_clause_id, parse_error, parse_literals, parse_var, trace_lines,
};
use crate::{ClauseId, TraceError};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use sttf_logic::{Expr, Literal, VarId};

lazy_static! {
    static ref RULE_LINE_PATTERN: Regex = Regex::new(r"^(\w+)(?:\s+(.*))?$").unwrap();
    static ref RENAME_ARGS_PATTERN: Regex = Regex::new(r"^(\d+)\s*->\s*(\d+)$").unwrap();
    static ref CONST_ELIM_ARGS_PATTERN: Regex =
        Regex::new(r"^(\d+)\s*=\s*(true|false)$").unwrap();
    static ref EXPR_ELIM_ARGS_PATTERN: Regex = Regex::new(r"^(\d+)\s*=\s*(.+)$").unwrap();
    static ref CLAUSE_ADD_NOTE_ARGS_PATTERN: Regex =
        Regex::new(r"^(\d+)\s+\[([^\]]*)\]$").unwrap();
}

/// A rule of a reconstruction map.
///
/// Rules are applied in file order when a model of the simplified formula is lifted to the original one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReverseRule {
    /// `rev_map b -> a`: the value of `b` is copied to `a`.
    Rename { from: VarId, to: VarId },
    /// `rev_elim v = true|false`: `v` is set to a constant.
    ConstElim { var: VarId, value: bool },
    /// `rev_elim_expr v = expr`: `v` is set to the value of the expression.
    ExprElim { var: VarId, expr: Expr },
    /// `rev_clause_add id [literals]`: provenance note, ignored when lifting.
    ClauseAddNote { id: ClauseId, literals: Vec<Literal> },
}

impl ReverseRule {
    /// Returns the keyword introducing this rule in a reconstruction map.
    pub fn kind(&self) -> &'static str {
        match self {
            ReverseRule::Rename { .. } => "rev_map",
            ReverseRule::ConstElim { .. } => "rev_elim",
            ReverseRule::ExprElim { .. } => "rev_elim_expr",
            ReverseRule::ClauseAddNote { .. } => "rev_clause_add",
        }
    }

    /// Parses a (trimmed, non-comment) reconstruction map line.
    ///
    /// # Example
    ///
    /// ```
    /// use sttf_core::ReverseRule;
    ///
    /// let rule = ReverseRule::parse(1, "rev_map 5 -> 3").unwrap();
    /// assert_eq!(ReverseRule::Rename { from: 5.into(), to: 3.into() }, rule);
    /// ```
    pub fn parse(line: usize, text: &str) -> Result<ReverseRule, TraceError> {
        let c = RULE_LINE_PATTERN
            .captures(text)
            .ok_or_else(|| parse_error(line, text, "expected <rule> <arguments>"))?;
        let args = c.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let rule = match &c[1] {
            "rev_map" => Self::parse_rename(args),
            "rev_elim" => Self::parse_const_elim(args),
            "rev_elim_expr" => Self::parse_expr_elim(args),
            "rev_clause_add" => Self::parse_clause_add_note(args),
            keyword => {
                return Err(TraceError::UnknownRule {
                    line,
                    keyword: keyword.to_string(),
                })
            }
        };
        rule.map_err(|reason| parse_error(line, text, &reason))
    }

    fn parse_rename(args: &str) -> Result<ReverseRule, String> {
        let c = RENAME_ARGS_PATTERN
            .captures(args)
            .ok_or_else(|| "expected <var> -> <var>".to_string())?;
        Ok(ReverseRule::Rename {
            from: parse_var(&c[1])?,
            to: parse_var(&c[2])?,
        })
    }

    fn parse_const_elim(args: &str) -> Result<ReverseRule, String> {
        let c = CONST_ELIM_ARGS_PATTERN
            .captures(args)
            .ok_or_else(|| "expected <var> = true|false".to_string())?;
        Ok(ReverseRule::ConstElim {
            var: parse_var(&c[1])?,
            value: &c[2] == "true",
        })
    }

    fn parse_expr_elim(args: &str) -> Result<ReverseRule, String> {
        let c = EXPR_ELIM_ARGS_PATTERN
            .captures(args)
            .ok_or_else(|| "expected <var> = <expression>".to_string())?;
        Ok(ReverseRule::ExprElim {
            var: parse_var(&c[1])?,
            expr: Expr::parse(&c[2]).map_err(|e| e.to_string())?,
        })
    }

    fn parse_clause_add_note(args: &str) -> Result<ReverseRule, String> {
        let c = CLAUSE_ADD_NOTE_ARGS_PATTERN
            .captures(args)
            .ok_or_else(|| "expected <clause id> [<literals>]".to_string())?;
        Ok(ReverseRule::ClauseAddNote {
            id: parse_clause_id(&c[1])?,
            literals: parse_literals(&c[2])?,
        })
    }
}

impl fmt::Display for ReverseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReverseRule::Rename { from, to } => write!(f, "{} {} -> {}", self.kind(), from, to),
            ReverseRule::ConstElim { var, value } => {
                write!(f, "{} {} = {}", self.kind(), var, value)
            }
            ReverseRule::ExprElim { var, expr } => write!(f, "{} {} = {}", self.kind(), var, expr),
            ReverseRule::ClauseAddNote { id, literals } => {
                write!(f, "{} {} [{}]", self.kind(), id, literals_to_string(literals))
            }
        }
    }
}

/// Reads a whole reconstruction map.
pub fn read_reconstruct_map(text: &str) -> Result<Vec<ReverseRule>> {
    let mut rules = vec![];
    for (line, content) in trace_lines(text) {
        rules.push(ReverseRule::parse(line, content)?);
    }
    Ok(rules)
}
