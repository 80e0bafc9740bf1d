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

use crate::{Literal, LogicError, Model};
use std::{fmt, str::FromStr};

/// A boolean expression over DIMACS variables.
///
/// Expressions are written in a fully parenthesized prefix form:
///
/// ```text
/// E := [-]digits | NOT(E) | AND(E,E) | OR(E,E) | XOR(E,E)
/// ```
///
/// Keywords are case-sensitive and whitespace around sub-expressions is ignored.
/// The text is parsed once into a tree; evaluations only walk the tree.
///
/// # Examples
///
/// ```
/// use sttf_logic::{Expr, Model};
///
/// let e: Expr = "AND(OR(1,2),NOT(3))".parse().unwrap();
/// let model = Model::from(vec![(1, true), (2, false), (3, false)]);
/// assert!(e.eval(&model).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    source: String,
    root: ExprNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExprNode {
    Lit(Literal),
    Not(Box<ExprNode>),
    Binary(BinaryOperator, Box<ExprNode>, Box<ExprNode>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOperator {
    And,
    Or,
    Xor,
}

impl BinaryOperator {
    const ALL: [BinaryOperator; 3] = [BinaryOperator::And, BinaryOperator::Or, BinaryOperator::Xor];

    fn keyword(self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
        }
    }

    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            BinaryOperator::And => a && b,
            BinaryOperator::Or => a || b,
            BinaryOperator::Xor => a ^ b,
        }
    }
}

impl Expr {
    /// Parses an expression.
    ///
    /// An error is returned if the text (or one of its sub-expressions) matches none of the grammar forms,
    /// including unbalanced parentheses and operator bodies without exactly the expected arguments.
    pub fn parse(text: &str) -> Result<Self, LogicError> {
        let source = text.trim().to_string();
        let root = parse_node(&source)?;
        Ok(Expr { source, root })
    }

    /// Evaluates the expression against a (partial) model.
    ///
    /// Evaluation does not short-circuit: both operands of `AND`, `OR` and `XOR` are always evaluated,
    /// so `OR(1, 7)` fails with an undefined variable if 7 is unassigned, even when 1 is true.
    ///
    /// # Examples
    ///
    /// ```
    /// use sttf_logic::{Expr, LogicError, Model, VarId};
    ///
    /// let e: Expr = "5".parse().unwrap();
    /// assert_eq!(
    ///     LogicError::UndefinedVariable(VarId::from(5)),
    ///     e.eval(&Model::new()).unwrap_err()
    /// );
    /// ```
    pub fn eval(&self, model: &Model) -> Result<bool, LogicError> {
        self.root.eval(model)
    }

    /// Returns the (trimmed) text this expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl ExprNode {
    fn eval(&self, model: &Model) -> Result<bool, LogicError> {
        match self {
            ExprNode::Lit(l) => model
                .value_of(*l)
                .ok_or_else(|| LogicError::UndefinedVariable(l.var_id())),
            ExprNode::Not(e) => e.eval(model).map(|b| !b),
            ExprNode::Binary(op, a, b) => {
                let a = a.eval(model)?;
                let b = b.eval(model)?;
                Ok(op.apply(a, b))
            }
        }
    }
}

fn malformed(text: &str) -> LogicError {
    LogicError::MalformedExpression(text.to_string())
}

fn parse_node(text: &str) -> Result<ExprNode, LogicError> {
    let t = text.trim();
    if is_literal(t) {
        return t
            .parse::<Literal>()
            .map(ExprNode::Lit)
            .map_err(|_| malformed(t));
    }
    if let Some(body) = operator_body(t, "NOT") {
        return Ok(ExprNode::Not(Box::new(parse_node(body)?)));
    }
    for op in BinaryOperator::ALL.iter() {
        if let Some(body) = operator_body(t, op.keyword()) {
            let (a, b) = split_args(body).ok_or_else(|| malformed(body))?;
            return Ok(ExprNode::Binary(
                *op,
                Box::new(parse_node(a)?),
                Box::new(parse_node(b)?),
            ));
        }
    }
    Err(malformed(t))
}

fn is_literal(t: &str) -> bool {
    let digits = t.strip_prefix('-').unwrap_or(t);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the text between the parentheses of `KEYWORD(...)`.
fn operator_body<'a>(t: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = t.strip_prefix(keyword)?.strip_prefix('(')?;
    rest.strip_suffix(')')
}

/// Splits `a,b` on the first comma at parenthesis depth 0.
fn split_args(body: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => return Some((&body[..i], &body[i + 1..])),
            _ => {}
        }
    }
    None
}

impl FromStr for Expr {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
