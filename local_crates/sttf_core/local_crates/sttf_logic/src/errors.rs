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

use crate::VarId;
use thiserror::Error;

/// The errors raised while handling literals, models and expressions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogicError {
    /// The text does not denote a nonzero signed integer.
    #[error(r#"invalid literal "{0}""#)]
    InvalidLiteral(String),

    /// The text does not denote a positive integer.
    #[error(r#"invalid variable "{0}""#)]
    InvalidVariable(String),

    /// An expression refers to a variable the model does not assign.
    #[error("undefined variable {0} in model")]
    UndefinedVariable(VarId),

    /// The text matches none of the expression forms.
    #[error(r#"malformed expression "{0}""#)]
    MalformedExpression(String),
}
