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

//! Typed errors of the trace format.
//!
//! Library functions return [`anyhow::Result`]; the root cause of a failure is one of these errors
//! (or a [`LogicError`](sttf_logic::LogicError)) and can be recovered with `downcast_ref`.

use sttf_logic::VarId;
use std::path::PathBuf;
use thiserror::Error;

use crate::ClauseId;

/// The errors raised while reading, replaying and lifting traces.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// An expected file of a bundle is absent.
    #[error("required file is missing: {}", .0.display())]
    Structural(PathBuf),

    /// A line does not follow its grammar.
    #[error(r#"syntax error at line {line}: {reason} in "{text}""#)]
    Parse {
        line: usize,
        text: String,
        reason: String,
    },

    /// A transformation log line uses an opcode outside of the known set.
    #[error(r#"unknown opcode "{opcode}" at line {line}"#)]
    UnknownOpcode { line: usize, opcode: String },

    /// A reconstruction map line uses an unknown rule keyword.
    #[error(r#"unknown reconstruction rule "{keyword}" at line {line}"#)]
    UnknownRule { line: usize, keyword: String },

    /// The manifest lacks a required field or holds an invalid value.
    #[error("invalid manifest: {0}")]
    ManifestValidation(String),

    /// A clause was inserted with an identifier which is not fresh.
    #[error("clause id {0} was already allocated")]
    ClauseIdReused(ClauseId),

    /// A step targets a clause which is not active (strict replay only).
    #[error("no active clause with id {0}")]
    MissingClause(ClauseId),

    /// A rename rule reads a variable which has no value (strict lifting only).
    #[error("cannot map variable {from} to {to}: {from} has no value")]
    UnresolvedRename { from: VarId, to: VarId },
}
