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

//! The SAT transformation trace format.
//!
//! A bundle records how a preprocessor turned an original CNF formula into a simplified one:
//! the transformation log allows the simplified formula to be rebuilt from the original one
//! (see [`ReplayEngine`]), and the reconstruction map allows a model of the simplified formula
//! to be lifted to a model of the original one (see [`ModelLifter`]).

mod bundle;
mod engine;
mod errors;
mod formula;
mod io;
mod trace;

pub use bundle::Bundle;
pub use bundle::BundleWriter;
pub use bundle::TransformSummary;
pub use bundle::MANIFEST_FILE;
pub use bundle::ORIGINAL_FILE;
pub use bundle::RECONSTRUCT_MAP_FILE;
pub use bundle::REQUIRED_FILES;
pub use bundle::SIMPLIFIED_FILE;
pub use bundle::TRANSFORM_LOG_FILE;

pub use engine::ModelLifter;
pub use engine::ReplayEngine;

pub use errors::TraceError;

pub use formula::normalize_dimacs;
pub use formula::same_normalized_dimacs;
pub use formula::ClauseId;
pub use formula::CnfFormula;
pub use formula::ModelCheck;

pub use io::read_model;
pub use io::write_model;
pub use io::DimacsReader;

pub use trace::read_reconstruct_map;
pub use trace::read_transform_log;
pub use trace::trace_lines;
pub use trace::FormulaMetadata;
pub use trace::GeneratorInfo;
pub use trace::Manifest;
pub use trace::Opcode;
pub use trace::ReverseRule;
pub use trace::Transform;
pub use trace::TransformStep;
pub use trace::FORMAT_VERSION;

pub use sttf_logic::Expr;
pub use sttf_logic::Literal;
pub use sttf_logic::LogicError;
pub use sttf_logic::Model;
pub use sttf_logic::VarId;
