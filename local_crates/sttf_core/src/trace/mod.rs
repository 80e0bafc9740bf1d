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

mod manifest;
pub use manifest::FormulaMetadata;
pub use manifest::FORMAT_VERSION;
pub use manifest::GeneratorInfo;
pub use manifest::Manifest;

mod reconstruct_map;
pub use reconstruct_map::read_reconstruct_map;
pub use reconstruct_map::ReverseRule;

mod trace_lines;
pub(crate) use trace_lines::parse_error;
pub use trace_lines::trace_lines;

mod transform_log;
pub use transform_log::read_transform_log;
pub use transform_log::Opcode;
pub use transform_log::Transform;
pub use transform_log::TransformStep;
