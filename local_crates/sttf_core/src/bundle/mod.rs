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

mod bundle_reader;
pub use bundle_reader::Bundle;
pub use bundle_reader::MANIFEST_FILE;
pub use bundle_reader::ORIGINAL_FILE;
pub use bundle_reader::RECONSTRUCT_MAP_FILE;
pub use bundle_reader::REQUIRED_FILES;
pub use bundle_reader::SIMPLIFIED_FILE;
pub use bundle_reader::TRANSFORM_LOG_FILE;

mod bundle_writer;
pub use bundle_writer::BundleWriter;

mod summary;
pub use summary::TransformSummary;
