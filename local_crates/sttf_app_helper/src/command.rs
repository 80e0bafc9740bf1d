// sttf_app_helper
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

use anyhow::Result;
use clap::{App, ArgMatches};

/// A trait for the sub-commands of an application.
///
/// Each command provides its own [`clap`] sub-command definition,
/// and is executed with the matches of this sub-command when it is selected by the user.
pub trait Command<'a> {
    /// Returns the name of the command, as given on the command line.
    fn name(&self) -> &str;

    /// Builds the [`clap`] sub-command corresponding to this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command.
    ///
    /// The `arg_matches` are the ones of the sub-command.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
