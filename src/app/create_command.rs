// sttf
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

use super::{canonicalize, file_warning_handler};
use anyhow::{Context, Result};
use std::cell::Cell;
use std::fs::File;
use std::path::Path;
use sttf_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use sttf_core::{BundleWriter, DimacsReader};

const CMD_NAME: &str = "create";

const ARG_INPUT: &str = "INPUT";
const ARG_OUTPUT_DIR: &str = "OUTPUT_DIR";
const ARG_TOOL: &str = "TOOL";
const ARG_TOOL_VERSION: &str = "TOOL_VERSION";

pub(crate) struct CreateCommand;

impl CreateCommand {
    pub fn new() -> Self {
        CreateCommand
    }
}

impl<'a> Command<'a> for CreateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Writes an identity bundle (empty log and map) for a CNF formula")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_INPUT)
                    .long("input")
                    .short("i")
                    .takes_value(true)
                    .help("sets the DIMACS input file")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_OUTPUT_DIR)
                    .long("output")
                    .short("o")
                    .takes_value(true)
                    .help("sets the bundle directory to create")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_TOOL)
                    .long("tool")
                    .takes_value(true)
                    .default_value(env!("CARGO_PKG_NAME"))
                    .help("sets the generator name written in the manifest"),
            )
            .arg(
                Arg::with_name(ARG_TOOL_VERSION)
                    .long("tool-version")
                    .takes_value(true)
                    .default_value(env!("CARGO_PKG_VERSION"))
                    .help("sets the generator version written in the manifest"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.execute_internal(
            arg_matches.value_of(ARG_INPUT).unwrap(),
            arg_matches.value_of(ARG_OUTPUT_DIR).unwrap(),
            arg_matches.value_of(ARG_TOOL).unwrap(),
            arg_matches.value_of(ARG_TOOL_VERSION).unwrap(),
        )
    }
}

impl CreateCommand {
    pub(crate) fn execute_internal(
        &self,
        input: &str,
        output_dir: &str,
        tool: &str,
        tool_version: &str,
    ) -> Result<()> {
        info!("reading input file {}", canonicalize(input));
        let mut file =
            File::open(input).with_context(|| format!(r#"while opening file "{}""#, input))?;
        let warnings = Cell::new(0);
        let mut handler = file_warning_handler(input, &warnings);
        let mut reader = DimacsReader::default();
        reader.add_warning_handler(&mut handler);
        let formula = reader
            .read(&mut file)
            .with_context(|| format!(r#"while reading file "{}""#, input))?;
        info!(
            "formula has {} variable(s) and {} clause(s)",
            formula.n_vars(),
            formula.n_clauses()
        );
        BundleWriter::new(formula).write(Path::new(output_dir), tool, tool_version)?;
        info!("bundle written to {}", canonicalize(output_dir));
        Ok(())
    }
}
