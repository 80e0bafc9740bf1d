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

use super::{arg_bundle, load_bundle, ARG_BUNDLE};
use anyhow::Result;
use sttf_app_helper::{info, App, AppSettings, ArgMatches, Command, SubCommand};

const CMD_NAME: &str = "info";

pub(crate) struct InfoCommand;

impl InfoCommand {
    pub fn new() -> Self {
        InfoCommand
    }
}

impl<'a> Command<'a> for InfoCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays a summary of a bundle")
            .setting(AppSettings::DisableVersion)
            .arg(arg_bundle())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.execute_internal(arg_matches.value_of(ARG_BUNDLE).unwrap())
    }
}

impl InfoCommand {
    pub(crate) fn execute_internal(&self, bundle_path: &str) -> Result<()> {
        let bundle = load_bundle(bundle_path)?;
        let manifest = bundle.manifest();
        match &manifest.timestamp {
            Some(t) => info!(
                "generated by {} {} at {}",
                manifest.generator.tool, manifest.generator.version, t
            ),
            None => info!(
                "generated by {} {}",
                manifest.generator.tool, manifest.generator.version
            ),
        }
        let summary = bundle.summary();
        info!(
            "original formula: {} variable(s), {} clause(s)",
            summary.original.variables, summary.original.clauses
        );
        info!(
            "simplified formula: {} variable(s), {} clause(s)",
            summary.simplified.variables, summary.simplified.clauses
        );
        info!("{} transformation step(s)", summary.total_steps);
        for (opcode, count) in summary.opcodes.iter() {
            info!("  {}: {}", opcode, count);
        }
        info!("{} reconstruction rule(s)", summary.reverse_rules);
        for (kind, count) in summary.rule_kinds.iter() {
            info!("  {}: {}", kind, count);
        }
        Ok(())
    }
}
