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

use super::{arg_bundle, arg_strict, file_warning_handler, load_bundle, ARG_BUNDLE, ARG_STRICT};
use anyhow::{anyhow, Result};
use std::cell::Cell;
use sttf_app_helper::{info, warn, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use sttf_core::{
    normalize_dimacs, ReplayEngine, ORIGINAL_FILE, SIMPLIFIED_FILE, TRANSFORM_LOG_FILE,
};

const CMD_NAME: &str = "validate";

const ARG_REPLAY: &str = "REPLAY";

pub(crate) struct ValidateCommand;

impl ValidateCommand {
    pub fn new() -> Self {
        ValidateCommand
    }
}

impl<'a> Command<'a> for ValidateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks that a bundle is well-formed and consistent")
            .setting(AppSettings::DisableVersion)
            .arg(arg_bundle())
            .arg(
                Arg::with_name(ARG_REPLAY)
                    .long("replay")
                    .short("r")
                    .help("also checks that replaying the log reproduces the simplified formula"),
            )
            .arg(arg_strict(
                "rejects log steps targeting inactive clauses during the replay",
            ))
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.execute_internal(
            arg_matches.value_of(ARG_BUNDLE).unwrap(),
            arg_matches.is_present(ARG_REPLAY),
            arg_matches.is_present(ARG_STRICT),
        )
    }
}

impl ValidateCommand {
    pub(crate) fn execute_internal(&self, bundle_path: &str, replay: bool, strict: bool) -> Result<()> {
        let bundle = load_bundle(bundle_path)?;
        let manifest = bundle.manifest();
        info!(
            "bundle structure and manifest are valid (generated by {} {})",
            manifest.generator.tool, manifest.generator.version
        );
        let summary = bundle.summary();
        info!("transformation log contains {} step(s)", summary.total_steps);
        for (opcode, count) in summary.opcodes.iter() {
            info!("  {}: {}", opcode, count);
        }
        info!("reconstruction map contains {} rule(s)", summary.reverse_rules);
        for (kind, count) in summary.rule_kinds.iter() {
            info!("  {}: {}", kind, count);
        }
        let warnings = Cell::new(0);
        let original = bundle.read_original(&mut file_warning_handler(ORIGINAL_FILE, &warnings))?;
        let simplified =
            bundle.read_simplified(&mut file_warning_handler(SIMPLIFIED_FILE, &warnings))?;
        for mismatch in bundle.manifest_mismatches(&original, &simplified) {
            warn!("{}", mismatch);
            warnings.set(warnings.get() + 1);
        }
        if replay {
            info!("replaying the transformation log");
            let mut log_warning_handler = file_warning_handler(TRANSFORM_LOG_FILE, &warnings);
            let mut engine = ReplayEngine::default();
            engine.set_strict(strict);
            engine.add_warning_handler(&mut log_warning_handler);
            let replayed = engine.replay(original, bundle.steps())?;
            let replayed_lines = normalize_dimacs(&replayed.to_canonical_text());
            let expected_lines = normalize_dimacs(&bundle.simplified_text()?);
            if replayed_lines != expected_lines {
                return Err(anyhow!(
                    "replay does not reproduce the simplified formula ({} line(s) expected, {} replayed)",
                    expected_lines.len(),
                    replayed_lines.len()
                ));
            }
            info!("replay reproduces the simplified formula");
        }
        match warnings.get() {
            0 => info!("bundle is valid"),
            n => info!("bundle is valid, with {} warning(s)", n),
        }
        Ok(())
    }
}
