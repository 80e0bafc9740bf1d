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

use super::{
    arg_output, arg_strict, canonicalize, create_output, file_warning_handler, load_bundle,
    ARG_BUNDLE, ARG_OUTPUT, ARG_STRICT,
};
use anyhow::{Context, Result};
use std::cell::Cell;
use std::fs::{self, File};
use sttf_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use sttf_core::{
    read_transform_log, CnfFormula, DimacsReader, ReplayEngine, TransformStep, ORIGINAL_FILE,
    TRANSFORM_LOG_FILE,
};

const CMD_NAME: &str = "replay";

const ARG_ORIGINAL: &str = "ORIGINAL";
const ARG_LOG: &str = "LOG";

/// Where the original formula and the transformation log are read from.
pub(crate) enum ReplayInput<'a> {
    Bundle(&'a str),
    Files { original: &'a str, log: &'a str },
}

pub(crate) struct ReplayCommand;

impl ReplayCommand {
    pub fn new() -> Self {
        ReplayCommand
    }
}

impl<'a> Command<'a> for ReplayCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Rebuilds the simplified formula from the original formula and the transformation log")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_BUNDLE)
                    .long("bundle")
                    .short("b")
                    .takes_value(true)
                    .help("sets the bundle directory")
                    .required_unless(ARG_ORIGINAL)
                    .conflicts_with_all(&[ARG_ORIGINAL, ARG_LOG]),
            )
            .arg(
                Arg::with_name(ARG_ORIGINAL)
                    .long("original")
                    .takes_value(true)
                    .help("sets the original formula file (instead of a bundle)")
                    .requires(ARG_LOG),
            )
            .arg(
                Arg::with_name(ARG_LOG)
                    .long("log")
                    .takes_value(true)
                    .help("sets the transformation log file (instead of a bundle)")
                    .requires(ARG_ORIGINAL),
            )
            .arg(arg_output("sets the output file of the simplified formula"))
            .arg(arg_strict("rejects steps targeting inactive clauses"))
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let input = match arg_matches.value_of(ARG_BUNDLE) {
            Some(b) => ReplayInput::Bundle(b),
            None => ReplayInput::Files {
                original: arg_matches.value_of(ARG_ORIGINAL).unwrap(),
                log: arg_matches.value_of(ARG_LOG).unwrap(),
            },
        };
        self.execute_internal(
            input,
            arg_matches.value_of(ARG_OUTPUT),
            arg_matches.is_present(ARG_STRICT),
        )
    }
}

impl ReplayCommand {
    pub(crate) fn execute_internal(
        &self,
        input: ReplayInput<'_>,
        output: Option<&str>,
        strict: bool,
    ) -> Result<()> {
        let warnings = Cell::new(0);
        let (original, steps, log_name) = match input {
            ReplayInput::Bundle(b) => {
                let bundle = load_bundle(b)?;
                let original =
                    bundle.read_original(&mut file_warning_handler(ORIGINAL_FILE, &warnings))?;
                (original, bundle.steps().to_vec(), TRANSFORM_LOG_FILE)
            }
            ReplayInput::Files { original, log } => {
                (read_formula(original, &warnings)?, read_log(log)?, log)
            }
        };
        info!("replaying {} step(s)", steps.len());
        let mut log_warning_handler = file_warning_handler(log_name, &warnings);
        let mut engine = ReplayEngine::default();
        engine.set_strict(strict);
        engine.add_warning_handler(&mut log_warning_handler);
        let simplified = engine.replay(original, &steps)?;
        info!(
            "simplified formula has {} variable(s) and {} clause(s)",
            simplified.max_active_var(),
            simplified.n_clauses()
        );
        let mut out = create_output(output)?;
        simplified.write_dimacs(out.as_mut())
    }
}

fn read_formula(path: &str, warnings: &Cell<usize>) -> Result<CnfFormula> {
    info!("reading original formula {}", canonicalize(path));
    let mut file =
        File::open(path).with_context(|| format!(r#"while opening file "{}""#, path))?;
    let mut handler = file_warning_handler(path, warnings);
    let mut reader = DimacsReader::default();
    reader.add_warning_handler(&mut handler);
    reader
        .read(&mut file)
        .with_context(|| format!(r#"while reading file "{}""#, path))
}

fn read_log(path: &str) -> Result<Vec<TransformStep>> {
    info!("reading transformation log {}", canonicalize(path));
    let text =
        fs::read_to_string(path).with_context(|| format!(r#"while reading file "{}""#, path))?;
    read_transform_log(&text).context("while reading the transformation log")
}
