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
    arg_bundle, arg_output, arg_strict, canonicalize, create_output, file_warning_handler,
    load_bundle, ARG_BUNDLE, ARG_OUTPUT, ARG_STRICT,
};
use anyhow::{anyhow, Context, Result};
use std::cell::Cell;
use std::fs::File;
use std::io::BufReader;
use sttf_app_helper::{info, warn, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use sttf_core::{read_model, write_model, Bundle, Model, ModelLifter, ORIGINAL_FILE};

const CMD_NAME: &str = "lift";

const ARG_MODEL: &str = "MODEL";
const ARG_CHECK: &str = "CHECK";

pub(crate) struct LiftCommand;

impl LiftCommand {
    pub fn new() -> Self {
        LiftCommand
    }
}

impl<'a> Command<'a> for LiftCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Lifts a model of the simplified formula to a model of the original formula")
            .setting(AppSettings::DisableVersion)
            .arg(arg_bundle())
            .arg(
                Arg::with_name(ARG_MODEL)
                    .long("model")
                    .short("m")
                    .takes_value(true)
                    .help("sets the file containing the model of the simplified formula")
                    .required(true),
            )
            .arg(arg_output("sets the output file of the lifted model"))
            .arg(arg_strict(
                "rejects renaming rules whose source variable has no value",
            ))
            .arg(
                Arg::with_name(ARG_CHECK)
                    .long("check")
                    .help("checks that the lifted model satisfies the original formula"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        self.execute_internal(
            arg_matches.value_of(ARG_BUNDLE).unwrap(),
            arg_matches.value_of(ARG_MODEL).unwrap(),
            arg_matches.value_of(ARG_OUTPUT),
            arg_matches.is_present(ARG_STRICT),
            arg_matches.is_present(ARG_CHECK),
        )
    }
}

impl LiftCommand {
    pub(crate) fn execute_internal(
        &self,
        bundle_path: &str,
        model_path: &str,
        output: Option<&str>,
        strict: bool,
        check: bool,
    ) -> Result<()> {
        let bundle = load_bundle(bundle_path)?;
        info!("reading model {}", canonicalize(model_path));
        let file = File::open(model_path)
            .with_context(|| format!(r#"while opening file "{}""#, model_path))?;
        let model = read_model(&mut BufReader::new(file))
            .with_context(|| format!(r#"while reading file "{}""#, model_path))?;
        info!("model assigns {} variable(s)", model.len());
        let mut rule_warning_handler =
            |index, message| warn!("reconstruction rule {}: {}", index, message);
        let mut lifter = ModelLifter::default();
        lifter.set_strict(strict);
        lifter.add_warning_handler(&mut rule_warning_handler);
        let lifted = lifter.lift(&model, bundle.rules())?;
        info!("lifted model assigns {} variable(s)", lifted.len());
        if check {
            check_lifted_model(&bundle, &lifted)?;
        }
        let mut out = create_output(output)?;
        write_model(&lifted, out.as_mut())
    }
}

fn check_lifted_model(bundle: &Bundle, lifted: &Model) -> Result<()> {
    let warnings = Cell::new(0);
    let original = bundle.read_original(&mut file_warning_handler(ORIGINAL_FILE, &warnings))?;
    let check = original.check_model(lifted);
    if check.is_model() {
        info!(
            "the lifted model satisfies the {} clause(s) of the original formula",
            check.n_satisfied
        );
        return Ok(());
    }
    for id in check.falsified.iter() {
        warn!("clause {} of the original formula is falsified", id);
    }
    if check.n_undetermined > 0 {
        warn!(
            "{} clause(s) of the original formula are neither satisfied nor falsified",
            check.n_undetermined
        );
    }
    Err(anyhow!(
        "the lifted model is not a model of the original formula ({} falsified clause(s), {} undetermined clause(s))",
        check.falsified.len(),
        check.n_undetermined
    ))
}
