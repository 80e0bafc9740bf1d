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

mod create_command;
pub(crate) use create_command::CreateCommand;

mod info_command;
pub(crate) use info_command::InfoCommand;

mod lift_command;
pub(crate) use lift_command::LiftCommand;

mod replay_command;
pub(crate) use replay_command::ReplayCommand;

mod validate_command;
pub(crate) use validate_command::ValidateCommand;

use anyhow::{Context, Result};
use std::cell::Cell;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use sttf_app_helper::{info, warn, Arg};
use sttf_core::Bundle;

const ARG_BUNDLE: &str = "BUNDLE";
const ARG_OUTPUT: &str = "OUTPUT";
const ARG_STRICT: &str = "STRICT";

pub(crate) fn arg_bundle<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_BUNDLE)
        .long("bundle")
        .short("b")
        .takes_value(true)
        .help("sets the bundle directory")
        .required(true)
}

pub(crate) fn arg_output<'a>(help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(ARG_OUTPUT)
        .long("output")
        .short("o")
        .takes_value(true)
        .help(help)
}

pub(crate) fn arg_strict<'a>(help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(ARG_STRICT).long("strict").help(help)
}

pub(crate) fn load_bundle(bundle_path: &str) -> Result<Bundle> {
    info!("loading bundle {}", canonicalize(bundle_path));
    Bundle::load(Path::new(bundle_path))
}

/// Opens the output file, or returns the standard output if no file is given.
pub(crate) fn create_output(output: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(o) => {
            let r = Box::new(
                File::create(o).with_context(|| format!(r#"while creating file "{}""#, o))?,
            );
            info!("setting output file to {}", canonicalize(o));
            r
        }
        None => {
            info!("setting output to STDOUT");
            Box::new(std::io::stdout())
        }
    })
}

/// Returns a handler logging the warnings raised while reading a file, and counting them.
pub(crate) fn file_warning_handler<'a>(
    file: &'a str,
    counter: &'a Cell<usize>,
) -> impl FnMut(usize, String) + 'a {
    move |line, message| {
        warn!("{}, line {}: {}", file, line, message);
        counter.set(counter.get() + 1);
    }
}

pub(crate) fn canonicalize(file_path: &str) -> String {
    match fs::canonicalize(&PathBuf::from(file_path)) {
        Ok(p) => format!("{}", p.display()),
        Err(_) => file_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::replay_command::ReplayInput;
    use super::*;
    use anyhow::Error;
    use logtest::Logger;
    use std::path::Path;
    use sttf_app_helper::Level;
    use sttf_core::{BundleWriter, CnfFormula, Literal};
    use tempfile::TempDir;

    #[test]
    fn logtest() {
        let mut logger = Logger::start();
        logtest_create_ok(&mut logger);
        logtest_validate_with_replay(&mut logger);
        logtest_validate_strict_replay_error(&mut logger);
        logtest_validate_missing_file(&mut logger);
        logtest_replay_files(&mut logger);
        logtest_lift_with_check(&mut logger);
        logtest_lift_check_error(&mut logger);
        logtest_info(&mut logger);
        assert!(logger.pop().is_none());
    }

    fn assert_log_message<T>(logger: &mut Logger, level: Level, message: T)
    where
        T: AsRef<str>,
    {
        let log_message = logger.pop().unwrap();
        assert_eq!(
            level,
            log_message.level(),
            "expected log level {}, got log level {} and message \"{}\"",
            level,
            log_message.level(),
            log_message.args()
        );
        assert_eq!(
            message.as_ref(),
            log_message.args(),
            "expected message \"{}\", got log level {} and message \"{}\"",
            message.as_ref(),
            log_message.level(),
            log_message.args()
        );
    }

    fn assert_err_message(expected_chain: Vec<String>, actual: Error) {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(expected_chain, error_chain);
    }

    fn formula(clauses: &[&[i64]]) -> CnfFormula {
        let mut f = CnfFormula::new();
        for c in clauses {
            f.add_clause(
                c.iter()
                    .map(|l| l.to_string().parse::<Literal>().unwrap())
                    .collect(),
            );
        }
        f
    }

    /// Writes the bundle of a transformation whose log removes a clause twice.
    fn simple_bundle() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BundleWriter::new(formula(&[&[1, 2], &[-1, 3], &[-2, -3], &[4]]));
        writer
            .var_elim(4.into(), Some("pure_literal"))
            .clause_remove(4.into(), Some("pure_literal_clause"))
            .var_rename(3.into(), 5.into());
        writer.write(dir.path(), "test", "1.0").unwrap();
        dir
    }

    /// Writes the bundle of a transformation whose reverse rules give models of the original formula.
    fn sound_bundle() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = BundleWriter::new(formula(&[&[1, 2], &[-1, 3], &[-2, -3], &[1, -4]]));
        writer
            .var_elim(4.into(), Some("pure_literal"))
            .var_rename(3.into(), 5.into());
        writer.write(dir.path(), "test", "1.0").unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        format!("{}", path.display())
    }

    fn path_str(dir: &TempDir) -> String {
        format!("{}", dir.path().display())
    }

    fn assert_validate_prefix(logger: &mut Logger, bundle_path: &str) {
        assert_log_message(
            logger,
            Level::Info,
            format!("loading bundle {}", canonicalize(bundle_path)),
        );
        assert_log_message(
            logger,
            Level::Info,
            "bundle structure and manifest are valid (generated by test 1.0)",
        );
        assert_log_message(logger, Level::Info, "transformation log contains 3 step(s)");
        assert_log_message(logger, Level::Info, "  clause_remove: 1");
        assert_log_message(logger, Level::Info, "  var_elim: 1");
        assert_log_message(logger, Level::Info, "  var_rename: 1");
        assert_log_message(logger, Level::Info, "reconstruction map contains 2 rule(s)");
        assert_log_message(logger, Level::Info, "  rev_elim: 1");
        assert_log_message(logger, Level::Info, "  rev_map: 1");
    }

    fn logtest_create_ok(logger: &mut Logger) {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(dir.path(), "input.cnf", "c input\np cnf 3 2\n1 2 0\n-3 0\n");
        let output = format!("{}", dir.path().join("bundle").display());
        CreateCommand::new()
            .execute_internal(&input, &output, "sttf", "0.1.0")
            .unwrap();
        assert_log_message(
            logger,
            Level::Info,
            format!("reading input file {}", canonicalize(&input)),
        );
        assert_log_message(
            logger,
            Level::Info,
            "formula has 3 variable(s) and 2 clause(s)",
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("bundle written to {}", canonicalize(&output)),
        );
        let bundle = Bundle::load(Path::new(&output)).unwrap();
        assert!(bundle.steps().is_empty());
        assert!(bundle.rules().is_empty());
    }

    fn logtest_validate_with_replay(logger: &mut Logger) {
        let dir = simple_bundle();
        let bundle_path = path_str(&dir);
        ValidateCommand::new()
            .execute_internal(&bundle_path, true, false)
            .unwrap();
        assert_validate_prefix(logger, &bundle_path);
        assert_log_message(logger, Level::Info, "replaying the transformation log");
        assert_log_message(
            logger,
            Level::Warn,
            "transform.log, line 2: clause_remove ignored: no active clause with id 4",
        );
        assert_log_message(logger, Level::Info, "replay reproduces the simplified formula");
        assert_log_message(logger, Level::Info, "bundle is valid, with 1 warning(s)");
    }

    fn logtest_validate_strict_replay_error(logger: &mut Logger) {
        let dir = simple_bundle();
        let bundle_path = path_str(&dir);
        let err = ValidateCommand::new()
            .execute_internal(&bundle_path, true, true)
            .unwrap_err();
        assert_err_message(
            vec![
                "while applying step 2 at line 2".to_string(),
                "no active clause with id 4".to_string(),
            ],
            err,
        );
        assert_validate_prefix(logger, &bundle_path);
        assert_log_message(logger, Level::Info, "replaying the transformation log");
    }

    fn logtest_validate_missing_file(logger: &mut Logger) {
        let dir = simple_bundle();
        let bundle_path = path_str(&dir);
        fs::remove_file(dir.path().join(sttf_core::RECONSTRUCT_MAP_FILE)).unwrap();
        let err = ValidateCommand::new()
            .execute_internal(&bundle_path, false, false)
            .unwrap_err();
        assert_err_message(
            vec![format!(
                "required file is missing: {}",
                dir.path().join(sttf_core::RECONSTRUCT_MAP_FILE).display()
            )],
            err,
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("loading bundle {}", canonicalize(&bundle_path)),
        );
    }

    fn logtest_replay_files(logger: &mut Logger) {
        let dir = tempfile::tempdir().unwrap();
        let original = write_file(
            dir.path(),
            "original.cnf",
            "p cnf 4 4\n1 2 0\n-1 3 0\n-2 -3 0\n4 0\n",
        );
        let log = write_file(dir.path(), "steps.log", "1 var_elim 4\n2 var_rename 3 5\n");
        let output = write_file(dir.path(), "simplified.cnf", "");
        ReplayCommand::new()
            .execute_internal(
                ReplayInput::Files {
                    original: &original,
                    log: &log,
                },
                Some(&output),
                true,
            )
            .unwrap();
        assert_log_message(
            logger,
            Level::Info,
            format!("reading original formula {}", canonicalize(&original)),
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("reading transformation log {}", canonicalize(&log)),
        );
        assert_log_message(logger, Level::Info, "replaying 2 step(s)");
        assert_log_message(
            logger,
            Level::Info,
            "simplified formula has 5 variable(s) and 3 clause(s)",
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("setting output file to {}", canonicalize(&output)),
        );
        assert_eq!(
            "p cnf 5 3\n1 2 0\n-1 5 0\n-2 -5 0\n",
            fs::read_to_string(&output).unwrap()
        );
    }

    fn logtest_lift_with_check(logger: &mut Logger) {
        let dir = sound_bundle();
        let bundle_path = path_str(&dir);
        let work_dir = tempfile::tempdir().unwrap();
        let model = write_file(work_dir.path(), "model.txt", "s SATISFIABLE\nv 1 -2 5 0\n");
        let output = write_file(work_dir.path(), "lifted.txt", "");
        LiftCommand::new()
            .execute_internal(&bundle_path, &model, Some(&output), true, true)
            .unwrap();
        assert_log_message(
            logger,
            Level::Info,
            format!("loading bundle {}", canonicalize(&bundle_path)),
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("reading model {}", canonicalize(&model)),
        );
        assert_log_message(logger, Level::Info, "model assigns 3 variable(s)");
        assert_log_message(logger, Level::Info, "lifted model assigns 5 variable(s)");
        assert_log_message(
            logger,
            Level::Info,
            "the lifted model satisfies the 4 clause(s) of the original formula",
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("setting output file to {}", canonicalize(&output)),
        );
        assert_eq!(
            "s SATISFIABLE\nv 1 -2 3 -4 5\nv 0\n",
            fs::read_to_string(&output).unwrap()
        );
    }

    fn logtest_lift_check_error(logger: &mut Logger) {
        let dir = simple_bundle();
        let bundle_path = path_str(&dir);
        let work_dir = tempfile::tempdir().unwrap();
        let model = write_file(work_dir.path(), "model.txt", "1 -2 5\n");
        let err = LiftCommand::new()
            .execute_internal(&bundle_path, &model, None, false, true)
            .unwrap_err();
        assert_err_message(
            vec!["the lifted model is not a model of the original formula (1 falsified clause(s), 0 undetermined clause(s))".to_string()],
            err,
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("loading bundle {}", canonicalize(&bundle_path)),
        );
        assert_log_message(
            logger,
            Level::Info,
            format!("reading model {}", canonicalize(&model)),
        );
        assert_log_message(logger, Level::Info, "model assigns 3 variable(s)");
        assert_log_message(logger, Level::Info, "lifted model assigns 5 variable(s)");
        assert_log_message(
            logger,
            Level::Warn,
            "clause 4 of the original formula is falsified",
        );
    }

    fn logtest_info(logger: &mut Logger) {
        let dir = simple_bundle();
        let bundle_path = path_str(&dir);
        let timestamp = Bundle::load(dir.path())
            .unwrap()
            .manifest()
            .timestamp
            .clone()
            .unwrap();
        InfoCommand::new().execute_internal(&bundle_path).unwrap();
        let expected = vec![
            format!("loading bundle {}", canonicalize(&bundle_path)),
            format!("generated by test 1.0 at {}", timestamp),
            "original formula: 4 variable(s), 4 clause(s)".to_string(),
            "simplified formula: 5 variable(s), 3 clause(s)".to_string(),
            "3 transformation step(s)".to_string(),
            "  clause_remove: 1".to_string(),
            "  var_elim: 1".to_string(),
            "  var_rename: 1".to_string(),
            "2 reconstruction rule(s)".to_string(),
            "  rev_elim: 1".to_string(),
            "  rev_map: 1".to_string(),
        ];
        for message in expected {
            assert_log_message(logger, Level::Info, message);
        }
    }
}
