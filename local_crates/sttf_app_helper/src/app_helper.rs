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

use crate::{logging, Command};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{error, info};
use std::time::Instant;

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

/// The entry point of a command line application made of [`Command`]s.
///
/// # Example
///
/// ```no_run
/// use sttf_app_helper::AppHelper;
///
/// let app = AppHelper::new("my_app", "0.1.0", "me", "does nothing yet");
/// app.launch_app();
/// ```
pub struct AppHelper<'a> {
    app_name: &'a str,
    app_version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    /// Builds a new application without any command.
    pub fn new(app_name: &'a str, app_version: &'a str, author: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            app_version,
            author,
            about,
            commands: vec![],
        }
    }

    /// Registers a command.
    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn build_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .version(self.app_version)
            .author(self.author)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .setting(AppSettings::VersionlessSubcommands)
            .arg(
                Arg::with_name(ARG_LOGGING_LEVEL)
                    .long("logging-level")
                    .takes_value(true)
                    .possible_values(logging::LOGGING_LEVELS)
                    .default_value("info")
                    .global(true)
                    .help("sets the minimal logging level"),
            );
        for command in self.commands.iter() {
            app = app.subcommand(command.clap_subcommand());
        }
        app
    }

    /// Parses the command line arguments and executes the selected command.
    ///
    /// If the command fails, the chain of errors is logged and the process exits with status 1.
    pub fn launch_app(&self) {
        let matches = self.build_app().get_matches();
        if let Err(e) =
            logging::level_filter_from_str(logging_level(&matches)).and_then(logging::init_logger)
        {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
        let start = Instant::now();
        info!("{} {}", self.app_name, self.app_version);
        if let Err(e) = self.execute_command(&matches) {
            for (i, cause) in e.chain().enumerate() {
                if i == 0 {
                    error!("{}", cause);
                } else {
                    error!("caused by: {}", cause);
                }
            }
            std::process::exit(1);
        }
        info!("exiting successfully after {:?}", start.elapsed());
    }

    fn execute_command(&self, matches: &ArgMatches<'_>) -> Result<()> {
        let (name, sub_matches) = matches.subcommand();
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow!(r#"no such command "{}""#, name))?;
        match sub_matches {
            Some(m) => command.execute(m),
            None => Err(anyhow!(r#"missing arguments for command "{}""#, name)),
        }
    }
}

/// Returns the logging level, looking first at the sub-command level where global args may be set.
fn logging_level<'m>(matches: &'m ArgMatches<'_>) -> &'m str {
    if let (_, Some(sub_matches)) = matches.subcommand() {
        if sub_matches.occurrences_of(ARG_LOGGING_LEVEL) > 0 {
            if let Some(l) = sub_matches.value_of(ARG_LOGGING_LEVEL) {
                return l;
            }
        }
    }
    matches.value_of(ARG_LOGGING_LEVEL).unwrap_or("info")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::SubCommand;
    use std::{cell::Cell, rc::Rc};

    struct CountingCommand {
        calls: Rc<Cell<usize>>,
    }

    impl<'a> Command<'a> for CountingCommand {
        fn name(&self) -> &str {
            "count"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("count").arg(Arg::with_name("FAIL").long("fail"))
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if arg_matches.is_present("FAIL") {
                Err(anyhow!("failure requested"))
            } else {
                Ok(())
            }
        }
    }

    fn app_with_counter(calls: &Rc<Cell<usize>>) -> AppHelper<'static> {
        let mut app = AppHelper::new("test_app", "0.0.0", "nobody", "test");
        app.add_command(Box::new(CountingCommand {
            calls: Rc::clone(calls),
        }));
        app
    }

    #[test]
    fn test_execute_command() {
        let calls = Rc::new(Cell::new(0));
        let app = app_with_counter(&calls);
        let matches = app
            .build_app()
            .get_matches_from_safe(vec!["test_app", "count"])
            .unwrap();
        app.execute_command(&matches).unwrap();
        assert_eq!(1, calls.get());
    }

    #[test]
    fn test_execute_command_error() {
        let calls = Rc::new(Cell::new(0));
        let app = app_with_counter(&calls);
        let matches = app
            .build_app()
            .get_matches_from_safe(vec!["test_app", "count", "--fail"])
            .unwrap();
        assert_eq!(
            "failure requested",
            app.execute_command(&matches).unwrap_err().to_string()
        );
        assert_eq!(1, calls.get());
    }

    #[test]
    fn test_logging_level() {
        let calls = Rc::new(Cell::new(0));
        let app = app_with_counter(&calls);
        let matches = app
            .build_app()
            .get_matches_from_safe(vec!["test_app", "count"])
            .unwrap();
        assert_eq!("info", logging_level(&matches));
        let matches = app
            .build_app()
            .get_matches_from_safe(vec!["test_app", "--logging-level", "debug", "count"])
            .unwrap();
        assert_eq!("debug", logging_level(&matches));
        let matches = app
            .build_app()
            .get_matches_from_safe(vec!["test_app", "count", "--logging-level", "warn"])
            .unwrap();
        assert_eq!("warn", logging_level(&matches));
    }

    #[test]
    fn test_subcommand_required() {
        let calls = Rc::new(Cell::new(0));
        let app = app_with_counter(&calls);
        assert!(app
            .build_app()
            .get_matches_from_safe(vec!["test_app"])
            .is_err());
    }
}
