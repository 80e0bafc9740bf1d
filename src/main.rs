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

mod app;

use app::{CreateCommand, InfoCommand, LiftCommand, ReplayCommand, ValidateCommand};
use sttf_app_helper::AppHelper;

fn main() {
    let mut app = AppHelper::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        "Emmanuel Lonca <lonca@cril.fr>",
        "Replays, validates and lifts SAT transformation traces.",
    );
    app.add_command(Box::new(ValidateCommand::new()));
    app.add_command(Box::new(ReplayCommand::new()));
    app.add_command(Box::new(LiftCommand::new()));
    app.add_command(Box::new(InfoCommand::new()));
    app.add_command(Box::new(CreateCommand::new()));
    app.launch_app();
}
