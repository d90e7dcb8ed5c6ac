/*
 * Hermit, a graphical front end for chess engines
 * Copyright (C) 2024 Jasper Shovelton
 *
 * Hermit is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Hermit is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Hermit. If not, see <https://www.gnu.org/licenses/>.
 */

use std::path::Path;

use crate::{
    error::DialogError,
    option::{Choices, Descriptor, OptionTable},
    session::{Event, Session},
    settings::EngineEntry,
};

/// Which engine the loaded one replaces.
const SLOTS: [&str; 2] = ["First Engine", "Second Engine"];

/// Builds the table for the installed `engines`.
pub fn table(engines: &[String]) -> Result<OptionTable<Session>, DialogError> {
    let labels = Some(String::new()).into_iter().chain(engines.iter().cloned());

    OptionTable::new(vec![
        Descriptor::combo_box(
            "Select engine from list:",
            Choices::new(labels),
            |s: &mut Session| &mut s.scratch.engine_choice,
        ),
        Descriptor::label("or specify one below:"),
        Descriptor::text_box("Nickname (optional):", |s: &mut Session| {
            &mut s.scratch.nickname
        }),
        Descriptor::check_box(
            "Use nickname in PGN player tags of engine-engine games",
            |s: &mut Session| &mut s.scratch.use_nickname,
        ),
        Descriptor::path_name("Engine Directory:", |s: &mut Session| {
            &mut s.scratch.engine_dir
        }),
        Descriptor::file_name("Engine Command:", "", |s: &mut Session| {
            &mut s.scratch.engine_command
        }),
        Descriptor::label("(Directory will be derived from engine path when empty)"),
        Descriptor::check_box("UCI", |s: &mut Session| &mut s.scratch.uci),
        Descriptor::check_box(
            "WB protocol v1 (do not wait for engine features)",
            |s: &mut Session| &mut s.scratch.protocol_v1,
        ),
        Descriptor::check_box("Must not use GUI book", |s: &mut Session| {
            &mut s.scratch.no_book
        }),
        Descriptor::check_box("Add this engine to the list", |s: &mut Session| {
            &mut s.scratch.add_to_list
        }),
        Descriptor::check_box("Force current variant with this engine", |s: &mut Session| {
            &mut s.scratch.store_variant
        }),
        Descriptor::combo_box(
            "Load mentioned engine as",
            Choices::new(SLOTS),
            |s: &mut Session| &mut s.scratch.load_as,
        ),
        Descriptor::end_mark(accept),
    ])
}

/// Resets the dialog to its defaults.
pub fn prepare(session: &mut Session) {
    let scratch = &mut session.scratch;
    scratch.uci = false;
    scratch.store_variant = false;
    scratch.protocol_v1 = false;
    scratch.use_nickname = false;
    scratch.add_to_list = true;
    scratch.no_book = true;
    scratch.load_as = Some(String::from(SLOTS[0]));
    scratch.engine_choice = Some(String::new());
    scratch.engine_dir = Some(String::new());
    scratch.nickname = Some(String::new());
    scratch.engine_command = Some(String::new());
}

/// Loads the picked or described engine.
fn accept(session: &mut Session, _: usize) -> bool {
    let slot = usize::from(session.scratch.load_as.as_deref() == Some(SLOTS[1]));
    let choice = session.scratch.engine_choice.clone().unwrap_or_default();

    let engine = if choice.is_empty() {
        let scratch = &session.scratch;
        let command = scratch.engine_command.as_deref().unwrap_or("").trim();
        (!command.is_empty()).then(|| {
            describe_engine(
                command,
                scratch.nickname.as_deref(),
                scratch.engine_dir.as_deref(),
                scratch.uci,
            )
        })
    } else {
        session
            .settings
            .engines
            .iter()
            .find(|engine| engine.name == choice)
            .cloned()
    };
    let Some(engine) = engine else {
        let message = if choice.is_empty() {
            String::from("Pick an engine or give its command")
        } else {
            format!("No engine called {choice}")
        };
        session.push(Event::Error(message));
        return false;
    };

    if choice.is_empty() && session.scratch.add_to_list {
        session.settings.engines.push(engine.clone());
    }
    session.push(Event::PopDown);
    session.push(Event::LoadEngine { slot, engine });
    true
}

/// Describes an engine that isn't in the list yet.
///
/// Unless a nickname is given the engine is named after its executable, and
/// unless a directory is given it runs where its executable is.
fn describe_engine(
    command: &str,
    nickname: Option<&str>,
    directory: Option<&str>,
    uci: bool,
) -> EngineEntry {
    let program = command.split_whitespace().next().unwrap_or(command);
    let path = Path::new(program);
    let name = nickname
        .filter(|nickname| !nickname.is_empty())
        .map(String::from)
        .or_else(|| {
            path.file_name()
                .map(|file| file.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| String::from(program));
    let directory = directory
        .filter(|directory| !directory.is_empty())
        .map(String::from)
        .or_else(|| {
            path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(|parent| parent.to_string_lossy().into_owned())
        });

    EngineEntry {
        name,
        command: String::from(command),
        directory,
        uci,
    }
}

#[cfg(test)]
mod tests {
    use super::describe_engine;
    use crate::{
        engine::Destination,
        menus::Menu,
        session::{Event, Session},
        settings::{EngineEntry, Settings},
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn engines_are_named_after_their_executable() {
        let engine = describe_engine("/opt/crab/crab --uci", Some(""), None, true);
        assert_eq!(engine.name, "crab", "file name of the program");
        assert_eq!(engine.directory.as_deref(), Some("/opt/crab"), "its directory");
        assert_eq!(engine.command, "/opt/crab/crab --uci", "command kept whole");

        let engine = describe_engine("fairymax", Some("Fairy-Max"), Some("/games"), false);
        assert_eq!(engine.name, "Fairy-Max", "nickname wins");
        assert_eq!(engine.directory.as_deref(), Some("/games"), "directory wins");
    }

    #[test]
    fn listed_engines_are_loaded() {
        let mut settings = Settings::default();
        settings.engines.push(EngineEntry {
            name: String::from("Crab"),
            command: String::from("crab"),
            directory: None,
            uci: true,
        });
        let mut session = Session::with_seed(settings, 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::LoadEngine
            .open(&mut session, &mut widgets)
            .expect("valid");

        assert!(
            !dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "nothing picked"
        );
        assert!(
            matches!(session.drain_events().as_slice(), [Event::Error(_)]),
            "user is told why"
        );

        widgets.set_selection(0, 1);
        widgets.set_selection(12, 1);
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "Crab picked"
        );
        let events = session.drain_events();
        assert!(
            matches!(
                events.as_slice(),
                [Event::PopDown, Event::LoadEngine { slot: 1, engine }] if engine.name == "Crab"
            ),
            "Crab replaces the second engine"
        );
        assert_eq!(session.settings.engines.len(), 1, "listed engines aren't added again");
    }

    #[test]
    fn new_engines_are_added_to_the_list() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::LoadEngine
            .open(&mut session, &mut widgets)
            .expect("valid");

        widgets.set_text(5, "/usr/games/fairymax");
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "command given"
        );
        assert_eq!(
            session.settings.engine_names(),
            ["fairymax"],
            "added under its file name"
        );
    }
}
