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

use std::{iter, path::Path};

use crate::{
    error::DialogError,
    option::{Choices, Descriptor, GroupId, OptionTable},
    session::{Event, Session},
    widget::Widgets,
};

/// The tournament file.
const FILE: usize = 0;
/// The participants text box.
const PARTICIPANTS: usize = 3;
/// The Replace Engine button.
const REPLACE: usize = 5;

/// The participants and everything that edits them.
const PARTICIPANT_GROUP: GroupId = GroupId(1);
/// The largest count the spins accept.
const LOTS: i32 = 1_000_000_000;

/// Builds the table for the installed `engines`.
pub fn table(engines: &[String]) -> Result<OptionTable<Session>, DialogError> {
    let engines = iter::once(String::new()).chain(engines.iter().cloned());

    OptionTable::new(vec![
        Descriptor::file_name("Tournament file:", ".trn", |s: &mut Session| {
            &mut s.scratch.tourney_file
        }),
        Descriptor::check_box("Sync after round", |s: &mut Session| {
            &mut s.settings.tourney.round_sync
        }),
        Descriptor::check_box("Sync after cycle", |s: &mut Session| {
            &mut s.settings.tourney.cycle_sync
        }),
        Descriptor::text_box("Tourney participants:", |s: &mut Session| {
            &mut s.scratch.participants
        })
        .in_group(PARTICIPANT_GROUP),
        Descriptor::combo_box("Select Engine:", Choices::new(engines), |s: &mut Session| {
            &mut s.scratch.engine_choice
        })
        .on_select(add_participant)
        .in_group(PARTICIPANT_GROUP),
        Descriptor::button("Replace Engine", substitute).in_group(PARTICIPANT_GROUP),
        Descriptor::button("Upgrade Engine", substitute).in_group(PARTICIPANT_GROUP),
        Descriptor::spin(
            "Tourney type (0 = round-robin, 1 = gauntlet):",
            0,
            10,
            |s: &mut Session| &mut s.settings.tourney.kind,
        ),
        Descriptor::spin(
            "Number of tourney cycles (or Swiss rounds):",
            1,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.cycles,
        ),
        Descriptor::spin(
            "Default Number of Games in Match (or Pairing):",
            1,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.games,
        ),
        Descriptor::spin(
            "Pause between Match Games (msec):",
            0,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.pause,
        ),
        Descriptor::file_name("Save Tourney Games on:", ".pgn", |s: &mut Session| {
            &mut s.settings.save.game_file
        }),
        Descriptor::file_name("Game File with Opening Lines:", ".pgn", |s: &mut Session| {
            &mut s.settings.tourney.opening_file
        }),
        Descriptor::spin(
            "Game Number (-1 or -2 = Auto-Increment):",
            -2,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.opening_index,
        ),
        Descriptor::file_name("File with Start Positions:", ".fen", |s: &mut Session| {
            &mut s.settings.tourney.position_file
        }),
        Descriptor::spin(
            "Position Number (-1 or -2 = Auto-Increment):",
            -2,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.position_index,
        ),
        Descriptor::spin(
            "Rewind Index after this many Games (0 = never):",
            0,
            LOTS,
            |s: &mut Session| &mut s.settings.tourney.rewind_index,
        ),
        Descriptor::check_box("Disable own engine books by default", |s: &mut Session| {
            &mut s.settings.tourney.no_own_books
        }),
        Descriptor::button("Clone Tourney", clone_tourney),
        Descriptor::end_mark(accept),
    ])
}

/// Copies the tournament into the cells the dialog edits.
pub fn prepare(session: &mut Session) {
    session.scratch.tourney_file = session.settings.tourney.file.clone();
    session.scratch.participants = session.settings.tourney.participants.clone();
    session.scratch.engine_choice = Some(String::new());
}

/// Adds the picked engine to the participants.
fn add_participant(session: &mut Session, widgets: &mut dyn Widgets, _: usize) {
    if let Some(engine) = session
        .scratch
        .engine_choice
        .as_deref()
        .filter(|engine| !engine.is_empty())
    {
        widgets.append_line(PARTICIPANTS, engine);
    }
}

/// Replaces or upgrades participants of a running tournament.
fn substitute(session: &mut Session, _: &mut dyn Widgets, index: usize) {
    let participants = session.scratch.participants.clone().unwrap_or_default();
    session.push(Event::Substitute {
        participants,
        replace: index == REPLACE,
    });
}

/// Copies the settings of the tournament file that was typed in.
fn clone_tourney(session: &mut Session, widgets: &mut dyn Widgets, _: usize) {
    let file = widgets.text(FILE);
    if !file.is_empty() && Path::new(&file).is_file() {
        session.push(Event::CloneTourney(file));
    } else {
        session.push(Event::Error(String::from(
            "First you must specify an existing tourney file to clone",
        )));
    }
}

/// Stores the tournament and starts it if there is one.
fn accept(session: &mut Session, _: usize) -> bool {
    let tourney = &mut session.settings.tourney;
    tourney.participants.clone_from(&session.scratch.participants);
    tourney.file.clone_from(&session.scratch.tourney_file);

    if tourney.file.as_deref().unwrap_or("").is_empty() {
        return true;
    }
    if tourney.participants.as_deref().unwrap_or("").trim().is_empty() {
        session.push(Event::Error(String::from("A tourney needs participants")));
        return false;
    }
    session.push(Event::PopDown);
    session.push(Event::StartTourney);
    true
}

#[cfg(test)]
mod tests {
    use super::{FILE, PARTICIPANTS, REPLACE};
    use crate::{
        engine::Destination,
        menus::{press, Menu},
        session::{Event, Session},
        settings::{EngineEntry, Settings},
        widget::{MemoryWidgets, Widgets},
    };

    /// A session with two installed engines.
    fn session() -> Session {
        let mut settings = Settings::default();
        for name in ["Crab", "Fairy-Max"] {
            settings.engines.push(EngineEntry {
                name: String::from(name),
                command: name.to_lowercase(),
                directory: None,
                uci: true,
            });
        }
        Session::with_seed(settings, 0)
    }

    #[test]
    fn selected_engines_become_participants() {
        let mut session = session();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::Tourney.open(&mut session, &mut widgets).expect("valid");

        dialog.select(4, 2, &mut session, &mut widgets, &mut Destination::Local);
        dialog.select(4, 1, &mut session, &mut widgets, &mut Destination::Local);
        assert_eq!(widgets.text(PARTICIPANTS), "Fairy-Max\nCrab\n", "both added");

        press(&mut dialog, REPLACE, &mut session, &mut widgets);
        assert_eq!(
            session.drain_events(),
            [Event::Substitute {
                participants: String::from("Fairy-Max\nCrab\n"),
                replace: true
            }],
            "the typed participants are substituted"
        );
    }

    #[test]
    fn tourneys_need_participants() {
        let mut session = session();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::Tourney.open(&mut session, &mut widgets).expect("valid");

        widgets.set_text(FILE, "spring.trn");
        assert!(
            !dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "no participants"
        );
        assert!(
            matches!(session.drain_events().as_slice(), [Event::Error(_)]),
            "user is told why"
        );

        widgets.set_text(PARTICIPANTS, "Crab\nFairy-Max\n");
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "two participants"
        );
        assert_eq!(
            session.drain_events(),
            [Event::PopDown, Event::StartTourney],
            "tourney started"
        );
        assert_eq!(
            session.settings.tourney.file.as_deref(),
            Some("spring.trn"),
            "file stored"
        );
    }

    #[test]
    fn cloning_needs_an_existing_file() {
        let mut session = session();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::Tourney.open(&mut session, &mut widgets).expect("valid");

        widgets.set_text(FILE, "/this/tourney/does/not/exist.trn");
        press(&mut dialog, 18, &mut session, &mut widgets);
        assert!(
            matches!(session.drain_events().as_slice(), [Event::Error(_)]),
            "missing files can't be cloned"
        );
    }
}
