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

use crate::{
    dialog::parse_leading_number,
    error::DialogError,
    option::{Descriptor, OptionTable},
    session::{Event, Scratch, Session, TimeControlKind},
    widget::Widgets,
};

/// The classical button.
const CLASSICAL: usize = 0;
/// The incremental button.
const INCREMENTAL: usize = 1;
/// Moves per session.
const MOVES: usize = 3;
/// Minutes per session.
const MINUTES: usize = 4;
/// Seconds per move.
const INCREMENT: usize = 5;
/// Shown in place of a value the current kind doesn't use.
const UNUSED: &str = "Unused";

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::button("classical", set_kind),
        Descriptor::button("incremental", set_kind),
        Descriptor::button("fixed max", set_kind),
        Descriptor::spin("Moves per session:", 0, 200, |s: &mut Session| {
            &mut s.scratch.tc_moves
        }),
        Descriptor::spin("Initial time (min):", 0, 10_000, |s: &mut Session| {
            &mut s.scratch.tc_minutes
        }),
        Descriptor::spin("Increment or max (sec/move):", 0, 10_000, |s: &mut Session| {
            &mut s.scratch.tc_increment
        }),
        Descriptor::label("Time-Odds factors:"),
        Descriptor::spin("Engine #1", 1, 1000, |s: &mut Session| &mut s.scratch.tc_odds_first),
        Descriptor::spin("Engine #2 / Human", 1, 1000, |s: &mut Session| {
            &mut s.scratch.tc_odds_second
        }),
        Descriptor::end_mark(accept),
    ])
}

/// The whole minutes at the start of a time control like `5` or `2:30`.
pub fn leading_minutes(time_control: &str) -> i32 {
    parse_leading_number(time_control) as i32
}

/// Copies the clock settings into the cells the dialog edits.
pub fn prepare(session: &mut Session) {
    let time = &session.settings.time;
    let scratch = &mut session.scratch;

    scratch.tc_kind = if time.search_time > 0 {
        TimeControlKind::Fixed
    } else if time.increment >= 0 {
        TimeControlKind::Incremental
    } else {
        TimeControlKind::Classical
    };
    scratch.tc_moves = time.moves_per_session;
    scratch.tc_minutes = leading_minutes(time.time_control.as_deref().unwrap_or(""));
    scratch.tc_increment = if time.search_time > 0 {
        time.search_time
    } else {
        time.increment.max(0)
    };
    scratch.tc_odds_first = time.first_odds;
    scratch.tc_odds_second = time.second_odds;
}

/// Switches to the kind of the pressed button.
fn set_kind(session: &mut Session, widgets: &mut dyn Widgets, index: usize) {
    session.scratch.tc_kind = match index {
        CLASSICAL => TimeControlKind::Classical,
        INCREMENTAL => TimeControlKind::Incremental,
        _ => TimeControlKind::Fixed,
    };
    relabel(&session.scratch, widgets);
}

/// Shows the values the current kind uses and marks the others unused.
pub fn relabel(scratch: &Scratch, widgets: &mut dyn Widgets) {
    let (moves, minutes, increment) = match scratch.tc_kind {
        TimeControlKind::Classical => (true, true, false),
        TimeControlKind::Incremental => (false, true, true),
        TimeControlKind::Fixed => (false, false, true),
    };
    for (index, used, value) in [
        (MOVES, moves, scratch.tc_moves),
        (MINUTES, minutes, scratch.tc_minutes),
        (INCREMENT, increment, scratch.tc_increment),
    ] {
        if used {
            widgets.set_text(index, &value.to_string());
        } else {
            widgets.set_text(index, UNUSED);
        }
    }
}

/// Stores the time control, unless it is impossible.
fn accept(session: &mut Session, _: usize) -> bool {
    let scratch = &session.scratch;
    let time = &mut session.settings.time;

    match scratch.tc_kind {
        TimeControlKind::Classical => {
            if scratch.tc_moves <= 0 || scratch.tc_minutes <= 0 {
                return false;
            }
            time.moves_per_session = scratch.tc_moves;
            time.time_control = Some(scratch.tc_minutes.to_string());
            time.increment = -1;
            time.search_time = 0;
        }
        TimeControlKind::Incremental => {
            if scratch.tc_minutes <= 0 && scratch.tc_increment <= 0 {
                return false;
            }
            time.time_control = Some(scratch.tc_minutes.to_string());
            time.increment = scratch.tc_increment;
            time.search_time = 0;
        }
        TimeControlKind::Fixed => {
            if scratch.tc_increment <= 0 {
                return false;
            }
            time.search_time = scratch.tc_increment;
        }
    }
    time.first_odds = scratch.tc_odds_first;
    time.second_odds = scratch.tc_odds_second;

    session.push(Event::ResetGame);
    true
}

#[cfg(test)]
mod tests {
    use super::{leading_minutes, INCREMENT, MINUTES, MOVES, UNUSED};
    use crate::{
        engine::Destination,
        menus::{press, Menu},
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn minutes_are_read_from_the_front() {
        assert_eq!(leading_minutes("5"), 5, "plain minutes");
        assert_eq!(leading_minutes("2:30"), 2, "seconds are dropped");
        assert_eq!(leading_minutes(""), 0, "nothing is zero");
    }

    #[test]
    fn kinds_relabel_their_fields() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::TimeControl
            .open(&mut session, &mut widgets)
            .expect("valid");
        assert_eq!(widgets.text(MOVES), "40", "classical uses moves");
        assert_eq!(widgets.text(INCREMENT), UNUSED, "classical has no increment");

        press(&mut dialog, 1, &mut session, &mut widgets);
        assert_eq!(widgets.text(MOVES), UNUSED, "incremental has no moves");
        assert_eq!(widgets.text(MINUTES), "5", "incremental uses minutes");
        assert_eq!(widgets.text(INCREMENT), "0", "incremental uses increment");

        widgets.set_text(INCREMENT, "3");
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "5 minutes plus 3 seconds is fine"
        );
        let time = &session.settings.time;
        assert_eq!(time.increment, 3, "increment stored");
        assert_eq!(time.time_control.as_deref(), Some("5"), "minutes stored");
        assert_eq!(session.drain_events(), [Event::ResetGame], "game restarts");
    }

    #[test]
    fn impossible_controls_are_rejected() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::TimeControl
            .open(&mut session, &mut widgets)
            .expect("valid");

        press(&mut dialog, 2, &mut session, &mut widgets);
        assert!(
            !dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "fixed with no time per move"
        );
        assert_eq!(session.settings.time.search_time, 0, "nothing stored");

        widgets.set_text(INCREMENT, "10");
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "ten seconds per move"
        );
        assert_eq!(session.settings.time.search_time, 10, "stored");
    }
}
