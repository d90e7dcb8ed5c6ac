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
    error::DialogError,
    option::{Descriptor, OptionTable},
    session::{Event, Session},
    widget::Widgets,
};

/// The shuffle check box.
const SHUFFLE: usize = 0;
/// The start position number.
const POSITION: usize = 1;
/// The randomize button.
const RANDOMIZE: usize = 2;

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::check_box("shuffle", |s: &mut Session| &mut s.scratch.shuffle),
        Descriptor::spin(
            "Start-position number:",
            -1,
            2_000_000_000,
            |s: &mut Session| &mut s.scratch.frc_position,
        ),
        Descriptor::button("randomize", set_random),
        Descriptor::button("pick fixed", set_random),
        Descriptor::end_mark(accept),
    ])
}

/// Copies the start position into the cells the dialog edits.
pub fn prepare(session: &mut Session) {
    session.scratch.shuffle = session.settings.variant.shuffle;
    session.scratch.frc_position = session.settings.variant.frc_position;
}

/// Sets the start position to random, or to a fixed random number, and turns
/// shuffling on.
fn set_random(session: &mut Session, widgets: &mut dyn Widgets, index: usize) {
    session.scratch.frc_position = if index == RANDOMIZE {
        -1
    } else {
        session.random_position()
    };
    session.refresh(POSITION);
    widgets.set_state(SHUFFLE, true);
}

/// Starts a new game.
fn accept(session: &mut Session, _: usize) -> bool {
    session.settings.variant.shuffle = session.scratch.shuffle;
    session.settings.variant.frc_position = session.scratch.frc_position;
    session.push(Event::ResetGame);
    true
}

#[cfg(test)]
mod tests {
    use super::{POSITION, RANDOMIZE, SHUFFLE};
    use crate::{
        engine::Destination,
        menus::{press, Menu},
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn picking_a_position_refreshes_its_field() {
        let mut session = Session::with_seed(Settings::default(), 3);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::Shuffle.open(&mut session, &mut widgets).expect("valid");
        assert_eq!(widgets.text(POSITION), "-1", "random by default");

        press(&mut dialog, RANDOMIZE + 1, &mut session, &mut widgets);
        let picked = session.scratch.frc_position;
        assert!(picked >= 0, "a fixed position was picked");
        assert_eq!(widgets.text(POSITION), picked.to_string(), "field refreshed");
        assert!(widgets.state(SHUFFLE), "shuffling turned on");
        assert_eq!(session.settings.variant.frc_position, -1, "not stored yet");

        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(session.settings.variant.frc_position, picked, "stored on accept");
        assert_eq!(
            session.settings.variant.shuffle_position(),
            Some(picked),
            "the next game is shuffled"
        );
        assert_eq!(session.drain_events(), [Event::ResetGame], "new game");

        press(&mut dialog, RANDOMIZE, &mut session, &mut widgets);
        assert_eq!(widgets.text(POSITION), "-1", "back to random");
    }

    #[test]
    fn shuffling_can_be_turned_off() {
        let mut settings = Settings::default();
        settings.variant.shuffle = true;
        let mut session = Session::with_seed(settings, 3);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::Shuffle.open(&mut session, &mut widgets).expect("valid");
        assert!(widgets.state(SHUFFLE), "shows the stored flag");

        widgets.set_state(SHUFFLE, false);
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(session.settings.variant.shuffle_position(), None, "not shuffled");
    }
}
