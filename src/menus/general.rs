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
};

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::check_box("Absolute Analysis Scores", |s: &mut Session| {
            &mut s.settings.general.absolute_scores
        }),
        Descriptor::check_box("Almost Always Queen (Detour Under-Promote)", |s: &mut Session| {
            &mut s.settings.general.always_queen
        }),
        Descriptor::check_box("Animate Dragging", |s: &mut Session| {
            &mut s.settings.general.animate_dragging
        }),
        Descriptor::check_box("Animate Moving", |s: &mut Session| {
            &mut s.settings.general.animate
        }),
        Descriptor::check_box("Auto Flag", |s: &mut Session| &mut s.settings.general.auto_flag),
        Descriptor::check_box("Auto Flip View", |s: &mut Session| {
            &mut s.settings.general.auto_flip_view
        }),
        Descriptor::check_box("Blindfold", |s: &mut Session| &mut s.settings.general.blindfold),
        Descriptor::check_box("Hide Thinking from Human", |s: &mut Session| {
            &mut s.settings.general.hide_thinking
        }),
        Descriptor::check_box("Highlight Last Move", |s: &mut Session| {
            &mut s.settings.general.highlight_last_move
        }),
        Descriptor::check_box("Highlight with Arrow", |s: &mut Session| {
            &mut s.settings.general.highlight_with_arrow
        }),
        Descriptor::check_box("Move Sound", |s: &mut Session| &mut s.settings.general.move_sound),
        Descriptor::check_box("One-Click Moving", |s: &mut Session| {
            &mut s.settings.general.one_click
        }),
        Descriptor::check_box("Ponder Next Move", |s: &mut Session| &mut s.settings.engine.ponder),
        Descriptor::check_box("Popup Move Errors", |s: &mut Session| {
            &mut s.settings.general.popup_move_errors
        }),
        Descriptor::check_box("Scores in Move List", |s: &mut Session| {
            &mut s.settings.general.scores_in_move_list
        }),
        Descriptor::check_box("Show Coordinates", |s: &mut Session| {
            &mut s.settings.general.show_coords
        }),
        Descriptor::check_box("Sticky Windows", |s: &mut Session| {
            &mut s.settings.general.sticky_windows
        }),
        Descriptor::check_box("Test Legality", |s: &mut Session| {
            &mut s.settings.general.test_legality
        }),
        Descriptor::column_break(),
        Descriptor::spin("Flash Moves (0 = no flashing):", 0, 10, |s: &mut Session| {
            &mut s.settings.general.flash_count
        }),
        Descriptor::spin("Flash Rate (high = fast):", 1, 10, |s: &mut Session| {
            &mut s.settings.general.flash_rate
        }),
        Descriptor::spin("Animation Speed (high = slow):", 5, 100, |s: &mut Session| {
            &mut s.settings.general.anim_speed
        }),
        Descriptor::spin("Zoom factor in Evaluation Graph:", 1, 5, |s: &mut Session| {
            &mut s.settings.general.zoom
        }),
        Descriptor::end_mark(accept),
    ])
}

/// Remembers what the accept callback compares against.
pub fn prepare(session: &mut Session) {
    session.scratch.old_ponder = session.settings.engine.ponder;
    session.scratch.old_show_coords = session.settings.general.show_coords;
    session.scratch.old_blindfold = session.settings.general.blindfold;
}

/// Tells the rest of the front end what changed.
fn accept(session: &mut Session, _: usize) -> bool {
    let general = &session.settings.general;
    let redraw = general.show_coords != session.scratch.old_show_coords
        || general.blindfold != session.scratch.old_blindfold;
    let clear = !general.highlight_last_move;
    let ponder = session.settings.engine.ponder;

    if ponder != session.scratch.old_ponder {
        session.push(Event::Ponder(ponder));
    }
    if clear {
        session.push(Event::ClearHighlights);
    }
    if redraw {
        session.push(Event::Redraw);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::table;
    use crate::{
        dialog::Dialog,
        engine::Destination,
        menus::Menu,
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn changes_become_events() {
        let table = table().expect("valid");
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut widgets = MemoryWidgets::new(table.len());
        Menu::General.prepare(&mut session);
        let mut dialog = Dialog::show(&table, &mut session, &mut widgets);

        let blindfold = table
            .iter()
            .position(|option| option.text() == "Blindfold")
            .expect("there is a blindfold option");
        let ponder = table
            .iter()
            .position(|option| option.text() == "Ponder Next Move")
            .expect("there is a ponder option");
        widgets.set_state(blindfold, true);
        widgets.set_state(ponder, true);

        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert!(session.settings.general.blindfold, "blindfold stored");
        assert_eq!(
            session.drain_events(),
            [Event::Ponder(true), Event::Redraw],
            "ponder and redraw requested"
        );
    }
}
