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
        Descriptor::check_box("Ponder Next Move", |s: &mut Session| &mut s.settings.engine.ponder),
        Descriptor::spin("Maximum Number of CPUs per Engine:", 0, 1000, |s: &mut Session| {
            &mut s.settings.engine.cores
        }),
        Descriptor::path_name("Polyglot Directory:", |s: &mut Session| {
            &mut s.settings.engine.polyglot_dir
        }),
        Descriptor::spin("Hash-Table Size (MB):", 0, 16_000, |s: &mut Session| {
            &mut s.settings.engine.hash_size
        }),
        Descriptor::path_name("Nalimov EGTB Path:", |s: &mut Session| {
            &mut s.settings.engine.egtb_path
        }),
        Descriptor::spin("EGTB Cache Size (MB):", 0, 1000, |s: &mut Session| {
            &mut s.settings.engine.egtb_cache
        }),
        Descriptor::check_box("Use GUI Book", |s: &mut Session| &mut s.settings.engine.use_book),
        Descriptor::file_name("Opening-Book Filename:", ".bin", |s: &mut Session| {
            &mut s.settings.engine.book_file
        }),
        Descriptor::spin("Book Depth (moves):", 0, 100, |s: &mut Session| {
            &mut s.settings.engine.book_depth
        }),
        Descriptor::spin("Book Variety (0) vs. Strength (100):", 0, 100, |s: &mut Session| {
            &mut s.settings.engine.book_strength
        }),
        Descriptor::check_box("Engine #1 Has Own Book", |s: &mut Session| {
            &mut s.settings.engine.first_has_own_book
        }),
        Descriptor::check_box("Engine #2 Has Own Book", |s: &mut Session| {
            &mut s.settings.engine.second_has_own_book
        }),
        Descriptor::end_mark(accept),
    ])
}

/// Remembers what the accept callback compares against.
pub fn prepare(session: &mut Session) {
    session.scratch.old_cores = session.settings.engine.cores;
    session.scratch.old_ponder = session.settings.engine.ponder;
}

/// Tells running engines about the settings they need straight away.
fn accept(session: &mut Session, _: usize) -> bool {
    let cores = session.settings.engine.cores;
    let ponder = session.settings.engine.ponder;
    if cores != session.scratch.old_cores {
        session.push(Event::Cores(cores));
    }
    if ponder != session.scratch.old_ponder {
        session.push(Event::Ponder(ponder));
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::{
        engine::Destination,
        menus::Menu,
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn cores_are_announced_when_changed() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::CommonEngine
            .open(&mut session, &mut widgets)
            .expect("valid");

        widgets.set_text(1, "4");
        widgets.set_text(3, "99999");
        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(session.settings.engine.hash_size, 16_000, "hash is clamped");
        assert_eq!(session.drain_events(), [Event::Cores(4)], "cores changed");

        Menu::CommonEngine.prepare(&mut session);
        dialog.accept(&mut session, &mut widgets, &mut Destination::Local);
        assert!(session.is_idle(), "nothing changed the second time");
    }
}
