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
    option::{Choices, Descriptor, OptionTable},
    session::Session,
};

/// How positions in a game list are matched.
const SEARCH_MODES: [&str; 6] = [
    "Exact position match",
    "Shown position is subset",
    "Same material with exactly same Pawn chain",
    "Same material",
    "Material range (top board half optional)",
    "Material difference (optional stuff balanced)",
];
/// The stored value of each of [`SEARCH_MODES`].
const SEARCH_MODE_VALUES: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

/// Builds the Load Game Options table.
pub fn load_table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::check_box("Auto-Display Tags", |s: &mut Session| {
            &mut s.settings.load.auto_display_tags
        }),
        Descriptor::check_box("Auto-Display Comment", |s: &mut Session| {
            &mut s.settings.load.auto_display_comment
        }),
        Descriptor::label("Auto-Play speed of loaded games\n(0 = instant, -1 = off):"),
        Descriptor::fractional("Seconds per Move:", -1, 10_000_000, |s: &mut Session| {
            &mut s.settings.load.time_delay
        }),
        Descriptor::label("\noptions to use in game-viewer mode:"),
        Descriptor::text_box("", |s: &mut Session| &mut s.settings.load.viewer_options)
            .with_name("Viewer Options"),
        Descriptor::label("\nThresholds for position filtering in game list:"),
        Descriptor::spin("Elo of strongest player at least:", 0, 5000, |s: &mut Session| {
            &mut s.settings.load.elo_stronger
        }),
        Descriptor::spin("Elo of weakest player at least:", 0, 5000, |s: &mut Session| {
            &mut s.settings.load.elo_weaker
        }),
        Descriptor::spin("No games before year:", 0, 5000, |s: &mut Session| {
            &mut s.settings.load.date_threshold
        }),
        Descriptor::spin("Minimum nr consecutive positions:", 1, 50, |s: &mut Session| {
            &mut s.settings.load.stretch
        }),
        Descriptor::combo_box(
            "Search mode:",
            Choices::new(SEARCH_MODES).with_values(SEARCH_MODE_VALUES),
            |s: &mut Session| &mut s.scratch.search_mode,
        ),
        Descriptor::check_box("Also match reversed colors", |s: &mut Session| {
            &mut s.settings.load.ignore_colours
        }),
        Descriptor::check_box("Also match left-right flipped position", |s: &mut Session| {
            &mut s.settings.load.find_mirror
        }),
        Descriptor::end_mark(accept_load),
    ])
}

/// Puts the search mode in the form its combo box stores.
pub fn prepare_load(session: &mut Session) {
    let mode = session.settings.load.search_mode;
    session.scratch.search_mode = usize::try_from(mode - 1)
        .ok()
        .and_then(|index| SEARCH_MODE_VALUES.get(index))
        .map(|&value| String::from(value));
}

/// Turns the search mode back into a number.
fn accept_load(session: &mut Session, _: usize) -> bool {
    if let Some(mode) = session
        .scratch
        .search_mode
        .as_deref()
        .and_then(|mode| mode.parse().ok())
    {
        session.settings.load.search_mode = mode;
    }
    true
}

/// Builds the Save Game Options table.
pub fn save_table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::check_box("Auto-Save Games", |s: &mut Session| {
            &mut s.settings.save.auto_save
        }),
        Descriptor::file_name("Save Games on File:", ".pgn", |s: &mut Session| {
            &mut s.settings.save.game_file
        }),
        Descriptor::file_name("Save Final Positions on File:", ".fen", |s: &mut Session| {
            &mut s.settings.save.position_file
        }),
        Descriptor::text_box("PGN Event Header:", |s: &mut Session| {
            &mut s.settings.save.event_header
        }),
        Descriptor::check_box("Old Save Style (as opposed to PGN)", |s: &mut Session| {
            &mut s.settings.save.old_style
        }),
        Descriptor::check_box("Include Number Tag in tourney PGN", |s: &mut Session| {
            &mut s.settings.save.number_tag
        }),
        Descriptor::check_box("Save Score/Depth Info in PGN", |s: &mut Session| {
            &mut s.settings.save.extended_info
        }),
        Descriptor::check_box("Save Out-of-Book Info in PGN", |s: &mut Session| {
            &mut s.settings.save.out_of_book_info
        }),
        Descriptor::end(),
    ])
}
