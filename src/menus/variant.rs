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
    option::{Descriptor, GroupId, OptionTable},
    session::{Event, Session},
    widget::Widgets,
};

/// The label of every variant button and the name of its variant.
const VARIANTS: [(&str, &str); 24] = [
    ("normal", "normal"),
    ("fairy", "fairy"),
    ("FRC", "fischerandom"),
    ("Seirawan", "seirawan"),
    ("wild castle", "wildcastle"),
    ("Superchess", "super"),
    ("no castle", "nocastle"),
    ("crazyhouse", "crazyhouse"),
    ("knightmate", "knightmate"),
    ("bughouse", "bughouse"),
    ("berolina", "berolina"),
    ("shogi (9x9)", "shogi"),
    ("cylinder", "cylinder"),
    ("xiangqi (9x10)", "xiangqi"),
    ("shatranj", "shatranj"),
    ("courier (12x8)", "courier"),
    ("makruk", "makruk"),
    ("atomic", "atomic"),
    ("two kings", "twokings"),
    ("Capablanca (10x8)", "capablanca"),
    ("3-checks", "3check"),
    ("suicide", "suicide"),
    ("give-away", "giveaway"),
    ("losers", "losers"),
];

/// Every control, so that picking a variant also reads the board size.
const EVERYTHING: GroupId = GroupId(0);

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    let mut options: Vec<_> = VARIANTS
        .iter()
        .map(|&(label, _)| Descriptor::button(label, pick))
        .collect();
    options.extend([
        Descriptor::label("Board size ( -1 = default for selected variant):"),
        Descriptor::spin("Number of Board Ranks:", -1, 15, |s: &mut Session| {
            &mut s.settings.variant.ranks
        }),
        Descriptor::spin("Number of Board Files:", -1, 16, |s: &mut Session| {
            &mut s.settings.variant.files
        }),
        Descriptor::spin("Holdings Size:", -1, 15, |s: &mut Session| {
            &mut s.settings.variant.holdings
        }),
    ]);
    let options = options
        .into_iter()
        .map(|option| option.in_group(EVERYTHING))
        .chain([Descriptor::end()])
        .collect();
    OptionTable::new(options)
}

/// Switches to the variant of the pressed button and starts a new game.
fn pick(session: &mut Session, _: &mut dyn Widgets, index: usize) {
    let Some(&(_, name)) = VARIANTS.get(index) else {
        return;
    };
    session.settings.variant.name = String::from(name);
    session.settings.variant.shuffle = false;
    session.push(Event::ResetGame);
    session.push(Event::PopDown);
}

#[cfg(test)]
mod tests {
    use super::VARIANTS;
    use crate::{
        menus::{press, Menu},
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn picking_reads_the_board_size() {
        let mut settings = Settings::default();
        settings.variant.shuffle = true;
        let mut session = Session::with_seed(settings, 0);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Menu::NewVariant
            .open(&mut session, &mut widgets)
            .expect("valid");

        let files = VARIANTS.len() + 2;
        widgets.set_text(files, "10");
        press(&mut dialog, 19, &mut session, &mut widgets);

        let variant = &session.settings.variant;
        assert_eq!(variant.name, "capablanca", "variant picked");
        assert_eq!(variant.files, 10, "files read before picking");
        assert_eq!(variant.ranks, -1, "ranks unchanged");
        assert!(!variant.shuffle, "a new variant isn't shuffled");
        assert_eq!(
            session.drain_events(),
            [Event::ResetGame, Event::PopDown],
            "new game in a closed dialog"
        );
    }
}
