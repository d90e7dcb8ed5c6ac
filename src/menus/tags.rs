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

/// The tags, one per line.
pub const TEXT: usize = 0;
/// The tags and the button that saves them.
const TAGS_GROUP: GroupId = GroupId(1);

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::text_box("", |s: &mut Session| &mut s.scratch.tags_text).in_group(TAGS_GROUP),
        Descriptor::button("save changes", save_changes).in_group(TAGS_GROUP),
        Descriptor::end_mark(accept),
    ])
}

/// Saves the tags and leaves the window up.
fn save_changes(session: &mut Session, _: &mut dyn Widgets, _: usize) {
    replace_tags(session);
}

/// Saves the tags.
fn accept(session: &mut Session, _: usize) -> bool {
    replace_tags(session);
    true
}

/// Asks for the tags of the game to be replaced.
fn replace_tags(session: &mut Session) {
    let text = session.scratch.tags_text.clone().unwrap_or_default();
    session.push(Event::ReplaceTags(text));
}

#[cfg(test)]
mod tests {
    use super::TEXT;
    use crate::{
        engine::Destination,
        menus::{press, Note},
        registry::{DialogClass, Registry},
        session::{Event, Session},
        settings::Settings,
        widget::{MemoryWidgets, Widgets},
    };

    /// The save changes button.
    const SAVE: usize = 1;
    /// The tags of a game with no names yet.
    const TAGS: &str = "[Event \"?\"]\n[White \"?\"]\n";

    #[test]
    fn edited_tags_are_saved() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut registry = Registry::new();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Note::Tags
            .pop_up("Tags", TAGS, 0, &mut session, &mut registry, &mut widgets)
            .expect("valid")
            .expect("the window wasn't up");
        assert_eq!(widgets.text(TEXT), TAGS, "the tags are shown");

        widgets.set_text(TEXT, "[Event \"Club\"]\n[White \"?\"]\n");
        press(&mut dialog, SAVE, &mut session, &mut widgets);
        assert_eq!(
            session.drain_events(),
            [Event::ReplaceTags(String::from("[Event \"Club\"]\n[White \"?\"]\n"))],
            "saved without closing"
        );
        assert!(registry.is_up(DialogClass::Tags), "still up");

        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(session.drain_events().len(), 1, "saved again on OK");
    }

    #[test]
    fn shown_tags_are_replaced_in_place() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut registry = Registry::new();
        let mut widgets = MemoryWidgets::new(0);
        let opened = Note::Tags
            .pop_up("Tags", TAGS, 0, &mut session, &mut registry, &mut widgets)
            .expect("valid");
        assert!(opened.is_some(), "first pop up opens");

        let refreshed = Note::Tags
            .pop_up(
                "Edit book",
                "[Opening \"?\"]\n",
                0,
                &mut session,
                &mut registry,
                &mut widgets,
            )
            .expect("valid");
        assert!(refreshed.is_none(), "second pop up refreshes");
        assert_eq!(registry.slot(DialogClass::Tags).title(), "Edit book", "retitled");
        assert_eq!(widgets.text(TEXT), "[Opening \"?\"]\n", "new text shown");
        assert!(!registry.is_up(DialogClass::Comment), "comments are separate");
    }
}
