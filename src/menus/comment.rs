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

/// The comment.
pub const TEXT: usize = 0;
/// The comment and the buttons that act on it.
const COMMENT_GROUP: GroupId = GroupId(1);

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::text_box("", |s: &mut Session| &mut s.scratch.comment_text)
            .in_group(COMMENT_GROUP),
        Descriptor::button("clear", clear).in_group(COMMENT_GROUP),
        Descriptor::button("save changes", save_changes).in_group(COMMENT_GROUP),
        Descriptor::end_mark(accept),
    ])
}

/// Empties the text box. The comment itself only changes once it is saved.
fn clear(_: &mut Session, widgets: &mut dyn Widgets, _: usize) {
    widgets.set_text(TEXT, "");
}

/// Saves the comment and leaves the window up.
fn save_changes(session: &mut Session, _: &mut dyn Widgets, _: usize) {
    replace_comment(session);
}

/// Saves the comment.
fn accept(session: &mut Session, _: usize) -> bool {
    replace_comment(session);
    true
}

/// Asks for the comment after the ply of the window to be replaced.
fn replace_comment(session: &mut Session) {
    let text = session.scratch.comment_text.clone().unwrap_or_default();
    let index = session.scratch.comment_index;
    session.push(Event::ReplaceComment { index, text });
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

    /// The clear button.
    const CLEAR: usize = 1;
    /// The save changes button.
    const SAVE: usize = 2;

    #[test]
    fn comments_are_saved_for_their_ply() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut registry = Registry::new();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Note::Comment
            .pop_up(
                "Comment on 1. e4",
                "best by test",
                1,
                &mut session,
                &mut registry,
                &mut widgets,
            )
            .expect("valid")
            .expect("the window wasn't up");
        assert_eq!(widgets.text(TEXT), "best by test", "the comment is shown");

        widgets.set_text(TEXT, "best by test?!");
        press(&mut dialog, SAVE, &mut session, &mut widgets);
        assert_eq!(
            session.drain_events(),
            [Event::ReplaceComment {
                index: 1,
                text: String::from("best by test?!")
            }],
            "saved without closing"
        );

        press(&mut dialog, CLEAR, &mut session, &mut widgets);
        assert_eq!(widgets.text(TEXT), "", "the text box is empty");
        assert!(session.is_idle(), "clearing saves nothing");

        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(
            session.drain_events(),
            [Event::ReplaceComment {
                index: 1,
                text: String::new()
            }],
            "the cleared comment is saved"
        );
        assert!(registry.is_up(DialogClass::Comment), "the front end closes it");
    }

    #[test]
    fn open_comments_follow_the_game() {
        let mut session = Session::with_seed(Settings::default(), 0);
        let mut registry = Registry::new();
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Note::Comment
            .pop_up(
                "Comment on 1. e4",
                "",
                1,
                &mut session,
                &mut registry,
                &mut widgets,
            )
            .expect("valid")
            .expect("the window wasn't up");

        let again = Note::Comment
            .pop_up(
                "Comment on 1... e5",
                "symmetrical",
                2,
                &mut session,
                &mut registry,
                &mut widgets,
            )
            .expect("valid");
        assert!(again.is_none(), "the open window is reused");
        let slot = registry.slot(DialogClass::Comment);
        assert_eq!(slot.title(), "Comment on 1... e5", "title replaced");
        assert_eq!(slot.text(), Some("symmetrical"), "text replaced");
        assert_eq!(widgets.text(TEXT), "symmetrical", "the control shows it");

        assert!(
            dialog.accept(&mut session, &mut widgets, &mut Destination::Local),
            "always accepted"
        );
        assert_eq!(
            session.drain_events(),
            [Event::ReplaceComment {
                index: 2,
                text: String::from("symmetrical")
            }],
            "saved for the new ply"
        );
    }
}
