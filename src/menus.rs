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

//! The settings dialogs of the front end.
//!
//! Each [`Menu`] has a table over [`Session`], a step that fills the scratch
//! cells of the table before it is shown and an accept callback that turns
//! the scratch cells back into settings and [`Event`](crate::session::Event)s.
//! Tables that don't depend on the settings are built once.
//!
//! A [`Note`] is a window about the game rather than the settings. It stays
//! up next to the settings dialogs and follows the game while it is up.

use std::sync::Arc;

use lazy_static::lazy_static;
use tracing::debug;

use crate::{
    dialog::Dialog,
    engine::Destination,
    error::DialogError,
    option::{OptionTable, Scope},
    registry::{DialogClass, PopUp, Registry},
    session::Session,
    settings::Settings,
    widget::Widgets,
};

/// The Edit Comment window.
mod comment;
/// The Common Engine Options dialog.
mod common;
/// The General Options dialog.
mod general;
/// The Load Game and Save Game Options dialogs.
mod games;
/// The Load Engine dialog.
mod install;
/// The New Shuffle Game dialog.
mod shuffle;
/// The Sound Options dialog.
mod sound;
/// The Tags window.
mod tags;
/// The Time Control dialog.
mod time;
/// The Tourney Options dialog.
mod tourney;
/// The New Variant dialog.
mod variant;

pub use sound::resolve_sound;
pub use time::leading_minutes;

/// A shared, immutable dialog table over [`Session`].
pub type SessionTable = Arc<OptionTable<Session>>;
/// A shown settings dialog.
pub type SessionDialog = Dialog<SessionTable>;

lazy_static! {
    static ref GENERAL: Result<SessionTable, DialogError> = general::table().map(Arc::new);
    static ref LOAD_GAME: Result<SessionTable, DialogError> = games::load_table().map(Arc::new);
    static ref SAVE_GAME: Result<SessionTable, DialogError> = games::save_table().map(Arc::new);
    static ref SOUND: Result<SessionTable, DialogError> = sound::table().map(Arc::new);
    static ref COMMON_ENGINE: Result<SessionTable, DialogError> = common::table().map(Arc::new);
    static ref TIME_CONTROL: Result<SessionTable, DialogError> = time::table().map(Arc::new);
    static ref SHUFFLE: Result<SessionTable, DialogError> = shuffle::table().map(Arc::new);
    static ref NEW_VARIANT: Result<SessionTable, DialogError> = variant::table().map(Arc::new);
    static ref COMMENT: Result<SessionTable, DialogError> = comment::table().map(Arc::new);
    static ref TAGS: Result<SessionTable, DialogError> = tags::table().map(Arc::new);
}

/// Clones a table built once.
fn shared(table: &Result<SessionTable, DialogError>) -> Result<SessionTable, DialogError> {
    table.as_ref().map(Arc::clone).map_err(Clone::clone)
}

/// Every settings dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Menu {
    /// General Options.
    General,
    /// Load Game Options.
    LoadGame,
    /// Save Game Options.
    SaveGame,
    /// Sound Options.
    Sound,
    /// Common Engine Options.
    CommonEngine,
    /// Time Control.
    TimeControl,
    /// New Shuffle Game.
    Shuffle,
    /// Tourney Options.
    Tourney,
    /// New Variant.
    NewVariant,
    /// Load Engine.
    LoadEngine,
}

impl Menu {
    /// Every dialog, in menu order.
    pub const ALL: [Self; 10] = [
        Self::General,
        Self::LoadGame,
        Self::SaveGame,
        Self::Sound,
        Self::CommonEngine,
        Self::TimeControl,
        Self::Shuffle,
        Self::Tourney,
        Self::NewVariant,
        Self::LoadEngine,
    ];

    /// The title of the dialog.
    pub const fn title(self) -> &'static str {
        match self {
            Self::General => "General Options",
            Self::LoadGame => "Load Game Options",
            Self::SaveGame => "Save Game Options",
            Self::Sound => "Sound Options",
            Self::CommonEngine => "Common Engine Settings",
            Self::TimeControl => "Time Control",
            Self::Shuffle => "New Shuffle Game",
            Self::Tourney => "Match Options",
            Self::NewVariant => "New Variant",
            Self::LoadEngine => "Load engine",
        }
    }

    /// Finds a dialog by its title, ignoring case.
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|menu| menu.title().eq_ignore_ascii_case(title))
    }

    /// The table of the dialog.
    ///
    /// # Errors
    ///
    /// Fails if the table is malformed.
    pub fn table(self, settings: &Settings) -> Result<SessionTable, DialogError> {
        match self {
            Self::General => shared(&GENERAL),
            Self::LoadGame => shared(&LOAD_GAME),
            Self::SaveGame => shared(&SAVE_GAME),
            Self::Sound => shared(&SOUND),
            Self::CommonEngine => shared(&COMMON_ENGINE),
            Self::TimeControl => shared(&TIME_CONTROL),
            Self::Shuffle => shared(&SHUFFLE),
            Self::NewVariant => shared(&NEW_VARIANT),
            Self::Tourney => tourney::table(&settings.engine_names()).map(Arc::new),
            Self::LoadEngine => install::table(&settings.engine_names()).map(Arc::new),
        }
    }

    /// Fills the scratch cells the dialog edits.
    pub fn prepare(self, session: &mut Session) {
        match self {
            Self::General => general::prepare(session),
            Self::LoadGame => games::prepare_load(session),
            Self::CommonEngine => common::prepare(session),
            Self::TimeControl => time::prepare(session),
            Self::Shuffle => shuffle::prepare(session),
            Self::Tourney => tourney::prepare(session),
            Self::LoadEngine => install::prepare(session),
            Self::SaveGame | Self::Sound | Self::NewVariant => {}
        }
    }

    /// Prepares and shows the dialog.
    ///
    /// # Errors
    ///
    /// Fails if the table is malformed.
    pub fn open(
        self,
        session: &mut Session,
        widgets: &mut dyn Widgets,
    ) -> Result<SessionDialog, DialogError> {
        self.prepare(session);
        let table = self.table(&session.settings)?;
        let dialog = Dialog::show(table, session, widgets);
        if self == Self::TimeControl {
            time::relabel(&session.scratch, widgets);
        }
        debug!(title = self.title(), "opened settings dialog");
        Ok(dialog)
    }
}

/// A window showing text that belongs to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Note {
    /// The comment after a move.
    Comment,
    /// The tags of the game.
    Tags,
}

impl Note {
    /// Every note.
    pub const ALL: [Self; 2] = [Self::Comment, Self::Tags];

    /// The registry class of the window.
    pub const fn class(self) -> DialogClass {
        match self {
            Self::Comment => DialogClass::Comment,
            Self::Tags => DialogClass::Tags,
        }
    }

    /// The menu item whose check mark shows whether the window is up.
    pub const fn menu_item(self) -> &'static str {
        match self {
            Self::Comment => "Show Comments",
            Self::Tags => "Show Tags",
        }
    }

    /// The index of the text box holding the note.
    pub const fn text_box(self) -> usize {
        match self {
            Self::Comment => comment::TEXT,
            Self::Tags => tags::TEXT,
        }
    }

    /// The table of the window.
    ///
    /// # Errors
    ///
    /// Fails if the table is malformed.
    pub fn table(self) -> Result<SessionTable, DialogError> {
        match self {
            Self::Comment => shared(&COMMENT),
            Self::Tags => shared(&TAGS),
        }
    }

    /// Shows `text` in the window under `title`. `ply` is the ply a comment
    /// follows; tags ignore it.
    ///
    /// If the window is up already, its title and text are replaced and
    /// `widgets` must be its controls. Returns the dialog only if it was
    /// opened.
    ///
    /// # Errors
    ///
    /// Fails if the table is malformed.
    pub fn pop_up(
        self,
        title: &str,
        text: &str,
        ply: usize,
        session: &mut Session,
        registry: &mut Registry,
        widgets: &mut dyn Widgets,
    ) -> Result<Option<SessionDialog>, DialogError> {
        let table = self.table()?;
        match self {
            Self::Comment => {
                session.scratch.comment_text = Some(String::from(text));
                session.scratch.comment_index = ply;
            }
            Self::Tags => session.scratch.tags_text = Some(String::from(text)),
        }

        match registry.pop_up(self.class(), title, Some(text)) {
            PopUp::Opened => Ok(Some(Dialog::show(table, session, widgets))),
            PopUp::Refreshed => {
                widgets.set_text(self.text_box(), text);
                Ok(None)
            }
        }
    }
}

/// Presses button `index` of a dialog over the session, then updates every control
/// the button asked to refresh.
pub fn press(
    dialog: &mut SessionDialog,
    index: usize,
    session: &mut Session,
    widgets: &mut dyn Widgets,
) {
    dialog.press(index, session, widgets, &mut Destination::Local);
    for refresh in session.take_refreshes() {
        dialog.update(session, widgets, Scope::Only(refresh));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Menu, Note};
    use crate::{
        engine::Destination,
        option::{Descriptor, OptionKind, Scope},
        session::Session,
        settings::{EngineEntry, Settings},
        widget::MemoryWidgets,
    };

    #[test]
    fn every_table_is_valid() {
        let mut settings = Settings::default();
        for menu in Menu::ALL {
            let table = menu.table(&settings);
            assert!(table.is_ok(), "{} is malformed", menu.title());
        }

        settings.engines.push(EngineEntry {
            name: String::from("Crab"),
            command: String::from("crab"),
            directory: None,
            uci: true,
        });
        assert!(Menu::Tourney.table(&settings).is_ok(), "engines are fine too");
    }

    #[test]
    fn tables_are_shared() {
        let settings = Settings::default();
        let first = Menu::General.table(&settings).expect("valid");
        let second = Menu::General.table(&settings).expect("valid");
        assert!(Arc::ptr_eq(&first, &second), "built once");
        assert_eq!(
            first.get(first.end_mark()).map(Descriptor::kind),
            Some(OptionKind::EndMark),
            "ends with an end mark"
        );
    }

    #[test]
    fn untouched_dialogs_change_nothing() {
        for menu in Menu::ALL {
            let mut session = Session::with_seed(Settings::default(), 7);
            let mut widgets = MemoryWidgets::new(0);
            let mut dialog = menu.open(&mut session, &mut widgets).expect("valid");
            let before = session.settings.clone();
            dialog.readout(
                &mut session,
                &mut widgets,
                &mut Destination::Local,
                Scope::All,
            );
            assert_eq!(session.settings, before, "{} changed settings", menu.title());
        }
    }

    #[test]
    fn note_tables_are_valid() {
        for note in Note::ALL {
            let table = note.table().expect("valid");
            assert_eq!(
                table.get(note.text_box()).map(Descriptor::kind),
                Some(OptionKind::TextBox),
                "{} points at its text box",
                note.menu_item()
            );
        }
    }

    #[test]
    fn titles_find_menus() {
        assert_eq!(Menu::from_title("time control"), Some(Menu::TimeControl), "case");
        assert_eq!(Menu::from_title("Nothing"), None, "unknown title");
    }
}
