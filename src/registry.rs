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

//! Which dialogs are up, and which menu items mirror them.
//!
//! Most dialogs share [`DialogClass::Transient`], so opening one while another
//! is up refreshes the live window rather than stacking a second one.

use tracing::debug;

/// Turns the check mark of a menu item on or off.
pub trait MenuBar {
    /// Checks (`on`) or unchecks the menu item called `item`.
    fn mark(&mut self, item: &str, on: bool);
}

/// The kinds of window that exist at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogClass {
    /// Every settings dialog.
    Transient,
    /// The comment of the current move.
    Comment,
    /// The tags of the current game.
    Tags,
    /// The move history panel.
    History,
    /// The engine output panel.
    EngineOutput,
    /// An error message.
    Error,
}

impl DialogClass {
    /// Every class, in slot order.
    pub const ALL: [Self; 6] = [
        Self::Transient,
        Self::Comment,
        Self::Tags,
        Self::History,
        Self::EngineOutput,
        Self::Error,
    ];

    /// The slot of this class in a [`Registry`].
    const fn slot(self) -> usize {
        self as usize
    }
}

/// What [`Registry::pop_up`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopUp {
    /// The dialog wasn't up and now is.
    Opened,
    /// The dialog was already up; its title and text were replaced.
    Refreshed,
}

/// The state of one dialog class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    /// Whether a window of this class is shown.
    up: bool,
    /// The title of the window.
    title: String,
    /// The text of its main control, if it has one.
    text: Option<String>,
    /// The menu item whose check mark mirrors whether the window is up.
    marked: Option<String>,
}

impl Slot {
    /// Whether the window is shown.
    pub const fn is_up(&self) -> bool {
        self.up
    }

    /// The title of the window.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The text of its main control.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The menu item mirroring the window.
    pub fn marked(&self) -> Option<&str> {
        self.marked.as_deref()
    }
}

/// One [`Slot`] per [`DialogClass`].
#[derive(Clone, Debug, Default)]
pub struct Registry {
    /// Indexed by [`DialogClass::slot`].
    slots: [Slot; DialogClass::ALL.len()],
}

impl Registry {
    /// Creates a registry with every dialog down.
    pub fn new() -> Self {
        Self::default()
    }

    /// The state of `class`.
    pub fn slot(&self, class: DialogClass) -> &Slot {
        &self.slots[class.slot()]
    }

    /// Whether a window of `class` is shown.
    pub fn is_up(&self, class: DialogClass) -> bool {
        self.slot(class).up
    }

    /// Shows a window of `class` with `title` and, if given, `text` in its
    /// main control.
    ///
    /// If one is already up, its title and text are replaced instead.
    pub fn pop_up(&mut self, class: DialogClass, title: &str, text: Option<&str>) -> PopUp {
        let slot = &mut self.slots[class.slot()];
        slot.title.clear();
        slot.title.push_str(title);
        if let Some(text) = text {
            slot.text = Some(String::from(text));
        }

        if slot.up {
            debug!(?class, title, "refreshing dialog");
            PopUp::Refreshed
        } else {
            slot.up = true;
            debug!(?class, title, "opening dialog");
            PopUp::Opened
        }
    }

    /// Hides the window of `class` and unchecks the menu item mirroring it.
    ///
    /// Returns whether it was up.
    pub fn pop_down(&mut self, class: DialogClass, menus: &mut dyn MenuBar) -> bool {
        let slot = &mut self.slots[class.slot()];
        if !slot.up {
            return false;
        }
        slot.up = false;
        if let Some(item) = slot.marked.take() {
            menus.mark(&item, false);
        }
        debug!(?class, "closed dialog");
        true
    }

    /// Makes menu item `item` mirror whether `class` is up, and checks it.
    pub fn mark_menu(&mut self, item: &str, class: DialogClass, menus: &mut dyn MenuBar) {
        self.slots[class.slot()].marked = Some(String::from(item));
        menus.mark(item, true);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{DialogClass, MenuBar, PopUp, Registry};

    /// Remembers the last mark of every item.
    #[derive(Default)]
    struct Marks(HashMap<String, bool>);

    impl MenuBar for Marks {
        fn mark(&mut self, item: &str, on: bool) {
            self.0.insert(String::from(item), on);
        }
    }

    #[test]
    fn second_pop_up_refreshes() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.pop_up(DialogClass::Comment, "Comment", Some("1. e4")),
            PopUp::Opened,
            "first pop up opens"
        );
        assert_eq!(
            registry.pop_up(DialogClass::Comment, "Comment on 1... e5", Some("good")),
            PopUp::Refreshed,
            "second pop up refreshes"
        );
        let slot = registry.slot(DialogClass::Comment);
        assert_eq!(slot.title(), "Comment on 1... e5", "title replaced");
        assert_eq!(slot.text(), Some("good"), "text replaced");
        assert!(!registry.is_up(DialogClass::Tags), "other classes untouched");
    }

    #[test]
    fn pop_down_clears_mark() {
        let mut registry = Registry::new();
        let mut marks = Marks::default();

        assert!(
            !registry.pop_down(DialogClass::Tags, &mut marks),
            "nothing to close"
        );

        registry.mark_menu("Show Tags", DialogClass::Tags, &mut marks);
        registry.pop_up(DialogClass::Tags, "Tags", None);
        assert_eq!(marks.0.get("Show Tags"), Some(&true), "item checked");

        assert!(registry.pop_down(DialogClass::Tags, &mut marks), "was up");
        assert_eq!(marks.0.get("Show Tags"), Some(&false), "item unchecked");
        assert_eq!(registry.slot(DialogClass::Tags).marked(), None, "mark forgotten");
        assert!(!registry.is_up(DialogClass::Tags), "now down");
    }
}
