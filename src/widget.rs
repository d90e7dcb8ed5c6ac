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

/// The controls of one shown dialog, addressed by option index.
///
/// Each front end implements this over whatever its toolkit gives it. Getters
/// on an index that has no control return an empty/zero value.
pub trait Widgets {
    /// Replaces the text of control `index`.
    fn set_text(&mut self, index: usize, text: &str);

    /// Returns the text of control `index`.
    fn text(&self, index: usize) -> String;

    /// Turns check box `index` on or off.
    fn set_state(&mut self, index: usize, on: bool);

    /// Returns whether check box `index` is on.
    fn state(&self, index: usize) -> bool;

    /// Selects candidate `selection` of combo box `index`.
    fn set_selection(&mut self, index: usize, selection: usize);

    /// Returns the selected candidate of combo box `index`.
    fn selection(&self, index: usize) -> usize;

    /// Appends `line` and a newline to the text of control `index`.
    fn append_line(&mut self, index: usize, line: &str) {
        let mut text = self.text(index);
        text.push_str(line);
        text.push('\n');
        self.set_text(index, &text);
    }
}

/// The state of one control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Control {
    /// Text of text boxes, file names, path names, spins and fractionals.
    pub text: String,
    /// State of check boxes.
    pub state: bool,
    /// Selected candidate of combo boxes.
    pub selection: usize,
}

/// Controls that only live in memory.
///
/// Immediate-mode front ends keep one of these per open dialog and draw it
/// every frame; tests use it to simulate a user.
#[derive(Clone, Debug, Default)]
pub struct MemoryWidgets {
    /// One control per option, grown on demand.
    controls: Vec<Control>,
}

impl MemoryWidgets {
    /// Creates `len` empty controls.
    pub fn new(len: usize) -> Self {
        Self {
            controls: vec![Control::default(); len],
        }
    }

    /// The number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether there are no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Returns control `index`, if it exists.
    pub fn control(&self, index: usize) -> Option<&Control> {
        self.controls.get(index)
    }

    /// Returns control `index`, creating it (and every control before it) if
    /// it doesn't exist.
    pub fn control_mut(&mut self, index: usize) -> &mut Control {
        if index >= self.controls.len() {
            self.controls.resize(index + 1, Control::default());
        }
        &mut self.controls[index]
    }
}

impl Widgets for MemoryWidgets {
    fn set_text(&mut self, index: usize, text: &str) {
        let control = self.control_mut(index);
        control.text.clear();
        control.text.push_str(text);
    }

    fn text(&self, index: usize) -> String {
        self.control(index)
            .map(|control| control.text.clone())
            .unwrap_or_default()
    }

    fn set_state(&mut self, index: usize, on: bool) {
        self.control_mut(index).state = on;
    }

    fn state(&self, index: usize) -> bool {
        self.control(index).is_some_and(|control| control.state)
    }

    fn set_selection(&mut self, index: usize, selection: usize) {
        self.control_mut(index).selection = selection;
    }

    fn selection(&self, index: usize) -> usize {
        self.control(index).map_or(0, |control| control.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryWidgets, Widgets};

    #[test]
    fn controls_grow_on_demand() {
        let mut widgets = MemoryWidgets::new(2);
        assert_eq!(widgets.text(5), "", "missing controls read as empty");
        assert!(!widgets.state(5), "missing controls read as off");

        widgets.set_text(5, "hello");
        assert_eq!(widgets.len(), 6, "writing should create the control");
        assert_eq!(widgets.text(5), "hello", "text should be kept");
    }

    #[test]
    fn append_line_adds_newline() {
        let mut widgets = MemoryWidgets::new(1);
        widgets.append_line(0, "Crab");
        widgets.append_line(0, "Stockfish");
        assert_eq!(widgets.text(0), "Crab\nStockfish\n", "lines should stack");
    }
}
