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

//! A shown dialog: moving values between the backing cells of an
//! [`OptionTable`] and the controls of a [`Widgets`].

use std::ops::Deref;

use tracing::{debug, warn};

use crate::{
    engine::Destination,
    option::{OptionKind, OptionTable, Scope, Target},
    widget::Widgets,
};

/// The last value a control was known to hold.
///
/// Spins, check boxes and combo boxes only write back (or tell an engine)
/// when their value differs from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shadow {
    /// Never updated or read out.
    Unknown,
    /// The value of a spin.
    Int(i32),
    /// The state of a check box.
    Flag(bool),
    /// The selection of a combo box.
    Selection(usize),
}

/// One shown instance of an [`OptionTable`].
///
/// `T` is anything that dereferences to the table: a plain reference, or an
/// [`Arc`](std::sync::Arc) for tables that are built when the dialog opens.
pub struct Dialog<T> {
    /// The options of the dialog.
    table: T,
    /// The last known value of each option.
    shadows: Vec<Shadow>,
}

impl<C, T> Dialog<T>
where
    T: Deref<Target = OptionTable<C>>,
{
    /// Creates a dialog for `table` without touching any controls.
    pub fn new(table: T) -> Self {
        let shadows = vec![Shadow::Unknown; table.len()];
        Self { table, shadows }
    }

    /// Creates a dialog for `table` and fills every control from `ctx`.
    pub fn show(table: T, ctx: &mut C, widgets: &mut dyn Widgets) -> Self {
        let mut dialog = Self::new(table);
        dialog.update(ctx, widgets, Scope::All);
        dialog
    }

    /// The options of the dialog.
    pub fn table(&self) -> &OptionTable<C> {
        &self.table
    }

    /// Copies the backing values of the options in `scope` into their
    /// controls. Backing cells are only read.
    pub fn update(&mut self, ctx: &mut C, widgets: &mut dyn Widgets, scope: Scope) {
        let table = &*self.table;

        for index in table.update_range(scope) {
            let Some(option) = table.get(index) else {
                break;
            };

            match (option.kind(), option.target()) {
                (OptionKind::EndMark, _) => return,
                (kind, Target::Text(cell)) if kind.is_text() => {
                    widgets.set_text(index, cell(ctx).as_deref().unwrap_or(""));
                }
                (OptionKind::Spin, Target::Int(cell)) => {
                    let value = *cell(ctx);
                    widgets.set_text(index, &value.to_string());
                    self.shadows[index] = Shadow::Int(value);
                }
                (OptionKind::Fractional, Target::Float(cell)) => {
                    widgets.set_text(index, &format_fractional(*cell(ctx)));
                }
                (OptionKind::CheckBox, Target::Bool(cell)) => {
                    let on = *cell(ctx);
                    widgets.set_state(index, on);
                    self.shadows[index] = Shadow::Flag(on);
                }
                (OptionKind::ComboBox, Target::Text(cell)) => {
                    let current = cell(ctx).as_deref();
                    let selection = option
                        .choices()
                        .map_or(0, |choices| choices.position(current));
                    widgets.set_selection(index, selection);
                    self.shadows[index] = Shadow::Selection(selection);
                }
                (kind, _) if kind.is_decoration() => {}
                (kind, _) => warn!(index, %kind, "unexpected option while updating dialog"),
            }
        }
    }

    /// Copies the controls of the options in `scope` back into their backing
    /// cells and, for a remote destination, tells the engine about every
    /// change.
    ///
    /// Returns what the accept callback of the end mark returns if the end
    /// mark is in `scope`, otherwise `true`. `false` means the dialog must
    /// stay open.
    pub fn readout(
        &mut self,
        ctx: &mut C,
        widgets: &mut dyn Widgets,
        dest: &mut Destination<'_>,
        scope: Scope,
    ) -> bool {
        let table = &*self.table;
        let mut accepted = true;

        for index in table.readout_range(scope) {
            let Some(option) = table.get(index) else {
                break;
            };

            match (option.kind(), option.target()) {
                (OptionKind::EndMark, target) => {
                    if let Target::Accept(accept) = target {
                        accepted = accept(ctx, index);
                    }
                    debug!(accepted, "dialog read out");
                    break;
                }
                (kind, Target::Text(cell)) if kind.is_text() => {
                    let text = widgets.text(index);
                    let current = cell(ctx);
                    if current.as_deref().unwrap_or("") == text {
                        continue;
                    }
                    dest.send_option(option.name(), &text);
                    *current = Some(text);
                }
                (OptionKind::Spin, Target::Int(cell)) => {
                    let value = read_number(&widgets.text(index), option.min(), option.max());
                    // in range after clamping
                    let value = value as i32;
                    if self.shadows[index] == Shadow::Int(value) {
                        continue;
                    }
                    self.shadows[index] = Shadow::Int(value);
                    dest.send_option(option.name(), value);
                    *cell(ctx) = value;
                }
                (OptionKind::Fractional, Target::Float(cell)) => {
                    // engines never have float options, so this is always
                    // local
                    let text = widgets.text(index);
                    let current = cell(ctx);
                    if text == format_fractional(*current) {
                        continue;
                    }
                    *current = read_number(&text, option.min(), option.max()) as f32;
                }
                (OptionKind::CheckBox, Target::Bool(cell)) => {
                    let on = widgets.state(index);
                    if self.shadows[index] == Shadow::Flag(on) {
                        continue;
                    }
                    self.shadows[index] = Shadow::Flag(on);
                    dest.send_option(option.name(), u8::from(on));
                    *cell(ctx) = on;
                }
                (OptionKind::ComboBox, Target::Text(cell)) => {
                    let Some(choices) = option.choices() else {
                        continue;
                    };
                    let selection = widgets.selection(index);
                    let value = choices.value(selection);

                    if dest.is_remote() {
                        if self.shadows[index] == Shadow::Selection(selection) {
                            continue;
                        }
                        self.shadows[index] = Shadow::Selection(selection);
                        let Some(value) = value else {
                            debug!(index, "combo box has no selection; nothing to send");
                            continue;
                        };
                        dest.send_option(option.name(), value);
                        *cell(ctx) = Some(String::from(value));
                    } else {
                        self.shadows[index] = Shadow::Selection(selection);
                        let current = cell(ctx);
                        if let Some(value) = value {
                            if current.as_deref() != Some(value) {
                                *current = Some(String::from(value));
                            }
                        }
                    }
                }
                (kind, _) if kind.is_decoration() => {}
                (kind, _) => warn!(index, %kind, "unexpected option while reading out dialog"),
            }
        }

        accepted
    }

    /// Reads out the whole dialog, running its accept callback.
    ///
    /// Returns `false` if the dialog must stay open.
    pub fn accept(
        &mut self,
        ctx: &mut C,
        widgets: &mut dyn Widgets,
        dest: &mut Destination<'_>,
    ) -> bool {
        self.readout(ctx, widgets, dest, Scope::All)
    }

    /// Handles a click on button `index`.
    ///
    /// The rest of the button's group is read out first, so the callback
    /// sees what the user typed. Buttons without a callback are engine
    /// buttons and are sent to a remote destination by name.
    pub fn press(
        &mut self,
        index: usize,
        ctx: &mut C,
        widgets: &mut dyn Widgets,
        dest: &mut Destination<'_>,
    ) {
        let Some(option) = self.table.get(index) else {
            return;
        };
        if !matches!(option.kind(), OptionKind::Button | OptionKind::SaveButton) {
            warn!(index, kind = %option.kind(), "pressed something that isn't a button");
            return;
        }

        if option.group().is_some() {
            let start = self.table.group_start(index);
            self.readout(ctx, widgets, dest, Scope::Only(start));
        }
        let Some(option) = self.table.get(index) else {
            return;
        };
        if let Target::Action(action) = option.target() {
            action(ctx, widgets, index);
        } else {
            dest.send_button(option.name());
        }
    }

    /// Selects candidate `selection` of combo box `index` and runs its
    /// selection callback, if any, after reading out its group.
    pub fn select(
        &mut self,
        index: usize,
        selection: usize,
        ctx: &mut C,
        widgets: &mut dyn Widgets,
        dest: &mut Destination<'_>,
    ) {
        widgets.set_selection(index, selection);

        let has_action = self
            .table
            .get(index)
            .is_some_and(|option| option.selection_action().is_some());
        if !has_action {
            return;
        }
        let start = self.table.group_start(index);
        self.readout(ctx, widgets, dest, Scope::Only(start));

        if let Some(action) = self
            .table
            .get(index)
            .and_then(|option| option.selection_action())
        {
            action(ctx, widgets, index);
        }
    }
}

/// Formats a fractional value the way it is shown in its control.
pub fn format_fractional(value: f32) -> String {
    format!("{value:4.2}")
}

/// Parses the number at the start of `text`, ignoring anything after it.
///
/// Returns `0.0` if `text` doesn't start with a number.
pub fn parse_leading_number(text: &str) -> f64 {
    let text = text.trim_start();
    (1..=text.len())
        .rev()
        .filter_map(|end| text.get(..end))
        .find_map(|prefix| prefix.parse::<f64>().ok())
        .filter(|number| !number.is_nan())
        .unwrap_or(0.0)
}

/// Parses `text` and clamps it into `[min, max]`.
///
/// The upper bound is applied first, so `min` wins if the bounds cross.
fn read_number(text: &str, min: i32, max: i32) -> f64 {
    let number = parse_leading_number(text);
    let number = if number > f64::from(max) {
        f64::from(max)
    } else {
        number
    };
    if number < f64::from(min) {
        f64::from(min)
    } else {
        number
    }
}
