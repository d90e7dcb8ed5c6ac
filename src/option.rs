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

//! Option descriptors: one record per control of a dialog.
//!
//! A dialog is an ordered list of [`Descriptor`]s terminated by a single
//! [`EndMark`](OptionKind::EndMark). Each descriptor names the kind of control
//! it stands for and a [`Target`]: an accessor into some context object `C`
//! that holds the value the control edits. The descriptors never own that
//! value, so the same table can be shown any number of times.

use std::fmt::{self, Display, Formatter};

use crate::widget::Widgets;

pub use table::{OptionTable, Scope};

/// Validated, immutable lists of descriptors.
mod table;

/// The kind of control an option is shown as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// A single line of free text.
    TextBox,
    /// Text naming a file.
    FileName,
    /// Text naming a directory.
    PathName,
    /// An integer within `[min, max]`.
    Spin,
    /// A float within `[min, max]`.
    Fractional,
    /// On or off.
    CheckBox,
    /// One string out of a fixed list.
    ComboBox,
    /// Runs a callback when clicked.
    Button,
    /// A button that asks an engine to save its settings.
    SaveButton,
    /// Static text.
    Label,
    /// Starts a new column.
    Break,
    /// The end of the dialog. Carries the callback run on OK.
    EndMark,
}

impl OptionKind {
    /// Whether the control edits a string.
    pub const fn is_text(self) -> bool {
        matches!(self, Self::TextBox | Self::FileName | Self::PathName)
    }

    /// Whether `min` and `max` mean anything for this kind.
    pub const fn is_bounded(self) -> bool {
        matches!(self, Self::Spin | Self::Fractional)
    }

    /// Whether the control has nothing to read or write.
    pub const fn is_decoration(self) -> bool {
        matches!(
            self,
            Self::Button | Self::SaveButton | Self::Label | Self::Break
        )
    }
}

impl Display for OptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::TextBox => "text box",
            Self::FileName => "file name",
            Self::PathName => "path name",
            Self::Spin => "spin",
            Self::Fractional => "fractional",
            Self::CheckBox => "check box",
            Self::ComboBox => "combo box",
            Self::Button => "button",
            Self::SaveButton => "save button",
            Self::Label => "label",
            Self::Break => "break",
            Self::EndMark => "end mark",
        };
        f.write_str(name)
    }
}

/// Borrows one cell of the context `C`.
pub type Accessor<C, T> = Box<dyn Fn(&mut C) -> &mut T + Send + Sync>;
/// Runs when a button is clicked or a combo box selection changes.
///
/// Receives the context, the controls of the dialog and the index of the
/// option that triggered it.
pub type Action<C> = Box<dyn Fn(&mut C, &mut dyn Widgets, usize) + Send + Sync>;
/// Runs when the dialog is accepted. Receives the index of the end mark and
/// returns whether the dialog may close.
pub type Accept<C> = Box<dyn Fn(&mut C, usize) -> bool + Send + Sync>;

/// What an option reads from and writes to.
pub enum Target<C> {
    /// Nothing: labels, breaks and callback-less buttons or end marks.
    None,
    /// An integer cell.
    Int(Accessor<C, i32>),
    /// A float cell.
    Float(Accessor<C, f32>),
    /// A boolean cell.
    Bool(Accessor<C, bool>),
    /// An owned string cell that may be empty.
    Text(Accessor<C, Option<String>>),
    /// A button callback.
    Action(Action<C>),
    /// An end mark callback.
    Accept(Accept<C>),
}

impl<C> Target<C> {
    /// Targets an integer cell.
    pub fn int<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> &mut i32 + Send + Sync + 'static,
    {
        Self::Int(Box::new(f))
    }

    /// Targets a float cell.
    pub fn float<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> &mut f32 + Send + Sync + 'static,
    {
        Self::Float(Box::new(f))
    }

    /// Targets a boolean cell.
    pub fn bool<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> &mut bool + Send + Sync + 'static,
    {
        Self::Bool(Box::new(f))
    }

    /// Targets a string cell.
    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> &mut Option<String> + Send + Sync + 'static,
    {
        Self::Text(Box::new(f))
    }

    /// Runs `f` when a button is clicked.
    pub fn action<F>(f: F) -> Self
    where
        F: Fn(&mut C, &mut dyn Widgets, usize) + Send + Sync + 'static,
    {
        Self::Action(Box::new(f))
    }

    /// Runs `f` when the dialog is accepted.
    pub fn accept<F>(f: F) -> Self
    where
        F: Fn(&mut C, usize) -> bool + Send + Sync + 'static,
    {
        Self::Accept(Box::new(f))
    }

    /// Whether this target can back a control of kind `kind`.
    pub fn fits(&self, kind: OptionKind) -> bool {
        match *self {
            Self::None => kind.is_decoration() || matches!(kind, OptionKind::EndMark),
            Self::Int(_) => matches!(kind, OptionKind::Spin),
            Self::Float(_) => matches!(kind, OptionKind::Fractional),
            Self::Bool(_) => matches!(kind, OptionKind::CheckBox),
            Self::Text(_) => kind.is_text() || matches!(kind, OptionKind::ComboBox),
            Self::Action(_) => matches!(kind, OptionKind::Button | OptionKind::SaveButton),
            Self::Accept(_) => matches!(kind, OptionKind::EndMark),
        }
    }
}

/// The candidates of a combo box.
///
/// Each candidate has a label, which is what the user sees, and a value,
/// which is what gets stored or sent to an engine. Unless given separately,
/// the values are the labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choices {
    /// What the user sees.
    labels: Vec<String>,
    /// What gets stored, if different from `labels`.
    values: Option<Vec<String>>,
}

impl Choices {
    /// Creates candidates whose values are their labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values: None,
        }
    }

    /// Gives each candidate a value distinct from its label.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// The number of candidates. Also the "no selection" index.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The number of values. Equal to [`len`](Self::len) in a valid table.
    fn value_count(&self) -> usize {
        self.values.as_ref().map_or(self.labels.len(), Vec::len)
    }

    /// The label of candidate `index`, or [`None`] if there is no such
    /// candidate.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// The value of candidate `index`, or [`None`] if there is no such
    /// candidate.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values
            .as_ref()
            .unwrap_or(&self.labels)
            .get(index)
            .map(String::as_str)
    }

    /// All labels, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Finds the candidate whose value is exactly `value`.
    ///
    /// Returns [`len`](Self::len) if there is none.
    pub fn position(&self, value: Option<&str>) -> usize {
        let Some(value) = value else {
            return self.len();
        };
        self.values
            .as_ref()
            .unwrap_or(&self.labels)
            .iter()
            .position(|candidate| candidate == value)
            .unwrap_or(self.len())
    }
}

/// Identifies options that are read out together.
///
/// Reading out from an index only continues onto the following options if
/// they carry the same group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u8);

/// One control of a dialog.
pub struct Descriptor<C> {
    /// How the option is shown.
    kind: OptionKind,
    /// The lower bound of a spin or fractional option.
    min: i32,
    /// The upper bound of a spin or fractional option.
    max: i32,
    /// The cell or callback behind the control.
    target: Target<C>,
    /// The candidates of a combo box.
    choices: Option<Choices>,
    /// The text next to the control.
    label: String,
    /// The name used in `option` commands, if different from `label`.
    name: Option<String>,
    /// The default suffix of a file name.
    suffix: Option<String>,
    /// The read-out group, if any.
    group: Option<GroupId>,
    /// Runs when the selection of a combo box changes.
    on_select: Option<Action<C>>,
}

/// Creates a descriptor. Shorthand for [`Descriptor::new`].
pub fn describe<C>(
    kind: OptionKind,
    (min, max): (i32, i32),
    target: Target<C>,
    choices: Option<Choices>,
    label: &str,
) -> Descriptor<C> {
    Descriptor::new(kind, min, max, target, choices, label)
}

impl<C> Descriptor<C> {
    /// Creates a descriptor of kind `kind`.
    ///
    /// The bounds are only kept for kinds that use them.
    pub fn new(
        kind: OptionKind,
        min: i32,
        max: i32,
        target: Target<C>,
        choices: Option<Choices>,
        label: &str,
    ) -> Self {
        let (min, max) = if kind.is_bounded() { (min, max) } else { (0, 0) };
        Self {
            kind,
            min,
            max,
            target,
            choices,
            label: String::from(label),
            name: None,
            suffix: None,
            group: None,
            on_select: None,
        }
    }

    /// A text box editing the string `target` points to.
    pub fn text_box<F>(label: &str, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut Option<String> + Send + Sync + 'static,
    {
        Self::new(OptionKind::TextBox, 0, 0, Target::text(target), None, label)
    }

    /// A file name with default suffix `suffix`.
    pub fn file_name<F>(label: &str, suffix: &str, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut Option<String> + Send + Sync + 'static,
    {
        Self::new(OptionKind::FileName, 0, 0, Target::text(target), None, label)
            .with_suffix(suffix)
    }

    /// A directory name.
    pub fn path_name<F>(label: &str, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut Option<String> + Send + Sync + 'static,
    {
        Self::new(OptionKind::PathName, 0, 0, Target::text(target), None, label)
    }

    /// An integer in `[min, max]`.
    pub fn spin<F>(label: &str, min: i32, max: i32, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut i32 + Send + Sync + 'static,
    {
        Self::new(OptionKind::Spin, min, max, Target::int(target), None, label)
    }

    /// A float in `[min, max]`.
    pub fn fractional<F>(label: &str, min: i32, max: i32, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut f32 + Send + Sync + 'static,
    {
        Self::new(
            OptionKind::Fractional,
            min,
            max,
            Target::float(target),
            None,
            label,
        )
    }

    /// A check box.
    pub fn check_box<F>(label: &str, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut bool + Send + Sync + 'static,
    {
        Self::new(OptionKind::CheckBox, 0, 0, Target::bool(target), None, label)
    }

    /// A combo box storing the value of the selected candidate in `target`.
    pub fn combo_box<F>(label: &str, choices: Choices, target: F) -> Self
    where
        F: Fn(&mut C) -> &mut Option<String> + Send + Sync + 'static,
    {
        Self::new(
            OptionKind::ComboBox,
            0,
            0,
            Target::text(target),
            Some(choices),
            label,
        )
    }

    /// A button running `action` when clicked.
    pub fn button<F>(label: &str, action: F) -> Self
    where
        F: Fn(&mut C, &mut dyn Widgets, usize) + Send + Sync + 'static,
    {
        Self::new(OptionKind::Button, 0, 0, Target::action(action), None, label)
    }

    /// A piece of static text.
    pub fn label(label: &str) -> Self {
        Self::new(OptionKind::Label, 0, 0, Target::None, None, label)
    }

    /// A column break.
    pub fn column_break() -> Self {
        Self::new(OptionKind::Break, 0, 0, Target::None, None, "")
    }

    /// The end of a dialog, running `accept` on OK.
    pub fn end_mark<F>(accept: F) -> Self
    where
        F: Fn(&mut C, usize) -> bool + Send + Sync + 'static,
    {
        Self::new(OptionKind::EndMark, 0, 0, Target::accept(accept), None, "")
    }

    /// The end of a dialog with nothing to do on OK.
    pub fn end() -> Self {
        Self::new(OptionKind::EndMark, 0, 0, Target::None, None, "")
    }

    /// Sets the name used in `option` commands.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(String::from(name));
        self
    }

    /// Sets the default suffix of a file name.
    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(String::from(suffix));
        self
    }

    /// Puts the option in read-out group `group`.
    #[must_use]
    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// Runs `action` whenever the selection of this combo box changes.
    #[must_use]
    pub fn on_select<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C, &mut dyn Widgets, usize) + Send + Sync + 'static,
    {
        self.on_select = Some(Box::new(action));
        self
    }

    /// The kind of control.
    pub const fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The lower bound.
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// The upper bound.
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// The text shown next to the control.
    pub fn text(&self) -> &str {
        &self.label
    }

    /// The name used in `option` commands. Defaults to the label.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    /// The default suffix of a file name.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The read-out group.
    pub const fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// The candidates of a combo box.
    pub const fn choices(&self) -> Option<&Choices> {
        self.choices.as_ref()
    }

    /// The cell or callback behind the control.
    pub const fn target(&self) -> &Target<C> {
        &self.target
    }

    /// The selection callback of a combo box.
    pub fn selection_action(&self) -> Option<&Action<C>> {
        self.on_select.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{describe, Choices, Descriptor, OptionKind, Target};

    #[test]
    fn bounds_are_dropped_for_unbounded_kinds() {
        let spin: Descriptor<i32> = describe(
            OptionKind::Spin,
            (-1, 10),
            Target::int(|n: &mut i32| n),
            None,
            "n",
        );
        assert_eq!((spin.min(), spin.max()), (-1, 10), "spins keep bounds");

        let label: Descriptor<i32> = describe(OptionKind::Label, (-1, 10), Target::None, None, "x");
        assert_eq!((label.min(), label.max()), (0, 0), "labels drop bounds");
    }

    #[test]
    fn name_defaults_to_label() {
        let plain: Descriptor<bool> = Descriptor::check_box("Ponder", |b: &mut bool| b);
        assert_eq!(plain.name(), "Ponder", "name should default to the label");

        let named = Descriptor::check_box("Ponder Next Move", |b: &mut bool| b).with_name("Ponder");
        assert_eq!(named.name(), "Ponder", "explicit name should win");
        assert_eq!(named.text(), "Ponder Next Move", "label is unchanged");
    }

    #[test]
    fn targets_fit_their_kinds() {
        let int: Target<i32> = Target::int(|n: &mut i32| n);
        assert!(int.fits(OptionKind::Spin), "ints back spins");
        assert!(!int.fits(OptionKind::Fractional), "ints don't back floats");
        assert!(!int.fits(OptionKind::TextBox), "ints don't back text");

        let none: Target<i32> = Target::None;
        assert!(none.fits(OptionKind::Label), "labels need nothing");
        assert!(none.fits(OptionKind::EndMark), "end marks may have no callback");
        assert!(!none.fits(OptionKind::CheckBox), "check boxes need a cell");
    }

    #[test]
    fn choices_look_up_values() {
        let colours = Choices::new(["red", "green", "blue"]);
        assert_eq!(colours.position(Some("green")), 1, "exact match");
        assert_eq!(colours.position(Some("Green")), 3, "matching is case sensitive");
        assert_eq!(colours.position(None), 3, "no string matches nothing");
        assert_eq!(colours.value(3), None, "no selection has no value");

        let modes = Choices::new(["Exact", "Subset"]).with_values(["1", "2"]);
        assert_eq!(modes.position(Some("2")), 1, "values are matched, not labels");
        assert_eq!(modes.position(Some("Subset")), 2, "labels are not values");
        assert_eq!(modes.label(1), Some("Subset"), "labels are kept");
        assert_eq!(modes.value(1), Some("2"), "values are separate");
    }
}
