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

use std::{ops::Range, slice::Iter};

use super::{Descriptor, OptionKind};
use crate::error::DialogError;

/// Which options an update or read-out touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Every option up to and including the end mark.
    All,
    /// The option at the given index. A read-out also continues onto the
    /// following options of the same group.
    Only(usize),
}

/// A list of descriptors that ends with exactly one end mark.
pub struct OptionTable<C> {
    /// The descriptors, the last of which is the end mark.
    options: Vec<Descriptor<C>>,
}

impl<C> OptionTable<C> {
    /// Checks `options` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns an error if there isn't exactly one end mark or it isn't the
    /// last option, if a combo box has no candidates or a different number of
    /// values than labels, or if an option's target cannot back its kind.
    pub fn new(options: Vec<Descriptor<C>>) -> Result<Self, DialogError> {
        let last = options
            .iter()
            .rposition(|option| option.kind() == OptionKind::EndMark)
            .ok_or(DialogError::MissingEndMark)?;

        for (index, option) in options.iter().enumerate() {
            if option.kind() == OptionKind::EndMark && index != options.len() - 1 {
                return Err(DialogError::EarlyEndMark { index });
            }
            if !option.target().fits(option.kind()) {
                return Err(DialogError::TargetMismatch {
                    index,
                    kind: option.kind(),
                });
            }
            if option.kind() == OptionKind::ComboBox {
                let choices = option
                    .choices()
                    .filter(|choices| !choices.is_empty())
                    .ok_or(DialogError::EmptyChoices { index })?;
                if choices.value_count() != choices.len() {
                    return Err(DialogError::ChoiceLengthMismatch {
                        index,
                        labels: choices.len(),
                        values: choices.value_count(),
                    });
                }
            }
        }
        debug_assert_eq!(last, options.len() - 1, "the end mark must be last");

        Ok(Self { options })
    }

    /// The number of options, including the end mark.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false: a table has at least its end mark.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns option `index`.
    pub fn get(&self, index: usize) -> Option<&Descriptor<C>> {
        self.options.get(index)
    }

    /// Iterates over every option, end mark included.
    pub fn iter(&self) -> Iter<'_, Descriptor<C>> {
        self.options.iter()
    }

    /// The index of the end mark.
    pub fn end_mark(&self) -> usize {
        self.options.len() - 1
    }

    /// The options an update of `scope` touches: everything, or exactly one
    /// option.
    pub fn update_range(&self, scope: Scope) -> Range<usize> {
        match scope {
            Scope::All => 0..self.len(),
            Scope::Only(index) if index < self.len() => index..index + 1,
            Scope::Only(_) => self.len()..self.len(),
        }
    }

    /// The options a read-out of `scope` touches: everything, or one option
    /// and the options after it in the same group.
    ///
    /// An end mark is never part of a group, so only a read-out that starts
    /// on it will run the accept callback.
    pub fn readout_range(&self, scope: Scope) -> Range<usize> {
        let Scope::Only(start) = scope else {
            return 0..self.len();
        };
        let Some(first) = self.options.get(start) else {
            return self.len()..self.len();
        };
        let Some(group) = first.group() else {
            return start..start + 1;
        };

        let end = self
            .options
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|&(_, option)| {
                option.kind() == OptionKind::EndMark || option.group() != Some(group)
            })
            .map_or(self.len(), |(index, _)| index);
        start..end
    }

    /// The first option of the group `index` belongs to, or `index` itself if
    /// it isn't grouped.
    pub fn group_start(&self, index: usize) -> usize {
        let Some(group) = self.options.get(index).and_then(Descriptor::group) else {
            return index;
        };
        let mut start = index;
        while start > 0
            && self
                .options
                .get(start - 1)
                .is_some_and(|option| option.group() == Some(group))
        {
            start -= 1;
        }
        start
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionTable, Scope};
    use crate::{
        error::DialogError,
        option::{Choices, Descriptor, GroupId, OptionKind, Target},
    };

    /// A context with one of everything.
    #[derive(Default)]
    struct Cells {
        flag: bool,
        n: i32,
        text: Option<String>,
    }

    #[test]
    fn end_mark_is_required() {
        let options: Vec<Descriptor<Cells>> = vec![Descriptor::check_box("flag", |c: &mut Cells| {
            &mut c.flag
        })];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::MissingEndMark),
            "a table without an end mark must be rejected"
        );
    }

    #[test]
    fn end_mark_must_be_unique_and_last() {
        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::end(),
            Descriptor::spin("n", 0, 10, |c: &mut Cells| &mut c.n),
            Descriptor::end(),
        ];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::EarlyEndMark { index: 0 }),
            "two end marks must be rejected"
        );

        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::end(),
            Descriptor::spin("n", 0, 10, |c: &mut Cells| &mut c.n),
        ];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::EarlyEndMark { index: 0 }),
            "an end mark that isn't last must be rejected"
        );
    }

    #[test]
    fn combo_boxes_need_choices() {
        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::combo_box("colour", Choices::new(Vec::<String>::new()), |c: &mut Cells| {
                &mut c.text
            }),
            Descriptor::end(),
        ];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::EmptyChoices { index: 0 }),
            "empty combo boxes must be rejected"
        );

        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::combo_box(
                "mode",
                Choices::new(["a", "b"]).with_values(["1"]),
                |c: &mut Cells| &mut c.text,
            ),
            Descriptor::end(),
        ];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::ChoiceLengthMismatch {
                index: 0,
                labels: 2,
                values: 1
            }),
            "labels and values must pair up"
        );
    }

    #[test]
    fn mismatched_targets_are_rejected() {
        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::new(
                OptionKind::CheckBox,
                0,
                0,
                Target::int(|c: &mut Cells| &mut c.n),
                None,
                "flag",
            ),
            Descriptor::end(),
        ];
        assert_eq!(
            OptionTable::new(options).err(),
            Some(DialogError::TargetMismatch {
                index: 0,
                kind: OptionKind::CheckBox
            }),
            "an int can't back a check box"
        );
    }

    #[test]
    fn readout_range_follows_groups() {
        let options: Vec<Descriptor<Cells>> = vec![
            Descriptor::check_box("flag", |c: &mut Cells| &mut c.flag),
            Descriptor::text_box("text", |c: &mut Cells| &mut c.text).in_group(GroupId(1)),
            Descriptor::spin("n", 0, 10, |c: &mut Cells| &mut c.n).in_group(GroupId(1)),
            Descriptor::label("static").in_group(GroupId(2)),
            Descriptor::end(),
        ];
        let table = OptionTable::new(options).expect("table is valid");

        assert_eq!(table.readout_range(Scope::All), 0..5, "all is everything");
        assert_eq!(table.readout_range(Scope::Only(0)), 0..1, "ungrouped is one");
        assert_eq!(table.readout_range(Scope::Only(1)), 1..3, "group 1 is two");
        assert_eq!(table.readout_range(Scope::Only(2)), 2..3, "ranges start at the index");
        assert_eq!(table.readout_range(Scope::Only(3)), 3..4, "stops at the end mark");
        assert_eq!(table.readout_range(Scope::Only(4)), 4..5, "the end mark alone");
        assert_eq!(table.readout_range(Scope::Only(9)), 5..5, "out of range is empty");

        assert_eq!(table.update_range(Scope::Only(1)), 1..2, "updates touch one option");
        assert_eq!(table.group_start(2), 1, "group 1 starts at 1");
        assert_eq!(table.group_start(0), 0, "ungrouped options start at themselves");
    }
}
