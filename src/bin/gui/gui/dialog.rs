use std::ops::Range;

use eframe::egui::{ComboBox, Id, TextEdit, Ui};
use frontend::{
    option::{Descriptor, OptionKind, OptionTable},
    widget::MemoryWidgets,
};

/// Something the user did that the dialog engine must handle.
#[derive(Clone, Copy)]
pub enum Action {
    /// Clicked the button with this index.
    Press(usize),
    /// Picked a candidate (second) of a combo box (first).
    Select(usize, usize),
    /// Clicked OK.
    Accept,
    /// Clicked Cancel or closed the window.
    Cancel,
}

/// Draws every control of `table` from `widgets`, editing them in place.
///
/// Returns what the user did that needs more than an edit.
pub fn show_controls<C>(
    ui: &mut Ui,
    table: &OptionTable<C>,
    widgets: &mut MemoryWidgets,
) -> Option<Action> {
    let mut action = None;
    let columns = columns(table);

    ui.columns(columns.len(), |uis| {
        for (ui, column) in uis.iter_mut().zip(columns) {
            for index in column {
                let Some(option) = table.get(index) else {
                    continue;
                };
                if let Some(done) = show_control(ui, index, option, widgets) {
                    action = Some(done);
                }
            }
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("OK").clicked() {
            action = Some(Action::Accept);
        }
        if ui.button("Cancel").clicked() {
            action = Some(Action::Cancel);
        }
    });
    action
}

/// Splits the options before the end mark into columns at every break.
fn columns<C>(table: &OptionTable<C>) -> Vec<Range<usize>> {
    let mut columns = Vec::new();
    let mut start = 0;
    for (index, option) in table.iter().enumerate() {
        if option.kind() == OptionKind::Break {
            columns.push(start..index);
            start = index + 1;
        }
    }
    columns.push(start..table.end_mark());
    columns
}

/// Draws control `index`.
fn show_control<C>(
    ui: &mut Ui,
    index: usize,
    option: &Descriptor<C>,
    widgets: &mut MemoryWidgets,
) -> Option<Action> {
    let label = option.text();

    match option.kind() {
        OptionKind::TextBox => {
            ui.label(label);
            let text = &mut widgets.control_mut(index).text;
            ui.add(TextEdit::multiline(text).desired_rows(1));
            None
        }
        OptionKind::FileName
        | OptionKind::PathName
        | OptionKind::Spin
        | OptionKind::Fractional => {
            ui.horizontal(|ui| {
                ui.label(label);
                ui.text_edit_singleline(&mut widgets.control_mut(index).text);
            });
            None
        }
        OptionKind::CheckBox => {
            ui.checkbox(&mut widgets.control_mut(index).state, label);
            None
        }
        OptionKind::ComboBox => {
            let choices = option.choices()?;
            let selected = widgets.control_mut(index).selection;
            let mut picked = None;

            ui.horizontal(|ui| {
                ui.label(label);
                ComboBox::from_id_source(Id::new(("combo box", index)))
                    .selected_text(choices.label(selected).unwrap_or(""))
                    .show_ui(ui, |ui| {
                        for (candidate, text) in choices.labels().enumerate() {
                            if ui.selectable_label(candidate == selected, text).clicked() {
                                picked = Some(candidate);
                            }
                        }
                    });
            });
            picked.map(|candidate| Action::Select(index, candidate))
        }
        OptionKind::Button | OptionKind::SaveButton => {
            ui.button(label).clicked().then_some(Action::Press(index))
        }
        OptionKind::Label => {
            ui.label(label);
            None
        }
        OptionKind::Break | OptionKind::EndMark => None,
    }
}
