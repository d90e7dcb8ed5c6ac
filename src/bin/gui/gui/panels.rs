use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use frontend::{
    engine::CommandLog,
    history::{highlight, history_rows, ply_for_click, Highlight, Side},
    output::{EngineOutput, Icon},
};

/// The height of a table row, in points.
const ROW_HEIGHT: f32 = 18.0;

/// Draws the move history with the move after ply `shown` highlighted.
///
/// Returns how many plies to show if the user clicked a move.
pub fn history(ui: &mut Ui, moves: &[String], shown: usize) -> Option<usize> {
    let rows = history_rows(moves, moves.len());
    let current = highlight(shown.checked_sub(1));
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(40.0))
        .columns(Column::auto().at_least(80.0), 2)
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("No.");
            });
            header.col(|ui| {
                ui.strong("White");
            });
            header.col(|ui| {
                ui.strong("Black");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let index = row.index();
                let Some(history_row) = rows.get(index) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(format!("{}.", history_row.number));
                });
                for (side, text) in [
                    (Side::White, &history_row.white),
                    (Side::Black, &history_row.black),
                ] {
                    row.col(|ui| {
                        if text.is_empty() {
                            return;
                        }
                        let selected = current == Some(Highlight { row: index, side });
                        if ui.selectable_label(selected, text.as_str()).clicked() {
                            clicked = Some(ply_for_click(index, side));
                        }
                    });
                }
            });
        });

    clicked
}

/// What an icon is drawn as.
const fn icon_text(icon: Icon) -> &'static str {
    match icon {
        Icon::Clear => "",
        Icon::White => "\u{25cb}",
        Icon::Black => "\u{25cf}",
        Icon::Unknown => "?",
        Icon::Thinking => "thinking",
        Icon::Pondering => "pondering",
        Icon::Analyzing => "analyzing",
    }
}

/// Draws both engine panes and the commands sent to the engine.
pub fn engine_output(ui: &mut Ui, output: &EngineOutput, commands: &CommandLog) {
    for which in 0..2 {
        let Some(pane) = output.pane(which) else {
            continue;
        };
        ui.horizontal(|ui| {
            ui.label(icon_text(pane.colour));
            let name = if pane.name.is_empty() {
                format!("Engine {}", which + 1)
            } else {
                pane.name.clone()
            };
            ui.strong(name);
            ui.label(icon_text(pane.state.icon()));
            ui.label(&pane.state_label);
            ui.label(&pane.nps);
        });

        ui.push_id(which, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(160.0)
                .columns(Column::auto().at_least(50.0), 4)
                .column(Column::remainder())
                .header(ROW_HEIGHT, |mut header| {
                    for heading in ["Depth", "Score", "Time", "Nodes", "PV"] {
                        header.col(|ui| {
                            ui.strong(heading);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, pane.memo.len(), |mut row| {
                        let Some(line) = pane.memo.get(row.index()) else {
                            return;
                        };
                        for field in line.trim_end().split('\t') {
                            row.col(|ui| {
                                ui.monospace(field);
                            });
                        }
                    });
                });
        });
        ui.separator();
    }

    ui.collapsing("Commands sent", |ui| {
        ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
            for command in commands.commands() {
                ui.label(RichText::new(command.trim_end()).monospace());
            }
        });
    });
}
