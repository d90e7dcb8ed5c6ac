use std::{collections::HashMap, mem, path::PathBuf};

use eframe::{
    egui::{
        self, menu, CentralPanel, Context, Id, Key, Pos2, TopBottomPanel, Vec2,
        ViewportCommand, Visuals, Window,
    },
    App, CreationContext, Frame,
};
use frontend::{
    dialog::Dialog,
    engine::{CommandLog, Destination, EngineOptions},
    history::{comment_title, Side},
    layout::{self, WindowPlacement},
    menus::{self, Menu, Note, SessionDialog},
    option::OptionTable,
    output::{EngineOutput, EngineOutputData, EngineState},
    registry::{DialogClass, Registry},
    session::{Event, Session},
    settings::Settings,
    title::{window_title, Connection},
    widget::MemoryWidgets,
};
use tracing::{info, warn};

use dialog::{show_controls, Action};
use marks::Marks;

/// Draws option tables.
mod dialog;
/// Menu check marks.
mod marks;
/// The move history and engine output windows.
mod panels;

/// The windows that can be toggled from the View menu: class, title and
/// menu item.
const VIEWS: [(DialogClass, &str, &str); 2] = [
    (DialogClass::History, "Move History", "Show Move History"),
    (DialogClass::EngineOutput, "Engine Output", "Show Engine Output"),
];

/// The notes in the Edit menu, with their menu items.
const NOTES: [(Note, &str); 2] = [(Note::Comment, "Edit Comment"), (Note::Tags, "Edit Tags")];

/// The dialog that is up, if any.
enum Open {
    /// A settings dialog over the session.
    Settings(SessionDialog),
    /// The options of the engine.
    Engine(Dialog<Box<OptionTable<EngineOptions>>>),
}

/// The GUI: used to save state between frames.
pub struct Gui {
    /// Where the settings are saved.
    path: PathBuf,
    /// The settings and dialog scratch space.
    session: Session,
    /// Which windows are up.
    registry: Registry,
    /// Which menu items are checked.
    marks: Marks,
    /// The open dialog.
    open: Option<Open>,
    /// Its controls.
    widgets: MemoryWidgets,
    /// The options the engine announced.
    engine_options: EngineOptions,
    /// What the engine was told.
    commands: CommandLog,
    /// The thinking output of the engine.
    output: EngineOutput,
    /// Every move so far.
    moves: Vec<String>,
    /// How many of `moves` are on the board.
    shown: usize,
    /// The line being typed into the engine console.
    console: String,
    /// What happened last, for the status line.
    status: String,
    /// The title last sent to the window system.
    title: String,
    /// Where each window was last seen.
    placements: HashMap<DialogClass, WindowPlacement>,
    /// The notes that are up, with their controls.
    notes: HashMap<Note, (SessionDialog, MemoryWidgets)>,
    /// The comment after each ply that has one.
    comments: HashMap<usize, String>,
    /// The tags of the game, one per line.
    tags: String,
}

impl App for Gui {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.update_title(ctx);
        self.update_menu_bar(ctx);
        self.update_console(ctx);
        self.update_dialog(ctx);
        self.update_notes(ctx);
        self.update_error(ctx);
        self.update_history(ctx);
        self.update_engine_output(ctx);
    }
}

impl Gui {
    /// Creates a new [`Gui`] with no dialog up.
    pub fn new(
        cc: &CreationContext<'_>,
        path: PathBuf,
        settings: Settings,
        engine_options: EngineOptions,
    ) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());
        let mut output = EngineOutput::default();
        output.set_name(0, engine_options.engine());

        Self {
            path,
            session: Session::new(settings),
            registry: Registry::new(),
            marks: Marks::default(),
            open: None,
            widgets: MemoryWidgets::default(),
            engine_options,
            commands: CommandLog::new(),
            output,
            moves: Vec::new(),
            shown: 0,
            console: String::new(),
            status: String::new(),
            title: String::new(),
            placements: HashMap::new(),
            notes: HashMap::new(),
            comments: HashMap::new(),
            tags: String::from("[Event \"?\"]\n[White \"?\"]\n[Black \"?\"]\n"),
        }
    }

    /// Renames the main window if what it is connected to changed.
    fn update_title(&mut self, ctx: &Context) {
        let connection = self
            .session
            .settings
            .engines
            .first()
            .map_or(Connection::NoEngine, |engine| Connection::Engine {
                name: &engine.name,
            });
        let title = window_title("Hermit", None, connection);
        if title != self.title {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    /// Draws the menu bar and handles clicks on it.
    fn update_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top(Id::new("menu bar")).show(ctx, |ui| {
            menu::bar(ui, |ui| {
                ui.menu_button("Options", |ui| {
                    for settings_menu in Menu::ALL {
                        if ui.button(settings_menu.title()).clicked() {
                            self.open_menu(settings_menu);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Edit", |ui| {
                    for (note, item) in NOTES {
                        let label = if self.marks.is_checked(note.menu_item()) {
                            format!("\u{2714} {item}")
                        } else {
                            String::from(item)
                        };
                        if ui.button(label).clicked() {
                            self.edit_note(note);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Engine", |ui| {
                    if ui.button("Engine Settings").clicked() {
                        self.open_engine();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    for (class, title, item) in VIEWS {
                        let label = if self.marks.is_checked(item) {
                            format!("\u{2714} {item}")
                        } else {
                            String::from(item)
                        };
                        if ui.button(label).clicked() {
                            self.toggle(class, title, item);
                            ui.close_menu();
                        }
                    }
                });
            });
        });
    }

    /// Draws the engine console and the status line.
    fn update_console(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Engine console");
            ui.label("Type what the engine says: feature lines, moves or thinking output.");
            let response = ui.text_edit_singleline(&mut self.console);
            if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                let line = mem::take(&mut self.console);
                self.engine_line(&line);
                response.request_focus();
            }
            ui.separator();
            ui.label(&self.status);
        });
    }

    /// Draws the open dialog and acts on what the user did in it.
    fn update_dialog(&mut self, ctx: &Context) {
        if self.open.is_none() {
            return;
        }
        let title = String::from(self.registry.slot(DialogClass::Transient).title());
        let mut still_open = true;

        let window = self.window(ctx, DialogClass::Transient, title).open(&mut still_open);
        let Some(open) = self.open.as_ref() else {
            return;
        };
        let widgets = &mut self.widgets;
        let response = window.show(ctx, |ui| match open {
            Open::Settings(dialog) => show_controls(ui, dialog.table(), widgets),
            Open::Engine(dialog) => show_controls(ui, dialog.table(), widgets),
        });

        let mut action = response.and_then(|response| {
            self.remember(DialogClass::Transient, response.response.rect);
            response.inner.flatten()
        });
        if !still_open {
            action = Some(Action::Cancel);
        }
        if let Some(action) = action {
            self.act(action);
        }
    }

    /// Draws every note that is up and acts on what the user did in it.
    fn update_notes(&mut self, ctx: &Context) {
        for note in Note::ALL {
            let class = note.class();
            if !self.registry.is_up(class) {
                continue;
            }
            let title = String::from(self.registry.slot(class).title());
            let mut still_open = true;
            let window = self.window(ctx, class, title).open(&mut still_open);
            let Some((dialog, widgets)) = self.notes.get_mut(&note) else {
                continue;
            };
            let response = window.show(ctx, |ui| show_controls(ui, dialog.table(), widgets));

            let mut action = response.and_then(|response| {
                self.remember(class, response.response.rect);
                response.inner.flatten()
            });
            if !still_open {
                action = Some(Action::Cancel);
            }
            if let Some(action) = action {
                self.act_on_note(note, action);
            }
        }
    }

    /// Draws the error message, if there is one.
    fn update_error(&mut self, ctx: &Context) {
        if !self.registry.is_up(DialogClass::Error) {
            return;
        }
        let slot = self.registry.slot(DialogClass::Error);
        let text = String::from(slot.text().unwrap_or(""));
        let title = String::from(slot.title());

        let response = self
            .window(ctx, DialogClass::Error, title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(text);
                ui.button("OK").clicked()
            });
        if response.and_then(|response| response.inner) == Some(true) {
            self.registry.pop_down(DialogClass::Error, &mut self.marks);
        }
    }

    /// Draws the move history, if it is up.
    fn update_history(&mut self, ctx: &Context) {
        if !self.registry.is_up(DialogClass::History) {
            return;
        }
        let mut still_open = true;
        let title = String::from(self.registry.slot(DialogClass::History).title());
        let window = self.window(ctx, DialogClass::History, title).open(&mut still_open);
        let (moves, shown) = (&self.moves, self.shown);
        let response = window.show(ctx, |ui| panels::history(ui, moves, shown));

        if let Some(response) = response {
            self.remember(DialogClass::History, response.response.rect);
            if let Some(Some(shown)) = response.inner {
                self.shown = shown;
                self.status = format!("showing the position after ply {shown}");
                if self.registry.is_up(DialogClass::Comment) {
                    self.show_note(Note::Comment);
                }
            }
        }
        if !still_open {
            self.registry.pop_down(DialogClass::History, &mut self.marks);
        }
    }

    /// Draws the engine output, if it is up.
    fn update_engine_output(&mut self, ctx: &Context) {
        if !self.registry.is_up(DialogClass::EngineOutput) {
            return;
        }
        let mut still_open = true;
        let title = String::from(self.registry.slot(DialogClass::EngineOutput).title());
        let window = self
            .window(ctx, DialogClass::EngineOutput, title)
            .open(&mut still_open);
        let (output, commands) = (&self.output, &self.commands);
        let response = window.show(ctx, |ui| panels::engine_output(ui, output, commands));

        if let Some(response) = response {
            self.remember(DialogClass::EngineOutput, response.response.rect);
        }
        if !still_open {
            self.registry.pop_down(DialogClass::EngineOutput, &mut self.marks);
        }
    }

    /// A window for `class`, placed where it was last seen if that is still
    /// on screen.
    fn window<'a>(&mut self, ctx: &Context, class: DialogClass, title: String) -> Window<'a> {
        let window = Window::new(title).id(Id::new(class));
        let Some(placement) = self.placements.get_mut(&class) else {
            return window;
        };
        placement.ensure_on_screen(to_layout(ctx.screen_rect()));
        let Some(rect) = placement.rect() else {
            return window;
        };
        window
            .default_pos(Pos2::new(rect.left as f32, rect.top as f32))
            .default_size(Vec2::new(rect.width() as f32, rect.height() as f32))
    }

    /// Remembers where the window of `class` is.
    fn remember(&mut self, class: DialogClass, rect: egui::Rect) {
        self.placements.insert(class, WindowPlacement::at(to_layout(rect)));
    }

    /// Opens the settings dialog `menu`, replacing the open dialog.
    fn open_menu(&mut self, menu: Menu) {
        self.widgets = MemoryWidgets::default();
        match menu.open(&mut self.session, &mut self.widgets) {
            Ok(dialog) => {
                self.registry.pop_up(DialogClass::Transient, menu.title(), None);
                self.open = Some(Open::Settings(dialog));
            }
            Err(error) => warn!(%error, title = menu.title(), "could not open dialog"),
        }
    }

    /// Opens the Engine Settings dialog.
    fn open_engine(&mut self) {
        match self.engine_options.table() {
            Ok(table) => {
                self.widgets = MemoryWidgets::default();
                let dialog =
                    Dialog::show(Box::new(table), &mut self.engine_options, &mut self.widgets);
                let title = format!("{} Settings", self.engine_options.engine());
                self.registry.pop_up(DialogClass::Transient, &title, None);
                self.open = Some(Open::Engine(dialog));
            }
            Err(error) => warn!(%error, "engine options can't be shown"),
        }
    }

    /// Closes `note` if it is up, otherwise shows it.
    fn edit_note(&mut self, note: Note) {
        if self.registry.is_up(note.class()) {
            self.close_note(note);
        } else {
            self.show_note(note);
        }
    }

    /// Shows `note` for the shown position, or refreshes it if it is up.
    fn show_note(&mut self, note: Note) {
        let ply = self.shown;
        let (title, text) = match note {
            Note::Comment => (
                comment_title(&self.moves, ply),
                self.comments.get(&ply).cloned().unwrap_or_default(),
            ),
            Note::Tags => (String::from("Tags"), self.tags.clone()),
        };

        if let Some((_, widgets)) = self.notes.get_mut(&note) {
            let shown = note.pop_up(
                &title,
                &text,
                ply,
                &mut self.session,
                &mut self.registry,
                widgets,
            );
            if let Err(error) = shown {
                warn!(%error, %title, "could not refresh note");
            }
            return;
        }

        let mut widgets = MemoryWidgets::default();
        let shown = note.pop_up(
            &title,
            &text,
            ply,
            &mut self.session,
            &mut self.registry,
            &mut widgets,
        );
        match shown {
            Ok(Some(dialog)) => {
                self.registry
                    .mark_menu(note.menu_item(), note.class(), &mut self.marks);
                self.notes.insert(note, (dialog, widgets));
            }
            Ok(None) => warn!(%title, "note was up without controls"),
            Err(error) => warn!(%error, %title, "could not open note"),
        }
    }

    /// Hides `note` without reading it out.
    fn close_note(&mut self, note: Note) {
        self.notes.remove(&note);
        self.registry.pop_down(note.class(), &mut self.marks);
    }

    /// Does what the user asked for in `note`.
    fn act_on_note(&mut self, note: Note, action: Action) {
        let Some((dialog, widgets)) = self.notes.get_mut(&note) else {
            return;
        };
        let done = match action {
            Action::Press(index) => {
                menus::press(dialog, index, &mut self.session, widgets);
                false
            }
            Action::Select(index, selection) => {
                let mut destination = Destination::Local;
                dialog.select(index, selection, &mut self.session, widgets, &mut destination);
                false
            }
            Action::Accept => dialog.accept(&mut self.session, widgets, &mut Destination::Local),
            Action::Cancel => true,
        };
        if done {
            self.close_note(note);
        }
        self.handle_events();
    }

    /// Does what the user asked for in the open dialog.
    fn act(&mut self, action: Action) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        let widgets = &mut self.widgets;

        let done = match (action, open) {
            (Action::Press(index), Open::Settings(dialog)) => {
                menus::press(dialog, index, &mut self.session, widgets);
                false
            }
            (Action::Press(index), Open::Engine(dialog)) => {
                let mut destination = Destination::Remote(&mut self.commands);
                dialog.press(index, &mut self.engine_options, widgets, &mut destination);
                false
            }
            (Action::Select(index, selection), Open::Settings(dialog)) => {
                let mut destination = Destination::Local;
                dialog.select(index, selection, &mut self.session, widgets, &mut destination);
                false
            }
            (Action::Select(index, selection), Open::Engine(dialog)) => {
                let mut destination = Destination::Remote(&mut self.commands);
                let options = &mut self.engine_options;
                dialog.select(index, selection, options, widgets, &mut destination);
                false
            }
            (Action::Accept, Open::Settings(dialog)) => {
                let accepted = dialog.accept(&mut self.session, widgets, &mut Destination::Local);
                if accepted {
                    if let Err(error) = self.session.settings.save(&self.path) {
                        warn!(%error, "could not save settings");
                    }
                }
                accepted
            }
            (Action::Accept, Open::Engine(dialog)) => {
                let mut destination = Destination::Remote(&mut self.commands);
                dialog.accept(&mut self.engine_options, widgets, &mut destination)
            }
            (Action::Cancel, _) => true,
        };
        if done {
            self.close();
        }
        self.handle_events();
    }

    /// Closes the open dialog without reading it out.
    fn close(&mut self) {
        if self.open.take().is_some() {
            self.registry.pop_down(DialogClass::Transient, &mut self.marks);
        }
    }

    /// Acts on every event the dialogs queued.
    fn handle_events(&mut self) {
        for event in self.session.drain_events() {
            info!(%event, "dialog event");
            self.status = event.to_string();
            match event {
                Event::PopDown => self.close(),
                Event::Error(message) => {
                    self.registry.pop_up(DialogClass::Error, "Error", Some(message.as_str()));
                }
                Event::LoadEngine { slot, engine } => {
                    self.output.set_name(slot, &engine.name);
                    self.output.set_state(slot, EngineState::Idle, None);
                    if slot == 0 {
                        self.engine_options = EngineOptions::new(&engine.name);
                    }
                }
                Event::ResetGame => {
                    self.status = format!("new game: {}", self.session.settings.variant);
                    self.moves.clear();
                    self.shown = 0;
                    self.comments.clear();
                    self.output.clear_memo(0);
                    self.output.clear_memo(1);
                }
                Event::ReplaceComment { index, text } => {
                    if text.is_empty() {
                        self.comments.remove(&index);
                    } else {
                        self.comments.insert(index, text);
                    }
                }
                Event::ReplaceTags(tags) => self.tags = tags,
                Event::Redraw
                | Event::ClearHighlights
                | Event::Ponder(_)
                | Event::Cores(_)
                | Event::StartTourney
                | Event::Substitute { .. }
                | Event::CloneTourney(_)
                | Event::PlaySound(_) => {}
            }
        }
    }

    /// Shows or hides a window that exists at most once.
    fn toggle(&mut self, class: DialogClass, title: &str, item: &str) {
        if self.registry.is_up(class) {
            self.registry.pop_down(class, &mut self.marks);
        } else {
            self.registry.pop_up(class, title, None);
            self.registry.mark_menu(item, class, &mut self.marks);
        }
    }

    /// Handles a line the engine sent.
    fn engine_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("feature") => match self.engine_options.add_feature_line(line) {
                Ok(added) => self.status = format!("{added} engine options announced"),
                Err(error) => self.status = format!("bad feature line: {error}"),
            },
            Some("move") => {
                if let Some(mv) = tokens.next() {
                    self.moves.push(String::from(mv));
                    self.shown = self.moves.len();
                    self.output.set_state(0, EngineState::Idle, None);
                    if self.registry.is_up(DialogClass::Comment) {
                        self.show_note(Note::Comment);
                    }
                }
            }
            Some(_) => match EngineOutputData::parse_thinking(0, line) {
                Ok(data) => {
                    let side = if self.moves.len() % 2 == 0 {
                        Side::White
                    } else {
                        Side::Black
                    };
                    self.output.set_state(0, EngineState::Thinking, Some(side));
                    self.output.update(&data);
                }
                Err(error) => self.status = format!("not understood: {error}"),
            },
            None => {}
        }
    }
}

/// Converts an egui rectangle to whole screen points.
fn to_layout(rect: egui::Rect) -> layout::Rect {
    layout::Rect::new(
        rect.min.x as i32,
        rect.min.y as i32,
        rect.width() as i32,
        rect.height() as i32,
    )
}
