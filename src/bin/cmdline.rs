//! Drives the dialogs of Hermit from stdin, one command per line.
//!
//! Anything the engine would send (`feature`, `move` and thinking output) can
//! be typed in as well, so every window can be exercised without a board.

use std::{
    collections::HashMap,
    io::{self, stdin, Stdout},
    path::PathBuf,
};

use clap::Parser;
use frontend::{
    dialog::Dialog,
    engine::{Destination, EngineOptions, WriterLink},
    error::{ConfigError, ParseError},
    history::{comment_title, history_rows},
    logging::{self, LogArgs},
    menus::{self, Menu, Note, SessionDialog},
    option::{OptionKind, OptionTable},
    output::{EngineOutput, EngineOutputData, EngineState},
    registry::{DialogClass, MenuBar, PopUp, Registry},
    session::{Event, Session},
    settings::Settings,
    title::{window_title, Connection},
    widget::{MemoryWidgets, Widgets},
};
use tracing::{info, warn};

/// The command line of the `cmdline` front end.
#[derive(Parser)]
#[command(version, about = "Drives the option dialogs from stdin")]
struct Args {
    /// The settings file
    #[arg(long, default_value = "hermit.toml")]
    settings: PathBuf,

    #[command(flatten)]
    log: LogArgs,
}

/// The dialog that is up, if any.
enum Open {
    /// A settings dialog over the session.
    Settings {
        /// Which one.
        menu: Menu,
        /// The dialog.
        dialog: SessionDialog,
    },
    /// The options of the engine.
    Engine(Dialog<Box<OptionTable<EngineOptions>>>),
    /// A comment or the tags.
    Note {
        /// Which one.
        note: Note,
        /// The dialog.
        dialog: SessionDialog,
    },
}

impl Open {
    /// The registry class of the dialog.
    const fn class(&self) -> DialogClass {
        match self {
            Self::Settings { .. } | Self::Engine(_) => DialogClass::Transient,
            Self::Note { note, .. } => note.class(),
        }
    }
}

/// Prints menu check marks.
struct PrintedMarks;

/// Everything the command loop keeps between commands.
struct State {
    /// Where the settings are saved.
    path: PathBuf,
    /// The settings and dialog scratch space.
    session: Session,
    /// The options the engine announced.
    engine_options: EngineOptions,
    /// Where engine commands go.
    link: WriterLink<Stdout>,
    /// The open dialog.
    open: Option<Open>,
    /// Its controls.
    widgets: MemoryWidgets,
    /// Which windows are up.
    registry: Registry,
    /// The moves so far.
    moves: Vec<String>,
    /// The thinking output of the engine.
    output: EngineOutput,
    /// The comment after each ply that has one.
    comments: HashMap<usize, String>,
    /// The tags of the game, one per line.
    tags: String,
}

impl MenuBar for PrintedMarks {
    fn mark(&mut self, item: &str, on: bool) {
        println!("menu \"{item}\" {}", if on { "checked" } else { "unchecked" });
    }
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    logging::init(&args.log.filter_spec());

    let settings = Settings::load_or_default(&args.settings)?;
    let mut state = State::new(args.settings, settings);
    println!("{}", state.title());

    for line in stdin().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "could not read from stdin");
                break;
            }
        };
        if !state.handle(&line) {
            break;
        }
    }
    Ok(())
}

impl State {
    /// Creates the state of a fresh session.
    fn new(path: PathBuf, settings: Settings) -> Self {
        Self {
            path,
            session: Session::new(settings),
            engine_options: EngineOptions::new("engine"),
            link: WriterLink::new(io::stdout()),
            open: None,
            widgets: MemoryWidgets::default(),
            registry: Registry::new(),
            moves: Vec::new(),
            output: EngineOutput::default(),
            comments: HashMap::new(),
            tags: String::from("[Event \"?\"]\n[White \"?\"]\n[Black \"?\"]\n"),
        }
    }

    /// The title of the main window.
    fn title(&self) -> String {
        let connection = self
            .session
            .settings
            .engines
            .first()
            .map_or(Connection::NoEngine, |engine| Connection::Engine {
                name: &engine.name,
            });
        window_title("Hermit", None, connection)
    }

    /// Handles one line of input. Returns `false` on `quit`.
    fn handle(&mut self, line: &str) -> bool {
        let mut tokens = line.split_whitespace();
        let result = match tokens.next() {
            Some("menus") => {
                for menu in Menu::ALL {
                    println!("{}", menu.title());
                }
                Ok(())
            }
            Some("open") => self.open_menu(&tokens.collect::<Vec<_>>().join(" ")),
            Some("engine") => self.open_engine(),
            Some("show") => {
                self.print_controls();
                Ok(())
            }
            Some("set") => self.set_text(tokens),
            Some("check") => self.set_state(tokens),
            Some("select") => self.select(tokens),
            Some("press") => self.press(tokens),
            Some("ok") => {
                self.accept();
                Ok(())
            }
            Some("cancel") => {
                self.close();
                Ok(())
            }
            Some("feature") => self
                .engine_options
                .add_feature_line(line)
                .map(|added| println!("{added} options added")),
            Some("move") => {
                self.moves.extend(tokens.next().map(String::from));
                self.print_history();
                if self.registry.is_up(DialogClass::Comment) {
                    self.show_note(Note::Comment);
                }
                Ok(())
            }
            Some("comment") => {
                self.edit_note(Note::Comment);
                Ok(())
            }
            Some("tags") => {
                self.edit_note(Note::Tags);
                Ok(())
            }
            Some("history") => {
                self.toggle(DialogClass::History, "Move History", "Show Move History");
                Ok(())
            }
            Some("output") => {
                self.toggle(DialogClass::EngineOutput, "Engine Output", "Show Engine Output");
                Ok(())
            }
            Some("save") => {
                if let Err(error) = self.session.settings.save(&self.path) {
                    println!("{error}");
                }
                Ok(())
            }
            Some("quit") => return false,
            Some(first) if first.starts_with(|c: char| c.is_ascii_digit()) => {
                EngineOutputData::parse_thinking(0, line).map(|data| self.think(&data))
            }
            Some(other) => {
                println!("Unrecognised command \"{other}\".");
                Ok(())
            }
            None => Ok(()),
        };
        if let Err(error) = result {
            println!("Could not parse \"{line}\": {error}");
        }
        true
    }

    /// Opens the settings dialog called `title`.
    fn open_menu(&mut self, title: &str) -> Result<(), ParseError> {
        let menu = Menu::from_title(title).ok_or(ParseError::InvalidToken)?;
        self.close_unless(DialogClass::Transient);
        self.widgets = MemoryWidgets::default();
        match menu.open(&mut self.session, &mut self.widgets) {
            Ok(dialog) => {
                let pop_up = self
                    .registry
                    .pop_up(DialogClass::Transient, menu.title(), None);
                if pop_up == PopUp::Refreshed {
                    info!(title = menu.title(), "replaced the open dialog");
                }
                self.open = Some(Open::Settings { menu, dialog });
                self.print_controls();
            }
            Err(error) => warn!(%error, title = menu.title(), "could not open dialog"),
        }
        Ok(())
    }

    /// Opens the Engine Settings dialog.
    fn open_engine(&mut self) -> Result<(), ParseError> {
        match self.engine_options.table() {
            Ok(table) => {
                self.close_unless(DialogClass::Transient);
                self.widgets = MemoryWidgets::default();
                let dialog =
                    Dialog::show(Box::new(table), &mut self.engine_options, &mut self.widgets);
                self.registry.pop_up(DialogClass::Transient, "Engine Settings", None);
                self.open = Some(Open::Engine(dialog));
                self.print_controls();
            }
            Err(error) => warn!(%error, "engine options can't be shown"),
        }
        Ok(())
    }

    /// Closes `note` if it is up, otherwise shows it.
    fn edit_note(&mut self, note: Note) {
        if self.registry.is_up(note.class()) {
            self.close();
        } else {
            self.show_note(note);
        }
    }

    /// Shows `note` for the last move, or refreshes it if it is up.
    fn show_note(&mut self, note: Note) {
        let ply = self.moves.len();
        let (title, text) = match note {
            Note::Comment => (
                comment_title(&self.moves, ply),
                self.comments.get(&ply).cloned().unwrap_or_default(),
            ),
            Note::Tags => (String::from("Tags"), self.tags.clone()),
        };

        self.close_unless(note.class());
        if !self.registry.is_up(note.class()) {
            self.widgets = MemoryWidgets::default();
        }
        let shown = note.pop_up(
            &title,
            &text,
            ply,
            &mut self.session,
            &mut self.registry,
            &mut self.widgets,
        );
        match shown {
            Ok(Some(dialog)) => {
                self.registry
                    .mark_menu(note.menu_item(), note.class(), &mut PrintedMarks);
                self.open = Some(Open::Note { note, dialog });
            }
            Ok(None) => info!(%title, "refreshed the open note"),
            Err(error) => warn!(%error, %title, "could not open note"),
        }
        self.print_controls();
    }

    /// Sets the text of a control: `set <index> <text>`.
    fn set_text<'a, T>(&mut self, mut tokens: T) -> Result<(), ParseError>
    where
        T: Iterator<Item = &'a str>,
    {
        let index = parse_index(tokens.next())?;
        let text = tokens.collect::<Vec<_>>().join(" ");
        self.widgets.set_text(index, &text);
        Ok(())
    }

    /// Checks or unchecks a check box: `check <index> on|off`.
    fn set_state<'a, T>(&mut self, mut tokens: T) -> Result<(), ParseError>
    where
        T: Iterator<Item = &'a str>,
    {
        let index = parse_index(tokens.next())?;
        let on = match tokens.next() {
            Some("on") => true,
            Some("off") => false,
            Some(_) => return Err(ParseError::InvalidToken),
            None => return Err(ParseError::ExpectedToken),
        };
        self.widgets.set_state(index, on);
        Ok(())
    }

    /// Selects a combo box candidate: `select <index> <candidate>`.
    fn select<'a, T>(&mut self, mut tokens: T) -> Result<(), ParseError>
    where
        T: Iterator<Item = &'a str>,
    {
        let index = parse_index(tokens.next())?;
        let selection = parse_index(tokens.next())?;
        match self.open.as_mut() {
            Some(Open::Settings { dialog, .. } | Open::Note { dialog, .. }) => dialog.select(
                index,
                selection,
                &mut self.session,
                &mut self.widgets,
                &mut Destination::Local,
            ),
            Some(Open::Engine(dialog)) => dialog.select(
                index,
                selection,
                &mut self.engine_options,
                &mut self.widgets,
                &mut Destination::Remote(&mut self.link),
            ),
            None => println!("No dialog is up."),
        }
        self.handle_events();
        Ok(())
    }

    /// Presses a button: `press <index>`.
    fn press<'a, T>(&mut self, mut tokens: T) -> Result<(), ParseError>
    where
        T: Iterator<Item = &'a str>,
    {
        let index = parse_index(tokens.next())?;
        match self.open.as_mut() {
            Some(Open::Settings { dialog, .. } | Open::Note { dialog, .. }) => {
                menus::press(dialog, index, &mut self.session, &mut self.widgets);
            }
            Some(Open::Engine(dialog)) => dialog.press(
                index,
                &mut self.engine_options,
                &mut self.widgets,
                &mut Destination::Remote(&mut self.link),
            ),
            None => println!("No dialog is up."),
        }
        self.handle_events();
        Ok(())
    }

    /// Reads out the open dialog and closes it if it accepts.
    fn accept(&mut self) {
        let accepted = match self.open.as_mut() {
            Some(Open::Settings { dialog, .. } | Open::Note { dialog, .. }) => {
                dialog.accept(&mut self.session, &mut self.widgets, &mut Destination::Local)
            }
            Some(Open::Engine(dialog)) => dialog.accept(
                &mut self.engine_options,
                &mut self.widgets,
                &mut Destination::Remote(&mut self.link),
            ),
            None => {
                println!("No dialog is up.");
                return;
            }
        };
        if accepted {
            self.close();
        } else {
            println!("The dialog stays open.");
        }
        self.handle_events();
    }

    /// Closes the open dialog without reading it out.
    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.registry.pop_down(open.class(), &mut PrintedMarks);
        }
    }

    /// Closes the open dialog if it isn't of `class`.
    fn close_unless(&mut self, class: DialogClass) {
        if self.open.as_ref().is_some_and(|open| open.class() != class) {
            self.close();
        }
    }

    /// Acts on every event the dialogs queued.
    fn handle_events(&mut self) {
        for event in self.session.drain_events() {
            println!("event: {event}");
            match event {
                Event::PopDown => self.close(),
                Event::Error(message) => {
                    self.registry.pop_up(DialogClass::Error, "Error", Some(message.as_str()));
                }
                Event::LoadEngine { slot, engine } => {
                    self.output.set_name(slot, &engine.name);
                    self.output.set_state(slot, EngineState::Idle, None);
                    self.engine_options = EngineOptions::new(&engine.name);
                    println!("{}", self.title());
                }
                Event::ReplaceComment { index, text } => {
                    if text.is_empty() {
                        self.comments.remove(&index);
                    } else {
                        self.comments.insert(index, text);
                    }
                }
                Event::ReplaceTags(tags) => self.tags = tags,
                Event::ResetGame => {
                    println!("new game: {}", self.session.settings.variant);
                    self.moves.clear();
                    self.comments.clear();
                }
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
            self.registry.pop_down(class, &mut PrintedMarks);
            return;
        }
        self.registry.pop_up(class, title, None);
        self.registry.mark_menu(item, class, &mut PrintedMarks);
        match class {
            DialogClass::History => self.print_history(),
            DialogClass::EngineOutput => self.print_output(),
            DialogClass::Transient
            | DialogClass::Comment
            | DialogClass::Tags
            | DialogClass::Error => {}
        }
    }

    /// Shows a line of thinking output.
    fn think(&mut self, data: &EngineOutputData) {
        self.output.set_state(data.which, EngineState::Thinking, None);
        self.output.update(data);
        if self.registry.is_up(DialogClass::EngineOutput) {
            self.print_output();
        }
    }

    /// Prints the move history.
    fn print_history(&self) {
        for row in history_rows(&self.moves, self.moves.len()) {
            println!("{:>3}. {:<8} {}", row.number, row.white, row.black);
        }
    }

    /// Prints the first engine's pane.
    fn print_output(&self) {
        let Some(pane) = self.output.pane(0) else {
            return;
        };
        println!("{} {}", pane.state_label, pane.nps);
        for line in &pane.memo {
            print!("{line}");
        }
    }

    /// Prints every control of the open dialog.
    fn print_controls(&self) {
        let title = self.registry.slot(DialogClass::Transient).title();
        match self.open.as_ref() {
            Some(Open::Settings { menu, dialog }) => {
                println!("{}", menu.title());
                print_table(dialog.table(), &self.widgets);
            }
            Some(Open::Engine(dialog)) => {
                println!("{title}");
                print_table(dialog.table(), &self.widgets);
            }
            Some(Open::Note { note, dialog }) => {
                println!("{}", self.registry.slot(note.class()).title());
                print_table(dialog.table(), &self.widgets);
            }
            None => println!("No dialog is up."),
        }
    }
}

/// Prints one line per control of `table`.
fn print_table<C>(table: &OptionTable<C>, widgets: &MemoryWidgets) {
    for (index, option) in table.iter().enumerate() {
        let label = option.text();
        match option.kind() {
            OptionKind::TextBox
            | OptionKind::FileName
            | OptionKind::PathName
            | OptionKind::Spin
            | OptionKind::Fractional => {
                println!("{index:>3} {label} [{}]", widgets.text(index));
            }
            OptionKind::CheckBox => {
                let mark = if widgets.state(index) { 'x' } else { ' ' };
                println!("{index:>3} [{mark}] {label}");
            }
            OptionKind::ComboBox => {
                let Some(choices) = option.choices() else {
                    continue;
                };
                let selected = widgets.selection(index);
                let labels: Vec<String> = choices
                    .labels()
                    .enumerate()
                    .map(|(candidate, text)| {
                        if candidate == selected {
                            format!("*{text}")
                        } else {
                            String::from(text)
                        }
                    })
                    .collect();
                println!("{index:>3} {label} <{}>", labels.join(" | "));
            }
            OptionKind::Button | OptionKind::SaveButton => println!("{index:>3} ({label})"),
            OptionKind::Label => println!("    {label}"),
            OptionKind::Break => println!("    ----"),
            OptionKind::EndMark => println!("{index:>3} OK / Cancel"),
        }
    }
}

/// Parses the index of a control.
fn parse_index(token: Option<&str>) -> Result<usize, ParseError> {
    token
        .ok_or(ParseError::ExpectedToken)?
        .parse()
        .ok()
        .ok_or(ParseError::InvalidToken)
}
