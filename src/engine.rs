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

//! Everything the dialogs need to know about a running engine: how to send
//! it an `option` command and which options it has.

use std::{
    fmt::Display,
    io::{self, Write},
};

use tracing::{debug, warn};

use crate::{
    error::{DialogError, ParseError},
    option::{Choices, Descriptor, OptionKind, OptionTable, Target},
};

/// A channel to a running engine.
///
/// Sending never waits for an answer.
pub trait EngineLink {
    /// Sends one complete command, newline included.
    fn send(&mut self, command: &str);
}

/// Where a read-out puts changed values.
pub enum Destination<'a> {
    /// Only into the backing cells.
    Local,
    /// Into the backing cells, which mirror what the engine was last told,
    /// and to the engine as `option` commands.
    Remote(&'a mut dyn EngineLink),
}

impl Destination<'_> {
    /// Whether changes go to an engine.
    pub const fn is_remote(&self) -> bool {
        matches!(*self, Self::Remote(_))
    }

    /// Tells the engine that option `name` is now `value`. Does nothing for a
    /// local destination.
    pub fn send_option<V: Display>(&mut self, name: &str, value: V) {
        if let Self::Remote(link) = self {
            let command = option_command(name, value);
            debug!(command = command.trim_end(), "sending option to engine");
            link.send(&command);
        }
    }

    /// Tells the engine that button `name` was pressed. Does nothing for a
    /// local destination.
    pub fn send_button(&mut self, name: &str) {
        if let Self::Remote(link) = self {
            let command = button_command(name);
            debug!(command = command.trim_end(), "sending button to engine");
            link.send(&command);
        }
    }
}

/// Formats `option <name>=<value>`.
pub fn option_command<V: Display>(name: &str, value: V) -> String {
    format!("option {name}={value}\n")
}

/// Formats `option <name>`, used for buttons.
pub fn button_command(name: &str) -> String {
    format!("option {name}\n")
}

/// Keeps every command it is given.
#[derive(Clone, Debug, Default)]
pub struct CommandLog {
    /// Commands in the order they were sent, newlines included.
    commands: Vec<String>,
}

impl CommandLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Every command so far.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Forgets every command so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl EngineLink for CommandLog {
    fn send(&mut self, command: &str) {
        self.commands.push(String::from(command));
    }
}

/// Writes commands to anything that takes bytes, e.g. the stdin of an engine
/// process.
pub struct WriterLink<W: Write> {
    /// Where commands go.
    writer: W,
}

impl<W: Write> WriterLink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes and flushes `command`.
    fn write_command(&mut self, command: &str) -> io::Result<()> {
        self.writer.write_all(command.as_bytes())?;
        self.writer.flush()
    }
}

impl<W: Write> EngineLink for WriterLink<W> {
    fn send(&mut self, command: &str) {
        // the engine may have died; there is nobody to tell but the log
        if let Err(error) = self.write_command(command) {
            warn!(%error, command = command.trim_end(), "could not send command to engine");
        }
    }
}

/// The type and constraints of an engine option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineOptionKind {
    /// An integer in `[min, max]`.
    Spin {
        /// The smallest allowed value.
        min: i32,
        /// The largest allowed value.
        max: i32,
    },
    /// On or off.
    Check,
    /// Free text.
    String,
    /// A file name.
    File,
    /// A directory name.
    Path,
    /// One of a fixed set of strings.
    Combo(Vec<String>),
    /// Something the engine does when told.
    Button,
    /// Tells the engine to save its settings.
    Save,
}

/// One option an engine announced, with the value it was last told.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOption {
    /// The name the engine knows it by.
    name: String,
    /// The type of the option.
    kind: EngineOptionKind,
    /// The value of a spin.
    value: i32,
    /// The value of a check.
    flag: bool,
    /// The value of a string, file, path or combo.
    text: Option<String>,
}

impl Default for EngineOption {
    fn default() -> Self {
        Self::new("", EngineOptionKind::Button)
    }
}

impl EngineOption {
    /// Creates an option with every value empty.
    fn new(name: &str, kind: EngineOptionKind) -> Self {
        Self {
            name: String::from(name),
            kind,
            value: 0,
            flag: false,
            text: None,
        }
    }

    /// The name the engine knows the option by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type of the option.
    pub const fn kind(&self) -> &EngineOptionKind {
        &self.kind
    }

    /// The value of a spin.
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// The value of a check.
    pub const fn flag(&self) -> bool {
        self.flag
    }

    /// The value of a string, file, path or combo.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// The options of one engine, mirroring what it was last told.
///
/// This is the context of the Engine Settings dialog, which is always read
/// out to a [`Destination::Remote`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// The name of the engine, for the dialog title.
    engine: String,
    /// Every option in the order the engine announced them.
    options: Vec<EngineOption>,
    /// Takes the writes of a table that has more options than these.
    spare: EngineOption,
}

impl EngineOptions {
    /// Creates an empty set of options for `engine`.
    pub fn new(engine: &str) -> Self {
        Self {
            engine: String::from(engine),
            options: Vec::new(),
            spare: EngineOption::default(),
        }
    }

    /// The name of the engine.
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Every option.
    pub fn options(&self) -> &[EngineOption] {
        &self.options
    }

    /// Finds option `name`.
    pub fn get(&self, name: &str) -> Option<&EngineOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Adds a spin, clamping `default` into `[min, max]`.
    #[must_use]
    pub fn spin(mut self, name: &str, default: i32, min: i32, max: i32) -> Self {
        let mut option = EngineOption::new(name, EngineOptionKind::Spin { min, max });
        option.value = default.max(min).min(max);
        self.options.push(option);
        self
    }

    /// Adds a check.
    #[must_use]
    pub fn check(mut self, name: &str, default: bool) -> Self {
        let mut option = EngineOption::new(name, EngineOptionKind::Check);
        option.flag = default;
        self.options.push(option);
        self
    }

    /// Adds free text.
    #[must_use]
    pub fn string(self, name: &str, default: &str) -> Self {
        self.with_text(name, EngineOptionKind::String, default)
    }

    /// Adds a file name.
    #[must_use]
    pub fn file(self, name: &str, default: &str) -> Self {
        self.with_text(name, EngineOptionKind::File, default)
    }

    /// Adds a directory name.
    #[must_use]
    pub fn path(self, name: &str, default: &str) -> Self {
        self.with_text(name, EngineOptionKind::Path, default)
    }

    /// Adds a combo of `values`.
    #[must_use]
    pub fn combo(self, name: &str, default: &str, values: &[&str]) -> Self {
        let values = values.iter().map(|&value| String::from(value)).collect();
        self.with_text(name, EngineOptionKind::Combo(values), default)
    }

    /// Adds a button.
    #[must_use]
    pub fn button(mut self, name: &str) -> Self {
        self.options
            .push(EngineOption::new(name, EngineOptionKind::Button));
        self
    }

    /// Adds a save button.
    #[must_use]
    pub fn save(mut self, name: &str) -> Self {
        self.options.push(EngineOption::new(name, EngineOptionKind::Save));
        self
    }

    /// Adds the option described by the value of an engine's
    /// `feature option="..."`, e.g. `Hash -spin 64 1 1024` or
    /// `Style -combo Solid /// *Risky`. A `*` marks the default of a combo.
    ///
    /// An option the engine announced before is replaced in place.
    ///
    /// # Errors
    ///
    /// Fails if the name or type is missing, the type is unknown, or the
    /// values don't fit the type.
    pub fn add_feature(&mut self, feature: &str) -> Result<(), ParseError> {
        let (name, rest) = feature
            .split_once(" -")
            .ok_or(ParseError::ExpectedToken)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::ExpectedToken);
        }
        let (kind, args) = rest.split_once(' ').unwrap_or((rest, ""));
        let args = args.trim();

        let option = match kind {
            "spin" | "slider" => {
                let mut numbers = args
                    .split_whitespace()
                    .map(|token| token.parse::<i32>().ok().ok_or(ParseError::InvalidToken));
                let mut next = || numbers.next().unwrap_or(Err(ParseError::ExpectedToken));
                let (default, min, max) = (next()?, next()?, next()?);
                if min > max {
                    return Err(ParseError::ErroneousToken);
                }
                let mut option = EngineOption::new(name, EngineOptionKind::Spin { min, max });
                option.value = default.clamp(min, max);
                option
            }
            "check" => {
                let mut option = EngineOption::new(name, EngineOptionKind::Check);
                option.flag = match args {
                    "1" => true,
                    "0" => false,
                    "" => return Err(ParseError::ExpectedToken),
                    _ => return Err(ParseError::InvalidToken),
                };
                option
            }
            "string" | "file" | "path" => {
                let kind = match kind {
                    "file" => EngineOptionKind::File,
                    "path" => EngineOptionKind::Path,
                    _ => EngineOptionKind::String,
                };
                let mut option = EngineOption::new(name, kind);
                option.text = Some(String::from(args));
                option
            }
            "combo" => {
                let mut default = None;
                let values: Vec<String> = args
                    .split("///")
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(|value| {
                        value.strip_prefix('*').map_or_else(
                            || String::from(value),
                            |value| {
                                let value = String::from(value.trim_start());
                                default.get_or_insert_with(|| value.clone());
                                value
                            },
                        )
                    })
                    .collect();
                let first = values.first().cloned().ok_or(ParseError::ExpectedToken)?;
                let mut option = EngineOption::new(name, EngineOptionKind::Combo(values));
                option.text = Some(default.unwrap_or(first));
                option
            }
            "button" => EngineOption::new(name, EngineOptionKind::Button),
            "save" => EngineOption::new(name, EngineOptionKind::Save),
            _ => return Err(ParseError::InvalidToken),
        };

        debug!(engine = %self.engine, option = name, "engine announced option");
        if let Some(old) = self.options.iter_mut().find(|old| old.name == name) {
            *old = option;
        } else {
            self.options.push(option);
        }
        Ok(())
    }

    /// Adds every `option="..."` of a `feature` line.
    ///
    /// Returns how many options were added.
    ///
    /// # Errors
    ///
    /// Fails if the line isn't a `feature` line, a quote is missing or an
    /// option can't be parsed. Options before the bad one are kept.
    pub fn add_feature_line(&mut self, line: &str) -> Result<usize, ParseError> {
        let rest = line
            .trim_start()
            .strip_prefix("feature ")
            .ok_or(ParseError::InvalidToken)?;

        let mut added = 0;
        for chunk in rest.split("option=\"").skip(1) {
            let (feature, _) = chunk.split_once('"').ok_or(ParseError::ExpectedToken)?;
            self.add_feature(feature)?;
            added += 1;
        }
        Ok(added)
    }

    /// Adds an option whose value is text.
    fn with_text(mut self, name: &str, kind: EngineOptionKind, default: &str) -> Self {
        let mut option = EngineOption::new(name, kind);
        option.text = Some(String::from(default));
        self.options.push(option);
        self
    }

    /// Option `index`, or the spare if there is no such option.
    fn cell(&mut self, index: usize) -> &mut EngineOption {
        match self.options.get_mut(index) {
            Some(option) => option,
            None => {
                warn!(index, engine = %self.engine, "no such engine option");
                &mut self.spare
            }
        }
    }

    /// Builds the Engine Settings dialog for these options.
    ///
    /// The table addresses options by position, so it belongs with these
    /// options. Applied to options with fewer entries, the missing ones are
    /// backed by a single spare cell.
    ///
    /// # Errors
    ///
    /// Fails if a combo has no values.
    pub fn table(&self) -> Result<OptionTable<Self>, DialogError> {
        let mut descriptors = Vec::with_capacity(self.options.len() + 1);

        for (index, option) in self.options.iter().enumerate() {
            let name = option.name.as_str();
            let descriptor = match &option.kind {
                &EngineOptionKind::Spin { min, max } => {
                    Descriptor::spin(name, min, max, move |e: &mut Self| {
                        &mut e.cell(index).value
                    })
                }
                EngineOptionKind::Check => {
                    Descriptor::check_box(name, move |e: &mut Self| &mut e.cell(index).flag)
                }
                EngineOptionKind::String => {
                    Descriptor::text_box(name, move |e: &mut Self| &mut e.cell(index).text)
                }
                EngineOptionKind::File => {
                    Descriptor::file_name(name, "", move |e: &mut Self| {
                        &mut e.cell(index).text
                    })
                }
                EngineOptionKind::Path => {
                    Descriptor::path_name(name, move |e: &mut Self| &mut e.cell(index).text)
                }
                EngineOptionKind::Combo(values) => Descriptor::combo_box(
                    name,
                    Choices::new(values.iter().cloned()),
                    move |e: &mut Self| &mut e.cell(index).text,
                ),
                EngineOptionKind::Button => {
                    Descriptor::new(OptionKind::Button, 0, 0, Target::None, None, name)
                }
                EngineOptionKind::Save => {
                    Descriptor::new(OptionKind::SaveButton, 0, 0, Target::None, None, name)
                }
            };
            descriptors.push(descriptor);
        }
        descriptors.push(Descriptor::end());

        OptionTable::new(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        button_command, option_command, CommandLog, Destination, EngineLink, EngineOptionKind,
        EngineOptions, WriterLink,
    };
    use crate::{
        dialog::Dialog,
        error::ParseError,
        option::{Descriptor, OptionKind},
        widget::{MemoryWidgets, Widgets},
    };

    #[test]
    fn commands_are_formatted() {
        assert_eq!(option_command("Hash", 64), "option Hash=64\n", "spin format");
        assert_eq!(
            option_command("Book File", "book.bin"),
            "option Book File=book.bin\n",
            "names may contain spaces"
        );
        assert_eq!(button_command("Clear Hash"), "option Clear Hash\n", "button format");
    }

    #[test]
    fn local_destinations_send_nothing() {
        let mut log = CommandLog::new();
        Destination::Local.send_option("Hash", 64);
        {
            let mut remote = Destination::Remote(&mut log);
            assert!(remote.is_remote(), "should be remote");
            remote.send_option("Hash", 64);
            remote.send_button("Clear Hash");
        }
        assert_eq!(
            log.commands(),
            ["option Hash=64\n", "option Clear Hash\n"],
            "only the remote sends"
        );
    }

    #[test]
    fn writer_link_writes_commands() {
        let mut link = WriterLink::new(Vec::new());
        link.send("option Threads=1\n");
        link.send("option Hash=16\n");
        assert_eq!(
            link.into_inner(),
            b"option Threads=1\noption Hash=16\n",
            "commands should be written verbatim"
        );
    }

    #[test]
    fn engine_table_mirrors_options() {
        let options = EngineOptions::new("Crab")
            .spin("Hash", 4096, 1, 1024)
            .check("Ponder", false)
            .combo("Style", "Solid", &["Solid", "Risky"])
            .button("Clear Hash")
            .save("Save");
        assert_eq!(
            options.get("Hash").map(super::EngineOption::value),
            Some(1024),
            "defaults are clamped"
        );

        let table = options.table().expect("table is valid");
        let kinds: Vec<OptionKind> = table.iter().map(Descriptor::kind).collect();
        assert_eq!(
            kinds,
            [
                OptionKind::Spin,
                OptionKind::CheckBox,
                OptionKind::ComboBox,
                OptionKind::Button,
                OptionKind::SaveButton,
                OptionKind::EndMark
            ],
            "every option should get a control"
        );
    }

    #[test]
    fn features_are_parsed() {
        let mut options = EngineOptions::new("Fairy-Max");
        let features = [
            "Hash -spin 64 1 1024",
            "Resign -check 1",
            "Book File -file book.bin",
            "Style -combo Solid /// *Risky /// Wild",
            "Clear Hash -button",
        ];
        for feature in features {
            assert_eq!(options.add_feature(feature), Ok(()), "{feature} is valid");
        }

        assert_eq!(options.options().len(), 5, "one option per feature");
        assert_eq!(options.get("Hash").map(super::EngineOption::value), Some(64), "spin");
        assert!(options.get("Resign").is_some_and(super::EngineOption::flag), "check");
        assert_eq!(
            options.get("Book File").and_then(super::EngineOption::text),
            Some("book.bin"),
            "names may contain spaces"
        );
        let style = options.get("Style").expect("combo was added");
        assert_eq!(style.text(), Some("Risky"), "starred value is the default");
        assert_eq!(
            style.kind(),
            &EngineOptionKind::Combo(vec![
                String::from("Solid"),
                String::from("Risky"),
                String::from("Wild")
            ]),
            "stars are stripped"
        );

        assert_eq!(options.add_feature("Hash -spin 128 1 1024"), Ok(()), "re-announced");
        assert_eq!(options.options().len(), 5, "replaced in place");
        assert_eq!(options.get("Hash").map(super::EngineOption::value), Some(128), "new default");
    }

    #[test]
    fn bad_features_are_rejected() {
        let mut options = EngineOptions::new("Fairy-Max");
        assert_eq!(options.add_feature("Hash"), Err(ParseError::ExpectedToken), "no type");
        assert_eq!(
            options.add_feature("Hash -spin 64 1"),
            Err(ParseError::ExpectedToken),
            "missing max"
        );
        assert_eq!(
            options.add_feature("Hash -spin big 1 2"),
            Err(ParseError::InvalidToken),
            "not a number"
        );
        assert_eq!(
            options.add_feature("Hash -spin 1 10 2"),
            Err(ParseError::ErroneousToken),
            "empty range"
        );
        assert_eq!(
            options.add_feature("Hash -colour red"),
            Err(ParseError::InvalidToken),
            "unknown type"
        );
        assert!(options.options().is_empty(), "nothing was added");
    }

    #[test]
    fn feature_lines_hold_many_options() {
        let mut options = EngineOptions::new("Fairy-Max");
        assert_eq!(
            options.add_feature_line(
                r#"feature option="Hash -spin 64 1 1024" done=0 option="Clear Hash -button""#
            ),
            Ok(2),
            "two options on one line"
        );
        assert_eq!(options.add_feature_line("feature done=1"), Ok(0), "no options");
        assert_eq!(
            options.add_feature_line(r#"feature option="Resign -check 1"#),
            Err(ParseError::ExpectedToken),
            "unterminated quote"
        );
        assert_eq!(
            options.add_feature_line("move e2e4"),
            Err(ParseError::InvalidToken),
            "not a feature line"
        );
        assert_eq!(options.options().len(), 2, "only the good options were added");
    }

    #[test]
    fn tables_survive_fewer_options() {
        let announced = EngineOptions::new("Crab")
            .spin("Hash", 16, 1, 1024)
            .check("Ponder", false);
        let table = announced.table().expect("table is valid");

        let mut restarted = EngineOptions::new("Crab").spin("Hash", 32, 1, 1024);
        let mut widgets = MemoryWidgets::new(0);
        let mut dialog = Dialog::show(Box::new(table), &mut restarted, &mut widgets);
        assert_eq!(widgets.text(0), "32", "existing options are shown");
        assert!(!widgets.state(1), "missing options read as empty");

        widgets.set_state(1, true);
        let mut log = CommandLog::new();
        assert!(
            dialog.accept(&mut restarted, &mut widgets, &mut Destination::Remote(&mut log)),
            "engine dialogs always accept"
        );
        assert_eq!(restarted.options().len(), 1, "nothing was added");
        assert_eq!(log.commands(), ["option Ponder=1\n"], "the engine is still told");
    }
}
