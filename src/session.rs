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

//! The context local dialogs read from and write to.

use std::{
    fmt::{self, Display, Formatter},
    mem,
};

use getrandom::getrandom;
use oorandom::Rand64;
use tracing::{debug, warn};

use crate::settings::{EngineEntry, Settings};

/// Something a dialog asks the rest of the front end to do.
///
/// Dialogs never act on the board or the engines directly; they queue one of
/// these and the front end drains the queue after every dialog event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Redraw the board.
    Redraw,
    /// Remove move highlights.
    ClearHighlights,
    /// Turn pondering on or off.
    Ponder(bool),
    /// Tell the engines about a new number of cores.
    Cores(i32),
    /// Start a new game with the current settings.
    ResetGame,
    /// Start the tournament in the tournament file.
    StartTourney,
    /// Replace (or, if `replace` is false, upgrade) tournament participants.
    Substitute {
        /// The participants, one per line.
        participants: String,
        /// Replace rather than upgrade.
        replace: bool,
    },
    /// Read the settings of an existing tournament file.
    CloneTourney(String),
    /// Play a sound file.
    PlaySound(String),
    /// Start `engine` as the first (`0`) or second (`1`) engine.
    LoadEngine {
        /// Which engine to replace.
        slot: usize,
        /// What to start.
        engine: EngineEntry,
    },
    /// Replace the comment after ply `index`.
    ReplaceComment {
        /// The ply the comment follows. 0 is before the first move.
        index: usize,
        /// The new comment, empty to remove it.
        text: String,
    },
    /// Replace the tags of the game with these, one per line.
    ReplaceTags(String),
    /// Close the open settings dialog.
    PopDown,
    /// Show an error message.
    Error(String),
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redraw => write!(f, "redraw"),
            Self::ClearHighlights => write!(f, "clear highlights"),
            Self::Ponder(on) => write!(f, "ponder {}", if *on { "on" } else { "off" }),
            Self::Cores(cores) => write!(f, "cores {cores}"),
            Self::ResetGame => write!(f, "new game"),
            Self::StartTourney => write!(f, "start tourney"),
            Self::Substitute {
                participants,
                replace,
            } => {
                let verb = if *replace { "replace" } else { "upgrade" };
                let count = participants.lines().filter(|line| !line.trim().is_empty()).count();
                write!(f, "{verb} participants ({count} engines)")
            }
            Self::CloneTourney(file) => write!(f, "clone tourney {file}"),
            Self::PlaySound(file) => write!(f, "play {file}"),
            Self::LoadEngine { slot, engine } => {
                write!(f, "load {} as engine {}", engine.name, slot + 1)
            }
            Self::ReplaceComment { index, text } if text.is_empty() => {
                write!(f, "remove comment on ply {index}")
            }
            Self::ReplaceComment { index, .. } => write!(f, "comment on ply {index}"),
            Self::ReplaceTags(tags) => write!(f, "replace tags ({} lines)", tags.lines().count()),
            Self::PopDown => write!(f, "close dialog"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// The kinds of time control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeControlKind {
    /// A number of moves in a number of minutes.
    #[default]
    Classical,
    /// A number of minutes plus seconds per move.
    Incremental,
    /// A fixed number of seconds per move.
    Fixed,
}

/// Values that only exist while a dialog is open.
///
/// Dialogs edit these rather than [`Settings`] when the setting is stored in a
/// different form than it is edited in, or when it may only change if the
/// whole dialog is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Scratch {
    /// The search mode as the string value of its combo box.
    pub search_mode: Option<String>,
    /// The sound picked for trying out.
    pub trial_sound: Option<String>,
    /// Whether the next game is a shuffle game.
    pub shuffle: bool,
    /// The start position of the next shuffle game. -1 is random.
    pub frc_position: i32,
    /// The kind of time control being edited.
    pub tc_kind: TimeControlKind,
    /// Moves per session.
    pub tc_moves: i32,
    /// Minutes per session.
    pub tc_minutes: i32,
    /// Seconds per move.
    pub tc_increment: i32,
    /// Time odds of the first engine.
    pub tc_odds_first: i32,
    /// Time odds of the second engine.
    pub tc_odds_second: i32,
    /// The tournament file.
    pub tourney_file: Option<String>,
    /// The participants, one per line.
    pub participants: Option<String>,
    /// The engine last picked from a list.
    pub engine_choice: Option<String>,
    /// A nickname for the engine being loaded.
    pub nickname: Option<String>,
    /// Use the nickname in PGN tags.
    pub use_nickname: bool,
    /// Where the engine being loaded lives.
    pub engine_dir: Option<String>,
    /// How the engine being loaded is started.
    pub engine_command: Option<String>,
    /// Whether the engine being loaded speaks UCI.
    pub uci: bool,
    /// Whether it speaks version 1 of its protocol.
    pub protocol_v1: bool,
    /// Whether it may not use the front end's book.
    pub no_book: bool,
    /// Whether to add it to the engine list.
    pub add_to_list: bool,
    /// Whether to force the current variant on it.
    pub store_variant: bool,
    /// Which engine it replaces, as shown in a combo box.
    pub load_as: Option<String>,
    /// The comment being edited.
    pub comment_text: Option<String>,
    /// The ply the comment being edited follows.
    pub comment_index: usize,
    /// The tags being edited, one per line.
    pub tags_text: Option<String>,
    /// Pondering when the dialog opened.
    pub old_ponder: bool,
    /// Coordinates shown when the dialog opened.
    pub old_show_coords: bool,
    /// Blindfold when the dialog opened.
    pub old_blindfold: bool,
    /// Cores when the dialog opened.
    pub old_cores: i32,
}

/// Everything a local dialog can reach.
pub struct Session {
    /// The persistent settings.
    pub settings: Settings,
    /// Values of the open dialog.
    pub scratch: Scratch,
    /// What the dialogs asked for since the last drain.
    events: Vec<Event>,
    /// Options whose controls must be updated from their backing cells.
    refreshes: Vec<usize>,
    /// For random start positions.
    rand_gen: Rand64,
}

impl Session {
    /// Creates a session with a random seed.
    pub fn new(settings: Settings) -> Self {
        let mut seed = [0_u8; 16];
        if let Err(error) = getrandom(&mut seed) {
            // a fixed seed only makes shuffle games predictable
            warn!(%error, "no system randomness; using a fixed seed");
        }
        Self::with_seed(settings, u128::from_le_bytes(seed))
    }

    /// Creates a session whose random numbers depend only on `seed`.
    pub fn with_seed(settings: Settings, seed: u128) -> Self {
        Self {
            settings,
            scratch: Scratch::default(),
            events: Vec::new(),
            refreshes: Vec::new(),
            rand_gen: Rand64::new(seed),
        }
    }

    /// Queues `event`.
    pub fn push(&mut self, event: Event) {
        debug!(?event, "queued event");
        self.events.push(event);
    }

    /// Whether nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    /// Asks for the control of option `index` to be updated from its backing
    /// cell once the current callback returns.
    pub fn refresh(&mut self, index: usize) {
        self.refreshes.push(index);
    }

    /// Removes and returns every requested refresh.
    pub fn take_refreshes(&mut self) -> Vec<usize> {
        mem::take(&mut self.refreshes)
    }

    /// A random number in `[0, 2^30)`.
    pub fn random_position(&mut self) -> i32 {
        self.rand_gen.rand_range(0..1 << 30) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, Session};
    use crate::settings::Settings;

    #[test]
    fn events_drain_in_order() {
        let mut session = Session::with_seed(Settings::default(), 1);
        assert!(session.is_idle(), "nothing queued yet");
        session.push(Event::Redraw);
        session.push(Event::Ponder(true));
        assert_eq!(
            session.drain_events(),
            [Event::Redraw, Event::Ponder(true)],
            "oldest first"
        );
        assert!(session.is_idle(), "draining empties the queue");

        session.refresh(3);
        assert_eq!(session.take_refreshes(), [3], "refresh requested");
        assert!(session.take_refreshes().is_empty(), "taken once");
    }

    #[test]
    fn events_describe_themselves() {
        assert_eq!(Event::Cores(4).to_string(), "cores 4", "cores");
        assert_eq!(
            Event::Substitute {
                participants: String::from("Crab\n\nFairy-Max\n"),
                replace: false
            }
            .to_string(),
            "upgrade participants (2 engines)",
            "blank lines aren't engines"
        );
        assert_eq!(
            Event::ReplaceComment {
                index: 3,
                text: String::new()
            }
            .to_string(),
            "remove comment on ply 3",
            "empty comments are removed"
        );
    }

    #[test]
    fn random_positions_are_in_range() {
        let mut first = Session::with_seed(Settings::default(), 42);
        let mut second = Session::with_seed(Settings::default(), 42);
        for _ in 0..100 {
            let position = first.random_position();
            assert!((0..1 << 30).contains(&position), "{position} out of range");
            assert_eq!(position, second.random_position(), "same seed, same numbers");
        }
    }
}
