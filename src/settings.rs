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

//! The persistent state of the front end, stored as TOML.
//!
//! Every field has a default, so a settings file only needs to mention what
//! differs from it.

use std::{
    fmt::{self, Display, Formatter},
    fs,
    io::ErrorKind,
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Everything the dialogs can change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Every engine the user has installed.
    pub engines: Vec<EngineEntry>,
    /// Board and move behaviour.
    pub general: General,
    /// Loading games.
    pub load: LoadGame,
    /// Saving games.
    pub save: SaveGame,
    /// Sound effects.
    pub sound: Sound,
    /// Settings shared by every engine.
    pub engine: CommonEngine,
    /// The clock.
    pub time: TimeControl,
    /// Matches and tournaments.
    pub tourney: Tourney,
    /// The variant being played and its board.
    pub variant: Variant,
}

/// The General Options dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct General {
    /// Scores are from white's point of view.
    pub absolute_scores: bool,
    /// Promote to a queen unless the piece is swept past.
    pub always_queen: bool,
    /// Animate dragged pieces.
    pub animate_dragging: bool,
    /// Animate moves.
    pub animate: bool,
    /// Claim a win when the opponent's flag falls.
    pub auto_flag: bool,
    /// Flip the board to the side of the human.
    pub auto_flip_view: bool,
    /// Hide the pieces.
    pub blindfold: bool,
    /// Hide engine thinking from the human.
    pub hide_thinking: bool,
    /// Highlight the squares of the last move.
    pub highlight_last_move: bool,
    /// Highlight the last move with an arrow.
    pub highlight_with_arrow: bool,
    /// Play a sound after every move.
    pub move_sound: bool,
    /// Move a piece as soon as only one move fits the click.
    pub one_click: bool,
    /// Show errors in a pop up.
    pub popup_move_errors: bool,
    /// Show evaluations in the move history.
    pub scores_in_move_list: bool,
    /// Draw coordinates around the board.
    pub show_coords: bool,
    /// Keep docked windows docked when the main window moves.
    pub sticky_windows: bool,
    /// Refuse illegal moves.
    pub test_legality: bool,
    /// How often a moved piece flashes.
    pub flash_count: i32,
    /// How fast it flashes.
    pub flash_rate: i32,
    /// Milliseconds per animation frame.
    pub anim_speed: i32,
    /// Zoom of the evaluation graph.
    pub zoom: i32,
}

impl Default for General {
    fn default() -> Self {
        Self {
            absolute_scores: false,
            always_queen: false,
            animate_dragging: true,
            animate: true,
            auto_flag: false,
            auto_flip_view: true,
            blindfold: false,
            hide_thinking: false,
            highlight_last_move: true,
            highlight_with_arrow: false,
            move_sound: false,
            one_click: false,
            popup_move_errors: false,
            scores_in_move_list: false,
            show_coords: false,
            sticky_windows: true,
            test_legality: true,
            flash_count: 0,
            flash_rate: 5,
            anim_speed: 10,
            zoom: 1,
        }
    }
}

/// The Load Game Options dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadGame {
    /// Show the tags of a loaded game.
    pub auto_display_tags: bool,
    /// Show the comments of a loaded game.
    pub auto_display_comment: bool,
    /// Seconds between moves when auto-playing. `-1` is off.
    pub time_delay: f32,
    /// Options applied in game-viewer mode.
    pub viewer_options: Option<String>,
    /// Minimum Elo of the stronger player.
    pub elo_stronger: i32,
    /// Minimum Elo of the weaker player.
    pub elo_weaker: i32,
    /// No games before this year.
    pub date_threshold: i32,
    /// How many consecutive positions must match.
    pub stretch: i32,
    /// How positions are matched, from 1 to 6.
    pub search_mode: i32,
    /// Also match with colours reversed.
    pub ignore_colours: bool,
    /// Also match mirrored positions.
    pub find_mirror: bool,
}

impl Default for LoadGame {
    fn default() -> Self {
        Self {
            auto_display_tags: true,
            auto_display_comment: true,
            time_delay: 1.0,
            viewer_options: None,
            elo_stronger: 0,
            elo_weaker: 0,
            date_threshold: 0,
            stretch: 1,
            search_mode: 1,
            ignore_colours: false,
            find_mirror: false,
        }
    }
}

/// The Save Game Options dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SaveGame {
    /// Save every finished game.
    pub auto_save: bool,
    /// Where games are saved.
    pub game_file: Option<String>,
    /// Where final positions are saved.
    pub position_file: Option<String>,
    /// The Event tag of saved games.
    pub event_header: Option<String>,
    /// Save in the old format rather than PGN.
    pub old_style: bool,
    /// Include a number tag in tournament games.
    pub number_tag: bool,
    /// Save scores and depths.
    pub extended_info: bool,
    /// Save where the book ended.
    pub out_of_book_info: bool,
}

impl Default for SaveGame {
    fn default() -> Self {
        Self {
            auto_save: false,
            game_file: None,
            position_file: None,
            event_header: Some(String::from("Computer Chess Game")),
            old_style: false,
            number_tag: false,
            extended_info: true,
            out_of_book_info: true,
        }
    }
}

/// The Sound Options dialog. Each event holds the file it plays; an empty
/// string is silence and `$` the default beep.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sound {
    /// The program that plays sound files.
    pub program: Option<String>,
    /// Where sound files are looked up.
    pub directory: Option<String>,
    /// A sound file of the user's choosing.
    pub user_file: Option<String>,
    /// Played after a move.
    pub on_move: Option<String>,
    /// Played after a win.
    pub on_win: Option<String>,
    /// Played after a loss.
    pub on_loss: Option<String>,
    /// Played after a draw.
    pub on_draw: Option<String>,
    /// Played after an unfinished game.
    pub on_unfinished: Option<String>,
    /// Played when the alarm goes off.
    pub on_alarm: Option<String>,
    /// Played on a tell.
    pub on_tell: Option<String>,
    /// Played on a challenge.
    pub on_challenge: Option<String>,
}

/// The Common Engine Options dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonEngine {
    /// Let engines think on the opponent's time.
    pub ponder: bool,
    /// Threads per engine.
    pub cores: i32,
    /// Where polyglot lives.
    pub polyglot_dir: Option<String>,
    /// Hash table size in MiB.
    pub hash_size: i32,
    /// Where endgame tablebases live.
    pub egtb_path: Option<String>,
    /// Tablebase cache size in MiB.
    pub egtb_cache: i32,
    /// Let the front end play book moves.
    pub use_book: bool,
    /// The opening book.
    pub book_file: Option<String>,
    /// Moves played from the book.
    pub book_depth: i32,
    /// 0 is variety, 100 is strength.
    pub book_strength: i32,
    /// The first engine uses its own book.
    pub first_has_own_book: bool,
    /// The second engine uses its own book.
    pub second_has_own_book: bool,
}

impl Default for CommonEngine {
    fn default() -> Self {
        Self {
            ponder: false,
            cores: 1,
            polyglot_dir: None,
            hash_size: 64,
            egtb_path: None,
            egtb_cache: 4,
            use_book: false,
            book_file: None,
            book_depth: 12,
            book_strength: 50,
            first_has_own_book: true,
            second_has_own_book: true,
        }
    }
}

/// The clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    /// Moves per session of a classical control.
    pub moves_per_session: i32,
    /// Time per session, as `minutes` or `minutes:seconds`.
    pub time_control: Option<String>,
    /// Seconds added per move. Negative for a classical control.
    pub increment: i32,
    /// Seconds per move of a fixed control. 0 when not fixed.
    pub search_time: i32,
    /// Time odds of the first engine.
    pub first_odds: i32,
    /// Time odds of the second engine or the human.
    pub second_odds: i32,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self {
            moves_per_session: 40,
            time_control: Some(String::from("5")),
            increment: -1,
            search_time: 0,
            first_odds: 1,
            second_odds: 1,
        }
    }
}

/// The Tourney Options dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tourney {
    /// The tournament file.
    pub file: Option<String>,
    /// One engine per line.
    pub participants: Option<String>,
    /// Wait for every game of a round before starting the next.
    pub round_sync: bool,
    /// Wait for every game of a cycle before starting the next.
    pub cycle_sync: bool,
    /// 0 is round robin, 1 gauntlet, -1 Swiss.
    pub kind: i32,
    /// Cycles, or Swiss rounds.
    pub cycles: i32,
    /// Games per match or pairing.
    pub games: i32,
    /// Milliseconds between games.
    pub pause: i32,
    /// Games with opening lines.
    pub opening_file: Option<String>,
    /// Which game of `opening_file`; -1 or -2 auto-increment.
    pub opening_index: i32,
    /// Start positions.
    pub position_file: Option<String>,
    /// Which position of `position_file`; -1 or -2 auto-increment.
    pub position_index: i32,
    /// Rewind the indices after this many games. 0 is never.
    pub rewind_index: i32,
    /// Engines don't use their own books unless told to.
    pub no_own_books: bool,
}

impl Default for Tourney {
    fn default() -> Self {
        Self {
            file: None,
            participants: None,
            round_sync: false,
            cycle_sync: false,
            kind: 0,
            cycles: 1,
            games: 10,
            pause: 10_000,
            opening_file: None,
            opening_index: 0,
            position_file: None,
            position_index: 0,
            rewind_index: 0,
            no_own_books: false,
        }
    }
}

/// The variant being played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    /// The name of the variant.
    pub name: String,
    /// Ranks of the board. -1 is the default of the variant.
    pub ranks: i32,
    /// Files of the board. -1 is the default of the variant.
    pub files: i32,
    /// Size of the holdings. -1 is the default of the variant.
    pub holdings: i32,
    /// Whether new games start from a shuffled position.
    pub shuffle: bool,
    /// Position number of a shuffle game. -1 is random.
    pub frc_position: i32,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            name: String::from("normal"),
            ranks: -1,
            files: -1,
            holdings: -1,
            shuffle: false,
            frc_position: -1,
        }
    }
}

impl Variant {
    /// The shuffle position new games start from: `None` if they aren't
    /// shuffled, -1 if the position is random.
    pub fn shuffle_position(&self) -> Option<i32> {
        self.shuffle.then_some(self.frc_position)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.shuffle_position() {
            None => Ok(()),
            Some(-1) => f.write_str(", random shuffle"),
            Some(position) => write!(f, ", shuffle position {position}"),
        }
    }
}

/// An installed engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineEntry {
    /// What the engine is shown as.
    pub name: String,
    /// How the engine is started.
    pub command: String,
    /// Where the engine is started. Derived from `command` if absent.
    pub directory: Option<String>,
    /// Whether the engine speaks UCI.
    pub uci: bool,
}

impl Settings {
    /// Reads settings from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or isn't valid settings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Reads settings from `path`, or returns the defaults if it doesn't
    /// exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or isn't valid settings.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no settings file; using defaults");
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Writes the settings to `path`.
    ///
    /// # Errors
    ///
    /// Fails if the settings cannot be serialised or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// The settings as a TOML document.
    ///
    /// # Errors
    ///
    /// Fails if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The names of every installed engine.
    pub fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|engine| engine.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::{EngineEntry, Settings, Variant};
    use crate::error::ConfigError;

    #[test]
    fn partial_files_use_defaults() {
        let settings: Settings = toml::from_str(
            "[general]\nblindfold = true\n\n[time]\nmoves_per_session = 60\n",
        )
        .expect("valid settings");
        assert!(settings.general.blindfold, "given value is used");
        assert!(settings.general.test_legality, "missing value is the default");
        assert_eq!(settings.time.moves_per_session, 60, "given value is used");
        assert_eq!(
            settings.time.time_control.as_deref(),
            Some("5"),
            "missing value is the default"
        );
    }

    #[test]
    fn settings_survive_a_file() {
        let mut settings = Settings::default();
        settings.save.game_file = Some(String::from("games.pgn"));
        settings.engine.hash_size = 256;
        settings.engines.push(EngineEntry {
            name: String::from("Crab"),
            command: String::from("crab"),
            directory: None,
            uci: true,
        });

        let path = env::temp_dir().join(format!("hermit-settings-{}.toml", process::id()));
        settings.save(&path).expect("temp dir is writable");
        let loaded = Settings::load(&path).expect("file was just written");
        fs::remove_file(&path).expect("file was just written");

        assert_eq!(loaded, settings, "settings should come back unchanged");
        assert_eq!(loaded.engine_names(), ["Crab"], "engines are kept");
    }

    #[test]
    fn missing_files_are_defaults() {
        let path = env::temp_dir().join("hermit-settings-that-do-not-exist.toml");
        let settings = Settings::load_or_default(&path).expect("missing is fine");
        assert_eq!(settings, Settings::default(), "defaults expected");

        assert!(
            matches!(Settings::load(&path), Err(ConfigError::Io { .. })),
            "plain load must fail"
        );
    }

    #[test]
    fn bad_files_are_reported() {
        let path = env::temp_dir().join(format!("hermit-bad-settings-{}.toml", process::id()));
        fs::write(&path, "[general]\nzoom = \"big\"\n").expect("temp dir is writable");
        let result = Settings::load_or_default(&path);
        fs::remove_file(&path).expect("file was just written");
        assert!(
            matches!(result, Err(ConfigError::Parse { .. })),
            "a wrong type must be an error"
        );
    }

    #[test]
    fn variants_describe_their_start() {
        let mut variant = Variant::default();
        assert_eq!(variant.shuffle_position(), None, "not shuffled by default");
        assert_eq!(variant.to_string(), "normal", "just the name");

        variant.shuffle = true;
        assert_eq!(variant.to_string(), "normal, random shuffle", "random position");
        variant.frc_position = 518;
        assert_eq!(variant.shuffle_position(), Some(518), "fixed position");
        assert_eq!(variant.to_string(), "normal, shuffle position 518", "numbered");
    }
}
