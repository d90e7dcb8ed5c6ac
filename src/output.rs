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

//! What the engine output window shows for each of the two engines.

use std::fmt::{self, Display, Formatter};

use tracing::warn;

use crate::{error::ParseError, history::Side};

/// Scores at least this far from 0 are mates.
const MATE: i32 = 100_000;

/// What an engine is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting.
    #[default]
    Idle,
    /// Searching on its own time.
    Thinking,
    /// Searching on the opponent's time.
    Pondering,
    /// Searching without a clock.
    Analyzing,
}

/// The icons next to an engine's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    /// Nothing.
    Clear,
    /// The engine plays White.
    White,
    /// The engine plays Black.
    Black,
    /// The engine's colour isn't known.
    Unknown,
    /// [`EngineState::Thinking`].
    Thinking,
    /// [`EngineState::Pondering`].
    Pondering,
    /// [`EngineState::Analyzing`].
    Analyzing,
}

/// One line of thinking output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOutputData {
    /// Which pane: 0 for the first engine, 1 for the second.
    pub which: usize,
    /// Search depth in plies.
    pub depth: u32,
    /// Nodes searched.
    pub nodes: u64,
    /// Score in centipawns from the engine's point of view.
    pub score: i32,
    /// Time spent in centiseconds.
    pub time: u64,
    /// The principal variation.
    pub pv: String,
    /// The move being searched, while analyzing.
    pub hint: String,
    /// Which root move is being searched, while analyzing.
    pub move_index: u32,
    /// How many root moves there are, while analyzing.
    pub move_count: u32,
}

/// A score the way the memo shows it.
struct Score(i32);

/// A time the way the memo shows it.
struct Time(u64);

/// A node count the way the memo shows it.
struct Nodes(u64);

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let score = self.0;
        if score >= MATE {
            write!(f, "+#{}", score - MATE)
        } else if score <= -MATE {
            write!(f, "-#{}", -score - MATE)
        } else if score > 0 {
            write!(f, "+{:.2}", f64::from(score) / 100.0)
        } else {
            write!(f, "{:.2}", f64::from(score) / 100.0)
        }
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let seconds = self.0 / 100;
        let minutes = seconds / 60;
        if minutes >= 60 {
            write!(f, "{}:{:02}:{:02}", minutes / 60, minutes % 60, seconds % 60)
        } else {
            write!(f, "{}:{:02}", minutes, seconds % 60)
        }
    }
}

impl Display for Nodes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let nodes = self.0;
        if nodes < 1_000_000 {
            write!(f, "{nodes}")
        } else if nodes < 1_000_000_000 {
            write!(f, "{:.1}M", nodes as f64 / 1_000_000.0)
        } else {
            write!(f, "{:.1}G", nodes as f64 / 1_000_000_000.0)
        }
    }
}

impl EngineState {
    /// The icon shown for this state.
    pub const fn icon(self) -> Icon {
        match self {
            Self::Idle => Icon::Clear,
            Self::Thinking => Icon::Thinking,
            Self::Pondering => Icon::Pondering,
            Self::Analyzing => Icon::Analyzing,
        }
    }
}

impl EngineOutputData {
    /// Parses a line of thinking output of engine `which`: depth, score in
    /// centipawns, time in centiseconds, nodes, then the principal variation.
    ///
    /// # Errors
    ///
    /// Fails if one of the four numbers is missing or isn't a number.
    pub fn parse_thinking(which: usize, line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let mut next = || tokens.next().ok_or(ParseError::ExpectedToken);

        // some engines mark a fail high or low after the depth
        let depth = next()?
            .trim_end_matches(['.', '&', '!', '?'])
            .parse()
            .ok()
            .ok_or(ParseError::InvalidToken)?;
        let score = next()?.parse().ok().ok_or(ParseError::InvalidToken)?;
        let time = next()?.parse().ok().ok_or(ParseError::InvalidToken)?;
        let nodes = next()?.parse().ok().ok_or(ParseError::InvalidToken)?;
        let pv = tokens.collect::<Vec<_>>().join(" ");

        Ok(Self {
            which,
            depth,
            nodes,
            score,
            time,
            pv,
            ..Self::default()
        })
    }

    /// The memo line: depth, score, time, nodes and principal variation,
    /// separated by tabs.
    pub fn memo_line(&self) -> String {
        let depth = if self.depth > 0 {
            self.depth.to_string()
        } else {
            String::new()
        };
        format!(
            "{depth:>3}\t{:>8}\t{:>5}\t{:>8}\t{}\n",
            Score(self.score).to_string(),
            Time(self.time).to_string(),
            Nodes(self.nodes).to_string(),
            self.pv
        )
    }

    /// The nodes-per-second label, if the engine has reported both time and
    /// nodes.
    pub fn nps_label(&self) -> Option<String> {
        if self.time == 0 || self.nodes == 0 {
            return None;
        }
        let nps_100 = self.nodes / self.time;
        Some(if nps_100 < 100_000 {
            format!("NPS: {}", nps_100 * 100)
        } else {
            format!("NPS: {:.1}k", nps_100 as f64 / 10.0)
        })
    }

    /// The label next to the state icon: the root move being analyzed, if
    /// known.
    pub fn state_label(&self) -> String {
        if self.move_count > 0 {
            format!("[{}/{}] {}", self.move_index, self.move_count, self.hint)
        } else {
            String::new()
        }
    }
}

/// The icon for an engine playing `side`.
pub const fn colour_icon(side: Option<Side>) -> Icon {
    match side {
        Some(Side::White) => Icon::White,
        Some(Side::Black) => Icon::Black,
        None => Icon::Unknown,
    }
}

/// Everything one engine's pane shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pane {
    /// The engine's name.
    pub name: String,
    /// The colour icon.
    pub colour: Icon,
    /// What the engine is doing.
    pub state: EngineState,
    /// The label next to the state icon.
    pub state_label: String,
    /// The nodes-per-second label.
    pub nps: String,
    /// The memo, newest line first.
    pub memo: Vec<String>,
}

impl Default for Pane {
    fn default() -> Self {
        Self {
            name: String::new(),
            colour: Icon::Unknown,
            state: EngineState::Idle,
            state_label: String::new(),
            nps: String::from("NPS"),
            memo: Vec::new(),
        }
    }
}

/// The two panes of the engine output window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// The first engine's pane, then the second's.
    panes: [Pane; 2],
}

impl EngineOutput {
    /// Returns pane `which`, if it exists.
    pub fn pane(&self, which: usize) -> Option<&Pane> {
        self.panes.get(which)
    }

    /// Names the engine of pane `which`.
    pub fn set_name(&mut self, which: usize, name: &str) {
        if let Some(pane) = self.panes.get_mut(which) {
            pane.name.clear();
            pane.name.push_str(name);
        }
    }

    /// Sets what engine `which` is doing and which side it plays.
    pub fn set_state(&mut self, which: usize, state: EngineState, side: Option<Side>) {
        if let Some(pane) = self.panes.get_mut(which) {
            pane.state = state;
            pane.colour = colour_icon(side);
            if state == EngineState::Idle {
                pane.state_label.clear();
            }
        }
    }

    /// Shows a line of thinking output in its pane.
    pub fn update(&mut self, data: &EngineOutputData) {
        let Some(pane) = self.panes.get_mut(data.which) else {
            warn!(which = data.which, "thinking output for a missing pane");
            return;
        };
        if let Some(nps) = data.nps_label() {
            pane.nps = nps;
        }
        pane.state_label = data.state_label();
        if !data.pv.is_empty() {
            pane.memo.insert(0, data.memo_line());
        }
    }

    /// Empties the memo of pane `which`.
    pub fn clear_memo(&mut self, which: usize) {
        if let Some(pane) = self.panes.get_mut(which) {
            pane.memo.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{colour_icon, EngineOutput, EngineOutputData, EngineState, Icon};
    use crate::{error::ParseError, history::Side};

    /// A line from the second engine.
    fn data() -> EngineOutputData {
        EngineOutputData {
            which: 1,
            depth: 12,
            nodes: 2_500_000,
            score: 35,
            time: 6_150,
            pv: String::from("e4 e5 Nf3"),
            ..EngineOutputData::default()
        }
    }

    #[test]
    fn memo_lines_are_formatted() {
        assert_eq!(
            data().memo_line(),
            " 12\t   +0.35\t 1:01\t    2.5M\te4 e5 Nf3\n",
            "every column is padded"
        );

        let mated = EngineOutputData {
            depth: 0,
            score: -100_003,
            time: 0,
            nodes: 999,
            ..data()
        };
        assert_eq!(
            mated.memo_line(),
            "   \t     -#3\t 0:00\t     999\te4 e5 Nf3\n",
            "mates and missing depths"
        );
    }

    #[test]
    fn thinking_output_is_parsed() {
        assert_eq!(
            EngineOutputData::parse_thinking(1, "12 35 6150 2500000 e4 e5  Nf3"),
            Ok(data()),
            "every field is read"
        );
        assert_eq!(
            EngineOutputData::parse_thinking(0, "9& -20 100 5000").map(|data| data.depth),
            Ok(9),
            "fail marks are ignored"
        );
        assert_eq!(
            EngineOutputData::parse_thinking(0, "12 35 6150"),
            Err(ParseError::ExpectedToken),
            "nodes are missing"
        );
        assert_eq!(
            EngineOutputData::parse_thinking(0, "move e2e4"),
            Err(ParseError::InvalidToken),
            "not thinking output"
        );
    }

    #[test]
    fn nps_needs_time_and_nodes() {
        assert_eq!(
            data().nps_label().as_deref(),
            Some("NPS: 40600"),
            "2.5M nodes in 61.5s"
        );
        let instant = EngineOutputData { time: 0, ..data() };
        assert_eq!(instant.nps_label(), None, "no time, no label");
    }

    #[test]
    fn panes_collect_output() {
        let mut output = EngineOutput::default();
        output.set_name(1, "Fairy-Max");
        output.set_state(1, EngineState::Thinking, Some(Side::Black));
        output.update(&data());
        output.update(&EngineOutputData {
            depth: 13,
            ..data()
        });

        let pane = output.pane(1).expect("two panes");
        assert_eq!(pane.name, "Fairy-Max", "named");
        assert_eq!(pane.colour, Icon::Black, "plays black");
        assert_eq!(pane.state.icon(), Icon::Thinking, "thinking");
        assert_eq!(pane.memo.len(), 2, "two lines");
        assert!(pane.memo[0].starts_with(" 13"), "newest first");
        assert_eq!(
            output.pane(0).map(|pane| pane.memo.len()),
            Some(0),
            "the first pane is untouched"
        );

        output.clear_memo(1);
        assert!(
            output.pane(1).is_some_and(|pane| pane.memo.is_empty()),
            "memo cleared"
        );
        assert_eq!(colour_icon(None), Icon::Unknown, "unknown colour");
    }
}
