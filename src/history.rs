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

//! The rows of the move history window.

/// Shown for a ply that has no move, such as White's first ply of a game
/// that starts with Black to move.
pub const NO_MOVE: &str = " ... ";

/// A column of the move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The moves of White, and the move numbers.
    White,
    /// The moves of Black.
    Black,
}

/// One full move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryRow {
    /// The move number, starting at 1.
    pub number: usize,
    /// White's move.
    pub white: String,
    /// Black's move. Empty if White moved last.
    pub black: String,
}

/// The cell of the history that shows the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    /// The row, starting at 0.
    pub row: usize,
    /// The column.
    pub side: Side,
}

/// Strips the annotation a move may carry after its first space.
fn short_move(ply: &str) -> &str {
    if ply.is_empty() {
        NO_MOVE
    } else {
        ply.split(' ').next().unwrap_or(ply)
    }
}

/// Pairs the first `last` plies of `moves` into numbered rows.
pub fn history_rows<S: AsRef<str>>(moves: &[S], last: usize) -> Vec<HistoryRow> {
    moves
        .iter()
        .take(last)
        .map(|ply| short_move(ply.as_ref()))
        .collect::<Vec<_>>()
        .chunks(2)
        .enumerate()
        .map(|(row, plies)| HistoryRow {
            number: row + 1,
            white: plies.first().map_or_else(String::new, |ply| String::from(*ply)),
            black: plies.get(1).map_or_else(String::new, |ply| String::from(*ply)),
        })
        .collect()
}

/// The cell to highlight when the position after ply `current` is shown.
/// Ply 0 is White's first move.
pub const fn highlight(current: Option<usize>) -> Option<Highlight> {
    let Some(current) = current else {
        return None;
    };
    let side = if current % 2 == 0 {
        Side::White
    } else {
        Side::Black
    };
    Some(Highlight {
        row: current / 2,
        side,
    })
}

/// The title of the comment after the first `plies` plies of `moves`, such
/// as `Comment on 1... e5`.
pub fn comment_title<S: AsRef<str>>(moves: &[S], plies: usize) -> String {
    let Some(ply) = plies.checked_sub(1).and_then(|last| moves.get(last)) else {
        return String::from("Comment");
    };
    let dots = if plies % 2 == 1 { "." } else { "..." };
    format!(
        "Comment on {}{dots} {}",
        plies.div_ceil(2),
        short_move(ply.as_ref())
    )
}

/// The number of plies to show after a click on the cell at `row` and
/// `side`.
pub const fn ply_for_click(row: usize, side: Side) -> usize {
    match side {
        Side::White => 2 * row + 1,
        Side::Black => 2 * row + 2,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        comment_title, highlight, history_rows, ply_for_click, Highlight, HistoryRow, Side,
        NO_MOVE,
    };

    #[test]
    fn plies_are_paired() {
        let moves = ["e4 {book}", "e5", "Nf3 +0.25/12", "Nc6"];
        let rows = history_rows(&moves, 4);
        assert_eq!(
            rows,
            [
                HistoryRow {
                    number: 1,
                    white: String::from("e4"),
                    black: String::from("e5"),
                },
                HistoryRow {
                    number: 2,
                    white: String::from("Nf3"),
                    black: String::from("Nc6"),
                },
            ],
            "annotations are dropped"
        );
    }

    #[test]
    fn odd_plies_get_their_own_row() {
        let moves = ["", "e5", "Nf3", "Nc6", "Bb5"];
        let rows = history_rows(&moves, 3);
        assert_eq!(rows.len(), 2, "the trailing move has its own row");
        assert_eq!(rows[0].white, NO_MOVE, "missing plies are dotted");
        assert_eq!(rows[1].white, "Nf3", "white's move");
        assert_eq!(rows[1].black, "", "black hasn't moved");
    }

    #[test]
    fn no_plies_no_rows() {
        assert!(history_rows::<&str>(&[], 0).is_empty(), "empty game");
        assert!(history_rows(&["e4"], 0).is_empty(), "nothing shown yet");
    }

    #[test]
    fn clicks_and_highlights_agree() {
        assert_eq!(highlight(None), None, "start position");
        assert_eq!(
            highlight(Some(3)),
            Some(Highlight {
                row: 1,
                side: Side::Black
            }),
            "black's second move"
        );
        assert_eq!(ply_for_click(0, Side::White), 1, "after white's first move");
        assert_eq!(ply_for_click(1, Side::Black), 4, "after black's second move");
    }

    #[test]
    fn comments_are_titled_by_move() {
        let moves = ["e4 {book}", "e5", "Nf3"];
        assert_eq!(comment_title(&moves, 0), "Comment", "before the first move");
        assert_eq!(comment_title(&moves, 1), "Comment on 1. e4", "white's move");
        assert_eq!(comment_title(&moves, 2), "Comment on 1... e5", "black's move");
        assert_eq!(comment_title(&moves, 3), "Comment on 2. Nf3", "second move");
        assert_eq!(comment_title(&moves, 9), "Comment", "past the end");
    }
}
