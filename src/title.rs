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

/// What the main window is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connection<'a> {
    /// An internet chess server.
    Ics {
        /// The server's host name.
        host: &'a str,
    },
    /// A correspondence game played by mail.
    CMail,
    /// Nothing; the board is used on its own.
    NoEngine,
    /// A chess engine.
    Engine {
        /// The engine's short name.
        name: &'a str,
    },
}

/// The title of the main window of `program`.
///
/// A non-empty `text` is used as it is. Otherwise the title names what the
/// program is connected to.
pub fn window_title(program: &str, text: Option<&str>, connection: Connection<'_>) -> String {
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        return String::from(text);
    }
    match connection {
        Connection::Ics { host } => format!("{program}: {host}"),
        Connection::CMail => format!("{program}: CMail"),
        Connection::NoEngine => String::from(program),
        Connection::Engine { name } => format!("{program}: {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{window_title, Connection};

    #[test]
    fn explicit_text_wins() {
        assert_eq!(
            window_title("Hermit", Some("Game 3"), Connection::CMail),
            "Game 3",
            "text is used as is"
        );
        assert_eq!(
            window_title("Hermit", Some(""), Connection::NoEngine),
            "Hermit",
            "empty text is ignored"
        );
    }

    #[test]
    fn titles_name_the_connection() {
        assert_eq!(
            window_title("Hermit", None, Connection::Ics { host: "chessclub.com" }),
            "Hermit: chessclub.com",
            "server"
        );
        assert_eq!(
            window_title("Hermit", None, Connection::CMail),
            "Hermit: CMail",
            "mail"
        );
        assert_eq!(
            window_title("Hermit", None, Connection::Engine { name: "Crab" }),
            "Hermit: Crab",
            "engine"
        );
    }
}
