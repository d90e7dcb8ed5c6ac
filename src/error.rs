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

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::option::OptionKind;

/// An error that occurs when a string cannot be parsed.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token was outside an expected range.
    #[error("token out of range")]
    ErroneousToken,
    /// Expected a token but found nothing.
    #[error("expected a token")]
    ExpectedToken,
    /// Expected a different token.
    #[error("unexpected token")]
    InvalidToken,
}

/// A dialog table that can never be shown correctly.
///
/// These are programming errors in a table definition, so they are caught
/// when the table is built rather than while the dialog is up.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    /// The table has no [`EndMark`](OptionKind::EndMark).
    #[error("dialog table has no end mark")]
    MissingEndMark,
    /// There is an [`EndMark`](OptionKind::EndMark) before the last entry.
    #[error("dialog table has an end mark at {index} that is not the last entry")]
    EarlyEndMark {
        /// Where the stray end mark is.
        index: usize,
    },
    /// A combo box was given nothing to choose from.
    #[error("combo box {index} has no choices")]
    EmptyChoices {
        /// The offending combo box.
        index: usize,
    },
    /// A combo box has a different number of values than labels.
    #[error("combo box {index} has {labels} labels but {values} values")]
    ChoiceLengthMismatch {
        /// The offending combo box.
        index: usize,
        /// How many display labels there are.
        labels: usize,
        /// How many underlying values there are.
        values: usize,
    },
    /// The target of an option cannot back a control of its kind.
    #[error("option {index} is a {kind} but its target cannot back it")]
    TargetMismatch {
        /// The offending option.
        index: usize,
        /// The kind of the offending option.
        kind: OptionKind,
    },
}

/// An error while loading or saving the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("could not access {path}: {source}")]
    Io {
        /// The settings file.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },
    /// The file is not valid TOML or doesn't describe settings.
    #[error("could not parse {path}: {source}")]
    Parse {
        /// The settings file.
        path: PathBuf,
        /// What went wrong.
        source: toml::de::Error,
    },
    /// The settings could not be turned into TOML.
    #[error("could not serialise settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
