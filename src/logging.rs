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

//! Installing the `tracing` subscriber the front ends log through.

use std::{env, io};

use clap::Args;
use tracing_subscriber::EnvFilter;

/// The level used when nothing else is asked for.
const DEFAULT_LEVEL: &str = "info";

/// Logging flags shared by every front end.
#[derive(Clone, Debug, Default, Args)]
pub struct LogArgs {
    /// Log debug messages from this crate
    #[arg(long, conflicts_with = "log_filter")]
    pub debug: bool,

    /// An explicit tracing filter directive, e.g. "frontend::dialog=trace"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// The filter directive these flags ask for, falling back to `RUST_LOG`
    /// and then to `info`.
    pub fn filter_spec(&self) -> String {
        compute_spec(
            self.log_filter.as_deref(),
            self.debug,
            env::var("RUST_LOG").ok().as_deref(),
        )
    }
}

/// Picks the filter directive: an explicit one, then `debug`, then
/// `rust_log`, then [`DEFAULT_LEVEL`].
fn compute_spec(log_filter: Option<&str>, debug: bool, rust_log: Option<&str>) -> String {
    if let Some(spec) = log_filter {
        return String::from(spec);
    }
    if debug {
        return format!("{DEFAULT_LEVEL},frontend=debug");
    }
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .map_or_else(|| String::from(DEFAULT_LEVEL), String::from)
}

/// Installs a formatting subscriber that writes to stderr, filtered by
/// `spec`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(spec: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(spec))
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::compute_spec;

    #[test]
    fn explicit_filters_win() {
        assert_eq!(
            compute_spec(Some("frontend::dialog=trace"), true, Some("warn")),
            "frontend::dialog=trace",
            "explicit directive beats everything"
        );
        assert_eq!(
            compute_spec(None, true, Some("warn")),
            "info,frontend=debug",
            "debug beats the environment"
        );
    }

    #[test]
    fn environment_then_default() {
        assert_eq!(compute_spec(None, false, Some("warn")), "warn", "RUST_LOG");
        assert_eq!(compute_spec(None, false, Some("  ")), "info", "blank RUST_LOG");
        assert_eq!(compute_spec(None, false, None), "info", "nothing set");
    }

    #[test]
    fn init_only_once() {
        super::init("warn");
        assert!(!super::init("warn"), "a second subscriber is refused");
    }
}
