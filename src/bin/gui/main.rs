//! The graphical front end.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use eframe::{
    egui::{Vec2, ViewportBuilder},
    run_native, Error, NativeOptions,
};
use frontend::{
    engine::EngineOptions,
    logging::{self, LogArgs},
    settings::Settings,
};
use gui::Gui;
use tracing::warn;

/// Defines what happens each frame.
mod gui;

/// The command line of the `gui` front end.
#[derive(Parser)]
#[command(version, about = "A front end for chess engines")]
struct Args {
    /// The settings file
    #[arg(long, default_value = "hermit.toml")]
    settings: PathBuf,

    /// A file of `feature option="..."` lines announcing the engine's options
    #[arg(long)]
    features: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init(&args.log.filter_spec());

    let settings = Settings::load_or_default(&args.settings).unwrap_or_else(|error| {
        warn!(%error, "using default settings");
        Settings::default()
    });
    let engine_options = args
        .features
        .as_deref()
        .map_or_else(|| EngineOptions::new("engine"), read_features);

    let title = "Hermit";
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(Vec2::new(1280.0, 800.0)),
        ..Default::default()
    };

    run_native(
        title,
        options,
        Box::new(move |cc| Box::new(Gui::new(cc, args.settings, settings, engine_options))),
    )
}

/// Reads the options an engine announced from the `feature` lines in
/// `path`. Lines that can't be parsed are skipped.
fn read_features(path: &Path) -> EngineOptions {
    let name = path
        .file_stem()
        .map_or_else(|| String::from("engine"), |stem| stem.to_string_lossy().into_owned());
    let mut options = EngineOptions::new(&name);

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(%error, path = %path.display(), "could not read engine features");
            return options;
        }
    };
    for line in contents.lines().filter(|line| line.starts_with("feature ")) {
        if let Err(error) = options.add_feature_line(line) {
            warn!(%error, line, "skipping bad feature line");
        }
    }
    options
}
