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

use crate::{
    error::DialogError,
    option::{Choices, Descriptor, GroupId, OptionTable},
    session::{Event, Session},
    settings::Sound,
    widget::Widgets,
};

/// What the user can pick.
const SOUND_NAMES: [&str; 13] = [
    "No Sound",
    "Default Beep",
    "Above WAV File",
    "Car Horn",
    "Cymbal",
    "Ding",
    "Gong",
    "Laser",
    "Penalty",
    "Phone",
    "Pop",
    "Slap",
    "Wood Thunk",
];
/// The file each of [`SOUND_NAMES`] plays.
const SOUND_FILES: [&str; 13] = [
    "",
    DEFAULT_BEEP,
    USER_FILE,
    "honkhonk.wav",
    "cymbal.wav",
    "ding1.wav",
    "gong.wav",
    "laser.wav",
    "penalty.wav",
    "phone.wav",
    "pop2.wav",
    "slap.wav",
    "woodthunk.wav",
];
/// Stands for the system beep.
const DEFAULT_BEEP: &str = "$";
/// Stands for whatever the user file is when the sound is played.
const USER_FILE: &str = "*";

/// The try-out controls: the user file, the try-out combo and Play.
const TRY_OUT: GroupId = GroupId(1);

/// Candidates of every sound combo box.
fn sounds() -> Choices {
    Choices::new(SOUND_NAMES).with_values(SOUND_FILES)
}

/// Builds the table.
pub fn table() -> Result<OptionTable<Session>, DialogError> {
    OptionTable::new(vec![
        Descriptor::text_box("Sound Program:", |s: &mut Session| {
            &mut s.settings.sound.program
        }),
        Descriptor::path_name("Sounds Directory:", |s: &mut Session| {
            &mut s.settings.sound.directory
        }),
        Descriptor::file_name("User WAV File:", ".wav", |s: &mut Session| {
            &mut s.settings.sound.user_file
        })
        .in_group(TRY_OUT),
        Descriptor::combo_box("Try-Out Sound:", sounds(), |s: &mut Session| {
            &mut s.scratch.trial_sound
        })
        .in_group(TRY_OUT),
        Descriptor::button("Play", play).in_group(TRY_OUT),
        Descriptor::combo_box("Move:", sounds(), |s: &mut Session| &mut s.settings.sound.on_move),
        Descriptor::combo_box("Win:", sounds(), |s: &mut Session| &mut s.settings.sound.on_win),
        Descriptor::combo_box("Lose:", sounds(), |s: &mut Session| &mut s.settings.sound.on_loss),
        Descriptor::combo_box("Draw:", sounds(), |s: &mut Session| &mut s.settings.sound.on_draw),
        Descriptor::combo_box("Unfinished:", sounds(), |s: &mut Session| {
            &mut s.settings.sound.on_unfinished
        }),
        Descriptor::combo_box("Alarm:", sounds(), |s: &mut Session| {
            &mut s.settings.sound.on_alarm
        }),
        Descriptor::combo_box("Tell:", sounds(), |s: &mut Session| &mut s.settings.sound.on_tell),
        Descriptor::combo_box("Challenge:", sounds(), |s: &mut Session| {
            &mut s.settings.sound.on_challenge
        }),
        Descriptor::end(),
    ])
}

/// Plays the try-out sound.
fn play(session: &mut Session, _: &mut dyn Widgets, _: usize) {
    let sound = session.scratch.trial_sound.as_deref().unwrap_or("");
    if let Some(file) = resolve_sound(sound, &session.settings.sound) {
        session.push(Event::PlaySound(file));
    }
}

/// The file a stored sound plays, or [`None`] for silence.
///
/// The user file stands in for [`USER_FILE`]; files without a directory are
/// looked up in the sounds directory.
pub fn resolve_sound(sound: &str, settings: &Sound) -> Option<String> {
    let file = match sound {
        "" => return None,
        DEFAULT_BEEP => return Some(String::from(DEFAULT_BEEP)),
        USER_FILE => settings.user_file.as_deref().filter(|file| !file.is_empty())?,
        file => file,
    };

    let file = settings
        .directory
        .as_deref()
        .filter(|directory| !directory.is_empty() && !file.contains('/'))
        .map_or_else(
            || String::from(file),
            |directory| format!("{}/{file}", directory.trim_end_matches('/')),
        );
    Some(file)
}
