//! Source and sound-mode vocabularies
//!
//! The receiver speaks short tokens; people pick names. These tables are the
//! whole translation layer, kept as closed constants — the vocabulary is
//! small and fixed per firmware generation, so there is nothing to gain
//! from dynamic dispatch.
//!
//! The two source tables are not inverses: several device tokens collapse to
//! one display name, but selecting that name always sends the single
//! preferred token.

use std::collections::BTreeSet;

/// Device source token → display name (many-to-one)
pub const SOURCE_DISPLAY: &[(&str, &str)] = &[
    ("bd", "BD/DVD"),
    ("dvd", "BD/DVD"),
    ("sat", "SAT/CATV"),
    ("catv", "SAT/CATV"),
    ("stb", "STB"),
    ("fm", "FM"),
    ("am", "AM"),
    ("tuner", "TUNER"),
    ("aux", "AUX"),
    ("tv", "TV"),
    ("game", "GAME"),
    ("video", "VIDEO"),
    ("cd", "CD/SACD"),
    ("sacd", "CD/SACD"),
];

/// Display name → preferred device token to send (one-to-one)
pub const SOURCE_COMMANDS: &[(&str, &str)] = &[
    ("BD/DVD", "bd"),
    ("SAT/CATV", "sat"),
    ("STB", "stb"),
    ("FM", "fm"),
    ("AM", "am"),
    ("TUNER", "tuner"),
    ("AUX", "aux"),
    ("TV", "tv"),
    ("GAME", "game"),
    ("VIDEO", "video"),
    ("CD/SACD", "cd"),
];

/// Sound-mode display name → device token
///
/// Used bidirectionally; the display direction scans by value.
pub const SOUND_MODES: &[(&str, &str)] = &[
    ("2ch Stereo", "2ch"),
    ("Analog Direct", "direct"),
    ("Auto Format Decode", "afd"),
    ("Multi-Channel Stereo", "multi"),
    ("Dolby Surround", "dolby"),
    ("DTS Neural:X", "neuralx"),
];

/// Synthetic source name meaning "follow the main zone's input"
///
/// Offered on secondary zones only; never sent to the device.
pub const FOLLOW_MAIN: &str = "MAIN SOURCE";

/// Device token a secondary zone reports while following the main zone
pub const MAIN_SOURCE_TOKEN: &str = "source";

/// Display name for a device source token
pub fn display_source(token: &str) -> Option<&'static str> {
    SOURCE_DISPLAY
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, name)| *name)
}

/// Preferred device token for a display name
pub fn source_command(name: &str) -> Option<&'static str> {
    SOURCE_COMMANDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, token)| *token)
}

/// Device token for a sound-mode display name
pub fn sound_mode_command(name: &str) -> Option<&'static str> {
    SOUND_MODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, token)| *token)
}

/// Display name for a sound-mode device token (value scan)
pub fn display_sound_mode(token: &str) -> Option<&'static str> {
    SOUND_MODES
        .iter()
        .find(|(_, t)| *t == token)
        .map(|(name, _)| *name)
}

/// Sorted, deduplicated source display names
pub fn source_names() -> Vec<&'static str> {
    SOURCE_DISPLAY
        .iter()
        .map(|(_, name)| *name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted sound-mode display names
pub fn sound_mode_names() -> Vec<&'static str> {
    SOUND_MODES
        .iter()
        .map(|(name, _)| *name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
