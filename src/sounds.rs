//! Sound cues the front end plays after each action

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Disclaimer accepted
    Rizz,
    /// Prediction finished (success or not)
    Gamblecore,
    /// API key saved
    Goblin,
    /// Credits easter egg
    Wysi,
}

impl SoundCue {
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundCue::Rizz => "assets/sounds/rizz.opus",
            SoundCue::Gamblecore => "assets/sounds/gamblecore.opus",
            SoundCue::Goblin => "assets/sounds/goblin.opus",
            SoundCue::Wysi => "assets/sounds/727.opus",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_path())
    }
}

impl Serialize for SoundCue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.asset_path())
    }
}
