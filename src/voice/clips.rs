use std::path::PathBuf;

use super::error::{VoiceError, VoiceResult};

/// Bundled clips: command name and file name inside the clip directory.
pub const CLIPS: &[(&str, &str)] = &[
    ("ohmaigad", "ohmaigad.mp3"),
    ("sotelo", "sotelo.mp3"),
    ("sotelo2", "sotelo2.mp3"),
    ("sostenlo", "sostenlo.mp3"),
    ("fonsi", "fonsi.mp3"),
    ("agusto", "agusto.mp3"),
    ("pacheco", "pacheco.mp3"),
    ("jalo", "jalo.mp3"),
    ("pacheco2", "pacheco2.mp3"),
];

/// Maps clip names to files under a directory
#[derive(Debug, Clone)]
pub struct ClipLibrary {
    dir: PathBuf,
}

impl ClipLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the clip called `name`. Unknown names are reported as missing files.
    pub fn path(&self, name: &str) -> VoiceResult<PathBuf> {
        let name = name.trim().to_lowercase();
        CLIPS
            .iter()
            .find(|(clip, _)| *clip == name)
            .map(|(_, file)| self.dir.join(file))
            .ok_or(VoiceError::FileNotFound(name))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        CLIPS.iter().map(|(name, _)| *name)
    }
}
