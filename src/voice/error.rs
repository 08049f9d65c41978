use thiserror::Error;

/// Errors that can occur during voice operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Already in a voice channel")]
    AlreadyInVoiceChannel,

    #[error("This is not a voice channel")]
    NotAVoiceChannel,

    #[error("You are not in a voice channel")]
    NotInVoiceChannel,

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to join voice channel: {0}")]
    JoinFailed(String),

    #[error("Could not resolve audio source: {0}")]
    ResolutionFailed(String),

    #[error("Audio file not found: {0}")]
    FileNotFound(String),

    #[error("You have already voted to skip this song")]
    AlreadyVoted,

    #[error("Not playing any music right now")]
    NotPlaying,

    #[error("Playback error: {0}")]
    Playback(String),
}

/// Result type for voice operations
pub type VoiceResult<T> = Result<T, VoiceError>;

impl VoiceError {
    /// Short name of the failure, shown to users alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyInVoiceChannel => "AlreadyInVoiceChannel",
            Self::NotAVoiceChannel => "NotAVoiceChannel",
            Self::NotInVoiceChannel => "NotInVoiceChannel",
            Self::NotConnected => "NotConnected",
            Self::JoinFailed(_) => "JoinFailed",
            Self::ResolutionFailed(_) => "ResolutionFailed",
            Self::FileNotFound(_) => "FileNotFound",
            Self::AlreadyVoted => "AlreadyVoted",
            Self::NotPlaying => "NotPlaying",
            Self::Playback(_) => "Playback",
        }
    }
}

/// Turn the outcome of a voice command into the text sent back to the invoking channel.
pub fn reply_text(result: VoiceResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => format!(
            "An error occurred while processing this request: ```{}: {}```",
            err.kind(),
            err
        ),
    }
}
