//! Audio and speech side effects triggered by the UI.

mod audio;
mod speech;

pub use audio::{SoundEffects, TerminalBell};
pub use speech::{ProcessSpeech, Speech, SpeechOptions};
