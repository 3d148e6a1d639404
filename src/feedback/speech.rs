use std::io;
use std::process::{Child, Command, Stdio};

/// Voice parameters, mirroring the usual speech-synthesis knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// BCP 47 tag, e.g. `id-ID`.
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            lang: "id-ID".to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Text-to-speech with at most one utterance active at a time.
pub trait Speech {
    /// Whether speech output is available at all.
    fn can_speak(&mut self) -> bool;
    /// Cancels any active utterance, then starts `text`.
    fn speak(&mut self, text: &str, options: &SpeechOptions);
    fn stop(&mut self);
    fn is_speaking(&mut self) -> bool;
}

const DEFAULT_PROGRAMS: [&str; 2] = ["espeak-ng", "espeak"];

/// Speaks through an external `espeak-ng`/`espeak` process.
///
/// The program is probed on first use; if none can be spawned every call
/// becomes a no-op.
pub struct ProcessSpeech {
    candidates: Vec<String>,
    program: Option<Option<String>>,
    child: Option<Child>,
}

impl ProcessSpeech {
    pub fn new() -> Self {
        Self::with_programs(DEFAULT_PROGRAMS.iter().map(|p| p.to_string()).collect())
    }

    pub fn with_programs(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            program: None,
            child: None,
        }
    }

    fn program(&mut self) -> Option<&str> {
        if self.program.is_none() {
            let found = self.candidates.iter().find(|p| probe(p)).cloned();
            match &found {
                Some(p) => log::info!("speech via {}", p),
                None => log::info!("no speech program found, reading aloud disabled"),
            }
            self.program = Some(found);
        }
        self.program.as_ref().and_then(|p| p.as_deref())
    }
}

impl Default for ProcessSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl Speech for ProcessSpeech {
    fn can_speak(&mut self) -> bool {
        self.program().is_some()
    }

    fn speak(&mut self, text: &str, options: &SpeechOptions) {
        self.stop();
        let Some(program) = self.program().map(str::to_string) else {
            return;
        };

        match Command::new(&program)
            .args(espeak_args(text, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.child = Some(child),
            Err(e) => log::warn!("cannot start {}: {}", program, e),
        }
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                // Already exited.
                log::trace!("stop speech: {}", e);
            }
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) | Err(_) => {
                self.child = None;
                false
            }
        }
    }
}

impl Drop for ProcessSpeech {
    fn drop(&mut self) {
        self.stop();
    }
}

fn probe(program: &str) -> bool {
    let status = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::debug!("probing {} failed: {}", program, e);
            false
        }
    }
}

/// Maps [`SpeechOptions`] onto espeak flags: voice from the language
/// subtag, words per minute (175 at rate 1), pitch 0-99 (50 at 1) and
/// amplitude 0-200 (100 at 1).
fn espeak_args(text: &str, options: &SpeechOptions) -> Vec<String> {
    let voice = options
        .lang
        .split(['-', '_'])
        .next()
        .filter(|v| !v.is_empty())
        .unwrap_or("id")
        .to_lowercase();
    let speed = (175.0 * options.rate).round().clamp(80.0, 450.0) as u32;
    let pitch = (50.0 * options.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (100.0 * options.volume).round().clamp(0.0, 200.0) as u32;

    vec![
        "-v".to_string(),
        voice,
        "-s".to_string(),
        speed.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
        "--".to_string(),
        text.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = espeak_args("Tarsius", &SpeechOptions::default());
        assert_eq!(
            args,
            vec!["-v", "id", "-s", "175", "-p", "50", "-a", "100", "--", "Tarsius"]
        );
    }

    #[test]
    fn test_args_are_clamped() {
        let options = SpeechOptions {
            lang: "en_GB".to_string(),
            rate: 10.0,
            pitch: 0.0,
            volume: 5.0,
        };
        let args = espeak_args("x", &options);
        assert_eq!(&args[..8], ["-v", "en", "-s", "450", "-p", "0", "-a", "200"]);
    }

    #[test]
    fn test_missing_program_is_a_no_op() {
        let mut speech = ProcessSpeech::with_programs(vec!["definitely-not-a-tts-binary".into()]);
        assert!(!speech.can_speak());
        speech.speak("halo", &SpeechOptions::default());
        assert!(!speech.is_speaking());
        speech.stop();
    }

    #[cfg(unix)]
    #[test]
    fn test_new_utterance_replaces_previous() {
        // `true` ignores the espeak flags and exits at once; only one child
        // may be tracked at a time.
        let mut speech = ProcessSpeech::with_programs(vec!["true".into()]);
        assert!(speech.can_speak());
        speech.speak("satu", &SpeechOptions::default());
        speech.speak("dua", &SpeechOptions::default());
        speech.stop();
        assert!(!speech.is_speaking());
    }
}
