use std::io::{self, Write};

use crossterm::{QueueableCommand, style::Print};

/// Right/wrong answer cues.
pub trait SoundEffects {
    fn play_correct(&mut self, muted: bool);
    fn play_incorrect(&mut self, muted: bool);
}

/// Rings the terminal bell: once for a correct answer, twice for a wrong one.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalBell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) {
        let result = (0..times)
            .try_for_each(|_| self.out.queue(Print('\x07')).map(|_| ()))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::debug!("bell failed: {}", e);
        }
    }
}

impl<W: Write> SoundEffects for TerminalBell<W> {
    fn play_correct(&mut self, muted: bool) {
        if !muted {
            self.ring(1);
        }
    }

    fn play_incorrect(&mut self, muted: bool) {
        if !muted {
            self.ring(2);
        }
    }
}
