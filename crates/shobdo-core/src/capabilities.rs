//! Device capabilities the result views use. The core never calls these
//! directly; front-ends inject implementations.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// Text-to-speech voice settings
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    pub language: String,
    pub voice: Option<String>,
    pub pitch: f32,
    pub rate: f32,
}

impl SpeechOptions {
    /// Korean voice used to read results aloud
    pub fn korean() -> Self {
        Self {
            language: "ko-KR".to_string(),
            voice: Some("ko-kr-x-kfn-local".to_string()),
            pitch: 1.1,
            rate: 0.95,
        }
    }
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self::korean()
    }
}

#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak `text`, resolving when playback finishes or is stopped
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), CapabilityError>;

    fn stop(&self);
}

pub trait ClipboardAccess: Send + Sync {
    fn get_text(&self) -> Result<String, CapabilityError>;

    fn set_text(&self, text: &str) -> Result<(), CapabilityError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared { activity: Option<String> },
    Dismissed,
}

#[async_trait]
pub trait ShareSheet: Send + Sync {
    async fn share(&self, message: &str) -> Result<ShareOutcome, CapabilityError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechAction {
    Start(usize),
    Stop(usize),
}

/// Which result row is currently being read aloud.
///
/// Pressing the speaking row stops it; pressing any other row starts
/// speaking there instead.
#[derive(Debug, Default)]
pub struct SpeechToggle {
    speaking: Option<usize>,
}

impl SpeechToggle {
    pub fn press(&mut self, index: usize) -> SpeechAction {
        if self.speaking == Some(index) {
            self.speaking = None;
            SpeechAction::Stop(index)
        } else {
            self.speaking = Some(index);
            SpeechAction::Start(index)
        }
    }

    /// Playback of `index` ended (done, stopped or errored)
    pub fn finished(&mut self, index: usize) {
        if self.speaking == Some(index) {
            self.speaking = None;
        }
    }

    pub fn speaking(&self) -> Option<usize> {
        self.speaking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_same_row_stops() {
        let mut toggle = SpeechToggle::default();
        assert_eq!(toggle.press(2), SpeechAction::Start(2));
        assert_eq!(toggle.press(2), SpeechAction::Stop(2));
        assert_eq!(toggle.speaking(), None);
    }

    #[test]
    fn test_press_other_row_switches() {
        let mut toggle = SpeechToggle::default();
        toggle.press(0);
        assert_eq!(toggle.press(3), SpeechAction::Start(3));
        assert_eq!(toggle.speaking(), Some(3));
    }

    #[test]
    fn test_stale_finish_is_ignored() {
        let mut toggle = SpeechToggle::default();
        toggle.press(0);
        toggle.press(1);
        toggle.finished(0);
        assert_eq!(toggle.speaking(), Some(1));
        toggle.finished(1);
        assert_eq!(toggle.speaking(), None);
    }

    #[test]
    fn test_korean_voice() {
        let options = SpeechOptions::default();
        assert_eq!(options.language, "ko-KR");
        assert_eq!(options.rate, 0.95);
    }
}
