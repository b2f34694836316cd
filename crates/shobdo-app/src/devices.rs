use async_trait::async_trait;
use shobdo_core::capabilities::{
    CapabilityError, ShareOutcome, ShareSheet, Speaker, SpeechOptions,
};

/// Prints shared text to the terminal
pub struct ConsoleShareSheet;

#[async_trait]
impl ShareSheet for ConsoleShareSheet {
    async fn share(&self, message: &str) -> Result<ShareOutcome, CapabilityError> {
        println!("--- share ---\n{message}\n-------------");
        Ok(ShareOutcome::Shared {
            activity: Some("terminal".to_string()),
        })
    }
}

/// Terminal stand-in for text-to-speech
pub struct ConsoleSpeaker;

#[async_trait]
impl Speaker for ConsoleSpeaker {
    async fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), CapabilityError> {
        println!("({}) {}", options.language, text);
        Ok(())
    }

    fn stop(&self) {
        tracing::debug!("Speech stopped");
    }
}
