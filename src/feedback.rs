use std::time::{Duration, Instant};

pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Temporary replacement text for a button label, e.g. "Saved!".
///
/// Reverting is driven by the GUI loop: it asks for a repaint at
/// [`remaining`](Self::remaining) and reads [`label`](Self::label) each frame.
#[derive(Debug, Clone, Default)]
pub struct ButtonFeedback {
    active: Option<(String, Instant)>,
}

impl ButtonFeedback {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.active = Some((message.into(), now + FEEDBACK_DURATION));
    }

    /// The feedback text while it is live, otherwise `default`.
    pub fn label<'a>(&'a mut self, default: &'a str, now: Instant) -> &'a str {
        if matches!(&self.active, Some((_, until)) if now >= *until) {
            self.active = None;
        }
        match &self.active {
            Some((message, _)) => message.as_str(),
            None => default,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        matches!(&self.active, Some((_, until)) if now < *until)
    }

    /// Time left until the label reverts.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|(_, until)| until.saturating_duration_since(now))
    }
}
