use crate::emitter::KeystrokeEmitter;
use crate::keyboard_hook::KeyAction;

/// Maximum number of digits held at once. Further digits are dropped.
pub const MAX_DIGITS: usize = 7;

/// Bounded sequence of keypad digits captured since the last clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: Vec<char>,
}

impl DigitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `digit` unless the buffer is already full.
    ///
    /// Returns `true` when the digit was stored.
    pub fn append(&mut self, digit: char) -> bool {
        debug_assert!(digit.is_ascii_digit(), "not a digit: {digit:?}");
        if self.digits.len() >= MAX_DIGITS {
            tracing::debug!(%digit, "digit buffer full, dropping");
            return false;
        }
        self.digits.push(digit);
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() >= MAX_DIGITS
    }

    /// Digits separated by single spaces, e.g. `"1 2 3"`.
    pub fn render_spaced(&self) -> String {
        let mut out = String::with_capacity(self.digits.len() * 2);
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(*d);
        }
        out
    }

    /// Digits with no separator, e.g. `"123"`.
    pub fn render_concatenated(&self) -> String {
        self.digits.iter().collect()
    }

    /// Emit the buffered digits through `emitter` and leave the buffer empty.
    ///
    /// The digits are taken out of the buffer before the emitter runs, so the
    /// same content can never be emitted twice. Returns `Ok(false)` without
    /// touching the emitter when there is nothing to send.
    pub fn flush(&mut self, emitter: &mut dyn KeystrokeEmitter) -> anyhow::Result<bool> {
        if self.digits.is_empty() {
            return Ok(false);
        }
        let text: String = std::mem::take(&mut self.digits).into_iter().collect();
        tracing::debug!(%text, "flushing digits");
        emitter.type_digits(&text)?;
        Ok(true)
    }

    /// Apply a classified key event.
    ///
    /// Returns `Ok(true)` when the visible contents changed.
    pub fn apply(
        &mut self,
        action: KeyAction,
        emitter: &mut dyn KeystrokeEmitter,
    ) -> anyhow::Result<bool> {
        match action {
            KeyAction::Digit(d) => Ok(self.append(d)),
            KeyAction::Backspace => {
                let changed = !self.is_empty();
                self.clear();
                Ok(changed)
            }
            KeyAction::Enter => self.flush(emitter),
        }
    }
}
