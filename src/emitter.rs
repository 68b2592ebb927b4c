#[cfg(target_os = "windows")]
use anyhow::Context;

/// Synthesizes keystrokes into whichever application holds input focus.
pub trait KeystrokeEmitter {
    fn type_digits(&mut self, digits: &str) -> anyhow::Result<()>;
}

/// One half of a unicode keystroke: the UTF-16 code unit goes in the scan
/// code field and no virtual key is set, so the receiving application gets
/// the character itself regardless of the keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeKey {
    pub scan: u16,
    pub key_up: bool,
}

/// Key-down/key-up pairs typing `digits`, in order.
pub fn unicode_inputs(digits: &str) -> anyhow::Result<Vec<UnicodeKey>> {
    let mut keys = Vec::with_capacity(digits.len() * 2);
    for ch in digits.chars() {
        if !ch.is_ascii_digit() {
            anyhow::bail!("cannot type non-digit character {ch:?}");
        }
        let scan = ch as u16;
        keys.push(UnicodeKey { scan, key_up: false });
        keys.push(UnicodeKey { scan, key_up: true });
    }
    Ok(keys)
}

/// Emitter backed by Win32 `SendInput`.
#[derive(Debug, Default)]
pub struct SendInputEmitter;

impl KeystrokeEmitter for SendInputEmitter {
    fn type_digits(&mut self, digits: &str) -> anyhow::Result<()> {
        let keys = unicode_inputs(digits)?;
        if keys.is_empty() {
            return Ok(());
        }

        #[cfg(not(target_os = "windows"))]
        {
            anyhow::bail!("typing keystrokes is only supported on Windows");
        }

        #[cfg(target_os = "windows")]
        {
            send_unicode(&keys).context("send digit keystrokes")
        }
    }
}

#[cfg(target_os = "windows")]
fn to_input(key: UnicodeKey) -> windows::Win32::UI::Input::KeyboardAndMouse::INPUT {
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
        KEYEVENTF_UNICODE, VIRTUAL_KEY,
    };

    let flags = if key.key_up {
        KEYBD_EVENT_FLAGS(KEYEVENTF_UNICODE.0 | KEYEVENTF_KEYUP.0)
    } else {
        KEYEVENTF_UNICODE
    };
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(0),
                wScan: key.scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

#[cfg(target_os = "windows")]
fn send_unicode(keys: &[UnicodeKey]) -> anyhow::Result<()> {
    use windows::Win32::UI::Input::KeyboardAndMouse::{SendInput, INPUT};

    let inputs: Vec<INPUT> = keys.iter().copied().map(to_input).collect();
    let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        anyhow::bail!("SendInput accepted {sent} of {} events", inputs.len());
    }
    Ok(())
}
