use anyhow::Result;
use std::sync::mpsc::{channel, Receiver, Sender};

pub const VK_BACK: u32 = 0x08;
pub const VK_RETURN: u32 = 0x0D;
pub const VK_NUMPAD0: u32 = 0x60;
pub const VK_NUMPAD9: u32 = 0x69;

/// A key press the counter reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Digit(char),
    Enter,
    Backspace,
}

/// Map a Win32 virtual-key code to a [`KeyAction`].
///
/// Only the dedicated keypad codes produce digits; the top-row digit keys
/// (`0x30..=0x39`) are ignored. Main and keypad Enter share `VK_RETURN`.
pub fn classify_vk(vk_code: u32) -> Option<KeyAction> {
    match vk_code {
        VK_NUMPAD0..=VK_NUMPAD9 => {
            char::from_digit(vk_code - VK_NUMPAD0, 10).map(KeyAction::Digit)
        }
        VK_RETURN => Some(KeyAction::Enter),
        VK_BACK => Some(KeyAction::Backspace),
        _ => None,
    }
}

/// Sending half handed to the hook thread.
///
/// `deliver` must stay cheap: it runs inside the OS key delivery path.
pub struct KeyEventSink {
    sender: Sender<KeyAction>,
    notify: Box<dyn Fn() + Send>,
}

impl KeyEventSink {
    /// Classify a raw key-down and forward it. Unknown keys are dropped.
    pub fn deliver(&self, vk_code: u32) -> Option<KeyAction> {
        let action = classify_vk(vk_code)?;
        if self.sender.send(action).is_ok() {
            (self.notify)();
        }
        Some(action)
    }
}

/// Receiving half, drained by the GUI loop.
#[derive(Debug)]
pub struct KeyboardHook {
    receiver: Receiver<KeyAction>,
    installed: bool,
}

impl KeyboardHook {
    /// Create the channel without touching the OS. `notify` is called after
    /// each delivered event so the GUI can wake up.
    pub fn with_sink<F>(notify: F) -> (Self, KeyEventSink)
    where
        F: Fn() + Send + 'static,
    {
        let (sender, receiver) = channel();
        (
            Self {
                receiver,
                installed: false,
            },
            KeyEventSink {
                sender,
                notify: Box::new(notify),
            },
        )
    }

    /// Install the process-wide keyboard hook on a detached background thread.
    pub fn install<F>(notify: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (mut hook, sink) = Self::with_sink(notify);
        platform::install(sink)?;
        hook.installed = true;
        tracing::debug!("keyboard hook installed");
        Ok(hook)
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn drain_events(&self) -> Vec<KeyAction> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(not(windows))]
mod platform {
    use super::KeyEventSink;
    use anyhow::{bail, Result};

    pub fn install(_sink: KeyEventSink) -> Result<()> {
        bail!("global keyboard hook is only supported on Windows");
    }
}

#[cfg(windows)]
mod platform {
    use super::KeyEventSink;
    use anyhow::{anyhow, Result};
    use once_cell::sync::Lazy;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    static KEY_EVENT_SINK: Lazy<Mutex<Option<KeyEventSink>>> = Lazy::new(|| Mutex::new(None));
    static HOOK_THREAD_STARTED: AtomicBool = AtomicBool::new(false);

    pub fn install(sink: KeyEventSink) -> Result<()> {
        if let Ok(mut guard) = KEY_EVENT_SINK.lock() {
            *guard = Some(sink);
        }

        if HOOK_THREAD_STARTED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        use windows::Win32::System::LibraryLoader::GetModuleHandleW;
        use windows::Win32::UI::WindowsAndMessaging::{
            DispatchMessageW, GetMessageW, PeekMessageW, SetWindowsHookExW, TranslateMessage,
            UnhookWindowsHookEx, MSG, PM_NOREMOVE, WH_KEYBOARD_LL,
        };

        let (ready_tx, ready_rx) = std::sync::mpsc::sync_channel::<Result<()>>(1);

        // Never joined: the message loop lives until the process exits.
        std::thread::spawn(move || {
            let mut msg = MSG::default();
            unsafe {
                let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
            }

            let hmodule = match unsafe { GetModuleHandleW(None) } {
                Ok(h) => h,
                Err(err) => {
                    let _ = ready_tx.send(Err(anyhow!(err)));
                    return;
                }
            };

            let keyboard_hook = match unsafe {
                SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), hmodule, 0)
            } {
                Ok(h) if !h.0.is_null() => h,
                Ok(_) => {
                    let _ = ready_tx.send(Err(anyhow!(windows::core::Error::from_win32())));
                    return;
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(anyhow!(err)));
                    return;
                }
            };

            let _ = ready_tx.send(Ok(()));

            loop {
                let r = unsafe { GetMessageW(&mut msg, None, 0, 0) };
                if r.0 <= 0 {
                    break;
                }
                unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }

            unsafe {
                let _ = UnhookWindowsHookEx(keyboard_hook);
            }
        });

        let ready = ready_rx
            .recv_timeout(Duration::from_secs(2))
            .map_err(|_| anyhow!("keyboard hook thread did not signal readiness"))
            .and_then(|r| r);
        if ready.is_err() {
            HOOK_THREAD_STARTED.store(false, Ordering::SeqCst);
        }
        ready
    }

    unsafe extern "system" fn keyboard_hook_proc(
        n_code: i32,
        w_param: windows::Win32::Foundation::WPARAM,
        l_param: windows::Win32::Foundation::LPARAM,
    ) -> windows::Win32::Foundation::LRESULT {
        use windows::Win32::UI::WindowsAndMessaging::{
            CallNextHookEx, HC_ACTION, KBDLLHOOKSTRUCT, WM_KEYDOWN, WM_SYSKEYDOWN,
        };

        if n_code == HC_ACTION as i32 {
            let msg = w_param.0 as u32;
            if msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN {
                let info = unsafe { &*(l_param.0 as *const KBDLLHOOKSTRUCT) };
                if let Ok(guard) = KEY_EVENT_SINK.lock() {
                    if let Some(sink) = guard.as_ref() {
                        sink.deliver(info.vkCode);
                    }
                }
            }
        }

        CallNextHookEx(
            windows::Win32::UI::WindowsAndMessaging::HHOOK(std::ptr::null_mut()),
            n_code,
            w_param,
            l_param,
        )
    }
}
