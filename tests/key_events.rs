use oracle_counter::keyboard_hook::{classify_vk, KeyAction, KeyboardHook, VK_NUMPAD0};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn keypad_seven_is_a_digit_but_top_row_seven_is_not() {
    assert_eq!(classify_vk(VK_NUMPAD0 + 7), Some(KeyAction::Digit('7')));
    assert_eq!(classify_vk(u32::from(b'7')), None);
}

#[test]
fn sink_forwards_classified_events_in_order() {
    let wakeups = Arc::new(AtomicUsize::new(0));
    let counter = wakeups.clone();
    let (hook, sink) = KeyboardHook::with_sink(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(sink.deliver(0x61), Some(KeyAction::Digit('1')));
    assert_eq!(sink.deliver(0x41), None);
    assert_eq!(sink.deliver(0x0D), Some(KeyAction::Enter));
    assert_eq!(sink.deliver(0x08), Some(KeyAction::Backspace));

    assert_eq!(
        hook.drain_events(),
        vec![KeyAction::Digit('1'), KeyAction::Enter, KeyAction::Backspace]
    );
    assert!(hook.drain_events().is_empty());
    assert_eq!(wakeups.load(Ordering::SeqCst), 3);
    assert!(!hook.is_installed());
}

#[test]
fn keypad_events_from_remappers_are_captured() {
    // Remapping tools and on-screen keypads send the same keypad codes as
    // hardware, only flagged as injected.
    let (hook, sink) = KeyboardHook::with_sink(|| {});
    assert_eq!(sink.deliver(0x62), Some(KeyAction::Digit('2')));
    assert_eq!(hook.drain_events(), vec![KeyAction::Digit('2')]);
}

#[test]
fn typed_unicode_output_is_not_recaptured() {
    // Unicode keystrokes reach the hook as VK_PACKET.
    const VK_PACKET: u32 = 0xE7;
    let (hook, sink) = KeyboardHook::with_sink(|| {});
    assert_eq!(sink.deliver(VK_PACKET), None);
    assert!(hook.drain_events().is_empty());
}

#[test]
fn sink_keeps_working_from_another_thread() {
    let (hook, sink) = KeyboardHook::with_sink(|| {});
    std::thread::spawn(move || {
        for vk in 0x60..=0x69 {
            sink.deliver(vk);
        }
    })
    .join()
    .unwrap();

    let digits: String = hook
        .drain_events()
        .into_iter()
        .map(|a| match a {
            KeyAction::Digit(d) => d,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(digits, "0123456789");
}

#[test]
fn delivering_after_the_receiver_is_gone_does_not_panic() {
    let (hook, sink) = KeyboardHook::with_sink(|| panic!("no one is listening"));
    drop(hook);
    assert_eq!(sink.deliver(0x65), Some(KeyAction::Digit('5')));
}
