use oracle_counter::digits::{DigitBuffer, MAX_DIGITS};
use oracle_counter::keyboard_hook::KeyAction;

use recording_emitter::RecordingEmitter;

#[test]
fn appends_render_in_call_order() {
    let mut buf = DigitBuffer::new();
    for d in ['4', '0', '9'] {
        buf.append(d);
    }
    assert_eq!(buf.render_spaced(), "4 0 9");
    assert_eq!(buf.render_concatenated(), "409");
}

#[test]
fn eighth_and_later_digits_are_dropped() {
    let mut buf = DigitBuffer::new();
    for d in "1234567".chars() {
        assert!(buf.append(d));
    }
    for d in "890".chars() {
        assert!(!buf.append(d));
    }
    assert_eq!(buf.len(), MAX_DIGITS);
    assert_eq!(buf.render_spaced(), "1 2 3 4 5 6 7");
}

#[test]
fn clear_is_idempotent() {
    let mut buf = DigitBuffer::new();
    buf.append('1');
    buf.append('2');
    buf.clear();
    assert!(buf.is_empty());
    let once = buf.clone();
    buf.clear();
    assert_eq!(buf, once);
    assert_eq!(buf.render_spaced(), "");
}

#[test]
fn flush_on_empty_buffer_does_not_emit() {
    let mut buf = DigitBuffer::new();
    let mut emitter = RecordingEmitter::default();
    assert!(!buf.flush(&mut emitter).unwrap());
    assert!(emitter.typed().is_empty());
    assert!(buf.is_empty());
}

#[test]
fn flush_emits_once_and_clears() {
    let mut buf = DigitBuffer::new();
    let mut emitter = RecordingEmitter::default();
    for d in "123".chars() {
        buf.append(d);
    }

    assert!(buf.flush(&mut emitter).unwrap());
    assert!(buf.is_empty());

    // A second Enter right away has nothing left to send.
    assert!(!buf.flush(&mut emitter).unwrap());
    assert_eq!(emitter.typed(), vec!["123".to_string()]);
}

#[test]
fn digits_after_a_flush_belong_to_the_next_emission() {
    let mut buf = DigitBuffer::new();
    let mut emitter = RecordingEmitter::default();
    let events = [
        KeyAction::Digit('1'),
        KeyAction::Digit('2'),
        KeyAction::Enter,
        KeyAction::Digit('3'),
        KeyAction::Enter,
        KeyAction::Enter,
    ];
    for event in events {
        buf.apply(event, &mut emitter).unwrap();
    }
    assert_eq!(emitter.typed(), vec!["12".to_string(), "3".to_string()]);
    assert!(buf.is_empty());
}

#[test]
fn backspace_clears_everything() {
    let mut buf = DigitBuffer::new();
    let mut emitter = RecordingEmitter::default();
    buf.apply(KeyAction::Digit('5'), &mut emitter).unwrap();
    buf.apply(KeyAction::Digit('6'), &mut emitter).unwrap();

    assert!(buf.apply(KeyAction::Backspace, &mut emitter).unwrap());
    assert!(buf.is_empty());
    assert!(!buf.apply(KeyAction::Backspace, &mut emitter).unwrap());
    assert!(emitter.typed().is_empty());
}

#[test]
fn failed_emission_still_clears_the_buffer() {
    let mut buf = DigitBuffer::new();
    let mut emitter = RecordingEmitter::failing();
    buf.append('7');

    assert!(buf.flush(&mut emitter).is_err());
    assert!(buf.is_empty());
    assert_eq!(emitter.typed(), vec!["7".to_string()]);
}
