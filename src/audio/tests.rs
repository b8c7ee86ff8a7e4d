use super::*;
use crate::storage::mem::MemStorage;

#[test]
fn volume_steps_stop_at_the_bounds() {
    assert_eq!(Volume::MAX.incremented(), None);
    assert_eq!(Volume::MIN.decremented(), None);
    assert_eq!(Volume::clamped(20).incremented(), Some(Volume::MAX));
    assert_eq!(Volume::clamped(1).decremented(), Some(Volume::MIN));
}

#[test]
fn volume_clamps_into_range() {
    for raw in [-100, -1, 0, 5, 21, 22, 1000] {
        let v = Volume::clamped(raw);
        assert!(v >= Volume::MIN && v <= Volume::MAX);
    }
    assert_eq!(Volume::clamped(99), Volume::MAX);
    assert_eq!(Volume::clamped(-4), Volume::MIN);
    assert_eq!(Volume::default().level(), 10);
}

#[test]
fn volume_gain_is_linear() {
    assert_eq!(Volume::MIN.gain(), 0.0);
    assert_eq!(Volume::MAX.gain(), 1.0);
    assert_eq!(Volume::MAX.to_string(), "21/21");
}

#[test]
fn unavailable_output_rejects_every_stream() {
    let storage = MemStorage::new().with_file("audiodb/a.mp3", b"data".to_vec());
    let mut out = Unavailable;
    assert!(!out.connect_and_play(&storage, "audiodb/a.mp3"));
    assert_eq!(out.pump(), None);
}

#[test]
fn display_title_prefers_label_then_file_stem() {
    let storage = MemStorage::new().with_file("audiodb/song1.mp3", b"not audio".to_vec());
    assert_eq!(
        display_title("Song One", &storage, "audiodb/song1.mp3"),
        "Song One"
    );
    assert_eq!(display_title("  ", &storage, "audiodb/song1.mp3"), "song1");
    assert_eq!(display_title("", &storage, "audiodb/missing"), "missing");
}
