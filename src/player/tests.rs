use std::time::Duration;

use super::*;
use crate::audio::{AudioEvent, AudioOutput, Pinout, Volume};
use crate::catalog::Catalog;
use crate::display::{Frame, FrameBuffer, Presenter};
use crate::input::{Command, KeyboardTokenReader, TokenReader};
use crate::storage::mem::MemStorage;
use crate::storage::{BackendKind, Backends, Storage};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Volume(u8),
    Play(String),
    Stop,
    PauseResume,
}

#[derive(Default)]
struct FakeAudio {
    calls: Vec<Call>,
    reject: bool,
    finished: Option<String>,
}

impl AudioOutput for FakeAudio {
    fn set_pinout(&mut self, _pinout: Pinout) {}

    fn set_volume(&mut self, volume: Volume) {
        self.calls.push(Call::Volume(volume.level()));
    }

    fn connect_and_play(&mut self, storage: &dyn Storage, path: &str) -> bool {
        if self.reject || !storage.exists(path) {
            return false;
        }
        self.calls.push(Call::Play(path.to_string()));
        true
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn pause_resume(&mut self) {
        self.calls.push(Call::PauseResume);
    }

    fn pump(&mut self) -> Option<AudioEvent> {
        self.finished.take().map(|path| AudioEvent::Finished { path })
    }
}

const DOC: &str = r#"
default_volume: 12
unknown_card_sfx: "sfx.mp3"
cards:
  - id: "AA:BB"
    file: "song1"
    name: "Song One"
  - id: "CC:DD"
    file: "song2"
  - id: "EE:FF"
    file: "gone"
"#;

/// An 8x1 raster with ink in the left-most column.
fn one_dot_raster() -> Vec<u8> {
    let mut out = vec![0u8; 62];
    out[0..2].copy_from_slice(b"BM");
    out[10..14].copy_from_slice(&62u32.to_le_bytes());
    out[18..22].copy_from_slice(&8i32.to_le_bytes());
    out[22..26].copy_from_slice(&1i32.to_le_bytes());
    out[28..30].copy_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&[0b0111_1111, 0, 0, 0]);
    out
}

fn sdcard() -> MemStorage {
    MemStorage::new()
        .with_file("audiodb/song1", b"one".to_vec())
        .with_file("audiodb/song2", b"two".to_vec())
        .with_file("audiodb/song2.bmp", one_dot_raster())
        .with_file("audiodb/sfx.mp3", b"sfx".to_vec())
}

fn presenter() -> Presenter {
    Presenter::new("Tailpod 3000", "Now playing..")
}

fn player_with(storage: MemStorage, doc: &str) -> Player<FakeAudio, FrameBuffer> {
    let catalog = Catalog::parse(doc, &storage, BackendKind::Removable).unwrap();
    let backends = Backends::new(Some(Box::new(storage)), None);
    let mut player = Player::new(
        Some(catalog),
        backends,
        FakeAudio::default(),
        FrameBuffer::new(128, 64),
        presenter(),
    );
    player.audio_mut().calls.clear();
    player
}

fn player() -> Player<FakeAudio, FrameBuffer> {
    player_with(sdcard(), DOC)
}

fn calls(player: &mut Player<FakeAudio, FrameBuffer>) -> Vec<Call> {
    std::mem::take(&mut player.audio_mut().calls)
}

fn shown(player: &Player<FakeAudio, FrameBuffer>) -> &Frame {
    player.canvas().frame()
}

fn idle_frame() -> Frame {
    let mut fb = FrameBuffer::new(128, 64);
    presenter().show_idle(&mut fb);
    fb.frame().clone()
}

fn playing_frame(title: &str) -> Frame {
    let mut fb = FrameBuffer::new(128, 64);
    presenter().show_playing(&mut fb, title);
    fb.frame().clone()
}

#[test]
fn new_player_applies_catalog_volume_and_shows_idle() {
    let storage = sdcard();
    let catalog = Catalog::parse(DOC, &storage, BackendKind::Removable).unwrap();
    let player = Player::new(
        Some(catalog),
        Backends::new(Some(Box::new(storage)), None),
        FakeAudio::default(),
        FrameBuffer::new(128, 64),
        presenter(),
    );

    assert_eq!(player.audio().calls, vec![Call::Volume(12)]);
    assert_eq!(player.session().state, PlaybackState::Idle);
    assert_eq!(player.session().active_entry, None);
    assert_eq!(shown(&player), &idle_frame());
}

#[test]
fn known_token_without_picture_shows_the_title() {
    let mut p = player();
    let outcome = p.play("AA:BB");

    let PlayOutcome::Started(index) = outcome else {
        panic!("expected playback to start, got {outcome:?}");
    };
    assert_eq!(index.get(), 0);
    assert_eq!(p.session().state, PlaybackState::Playing);
    assert_eq!(p.active_entry().map(|e| e.id.as_str()), Some("AA:BB"));
    assert_eq!(calls(&mut p), vec![Call::Play("audiodb/song1".into())]);
    assert_eq!(shown(&p), &playing_frame("Song One"));
    assert_ne!(shown(&p), &playing_frame("song1"));
}

#[test]
fn known_token_with_picture_draws_it_centred() {
    let mut p = player();
    assert!(matches!(p.play("CC:DD"), PlayOutcome::Started(_)));

    let frame = p.canvas().frame();
    assert_eq!(frame.lit_count(), 1);
    assert!(frame.pixel(60, 31));
}

#[test]
fn unlabelled_entry_without_picture_uses_the_file_stem() {
    let storage = sdcard();
    let doc = "cards:\n  - id: \"01\"\n    file: \"song1\"\n";
    let mut p = player_with(storage, doc);
    p.play("01");
    assert_eq!(shown(&p), &playing_frame("song1"));
}

#[test]
fn typed_id_reaches_a_card_written_in_lower_case() {
    let storage = sdcard().with_file("audiodb/cafe.mp3", b"cafe".to_vec());
    let doc = "cards:\n  - id: cafe\n    file: cafe.mp3\n    name: Cafe\n";
    let mut p = player_with(storage, doc);
    let mut reader = KeyboardTokenReader::new(Duration::ZERO);

    reader.present("cafe");
    assert!(reader.is_token_present());
    let id = reader.read_token_id().unwrap();
    assert_eq!(id, "CA:FE");

    assert!(matches!(p.play(&id), PlayOutcome::Started(_)));
    assert_eq!(p.active_entry().map(|e| e.id.as_str()), Some("cafe"));
    assert_eq!(calls(&mut p), vec![Call::Play("audiodb/cafe.mp3".into())]);
    assert_eq!(shown(&p), &playing_frame("Cafe"));
}

#[test]
fn unknown_token_plays_the_fallback_track() {
    let mut p = player();
    assert_eq!(
        p.play("99:99"),
        PlayOutcome::Fallback(FallbackReason::UnknownToken)
    );
    assert_eq!(calls(&mut p), vec![Call::Play("audiodb/sfx.mp3".into())]);
    assert_eq!(p.session().state, PlaybackState::Idle);
    assert_eq!(p.session().active_entry, None);
    assert_eq!(shown(&p), &idle_frame());
}

#[test]
fn missing_track_plays_the_fallback_track() {
    let mut p = player();
    assert_eq!(
        p.play("EE:FF"),
        PlayOutcome::Fallback(FallbackReason::MissingTrack)
    );
    assert_eq!(calls(&mut p), vec![Call::Play("audiodb/sfx.mp3".into())]);
    assert_eq!(p.session().active_entry, None);
}

#[test]
fn fallback_picture_is_drawn_when_present() {
    let storage = sdcard().with_file("audiodb/sfx.mp3.bmp", one_dot_raster());
    let mut p = player_with(storage, DOC);
    p.play("99:99");
    assert_eq!(p.canvas().frame().lit_count(), 1);
    assert!(p.canvas().frame().pixel(60, 31));
}

#[test]
fn fallback_cuts_the_current_track() {
    let mut p = player();
    p.play("AA:BB");
    calls(&mut p);

    p.play("99:99");
    assert_eq!(
        calls(&mut p),
        vec![Call::Stop, Call::Play("audiodb/sfx.mp3".into())]
    );
    assert_eq!(p.session().state, PlaybackState::Idle);
    assert_eq!(p.session().active_entry, None);
}

#[test]
fn new_token_replaces_the_playing_track() {
    let mut p = player();
    p.play("AA:BB");
    calls(&mut p);

    p.play("CC:DD");
    assert_eq!(
        calls(&mut p),
        vec![Call::Stop, Call::Play("audiodb/song2".into())]
    );
    assert_eq!(p.active_entry().map(|e| e.id.as_str()), Some("CC:DD"));
    assert_eq!(p.session().state, PlaybackState::Playing);
}

#[test]
fn new_token_while_paused_stops_first() {
    let mut p = player();
    p.play("AA:BB");
    p.toggle_play_pause();
    calls(&mut p);

    p.play("CC:DD");
    assert_eq!(
        calls(&mut p),
        vec![Call::Stop, Call::Play("audiodb/song2".into())]
    );
    assert_eq!(p.session().state, PlaybackState::Playing);
}

#[test]
fn pause_and_resume_keep_the_active_entry() {
    let mut p = player();
    p.play("AA:BB");
    let active = p.session().active_entry;
    calls(&mut p);

    assert_eq!(p.toggle_play_pause(), PlaybackState::Paused);
    assert_eq!(p.session().active_entry, active);
    assert_eq!(p.toggle_play_pause(), PlaybackState::Playing);
    assert_eq!(p.session().active_entry, active);
    assert_eq!(calls(&mut p), vec![Call::PauseResume, Call::PauseResume]);
}

#[test]
fn finishing_while_paused_returns_to_idle() {
    let mut p = player();
    p.play("AA:BB");
    p.toggle_play_pause();

    p.audio_mut().finished = Some("audiodb/song1".into());
    p.pump();

    assert_eq!(p.session().state, PlaybackState::Idle);
    assert_eq!(p.session().active_entry, None);
    assert_eq!(shown(&p), &idle_frame());
}

#[test]
fn pump_without_event_changes_nothing() {
    let mut p = player();
    p.play("AA:BB");
    p.pump();
    assert_eq!(p.session().state, PlaybackState::Playing);
}

#[test]
fn volume_is_idempotent_at_the_bounds() {
    let mut p = player_with(sdcard(), "default_volume: 21\n");
    assert_eq!(p.increment_volume(), Volume::MAX);
    assert_eq!(p.increment_volume(), Volume::MAX);
    assert!(calls(&mut p).is_empty());

    assert_eq!(p.decrement_volume().level(), 20);
    assert_eq!(calls(&mut p), vec![Call::Volume(20)]);

    let mut p = player_with(sdcard(), "default_volume: 0\n");
    assert_eq!(p.decrement_volume(), Volume::MIN);
    assert!(calls(&mut p).is_empty());
    assert_eq!(p.increment_volume().level(), 1);
}

#[test]
fn stop_only_acts_while_playing() {
    let mut p = player();
    assert!(!p.stop());

    p.play("AA:BB");
    p.toggle_play_pause();
    calls(&mut p);
    assert!(!p.stop());
    assert_eq!(p.session().state, PlaybackState::Paused);
    assert!(calls(&mut p).is_empty());

    p.toggle_play_pause();
    calls(&mut p);
    assert!(p.stop());
    assert_eq!(calls(&mut p), vec![Call::Stop]);
    assert_eq!(p.session().state, PlaybackState::Idle);
    assert_eq!(shown(&p), &idle_frame());
}

#[test]
fn toggle_after_stop_replays_the_active_entry() {
    let mut p = player();
    p.play("AA:BB");
    p.stop();
    assert!(p.session().active_entry.is_some());
    calls(&mut p);

    assert_eq!(p.toggle_play_pause(), PlaybackState::Playing);
    assert_eq!(calls(&mut p), vec![Call::Play("audiodb/song1".into())]);
    assert_eq!(shown(&p), &playing_frame("Song One"));
}

#[test]
fn toggle_when_idle_without_entry_does_nothing() {
    let mut p = player();
    assert_eq!(p.toggle_play_pause(), PlaybackState::Idle);
    assert!(calls(&mut p).is_empty());
}

#[test]
fn rejected_stream_leaves_the_player_idle() {
    let mut p = player();
    p.play("AA:BB");
    p.audio_mut().reject = true;

    assert_eq!(p.play("CC:DD"), PlayOutcome::Failed);
    assert_eq!(p.session().state, PlaybackState::Idle);
    assert_eq!(p.session().active_entry, None);
    assert_eq!(shown(&p), &idle_frame());
}

#[test]
fn tokens_are_ignored_without_a_catalog() {
    let mut p = Player::new(
        None,
        Backends::new(None, None),
        FakeAudio::default(),
        FrameBuffer::new(128, 64),
        presenter(),
    );
    assert_eq!(p.session().volume, Volume::default());
    assert_eq!(calls(&mut p), vec![Call::Volume(10)]);

    assert_eq!(p.play("AA:BB"), PlayOutcome::Unconfigured);
    assert_eq!(p.toggle_play_pause(), PlaybackState::Idle);
    assert!(calls(&mut p).is_empty());
    assert_eq!(shown(&p), &idle_frame());
}

#[test]
fn commands_drive_the_controller() {
    let mut p = player();
    p.apply(Command::VolumeUp);
    assert_eq!(p.session().volume.level(), 13);
    p.apply(Command::VolumeDown);
    p.apply(Command::VolumeDown);
    assert_eq!(p.session().volume.level(), 11);

    p.play("AA:BB");
    p.apply(Command::TogglePlayPause);
    assert_eq!(p.session().state, PlaybackState::Paused);
    p.apply(Command::TogglePlayPause);
    p.apply(Command::Stop);
    assert_eq!(p.session().state, PlaybackState::Idle);
    p.apply(Command::Status);
}

#[test]
fn status_report_describes_the_session() {
    let mut p = player();
    let idle = p.status().to_string();
    assert!(idle.contains("Current volume: 12/21"));
    assert!(idle.contains("Current state: Idle"));
    assert!(idle.contains("No active card"));
    assert!(idle.contains("Cards loaded: 3"));

    p.play("AA:BB");
    let playing = p.status().to_string();
    assert!(playing.contains("Current state: Playing"));
    assert!(playing.contains("Active card: Song One (AA:BB)"));

    p.play("CC:DD");
    assert!(p.status().to_string().contains("Active card: CC:DD"));
}
