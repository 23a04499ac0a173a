//! Integration tests for the toggle/fade/volume lifecycle
//!
//! Drives a ChannelManager end to end against an instrumented facility
//! double, with time passed in explicitly - no sleeping, no real audio.

use cueboard_core::{ClipCatalog, ClipDescriptor};
use cueboard_playback::{
    AudioFacility, ChannelEvent, ChannelManager, ChannelStatus, ClipResource, PlaybackError,
    Result,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ===== Instrumented facility double =====

#[derive(Debug, Default)]
struct VoiceState {
    gain: f32,
    gain_history: Vec<f32>,
    playing: bool,
    looping: bool,
    position: Duration,
    finished: bool,
    fault: Option<String>,
}

struct TestResource {
    state: Arc<Mutex<VoiceState>>,
}

impl ClipResource for TestResource {
    fn start(&mut self, looping: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.playing = true;
        state.looping = looping;
        state.position = Duration::ZERO;
        state.finished = false;
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.position = Duration::ZERO;
        state.finished = false;
    }

    fn set_gain(&mut self, gain: f32) {
        let mut state = self.state.lock().unwrap();
        state.gain = gain;
        state.gain_history.push(gain);
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn is_finished(&self) -> bool {
        self.state.lock().unwrap().finished
    }

    fn take_fault(&mut self) -> Option<PlaybackError> {
        self.state
            .lock()
            .unwrap()
            .fault
            .take()
            .map(PlaybackError::unavailable)
    }
}

#[derive(Default)]
struct TestFacility {
    voices: Arc<Mutex<HashMap<PathBuf, Arc<Mutex<VoiceState>>>>>,
}

impl TestFacility {
    fn new() -> (Box<dyn AudioFacility>, Probe) {
        let facility = TestFacility::default();
        let probe = Probe {
            voices: facility.voices.clone(),
        };
        (Box::new(facility), probe)
    }
}

impl AudioFacility for TestFacility {
    fn open_clip(&mut self, asset_path: &Path) -> Result<Box<dyn ClipResource>> {
        let state = Arc::new(Mutex::new(VoiceState::default()));
        let previous = self
            .voices
            .lock()
            .unwrap()
            .insert(asset_path.to_path_buf(), state.clone());
        assert!(
            previous.is_none(),
            "asset opened twice: {}",
            asset_path.display()
        );
        Ok(Box::new(TestResource { state }))
    }
}

struct Probe {
    voices: Arc<Mutex<HashMap<PathBuf, Arc<Mutex<VoiceState>>>>>,
}

impl Probe {
    fn open_count(&self) -> usize {
        self.voices.lock().unwrap().len()
    }

    fn voice(&self, asset: &str) -> Arc<Mutex<VoiceState>> {
        self.voices
            .lock()
            .unwrap()
            .get(Path::new(asset))
            .cloned()
            .expect("no voice opened for asset")
    }
}

fn soundboard() -> ClipCatalog {
    ClipCatalog::new(vec![
        ClipDescriptor::new("laugh", "Risada", "/sounds/clap.mp3"),
        ClipDescriptor::new("boom", "Explosão", "/sounds/boom.mp3"),
        ClipDescriptor::new("horn", "Corneta", "/sounds/corneta.mp3"),
        ClipDescriptor::one_shot("sting", "Sting", "/sounds/sting.wav"),
    ])
    .unwrap()
}

fn setup() -> (ChannelManager, Probe) {
    let (facility, probe) = TestFacility::new();
    (ChannelManager::new(soundboard(), facility), probe)
}

// ===== Scenarios =====

#[test]
fn boom_scenario_toggle_on_then_off() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    // Toggle on: playing at full volume
    manager.toggle("boom", now).unwrap();
    let state = manager.clip_state("boom").unwrap();
    assert!(state.is_playing);
    assert_eq!(state.volume, 1.0);

    // Immediate toggle off: observed stopped within the same call
    manager.toggle("boom", now).unwrap();
    let state = manager.clip_state("boom").unwrap();
    assert!(!state.is_playing);
    assert_eq!(state.status, ChannelStatus::FadingOut);

    // The resource keeps producing while the fade schedule runs
    let voice = probe.voice("/sounds/boom.mp3");
    assert!(voice.lock().unwrap().playing);

    // Physically stops only once the ~2500ms schedule completes
    manager.tick(now + Duration::from_millis(2400));
    assert!(voice.lock().unwrap().playing);
    manager.tick(now + Duration::from_millis(2500));
    assert!(!voice.lock().unwrap().playing);
    assert_eq!(manager.clip_state("boom").unwrap().status, ChannelStatus::Idle);

    println!(
        "gain trajectory: {:?}",
        voice.lock().unwrap().gain_history
    );
}

#[test]
fn rapid_double_toggle_is_deterministic_and_opens_once() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    // Toggle twice in immediate succession, then again mid-fade
    manager.toggle("laugh", now).unwrap();
    manager.toggle("laugh", now).unwrap();
    manager.toggle("laugh", now + Duration::from_millis(1)).unwrap();
    manager.toggle("laugh", now + Duration::from_millis(2)).unwrap();

    // Policy: a toggle mid-fade restarts, so the sequence ends fading out
    assert_eq!(
        manager.clip_state("laugh").unwrap().status,
        ChannelStatus::FadingOut
    );
    assert_eq!(probe.open_count(), 1, "one resource per id, ever");
    assert_eq!(manager.channel_count(), 1);
}

#[test]
fn fade_reduces_gain_over_exactly_twenty_steps() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("boom", now).unwrap();
    manager.toggle("boom", now).unwrap();

    let voice = probe.voice("/sounds/boom.mp3");
    let baseline = voice.lock().unwrap().gain_history.len();

    // Tick once per 125ms step
    for step in 1..=20u32 {
        manager.tick(now + Duration::from_millis(125) * step);
    }

    let history = voice.lock().unwrap().gain_history.clone();
    // 19 intermediate gains, the final zero, and the 1.0 restore after stop
    let fade_writes = &history[baseline..];
    assert_eq!(fade_writes.len(), 21);
    assert_eq!(fade_writes[19], 0.0);
    assert_eq!(fade_writes[20], 1.0);

    let mut previous = 1.0;
    for gain in &fade_writes[..20] {
        assert!(*gain < previous, "monotonic decrease: {gain} vs {previous}");
        assert!(previous - gain <= 1.0 / 20.0 + 1e-6);
        previous = *gain;
    }
}

#[test]
fn fade_completion_restores_full_volume_for_next_play() {
    let (mut manager, _probe) = setup();
    let now = Instant::now();

    manager.set_volume("boom", 0.4).unwrap();
    manager.toggle("boom", now).unwrap();
    manager.toggle("boom", now).unwrap();
    manager.tick(now + Duration::from_millis(2500));

    // The configured 0.4 is gone: fade completion resets to 1.0
    let state = manager.clip_state("boom").unwrap();
    assert_eq!(state.volume, 1.0);
    assert_eq!(state.status, ChannelStatus::Idle);

    manager.toggle("boom", now + Duration::from_secs(3)).unwrap();
    assert_eq!(manager.clip_state("boom").unwrap().volume, 1.0);
}

#[test]
fn toggle_mid_fade_restarts_playback_from_zero() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.set_volume("horn", 0.8).unwrap();
    manager.toggle("horn", now).unwrap();
    manager.toggle("horn", now).unwrap();
    manager.tick(now + Duration::from_millis(250));

    let voice = probe.voice("/sounds/corneta.mp3");
    assert!(voice.lock().unwrap().gain < 0.8, "fade lowered the gain");

    // Toggle flips what the user sees: back to playing, from the top
    manager.toggle("horn", now + Duration::from_millis(300)).unwrap();
    assert!(manager.is_playing("horn"));
    let state = voice.lock().unwrap();
    assert!(state.playing);
    assert_eq!(state.position, Duration::ZERO);
    assert_eq!(state.gain, 0.8, "persisted volume, not the mid-fade gain");
    drop(state);

    // The old fade is dead; nothing stops the clip later
    manager.tick(now + Duration::from_secs(30));
    assert!(manager.is_playing("horn"));
}

#[test]
fn looping_clip_plays_until_toggled_off() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("laugh", now).unwrap();
    let voice = probe.voice("/sounds/clap.mp3");
    assert!(voice.lock().unwrap().looping);

    // Hours of ticks change nothing for a looping channel
    for minutes in 1..=5u32 {
        manager.tick(now + Duration::from_secs(u64::from(minutes) * 60));
        assert!(manager.is_playing("laugh"));
    }

    manager.toggle("laugh", now + Duration::from_secs(301)).unwrap();
    assert!(!manager.is_playing("laugh"));
}

#[test]
fn one_shot_clip_finishes_on_its_own() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("sting", now).unwrap();
    let voice = probe.voice("/sounds/sting.wav");
    assert!(!voice.lock().unwrap().looping);

    voice.lock().unwrap().finished = true;
    manager.tick(now + Duration::from_millis(800));

    let state = manager.clip_state("sting").unwrap();
    assert!(!state.is_playing);
    assert_eq!(state.status, ChannelStatus::Idle);
    assert_eq!(voice.lock().unwrap().position, Duration::ZERO);
}

#[test]
fn unknown_clip_id_is_rejected_without_side_effects() {
    let (mut manager, probe) = setup();

    assert!(matches!(
        manager.toggle("kazoo", Instant::now()),
        Err(PlaybackError::NotFound { .. })
    ));
    assert!(matches!(
        manager.set_volume("kazoo", 0.5),
        Err(PlaybackError::NotFound { .. })
    ));
    assert_eq!(probe.open_count(), 0);
    assert_eq!(manager.snapshot().len(), 4);
}

#[test]
fn volume_set_while_idle_is_retained_for_next_play() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("horn", now).unwrap();
    manager.toggle("horn", now).unwrap();
    manager.tick(now + Duration::from_millis(2500));

    manager.set_volume("horn", 0.25).unwrap();
    manager.toggle("horn", now + Duration::from_secs(3)).unwrap();

    let voice = probe.voice("/sounds/corneta.mp3");
    assert_eq!(voice.lock().unwrap().gain, 0.25);
    assert_eq!(manager.clip_state("horn").unwrap().volume, 0.25);
}

#[test]
fn timer_driven_host_wakes_once_per_fade_step() {
    let (mut manager, _probe) = setup();
    let now = Instant::now();

    manager.toggle("boom", now).unwrap();
    manager.toggle("boom", now).unwrap();

    // A timer host arms itself from next_wakeup instead of polling
    let mut wakeups = 0;
    while let Some(due) = manager.next_wakeup() {
        manager.tick(due);
        wakeups += 1;
        assert!(wakeups <= 20, "fade must not schedule past its last step");
    }

    assert_eq!(wakeups, 20);
    assert_eq!(manager.clip_state("boom").unwrap().status, ChannelStatus::Idle);
}

#[test]
fn event_stream_for_a_full_cycle() {
    let (mut manager, _probe) = setup();
    let now = Instant::now();

    manager.toggle("boom", now).unwrap();
    manager.set_volume("boom", 0.9).unwrap();
    manager.toggle("boom", now + Duration::from_millis(10)).unwrap();
    manager.tick(now + Duration::from_millis(2510));

    let events = manager.drain_events();
    println!("events: {events:?}");
    assert!(matches!(
        &events[..],
        [
            ChannelEvent::ClipStarted { .. },
            ChannelEvent::VolumeChanged { .. },
            ChannelEvent::FadeStarted { duration_ms: 2500, .. },
            ChannelEvent::FadeCompleted { .. },
        ]
    ));

    // Draining clears the buffer
    assert!(manager.drain_events().is_empty());
}

#[test]
fn independent_channels_do_not_interfere() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("boom", now).unwrap();
    manager.toggle("laugh", now).unwrap();
    manager.set_volume("laugh", 0.5).unwrap();
    manager.toggle("boom", now).unwrap();
    manager.tick(now + Duration::from_millis(2500));

    // boom faded to idle; laugh untouched at its own volume
    assert_eq!(manager.clip_state("boom").unwrap().status, ChannelStatus::Idle);
    assert!(manager.is_playing("laugh"));
    assert_eq!(manager.clip_state("laugh").unwrap().volume, 0.5);
    assert_eq!(probe.voice("/sounds/clap.mp3").lock().unwrap().gain, 0.5);
}

#[test]
fn facility_fault_surfaces_as_non_fatal_event() {
    let (mut manager, probe) = setup();
    let now = Instant::now();

    manager.toggle("boom", now).unwrap();
    manager.toggle("laugh", now).unwrap();
    manager.drain_events();

    probe.voice("/sounds/boom.mp3").lock().unwrap().fault =
        Some("device disappeared".to_string());
    manager.tick(now + Duration::from_millis(50));

    let events = manager.drain_events();
    assert!(matches!(
        &events[..],
        [ChannelEvent::PlaybackFailed { clip_id, .. }] if clip_id == "boom"
    ));
    assert_eq!(manager.clip_state("boom").unwrap().status, ChannelStatus::Idle);

    // The other channel and the failed one both keep working
    assert!(manager.is_playing("laugh"));
    manager.toggle("boom", now + Duration::from_millis(60)).unwrap();
    assert!(manager.is_playing("boom"));
}
