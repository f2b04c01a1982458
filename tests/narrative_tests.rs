// Host-side tests for narrative beat selection and crossfades.

use flow_core::narrative::{Beat, BeatTrack, PITCH_FLOW_BEATS};

#[test]
fn active_beat_is_the_last_threshold_reached() {
    let track = BeatTrack::pitch_flow();
    assert_eq!(track.len(), PITCH_FLOW_BEATS.len());
    assert_eq!(track.active_index(0.0), Some(0));
    assert_eq!(track.active_index(0.5), Some(1));
    assert_eq!(track.active_index(0.72), Some(2));
    assert_eq!(track.active_index(0.91), Some(2));
    assert_eq!(track.active_index(1.0), Some(3));
    assert_eq!(track.active_index(f32::NAN), None);
}

#[test]
fn beats_are_sorted_on_construction() {
    let track = BeatTrack::new([Beat::new(0.6, "late"), Beat::new(0.1, "early")]);
    assert_eq!(track.beats()[0].text, "early");
    assert_eq!(track.active_index(0.05), None);
    assert_eq!(track.active_index(0.7), Some(1));
}

#[test]
fn switching_beats_crossfades() {
    let mut track = BeatTrack::pitch_flow().with_crossfade_ms(450.0);
    assert_eq!(track.update(0.1, 0.0), Some(0));
    assert!((track.opacity(0, 225.0, false) - 0.5).abs() < 1e-6);
    assert_eq!(track.opacity(0, 450.0, false), 1.0);

    assert_eq!(track.update(0.1, 500.0), None);
    assert_eq!(track.update(0.5, 1000.0), Some(1));
    assert!((track.opacity(1, 1225.0, false) - 0.5).abs() < 1e-6);
    assert!((track.opacity(0, 1225.0, false) - 0.5).abs() < 1e-6);
    assert_eq!(track.opacity(1, 1450.0, false), 1.0);
    assert_eq!(track.opacity(0, 1450.0, false), 0.0);
    assert_eq!(track.opacity(3, 1450.0, false), 0.0);
}

#[test]
fn reduced_motion_shows_the_active_beat_without_fading() {
    let mut track = BeatTrack::pitch_flow();
    track.update(0.95, 0.0);
    assert_eq!(track.opacity(3, 0.0, true), 1.0);
    assert_eq!(track.opacity(2, 0.0, true), 0.0);
}

#[test]
fn entrainment_track_has_three_beats() {
    let track = BeatTrack::entrainment();
    assert_eq!(track.len(), 3);
    assert_eq!(track.active_index(0.3), Some(1));
    assert_eq!(track.active_index(0.6), Some(2));
}

#[test]
fn fast_scroll_past_two_beats_fades_without_popping() {
    let mut track = BeatTrack::pitch_flow().with_crossfade_ms(450.0);
    track.update(0.0, 0.0);

    let mut last: Vec<f32> = (0..track.len())
        .map(|i| track.opacity(i, 990.0, false))
        .collect();
    let mut was_active = track.active();
    for tick in 0..=70 {
        let now = 1000.0 + tick as f64 * 10.0;
        let signal = if now < 1100.0 { 0.5 } else { 0.8 };
        let before: Vec<f32> = (0..track.len())
            .map(|i| track.opacity(i, now, false))
            .collect();
        track.update(signal, now);
        for (i, prev) in last.iter_mut().enumerate() {
            let o = track.opacity(i, now, false);
            assert!((o - before[i]).abs() < 1e-5, "beat {} jumped to {} at {}", i, o, now);
            let idle = Some(i) != track.active() && Some(i) != was_active;
            assert!(!idle || o <= *prev + 1e-6, "beat {} rose to {} at {}", i, o, now);
            *prev = o;
        }
        was_active = track.active();
    }

    assert_eq!(track.active(), Some(2));
    assert_eq!(track.opacity(2, 1700.0, false), 1.0);
    assert_eq!(track.opacity(1, 1700.0, false), 0.0);
    assert_eq!(track.opacity(0, 1700.0, false), 0.0);
}
