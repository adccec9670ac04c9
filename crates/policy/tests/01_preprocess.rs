use policy::{Frame, FrameGeometry, Preprocessor};

fn preprocessor() -> Preprocessor {
    Preprocessor::new(FrameGeometry::default(), 160, 80 * 80)
}

// Sampled positions with the default geometry: rows 35, 37, 39, ... and
// columns 0, 2, 4, ...; (41, 10) lands at flattened index 3 * 80 + 5.

#[test]
fn identical_frames_give_zero_observation() {
    let pre = preprocessor();
    let mut frame = Frame::filled(210, 160, 3, 144);
    frame.put(101, 80, 236);
    frame.put(103, 80, 236);
    let (first, processed) = pre.process(&frame, None);
    assert!(first.iter().all(|&v| v == 0.0));
    let (obs, _) = pre.process(&frame, Some(&processed));
    assert_eq!(obs.len(), 80 * 80);
    assert!(obs.iter().all(|&v| v == 0.0));
}

#[test]
fn observation_length_matches_input_dim() {
    let pre = preprocessor();
    for value in [0u8, 17, 109, 144, 255] {
        let frame = Frame::filled(210, 160, 3, value);
        let (obs, processed) = pre.process(&frame, None);
        assert_eq!(obs.len(), 6400);
        assert_eq!(processed.len(), 6400);
    }
}

#[test]
fn background_intensities_are_erased() {
    let pre = preprocessor();
    let mut frame = Frame::filled(210, 160, 3, 144);
    frame.put(41, 10, 109);
    frame.put(41, 12, 3);
    frame.put(43, 10, 236);
    let (_, processed) = pre.process(&frame, None);
    assert_eq!(processed[3 * 80 + 5], 0.0);
    assert_eq!(processed[3 * 80 + 6], 1.0);
    assert_eq!(processed[4 * 80 + 5], 1.0);
}

#[test]
fn moving_pixel_shows_up_as_signed_difference() {
    let pre = preprocessor();
    let mut before = Frame::filled(210, 160, 3, 144);
    before.put(41, 10, 236);
    let mut after = Frame::filled(210, 160, 3, 144);
    after.put(43, 10, 236);
    let (_, processed) = pre.process(&before, None);
    let (obs, _) = pre.process(&after, Some(&processed));
    assert_eq!(obs[3 * 80 + 5], -1.0);
    assert_eq!(obs[4 * 80 + 5], 1.0);
    assert_eq!(obs.iter().filter(|&&v| v != 0.0).count(), 2);
}

#[test]
#[should_panic]
fn geometry_must_match_the_configured_input_dim() {
    Preprocessor::new(FrameGeometry::default(), 160, 1234);
}
