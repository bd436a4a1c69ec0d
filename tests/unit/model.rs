use super::*;

#[test]
fn minimal_json_defaults_occluded_lost_and_attributes() {
    let tracked: TrackedBox = serde_json::from_str(
        r#"{"rect": {"x0": 10.0, "y0": 20.0, "x1": 30.0, "y1": 40.0}, "frame": 5}"#,
    )
    .unwrap();
    assert_eq!(tracked.frame, FrameIndex(5));
    assert_eq!(tracked.rect, Rect::new(10.0, 20.0, 30.0, 40.0));
    assert!(!tracked.occluded);
    assert!(!tracked.lost);
    assert!(tracked.attributes.is_empty());
}

#[test]
fn json_round_trips() {
    let mut tracked = TrackedBox::new(Rect::new(1.0, 2.0, 3.0, 4.0), FrameIndex(9)).unwrap();
    tracked.occluded = true;
    tracked.attributes = vec!["walking".to_string(), "waving".to_string()];

    let json = serde_json::to_string(&tracked).unwrap();
    let back: TrackedBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tracked);
}

#[test]
fn new_defaults_to_visible_and_unoccluded() {
    let tracked = TrackedBox::new(Rect::new(0.0, 0.0, 1.0, 1.0), FrameIndex(3)).unwrap();
    assert!(!tracked.occluded);
    assert!(!tracked.lost);
    assert!(tracked.attributes.is_empty());
}

#[test]
fn new_rejects_unordered_coordinates() {
    let err = TrackedBox::new(Rect::new(5.0, 0.0, 1.0, 10.0), FrameIndex(0)).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
    assert!(err.to_string().contains("ordered"));

    let err = TrackedBox::new(Rect::new(0.0, 9.0, 1.0, 2.0), FrameIndex(0)).unwrap_err();
    assert!(err.to_string().contains("ordered"));
}

#[test]
fn new_rejects_non_finite_coordinates() {
    let err = TrackedBox::new(Rect::new(f64::NAN, 0.0, 1.0, 1.0), FrameIndex(0)).unwrap_err();
    assert!(err.to_string().contains("finite"));

    let err = TrackedBox::new(Rect::new(0.0, 0.0, f64::INFINITY, 1.0), FrameIndex(0)).unwrap_err();
    assert!(err.to_string().contains("finite"));
}

#[test]
fn new_accepts_degenerate_rects() {
    assert!(TrackedBox::new(Rect::new(2.0, 2.0, 2.0, 8.0), FrameIndex(0)).is_ok());
    assert!(TrackedBox::new(Rect::new(4.0, 4.0, 4.0, 4.0), FrameIndex(0)).is_ok());
}

#[test]
fn track_path_keeps_annotation_order() {
    let a = TrackedBox::new(Rect::new(0.0, 0.0, 1.0, 1.0), FrameIndex(5)).unwrap();
    let b = TrackedBox::new(Rect::new(0.0, 0.0, 1.0, 1.0), FrameIndex(2)).unwrap();
    let path = TrackPath::new(vec![a.clone(), b.clone()]);
    assert_eq!(path.boxes, vec![a, b]);
}
