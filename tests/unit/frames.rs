use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "trackviz_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &std::path::Path, rgb: [u8; 3]) {
    let img = image::RgbImage::from_raw(1, 1, rgb.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn insert_then_lookup_returns_the_image() {
    let mut store = FrameStore::new();
    let img = image::RgbImage::from_raw(2, 1, vec![9, 8, 7, 1, 2, 3]).unwrap();
    store.insert(FrameIndex(4), img.clone());

    assert_eq!(store.len(), 1);
    assert_eq!(store.frame(FrameIndex(4)).unwrap(), img);
}

#[test]
fn missing_frames_are_lookup_errors() {
    let store = FrameStore::new();
    let err = store.frame(FrameIndex(99)).unwrap_err();
    assert!(err.to_string().contains("lookup error:"));
    assert!(err.to_string().contains("frame 99"));
}

#[test]
fn empty_store_reports_empty() {
    let store = FrameStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.frames().count(), 0);
}

#[test]
fn load_dir_keeps_numbered_images_only() {
    let tmp = temp_dir("frames_load_dir");
    std::fs::create_dir_all(&tmp).unwrap();

    write_png(&tmp.join("0.png"), [255, 0, 0]);
    write_png(&tmp.join("7.png"), [0, 255, 0]);
    write_png(&tmp.join("preview.png"), [0, 0, 255]);
    std::fs::write(tmp.join("notes.txt"), b"not an image").unwrap();

    let store = FrameStore::load_dir(&tmp).unwrap();
    assert_eq!(
        store.frames().collect::<Vec<_>>(),
        vec![FrameIndex(0), FrameIndex(7)]
    );
    assert_eq!(
        store.frame(FrameIndex(0)).unwrap().get_pixel(0, 0),
        &image::Rgb([255, 0, 0])
    );
    assert_eq!(
        store.frame(FrameIndex(7)).unwrap().get_pixel(0, 0),
        &image::Rgb([0, 255, 0])
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_dir_requires_a_readable_directory() {
    let tmp = temp_dir("frames_load_dir_missing");
    let err = FrameStore::load_dir(&tmp).unwrap_err();
    assert!(err.to_string().contains("io error:"));
}

#[test]
fn load_dir_propagates_decode_failures() {
    let tmp = temp_dir("frames_load_dir_corrupt");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("3.png"), b"not a png").unwrap();

    let err = FrameStore::load_dir(&tmp).unwrap_err();
    assert!(err.to_string().contains("3.png"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn decode_frame_rejects_garbage() {
    assert!(decode_frame(&[0u8, 1, 2, 3]).is_err());
}
