//! PNG output tests for rendered payload symbols

use image::GenericImageView;
use rust_qrph::render::{RenderOptions, render_image, render_png};
use rust_qrph::{Amount, PayloadEncoder, PaymentRequest};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_png_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX epoch")
        .as_nanos();
    let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("qrph_render_{nanos}_{sequence}.png"))
}

#[test]
fn test_png_round_trips_through_image_decoder() {
    let payload = PayloadEncoder::default()
        .encode(&PaymentRequest::new(
            "09171234567",
            "Jane Doe",
            Amount::from_centavos(125_050),
        ))
        .unwrap();
    let options = RenderOptions {
        scale: 4,
        ..RenderOptions::default()
    };
    let path = temp_png_path();

    render_png(&payload, &path, &options).unwrap();
    let written = image::open(&path).expect("PNG should decode");
    let expected = render_image(&payload, &options).unwrap();

    assert_eq!(written.dimensions(), expected.dimensions());
    assert_eq!(written.to_luma8().into_raw(), expected.into_raw());
    let _ = fs::remove_file(path);
}

#[test]
fn test_png_to_missing_directory_fails() {
    let payload = PayloadEncoder::default()
        .encode(&PaymentRequest::new("0917", "Jane Doe", Amount::ZERO))
        .unwrap();
    let path = std::env::temp_dir()
        .join("qrph-no-such-dir")
        .join("nested")
        .join("qr.png");
    assert!(render_png(&payload, path, &RenderOptions::default()).is_err());
}
