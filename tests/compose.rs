use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, Rgb, Rgba, RgbaImage};
use qrtint::{BatchJob, Color, OverlaySpec, QrCodeEcc, QrComposer, QrError, QrRequest, Version};

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX epoch")
        .as_nanos();
    let sequence = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!("qrtint_{tag}_{nanos}_{sequence}"));
    path
}

fn write_logo(dir: &Path, pixel: Rgba<u8>) -> PathBuf {
    fs::create_dir_all(dir).expect("failed to create logo dir");
    let path = dir.join("logo.png");
    RgbaImage::from_pixel(48, 48, pixel)
        .save(&path)
        .expect("failed to write logo");
    path
}

#[test]
fn saved_png_reopens_with_identical_pixels() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("nested").join("qr.png");
    let request = QrRequest::new("https://example.com")
        .fill_color_str("#9467bd")
        .and_then(|r| r.back_color_str("#f0f0f0"))
        .unwrap();

    let composer = QrComposer::new();
    let written = composer.generate_and_save(&request, &path, None).unwrap();
    let reopened = image::open(&path).unwrap();

    assert_eq!((reopened.width(), reopened.height()), (written.width(), written.height()));
    assert_eq!(reopened.to_rgb8(), written.to_rgb8());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn logo_from_disk_is_framed_in_background_color() {
    let dir = temp_dir("logo");
    let logo_path = write_logo(&dir, Rgba([255, 127, 14, 255]));
    let request = QrRequest::new("version two")
        .version(Version::new(2))
        .fit(false)
        .fill_color_str("#2ca02c")
        .unwrap();
    let spec = OverlaySpec::from_path(&logo_path, 0.25).unwrap();

    let out_path = dir.join("qr_with_logo.png");
    let img = QrComposer::new()
        .generate_and_save(&request, &out_path, Some(&spec))
        .unwrap();

    let rgb = img.to_rgb8();
    assert_eq!(rgb.dimensions(), (330, 330));
    for (x, y) in [(114, 114), (215, 114), (114, 215), (215, 215)] {
        assert_eq!(*rgb.get_pixel(x, y), Rgb([255, 255, 255]), "frame pixel at ({x}, {y})");
    }
    assert!(out_path.exists());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_logo_fails_without_writing() {
    let dir = temp_dir("missing");
    let out_path = dir.join("never.png");
    let spec = OverlaySpec::from_path(dir.join("no_logo.png"), 0.3).unwrap();

    let err = QrComposer::new()
        .generate_and_save(&QrRequest::new("https://github.com"), &out_path, Some(&spec))
        .unwrap_err();

    assert!(matches!(err, QrError::NotFound(_)));
    assert!(!out_path.exists());
    assert!(!dir.exists());
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = temp_dir("unwritable");
    fs::create_dir_all(&dir).unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = QrComposer::new()
        .generate_and_save(&QrRequest::new("io"), blocker.join("qr.png"), None)
        .unwrap_err();

    assert!(matches!(err, QrError::Io(_)), "got {err:?}");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unknown_extension_is_an_image_error() {
    let dir = temp_dir("extension");
    let err = QrComposer::new()
        .generate_and_save(&QrRequest::new("ext"), dir.join("qr.notaformat"), None)
        .unwrap_err();

    assert!(matches!(err, QrError::Image(_)), "got {err:?}");
    assert!(!dir.exists());
}

#[test]
fn batch_writes_one_distinct_file_per_job() {
    let dir = temp_dir("batch");
    let colors = ["#1f77b4", "#d62728", "#2ca02c", "#ff7f0e"];
    let jobs: Vec<BatchJob> = colors
        .iter()
        .enumerate()
        .map(|(i, fill)| {
            let request = QrRequest::new(format!("https://example.com/product/{i}"))
                .fill_color_str(fill)
                .unwrap();
            BatchJob::new(request, dir.join(format!("qr_product_{i}.png")))
        })
        .collect();

    let results = QrComposer::new().generate_batch(&jobs);

    assert_eq!(results.len(), colors.len());
    for (fill, result) in colors.iter().zip(&results) {
        let path = result.as_ref().unwrap();
        let expected: Color = fill.parse().unwrap();
        let img = image::open(path).unwrap().to_rgb8();
        // Top-left finder pattern, just inside the 4-module border at 10 px per module.
        assert_eq!(*img.get_pixel(45, 45), expected.to_rgb());
        assert_eq!(*img.get_pixel(5, 5), Rgb([255, 255, 255]));
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn batch_continues_after_a_failed_job() {
    let dir = temp_dir("batch_fail");
    let too_long = QrRequest::new("x".repeat(64))
        .error_correction(QrCodeEcc::High)
        .version(Version::MIN)
        .fit(false);
    let jobs = vec![
        BatchJob::new(too_long, dir.join("bad.png")),
        BatchJob::new(QrRequest::new("fine"), dir.join("good.png")),
    ];

    let results = QrComposer::new().generate_batch(&jobs);

    assert!(matches!(results[0], Err(QrError::Encoding(_))));
    assert_eq!(results[1].as_ref().unwrap(), &dir.join("good.png"));
    assert!(!dir.join("bad.png").exists());
    assert!(dir.join("good.png").exists());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn in_memory_logo_matches_the_file_based_one() {
    let dir = temp_dir("memory");
    let pixel = Rgba([31, 119, 180, 255]);
    let logo_path = write_logo(&dir, pixel);
    let composer = QrComposer::new();
    let qr = composer.generate(&QrRequest::new("same")).unwrap();

    let from_file = OverlaySpec::from_path(&logo_path, 0.2).unwrap();
    let from_memory =
        OverlaySpec::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(48, 48, pixel)), 0.2).unwrap();

    let a = composer.embed_overlay(&qr, &from_file, Color::WHITE).unwrap();
    let b = composer.embed_overlay(&qr, &from_memory, Color::WHITE).unwrap();

    assert_eq!(a.to_rgb8(), b.to_rgb8());
    let _ = fs::remove_dir_all(dir);
}
