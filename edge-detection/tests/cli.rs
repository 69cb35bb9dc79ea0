use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::prelude::*;

#[test]
fn no_arguments_prints_usage() {
    Command::cargo_bin("edge-detection")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("<image-file>")));
}

#[test]
fn too_many_arguments_prints_usage() {
    Command::cargo_bin("edge-detection")
        .unwrap()
        .args(["a.png", "b.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unreadable_image_fails() {
    Command::cargo_bin("edge-detection")
        .unwrap()
        .args(["--no-show", "/nonexistent/lena.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open image"));
}

#[test]
fn renders_all_panes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("step.png");
    let output = dir.path().join("edges.png");
    GrayImage::from_fn(12, 10, |x, _| Luma([if x < 6 { 10 } else { 240 }]))
        .save(&input)
        .unwrap();
    Command::cargo_bin("edge-detection")
        .unwrap()
        .arg("--no-show")
        .arg("-o")
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Original: 12x10 at (0, 0)")
                .and(predicate::str::contains("Original Blurred Grayscale: 12x10 at (24, 0)"))
                .and(predicate::str::contains(
                    "Sobel (Scharr aperture) Derivative: 12x10 at (24, 60)",
                )),
        );
    let rendered = image::open(&output).unwrap().to_rgb8();
    // Six panes, three across, 50 pixels between the rows.
    assert_eq!(rendered.dimensions(), (36, 70));
}
