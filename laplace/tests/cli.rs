use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

#[test]
fn no_arguments_prints_usage() {
    Command::cargo_bin("laplace")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Demonstrate the Laplacian operator."));
}

#[test]
fn even_kernel_size_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    RgbImage::from_pixel(4, 4, Rgb([5, 5, 5]))
        .save(&input)
        .unwrap();
    Command::cargo_bin("laplace")
        .unwrap()
        .args(["--no-show", "-k", "4"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("kernel size"));
}

#[test]
fn renders_two_across() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flat.png");
    let output = dir.path().join("laplace.png");
    RgbImage::from_pixel(8, 6, Rgb([40, 80, 120]))
        .save(&input)
        .unwrap();
    Command::cargo_bin("laplace")
        .unwrap()
        .arg("--no-show")
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .assert()
        .success();
    let rendered = image::open(&output).unwrap().to_rgb8();
    assert_eq!(rendered.dimensions(), (16, 62));
    // The Laplacian pane (bottom right) of a flat image is black.
    assert_eq!(rendered.get_pixel(12, 59), &Rgb([0, 0, 0]));
}
