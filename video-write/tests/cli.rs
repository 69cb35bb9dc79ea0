use assert_cmd::Command;
use image::{codecs::gif::GifEncoder, Delay, Frame, Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs::File;
use video_write::VideoCapture;

#[test]
fn wrong_argument_count_prints_usage() {
    Command::cargo_bin("video-write")
        .unwrap()
        .args(["in.gif", "r.gif", "g.gif"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Usage:")
                .and(predicate::str::contains("<input> <r-out> <g-out> <b-out>")),
        );
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("video-write")
        .unwrap()
        .arg("--no-show")
        .arg("/nonexistent/in.gif")
        .arg(dir.path().join("r.gif"))
        .arg(dir.path().join("g.gif"))
        .arg(dir.path().join("b.gif"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to open video"));
}

#[test]
fn splits_channels_and_previews() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.gif");
    {
        let mut encoder = GifEncoder::new(File::create(&input).unwrap());
        for shade in [60u8, 120] {
            let image = RgbaImage::from_pixel(10, 4, Rgba([shade, 80, 200, 255]));
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(50, 1)))
                .unwrap();
        }
    }
    let outputs = ["r.gif", "g.gif", "b.gif"].map(|name| dir.path().join(name));
    let preview = dir.path().join("preview.png");

    Command::cargo_bin("video-write")
        .unwrap()
        .arg("--no-show")
        .arg("-o")
        .arg(&preview)
        .arg(&input)
        .args(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 frames (10 x 4) with codec GIF at 20 frames/second.",
        ));

    // Each output keeps only its own channel of every frame.
    let expected = [
        [Rgba([60, 0, 0, 255]), Rgba([120, 0, 0, 255])],
        [Rgba([0, 80, 0, 255]), Rgba([0, 80, 0, 255])],
        [Rgba([0, 0, 200, 255]), Rgba([0, 0, 200, 255])],
    ];
    for (output, colors) in outputs.iter().zip(expected) {
        let mut video = VideoCapture::open(output).unwrap();
        assert_eq!(video.frame_size(), (10, 4));
        for color in colors {
            let frame = video.read().unwrap().unwrap().into_buffer();
            assert!(
                frame.pixels().all(|p| *p == color),
                "{:?} should be {:?}",
                output,
                color
            );
        }
        assert!(video.read().unwrap().is_none());
    }
    let rendered = image::open(&preview).unwrap().to_rgb8();
    // Four panes, two across, 23 pixels between the rows.
    assert_eq!(rendered.dimensions(), (20, 31));
}
