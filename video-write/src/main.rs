use demo_common::{DisplayArgs, Mosaic, Usage};
use image::{DynamicImage, Frame};
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;
use video_write::{split_channel, Channel, VideoCapture, VideoWriter};

const USAGE: Usage = Usage {
    about: "Extract, write, and display video color channels.",
    arguments: "<input> <r-out> <g-out> <b-out>",
    notes: &[
        "<input> is a color video file.",
        "<r-out> is where to write the red channel.",
        "<g-out> is where to write the green channel.",
        "<b-out> is where to write the blue channel.",
    ],
    example: "../resources/Megamind.gif red.gif green.gif blue.gif",
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "video-write",
    about = "Extract, write, and display video color channels"
)]
struct Opt {
    #[structopt(flatten)]
    display: DisplayArgs,
    /// The color video to split.
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Where to write the red channel.
    #[structopt(parse(from_os_str))]
    red: PathBuf,
    /// Where to write the green channel.
    #[structopt(parse(from_os_str))]
    green: PathBuf,
    /// Where to write the blue channel.
    #[structopt(parse(from_os_str))]
    blue: PathBuf,
}

impl Opt {
    fn output(&self, channel: Channel) -> &PathBuf {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

fn split_video(opt: &Opt) -> video_write::Result<VideoCapture> {
    let mut input = VideoCapture::open(&opt.input)?;
    let size = input.frame_size();
    let delay = input.frame_delay();
    let mut outputs = Channel::ALL
        .iter()
        .map(|&channel| {
            VideoWriter::create(opt.output(channel), size, delay).map(|writer| (channel, writer))
        })
        .collect::<video_write::Result<Vec<_>>>()?;

    while let Some(frame) = input.read()? {
        let (left, top, delay) = (frame.left(), frame.top(), frame.delay());
        let buffer = frame.into_buffer();
        for (channel, writer) in &mut outputs {
            let split = split_channel(&buffer, *channel);
            writer.write_frame(Frame::from_parts(split, left, top, delay))?;
        }
        trace!("Split frame {}", input.frames_read());
    }
    for (channel, writer) in outputs {
        let written = writer.finish()?;
        debug!("{} channel: {} frames", channel.name(), written);
    }
    Ok(input)
}

/// The first frame of the source and of every channel video, two across.
fn preview(opt: &Opt) -> video_write::Result<Mosaic> {
    let mut mosaic = Mosaic::new(2).with_gap(23);
    let videos = [
        ("Source", &opt.input),
        ("Red", &opt.red),
        ("Green", &opt.green),
        ("Blue", &opt.blue),
    ];
    for (title, path) in videos {
        let mut video = VideoCapture::open(path)?;
        if let Some(frame) = video.read()? {
            mosaic.push(title, &DynamicImage::ImageRgba8(frame.into_buffer()));
        }
    }
    Ok(mosaic)
}

fn run(opt: Opt) -> video_write::Result<()> {
    let input = split_video(&opt)?;
    let (width, height) = input.frame_size();
    println!();
    println!(
        "{} frames ({} x {}) with codec {} at {} frames/second.",
        input.frames_read(),
        width,
        height,
        input.codec(),
        input.frames_per_second()
    );
    println!();

    opt.display.present_mosaic(&preview(&opt)?)?;
    Ok(())
}

fn main() {
    demo_common::init_logging();
    let opt = demo_common::parse_args(&USAGE);
    demo_common::finish(run(opt), &USAGE);
}
