use akaze::Akaze;
use demo_common::{DisplayArgs, Usage};
use homography_perspective::{locate, render, Features, Settings};
use image::DynamicImage;
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;

const USAGE: Usage = Usage {
    about: "Use homography and a perspective transform to locate and outline an object in a scene.",
    arguments: "<goal> <scene>",
    notes: &[
        "<goal> is an image of the object to locate.",
        "<scene> is an image containing the object somewhere in it.",
    ],
    example: "../resources/box.png ../resources/box_in_scene.png",
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "homography-perspective",
    about = "Locate and outline an object in a scene"
)]
struct Opt {
    /// The inlier threshold in scene pixels used when fitting the homography.
    #[structopt(long)]
    threshold: Option<f64>,
    /// A JSON file of settings. Flags override it.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(flatten)]
    display: DisplayArgs,
    /// The image of the object to locate.
    #[structopt(parse(from_os_str))]
    goal: PathBuf,
    /// The image to search for the object.
    #[structopt(parse(from_os_str))]
    scene: PathBuf,
}

fn run(opt: Opt) -> homography_perspective::Result<()> {
    let mut settings: Settings = match &opt.config {
        Some(path) => demo_common::load_json(path)?,
        None => Settings::default(),
    };
    if let Some(threshold) = opt.threshold {
        settings.consensus_threshold = threshold;
    }
    debug!("{:?}", settings);

    let goal_image = demo_common::open_image(&opt.goal)?;
    let scene_image = demo_common::open_image(&opt.scene)?;
    let akaze = Akaze::new(settings.akaze_threshold);
    let goal = Features::extract(&goal_image, &akaze);
    let scene = Features::extract(&scene_image, &akaze);
    info!(
        "{} goal and {} scene keypoints",
        goal.key_points.len(),
        scene.key_points.len()
    );

    let location = locate(&goal, &scene, &settings)?;
    println!("Minimum distance: {}", location.stats.min);
    println!("Maximum distance: {}", location.stats.max);

    let canvas = DynamicImage::ImageRgb8(render(&goal, &scene, &location, &settings));
    opt.display.present(&canvas)?;
    Ok(())
}

fn main() {
    demo_common::init_logging();
    let opt = demo_common::parse_args(&USAGE);
    demo_common::finish(run(opt), &USAGE);
}
