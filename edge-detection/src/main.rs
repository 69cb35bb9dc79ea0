use demo_common::{DisplayArgs, Usage};
use edge_detection::{edge_mosaic, EdgeOperator};
use std::path::PathBuf;
use structopt::StructOpt;

const USAGE: Usage = Usage {
    about: "Edge detection with Sobel and Scharr derivatives.",
    arguments: "<image-file>",
    notes: &["<image-file> is the name of an image file."],
    example: "../resources/lena.jpg",
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "edge-detection",
    about = "Edge detection with Sobel and Scharr derivatives"
)]
struct Opt {
    /// The aperture of the Gaussian blur applied before differentiation.
    #[structopt(short, long, default_value = "3")]
    kernel_size: u32,
    #[structopt(flatten)]
    display: DisplayArgs,
    /// The image file to find edges in.
    #[structopt(parse(from_os_str))]
    image_file: PathBuf,
}

fn run(opt: Opt) -> edge_detection::Result<()> {
    let image = demo_common::open_image(&opt.image_file)?;
    let mosaic = edge_mosaic(
        &image,
        opt.kernel_size,
        &[
            EdgeOperator::Sobel,
            EdgeOperator::Scharr,
            EdgeOperator::SobelScharr,
        ],
        3,
    )?;
    opt.display.present_mosaic(&mosaic)?;
    Ok(())
}

fn main() {
    demo_common::init_logging();
    let opt = demo_common::parse_args(&USAGE);
    demo_common::finish(run(opt), &USAGE);
}
