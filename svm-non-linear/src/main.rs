use demo_common::Usage;
use image::DynamicImage;
use log::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;
use svm_non_linear::{label_data, make_data, render, KernelKind, Settings, Svm};

const USAGE: Usage = Usage {
    about: "Train a support vector classifier on data that is not linearly separable.",
    arguments: "[options]",
    notes: &[
        "The training data and decision regions are drawn to result.png",
        "unless -o names another file.",
    ],
    example: "--kernel rbf --gamma 0.0001 -o rbf.png",
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "svm-non-linear",
    about = "Train a support vector classifier on partly separable data"
)]
struct Opt {
    /// The number of training points.
    #[structopt(long)]
    count: Option<usize>,
    /// The penalty for misclassified training points.
    #[structopt(short)]
    c: Option<f64>,
    /// Either linear or rbf.
    #[structopt(long)]
    kernel: Option<KernelKind>,
    /// The RBF kernel width.
    #[structopt(long)]
    gamma: Option<f64>,
    /// Seed for the training data.
    #[structopt(long)]
    seed: Option<u64>,
    /// A JSON file of settings. Flags override it.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Where to write the picture.
    #[structopt(short, long, parse(from_os_str), default_value = "result.png")]
    output: PathBuf,
    /// Do not open the picture in the system viewer.
    #[structopt(long)]
    no_show: bool,
}

impl Opt {
    fn settings(&self) -> svm_non_linear::Result<Settings> {
        let mut settings: Settings = match &self.config {
            Some(path) => demo_common::load_json(path)?,
            None => Settings::default(),
        };
        if let Some(count) = self.count {
            settings.count = count;
        }
        if let Some(c) = self.c {
            settings.c = c;
        }
        if let Some(kernel) = self.kernel {
            settings.kernel = kernel;
        }
        if let Some(gamma) = self.gamma {
            settings.gamma = gamma;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        Ok(settings)
    }
}

fn run(opt: Opt) -> svm_non_linear::Result<()> {
    let settings = opt.settings()?;
    debug!("{:?}", settings);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(settings.seed);
    let data = make_data(settings.count, settings.width, settings.height, &mut rng)?;
    let labels = label_data(settings.count);

    print!("Training SVM ... ");
    std::io::stdout().flush().map_err(demo_common::Error::from)?;
    let svm = Svm::train(&data, &labels, &settings.svm_params())?;
    println!("done.");
    info!("Training took {} iterations", svm.iterations());

    println!("support vector count == {}", svm.support_vectors().len());
    for (ix, &[x, y]) in svm.support_vectors().iter().enumerate() {
        println!("{}: center == [{}, {}]", ix, x as i32, y as i32);
    }

    let image = render(settings.width, settings.height, &svm, &data, &labels);
    demo_common::present(
        &DynamicImage::ImageRgb8(image),
        Some(&opt.output),
        !opt.no_show,
    )?;
    Ok(())
}

fn main() {
    demo_common::init_logging();
    let opt = demo_common::parse_args(&USAGE);
    demo_common::finish(run(opt), &USAGE);
}
