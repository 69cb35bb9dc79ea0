//! # `demo-common`
//!
//! Plumbing shared by the demo programs in this workspace: the usage and exit-code convention,
//! logger setup, the pane [`Mosaic`] that stands in for on-screen windows, handing rendered
//! images to the system viewer, and JSON settings files.
//!
//! Every program follows the same shape:
//!
//! ```no_run
//! use demo_common::Usage;
//!
//! const USAGE: Usage = Usage {
//!     about: "Do something with an image.",
//!     arguments: "<image-file>",
//!     notes: &["<image-file> is the name of an image file."],
//!     example: "../resources/lena.jpg",
//! };
//!
//! # #[derive(structopt::StructOpt)] struct Opt {}
//! # fn run(_: Opt) -> Result<(), demo_common::Error> { Ok(()) }
//! demo_common::init_logging();
//! let opt: Opt = demo_common::parse_args(&USAGE);
//! demo_common::finish(run(opt), &USAGE);
//! ```

mod cli;
mod config;
mod display;
mod error;
mod mosaic;

pub use cli::{exit_with_usage, finish, parse_args, program_name, Usage};
pub use config::load_json;
pub use display::{open_image, present, save_image, DisplayArgs};
pub use error::{Error, Result};
pub use mosaic::{Mosaic, Pane};

/// Install the timed `pretty_env_logger` (filtered by `RUST_LOG`).
///
/// Calling this more than once is harmless; only the first call installs a logger.
pub fn init_logging() {
    if pretty_env_logger::try_init_timed().is_err() {
        log::debug!("logger already installed");
    }
}
