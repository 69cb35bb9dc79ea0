use log::*;
use std::{fmt, path::Path, process};
use structopt::{clap::ErrorKind, StructOpt};

/// The usage message printed when a program is run incorrectly or fails.
///
/// Rendered as:
///
/// ```text
/// prog: <about>
///
/// Usage: prog <arguments>
///
/// Where: <first note>
///        <more notes>
///
/// Example: prog <example>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    pub about: &'a str,
    pub arguments: &'a str,
    pub notes: &'a [&'a str],
    pub example: &'a str,
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = program_name();
        writeln!(f, "{}: {}", program, self.about)?;
        writeln!(f)?;
        writeln!(f, "Usage: {} {}", program, self.arguments)?;
        if !self.notes.is_empty() {
            writeln!(f)?;
            for (ix, note) in self.notes.iter().enumerate() {
                let lead = if ix == 0 { "Where: " } else { "       " };
                writeln!(f, "{}{}", lead, note)?;
            }
        }
        writeln!(f)?;
        write!(f, "Example: {} {}", program, self.example)
    }
}

/// The file name this program was invoked as.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "demo".to_owned())
}

/// Print `usage` to stderr and exit with status 1.
pub fn exit_with_usage(usage: &Usage) -> ! {
    eprintln!();
    eprintln!("{}", usage);
    eprintln!();
    process::exit(1)
}

/// Parse the command line into `T`.
///
/// `--help` and `--version` behave as usual. Any other parse failure, such as a missing or
/// extra positional argument, prints the clap diagnostic followed by `usage` and exits with 1.
pub fn parse_args<T: StructOpt>(usage: &Usage) -> T {
    match T::from_args_safe() {
        Ok(opt) => opt,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                exit_with_usage(usage)
            }
        },
    }
}

/// Exit with 0 on success, otherwise report the error and exit through [`exit_with_usage`].
pub fn finish<E: std::error::Error>(result: Result<(), E>, usage: &Usage) {
    if let Err(e) = result {
        error!("{}", e);
        eprintln!("{}: {}", program_name(), e);
        exit_with_usage(usage);
    }
}
