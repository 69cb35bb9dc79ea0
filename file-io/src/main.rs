use demo_common::Usage;
use std::path::PathBuf;
use structopt::StructOpt;

const USAGE: Usage = Usage {
    about: "Demonstrate serializing data to and from files.",
    arguments: "<file><ext>",
    notes: &[
        "<file><ext> is the name of a file to read and write.",
        "The <ext> extension may be: '.yaml' or '.json'",
        "to serialize data as YAML or as JSON, respectively.",
        "The default is YAML if <ext> is neither '.yaml' nor '.json'.",
        "",
        "A '.gz' suffix designates compression such that:",
        "    <file>.json.gz means use gzipped JSON.",
        "    <file>.yaml.gz means use gzipped YAML.",
        "    '<file>.gz' is equivalent to '<file>.yaml.gz'.",
    ],
    example: "somedata.json.gz",
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "file-io",
    about = "Demonstrate serializing data to and from files"
)]
struct Opt {
    /// The file to write and then read back.
    #[structopt(parse(from_os_str))]
    file: PathBuf,
}

fn run(opt: Opt) -> file_io::Result<()> {
    let path = opt.file;
    println!();
    print!("Writing {} ... ", path.display());
    let written = file_io::write_some_stuff(&path)?;
    println!("done.");

    println!("Reading {} back now.", path.display());
    println!();
    let back = file_io::verify_some_stuff(&path, &written)?;
    println!("{}", back);
    println!();
    println!(
        "Tip: Open {} with a text editor to see the serialized data.",
        path.display()
    );
    Ok(())
}

fn main() {
    demo_common::init_logging();
    let opt = demo_common::parse_args(&USAGE);
    demo_common::finish(run(opt), &USAGE);
}
