use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;
pub use image::{Encoding, Format, Pixel, Point, Raster, Selection};
pub use session::Session;

mod cli;
pub mod command;
mod error;
pub mod image;
mod logger;
mod session;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    script: Option<PathBuf>,
    echo: bool,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

/// Runs an editing session on the script file, or on standard input when
/// no script is given. Responses always go to standard output.
pub fn run_editor(arguments: &Arguments) -> Result<()> {
    let output = io::stdout().lock();
    match &arguments.script {
        Some(script) => {
            log::info!("Reading commands from {}", script.display());
            let input = BufReader::new(open_input_file(script)?);
            Session::new(input, output).with_echo(arguments.echo).run()
        }
        None => {
            let input = io::stdin().lock();
            Session::new(input, output).with_echo(arguments.echo).run()
        }
    }
}
