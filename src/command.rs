use std::str::FromStr;

use crate::error::Error;
use crate::image::Raster;

mod apply;
mod crop;
mod equalize;
mod exit;
mod histogram;
mod load;
mod rotate;
mod save;
mod select;

use apply::ApplyCommand;
use crop::CropCommand;
use equalize::EqualizeCommand;
use exit::ExitCommand;
use histogram::HistogramCommand;
use load::LoadCommand;
use rotate::RotateCommand;
use save::SaveCommand;
use select::SelectCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Load,
    Select,
    Histogram,
    Equalize,
    Rotate,
    Crop,
    Apply,
    Save,
    Exit,
}

impl FromStr for CommandKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "LOAD" => Ok(Self::Load),
            "SELECT" => Ok(Self::Select),
            "HISTOGRAM" => Ok(Self::Histogram),
            "EQUALIZE" => Ok(Self::Equalize),
            "ROTATE" => Ok(Self::Rotate),
            "CROP" => Ok(Self::Crop),
            "APPLY" => Ok(Self::Apply),
            "SAVE" => Ok(Self::Save),
            "EXIT" => Ok(Self::Exit),
            _ => Err(Error::InvalidCommand),
        }
    }
}

impl CommandKind {
    fn handler(&self) -> &'static dyn CommandHandler {
        match self {
            Self::Load => &LoadCommand,
            Self::Select => &SelectCommand,
            Self::Histogram => &HistogramCommand,
            Self::Equalize => &EqualizeCommand,
            Self::Rotate => &RotateCommand,
            Self::Crop => &CropCommand,
            Self::Apply => &ApplyCommand,
            Self::Save => &SaveCommand,
            Self::Exit => &ExitCommand,
        }
    }
}

/// What a handler produced when it completed.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A single confirmation line.
    Done(String),
    /// Several lines of output, such as a histogram.
    Report(Vec<String>),
    /// The image was released and the session should end.
    Exit,
}

/// A handler either completes with an [`Outcome`] or fails with exactly one
/// [`Error`]. Handlers check all preconditions before touching the image, so
/// a failure leaves the session image in a consistent state.
pub trait CommandHandler {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome>;
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    pub terminate: bool,
}

/// Runs one command line against the session image. Every error ends here
/// and becomes the single line of the response.
pub fn dispatch(image: &mut Option<Raster>, line: &str) -> Response {
    let mut tokens = line.split_whitespace();
    let kind = match tokens.next().map(str::parse::<CommandKind>) {
        Some(Ok(kind)) => kind,
        Some(Err(error)) => return failed(line, error, false),
        None => return failed(line, Error::InvalidCommand, false),
    };
    let args: Vec<&str> = tokens.collect();
    log::debug!("Dispatching {:?} with {:?}", kind, args);

    match kind.handler().handle(image, &args) {
        Ok(Outcome::Done(message)) => Response {
            lines: vec![message],
            terminate: false,
        },
        Ok(Outcome::Report(lines)) => Response {
            lines,
            terminate: false,
        },
        Ok(Outcome::Exit) => Response {
            lines: Vec::new(),
            terminate: true,
        },
        Err(error) => {
            // EXIT without an image still ends the session
            let terminate = kind == CommandKind::Exit && matches!(error, Error::NoImageLoaded);
            failed(line, error, terminate)
        }
    }
}

fn failed(line: &str, error: Error, terminate: bool) -> Response {
    log::info!("Command '{}' failed: {:?}", line, error);
    Response {
        lines: vec![error.to_string()],
        terminate,
    }
}

fn loaded_image(image: &mut Option<Raster>) -> crate::Result<&mut Raster> {
    image.as_mut().ok_or(Error::NoImageLoaded)
}

fn expect_no_arguments(args: &[&str]) -> crate::Result<()> {
    if !args.is_empty() {
        return Err(Error::InvalidCommand);
    }
    Ok(())
}

fn parse_integer(token: &str) -> crate::Result<i64> {
    token.parse().map_err(|_| Error::InvalidCommand)
}
