use std::path::Path;

use super::{loaded_image, CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{netpbm_writer::write_raster_to_file, Encoding, Raster};
use crate::logger::log_raster;

const ASCII_FLAG: &str = "ascii";

pub struct SaveCommand;

impl CommandHandler for SaveCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        let (path, encoding) = match args {
            [path] => (path, Encoding::Binary),
            [path, flag] if *flag == ASCII_FLAG => (path, Encoding::Ascii),
            _ => return Err(Error::InvalidCommand),
        };
        let raster = loaded_image(image)?;

        write_raster_to_file(raster, Path::new(path), encoding).map_err(|error| {
            log::warn!("Saving '{}' failed: {}", path, error);
            Error::OperationFailed
        })?;
        log::info!("Saved image to {}", path);
        log_raster("Saved", raster);
        Ok(Outcome::Done(format!("Saved {}", path)))
    }
}
