use std::path::Path;

use super::{CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{netpbm_parser::read_raster_from_file, Raster};
use crate::logger::log_raster;

pub struct LoadCommand;

impl CommandHandler for LoadCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        // the previous image is gone even if the new one cannot be read
        if image.take().is_some() {
            log::debug!("Released previously loaded image");
        }
        let [path] = args else {
            return Err(Error::InvalidCommand);
        };

        let raster = read_raster_from_file(Path::new(path)).map_err(|error| {
            log::warn!("Loading '{}' failed: {}", path, error);
            Error::LoadFailed(path.to_string())
        })?;
        log::info!("Loaded image from {}", path);
        log_raster("Loaded", &raster);
        *image = Some(raster);
        Ok(Outcome::Done(format!("Loaded {}", path)))
    }
}
