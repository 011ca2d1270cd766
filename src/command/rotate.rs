use super::{loaded_image, parse_integer, CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{geometry::rotate, Raster};

pub struct RotateCommand;

impl CommandHandler for RotateCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        let [angle] = args else {
            return Err(Error::InvalidCommand);
        };
        let raster = loaded_image(image)?;
        let angle = parse_integer(angle)?;
        rotate(raster, angle)?;
        Ok(Outcome::Done(format!("Rotated {}", angle)))
    }
}
