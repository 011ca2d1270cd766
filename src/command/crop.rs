use super::{expect_no_arguments, loaded_image, CommandHandler, Outcome};
use crate::image::{geometry::crop, Raster};

pub struct CropCommand;

impl CommandHandler for CropCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        expect_no_arguments(args)?;
        crop(loaded_image(image)?)?;
        Ok(Outcome::Done("Image cropped".to_owned()))
    }
}
