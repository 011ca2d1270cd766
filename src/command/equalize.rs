use super::{expect_no_arguments, loaded_image, CommandHandler, Outcome};
use crate::image::{histogram::equalize, Raster};

pub struct EqualizeCommand;

impl CommandHandler for EqualizeCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        let raster = loaded_image(image)?;
        expect_no_arguments(args)?;
        equalize(raster)?;
        Ok(Outcome::Done("Equalize done".to_owned()))
    }
}
