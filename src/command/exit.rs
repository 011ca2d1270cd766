use super::{expect_no_arguments, loaded_image, CommandHandler, Outcome};
use crate::image::Raster;

pub struct ExitCommand;

impl CommandHandler for ExitCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        expect_no_arguments(args)?;
        loaded_image(image)?;
        *image = None;
        Ok(Outcome::Exit)
    }
}
