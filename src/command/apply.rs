use super::{loaded_image, CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{
    filter::{apply_filter, FilterKind},
    Raster,
};

pub struct ApplyCommand;

impl CommandHandler for ApplyCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        let raster = loaded_image(image)?;
        let [filter] = args else {
            return Err(Error::InvalidCommand);
        };
        let filter: FilterKind = filter.parse()?;
        apply_filter(raster, filter)?;
        Ok(Outcome::Done(format!("APPLY {} done", filter)))
    }
}
