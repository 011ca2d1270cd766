use super::{loaded_image, parse_integer, CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{histogram::Histogram, Raster};

pub struct HistogramCommand;

impl CommandHandler for HistogramCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        let raster = loaded_image(image)?;
        let [max_val, bins] = args else {
            return Err(Error::InvalidCommand);
        };
        let max_val = parse_integer(max_val)?;
        let bins = parse_integer(bins)?;
        raster.require_grayscale()?;

        let max_val = usize::try_from(max_val).map_err(|_| Error::InvalidHistogramParam)?;
        let bins = usize::try_from(bins).map_err(|_| Error::InvalidHistogramParam)?;
        let histogram = Histogram::new(raster, max_val, bins)?;
        Ok(Outcome::Report(histogram.lines()))
    }
}
