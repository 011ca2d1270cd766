use super::{loaded_image, parse_integer, CommandHandler, Outcome};
use crate::error::Error;
use crate::image::{Point, Raster};

const SELECT_ALL_ARGUMENT: &str = "ALL";

pub struct SelectCommand;

impl CommandHandler for SelectCommand {
    fn handle(&self, image: &mut Option<Raster>, args: &[&str]) -> crate::Result<Outcome> {
        match args {
            [all] if *all == SELECT_ALL_ARGUMENT => {
                loaded_image(image)?.select_all();
                Ok(Outcome::Done("Selected ALL".to_owned()))
            }
            [x1, y1, x2, y2] => {
                let raster = loaded_image(image)?;
                let coordinates = [
                    parse_integer(x1)?,
                    parse_integer(y1)?,
                    parse_integer(x2)?,
                    parse_integer(y2)?,
                ];
                let [x1, y1, x2, y2] = coordinates.map(to_coordinate);
                let selection = raster.select(Point::new(x1?, y1?), Point::new(x2?, y2?))?;
                Ok(Outcome::Done(format!(
                    "Selected {} {} {} {}",
                    selection.upper_left.x,
                    selection.upper_left.y,
                    selection.lower_right.x,
                    selection.lower_right.y
                )))
            }
            _ => Err(Error::InvalidCommand),
        }
    }
}

fn to_coordinate(value: i64) -> crate::Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidCoordSet)
}
