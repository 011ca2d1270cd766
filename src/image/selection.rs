use super::{Point, Raster, Selection};
use crate::error::Error;

impl Selection {
    /// Normalizes two corners into a half-open rectangle inside a
    /// `width` x `height` image. Corners may be given in either order.
    pub fn from_corners(
        first: Point,
        second: Point,
        width: usize,
        height: usize,
    ) -> crate::Result<Self> {
        if first.x > width || second.x > width || first.y > height || second.y > height {
            return Err(Error::InvalidCoordSet);
        }
        if first.x == second.x || first.y == second.y {
            return Err(Error::InvalidCoordSet);
        }
        Ok(Self {
            upper_left: Point::new(first.x.min(second.x), first.y.min(second.y)),
            lower_right: Point::new(first.x.max(second.x), first.y.max(second.y)),
        })
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }
}

impl Raster {
    pub fn select(&mut self, first: Point, second: Point) -> crate::Result<Selection> {
        let selection = Selection::from_corners(first, second, self.width(), self.height())?;
        self.set_selection(selection);
        Ok(selection)
    }

    pub fn select_all(&mut self) {
        self.set_selection(Selection::whole(self.width(), self.height()));
    }

    pub fn whole_image_is_selected(&self) -> bool {
        self.selection() == Selection::whole(self.width(), self.height())
    }

    pub fn selection_is_square(&self) -> bool {
        self.selection().is_square()
    }
}
