//! Crop and quarter-turn rotation.
//!
//! A clockwise quarter-turn is a transpose followed by mirroring every row.
//! With the whole image selected the transpose builds a new raster with
//! swapped dimensions; a square sub-selection is turned in place.

use super::{allocate_pixels, Point, Raster, Selection};
use crate::error::Error;

const MAX_ROTATION_ANGLE: i64 = 360;
const MIN_ROTATION_ANGLE: i64 = -360;
const QUARTER_TURN: i64 = 90;

/// Replaces the raster with the pixels inside its selection.
pub fn crop(raster: &mut Raster) -> crate::Result<()> {
    let selection = raster.selection();
    let mut pixels = allocate_pixels(selection.width() * selection.height())?;
    for row in raster
        .rows()
        .skip(selection.upper_left.y)
        .take(selection.height())
    {
        pixels.extend_from_slice(&row[selection.columns()]);
    }
    *raster = Raster::new(
        raster.format(),
        selection.width(),
        selection.height(),
        raster.max_val(),
        pixels,
    )?;
    Ok(())
}

/// Number of clockwise quarter-turns for an angle in degrees.
pub fn quarter_turns(angle: i64) -> crate::Result<usize> {
    if angle % QUARTER_TURN != 0 || !(MIN_ROTATION_ANGLE..=MAX_ROTATION_ANGLE).contains(&angle) {
        return Err(Error::UnsupportedRotationAngle);
    }
    Ok((angle / QUARTER_TURN).rem_euclid(4) as usize)
}

pub fn rotate(raster: &mut Raster, angle: i64) -> crate::Result<()> {
    let turns = quarter_turns(angle)?;
    if !raster.whole_image_is_selected() && !raster.selection_is_square() {
        return Err(Error::SelectionNotSquare);
    }
    for _ in 0..turns {
        if raster.whole_image_is_selected() {
            *raster = turn_whole_image(raster)?;
        } else {
            turn_selection(raster);
        }
    }
    Ok(())
}

fn turn_whole_image(source: &Raster) -> crate::Result<Raster> {
    let (width, height) = (source.height(), source.width());
    let mut pixels = allocate_pixels(width * height)?;
    for y in 0..height {
        for x in 0..width {
            pixels.push(*source.pixel(y, x));
        }
    }
    for row in pixels.chunks_mut(width) {
        row.reverse();
    }
    Raster::new(source.format(), width, height, source.max_val(), pixels)
}

fn turn_selection(raster: &mut Raster) {
    let Selection { upper_left, .. } = raster.selection();
    let size = raster.selection().width();
    let origin = |column: usize, row: usize| Point::new(upper_left.x + column, upper_left.y + row);

    for row in 0..size {
        for column in row + 1..size {
            raster.swap_pixels(origin(column, row), origin(row, column));
        }
    }
    for row in 0..size {
        raster
            .row_segment_mut(upper_left.y + row, upper_left.x..upper_left.x + size)
            .reverse();
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::{crop, quarter_turns, rotate};
    use crate::error::Error;
    use crate::image::{test::numbered_grayscale, Format, Pixel, Point, Raster, Selection};

    fn values(raster: &Raster) -> Vec<f64> {
        raster
            .pixels()
            .iter()
            .map(|pixel| match *pixel {
                Pixel::Grayscale(value) => value,
                Pixel::Color { red, .. } => red,
            })
            .collect()
    }

    #[test]
    fn angle_normalization() {
        assert_eq!(quarter_turns(0).unwrap(), 0);
        assert_eq!(quarter_turns(90).unwrap(), 1);
        assert_eq!(quarter_turns(-90).unwrap(), 3);
        assert_eq!(quarter_turns(-270).unwrap(), 1);
        assert_eq!(quarter_turns(360).unwrap(), 0);
        assert_eq!(quarter_turns(-360).unwrap(), 0);
        assert!(matches!(quarter_turns(45), Err(Error::UnsupportedRotationAngle)));
        assert!(matches!(quarter_turns(450), Err(Error::UnsupportedRotationAngle)));
    }

    #[test]
    fn whole_image_turns_clockwise() {
        // 0 1 2      3 0
        // 3 4 5  ->  4 1
        //            5 2
        let mut raster = numbered_grayscale(3, 2);
        rotate(&mut raster, 90).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(values(&raster), vec![3.0, 0.0, 4.0, 1.0, 5.0, 2.0]);
        assert_eq!(raster.selection(), Selection::whole(2, 3));
    }

    #[test]
    fn negative_angle_turns_counter_clockwise() {
        let mut raster = numbered_grayscale(3, 2);
        rotate(&mut raster, -90).unwrap();
        assert_eq!(values(&raster), vec![2.0, 5.0, 1.0, 4.0, 0.0, 3.0]);
    }

    #[test]
    fn square_selection_turns_in_place() {
        let mut raster = numbered_grayscale(4, 3);
        raster.select(Point::new(1, 0), Point::new(3, 2)).unwrap();
        rotate(&mut raster, 90).unwrap();
        // selected block [1 2; 5 6] becomes [5 1; 6 2]
        assert_eq!(
            values(&raster),
            vec![0.0, 5.0, 1.0, 3.0, 4.0, 6.0, 2.0, 7.0, 8.0, 9.0, 10.0, 11.0]
        );
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.selection().upper_left, Point::new(1, 0));
    }

    #[test]
    fn non_square_selection_is_rejected() {
        let mut raster = numbered_grayscale(4, 3);
        raster.select(Point::new(0, 0), Point::new(3, 2)).unwrap();
        let before = raster.clone();
        let result = rotate(&mut raster, 90);
        assert!(matches!(result, Err(Error::SelectionNotSquare)));
        assert_eq!(raster, before);
    }

    #[test]
    fn crop_keeps_selected_block() {
        let mut raster = numbered_grayscale(5, 5);
        raster.select(Point::new(1, 1), Point::new(3, 3)).unwrap();
        crop(&mut raster).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 2);
        assert_eq!(values(&raster), vec![6.0, 7.0, 11.0, 12.0]);
        assert_eq!(raster.selection(), Selection::whole(2, 2));
        assert_eq!(raster.format(), Format::BinaryGrayscale);
    }

    proptest! {
        #[test]
        fn four_quarter_turns_are_identity(width in 1usize..8, height in 1usize..8) {
            let original = numbered_grayscale(width, height);
            let mut raster = original.clone();
            for _ in 0..4 {
                rotate(&mut raster, 90).unwrap();
            }
            prop_assert_eq!(raster, original);
        }

        #[test]
        fn full_turn_angles_are_identity(
            width in 1usize..8,
            height in 1usize..8,
            angle in prop::sample::select(vec![-360i64, 0, 360]),
        ) {
            let original = numbered_grayscale(width, height);
            let mut raster = original.clone();
            rotate(&mut raster, angle).unwrap();
            prop_assert_eq!(raster, original);
        }

        #[test]
        fn opposite_turns_cancel_on_square_selection(
            size in 1usize..4,
            x in 0usize..3,
            y in 0usize..3,
        ) {
            let mut raster = numbered_grayscale(7, 7);
            raster.select(Point::new(x, y), Point::new(x + size, y + size)).unwrap();
            let original = raster.clone();
            rotate(&mut raster, 270).unwrap();
            rotate(&mut raster, -270).unwrap();
            prop_assert_eq!(raster, original);
        }

        #[test]
        fn crop_dimensions_follow_selection(
            x1 in 0usize..6, y1 in 0usize..6, x2 in 0usize..6, y2 in 0usize..6,
        ) {
            prop_assume!(x1 != x2 && y1 != y2);
            let mut raster = numbered_grayscale(5, 5);
            raster.select(Point::new(x1, y1), Point::new(x2, y2)).unwrap();
            let selection = raster.selection();
            let expected_corner = *raster.pixel(selection.upper_left.x, selection.upper_left.y);
            crop(&mut raster).unwrap();
            prop_assert_eq!(raster.width(), x1.abs_diff(x2));
            prop_assert_eq!(raster.height(), y1.abs_diff(y2));
            prop_assert_eq!(*raster.pixel(0, 0), expected_corner);
        }
    }
}
