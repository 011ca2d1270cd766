//! 3x3 convolution filters over color rasters.
//!
//! Every filtered value is computed from an untouched copy of the source,
//! so a pixel never sees an already filtered neighbour. Pixels on the
//! border of the whole image are left as they are, even when the active
//! selection does not touch that border.

use std::fmt::Display;
use std::str::FromStr;

use super::{Pixel, Raster};
use crate::error::Error;

const KERNEL_SIZE: usize = 3;

type Kernel = [[f64; KERNEL_SIZE]; KERNEL_SIZE];

#[rustfmt::skip]
const EDGE_KERNEL: Kernel = [
    [-1.0, -1.0, -1.0],
    [-1.0,  8.0, -1.0],
    [-1.0, -1.0, -1.0],
];

#[rustfmt::skip]
const SHARPEN_KERNEL: Kernel = [
    [ 0.0, -1.0,  0.0],
    [-1.0,  5.0, -1.0],
    [ 0.0, -1.0,  0.0],
];

#[rustfmt::skip]
const BLUR_KERNEL: Kernel = [
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
];

#[rustfmt::skip]
const GAUSSIAN_BLUR_KERNEL: Kernel = [
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
    [1.0 /  8.0, 1.0 / 4.0, 1.0 /  8.0],
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Edge,
    Sharpen,
    Blur,
    GaussianBlur,
}

impl FilterKind {
    fn kernel(&self) -> &'static Kernel {
        match self {
            Self::Edge => &EDGE_KERNEL,
            Self::Sharpen => &SHARPEN_KERNEL,
            Self::Blur => &BLUR_KERNEL,
            Self::GaussianBlur => &GAUSSIAN_BLUR_KERNEL,
        }
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "EDGE" => Ok(Self::Edge),
            "SHARPEN" => Ok(Self::Sharpen),
            "BLUR" => Ok(Self::Blur),
            "GAUSSIAN_BLUR" => Ok(Self::GaussianBlur),
            _ => Err(Error::InvalidApplyParam),
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge => write!(f, "EDGE"),
            Self::Sharpen => write!(f, "SHARPEN"),
            Self::Blur => write!(f, "BLUR"),
            Self::GaussianBlur => write!(f, "GAUSSIAN_BLUR"),
        }
    }
}

pub fn apply_filter(raster: &mut Raster, filter: FilterKind) -> crate::Result<()> {
    raster.require_color()?;
    let kernel = filter.kernel();
    let mut result = raster.try_clone()?;
    let selection = raster.selection();
    let last_column = raster.width() - 1;
    let last_row = raster.height() - 1;

    for y in selection.rows() {
        for x in selection.columns() {
            if x == 0 || y == 0 || x == last_column || y == last_row {
                continue;
            }
            let filtered = convolve(raster, kernel, x, y).clamped();
            result.raise_max_val(filtered.max_channel());
            *result.pixel_mut(x, y) = filtered;
        }
    }

    *raster = result;
    Ok(())
}

fn convolve(source: &Raster, kernel: &Kernel, x: usize, y: usize) -> Pixel {
    let mut sum = [0.0; 3];
    for (row_offset, kernel_row) in kernel.iter().enumerate() {
        for (column_offset, weight) in kernel_row.iter().enumerate() {
            let neighbour = source.pixel(x + column_offset - 1, y + row_offset - 1);
            if let Pixel::Color { red, green, blue } = *neighbour {
                sum[0] += red * weight;
                sum[1] += green * weight;
                sum[2] += blue * weight;
            }
        }
    }
    Pixel::color(sum[0], sum[1], sum[2])
}

#[cfg(test)]
mod test {
    use super::{apply_filter, FilterKind};
    use crate::error::Error;
    use crate::image::{
        channel_to_byte,
        test::{color_from_rows, numbered_grayscale},
        Format, Pixel, Point, Raster,
    };

    #[test]
    fn filter_names_parse() {
        assert_eq!("EDGE".parse::<FilterKind>().unwrap(), FilterKind::Edge);
        assert_eq!(
            "GAUSSIAN_BLUR".parse::<FilterKind>().unwrap(),
            FilterKind::GaussianBlur
        );
        assert!(matches!(
            "blur".parse::<FilterKind>(),
            Err(Error::InvalidApplyParam)
        ));
        assert_eq!(FilterKind::GaussianBlur.to_string(), "GAUSSIAN_BLUR");
    }

    #[test]
    fn grayscale_raster_is_rejected() {
        let mut raster = numbered_grayscale(3, 3);
        let result = apply_filter(&mut raster, FilterKind::Blur);
        assert!(matches!(result, Err(Error::GrayscaleImageRequired)));
    }

    #[test]
    fn sharpen_center_of_three_by_three() {
        let mut raster = color_from_rows(&[
            &[[1, 2, 3], [10, 20, 30], [4, 5, 6]],
            &[[40, 5, 1], [60, 50, 40], [20, 5, 2]],
            &[[7, 8, 9], [30, 10, 90], [1, 1, 1]],
        ]);
        let original = raster.clone();
        apply_filter(&mut raster, FilterKind::Sharpen).unwrap();

        // 5 * center - north - south - west - east, clamped per channel
        assert_eq!(*raster.pixel(1, 1), Pixel::color(200.0, 210.0, 77.0));
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    assert_eq!(raster.pixel(x, y), original.pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn sharpen_clamps_and_raises_max_val() {
        let mut raster = color_from_rows(&[
            &[[0, 0, 0], [0, 0, 0], [0, 0, 0]],
            &[[0, 0, 0], [100, 0, 0], [0, 0, 0]],
            &[[0, 0, 0], [0, 0, 0], [0, 0, 0]],
        ]);
        apply_filter(&mut raster, FilterKind::Sharpen).unwrap();
        assert_eq!(*raster.pixel(1, 1), Pixel::color(255.0, 0.0, 0.0));
        assert_eq!(raster.max_val(), 255);
    }

    #[test]
    fn blur_keeps_border_and_changes_interior() {
        let mut raster = color_from_rows(&[
            &[[10, 10, 10], [10, 10, 10], [10, 10, 10], [10, 10, 10]],
            &[[10, 10, 10], [190, 100, 10], [10, 10, 10], [10, 10, 10]],
            &[[10, 10, 10], [10, 10, 10], [10, 10, 10], [10, 10, 10]],
            &[[10, 10, 10], [10, 10, 10], [10, 10, 10], [10, 10, 10]],
        ]);
        let original = raster.clone();
        apply_filter(&mut raster, FilterKind::Blur).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                let on_border = x == 0 || y == 0 || x == 3 || y == 3;
                if on_border {
                    assert_eq!(raster.pixel(x, y), original.pixel(x, y));
                }
            }
        }
        if let Pixel::Color { red, .. } = *raster.pixel(2, 2) {
            assert_eq!(channel_to_byte(red), 30);
        } else {
            panic!("Filtered pixel lost its color variant");
        }
    }

    #[test]
    fn max_val_is_raised_to_rounded_channel() {
        let mut pixels = vec![Pixel::color(200.0, 0.0, 0.0); 9];
        pixels[4] = Pixel::color(206.0, 0.0, 0.0);
        let mut raster = Raster::new(Format::AsciiColor, 3, 3, 100, pixels).unwrap();
        apply_filter(&mut raster, FilterKind::Blur).unwrap();

        // (8 * 200 + 206) / 9 is 200.67, which is saved as 201
        if let Pixel::Color { red, .. } = *raster.pixel(1, 1) {
            assert_eq!(channel_to_byte(red), 201);
        } else {
            panic!("Filtered pixel lost its color variant");
        }
        assert_eq!(raster.max_val(), 201);
    }

    #[test]
    fn selection_limits_filtered_pixels_but_reads_outside_it() {
        let mut raster = color_from_rows(&[
            &[[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
            &[[0, 0, 0], [0, 0, 0], [90, 90, 90], [0, 0, 0]],
            &[[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
            &[[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
        ]);
        raster.select(Point::new(1, 1), Point::new(2, 3)).unwrap();
        apply_filter(&mut raster, FilterKind::Blur).unwrap();

        // (1, 1) sees the bright neighbour at (2, 1) outside the selection
        if let Pixel::Color { green, .. } = *raster.pixel(1, 1) {
            assert_eq!(channel_to_byte(green), 10);
        } else {
            panic!("Filtered pixel lost its color variant");
        }
        assert_eq!(*raster.pixel(2, 1), Pixel::color(90.0, 90.0, 90.0));
    }

    #[test]
    fn uniform_image_is_unchanged_by_gaussian_blur() {
        let row: &[[u8; 3]] = &[[50, 60, 70], [50, 60, 70], [50, 60, 70]];
        let mut raster = color_from_rows(&[row, row, row]);
        apply_filter(&mut raster, FilterKind::GaussianBlur).unwrap();
        assert_eq!(*raster.pixel(1, 1), Pixel::color(50.0, 60.0, 70.0));
    }
}
