use std::ops::Range;

use crate::error::Error;

pub mod filter;
pub mod geometry;
pub mod histogram;
pub mod netpbm_parser;
pub mod netpbm_writer;
pub mod selection;

pub const MIN_PIXEL_VALUE: f64 = 0.0;
pub const MAX_PIXEL_VALUE: f64 = 255.0;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<Raster>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    Binary,
}

/// The four netpbm variants, identified in files by their magic word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// P2
    AsciiGrayscale,
    /// P3
    AsciiColor,
    /// P5
    BinaryGrayscale,
    /// P6
    BinaryColor,
}

impl Format {
    pub fn from_magic_word(magic_word: &str) -> Option<Self> {
        match magic_word {
            "P2" => Some(Self::AsciiGrayscale),
            "P3" => Some(Self::AsciiColor),
            "P5" => Some(Self::BinaryGrayscale),
            "P6" => Some(Self::BinaryColor),
            _ => None,
        }
    }

    pub fn magic_word(&self) -> &'static str {
        match self {
            Self::AsciiGrayscale => "P2",
            Self::AsciiColor => "P3",
            Self::BinaryGrayscale => "P5",
            Self::BinaryColor => "P6",
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::AsciiColor | Self::BinaryColor)
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::AsciiGrayscale | Self::AsciiColor => Encoding::Ascii,
            Self::BinaryGrayscale | Self::BinaryColor => Encoding::Binary,
        }
    }

    pub fn channels(&self) -> usize {
        if self.is_color() {
            3
        } else {
            1
        }
    }

    /// Same channel layout, different encoding.
    pub fn with_encoding(&self, encoding: Encoding) -> Self {
        match (self.is_color(), encoding) {
            (false, Encoding::Ascii) => Self::AsciiGrayscale,
            (true, Encoding::Ascii) => Self::AsciiColor,
            (false, Encoding::Binary) => Self::BinaryGrayscale,
            (true, Encoding::Binary) => Self::BinaryColor,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pixel {
    Grayscale(f64),
    Color { red: f64, green: f64, blue: f64 },
}

impl Pixel {
    pub fn color(red: f64, green: f64, blue: f64) -> Self {
        Self::Color { red, green, blue }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color { .. })
    }

    pub fn clamped(&self) -> Self {
        match *self {
            Self::Grayscale(value) => Self::Grayscale(clamp_channel(value)),
            Self::Color { red, green, blue } => Self::Color {
                red: clamp_channel(red),
                green: clamp_channel(green),
                blue: clamp_channel(blue),
            },
        }
    }

    pub fn max_channel(&self) -> f64 {
        match *self {
            Self::Grayscale(value) => value,
            Self::Color { red, green, blue } => red.max(green).max(blue),
        }
    }
}

pub fn clamp_channel(value: f64) -> f64 {
    value.clamp(MIN_PIXEL_VALUE, MAX_PIXEL_VALUE)
}

/// Rounds a channel to the byte written to disk.
pub fn channel_to_byte(value: f64) -> u8 {
    clamp_channel(value.round()) as u8
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Half-open rectangle, `lower_right` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub upper_left: Point,
    pub lower_right: Point,
}

impl Selection {
    pub fn whole(width: usize, height: usize) -> Self {
        Self {
            upper_left: Point::new(0, 0),
            lower_right: Point::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.lower_right.x - self.upper_left.x
    }

    pub fn height(&self) -> usize {
        self.lower_right.y - self.upper_left.y
    }

    pub fn columns(&self) -> Range<usize> {
        self.upper_left.x..self.lower_right.x
    }

    pub fn rows(&self) -> Range<usize> {
        self.upper_left.y..self.lower_right.y
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    format: Format,
    width: usize,
    height: usize,
    max_val: u8,
    pixels: Vec<Pixel>,
    selection: Selection,
}

impl Raster {
    /// Builds a raster with the whole image selected. The pixel buffer is
    /// row-major and every pixel must have the variant implied by `format`.
    pub fn new(
        format: Format,
        width: usize,
        height: usize,
        max_val: u8,
        pixels: Vec<Pixel>,
    ) -> crate::Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(Error::InvalidFunctionArgs);
        }
        if pixels.iter().any(|pixel| pixel.is_color() != format.is_color()) {
            return Err(Error::InvalidFunctionArgs);
        }
        Ok(Self {
            format,
            width,
            height,
            max_val,
            pixels,
            selection: Selection::whole(width, height),
        })
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_val(&self) -> u8 {
        self.max_val
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> &Pixel {
        &self.pixels[self.index(x, y)]
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Pixel> {
        self.pixels.chunks(self.width)
    }

    pub fn require_grayscale(&self) -> crate::Result<()> {
        if self.format.is_color() {
            return Err(Error::ColorImageRequired);
        }
        Ok(())
    }

    pub fn require_color(&self) -> crate::Result<()> {
        if !self.format.is_color() {
            return Err(Error::GrayscaleImageRequired);
        }
        Ok(())
    }

    /// Copy of the raster whose storage is reserved fallibly, so that a
    /// failed allocation surfaces as an error instead of an abort.
    pub fn try_clone(&self) -> crate::Result<Self> {
        let mut pixels = allocate_pixels(self.pixels.len())?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            pixels,
            ..*self
        })
    }

    pub(crate) fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Pixel {
        let index = self.index(x, y);
        &mut self.pixels[index]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub(crate) fn swap_pixels(&mut self, a: Point, b: Point) {
        let (a, b) = (self.index(a.x, a.y), self.index(b.x, b.y));
        self.pixels.swap(a, b);
    }

    pub(crate) fn row_segment_mut(&mut self, y: usize, columns: Range<usize>) -> &mut [Pixel] {
        let row_start = y * self.width;
        &mut self.pixels[row_start + columns.start..row_start + columns.end]
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Raises the declared maximum when a transform produced a brighter channel.
    pub(crate) fn raise_max_val(&mut self, value: f64) {
        self.max_val = self.max_val.max(channel_to_byte(value));
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }
}

pub(crate) fn allocate_pixels(number_of_pixels: usize) -> crate::Result<Vec<Pixel>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(number_of_pixels)
        .map_err(|_| Error::UnableToAllocatePixels(number_of_pixels))?;
    Ok(pixels)
}
