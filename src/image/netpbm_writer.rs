use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{channel_to_byte, Encoding, ImageWriter, Pixel, Raster};
use crate::error::Error;

pub struct NetpbmImageWriter<'a, T: Write> {
    writer: T,
    image: &'a Raster,
    encoding: Encoding,
}

impl<'a, T: Write> NetpbmImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a Raster, encoding: Encoding) -> Self {
        Self {
            writer,
            image,
            encoding,
        }
    }

    fn write_header(&mut self) -> io::Result<()> {
        let format = self.image.format().with_encoding(self.encoding);
        writeln!(self.writer, "{}", format.magic_word())?;
        writeln!(self.writer, "{} {}", self.image.width(), self.image.height())?;
        writeln!(self.writer, "{}", self.image.max_val())
    }

    fn write_pixel_data(&mut self) -> io::Result<()> {
        match self.encoding {
            Encoding::Ascii => self.write_ascii_pixel_data(),
            Encoding::Binary => self.write_binary_pixel_data(),
        }
    }

    fn write_ascii_pixel_data(&mut self) -> io::Result<()> {
        for row in self.image.rows() {
            for pixel in row {
                for byte in pixel_bytes(pixel) {
                    write!(self.writer, "{} ", byte)?;
                }
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_binary_pixel_data(&mut self) -> io::Result<()> {
        for pixel in self.image.pixels() {
            self.writer.write_all(&pixel_bytes(pixel))?;
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for NetpbmImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::FailedToWriteHeader)?;
        self.write_pixel_data()
            .map_err(Error::FailedToWritePixelData)?;
        self.writer.flush().map_err(Error::FailedToWritePixelData)
    }
}

fn pixel_bytes(pixel: &Pixel) -> Vec<u8> {
    match *pixel {
        Pixel::Grayscale(value) => vec![channel_to_byte(value)],
        Pixel::Color { red, green, blue } => vec![
            channel_to_byte(red),
            channel_to_byte(green),
            channel_to_byte(blue),
        ],
    }
}

pub fn write_raster_to_file(raster: &Raster, file_path: &Path, encoding: Encoding) -> crate::Result<()> {
    let output_file = crate::open_output_file(file_path)?;
    NetpbmImageWriter::new(BufWriter::new(output_file), raster, encoding).write_image()
}
