use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::{allocate_pixels, Encoding, Format, ImageReader, Pixel, Raster};
use crate::error::Error;

pub struct NetpbmImageReader<T: Read> {
    reader: T,
}

impl<T: Read> NetpbmImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for NetpbmImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Raster> {
        let mut parser = NetpbmParser::new(&mut self.reader);
        parser.parse()
    }
}

pub fn read_raster_from_file(file_path: &Path) -> crate::Result<Raster> {
    let input_file: File = crate::open_input_file(file_path)?;
    NetpbmImageReader::new(BufReader::new(input_file)).read_image()
}

/// Splits the header and ASCII bodies into whitespace separated tokens.
/// A `#` starts a comment that runs to the end of the line and also ends
/// the current token. Reading stops right after the whitespace byte that
/// terminated a token, so a binary body can be read from the same reader.
/// A failed read ends the token stream and is kept in `read_error`.
struct NetpbmTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
    read_error: Option<io::Error>,
}

impl<'a, R: Read> NetpbmTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        NetpbmTokenizer {
            reader,
            buffer: Vec::new(),
            read_error: None,
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.read_error = Some(error);
                    return None;
                }
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(byte) = self.read_byte() {
            if byte == b'\n' {
                return;
            }
        }
    }
}

impl<R: Read> Iterator for NetpbmTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();

        while let Some(byte) = self.read_byte() {
            if byte == b'#' {
                self.skip_comment();
                if !self.buffer.is_empty() {
                    break;
                }
                continue;
            }
            if byte.is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte);
            }
        }

        if self.buffer.is_empty() || self.read_error.is_some() {
            return None;
        }

        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_WORD_TOKEN_NAME: &str = "Magic Word";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const CHANNEL_VALUE_TOKEN_NAME: &str = "Channel Value";

struct Header {
    format: Format,
    width: usize,
    height: usize,
    max_val: u8,
}

impl Header {
    fn number_of_pixels(&self) -> crate::Result<usize> {
        self.width
            .checked_mul(self.height)
            .ok_or(Error::UnableToAllocatePixels(usize::MAX))
    }
}

struct NetpbmParser<'a, R: Read> {
    tokenizer: NetpbmTokenizer<'a, R>,
}

impl<'a, R: Read> NetpbmParser<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            tokenizer: NetpbmTokenizer::new(reader),
        }
    }

    fn parse(&mut self) -> crate::Result<Raster> {
        let header = self.parse_header()?;
        let pixels = match header.format.encoding() {
            Encoding::Ascii => self.parse_ascii_pixels(&header)?,
            Encoding::Binary => self.parse_binary_pixels(&header)?,
        };
        Raster::new(
            header.format,
            header.width,
            header.height,
            header.max_val,
            pixels,
        )
    }

    fn parse_header(&mut self) -> crate::Result<Header> {
        let format = self.parse_magic_word()?;
        let width = self.parse_dimension(WIDTH_HEADER_TOKEN_NAME)?;
        let height = self.parse_dimension(HEIGHT_HEADER_TOKEN_NAME)?;
        let max_val = self.parse_max_value()?;
        Ok(Header {
            format,
            width,
            height,
            max_val,
        })
    }

    fn next_token(&mut self, token_name: &'static str) -> crate::Result<String> {
        match self.tokenizer.next() {
            Some(token) => Ok(token),
            None => Err(self.end_of_tokens(Error::NetpbmFileDoesNotContainRequiredToken(
                token_name,
            ))),
        }
    }

    /// A read failure takes precedence over the error for a missing token.
    fn end_of_tokens(&mut self, missing_token: Error) -> Error {
        match self.tokenizer.read_error.take() {
            Some(error) => Error::FailedToReadImageData(error),
            None => missing_token,
        }
    }

    fn parse_integer(&mut self, token_name: &'static str) -> crate::Result<i64> {
        self.next_token(token_name)?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(token_name))
    }

    fn parse_magic_word(&mut self) -> crate::Result<Format> {
        let magic_word = self.next_token(MAGIC_WORD_TOKEN_NAME)?;
        Format::from_magic_word(&magic_word).ok_or(Error::UnsupportedMagicWord(magic_word))
    }

    fn parse_dimension(&mut self, token_name: &'static str) -> crate::Result<usize> {
        let value = self.parse_integer(token_name)?;
        if value <= 0 {
            return Err(Error::HeaderValueOutOfRange(token_name, value));
        }
        usize::try_from(value).map_err(|_| Error::HeaderValueOutOfRange(token_name, value))
    }

    fn parse_max_value(&mut self) -> crate::Result<u8> {
        let value = self.parse_integer(MAX_VALUE_HEADER_TOKEN_NAME)?;
        u8::try_from(value)
            .map_err(|_| Error::HeaderValueOutOfRange(MAX_VALUE_HEADER_TOKEN_NAME, value))
    }

    fn parse_channel_value(&mut self, pixels_read: usize) -> crate::Result<f64> {
        let token = match self.tokenizer.next() {
            Some(token) => token,
            None => return Err(self.end_of_tokens(Error::TruncatedPixelData(pixels_read))),
        };
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::ParsingOfTokenFailed(CHANNEL_VALUE_TOKEN_NAME)),
        }
    }

    fn parse_ascii_pixels(&mut self, header: &Header) -> crate::Result<Vec<Pixel>> {
        let number_of_pixels = header.number_of_pixels()?;
        let mut pixels = allocate_pixels(number_of_pixels)?;
        for pixels_read in 0..number_of_pixels {
            let pixel = if header.format.is_color() {
                let red = self.parse_channel_value(pixels_read)?;
                let green = self.parse_channel_value(pixels_read)?;
                let blue = self.parse_channel_value(pixels_read)?;
                Pixel::color(red, green, blue)
            } else {
                Pixel::Grayscale(self.parse_channel_value(pixels_read)?)
            };
            pixels.push(pixel);
        }
        Ok(pixels)
    }

    fn parse_binary_pixels(&mut self, header: &Header) -> crate::Result<Vec<Pixel>> {
        let number_of_pixels = header.number_of_pixels()?;
        let channels = header.format.channels();
        let body_length = number_of_pixels
            .checked_mul(channels)
            .ok_or(Error::UnableToAllocatePixels(number_of_pixels))?;

        let mut body = Vec::new();
        body.try_reserve_exact(body_length)
            .map_err(|_| Error::UnableToAllocatePixels(number_of_pixels))?;
        self.tokenizer
            .reader
            .by_ref()
            .take(body_length as u64)
            .read_to_end(&mut body)
            .map_err(Error::FailedToReadImageData)?;
        if body.len() < body_length {
            return Err(Error::TruncatedPixelData(body.len() / channels));
        }

        let mut pixels = allocate_pixels(number_of_pixels)?;
        pixels.extend(body.chunks_exact(channels).map(|channel_bytes| {
            match channel_bytes {
                [red, green, blue] => Pixel::color(*red as f64, *green as f64, *blue as f64),
                [value, ..] => Pixel::Grayscale(*value as f64),
                [] => Pixel::Grayscale(0.0),
            }
        }));
        Ok(pixels)
    }
}
