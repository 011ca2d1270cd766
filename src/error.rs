use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidCommand,
    LoadFailed(String),
    InvalidCoordSet,
    NoImageLoaded,
    SelectionNotSquare,
    UnsupportedRotationAngle,
    ColorImageRequired,
    GrayscaleImageRequired,
    InvalidApplyParam,
    InvalidHistogramParam,
    InvalidFunctionArgs,
    OperationFailed,
    NetpbmFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    UnsupportedMagicWord(String),
    HeaderValueOutOfRange(&'static str, i64),
    TruncatedPixelData(usize),
    FailedToReadImageData(std::io::Error),
    UnableToAllocatePixels(usize),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteHeader(std::io::Error),
    FailedToWritePixelData(std::io::Error),
    FailedToReadCommand(std::io::Error),
    FailedToWriteResponse(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommand => write!(f, "Invalid command"),
            Self::LoadFailed(path) => write!(f, "Failed to load {}", path),
            Self::InvalidCoordSet => write!(f, "Invalid set of coordinates"),
            Self::NoImageLoaded => write!(f, "No image loaded"),
            Self::SelectionNotSquare => write!(f, "The selection must be square"),
            Self::UnsupportedRotationAngle => write!(f, "Unsupported rotation angle"),
            Self::ColorImageRequired => write!(f, "Black and white image needed"),
            Self::GrayscaleImageRequired => write!(f, "Easy, Charlie Chaplin"),
            Self::InvalidApplyParam => write!(f, "APPLY parameter invalid"),
            Self::InvalidHistogramParam => write!(f, "Invalid set of parameters"),
            Self::InvalidFunctionArgs => write!(f, "Invalid function arguments"),
            Self::OperationFailed => write!(f, "Function failed"),
            Self::NetpbmFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in image file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedMagicWord(magic_word) => {
                write!(f, "Magic word '{}' is not one of P2, P3, P5, P6", magic_word)
            }
            Self::HeaderValueOutOfRange(token_name, value) => {
                write!(f, "Value {} of token '{}' is out of range", value, token_name)
            }
            Self::TruncatedPixelData(number_of_pixels_read) => {
                write!(
                    f,
                    "Pixel data ended after {} pixels, before the size provided in header",
                    number_of_pixels_read
                )
            }
            Self::FailedToReadImageData(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::UnableToAllocatePixels(number_of_pixels) => {
                write!(f, "Unable to allocate storage for {} pixels", number_of_pixels)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteHeader(error) => write!(f, "Failed to write image header: {}", error),
            Self::FailedToWritePixelData(error) => {
                write!(f, "Failed to write pixel data: {}", error)
            }
            Self::FailedToReadCommand(error) => write!(f, "Failed to read command: {}", error),
            Self::FailedToWriteResponse(error) => {
                write!(f, "Failed to write command response: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn session_messages_match_command_protocol() {
        assert_eq!(Error::InvalidCommand.to_string(), "Invalid command");
        assert_eq!(
            Error::LoadFailed("photo.ppm".to_owned()).to_string(),
            "Failed to load photo.ppm"
        );
        assert_eq!(Error::ColorImageRequired.to_string(), "Black and white image needed");
        assert_eq!(Error::GrayscaleImageRequired.to_string(), "Easy, Charlie Chaplin");
        assert_eq!(Error::OperationFailed.to_string(), "Function failed");
    }
}
