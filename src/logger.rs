use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use crate::image::Raster;

const LOG_CONFIG_FILE: &str = "log4rs.yaml";
const STDERR_APPENDER_NAME: &str = "stderr";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    match fallback_config() {
        Ok(config) => {
            if let Err(error) = log4rs::init_config(config) {
                eprintln!("Unable to install fallback logger: {}", error);
            }
        }
        Err(errors) => eprintln!("Fallback logger configuration is invalid: {}", errors),
    }
}

// stdout carries the session protocol, so the fallback only writes to stderr
fn fallback_config() -> Result<Config, ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {l} {t} - {m}{n}")))
        .build();
    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER_NAME, Box::new(stderr)))
        .build(
            Root::builder()
                .appender(STDERR_APPENDER_NAME)
                .build(LevelFilter::Warn),
        )
}

pub fn log_raster(context: &str, raster: &Raster) {
    let selection = raster.selection();
    log::debug!(
        "{}: {} {}x{} max {} selection ({}, {})..({}, {})",
        context,
        raster.format().magic_word(),
        raster.width(),
        raster.height(),
        raster.max_val(),
        selection.upper_left.x,
        selection.upper_left.y,
        selection.lower_right.x,
        selection.lower_right.y
    );
}
