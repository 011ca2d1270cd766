//! Intensity histograms and histogram equalization for grayscale rasters.

use super::{channel_to_byte, clamp_channel, Pixel, Raster, MAX_PIXEL_VALUE};
use crate::error::Error;

pub const INTENSITY_LEVELS: usize = 256;

/// Buckets scaled above this are printed without their marker run.
pub const MARKER_RUN_LIMIT: usize = 10_000;

const MARKER: char = '*';

/// How many pixels have each rounded intensity.
pub struct FrequencyTable {
    frequencies: [usize; INTENSITY_LEVELS],
    total: usize,
}

impl FrequencyTable {
    pub fn of(raster: &Raster) -> Self {
        let mut frequencies = [0; INTENSITY_LEVELS];
        for pixel in raster.pixels() {
            if let Pixel::Grayscale(value) = *pixel {
                frequencies[channel_to_byte(value) as usize] += 1;
            }
        }
        Self {
            frequencies,
            total: raster.pixels().len(),
        }
    }

    pub fn frequency(&self, intensity: u8) -> usize {
        self.frequencies[intensity as usize]
    }

    /// Maps every intensity to `255 * cumulative / total`.
    pub fn equalization_table(&self) -> [f64; INTENSITY_LEVELS] {
        let mut table = [0.0; INTENSITY_LEVELS];
        let mut cumulative = 0;
        for (entry, frequency) in table.iter_mut().zip(self.frequencies.iter()) {
            cumulative += frequency;
            *entry = clamp_channel(MAX_PIXEL_VALUE * cumulative as f64 / self.total as f64);
        }
        table
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Histogram {
    buckets: Vec<usize>,
}

impl Histogram {
    /// Folds the 256 intensities into `bins` buckets and scales the tallest
    /// bucket to `max_val`.
    pub fn new(raster: &Raster, max_val: usize, bins: usize) -> crate::Result<Self> {
        raster.require_grayscale()?;
        if bins == 0 {
            return Err(Error::InvalidHistogramParam);
        }

        let frequencies = FrequencyTable::of(raster);
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bins)
            .map_err(|_| Error::OperationFailed)?;
        buckets.resize(bins, 0);
        for intensity in 0..INTENSITY_LEVELS {
            buckets[intensity * bins / INTENSITY_LEVELS] += frequencies.frequency(intensity as u8);
        }

        let tallest = buckets.iter().copied().max().unwrap_or(0);
        if tallest > 0 {
            for count in buckets.iter_mut() {
                *count = (*count as u128 * max_val as u128 / tallest as u128) as usize;
            }
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    pub fn lines(&self) -> Vec<String> {
        self.buckets
            .iter()
            .map(|&count| {
                if count > MARKER_RUN_LIMIT {
                    format!("{}\t|\t", count)
                } else {
                    let markers: String = std::iter::repeat(MARKER).take(count).collect();
                    format!("{}\t|\t{}", count, markers)
                }
            })
            .collect()
    }
}

/// Two passes: the frequency table is taken from the untouched image and
/// only read while the pixels are rewritten.
pub fn equalize(raster: &mut Raster) -> crate::Result<()> {
    raster.require_grayscale()?;
    let table = FrequencyTable::of(raster).equalization_table();

    let mut brightest = 0.0_f64;
    for pixel in raster.pixels_mut() {
        if let Pixel::Grayscale(value) = pixel {
            *value = table[channel_to_byte(*value) as usize];
            brightest = brightest.max(*value);
        }
    }
    raster.raise_max_val(brightest);
    Ok(())
}
