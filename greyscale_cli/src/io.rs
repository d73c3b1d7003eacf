use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use greyscale::{GreyImage, RgbImage, checked_pixel_counts};
use image_lib::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image_lib::{ColorType, ExtendedColorType, ImageDecoder, ImageEncoder};

/// Reads a binary PPM (P6) with at most 8 bits per sample.
pub(crate) fn read_ppm(path: &Path) -> Result<RgbImage> {
    let file =
        File::open(path).with_context(|| format!("Unable to open file '{}'", path.display()))?;
    let decoder = PnmDecoder::new(BufReader::new(file))
        .with_context(|| format!("Invalid PNM header in '{}'", path.display()))?;

    if !matches!(
        decoder.subtype(),
        PnmSubtype::Pixmap(SampleEncoding::Binary)
    ) {
        bail!("Format of ppm must be P6 ('{}')", path.display());
    }
    if decoder.color_type() != ColorType::Rgb8 {
        bail!(
            "Invalid maximum value in '{}': samples must fit in 8 bits",
            path.display()
        );
    }

    let (width, height) = decoder.dimensions();
    let (width, height) = (width as usize, height as usize);
    let (_, byte_count) = checked_pixel_counts(width, height)?;

    let mut bytes = vec![0u8; byte_count];
    decoder
        .read_image(&mut bytes)
        .with_context(|| format!("Error loading image data from '{}'", path.display()))?;

    Ok(RgbImage::new(width, height, bytes)?)
}

/// Writes a binary PGM (P5) with maxval 255.
pub(crate) fn write_pgm(path: &Path, image: &GreyImage) -> Result<()> {
    let width = u32::try_from(image.width()).context("image too wide for PGM")?;
    let height = u32::try_from(image.height()).context("image too tall for PGM")?;

    let file = File::create(path)
        .with_context(|| format!("Unable to open file '{}' for writing", path.display()))?;
    let mut writer = BufWriter::new(file);

    PnmEncoder::new(&mut writer)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(image.bytes(), width, height, ExtendedColorType::L8)
        .with_context(|| format!("Unable to write '{}'", path.display()))?;
    writer.flush()?;

    Ok(())
}
