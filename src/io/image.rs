//! Raster file decoding and encoding with extension-based dispatch

use crate::io::error::{Result, WfcError};
use crate::raster::Raster;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Quality used for `.jpg` exports
const JPEG_QUALITY: u8 = 100;

/// Decode a raster from a file, preserving the decoded component count
///
/// 8-bit grayscale, grayscale-alpha, RGB, and RGBA map to 1 to 4 components;
/// deeper formats are narrowed to 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a decodable image
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path_buf = path.as_ref().to_path_buf();
    let decoded = image::open(&path_buf).map_err(|e| WfcError::ImageLoad {
        path: path_buf,
        source: e,
    })?;

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let (component_cnt, bytes) = match decoded {
        DynamicImage::ImageLuma8(buffer) => (1, buffer.into_raw()),
        DynamicImage::ImageLumaA8(buffer) => (2, buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => (3, buffer.into_raw()),
        DynamicImage::ImageRgba8(buffer) => (4, buffer.into_raw()),
        other => (4, other.to_rgba8().into_raw()),
    };

    Raster::from_raw(width, height, component_cnt, bytes)
}

/// Encode a raster to the format named by the file extension
///
/// Supported, case-insensitive: `.png`, `.bmp`, `.tga`, `.jpg`.
///
/// # Errors
///
/// Returns an error for an unknown extension or when the encoder rejects the
/// raster (e.g. a component count the format cannot carry)
pub fn save_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let format = match extension.as_deref() {
        Some("png") => ImageFormat::Png,
        Some("bmp") => ImageFormat::Bmp,
        Some("tga") => ImageFormat::Tga,
        Some("jpg") => return save_jpeg(raster, path),
        _ => {
            return Err(WfcError::UnknownFormat {
                path: path.to_path_buf(),
            });
        }
    };

    image::save_buffer_with_format(
        path,
        &raster.to_bytes(),
        raster.width() as u32,
        raster.height() as u32,
        color_type(raster.component_cnt()),
        format,
    )
    .map_err(|e| WfcError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

fn save_jpeg(raster: &Raster, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| WfcError::ImageExport {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    })?;

    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder
        .encode(
            &raster.to_bytes(),
            raster.width() as u32,
            raster.height() as u32,
            color_type(raster.component_cnt()),
        )
        .map_err(|e| WfcError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

const fn color_type(component_cnt: usize) -> ExtendedColorType {
    match component_cnt {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        _ => ExtendedColorType::Rgba8,
    }
}
