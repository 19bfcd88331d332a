//! GeoTIFF ingestion
//!
//! Reads a single-band GeoTIFF with the `tiff` crate and normalizes it into
//! an [`ElevationSurface`]. The raster-to-matrix conversion goes through an
//! on-disk ASCII grid intermediate held in a temporary file, which is
//! removed when the call returns, on success and on failure alike.

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::error::{Error, Result};
use crate::io::ascii;
use crate::raster::{ElevationSurface, GridHeader, OUTPUT_NODATA};

/// Read a single-band GeoTIFF at `path` into an [`ElevationSurface`].
///
/// Fails when the file cannot be opened, is not a decodable TIFF, or its
/// pixel format is unsupported.
pub fn read_elevation<P: AsRef<Path>>(path: P) -> Result<ElevationSurface> {
    let file = File::open(path.as_ref())?;
    let (header, data) = decode_band(file)?;

    // Dropping the handle deletes the intermediate on every exit path.
    let tmp = NamedTempFile::with_suffix(".asc")?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        ascii::write_matrix(&mut writer, &header, data.chunks(header.ncols))?;
        writer.flush()?;
    }

    ascii::read_surface(tmp.path())
}

/// Decode the first band of a TIFF from any `Read + Seek` source.
fn decode_band<R: Read + Seek>(reader: R) -> Result<(GridHeader, Vec<f64>)> {
    let mut decoder = Decoder::new(reader).map_err(|e| Error::Tiff(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Tiff(format!("cannot read dimensions: {}", e)))?;
    let cols = width as usize;
    let rows = height as usize;

    let nodata = read_nodata(&mut decoder).unwrap_or(OUTPUT_NODATA);
    let (xllcorner, yllcorner, cellsize) = read_georeferencing(&mut decoder, rows);

    let result = decoder
        .read_image()
        .map_err(|e| Error::Tiff(format!("cannot read image data: {}", e)))?;

    let raw: Vec<f64> = match result {
        DecodingResult::F64(buf) => buf,
        DecodingResult::F32(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::U8(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::U16(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::U32(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I8(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I16(buf) => buf.iter().map(|&v| v as f64).collect(),
        DecodingResult::I32(buf) => buf.iter().map(|&v| v as f64).collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "only integer and float single-band TIFFs are supported".to_string(),
            ))
        }
    };

    if raw.len() != rows * cols {
        return Err(Error::InvalidDimensions { rows, cols });
    }

    // NaN samples have no exact-equality representation in the textual
    // intermediate; fold them into the sentinel.
    let data = raw
        .into_iter()
        .map(|v| if v.is_finite() { v } else { nodata })
        .collect();

    let header = GridHeader {
        ncols: cols,
        nrows: rows,
        xllcorner,
        yllcorner,
        cellsize,
        nodata,
    };
    Ok((header, data))
}

/// Read the GDAL_NODATA tag, if present.
fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let text = decoder.get_tag_ascii_string(Tag::GdalNodata).ok()?;
    parse_nodata_text(&text)
}

/// Parse the GDAL_NODATA tag payload, which may carry a trailing NUL.
/// A non-finite sentinel (some writers tag "nan") is treated as absent.
fn parse_nodata_text(text: &str) -> Option<f64> {
    text.trim_end_matches('\0')
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
}

/// Derive lower-left corner and cell size from the
/// ModelPixelScale/ModelTiepoint tag pair. Untagged rasters fall back to a
/// unit grid at the origin.
fn read_georeferencing<R: Read + Seek>(decoder: &mut Decoder<R>, rows: usize) -> (f64, f64, f64) {
    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok();
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok();

    if let (Some(scale), Some(tiepoint)) = (scale, tiepoint) {
        if scale.len() >= 2 && tiepoint.len() >= 6 {
            // tiepoint: [I, J, K, X, Y, Z]; scale: [ScaleX, ScaleY, ScaleZ]
            let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
            let top_y = tiepoint[4] + tiepoint[1] * scale[1];
            let yllcorner = top_y - rows as f64 * scale[1];
            return (origin_x, yllcorner, scale[0]);
        }
    }

    (0.0, 0.0, 1.0)
}
