//! ASCII grid codec
//!
//! The textual grid format used both as the decode intermediate and as the
//! output format: six `key value` header lines (`ncols`, `nrows`,
//! `xllcorner`, `yllcorner`, `cellsize`, `NODATA_value`), followed by
//! `nrows` lines of `ncols` whitespace-separated numbers, row-major,
//! northernmost row first.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::{DirectionGrid, ElevationSurface, GridHeader};

/// Number of header lines in the ASCII grid format
pub const HEADER_SIZE: usize = 6;

/// Header keys, in file order
const HEADER_KEYS: [&str; HEADER_SIZE] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "NODATA_value",
];

/// Read an ASCII grid file into an [`ElevationSurface`].
pub fn read_surface<P: AsRef<Path>>(path: P) -> Result<ElevationSurface> {
    let file = File::open(path)?;
    read_from(BufReader::new(file))
}

/// Parse an ASCII grid from any buffered reader.
pub(crate) fn read_from<R: BufRead>(reader: R) -> Result<ElevationSurface> {
    let mut lines = reader.lines();

    let mut header_lines = Vec::with_capacity(HEADER_SIZE);
    for line in lines.by_ref() {
        header_lines.push(line?);
        if header_lines.len() == HEADER_SIZE {
            break;
        }
    }
    if header_lines.len() < HEADER_SIZE {
        return Err(Error::HeaderTooShort {
            expected: HEADER_SIZE,
            found: header_lines.len(),
        });
    }

    let header = parse_header(&header_lines)?;
    let (nrows, ncols) = header.shape();

    let mut data = Vec::with_capacity(nrows * ncols);
    let mut row_count = 0;
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            // tolerate trailing blank lines
            continue;
        }

        let before = data.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::BadDataValue {
                row: row_count,
                token: token.to_string(),
            })?;
            // `parse` accepts "nan"/"inf"; non-finite values have no
            // exact-equality representation downstream, so fold them into
            // the sentinel like the GeoTIFF path does.
            data.push(if value.is_finite() { value } else { header.nodata });
        }

        let found = data.len() - before;
        if found != ncols {
            return Err(Error::RaggedRow {
                row: row_count,
                expected: ncols,
                found,
            });
        }
        row_count += 1;
    }

    if row_count != nrows {
        return Err(Error::RowCountMismatch {
            expected: nrows,
            found: row_count,
        });
    }

    ElevationSurface::from_vec(header, data)
}

/// Extract the six header values, taking the last whitespace-delimited
/// token of each line as the value.
fn parse_header(lines: &[String]) -> Result<GridHeader> {
    let mut values = [0.0_f64; HEADER_SIZE];
    for (i, (line, key)) in lines.iter().zip(HEADER_KEYS).enumerate() {
        let token = line.split_whitespace().last().unwrap_or("");
        values[i] = match token.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                return Err(Error::BadHeaderValue {
                    line: i + 1,
                    key,
                    token: token.to_string(),
                })
            }
        };
    }

    let ncols = values[0] as usize;
    let nrows = values[1] as usize;
    if ncols == 0 || nrows == 0 {
        return Err(Error::InvalidDimensions {
            rows: nrows,
            cols: ncols,
        });
    }

    Ok(GridHeader {
        ncols,
        nrows,
        xllcorner: values[2],
        yllcorner: values[3],
        cellsize: values[4],
        nodata: values[5],
    })
}

/// Write a completed [`DirectionGrid`] to `path`, overwriting any existing
/// file.
pub fn write_grid<P: AsRef<Path>>(grid: &DirectionGrid, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_matrix(&mut writer, grid.header(), grid.rows().iter().map(Vec::as_slice))?;
    writer.flush()?;
    Ok(())
}

/// Write a header block and row data to any writer.
pub(crate) fn write_matrix<'a, W, I>(writer: &mut W, header: &GridHeader, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a [f64]>,
{
    writeln!(writer, "ncols        {}", header.ncols)?;
    writeln!(writer, "nrows        {}", header.nrows)?;
    writeln!(writer, "xllcorner    {}", header.xllcorner)?;
    writeln!(writer, "yllcorner    {}", header.yllcorner)?;
    writeln!(writer, "cellsize     {}", header.cellsize)?;
    writeln!(writer, "NODATA_value {}", header.nodata)?;

    for row in rows {
        let mut first = true;
        for value in row {
            if first {
                first = false;
            } else {
                writer.write_all(b" ")?;
            }
            write!(writer, "{}", value)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
