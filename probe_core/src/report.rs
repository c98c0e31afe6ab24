//! Report writer: medians plus raw data as a delimited text file.

use crate::error::ProbeError;
use crate::series::SampleSeries;
use crate::summary::PositionMedians;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Build the report path as `<dir>/<base>_<metadata>.csv`.
///
/// The `_` separator is kept even for empty metadata, matching the file
/// naming the downstream analysis scripts expect.
pub fn output_file_path(dir: &Path, base: &str, metadata: &str) -> PathBuf {
    dir.join(format!("{base}_{metadata}.csv"))
}

/// Write medians and raw samples to `path`, overwriting unconditionally.
///
/// Layout:
/// ```text
/// DATA MEDIANS:
/// Med X,<x>
/// Med Y,<y>
/// Med Z,<z>
///
/// RAW DATA:
/// Point Index, X Pos, Y Pos, Z Pos
/// <index>,<x>,<y>,<z>
/// ```
/// Values carry six fixed decimals; raw rows are indexed from 0 in
/// insertion order. I/O failures propagate to the caller.
pub fn write_report(
    path: &Path,
    medians: &PositionMedians,
    series: &SampleSeries,
) -> Result<(), ProbeError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "DATA MEDIANS:")?;
    writeln!(w, "Med X,{:.6}", medians.x)?;
    writeln!(w, "Med Y,{:.6}", medians.y)?;
    writeln!(w, "Med Z,{:.6}", medians.z)?;
    writeln!(w)?;
    writeln!(w, "RAW DATA:")?;
    writeln!(w, "Point Index, X Pos, Y Pos, Z Pos")?;
    for (index, (x, y, z)) in series.points().enumerate() {
        writeln!(w, "{index},{x:.6},{y:.6},{z:.6}")?;
    }
    w.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
