//! Reading and writing JSON files, zstd-compressed when the path ends with `.zst`.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

const ZSTD_LEVEL: i32 = 19;

fn is_zstd(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "zst")
}

/// Opens a file for reading, decompressing it if needed.
pub fn open_reader<P>(path: P) -> Result<Box<dyn Read>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let f = File::open(path)?;
    if is_zstd(path) {
        Ok(Box::new(zstd::Decoder::new(f)?))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

/// Sibling of `path` receiving the content until it is complete.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file<F>(path: &Path, compress: bool, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let f = File::create(path)?;
    if compress {
        let mut wtr = zstd::Encoder::new(f, ZSTD_LEVEL)?;
        write(&mut wtr)?;
        wtr.finish()?.flush()?;
    } else {
        let mut wtr = BufWriter::new(f);
        write(&mut wtr)?;
        wtr.flush()?;
    }
    Ok(())
}

/// Creates a file, passes a writer to `write`, and flushes it.
///
/// The file is compressed if needed. The content is written to a temporary sibling that is
/// renamed to `path` on success, so a failure leaves any existing file at `path` untouched.
pub fn write_with<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let partial = partial_path(path);
    let result = write_file(&partial, is_zstd(path), write)
        .and_then(|()| fs::rename(&partial, path).map_err(Into::into));
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

/// Reads a JSON file.
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let rdr = open_reader(path)?;
    Ok(serde_json::from_reader(rdr)?)
}

/// Writes a value as pretty-printed JSON.
pub fn write_json<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    write_with(path, |wtr| {
        serde_json::to_writer_pretty(&mut *wtr, value)?;
        writeln!(wtr)?;
        Ok(())
    })
}
