//! Save file encoding using `MessagePack`.
//!
//! Any serde value can be written; sessions use this for their
//! [`SaveGame`](crate::session::SaveGame).

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use lantern_foundation::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a value to `MessagePack` bytes with named fields.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes a value from `MessagePack` bytes.
///
/// # Errors
///
/// Returns a serialization error if decoding fails.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

/// Writes a value to a file, replacing it if it exists.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or a serialization
/// error if encoding fails.
pub fn save_to_file<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(value)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;
    Ok(())
}

/// Reads a value from a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a serialization
/// error if decoding fails.
pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
    from_bytes(&bytes)
}
