use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use memmap2::Mmap;

use crate::input::InputError;

/// Raw table bytes: plain files are memory-mapped, gzip files are inflated into memory.
pub enum TableBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for TableBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            TableBytes::Mapped(mmap) => &mmap[..],
            TableBytes::Owned(buf) => buf.as_slice(),
        }
    }
}

pub fn read_table_bytes(path: &Path) -> Result<TableBytes, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        let mut decoder = MultiGzDecoder::new(file);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf).map_err(|e| {
            InputError::malformed(
                &path.display().to_string(),
                format!("gzip decompression failed: {e}"),
            )
        })?;
        return Ok(TableBytes::Owned(buf));
    }

    // Mapping a zero-length file fails on some platforms.
    if file.metadata()?.len() == 0 {
        return Ok(TableBytes::Owned(Vec::new()));
    }
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(TableBytes::Mapped(mmap))
}
