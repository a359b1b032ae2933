//! SHA-256 file fingerprinting with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] reads a file in fixed-size chunks and feeds each chunk into a
//! running SHA-256 state, so peak memory stays at one chunk no matter how
//! large the file is. The resulting [`Fingerprint`] is an opaque grouping key
//! rendered as 64 lowercase hexadecimal characters.
//!
//! # Example
//!
//! ```no_run
//! use hashdupe::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! match hasher.fingerprint(Path::new("photo.jpg")) {
//!     Ok(hashed) => println!("{} ({} bytes)", hashed.fingerprint, hashed.bytes_read),
//!     Err(e) => eprintln!("Warning: {e}"),
//! }
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::ReadError;

/// Default read chunk size (64 KiB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk size accepted by [`Hasher::with_chunk_size`].
pub const MIN_CHUNK_SIZE: usize = 4 * 1024;

/// SHA-256 digest of a file's full content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Wrap a raw digest.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal form (64 characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Outcome of fingerprinting one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hashed {
    /// Digest of everything read
    pub fingerprint: Fingerprint,
    /// Bytes actually fed to the digest
    pub bytes_read: u64,
}

/// Streaming content hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher that reads [`CHUNK_SIZE`] bytes at a time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Use a custom chunk size, clamped to at least [`MIN_CHUNK_SIZE`].
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(MIN_CHUNK_SIZE);
        self
    }

    /// Configured chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fingerprint the file at `path`.
    ///
    /// Zero-byte files are valid input and yield the digest of empty input.
    /// The byte count is what was read, which can differ from the size seen
    /// at discovery if the file changed in between.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] naming the path if the file cannot be opened
    /// or a read fails part way through.
    pub fn fingerprint(&self, path: &Path) -> Result<Hashed, ReadError> {
        let file =
            File::open(path).map_err(|e| ReadError::from_io(path.to_path_buf(), e))?;

        self.fingerprint_reader(file)
            .map_err(|e| ReadError::from_io(path.to_path_buf(), e))
    }

    /// Fingerprint everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates the first non-`Interrupted` I/O error from the reader.
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> io::Result<Hashed> {
        let mut state = Sha256::new();
        let mut buffer = vec![0u8; self.chunk_size];
        let mut bytes_read = 0u64;

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
            bytes_read += n as u64;
        }

        Ok(Hashed {
            fingerprint: Fingerprint(state.finalize().into()),
            bytes_read,
        })
    }
}
