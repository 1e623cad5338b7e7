//! Saving and loading records on disk.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tally_codec::{decode_exact, encode_to_vec};
use tally_core::{Buffer, Result, TallyError};
use tracing::debug;

use crate::config::{StoreConfig, WriteMode};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Save `buffer` to `path` with the default [`StoreConfig`].
pub fn save(buffer: &Buffer, path: impl AsRef<Path>) -> Result<()> {
    Store::default().save(buffer, path)
}

/// Load the record at `path` with the default [`StoreConfig`].
pub fn load(path: impl AsRef<Path>) -> Result<Buffer> {
    Store::default().load(path)
}

/// Saves and loads records according to a [`StoreConfig`].
///
/// # Examples
///
/// ```
/// use tally_store::{Store, StoreConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("fibonacci.bin");
///
/// let store = Store::new(StoreConfig::default()).unwrap();
/// let fib = tally_core::fibonacci(10).unwrap();
/// store.save(&fib, &path).unwrap();
/// assert_eq!(store.load(&path).unwrap(), fib);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Create a store, validating `config` first.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Write `buffer` to `path`, replacing whatever was there.
    ///
    /// The record is fully encoded before the file is touched.
    pub fn save(&self, buffer: &Buffer, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode_to_vec(buffer)?;
        match self.config.write_mode {
            WriteMode::Atomic => self.write_atomic(path, &bytes)?,
            WriteMode::Truncate => self.write_in_place(path, &bytes)?,
        }
        debug!(
            path = %path.display(),
            elements = buffer.len(),
            bytes = bytes.len(),
            mode = ?self.config.write_mode,
            "record saved"
        );
        Ok(())
    }

    /// Read the record at `path`.
    ///
    /// Fails with `NotFound` if the path does not exist, and with
    /// `CorruptFormat` if the file holds anything after the record.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Buffer> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TallyError::NotFound {
                path: path.to_path_buf(),
            },
            _ => TallyError::Io(e),
        })?;
        let mut reader = BufReader::new(file);
        let buffer = decode_exact(&mut reader, &self.config.codec)?;
        debug!(path = %path.display(), elements = buffer.len(), "record loaded");
        Ok(buffer)
    }

    fn write_in_place(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        set_record_mode(&mut options);
        let mut file = options.open(path)?;
        self.write_and_sync(&mut file, bytes)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        replace_atomically(path, |file| self.write_and_sync(file, bytes))
    }

    fn write_and_sync(&self, file: &mut File, bytes: &[u8]) -> Result<()> {
        file.write_all(bytes)?;
        if self.config.sync {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Create a fresh temp file next to `path`, let `fill` write it, then rename
/// it over `path`. On any failure the temp file is removed and `path` is
/// left as it was.
fn replace_atomically(
    path: &Path,
    fill: impl FnOnce(&mut File) -> Result<()>,
) -> Result<()> {
    let tmp = temp_path_next_to(path)?;

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    set_record_mode(&mut options);
    let written = options
        .open(&tmp)
        .map_err(TallyError::from)
        .and_then(|mut file| fill(&mut file));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// `.<name>.<pid>.<n>.tmp` in the same directory as `path`, so the final
/// rename never crosses a filesystem.
fn temp_path_next_to(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| TallyError::InvalidArgument {
        detail: format!("{} does not name a file", path.display()).into(),
    })?;
    let pid = std::process::id();
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    Ok(path.with_file_name(format!(
        ".{}.{pid}.{n}.tmp",
        file_name.to_string_lossy()
    )))
}

#[cfg(unix)]
fn set_record_mode(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt as _;
    options.mode(StoreConfig::RECORD_FILE_MODE);
}

#[cfg(not(unix))]
fn set_record_mode(_options: &mut OpenOptions) {}
