//! Store configuration.

use tally_codec::CodecConfig;
use tally_core::Result;

/// How [`Store::save`](crate::Store::save) puts bytes on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write a sibling temp file, then rename it over the target. A failed
    /// save leaves the previous file untouched.
    ///
    /// The rename replaces the directory entry itself: if `path` is a
    /// symlink, the link is replaced by a regular file and its old target
    /// is not modified. Use [`WriteMode::Truncate`] to write through a
    /// symlink.
    #[default]
    Atomic,
    /// Truncate the target in place and write the whole record with a
    /// single `write_all`. A failure mid-write can leave a short file,
    /// which the loader rejects.
    Truncate,
}

/// Configuration for a [`Store`](crate::Store).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Write strategy for saves. Default: [`WriteMode::Atomic`].
    pub write_mode: WriteMode,
    /// Whether to `fsync` the written file before a save returns.
    /// Default: `true`.
    pub sync: bool,
    /// Decoder limits applied on load.
    pub codec: CodecConfig,
}

impl StoreConfig {
    /// Permission bits for newly created record files on unix
    /// (`rw-r--r--`, further reduced by the process umask).
    pub const RECORD_FILE_MODE: u32 = 0o644;

    /// Default configuration with the given write mode.
    pub fn with_write_mode(write_mode: WriteMode) -> Self {
        Self {
            write_mode,
            ..Self::default()
        }
    }

    /// Check every nested limit.
    pub fn validate(&self) -> Result<()> {
        self.codec.validate()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::default(),
            sync: true,
            codec: CodecConfig::default(),
        }
    }
}
