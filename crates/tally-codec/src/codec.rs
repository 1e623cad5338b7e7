//! Binary encode/decode for the record format.
//!
//! All integers are little-endian `i32`. Encoding assembles the complete
//! record in memory and hands it to the sink in one `write_all`, so a
//! failed sink never sees half a length prefix. Decoding validates the
//! length prefix before reading the payload in bounded chunks.

use std::io::{self, Read, Write};

use tally_core::error::{Result, TallyError};
use tally_core::Buffer;

use crate::config::CodecConfig;
use crate::{ELEMENT_BYTES, LEN_PREFIX_BYTES};

/// Elements decoded per read call. Bounds the memory committed before the
/// stream has proven it actually holds the declared payload.
const READ_CHUNK_ELEMENTS: usize = 4096;

// ── Primitives ──────────────────────────────────────────────────

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Read a little-endian i32.
///
/// A stream that ends before four bytes is `TruncatedInput`.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32> {
    let mut buf = [0u8; 4];
    let filled = read_full(r, &mut buf)?;
    if filled < buf.len() {
        return Err(TallyError::TruncatedInput {
            expected: buf.len(),
            actual: filled,
        });
    }
    Ok(i32::from_le_bytes(buf))
}

/// Fill `buf` from `r`, stopping early only at end of stream.
///
/// Returns how many bytes were read. Retries `Interrupted` reads; every
/// other I/O error is returned as-is.
fn read_full(r: &mut dyn Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TallyError::Io(e)),
        }
    }
    Ok(filled)
}

// ── Encode ──────────────────────────────────────────────────────

/// Size in bytes of `buffer` once encoded.
pub fn encoded_len(buffer: &Buffer) -> usize {
    LEN_PREFIX_BYTES + buffer.len() * ELEMENT_BYTES
}

/// Encode `buffer` into a freshly allocated byte vector.
pub fn encode_to_vec(buffer: &Buffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(encoded_len(buffer))
        .map_err(|_| TallyError::OutOfMemory {
            requested: buffer.len() + 1,
        })?;
    // Buffer lengths are capped at MAX_RECORD_LEN, so this never truncates.
    out.extend_from_slice(&(buffer.len() as i32).to_le_bytes());
    for v in buffer.iter() {
        out.extend_from_slice(&v.to_le_bytes());
    }
    Ok(out)
}

/// Encode `buffer` to `w` as one length-prefixed record.
pub fn encode_record(w: &mut dyn Write, buffer: &Buffer) -> Result<()> {
    let bytes = encode_to_vec(buffer)?;
    w.write_all(&bytes)?;
    Ok(())
}

// ── Decode ──────────────────────────────────────────────────────

/// Decode one record from `r` with the default [`CodecConfig`].
///
/// Bytes after the record are left unread.
pub fn decode_record(r: &mut dyn Read) -> Result<Buffer> {
    decode_record_with(r, &CodecConfig::default())
}

/// Decode one record from `r`, enforcing `config`'s limits.
///
/// Fails with `TruncatedInput` when the stream ends inside the length
/// prefix or the payload, and with `CorruptFormat` when the length prefix
/// is negative or above `config.max_elements`.
pub fn decode_record_with(r: &mut dyn Read, config: &CodecConfig) -> Result<Buffer> {
    let mut prefix = [0u8; LEN_PREFIX_BYTES];
    let filled = read_full(r, &mut prefix)?;
    if filled < LEN_PREFIX_BYTES {
        return Err(TallyError::TruncatedInput {
            expected: LEN_PREFIX_BYTES,
            actual: filled,
        });
    }

    let declared = i32::from_le_bytes(prefix);
    if declared < 0 {
        return Err(TallyError::CorruptFormat {
            detail: format!("negative record length {declared}").into(),
        });
    }
    let len = declared as usize;
    if len > config.max_elements as usize {
        return Err(TallyError::CorruptFormat {
            detail: format!(
                "record length {len} exceeds limit of {} elements",
                config.max_elements
            )
            .into(),
        });
    }
    let expected = len
        .checked_mul(ELEMENT_BYTES)
        .and_then(|payload| payload.checked_add(LEN_PREFIX_BYTES))
        .ok_or_else(|| TallyError::CorruptFormat {
            detail: format!("record length {len} overflows the address space").into(),
        })?;

    let mut data: Vec<i32> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_ELEMENTS * ELEMENT_BYTES];
    while data.len() < len {
        let want = (len - data.len()).min(READ_CHUNK_ELEMENTS);
        let bytes = &mut chunk[..want * ELEMENT_BYTES];
        let got = read_full(r, bytes)?;
        if got < bytes.len() {
            return Err(TallyError::TruncatedInput {
                expected,
                actual: LEN_PREFIX_BYTES + data.len() * ELEMENT_BYTES + got,
            });
        }
        data.try_reserve(want)
            .map_err(|_| TallyError::OutOfMemory { requested: len })?;
        data.extend(
            bytes
                .chunks_exact(ELEMENT_BYTES)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        );
    }

    Buffer::from_vec(data)
}

/// Decode one record and require the stream to end right after it.
///
/// Trailing bytes are `CorruptFormat`: a record file holds exactly one
/// record and nothing else.
pub fn decode_exact(r: &mut dyn Read, config: &CodecConfig) -> Result<Buffer> {
    let buffer = decode_record_with(r, config)?;
    let mut probe = [0u8; 1];
    if read_full(r, &mut probe)? != 0 {
        return Err(TallyError::CorruptFormat {
            detail: format!(
                "trailing bytes after record of {} elements",
                buffer.len()
            )
            .into(),
        });
    }
    Ok(buffer)
}

/// Decode a complete record held in memory.
///
/// Like [`decode_exact`] with the default config, but reports how many
/// trailing bytes were found.
pub fn decode_from_slice(bytes: &[u8]) -> Result<Buffer> {
    let mut cursor = bytes;
    let buffer = decode_record_with(&mut cursor, &CodecConfig::default())?;
    if !cursor.is_empty() {
        return Err(TallyError::CorruptFormat {
            detail: format!("{} trailing bytes after record", cursor.len()).into(),
        });
    }
    Ok(buffer)
}
