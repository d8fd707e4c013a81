//! Binary framing of requests and frames for hosts that cannot hand
//! ownership of Rust values across the transport.
//!
//! Every message starts with a one-byte kind tag. Integers and floats are
//! little-endian; `usize` values travel as `u64`; float buffers carry a
//! `u32` element count.
//!
//! ```text
//! Init         01 | tile_rows u32 | tile_cols u32 | cell_rows u64 | cell_cols u64
//!                 | min f32 | max f32 | has_damping u8 [| damping f32]
//!                 | template (u32 len, f32 * len)
//! Disturb      02 | tile_row u32 | tile_col u32 | cell u64
//! Reset        03
//! ReadyForNext 04
//! Frame        81 | frame u64 | tiles u32 | positions (u32 len, f32 * len) * tiles
//!                 | colors (u32 len, f32 * len) * tiles
//! ```

use std::error::Error;
use std::fmt;
use std::io::{self, Read};

use ripple_core::{FrameId, TileId};

use crate::protocol::{FrameResult, InitParams, Request};

const TAG_INIT: u8 = 0x01;
const TAG_DISTURB: u8 = 0x02;
const TAG_RESET: u8 = 0x03;
const TAG_READY: u8 = 0x04;
const TAG_FRAME: u8 = 0x81;

/// Errors from decoding a framed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before the message did.
    Truncated,
    /// The leading kind tag is not one this codec knows.
    UnknownKind {
        /// The tag byte that was read.
        tag: u8,
    },
    /// The bytes parse but describe an impossible message.
    Malformed {
        /// What was wrong.
        detail: String,
    },
    /// A buffer or tile list is too long for its `u32` length prefix.
    TooLong {
        /// The length that did not fit.
        len: usize,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "message truncated"),
            Self::UnknownKind { tag } => write!(f, "unknown message kind {tag:#04x}"),
            Self::Malformed { detail } => write!(f, "malformed message: {detail}"),
            Self::TooLong { len } => write!(f, "length {len} does not fit a u32 prefix"),
        }
    }
}

impl Error for CodecError {}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Malformed {
                detail: e.to_string(),
            }
        }
    }
}

// ── Writers ─────────────────────────────────────────────────────

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn len_prefix(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::TooLong { len })
}

fn put_f32_slice(buf: &mut Vec<u8>, values: &[f32]) -> Result<(), CodecError> {
    put_u32(buf, len_prefix(values.len())?);
    buf.reserve(values.len() * 4);
    for &v in values {
        put_f32(buf, v);
    }
    Ok(())
}

// ── Readers ─────────────────────────────────────────────────────

fn read_u8(r: &mut &[u8]) -> Result<u8, CodecError> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)?;
    Ok(b[0])
}

fn read_u32(r: &mut &[u8]) -> Result<u32, CodecError> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

fn read_u64(r: &mut &[u8]) -> Result<u64, CodecError> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b)?;
    Ok(u64::from_le_bytes(b))
}

fn read_usize(r: &mut &[u8], what: &str) -> Result<usize, CodecError> {
    let v = read_u64(r)?;
    usize::try_from(v).map_err(|_| CodecError::Malformed {
        detail: format!("{what} {v} does not fit in usize"),
    })
}

fn read_f32(r: &mut &[u8]) -> Result<f32, CodecError> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(f32::from_le_bytes(b))
}

/// Length-prefixed float buffer. The length is checked against the bytes
/// remaining before anything is allocated.
fn read_f32_vec(r: &mut &[u8]) -> Result<Vec<f32>, CodecError> {
    let len = read_u32(r)? as usize;
    if len > r.len() / 4 {
        return Err(CodecError::Truncated);
    }
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(read_f32(r)?);
    }
    Ok(out)
}

fn expect_end(r: &[u8]) -> Result<(), CodecError> {
    if r.is_empty() {
        Ok(())
    } else {
        Err(CodecError::Malformed {
            detail: format!("{} trailing bytes", r.len()),
        })
    }
}

// ── Requests ────────────────────────────────────────────────────

/// Encode a request into a fresh buffer.
///
/// Fails only if the `Init` template is longer than `u32::MAX` cells.
pub fn encode_request(request: &Request) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    match request {
        Request::Init(p) => {
            buf.push(TAG_INIT);
            put_u32(&mut buf, p.tile_rows);
            put_u32(&mut buf, p.tile_cols);
            put_u64(&mut buf, p.cells_per_tile_row as u64);
            put_u64(&mut buf, p.cells_per_tile_col as u64);
            put_f32(&mut buf, p.min_depth);
            put_f32(&mut buf, p.max_depth);
            match p.damping {
                Some(d) => {
                    buf.push(1);
                    put_f32(&mut buf, d);
                }
                None => buf.push(0),
            }
            put_f32_slice(&mut buf, &p.template)?;
        }
        Request::Disturb { tile, cell } => {
            buf.push(TAG_DISTURB);
            put_u32(&mut buf, tile.row);
            put_u32(&mut buf, tile.col);
            put_u64(&mut buf, *cell as u64);
        }
        Request::Reset => buf.push(TAG_RESET),
        Request::ReadyForNext => buf.push(TAG_READY),
    }
    Ok(buf)
}

/// Decode one request. The buffer must hold exactly one message.
pub fn decode_request(bytes: &[u8]) -> Result<Request, CodecError> {
    let mut r = bytes;
    let request = match read_u8(&mut r)? {
        TAG_INIT => {
            let tile_rows = read_u32(&mut r)?;
            let tile_cols = read_u32(&mut r)?;
            let cells_per_tile_row = read_usize(&mut r, "cells_per_tile_row")?;
            let cells_per_tile_col = read_usize(&mut r, "cells_per_tile_col")?;
            let min_depth = read_f32(&mut r)?;
            let max_depth = read_f32(&mut r)?;
            let damping = match read_u8(&mut r)? {
                0 => None,
                1 => Some(read_f32(&mut r)?),
                other => {
                    return Err(CodecError::Malformed {
                        detail: format!("damping flag {other}"),
                    })
                }
            };
            let template = read_f32_vec(&mut r)?;
            Request::Init(InitParams {
                tile_rows,
                tile_cols,
                cells_per_tile_row,
                cells_per_tile_col,
                min_depth,
                max_depth,
                damping,
                template,
            })
        }
        TAG_DISTURB => {
            let row = read_u32(&mut r)?;
            let col = read_u32(&mut r)?;
            let cell = read_usize(&mut r, "cell")?;
            Request::Disturb {
                tile: TileId::new(row, col),
                cell,
            }
        }
        TAG_RESET => Request::Reset,
        TAG_READY => Request::ReadyForNext,
        tag => return Err(CodecError::UnknownKind { tag }),
    };
    expect_end(r)?;
    Ok(request)
}

// ── Frames ──────────────────────────────────────────────────────

/// Encode a frame into a fresh buffer.
///
/// Fails if the tile count or any buffer exceeds `u32::MAX` entries.
pub fn encode_frame(frame: &FrameResult) -> Result<Vec<u8>, CodecError> {
    let floats: usize = frame
        .positions
        .iter()
        .chain(&frame.colors)
        .map(Vec::len)
        .sum();
    let mut buf = Vec::with_capacity(13 + 8 * frame.tile_count() + 4 * floats);
    buf.push(TAG_FRAME);
    put_u64(&mut buf, frame.frame.0);
    put_u32(&mut buf, len_prefix(frame.tile_count())?);
    for p in &frame.positions {
        put_f32_slice(&mut buf, p)?;
    }
    for c in &frame.colors {
        put_f32_slice(&mut buf, c)?;
    }
    Ok(buf)
}

/// Decode one frame. The buffer must hold exactly one message.
pub fn decode_frame(bytes: &[u8]) -> Result<FrameResult, CodecError> {
    let mut r = bytes;
    let tag = read_u8(&mut r)?;
    if tag != TAG_FRAME {
        return Err(CodecError::UnknownKind { tag });
    }
    let frame = FrameId(read_u64(&mut r)?);
    let tiles = read_u32(&mut r)? as usize;
    // Each tile needs at least two length prefixes.
    if tiles > r.len() / 8 {
        return Err(CodecError::Truncated);
    }
    let positions = (0..tiles)
        .map(|_| read_f32_vec(&mut r))
        .collect::<Result<Vec<_>, _>>()?;
    let colors = (0..tiles)
        .map(|_| read_f32_vec(&mut r))
        .collect::<Result<Vec<_>, _>>()?;
    expect_end(r)?;
    Ok(FrameResult {
        frame,
        positions,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() -> Request {
        Request::Init(InitParams {
            tile_rows: 2,
            tile_cols: 3,
            cells_per_tile_row: 2,
            cells_per_tile_col: 2,
            min_depth: -1.0,
            max_depth: 1.0,
            damping: None,
            template: vec![0.0, 0.25, -0.25, 0.5],
        })
    }

    #[test]
    fn every_request_kind_survives_framing() {
        let requests = [
            init(),
            Request::Disturb {
                tile: TileId::new(1, 2),
                cell: 3,
            },
            Request::Reset,
            Request::ReadyForNext,
        ];
        for req in requests {
            assert_eq!(decode_request(&encode_request(&req).unwrap()), Ok(req));
        }
    }

    #[test]
    fn frame_survives_framing() {
        let frame = FrameResult {
            frame: FrameId(7),
            positions: vec![vec![0.5, -0.5], vec![0.0, 1.0]],
            colors: vec![vec![0.75; 6], vec![0.5; 6]],
        };
        assert_eq!(decode_frame(&encode_frame(&frame).unwrap()), Ok(frame));
    }

    #[test]
    fn unknown_tag_is_reported() {
        assert_eq!(
            decode_request(&[0x7f, 1, 2, 3]),
            Err(CodecError::UnknownKind { tag: 0x7f })
        );
        assert_eq!(
            decode_frame(&encode_request(&Request::Reset).unwrap()),
            Err(CodecError::UnknownKind { tag: TAG_RESET })
        );
    }

    #[test]
    fn truncation_is_detected() {
        let bytes = encode_request(&init()).unwrap();
        for cut in [0, 1, 5, bytes.len() - 1] {
            assert_eq!(decode_request(&bytes[..cut]), Err(CodecError::Truncated));
        }
    }

    #[test]
    fn oversized_length_prefix_does_not_allocate() {
        let mut bytes = vec![TAG_FRAME];
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(decode_frame(&bytes), Err(CodecError::Truncated));
    }

    #[test]
    fn length_prefixes_refuse_to_truncate() {
        assert_eq!(len_prefix(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        {
            let len = u32::MAX as usize + 1;
            assert_eq!(len_prefix(len), Err(CodecError::TooLong { len }));
        }
    }

    #[test]
    fn trailing_bytes_are_malformed() {
        let mut bytes = encode_request(&Request::ReadyForNext).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode_request(&bytes),
            Err(CodecError::Malformed { .. })
        ));
    }

    #[test]
    fn bad_damping_flag_is_malformed() {
        let mut bytes = encode_request(&init()).unwrap();
        // tag + 2 * u32 + 2 * u64 + 2 * f32
        bytes[1 + 8 + 16 + 8] = 9;
        assert!(matches!(
            decode_request(&bytes),
            Err(CodecError::Malformed { .. })
        ));
    }
}
