//! Plain-text board descriptions.
//!
//! ```text
//! 5 4
//! -----
//! --*--
//! --*--
//! --*--
//! ```
//!
//! The first line holds `width height`. Each of the next `height` lines must
//! carry at least `width` bytes; `*` marks a live cell and any other byte is
//! dead, so rows need not be valid UTF-8. Bytes past `width` and lines past
//! `height` are ignored. A trailing `\r` on any line is dropped.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::{LifeError, Result};

/// Marker for a live cell in the file format, independent of display symbols.
pub const LIVE_MARKER: u8 = b'*';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardDescription {
    pub width: usize,
    pub height: usize,
    /// Live cells as `(row, col)`, row-major order.
    pub live: Vec<(usize, usize)>,
}

impl BoardDescription {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LifeError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let desc = Self::parse_bytes(&bytes)?;
        debug!(
            "loaded {}x{} board with {} live cells from {}",
            desc.width,
            desc.height,
            desc.live.len(),
            path.display()
        );
        Ok(desc)
    }

    /// Parse a description from raw file contents.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let mut lines = bytes
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line));
        let header = lines.next().unwrap_or_default();
        let header = std::str::from_utf8(header).map_err(|err| LifeError::Format {
            line: 1,
            reason: format!("header is not text: {err}"),
        })?;
        let mut tokens = header.split_whitespace();
        let width = parse_dimension(tokens.next(), "width")?;
        let height = parse_dimension(tokens.next(), "height")?;

        let mut live = Vec::new();
        for row in 0..height {
            let line_no = row + 2;
            let line = lines.next().ok_or_else(|| LifeError::Format {
                line: line_no,
                reason: format!("expected {height} rows, found {row}"),
            })?;
            if line.len() < width {
                return Err(LifeError::Format {
                    line: line_no,
                    reason: format!("row has {} cells, expected {width}", line.len()),
                });
            }
            live.extend(
                line[..width]
                    .iter()
                    .enumerate()
                    .filter(|&(_, &cell)| cell == LIVE_MARKER)
                    .map(|(col, _)| (row, col)),
            );
        }

        Ok(Self { width, height, live })
    }
}

fn parse_dimension(token: Option<&str>, name: &str) -> Result<usize> {
    let token = token.ok_or_else(|| LifeError::Format {
        line: 1,
        reason: format!("missing {name}; expected `width height`"),
    })?;
    match token.parse::<usize>() {
        Ok(0) => Err(LifeError::Format {
            line: 1,
            reason: format!("{name} must be positive"),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(LifeError::Format {
            line: 1,
            reason: format!("invalid {name} `{token}`: {err}"),
        }),
    }
}

impl FromStr for BoardDescription {
    type Err = LifeError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse_bytes(text.as_bytes())
    }
}
