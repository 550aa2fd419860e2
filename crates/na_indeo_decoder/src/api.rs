//! Public library API.

use std::fmt;
use std::str::FromStr;

use crate::decoder::{DecodedFrame, IviDecoder};
use crate::error::{DecoderError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndeoVersion {
    Indeo4,
    Indeo5,
}

impl IndeoVersion {
    pub fn fourcc(self) -> &'static str {
        match self {
            IndeoVersion::Indeo4 => "IV41",
            IndeoVersion::Indeo5 => "IV50",
        }
    }
}

impl fmt::Display for IndeoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fourcc())
    }
}

impl FromStr for IndeoVersion {
    type Err = DecoderError;

    /// Accepts a FourCC (`IV41`, `IV50`) or a bare version number.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IV41" | "4" => Ok(IndeoVersion::Indeo4),
            "IV50" | "5" => Ok(IndeoVersion::Indeo5),
            other => Err(DecoderError::InvalidData(format!("unknown Indeo version '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub version: IndeoVersion,
    /// Picture size announced by the container. Indeo 4 streams carry
    /// their own size in every picture header.
    pub width:   u32,
    pub height:  u32,
}

/// Outcome of [`IndeoDecoder::decode_frame`].
#[derive(Clone, Copy, Debug)]
pub enum FrameOutput<'a> {
    Picture(&'a DecodedFrame),
    /// The frame carries no new picture; keep showing the previous one.
    RepeatPrevious,
}

/// Indeo Video Interactive 4/5 decoder.
///
/// Frames must be fed in stream order, one compressed payload per call.
pub struct IndeoDecoder {
    config: DecoderConfig,
    inner:  IviDecoder,
    cur:    Option<DecodedFrame>,
}

impl IndeoDecoder {
    pub fn new(config: DecoderConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(DecoderError::InvalidData(format!(
                "picture size {}x{}",
                config.width, config.height
            )));
        }
        let inner = match config.version {
            IndeoVersion::Indeo4 => IviDecoder::indeo4(),
            IndeoVersion::Indeo5 => IviDecoder::indeo5(config.width as usize, config.height as usize)?,
        };
        Ok(IndeoDecoder { config, inner, cur: None })
    }

    pub fn version(&self) -> IndeoVersion {
        self.config.version
    }

    /// Width of the last decoded picture, or the configured width.
    pub fn width(&self) -> u32 {
        self.cur.as_ref().map_or(self.config.width, |f| f.frame.width)
    }

    pub fn height(&self) -> u32 {
        self.cur.as_ref().map_or(self.config.height, |f| f.frame.height)
    }

    /// Borrow the last picture produced.
    ///
    /// The returned reference stays valid until the next successful decode.
    pub fn current_frame(&self) -> Option<&DecodedFrame> {
        self.cur.as_ref()
    }

    /// Decode one compressed frame payload.
    ///
    /// On error the previously returned picture is kept and the decoder can
    /// be fed the next frame.
    pub fn decode_frame(&mut self, data: &[u8]) -> Result<FrameOutput<'_>> {
        if data.is_empty() {
            return Err(DecoderError::BitstreamExhausted);
        }
        match self.inner.decode_frame(data)? {
            Some(frame) => {
                let cur = self.cur.insert(frame);
                Ok(FrameOutput::Picture(cur))
            }
            None => Ok(FrameOutput::RepeatPrevious),
        }
    }

    /// Decode and return an owned copy of the new picture.
    pub fn decode_frame_owned(&mut self, data: &[u8]) -> Result<Option<DecodedFrame>> {
        match self.decode_frame(data)? {
            FrameOutput::Picture(f) => Ok(Some(f.clone())),
            FrameOutput::RepeatPrevious => Ok(None),
        }
    }
}
