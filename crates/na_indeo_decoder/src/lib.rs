//! Indeo Video Interactive 4 (IV41) and 5 (IV50) decoding library.
//!
//! Frames are fed one compressed payload at a time through [`IndeoDecoder`];
//! pictures come out as planar YUV 4:1:0.

pub mod bitreader;
pub mod block;
pub mod buffers;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod indeo4;
pub mod indeo4_tables;
pub mod indeo5;
pub mod indeo5_tables;
pub mod ivi_tables;
pub mod mc;
pub mod plane;
pub mod recompose;
pub mod rvmap;
pub mod transform;
pub mod vlc;

pub mod api;

pub use api::{DecoderConfig, FrameOutput, IndeoDecoder, IndeoVersion};
pub use decoder::{DecodedFrame, YuvFrame};
pub use error::{DecoderError, Result};

#[cfg(feature = "ffi")]
pub mod ffi;
