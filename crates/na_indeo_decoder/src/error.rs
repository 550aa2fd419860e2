use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecoderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bitstream exhausted")]
    BitstreamExhausted,

    #[error("Invalid start code")]
    InvalidStartCode,

    #[error("Invalid frame type")]
    InvalidFrameType,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid Huffman descriptor")]
    InvalidHuffmanDescriptor,

    #[error("Band sequence mismatch: expected plane {exp_plane} band {exp_band}, got plane {plane} band {band}")]
    BandSequenceMismatch {
        exp_plane: usize,
        exp_band:  usize,
        plane:     usize,
        band:      usize,
    },

    #[error("Corrupt macroblock data")]
    CorruptMacroblockData,

    #[error("Corrupt motion vector")]
    CorruptMotionVector,

    #[error("Corrupt tile data")]
    CorruptTileData,

    #[error("Out of memory")]
    OutOfMemory,

    #[error("Missing reference")]
    MissingReference,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, DecoderError>;
