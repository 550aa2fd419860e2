//! Per-version header parsing behind one trait.
//!
//! Indeo 4 and Indeo 5 share the band/tile/block machinery and differ in
//! their picture, band and macroblock headers and in how buffers rotate.
//! The version is fixed when the decoder is created.

use log::debug;

use crate::bitreader::BitReader;
use crate::block::scale_mv;
use crate::buffers::BufferRoles;
use crate::error::{DecoderError, Result};
use crate::indeo4::Indeo4Codec;
use crate::indeo5::Indeo5Codec;
use crate::plane::{init_planes, mbs_per_tile, BandDesc, MbInfo, PictureConfig, PlaneDesc, Tile, NUM_BUFS};
use crate::vlc::{HuffKind, HuffTab};

/// Stream properties reported once at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamInfo {
    pub is_scalable:  bool,
    pub uses_tiling:  bool,
    pub has_b_frames: bool,
    pub has_transp:   bool,
    pub uses_haar:    bool,
    pub uses_fullpel: bool,
    reported:         bool,
}

impl StreamInfo {
    pub fn report_once(&mut self) {
        if self.reported {
            return;
        }
        self.reported = true;
        if self.is_scalable {
            debug!("stream uses scalability mode");
        }
        if self.uses_tiling {
            debug!("stream uses local decoding (tiles)");
        }
        if self.has_b_frames {
            debug!("stream contains B-frames");
        }
        if self.has_transp {
            debug!("transparency mode is enabled");
        }
        if self.uses_haar {
            debug!("stream uses the Haar transform");
        }
        if self.uses_fullpel {
            debug!("stream uses fullpel motion vectors");
        }
    }
}

/// Picture level values the band and macroblock parsers read.
pub struct FrameParams {
    pub frame_num:  u32,
    pub data_size:  usize,
    pub checksum:   Option<u16>,
    pub mb_vlc:     HuffTab,
    pub blk_vlc:    HuffTab,
    pub rvmap_sel:  usize,
    pub in_imf:     bool,
    pub in_q:       bool,
    pub glob_quant: i32,
    pub info:       StreamInfo,
}

impl Default for FrameParams {
    fn default() -> Self {
        FrameParams {
            frame_num:  0,
            data_size:  0,
            checksum:   None,
            mb_vlc:     HuffTab::new(HuffKind::Macroblock),
            blk_vlc:    HuffTab::new(HuffKind::Block),
            rvmap_sel:  8,
            in_imf:     false,
            in_q:       false,
            glob_quant: 0,
            info:       StreamInfo::default(),
        }
    }
}

/// Geometry and band state of the stream.
#[derive(Default)]
pub struct IviContext {
    pub pic_conf: PictureConfig,
    pub planes:   Vec<PlaneDesc>,
    pub params:   FrameParams,
    /// Buffer slots holding a completely decoded picture of the current
    /// geometry. Only these may serve as motion references.
    pub decoded:  [bool; NUM_BUFS],
}

impl IviContext {
    /// Replace all planes with a fresh allocation for `conf`.
    pub fn realloc(&mut self, conf: PictureConfig, is_indeo4: bool) -> Result<()> {
        debug!(
            "allocating planes for {}x{}, tiles {}x{}, {} luma band(s)",
            conf.pic_width, conf.pic_height, conf.tile_width, conf.tile_height, conf.luma_bands
        );
        self.decoded = [false; NUM_BUFS];
        match init_planes(&conf, is_indeo4) {
            Ok(planes) => {
                self.planes = planes;
                self.pic_conf = conf;
                Ok(())
            }
            Err(e) => {
                self.planes.clear();
                self.pic_conf = PictureConfig::default();
                Err(e)
            }
        }
    }
}

pub trait IviCodec {
    fn is_indeo4(&self) -> bool;

    fn decode_picture_header(&mut self, ctx: &mut IviContext, br: &mut BitReader<'_>) -> Result<()>;

    fn decode_band_header(
        &mut self,
        params: &mut FrameParams,
        band: &mut BandDesc,
        br: &mut BitReader<'_>,
    ) -> Result<()>;

    fn decode_mb_info(
        &self,
        params: &FrameParams,
        band: &BandDesc,
        tile: &mut Tile,
        ref_mbs: Option<&[MbInfo]>,
        mv_scale: i32,
        br: &mut BitReader<'_>,
    ) -> Result<()>;

    fn switch_buffers(&mut self);

    fn roles(&self) -> BufferRoles;

    fn is_nonnull_frame(&self) -> bool;

    fn is_intra_frame(&self) -> bool;

    /// Motion references are swapped and a second one is bound.
    fn is_bidir_frame(&self) -> bool {
        false
    }

    /// The frame only asks for the picture buffered with the previous one.
    fn is_deferred_output(&self) -> bool {
        false
    }

    fn gop_invalid(&self) -> bool {
        false
    }

    fn is_protected(&self) -> bool {
        false
    }
}

pub enum Codec {
    Indeo4(Indeo4Codec),
    Indeo5(Indeo5Codec),
}

impl Codec {
    pub fn get(&self) -> &dyn IviCodec {
        match self {
            Codec::Indeo4(c) => c,
            Codec::Indeo5(c) => c,
        }
    }

    pub fn get_mut(&mut self) -> &mut dyn IviCodec {
        match self {
            Codec::Indeo4(c) => c,
            Codec::Indeo5(c) => c,
        }
    }
}

// ─── Macroblock helpers shared by both versions ──────────────────────────────

/// Position of every macroblock of `tile`, in raster order, with its sample
/// offset in the band buffer.
pub(crate) fn mb_positions(band: &BandDesc, tile: &Tile) -> Result<Vec<(usize, usize, usize)>> {
    let mb_size = band.mb_size;
    if mb_size == 0
        || mbs_per_tile(tile.width, tile.height, mb_size) != tile.num_mbs
        || tile.mbs.len() < tile.num_mbs
    {
        return Err(DecoderError::InvalidData(format!(
            "tile {}x{} does not hold {} macroblocks of size {mb_size}",
            tile.width, tile.height, tile.num_mbs
        )));
    }
    let mut out = Vec::with_capacity(tile.num_mbs);
    for y in (tile.ypos..tile.ypos + tile.height).step_by(mb_size) {
        for x in (tile.xpos..tile.xpos + tile.width).step_by(mb_size) {
            out.push((x, y, y * band.pitch + x));
        }
    }
    Ok(out)
}

/// Motion vector taken over from the reference macroblock.
#[inline]
pub(crate) fn inherited_mv(r: &MbInfo, mv_scale: i32) -> (i32, i32) {
    if mv_scale > 0 {
        (scale_mv(r.mv_x, mv_scale as u32), scale_mv(r.mv_y, mv_scale as u32))
    } else {
        (r.mv_x, r.mv_y)
    }
}

/// Check that the whole macroblock addressed by its vector lies inside the
/// band buffer, expressed as linear sample offsets.
pub(crate) fn mv_offset_in_bounds(band: &BandDesc, mb: &MbInfo) -> bool {
    if mb.mb_type == 0 {
        return true;
    }
    let s = band.is_halfpel as i64;
    let pitch = band.pitch as i64;
    let mb_size = band.mb_size as i64;
    let (x, y) = (mb.xpos as i64, mb.ypos as i64);
    let (mv_x, mv_y) = (mb.mv_x as i64, mb.mv_y as i64);
    let lo = x + (mv_x >> s) + (y + (mv_y >> s)) * pitch;
    let hi = x + ((mv_x + s) >> s) + mb_size - 1 + (y + mb_size - 1 + ((mv_y + s) >> s)) * pitch;
    lo >= 0 && hi <= band.buf_size() as i64 - 1
}
