//! Indeo Video Interactive 4 picture, band and macroblock headers.

use log::{trace, warn};

use crate::bitreader::BitReader;
use crate::buffers::{BufferRoles, Indeo4Roles};
use crate::codec::{inherited_mv, mb_positions, mv_offset_in_bounds, FrameParams, IviCodec, IviContext};
use crate::error::{DecoderError, Result};
use crate::indeo4_tables::{
    QUANT4X4_INTER, QUANT4X4_INTRA, QUANT8X8_INTER, QUANT8X8_INTRA, QUANT_INDEX_MAP,
};
use crate::ivi_tables::{
    ALT_SCAN_4X4, ALT_SCAN_8X8, DIRECT_SCAN_4X4, HORIZONTAL_SCAN_4X4, HORIZONTAL_SCAN_8X8,
    VERTICAL_SCAN_4X4, VERTICAL_SCAN_8X8, ZIGZAG_8X8,
};
use crate::plane::{init_tiles, BandDesc, MbInfo, PictureConfig, Tile};
use crate::rvmap::Corrections;
use crate::transform::{DcTransform, InvTransform, TransformDesc};

const PIC_START_CODE: u32 = 0x3FFF8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameType {
    Intra,
    Intra1,
    Inter,
    Bidir,
    InterNoRef,
    NullFirst,
    NullLast,
}

impl FrameType {
    pub fn from_bits(v: u32) -> Result<Self> {
        Ok(match v {
            0 => FrameType::Intra,
            1 => FrameType::Intra1,
            2 => FrameType::Inter,
            3 => FrameType::Bidir,
            4 => FrameType::InterNoRef,
            5 => FrameType::NullFirst,
            6 => FrameType::NullLast,
            _ => return Err(DecoderError::InvalidFrameType),
        })
    }

    /// Frames later pictures may predict from.
    pub fn is_reference(self) -> bool {
        matches!(self, FrameType::Intra | FrameType::Intra1 | FrameType::Inter)
    }

    pub fn is_null(self) -> bool {
        matches!(self, FrameType::NullFirst | FrameType::NullLast)
    }

    /// Every macroblock is intra coded.
    pub fn is_intra(self) -> bool {
        matches!(self, FrameType::Intra | FrameType::Intra1)
    }
}

/// Standard picture sizes as `(width, height)`.
const PIC_SIZES: [(usize, usize); 7] = [
    (640, 480), (320, 240), (160, 120), (704, 480), (352, 240), (352, 288), (176, 144),
];

const fn xform(inv: InvTransform, dc: DcTransform, is_2d: bool) -> Option<TransformDesc> {
    Some(TransformDesc::new(inv, dc, is_2d))
}

/// Transforms by id. Ids without an entry are the DCT variants.
static TRANSFORMS: [Option<TransformDesc>; 18] = [
    xform(InvTransform::Haar8x8,      DcTransform::Haar,     true),
    xform(InvTransform::RowHaar8,     DcTransform::Haar,     false),
    xform(InvTransform::ColHaar8,     DcTransform::Haar,     false),
    xform(InvTransform::PutPixels8x8, DcTransform::PutPixel, true),
    xform(InvTransform::Slant8x8,     DcTransform::Slant,    true),
    xform(InvTransform::RowSlant8,    DcTransform::RowSlant, true),
    xform(InvTransform::ColSlant8,    DcTransform::ColSlant, true),
    None,
    None,
    None,
    xform(InvTransform::Haar4x4,      DcTransform::Haar,     true),
    xform(InvTransform::Slant4x4,     DcTransform::Slant,    true),
    None,
    xform(InvTransform::RowHaar4,     DcTransform::Haar,     false),
    xform(InvTransform::ColHaar4,     DcTransform::Haar,     false),
    xform(InvTransform::RowSlant4,    DcTransform::RowSlant, false),
    xform(InvTransform::ColSlant4,    DcTransform::ColSlant, false),
    None,
];

static SCANS: [&[u8]; 15] = [
    &ZIGZAG_8X8,
    &ALT_SCAN_8X8,
    &HORIZONTAL_SCAN_8X8,
    &VERTICAL_SCAN_8X8,
    &ZIGZAG_8X8,
    &DIRECT_SCAN_4X4,
    &ALT_SCAN_4X4,
    &VERTICAL_SCAN_4X4,
    &HORIZONTAL_SCAN_4X4,
    &DIRECT_SCAN_4X4,
    &HORIZONTAL_SCAN_8X8,
    &HORIZONTAL_SCAN_8X8,
    &HORIZONTAL_SCAN_8X8,
    &HORIZONTAL_SCAN_8X8,
    &HORIZONTAL_SCAN_8X8,
];

#[inline]
fn scale_tile_size(def_size: usize, factor: u32) -> usize {
    if factor == 15 { def_size } else { ((factor + 1) << 5) as usize }
}

/// Band count of one plane: 1, 4, or 0 for an unsupported layout.
fn plane_subdivision(br: &mut BitReader<'_>) -> Result<usize> {
    match br.read_bits(2)? {
        3 => Ok(1),
        2 => {
            for _ in 0..4 {
                if br.read_bits(2)? != 3 {
                    return Ok(0);
                }
            }
            Ok(4)
        }
        _ => Ok(0),
    }
}

pub struct Indeo4Codec {
    frame_type:      FrameType,
    prev_frame_type: FrameType,
    roles:           Indeo4Roles,
    transp_warned:   bool,
}

impl Default for Indeo4Codec {
    fn default() -> Self {
        Indeo4Codec {
            frame_type:      FrameType::Intra,
            prev_frame_type: FrameType::Intra,
            roles:           Indeo4Roles::default(),
            transp_warned:   false,
        }
    }
}

impl Indeo4Codec {
    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Reallocate planes for a changed layout and apply the default band sizes.
    fn apply_config(ctx: &mut IviContext, conf: PictureConfig) -> Result<()> {
        ctx.realloc(conf, true)?;
        let scalable = conf.is_scalable();
        for (p, plane) in ctx.planes.iter_mut().enumerate() {
            for band in plane.bands.iter_mut() {
                band.mb_size = match (p, scalable) {
                    (0, false) => 16,
                    (0, true) => 8,
                    _ => 4,
                };
                band.blk_size = if p == 0 { 8 } else { 4 };
            }
        }
        init_tiles(&mut ctx.planes, conf.tile_width, conf.tile_height)
    }
}

impl IviCodec for Indeo4Codec {
    fn is_indeo4(&self) -> bool {
        true
    }

    fn decode_picture_header(&mut self, ctx: &mut IviContext, br: &mut BitReader<'_>) -> Result<()> {
        if br.read_bits(18)? != PIC_START_CODE {
            return Err(DecoderError::InvalidStartCode);
        }

        let frame_type = FrameType::from_bits(br.read_bits(3)?)?;
        self.prev_frame_type = self.frame_type;
        self.frame_type = frame_type;
        if self.frame_type == FrameType::Bidir {
            ctx.params.info.has_b_frames = true;
        }

        if br.read_bit()? {
            ctx.params.info.has_transp = true;
            if !self.transp_warned {
                warn!("transparency plane is not decoded");
                self.transp_warned = true;
            }
        }

        if br.read_bit()? {
            return Err(DecoderError::InvalidData("sync bit is set".into()));
        }

        ctx.params.data_size = if br.read_bit()? { br.read_bits(24)? as usize } else { 0 };

        if self.frame_type.is_null() {
            return Ok(());
        }

        if br.read_bit()? {
            br.skip_bits(32)?;
            trace!("key lock present");
        }

        let idx = br.read_bits(3)? as usize;
        let (width, height) = match PIC_SIZES.get(idx) {
            Some(&size) => size,
            None => {
                let height = br.read_bits(16)? as usize;
                let width = br.read_bits(16)? as usize;
                (width, height)
            }
        };
        if width == 0 || height == 0 {
            return Err(DecoderError::InvalidData(format!("picture size {width}x{height}")));
        }

        let mut conf = PictureConfig::simple(width, height);
        if br.read_bit()? {
            conf.tile_height = scale_tile_size(height, br.read_bits(4)?);
            conf.tile_width = scale_tile_size(width, br.read_bits(4)?);
            ctx.params.info.uses_tiling = true;
        }

        if br.read_bits(2)? != 0 {
            return Err(DecoderError::UnsupportedFormat("only YVU9 is supported".into()));
        }

        conf.luma_bands = plane_subdivision(br)?;
        conf.chroma_bands = if conf.luma_bands != 0 { plane_subdivision(br)? } else { 0 };
        if conf.is_scalable() && (conf.luma_bands != 4 || conf.chroma_bands != 1) {
            return Err(DecoderError::UnsupportedFormat(format!(
                "scalability with {} luma and {} chroma bands",
                conf.luma_bands, conf.chroma_bands
            )));
        }
        ctx.params.info.is_scalable = conf.is_scalable();

        if conf != ctx.pic_conf || ctx.planes.is_empty() {
            Self::apply_config(ctx, conf)?;
        }

        let params = &mut ctx.params;
        params.frame_num = if br.read_bit()? { br.read_bits(20)? } else { 0 };

        if br.read_bit()? {
            br.skip_bits(8)?;
        }

        let coded = br.read_bit()?;
        params.mb_vlc.decode_desc(br, coded)?;
        let coded = br.read_bit()?;
        params.blk_vlc.decode_desc(br, coded)?;

        params.rvmap_sel = if br.read_bit()? { br.read_bits(3)? as usize } else { 8 };
        params.in_imf = br.read_bit()?;
        params.in_q = br.read_bit()?;
        params.glob_quant = br.read_bits(5)? as i32;

        if br.read_bit()? {
            br.skip_bits(3)?;
        }
        params.checksum = if br.read_bit()? { Some(br.read_bits(16)? as u16) } else { None };

        while br.read_bit()? {
            br.skip_bits(8)?;
        }
        if br.read_bit()? {
            warn!("bad blocks bit is set");
        }
        br.align_to_byte();

        trace!(
            "picture {:?}, frame {}, {}x{}",
            self.frame_type, params.frame_num, width, height
        );
        Ok(())
    }

    fn decode_band_header(
        &mut self,
        params: &mut FrameParams,
        band: &mut BandDesc,
        br: &mut BitReader<'_>,
    ) -> Result<()> {
        let plane = br.read_bits(2)? as usize;
        let band_num = br.read_bits(4)? as usize;
        if plane != band.plane || band_num != band.band_num {
            return Err(DecoderError::BandSequenceMismatch {
                exp_plane: band.plane,
                exp_band:  band.band_num,
                plane,
                band:      band_num,
            });
        }

        band.is_empty = br.read_bit()?;
        if !band.is_empty {
            if br.read_bit()? {
                br.skip_bits(16)?;
            }

            let halfpel = br.read_bits(2)?;
            if halfpel >= 2 {
                return Err(DecoderError::InvalidData(format!("motion vector resolution {halfpel}")));
            }
            band.is_halfpel = halfpel == 1;
            if !band.is_halfpel {
                params.info.uses_fullpel = true;
            }

            band.checksum = if br.read_bit()? { Some(br.read_bits(16)? as u16) } else { None };

            let old_blk_size = band.blk_size;
            let indx = br.read_bits(2)? as usize;
            if indx == 3 {
                return Err(DecoderError::InvalidData("invalid block size".into()));
            }
            band.mb_size = 16 >> indx;
            band.blk_size = 8 >> (indx >> 1);

            band.inherit_mv = br.read_bit()?;
            band.inherit_qdelta = br.read_bit()?;
            band.glob_quant = br.read_bits(5)? as i32;

            if !br.read_bit()? || self.frame_type == FrameType::Intra {
                let transform_id = br.read_bits(5)? as usize;
                let desc = TRANSFORMS
                    .get(transform_id)
                    .copied()
                    .flatten()
                    .ok_or_else(|| DecoderError::UnsupportedFormat(format!("transform {transform_id}")))?;
                if transform_id < 10 && band.blk_size < 8 {
                    return Err(DecoderError::InvalidData(format!(
                        "transform {transform_id} on {}x{} blocks",
                        band.blk_size, band.blk_size
                    )));
                }
                if matches!(transform_id, 0..=2 | 10) {
                    params.info.uses_haar = true;
                }
                band.transform = Some(desc);

                let scan_indx = br.read_bits(4)? as usize;
                if scan_indx == 15 {
                    return Err(DecoderError::InvalidData("custom scan pattern".into()));
                }
                let scan_blk = if (5..10).contains(&scan_indx) { 4 } else { 8 };
                if scan_blk != band.blk_size {
                    return Err(DecoderError::InvalidData(format!(
                        "scan {scan_indx} on {}x{} blocks",
                        band.blk_size, band.blk_size
                    )));
                }
                band.scan = SCANS[scan_indx];

                let quant_mat = br.read_bits(5)? as usize;
                if quant_mat >= QUANT_INDEX_MAP.len() {
                    return Err(DecoderError::InvalidData(format!("quant matrix {quant_mat}")));
                }
                band.quant_mat = quant_mat;
            } else if old_blk_size != band.blk_size {
                return Err(DecoderError::InvalidData(
                    "block size changed without a transform update".into(),
                ));
            }

            if QUANT_INDEX_MAP[band.quant_mat] > 4 && band.blk_size == 4 {
                return Err(DecoderError::InvalidData(format!("quant matrix {} on 4x4 blocks", band.quant_mat)));
            }
            if band.transform_size() == 8 && band.blk_size < 8 {
                return Err(DecoderError::InvalidData("8x8 transform on 4x4 blocks".into()));
            }

            if br.read_bit()? {
                band.blk_vlc.decode_desc(br, true)?;
                band.blk_vlc_from_pic = false;
            } else {
                band.blk_vlc_from_pic = true;
            }

            band.rvmap_sel = if br.read_bit()? { br.read_bits(3)? as usize } else { 8 };
            band.corr = if br.read_bit()? { Corrections::read(br)? } else { Corrections::default() };
        }

        let qidx = QUANT_INDEX_MAP[band.quant_mat.min(QUANT_INDEX_MAP.len() - 1)];
        if band.blk_size == 8 {
            band.intra_base = &QUANT8X8_INTRA[qidx];
            band.inter_base = &QUANT8X8_INTER[qidx];
        } else {
            let qidx = qidx.min(QUANT4X4_INTRA.len() - 1);
            band.intra_base = &QUANT4X4_INTRA[qidx];
            band.inter_base = &QUANT4X4_INTER[qidx];
        }
        band.intra_scale = None;
        band.inter_scale = None;

        br.align_to_byte();

        if !band.is_empty && band.scan.is_empty() {
            return Err(DecoderError::InvalidData("scan pattern is not set".into()));
        }
        Ok(())
    }

    fn decode_mb_info(
        &self,
        params: &FrameParams,
        band: &BandDesc,
        tile: &mut Tile,
        ref_mbs: Option<&[MbInfo]>,
        mv_scale: i32,
        br: &mut BitReader<'_>,
    ) -> Result<()> {
        let positions = mb_positions(band, tile)?;
        if ref_mbs.is_some_and(|r| r.len() < tile.num_mbs) {
            return Err(DecoderError::MissingReference);
        }
        let vlc = params.mb_vlc.table();
        let first_band = band.plane == 0 && band.band_num == 0;
        let blks_per_mb = if band.mb_size != band.blk_size { 4 } else { 1 };
        let mb_type_bits = if self.frame_type == FrameType::Bidir { 2 } else { 1 };
        let (mut mv_x, mut mv_y) = (0i32, 0i32);

        for (n, &(xpos, ypos, buf_offs)) in positions.iter().enumerate() {
            let ref_mb = ref_mbs.map(|r| r[n]);
            let mut mb = MbInfo { xpos, ypos, buf_offs, ..Default::default() };

            if br.read_bit()? {
                if self.frame_type == FrameType::Intra {
                    return Err(DecoderError::CorruptMacroblockData);
                }
                mb.mb_type = 1;
                if first_band && params.in_q {
                    mb.q_delta = vlc.decode_signed(br)?;
                }
                if let (true, Some(r)) = (band.inherit_mv, ref_mb) {
                    (mb.mv_x, mb.mv_y) = inherited_mv(&r, mv_scale);
                }
            } else {
                mb.mb_type = if band.inherit_mv {
                    ref_mb.ok_or(DecoderError::MissingReference)?.mb_type
                } else if self.frame_type.is_intra() {
                    0
                } else {
                    br.read_bits(mb_type_bits)? as u8
                };

                mb.cbp = br.read_bits(blks_per_mb)? as u8;

                if band.inherit_qdelta {
                    if let Some(r) = ref_mb {
                        mb.q_delta = r.q_delta;
                    }
                } else if mb.cbp != 0 || (first_band && params.in_q) {
                    mb.q_delta = vlc.decode_signed(br)?;
                }

                if mb.mb_type != 0 {
                    if band.inherit_mv {
                        if let Some(r) = ref_mb {
                            (mb.mv_x, mb.mv_y) = inherited_mv(&r, mv_scale);
                        }
                    } else {
                        mv_y += vlc.decode_signed(br)?;
                        mv_x += vlc.decode_signed(br)?;
                        mb.mv_x = mv_x;
                        mb.mv_y = mv_y;
                        if mb.mb_type == 3 {
                            mv_y += vlc.decode_signed(br)?;
                            mv_x += vlc.decode_signed(br)?;
                            mb.b_mv_x = -mv_x;
                            mb.b_mv_y = -mv_y;
                        }
                    }
                    if mb.mb_type == 2 {
                        mb.b_mv_x = -mb.mv_x;
                        mb.b_mv_y = -mb.mv_y;
                        mb.mv_x = 0;
                        mb.mv_y = 0;
                    }
                }
            }

            if !mv_offset_in_bounds(band, &mb) {
                return Err(DecoderError::CorruptMotionVector);
            }
            tile.mbs[n] = mb;
        }

        br.align_to_byte();
        Ok(())
    }

    fn switch_buffers(&mut self) {
        self.roles.switch(self.prev_frame_type, self.frame_type);
    }

    fn roles(&self) -> BufferRoles {
        self.roles.roles
    }

    fn is_nonnull_frame(&self) -> bool {
        !self.frame_type.is_null()
    }

    fn is_intra_frame(&self) -> bool {
        self.frame_type == FrameType::Intra
    }

    fn is_bidir_frame(&self) -> bool {
        self.frame_type == FrameType::Bidir
    }

    fn is_deferred_output(&self) -> bool {
        self.frame_type == FrameType::NullLast
    }
}
