//! Indeo Video Interactive 5 headers.
//!
//! Intra pictures carry a GOP header that fixes the picture geometry, the
//! band layout and every band's transform for the pictures that follow.

use log::{error, trace};

use crate::bitreader::BitReader;
use crate::buffers::{BufferRoles, Indeo5Roles};
use crate::codec::{inherited_mv, mb_positions, mv_offset_in_bounds, FrameParams, IviCodec, IviContext};
use crate::error::{DecoderError, Result};
use crate::indeo5_tables::{
    QSCALE4_INTER, QSCALE4_INTRA, QSCALE8_INTER, QSCALE8_INTRA, QUANT4X4_INTER, QUANT4X4_INTRA,
    QUANT8X8_INTER, QUANT8X8_INTRA,
};
use crate::ivi_tables::{DIRECT_SCAN_4X4, HORIZONTAL_SCAN_8X8, VERTICAL_SCAN_8X8, ZIGZAG_8X8};
use crate::plane::{init_tiles, BandDesc, MbInfo, PictureConfig, Tile};
use crate::rvmap::Corrections;
use crate::transform::{DcTransform, InvTransform, TransformDesc};

const PIC_START_CODE: u32 = 0x1F;
const PIC_SIZE_ESC: usize = 15;
const GOP_IS_PROTECTED: u32 = 0x20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameType {
    Intra,
    Inter,
    /// Inter frame predicting from the scalability buffer.
    InterScal,
    InterNoRef,
    Null,
}

impl FrameType {
    pub fn from_bits(v: u32) -> Result<Self> {
        Ok(match v {
            0 => FrameType::Intra,
            1 => FrameType::Inter,
            2 => FrameType::InterScal,
            3 => FrameType::InterNoRef,
            4 => FrameType::Null,
            _ => return Err(DecoderError::InvalidFrameType),
        })
    }
}

/// Picture sizes as `(width, height)`. The last three entries are unused.
const PIC_SIZES: [(usize, usize); 15] = [
    (640, 480), (320, 240), (160, 120), (704, 480), (352, 240), (352, 288), (176, 144),
    (240, 180), (640, 240), (704, 240), (80, 60), (88, 72), (0, 0), (0, 0), (0, 0),
];

/// Transform and scan of band `band` of plane `plane`.
fn band_transform(plane: usize, band: usize) -> Option<(TransformDesc, &'static [u8])> {
    let (inv, dc, scan): (InvTransform, DcTransform, &'static [u8]) = match (plane << 2) + band {
        0 => (InvTransform::Slant8x8, DcTransform::Slant, &ZIGZAG_8X8),
        1 => (InvTransform::RowSlant8, DcTransform::RowSlant, &VERTICAL_SCAN_8X8),
        2 => (InvTransform::ColSlant8, DcTransform::ColSlant, &HORIZONTAL_SCAN_8X8),
        3 => (InvTransform::PutPixels8x8, DcTransform::PutPixel, &HORIZONTAL_SCAN_8X8),
        4 => (InvTransform::Slant4x4, DcTransform::Slant, &DIRECT_SCAN_4X4),
        _ => return None,
    };
    let is_2d = matches!(inv, InvTransform::Slant8x8 | InvTransform::Slant4x4);
    Some((TransformDesc::new(inv, dc, is_2d), scan))
}

/// Skip length-prefixed extension chunks up to the terminating empty one.
fn skip_hdr_extension(br: &mut BitReader<'_>) -> Result<()> {
    loop {
        let len = br.read_bits(8)? as usize;
        if len * 8 > br.bits_remaining() {
            return Err(DecoderError::BitstreamExhausted);
        }
        br.skip_bits(len * 8)?;
        if len == 0 {
            return Ok(());
        }
    }
}

pub struct Indeo5Codec {
    frame_type:      FrameType,
    prev_frame_type: FrameType,
    roles:           Indeo5Roles,
    frame_flags:     u32,
    gop_flags:       u32,
    gop_invalid:     bool,
    is_scalable:     bool,
}

impl Default for Indeo5Codec {
    fn default() -> Self {
        Indeo5Codec {
            frame_type:      FrameType::Intra,
            prev_frame_type: FrameType::Intra,
            roles:           Indeo5Roles::default(),
            frame_flags:     0,
            gop_flags:       0,
            gop_invalid:     false,
            is_scalable:     false,
        }
    }
}

impl Indeo5Codec {
    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    fn decode_gop_header(&mut self, ctx: &mut IviContext, br: &mut BitReader<'_>) -> Result<()> {
        self.gop_flags = br.read_bits(8)?;
        if self.gop_flags & 1 != 0 {
            br.skip_bits(16)?;
        }
        if self.gop_flags & GOP_IS_PROTECTED != 0 {
            let _lock_word = br.read_bits(32)?;
        }

        let tile_size = if self.gop_flags & 0x40 != 0 { 64usize << br.read_bits(2)? } else { 0 };
        if tile_size > 256 {
            return Err(DecoderError::InvalidData(format!("tile size {tile_size}")));
        }

        let luma_bands = br.read_bits(2)? as usize * 3 + 1;
        let chroma_bands = br.read_bits(1)? as usize * 3 + 1;
        let is_scalable = luma_bands != 1 || chroma_bands != 1;
        if is_scalable && (luma_bands != 4 || chroma_bands != 1) {
            return Err(DecoderError::UnsupportedFormat(format!(
                "scalability with {luma_bands} luma and {chroma_bands} chroma bands"
            )));
        }

        let idx = br.read_bits(4)? as usize;
        let (width, height) = if idx == PIC_SIZE_ESC {
            let height = br.read_bits(13)? as usize;
            let width = br.read_bits(13)? as usize;
            (width, height)
        } else {
            PIC_SIZES[idx]
        };
        if width == 0 || height == 0 {
            return Err(DecoderError::InvalidData(format!("picture size {width}x{height}")));
        }

        if self.gop_flags & 2 != 0 {
            return Err(DecoderError::UnsupportedFormat("YV12 picture format".into()));
        }

        let mut conf = PictureConfig::simple(width, height);
        conf.luma_bands = luma_bands;
        conf.chroma_bands = chroma_bands;
        if tile_size != 0 {
            conf.tile_width = tile_size;
            conf.tile_height = tile_size;
        }

        let mut blk_size_changed = false;
        if conf != ctx.pic_conf || self.gop_invalid || ctx.planes.is_empty() {
            ctx.realloc(conf, false)?;
            self.is_scalable = is_scalable;
            blk_size_changed = true;
        }
        ctx.params.info.is_scalable = self.is_scalable;

        for p in 0..2 {
            let num_bands = if p == 0 { luma_bands } else { chroma_bands };
            for i in 0..num_bands {
                let band = &mut ctx.planes[p].bands[i];
                band.is_halfpel = br.read_bit()?;
                let mb_flag = br.read_bit()?;
                let blk_size = 8usize >> br.read_bits(1)?;
                let mb_size = if mb_flag { blk_size } else { blk_size << 1 };
                if p == 0 && blk_size == 4 {
                    return Err(DecoderError::UnsupportedFormat("4x4 luma blocks".into()));
                }
                if mb_size != band.mb_size || blk_size != band.blk_size {
                    band.mb_size = mb_size;
                    band.blk_size = blk_size;
                    blk_size_changed = true;
                }
                if br.read_bit()? {
                    return Err(DecoderError::UnsupportedFormat("extended transform info".into()));
                }

                let (desc, scan) = band_transform(p, i).ok_or_else(|| {
                    DecoderError::InvalidData(format!("no transform for plane {p} band {i}"))
                })?;
                band.transform = Some(desc);
                band.scan = scan;
                if desc.size() != band.blk_size {
                    return Err(DecoderError::InvalidData("transform and block size mismatch".into()));
                }

                let quant_mat = match (p, luma_bands > 1) {
                    (0, true) => i + 1,
                    (0, false) => 0,
                    _ => 5,
                };
                band.quant_mat = quant_mat;
                if band.blk_size == 8 {
                    if quant_mat >= QUANT8X8_INTRA.len() {
                        return Err(DecoderError::InvalidData(format!("quant matrix {quant_mat} too large")));
                    }
                    band.intra_base = &QUANT8X8_INTRA[quant_mat];
                    band.inter_base = &QUANT8X8_INTER[quant_mat];
                    band.intra_scale = Some(&QSCALE8_INTRA[quant_mat]);
                    band.inter_scale = Some(&QSCALE8_INTER[quant_mat]);
                } else {
                    band.intra_base = &QUANT4X4_INTRA;
                    band.inter_base = &QUANT4X4_INTER;
                    band.intra_scale = Some(&QSCALE4_INTRA);
                    band.inter_scale = Some(&QSCALE4_INTER);
                }

                if br.read_bits(2)? != 0 {
                    return Err(DecoderError::InvalidData("band end marker missing".into()));
                }
            }
        }

        // the second chroma plane follows the first
        for i in 0..chroma_bands {
            let (head, tail) = ctx.planes.split_at_mut(2);
            let src = &head[1].bands[i];
            let dst = &mut tail[0].bands[i];
            dst.width = src.width;
            dst.height = src.height;
            dst.mb_size = src.mb_size;
            dst.blk_size = src.blk_size;
            dst.is_halfpel = src.is_halfpel;
            dst.quant_mat = src.quant_mat;
            dst.intra_base = src.intra_base;
            dst.inter_base = src.inter_base;
            dst.intra_scale = src.intra_scale;
            dst.inter_scale = src.inter_scale;
            dst.scan = src.scan;
            dst.transform = src.transform;
        }

        if blk_size_changed {
            init_tiles(&mut ctx.planes, conf.tile_width, conf.tile_height)?;
        }

        if self.gop_flags & 8 != 0 {
            if br.read_bits(3)? != 0 {
                return Err(DecoderError::InvalidData("alignment bits are not zero".into()));
            }
            if br.read_bit()? {
                br.skip_bits(24)?;
            }
        }

        br.align_to_byte();
        br.skip_bits(23)?;
        if br.read_bit()? {
            while br.read_bits(16)? & 0x8000 != 0 {}
        }
        br.align_to_byte();

        trace!(
            "GOP {}x{}, tiles {}x{}, {luma_bands}/{chroma_bands} bands",
            width, height, conf.tile_width, conf.tile_height
        );
        Ok(())
    }
}

impl IviCodec for Indeo5Codec {
    fn is_indeo4(&self) -> bool {
        false
    }

    fn decode_picture_header(&mut self, ctx: &mut IviContext, br: &mut BitReader<'_>) -> Result<()> {
        if br.read_bits(5)? != PIC_START_CODE {
            return Err(DecoderError::InvalidStartCode);
        }

        let frame_type = FrameType::from_bits(br.read_bits(3)?)?;
        self.prev_frame_type = self.frame_type;
        self.frame_type = frame_type;
        ctx.params.frame_num = br.read_bits(8)?;

        if self.frame_type == FrameType::Intra {
            if let Err(e) = self.decode_gop_header(ctx, br) {
                error!("invalid GOP header, skipping frames: {e}");
                self.gop_invalid = true;
                return Err(e);
            }
            self.gop_invalid = false;
        }

        if self.frame_type == FrameType::InterScal && !self.is_scalable {
            self.frame_type = FrameType::Inter;
            return Err(DecoderError::InvalidData("scalable inter frame in non scalable stream".into()));
        }

        if self.frame_type != FrameType::Null {
            let params = &mut ctx.params;
            self.frame_flags = br.read_bits(8)?;
            params.data_size = if self.frame_flags & 1 != 0 { br.read_bits(24)? as usize } else { 0 };
            params.checksum = if self.frame_flags & 0x10 != 0 { Some(br.read_bits(16)? as u16) } else { None };
            if self.frame_flags & 0x20 != 0 {
                skip_hdr_extension(br)?;
            }
            params.mb_vlc.decode_desc(br, self.frame_flags & 0x40 != 0)?;
            br.skip_bits(3)?;
            params.in_q = self.frame_flags & 8 != 0;
        }
        br.align_to_byte();

        trace!("picture {:?}, frame {}, flags {:#04x}", self.frame_type, ctx.params.frame_num, self.frame_flags);
        Ok(())
    }

    fn decode_band_header(
        &mut self,
        _params: &mut FrameParams,
        band: &mut BandDesc,
        br: &mut BitReader<'_>,
    ) -> Result<()> {
        let band_flags = br.read_bits(8)?;
        band.is_empty = band_flags & 1 != 0;
        if band.is_empty {
            return Ok(());
        }

        band.data_size = if self.frame_flags & 0x80 != 0 { br.read_bits(24)? as usize } else { 0 };
        band.inherit_mv = band_flags & 2 != 0;
        band.qdelta_present = band_flags & 4 != 0;
        band.inherit_qdelta = band_flags & 8 != 0 || !band.qdelta_present;

        band.corr = if band_flags & 0x10 != 0 { Corrections::read(br)? } else { Corrections::default() };
        band.rvmap_sel = if band_flags & 0x40 != 0 { br.read_bits(3)? as usize } else { 8 };

        band.blk_vlc.decode_desc(br, band_flags & 0x80 != 0)?;
        band.blk_vlc_from_pic = false;

        band.checksum = if br.read_bit()? { Some(br.read_bits(16)? as u16) } else { None };
        band.glob_quant = br.read_bits(5)? as i32;

        if band_flags & 0x20 != 0 {
            br.align_to_byte();
            skip_hdr_extension(br)?;
        }
        br.align_to_byte();
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
        if ref_mbs.is_none() && ((band.qdelta_present && band.inherit_qdelta) || band.inherit_mv) {
            return Err(DecoderError::MissingReference);
        }
        if ref_mbs.is_some_and(|r| r.len() < tile.num_mbs) {
            return Err(DecoderError::MissingReference);
        }
        let positions = mb_positions(band, tile)?;
        let vlc = params.mb_vlc.table();
        let first_band = band.plane == 0 && band.band_num == 0;
        let blks_per_mb = if band.mb_size != band.blk_size { 4 } else { 1 };
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
                mb.mb_type = match ref_mb {
                    Some(r) if band.inherit_mv => r.mb_type,
                    _ if self.frame_type == FrameType::Intra => 0,
                    _ => br.read_bit()? as u8,
                };

                mb.cbp = br.read_bits(blks_per_mb)? as u8;

                if band.qdelta_present {
                    if band.inherit_qdelta {
                        if let Some(r) = ref_mb {
                            mb.q_delta = r.q_delta;
                        }
                    } else if mb.cbp != 0 || (first_band && params.in_q) {
                        mb.q_delta = vlc.decode_signed(br)?;
                    }
                }

                if mb.mb_type != 0 {
                    match ref_mb {
                        Some(r) if band.inherit_mv => (mb.mv_x, mb.mv_y) = inherited_mv(&r, mv_scale),
                        _ => {
                            mv_y += vlc.decode_signed(br)?;
                            mv_x += vlc.decode_signed(br)?;
                            mb.mv_x = mv_x;
                            mb.mv_y = mv_y;
                        }
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
        self.frame_type != FrameType::Null
    }

    fn is_intra_frame(&self) -> bool {
        self.frame_type == FrameType::Intra
    }

    fn gop_invalid(&self) -> bool {
        self.gop_invalid
    }

    fn is_protected(&self) -> bool {
        self.gop_flags & GOP_IS_PROTECTED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitreader::BitWriter;

    /// Intra picture with a GOP header for a 32x16 single band stream.
    fn intra_picture(bw: &mut BitWriter, luma_end_marker: u32) {
        bw.put(PIC_START_CODE, 5).put(0, 3).put(1, 8);
        bw.put(0, 8).put(0, 2).put(0, 1).put(15, 4).put(16, 13).put(32, 13);
        // luma: 16x16 macroblocks of 8x8 blocks
        bw.bit(false).bit(false).bit(false).bit(false).put(luma_end_marker, 2);
        // chroma: 4x4 macroblocks of one 4x4 block
        bw.bit(false).bit(true).bit(true).bit(false).put(0, 2);
        bw.align().put(0, 23).bit(false).align();
        bw.put(0x08, 8).put(0, 3).align();
    }

    fn parsed() -> (Indeo5Codec, IviContext, usize) {
        let mut bw = BitWriter::default();
        intra_picture(&mut bw, 0);
        let data = bw.finish();
        let mut codec = Indeo5Codec::default();
        let mut ctx = IviContext::default();
        let mut br = BitReader::new(&data);
        codec.decode_picture_header(&mut ctx, &mut br).unwrap();
        (codec, ctx, br.bits_consumed())
    }

    #[test]
    fn gop_header_configures_bands() {
        let (codec, ctx, consumed) = parsed();
        assert_eq!(consumed, 112);
        assert_eq!(codec.frame_type(), FrameType::Intra);
        assert_eq!((ctx.pic_conf.pic_width, ctx.pic_conf.pic_height), (32, 16));
        assert!(ctx.params.in_q);
        assert_eq!(ctx.params.frame_num, 1);

        let y = &ctx.planes[0].bands[0];
        assert_eq!((y.mb_size, y.blk_size), (16, 8));
        assert_eq!(y.transform.map(|t| (t.inv, t.is_2d)), Some((InvTransform::Slant8x8, true)));
        assert_eq!(y.intra_scale, Some(&QSCALE8_INTRA[0][..]));
        assert_eq!(y.tiles[0].num_mbs, 2);

        let v = &ctx.planes[2].bands[0];
        assert_eq!((v.mb_size, v.blk_size), (4, 4));
        assert_eq!(v.scan, &DIRECT_SCAN_4X4[..]);
        assert_eq!(v.intra_base, &QUANT4X4_INTRA[..]);
        assert_eq!(v.tiles.len(), 1);
        assert_eq!((v.tiles[0].num_mbs, v.tiles[0].ref_tile), (2, Some(0)));
        assert!(!codec.gop_invalid() && !codec.is_protected());
    }

    #[test]
    fn broken_gop_latches_until_next_intra() {
        let mut bw = BitWriter::default();
        intra_picture(&mut bw, 1);
        let bad = bw.finish();
        let mut codec = Indeo5Codec::default();
        let mut ctx = IviContext::default();
        assert!(codec.decode_picture_header(&mut ctx, &mut BitReader::new(&bad)).is_err());
        assert!(codec.gop_invalid());

        let mut bw = BitWriter::default();
        intra_picture(&mut bw, 0);
        let good = bw.finish();
        codec.decode_picture_header(&mut ctx, &mut BitReader::new(&good)).unwrap();
        assert!(!codec.gop_invalid());
        assert_eq!(ctx.planes[0].bands[0].tiles.len(), 1);
    }

    #[test]
    fn scalable_inter_needs_scalability() {
        let (mut codec, mut ctx, _) = parsed();
        let mut bw = BitWriter::default();
        bw.put(PIC_START_CODE, 5).put(2, 3).put(2, 8).put(0, 8).put(0, 3);
        let data = bw.finish();
        let r = codec.decode_picture_header(&mut ctx, &mut BitReader::new(&data));
        assert!(matches!(r, Err(DecoderError::InvalidData(_))));
        assert_eq!(codec.frame_type(), FrameType::Inter);
    }

    #[test]
    fn null_picture_has_no_flags() {
        let (mut codec, mut ctx, _) = parsed();
        let mut bw = BitWriter::default();
        bw.put(PIC_START_CODE, 5).put(4, 3).put(2, 8);
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        codec.decode_picture_header(&mut ctx, &mut br).unwrap();
        assert!(!codec.is_nonnull_frame());
        assert_eq!(br.bits_consumed(), 16);
    }

    #[test]
    fn rejected_type_keeps_frame_history() {
        let (mut codec, mut ctx, _) = parsed();
        let mut bw = BitWriter::default();
        bw.put(PIC_START_CODE, 5).put(4, 3).put(2, 8);
        let data = bw.finish();
        codec.decode_picture_header(&mut ctx, &mut BitReader::new(&data)).unwrap();

        let mut bw = BitWriter::default();
        bw.put(PIC_START_CODE, 5).put(7, 3).put(3, 8);
        let data = bw.finish();
        assert!(matches!(
            codec.decode_picture_header(&mut ctx, &mut BitReader::new(&data)),
            Err(DecoderError::InvalidFrameType)
        ));
        assert_eq!((codec.prev_frame_type, codec.frame_type), (FrameType::Intra, FrameType::Null));
    }

    #[test]
    fn invalid_picture_types() {
        let mut codec = Indeo5Codec::default();
        let mut ctx = IviContext::default();
        let data = [0x1E, 0x00];
        assert!(matches!(
            codec.decode_picture_header(&mut ctx, &mut BitReader::new(&data)),
            Err(DecoderError::InvalidStartCode)
        ));
        let data = [0xFF, 0x00];
        assert!(matches!(
            codec.decode_picture_header(&mut ctx, &mut BitReader::new(&data)),
            Err(DecoderError::InvalidFrameType)
        ));
    }

    #[test]
    fn band_header_flags() {
        let (mut codec, mut ctx, _) = parsed();
        let mut bw = BitWriter::default();
        // inherit_mv, rvmap 3, one correction pair, checksum
        bw.put(0x52, 8).put(1, 8).put(4, 8).put(9, 8).put(3, 3);
        bw.bit(true).put(0xBEEF, 16).put(17, 5).align();
        let data = bw.finish();
        let band = &mut ctx.planes[1].bands[0];
        codec.decode_band_header(&mut ctx.params, band, &mut BitReader::new(&data)).unwrap();
        assert!(band.inherit_mv);
        assert!(!band.qdelta_present && band.inherit_qdelta);
        assert_eq!(band.rvmap_sel, 3);
        assert_eq!(band.corr.pairs().collect::<Vec<_>>(), vec![(4, 9)]);
        assert_eq!(band.checksum, Some(0xBEEF));
        assert_eq!(band.glob_quant, 17);
        assert!(!band.blk_vlc.is_custom());

        let mut bw = BitWriter::default();
        bw.put(0x01, 8);
        let data = bw.finish();
        codec.decode_band_header(&mut ctx.params, band, &mut BitReader::new(&data)).unwrap();
        assert!(band.is_empty);
    }

    #[test]
    fn inheritance_needs_a_reference() {
        let (codec, mut ctx, _) = parsed();
        let band = &mut ctx.planes[1].bands[0];
        band.inherit_mv = true;
        let band = &ctx.planes[1].bands[0];
        let mut tile = band.tiles[0].clone();
        let data = [0u8; 4];
        let r = codec.decode_mb_info(&ctx.params, band, &mut tile, None, 2, &mut BitReader::new(&data));
        assert!(matches!(r, Err(DecoderError::MissingReference)));
    }

    #[test]
    fn chroma_inherits_scaled_vectors() {
        let (codec, mut ctx, _) = parsed();
        let band = &mut ctx.planes[1].bands[0];
        band.inherit_mv = true;
        band.qdelta_present = false;
        band.inherit_qdelta = true;
        let band = &ctx.planes[1].bands[0];
        let mut tile = band.tiles[0].clone();
        let r = MbInfo { mb_type: 1, mv_x: 8, mv_y: 4, q_delta: 3, ..Default::default() };
        let refs = [r, r];
        let data = [0u8; 2];
        let mut br = BitReader::new(&data);
        codec.decode_mb_info(&ctx.params, band, &mut tile, Some(&refs), 2, &mut br).unwrap();
        assert_eq!(br.bits_consumed(), 8);
        for mb in &tile.mbs {
            assert_eq!(mb.mb_type, 1);
            assert_eq!((mb.mv_x, mb.mv_y), (2, 1));
            assert_eq!(mb.q_delta, 0);
        }
        assert_eq!(tile.mbs[1].buf_offs, 4);
    }

    #[test]
    fn extension_chunks_are_skipped() {
        let data = [2, 0xAA, 0xBB, 1, 0xCC, 0, 0x5A];
        let mut br = BitReader::new(&data);
        skip_hdr_extension(&mut br).unwrap();
        assert_eq!(br.read_bits(8).unwrap(), 0x5A);
        let data = [9, 0];
        assert!(skip_hdr_extension(&mut BitReader::new(&data)).is_err());
    }
}
