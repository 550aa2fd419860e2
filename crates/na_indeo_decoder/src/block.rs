//! Block reconstruction for one tile.
//!
//! Coefficients are run/value coded with the band's block codebook, mapped
//! through the band's run/value table, dequantised into a transform vector
//! and inverse transformed in place. Inter blocks then receive their motion
//! compensated prediction from one or two reference buffers.

use crate::bitreader::BitReader;
use crate::error::{DecoderError, Result};
use crate::mc;
use crate::plane::{mbs_per_tile, BandDesc, MbInfo, Tile};
use crate::rvmap::RvMapDesc;
use crate::vlc::{to_signed, VlcTable};

/// Read the size in bytes of a tile's payload and byte-align the reader.
pub fn read_tile_data_size(br: &mut BitReader<'_>) -> Result<usize> {
    let mut len = 0;
    if br.read_bit()? {
        len = br.read_bits(8)? as usize;
        if len == 255 {
            len = br.read_bits(24)? as usize;
        }
    }
    br.align_to_byte();
    Ok(len)
}

/// Scale an inherited motion vector down by `shift` levels.
#[inline]
pub fn scale_mv(v: i32, shift: u32) -> i32 {
    (v + (v > 0) as i32 + shift as i32 - 1) >> shift
}

#[inline]
pub fn dequant(val: i32, base: u16, quant: u32) -> i32 {
    let q = (base as u32 * quant) >> 9;
    if q > 1 {
        let bias = (((q ^ 1) - 1) >> 1) as i32;
        val * q as i32 + if val > 0 { bias } else { -bias }
    } else {
        val
    }
}

/// Check that the area addressed by `(mv_x, mv_y)` from `mb` stays inside
/// the band's padded buffer.
pub fn mv_in_bounds(band: &BandDesc, mb: &MbInfo, mv_x: i32, mv_y: i32) -> bool {
    let hp = band.is_halfpel as i32;
    let (dmv_x, dmv_y) = (mv_x >> hp, mv_y >> hp);
    let (cx, cy) = (mv_x & hp, mv_y & hp);
    let (x, y) = (mb.xpos as i64, mb.ypos as i64);
    let mb_size = band.mb_size as i64;
    x + dmv_x as i64 >= 0
        && x + (dmv_x + cx) as i64 + mb_size <= band.pitch as i64
        && y + dmv_y as i64 >= 0
        && y + (dmv_y + cy) as i64 + mb_size <= band.aheight as i64
}

/// Reference buffers visible to one band decode.
#[derive(Clone, Copy, Default)]
pub struct RefBufs<'a> {
    pub fwd: Option<&'a [i16]>,
    pub bwd: Option<&'a [i16]>,
}

/// Everything the block layer needs for one band.
pub struct BlockCtx<'a> {
    pub band:      &'a BandDesc,
    pub vlc:       &'a VlcTable,
    pub rvmap:     &'a RvMapDesc,
    pub dst:       &'a mut [i16],
    pub refs:      RefBufs<'a>,
    pub is_indeo4: bool,
}

struct McParams {
    mv:       (i32, i32),
    mv2:      (i32, i32),
    mc_type:  Option<u8>,
    mc_type2: Option<u8>,
}

impl<'a> BlockCtx<'a> {
    fn ref_checked(buf: Option<&'a [i16]>, buf_size: usize) -> Result<&'a [i16]> {
        match buf {
            Some(b) if b.len() >= buf_size => Ok(b),
            _ => Err(DecoderError::MissingReference),
        }
    }

    fn ref_offset(&self, offs: usize, mv: (i32, i32), mc_type: u8) -> Result<usize> {
        let pitch = self.band.pitch as i64;
        let blk = self.band.blk_size as i64;
        let buf_size = self.band.buf_size() as i64;
        let min_size = pitch * (blk - 1) + blk;
        let ref_size = if mc_type > 1 { pitch } else { 0 } + (mc_type & 1) as i64;
        let offs = offs as i64;
        let ref_offs = offs + mv.1 as i64 * pitch + mv.0 as i64;
        if ref_offs < 0 || offs > buf_size - min_size || ref_offs > buf_size - min_size - ref_size {
            return Err(DecoderError::CorruptMotionVector);
        }
        Ok(ref_offs as usize)
    }

    fn motion_compensate(&mut self, offs: usize, p: &McParams, delta: bool) -> Result<()> {
        let buf_size = self.band.buf_size();
        let (pitch, size) = (self.band.pitch, self.band.blk_size);

        match (p.mc_type, p.mc_type2) {
            (None, None) => Ok(()),
            (Some(t), None) => {
                let ro = self.ref_offset(offs, p.mv, t)?;
                let src = Self::ref_checked(self.refs.fwd, buf_size)?;
                if delta {
                    mc::mc_delta(self.dst, offs, src, ro, pitch, size, t);
                } else {
                    mc::mc_no_delta(self.dst, offs, src, ro, pitch, size, t);
                }
                Ok(())
            }
            (None, Some(t2)) => {
                let ro2 = self.ref_offset(offs, p.mv2, t2)?;
                let src = Self::ref_checked(self.refs.bwd, buf_size)?;
                if delta {
                    mc::mc_delta(self.dst, offs, src, ro2, pitch, size, t2);
                } else {
                    mc::mc_no_delta(self.dst, offs, src, ro2, pitch, size, t2);
                }
                Ok(())
            }
            (Some(t), Some(t2)) => {
                let ro = self.ref_offset(offs, p.mv, t)?;
                let ro2 = self.ref_offset(offs, p.mv2, t2)?;
                let fwd = Self::ref_checked(self.refs.fwd, buf_size)?;
                let bwd = Self::ref_checked(self.refs.bwd, buf_size)?;
                if delta {
                    mc::mc_avg_delta(self.dst, offs, fwd, ro, bwd, ro2, pitch, size, t, t2);
                } else {
                    mc::mc_avg_no_delta(self.dst, offs, fwd, ro, bwd, ro2, pitch, size, t, t2);
                }
                Ok(())
            }
        }
    }

    fn dc_only(&mut self, offs: usize, prev_dc: i32) -> Result<()> {
        let band = self.band;
        let blk = band.blk_size;
        let min_size = (blk - 1) * band.pitch + blk;
        if min_size > band.buf_size().saturating_sub(offs) {
            return Err(DecoderError::CorruptTileData);
        }
        let xform = band
            .transform
            .ok_or_else(|| DecoderError::InvalidData("transform is not set".into()))?;
        xform.dc.apply(prev_dc, &mut self.dst[offs..], band.pitch, blk);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_coded_block(
        &mut self,
        br: &mut BitReader<'_>,
        offs: usize,
        prev_dc: &mut i32,
        is_intra: bool,
        quant: u32,
        mcp: &McParams,
    ) -> Result<()> {
        let band = self.band;
        let base_tab = if is_intra { band.intra_base } else { band.inter_base };
        let blk_size = band.blk_size;
        let num_coeffs = (blk_size * blk_size) as i32;
        let col_mask = blk_size - 1;
        let tsize = band.transform_size();
        let min_size = band.pitch * (tsize - 1) + tsize;
        if min_size > band.buf_size().saturating_sub(offs) {
            return Err(DecoderError::CorruptTileData);
        }
        if band.scan.is_empty() {
            return Err(DecoderError::InvalidData("scan pattern is not set".into()));
        }
        let xform = band
            .transform
            .ok_or_else(|| DecoderError::InvalidData("transform is not set".into()))?;

        let rvmap = self.rvmap;
        let eob = rvmap.eob_sym as u32;
        let esc = rvmap.esc_sym as u32;
        let mut trvec = [0i32; 64];
        let mut col_flags = [false; 8];
        let mut scan_pos: i32 = -1;
        let mut sym = 0;

        while scan_pos <= num_coeffs {
            sym = self.vlc.decode(br)?;
            if sym == eob {
                break;
            }
            let (run, val) = if sym == esc {
                let run = self.vlc.decode(br)? as i32 + 1;
                let lo = self.vlc.decode(br)?;
                let hi = self.vlc.decode(br)?;
                (run, to_signed((hi << 6) | lo))
            } else {
                if sym >= 256 {
                    return Err(DecoderError::CorruptTileData);
                }
                (rvmap.runtab[sym as usize] as i32, rvmap.valtab[sym as usize] as i32)
            };

            scan_pos += run;
            if scan_pos >= num_coeffs || scan_pos < 0 {
                break;
            }
            let pos = *band.scan.get(scan_pos as usize).ok_or(DecoderError::CorruptTileData)? as usize;
            let base = *base_tab
                .get(pos)
                .ok_or_else(|| DecoderError::InvalidData("quantiser matrix is not set".into()))?;
            let val = dequant(val, base, quant);
            trvec[pos] = val;
            col_flags[pos & col_mask] |= val != 0;
        }

        if scan_pos < 0 || (scan_pos >= num_coeffs && sym != eob) {
            return Err(DecoderError::CorruptTileData);
        }

        if is_intra && xform.is_2d {
            *prev_dc += trvec[0];
            trvec[0] = *prev_dc;
            col_flags[0] |= *prev_dc != 0;
        }

        if tsize > blk_size {
            return Err(DecoderError::InvalidData("transform larger than block".into()));
        }
        xform.inv.apply(&trvec, &mut self.dst[offs..], band.pitch, &col_flags);

        if !is_intra {
            self.motion_compensate(offs, mcp, true)?;
        }
        Ok(())
    }

    /// Reconstruct all macroblocks of a coded tile.
    pub fn decode_blocks(&mut self, br: &mut BitReader<'_>, tile: &Tile) -> Result<()> {
        let band = self.band;
        let blk_size = band.blk_size;
        let num_blocks = if band.mb_size != blk_size { 4 } else { 1 };
        let mut prev_dc = 0i32;

        for mb in tile.mbs.iter().take(tile.num_mbs) {
            let is_intra = mb.mb_type == 0;
            let mut cbp = mb.cbp;
            let mut buf_offs = mb.buf_offs;

            let quant = band.glob_quant + mb.q_delta;
            let mut quant = if self.is_indeo4 { quant.clamp(0, 31) } else { quant.clamp(0, 23) } as u32;
            let scale_tab = if is_intra { band.intra_scale } else { band.inter_scale };
            if let Some(tab) = scale_tab {
                quant = tab.get(quant as usize).copied().unwrap_or(0) as u32;
            }

            let mut mcp = McParams { mv: (0, 0), mv2: (0, 0), mc_type: Some(0), mc_type2: None };
            if !is_intra {
                let (mut mv_x, mut mv_y) = (mb.mv_x, mb.mv_y);
                let (mut mv_x2, mut mv_y2) = (mb.b_mv_x, mb.b_mv_y);
                let (mut t, mut t2) = (0u8, 0u8);
                if band.is_halfpel {
                    t = (((mv_y & 1) << 1) | (mv_x & 1)) as u8;
                    t2 = (((mv_y2 & 1) << 1) | (mv_x2 & 1)) as u8;
                    mv_x >>= 1;
                    mv_y >>= 1;
                    mv_x2 >>= 1;
                    mv_y2 >>= 1;
                }
                mcp.mv = (mv_x, mv_y);
                mcp.mv2 = (mv_x2, mv_y2);
                mcp.mc_type = if mb.mb_type == 2 { None } else { Some(t) };
                mcp.mc_type2 = if mb.mb_type == 2 || mb.mb_type == 3 { Some(t2) } else { None };

                if !mv_in_bounds(band, mb, mb.mv_x, mb.mv_y) {
                    return Err(DecoderError::CorruptMotionVector);
                }
                if mcp.mc_type2.is_some() && !mv_in_bounds(band, mb, mb.b_mv_x, mb.b_mv_y) {
                    return Err(DecoderError::CorruptMotionVector);
                }
            }

            for blk in 0..num_blocks {
                if blk & 1 != 0 {
                    buf_offs += blk_size;
                } else if blk == 2 {
                    buf_offs = buf_offs + blk_size * band.pitch - blk_size;
                }

                if cbp & 1 != 0 {
                    self.decode_coded_block(br, buf_offs, &mut prev_dc, is_intra, quant, &mcp)?;
                } else if is_intra {
                    self.dc_only(buf_offs, prev_dc)?;
                } else {
                    self.motion_compensate(buf_offs, &mcp, false)?;
                }
                cbp >>= 1;
            }
        }

        br.align_to_byte();
        Ok(())
    }

    /// Fill a tile that carries no data: inherit motion from the reference
    /// tile when available, otherwise copy the co-located reference area.
    pub fn process_empty_tile(&mut self, tile: &mut Tile, ref_mbs: Option<&[MbInfo]>, mv_scale: i32) -> Result<()> {
        let band = self.band;
        let mb_size = band.mb_size;
        if tile.num_mbs != mbs_per_tile(tile.width, tile.height, mb_size) || tile.mbs.len() < tile.num_mbs {
            return Err(DecoderError::InvalidData(format!(
                "allocated tile size {} mismatches parameters",
                tile.num_mbs
            )));
        }
        if let Some(r) = ref_mbs {
            if r.len() < tile.num_mbs {
                return Err(DecoderError::MissingReference);
            }
        }

        let first_band = band.plane == 0 && band.band_num == 0;
        let mut need_mc = false;
        let mut offs = tile.ypos * band.pitch + tile.xpos;
        let mut mbn = 0;
        for y in (tile.ypos..tile.ypos + tile.height).step_by(mb_size) {
            let mut mb_offset = offs;
            for x in (tile.xpos..tile.xpos + tile.width).step_by(mb_size) {
                let ref_mb = ref_mbs.map(|r| r[mbn]);
                let mb = &mut tile.mbs[mbn];
                mb.xpos = x;
                mb.ypos = y;
                mb.buf_offs = mb_offset;
                mb.mb_type = 1;
                mb.cbp = 0;

                if !band.qdelta_present && first_band {
                    mb.q_delta = band.glob_quant;
                    mb.mv_x = 0;
                    mb.mv_y = 0;
                }
                if let Some(r) = ref_mb {
                    if band.inherit_qdelta {
                        mb.q_delta = r.q_delta;
                    }
                    if band.inherit_mv {
                        if mv_scale > 0 {
                            mb.mv_x = scale_mv(r.mv_x, mv_scale as u32);
                            mb.mv_y = scale_mv(r.mv_y, mv_scale as u32);
                        } else {
                            mb.mv_x = r.mv_x;
                            mb.mv_y = r.mv_y;
                        }
                        need_mc |= mb.mv_x != 0 || mb.mv_y != 0;
                        if !mv_in_bounds(band, mb, mb.mv_x, mb.mv_y) {
                            return Err(DecoderError::CorruptMotionVector);
                        }
                    }
                }

                mbn += 1;
                mb_offset += mb_size;
            }
            offs += mb_size * band.pitch;
        }

        if band.inherit_mv && need_mc {
            let num_blocks = if mb_size != band.blk_size { 4 } else { 1 };
            for mb in tile.mbs.iter().take(tile.num_mbs) {
                let (mut mv_x, mut mv_y) = (mb.mv_x, mb.mv_y);
                let mut mc_type = 0u8;
                if band.is_halfpel {
                    mc_type = (((mv_y & 1) << 1) | (mv_x & 1)) as u8;
                    mv_x >>= 1;
                    mv_y >>= 1;
                }
                let mcp = McParams { mv: (mv_x, mv_y), mv2: (0, 0), mc_type: Some(mc_type), mc_type2: None };
                for blk in 0..num_blocks {
                    let offs = mb.buf_offs
                        + band.blk_size * ((blk & 1) + ((blk & 2) != 0) as usize * band.pitch);
                    self.motion_compensate(offs, &mcp, false)?;
                }
            }
        } else {
            let src = Self::ref_checked(self.refs.fwd, band.buf_size())?;
            let start = tile.ypos * band.pitch + tile.xpos;
            for row in 0..tile.height {
                let o = start + row * band.pitch;
                self.dst[o..o + tile.width].copy_from_slice(&src[o..o + tile.width]);
            }
        }
        Ok(())
    }
}
