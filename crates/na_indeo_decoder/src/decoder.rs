//! Frame driver shared by Indeo 4 and Indeo 5.
//!
//! Parses the picture header, rotates the band buffers, decodes every band
//! of every plane tile by tile and finally converts the planes to 8-bit
//! output.

use log::{error, trace, warn};

use crate::bitreader::BitReader;
use crate::block::{read_tile_data_size, BlockCtx, RefBufs};
use crate::buffers::BufferRoles;
use crate::codec::{Codec, FrameParams, IviCodec, IviContext};
use crate::error::{DecoderError, Result};
use crate::indeo4::Indeo4Codec;
use crate::indeo5::Indeo5Codec;
use crate::plane::{alloc_vec, PictureConfig, PlaneDesc, Tile, NUM_BUFS};
use crate::recompose::{output_plane, recompose53, recompose_haar};
use crate::rvmap::RvMapDesc;

/// Sync code plus the INTER frame type of an Indeo 4 picture.
const EMBEDDED_INTER_SYNC: u32 = 0xBFFF8;

/// Planar YUV 4:1:0 picture. Strides equal the plane widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YuvFrame {
    pub width:         u32,
    pub height:        u32,
    pub chroma_width:  u32,
    pub chroma_height: u32,
    pub y:             Vec<u8>,
    pub u:             Vec<u8>,
    pub v:             Vec<u8>,
}

impl YuvFrame {
    pub fn new(width: u32, height: u32) -> Self {
        let (cw, ch) = ((width + 3) >> 2, (height + 3) >> 2);
        YuvFrame {
            width,
            height,
            chroma_width: cw,
            chroma_height: ch,
            y: vec![16u8; (width * height) as usize],
            u: vec![128u8; (cw * ch) as usize],
            v: vec![128u8; (cw * ch) as usize],
        }
    }

    fn alloc(width: usize, height: usize, chroma_width: usize, chroma_height: usize) -> Result<Self> {
        Ok(YuvFrame {
            width:         width as u32,
            height:        height as u32,
            chroma_width:  chroma_width as u32,
            chroma_height: chroma_height as u32,
            y:             alloc_vec(width * height)?,
            u:             alloc_vec(chroma_width * chroma_height)?,
            v:             alloc_vec(chroma_width * chroma_height)?,
        })
    }

    pub fn to_planar_u8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.y.len() + self.u.len() + self.v.len());
        out.extend_from_slice(&self.y);
        out.extend_from_slice(&self.u);
        out.extend_from_slice(&self.v);
        out
    }
}

/// A picture produced by one decode call.
#[derive(Clone, Debug)]
pub struct DecodedFrame {
    pub is_key_frame: bool,
    pub frame:        YuvFrame,
}

pub struct IviDecoder {
    codec:       Codec,
    ctx:         IviContext,
    buf_invalid: [bool; NUM_BUFS],
    /// Picture carried behind an Indeo 4 intra frame, shown on the next
    /// NULL_LAST frame.
    p_frame:     Option<DecodedFrame>,
}

impl IviDecoder {
    pub fn indeo4() -> Self {
        IviDecoder {
            codec:       Codec::Indeo4(Indeo4Codec::default()),
            ctx:         IviContext::default(),
            buf_invalid: [false; NUM_BUFS],
            p_frame:     None,
        }
    }

    /// Indeo 5 starts from a single band layout of the container's size
    /// until the first GOP header arrives.
    pub fn indeo5(width: usize, height: usize) -> Result<Self> {
        let mut ctx = IviContext::default();
        ctx.realloc(PictureConfig::simple(width, height), false)?;
        Ok(IviDecoder {
            codec: Codec::Indeo5(Indeo5Codec::default()),
            ctx,
            buf_invalid: [false; NUM_BUFS],
            p_frame: None,
        })
    }

    pub fn is_indeo4(&self) -> bool {
        self.codec.get().is_indeo4()
    }

    pub fn pic_config(&self) -> &PictureConfig {
        &self.ctx.pic_conf
    }

    /// Decode one compressed frame. `None` means the previous picture is
    /// to be shown again.
    pub fn decode_frame(&mut self, data: &[u8]) -> Result<Option<DecodedFrame>> {
        let mut br = BitReader::new(data);
        self.codec.get_mut().decode_picture_header(&mut self.ctx, &mut br)?;

        let codec = self.codec.get();
        if codec.gop_invalid() {
            return Err(DecoderError::InvalidData("waiting for a valid GOP header".into()));
        }
        if codec.is_deferred_output() {
            return Ok(self.p_frame.take());
        }
        if codec.is_protected() {
            return Err(DecoderError::UnsupportedFormat("password-protected clip".into()));
        }
        if self.ctx.planes.is_empty() {
            return Err(DecoderError::InvalidData("color planes not initialized".into()));
        }

        self.codec.get_mut().switch_buffers();
        let codec = self.codec.get();
        let roles = codec.roles();
        let nonnull = codec.is_nonnull_frame();

        if nonnull {
            self.buf_invalid[roles.dst] = true;
            self.ctx.decoded[roles.dst] = false;
            for p in 0..self.ctx.planes.len() {
                for b in 0..self.ctx.planes[p].num_bands() {
                    if let Err(e) = self.decode_band(p, b, roles, &mut br) {
                        error!("error while decoding band {b} of plane {p}: {e}");
                        return Err(e);
                    }
                }
            }
            self.buf_invalid[roles.dst] = false;
            self.ctx.decoded[roles.dst] = true;
        } else {
            if self.ctx.pic_conf.is_scalable() {
                return Err(DecoderError::InvalidData("null frame in a scalable stream".into()));
            }
            let missing = self.ctx.planes.iter().any(|pl| pl.bands.first().map_or(true, |b| !b.has_buf(roles.dst)));
            if missing {
                return Err(DecoderError::InvalidData("null frame without a decoded picture".into()));
            }
        }

        if self.buf_invalid[roles.dst] {
            return Err(DecoderError::InvalidData("destination buffer holds a broken picture".into()));
        }
        if !nonnull {
            return Ok(None);
        }

        let frame = self.output(roles.dst)?;
        let is_key_frame = self.codec.get().is_intra_frame();

        if self.is_indeo4() && is_key_frame {
            self.decode_embedded(&mut br, data);
        }

        self.ctx.params.info.report_once();
        Ok(Some(DecodedFrame { is_key_frame, frame }))
    }

    /// Decode the inter frame that may follow an Indeo 4 intra frame in the
    /// same packet.
    fn decode_embedded(&mut self, br: &mut BitReader<'_>, data: &[u8]) {
        let Some(offs) = embedded_frame_offset(br) else {
            return;
        };
        self.p_frame = None;
        match self.decode_frame(&data[offs..]) {
            Ok(p) => self.p_frame = p,
            Err(e) => warn!("embedded frame at byte {offs} failed: {e}"),
        }
    }

    fn decode_band(&mut self, p: usize, b: usize, roles: BufferRoles, br: &mut BitReader<'_>) -> Result<()> {
        {
            let band = &mut self.ctx.planes[p].bands[b];
            if !band.has_buf(roles.dst) {
                return Err(DecoderError::InvalidData(format!("band {b} of plane {p} has no buffer {}", roles.dst)));
            }
            self.codec.get_mut().decode_band_header(&mut self.ctx.params, band, br)?;
            trace!(
                "band {p}/{b}: empty {}, mb {} blk {}, quant {}, rvmap {}, {} corrections",
                band.is_empty,
                band.mb_size,
                band.blk_size,
                band.glob_quant,
                band.rvmap_sel,
                band.corr.len()
            );
            if band.is_empty {
                band.inherit_mv = false;
                band.inherit_qdelta = false;
            }
        }

        let band = &mut self.ctx.planes[p].bands[b];
        let mut dst = std::mem::take(&mut band.bufs[roles.dst]);
        let mut tiles = std::mem::take(&mut band.tiles);

        let codec = self.codec.get();
        // intra pictures never predict, not even from an empty band
        let usable = if codec.is_intra_frame() { [false; NUM_BUFS] } else { self.ctx.decoded };
        let result = decode_tiles(
            codec,
            &self.ctx.params,
            &self.ctx.planes,
            (p, b),
            &mut dst,
            &mut tiles,
            roles,
            usable,
            br,
        );

        let band = &mut self.ctx.planes[p].bands[b];
        band.bufs[roles.dst] = dst;
        band.tiles = tiles;
        result?;

        if let (Some(expected), false) = (band.checksum, band.is_empty) {
            let sum = band.checksum_of(roles.dst);
            if sum != expected {
                warn!("band {b} of plane {p}: checksum {sum:#06x}, expected {expected:#06x}");
            }
        }
        br.align_to_byte();
        Ok(())
    }

    fn output(&self, dst: usize) -> Result<YuvFrame> {
        let [luma, v_plane, u_plane] = self.ctx.planes.as_slice() else {
            return Err(DecoderError::InvalidData("expected three planes".into()));
        };
        let (w, cw) = (luma.width, u_plane.width);
        let mut frame = YuvFrame::alloc(w, luma.height, cw, u_plane.height)?;

        if self.ctx.pic_conf.is_scalable() {
            if self.is_indeo4() {
                recompose_haar(luma, dst, &mut frame.y, w)?;
            } else {
                recompose53(luma, dst, &mut frame.y, w)?;
            }
        } else {
            output_plane(luma, dst, &mut frame.y, w);
        }
        output_plane(u_plane, dst, &mut frame.u, cw);
        output_plane(v_plane, dst, &mut frame.v, cw);
        Ok(frame)
    }
}

/// Skip the version string trailing an Indeo 4 intra frame and locate a
/// following inter frame.
fn embedded_frame_offset(br: &mut BitReader<'_>) -> Option<usize> {
    loop {
        match br.read_bits(8) {
            Ok(0) => break,
            Ok(_) if br.bits_remaining() >= 8 => {}
            _ => return None,
        }
    }
    let skip = 64 - (br.bits_consumed() & 0x18);
    br.skip_bits(skip).ok()?;
    if br.bits_remaining() > 18 && br.peek_bits(21) == EMBEDDED_INTER_SYNC {
        Some(br.bits_consumed() >> 3)
    } else {
        None
    }
}

/// Decode all tiles of band `pb` into `dst`.
///
/// `dst` and `tiles` are moved out of the band while it is decoded so the
/// reference buffers and luma band 0 stay readable. Only slots flagged in
/// `usable` are handed out as references.
#[allow(clippy::too_many_arguments)]
fn decode_tiles(
    codec: &dyn IviCodec,
    params: &FrameParams,
    planes: &[PlaneDesc],
    (p, b): (usize, usize),
    dst: &mut [i16],
    tiles: &mut [Tile],
    roles: BufferRoles,
    usable: [bool; NUM_BUFS],
    br: &mut BitReader<'_>,
) -> Result<()> {
    let band = &planes[p].bands[b];
    let buf = move |idx: usize| {
        band.bufs
            .get(idx)
            .filter(|v| !v.is_empty() && usable.get(idx).copied().unwrap_or(false))
            .map(|v| &v[..])
    };
    let refs = if codec.is_indeo4() && codec.is_bidir_frame() {
        RefBufs { fwd: buf(roles.b_ref), bwd: buf(roles.ref_buf) }
    } else {
        RefBufs { fwd: buf(roles.ref_buf), bwd: None }
    };

    let rvmap = RvMapDesc::corrected(band.rvmap_sel, &band.corr)?;
    let vlc = if band.blk_vlc_from_pic { params.blk_vlc.table() } else { band.blk_vlc.table() };
    let mv_scale = (planes[0].bands[0].mb_size >> 3) as i32 - (band.mb_size >> 3) as i32;
    let ref_tiles = if p == 0 && b == 0 { None } else { Some(&planes[0].bands[0].tiles[..]) };

    let mut bctx = BlockCtx { band, vlc, rvmap: &rvmap, dst, refs, is_indeo4: codec.is_indeo4() };

    if band.is_empty {
        for tile in tiles.iter_mut() {
            bctx.process_empty_tile(tile, None, mv_scale)?;
        }
        return Ok(());
    }

    let mut pos = br.bits_consumed();
    for (t, tile) in tiles.iter_mut().enumerate() {
        if tile.mb_size != band.mb_size {
            return Err(DecoderError::InvalidData(format!(
                "tile {t}: macroblock size {} differs from the band's {}",
                tile.mb_size, band.mb_size
            )));
        }
        let ref_mbs = match (ref_tiles, tile.ref_tile) {
            (Some(rt), Some(i)) => rt.get(i).map(|r| &r.mbs[..]),
            _ => None,
        };

        tile.is_empty = br.read_bit()?;
        if tile.is_empty {
            bctx.process_empty_tile(tile, ref_mbs, mv_scale)?;
            continue;
        }

        tile.data_size = read_tile_data_size(br)?;
        if tile.data_size == 0 {
            return Err(DecoderError::CorruptTileData);
        }
        codec.decode_mb_info(params, band, tile, ref_mbs, mv_scale, br)?;
        bctx.decode_blocks(br, tile)?;

        if (br.bits_consumed() - pos) >> 3 != tile.data_size {
            return Err(DecoderError::CorruptTileData);
        }
        pos += tile.data_size << 3;
    }
    Ok(())
}
