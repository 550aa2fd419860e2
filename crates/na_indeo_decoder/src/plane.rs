//! Plane, band, tile and macroblock descriptors plus their allocation.

use crate::error::{DecoderError, Result};
use crate::rvmap::Corrections;
use crate::transform::TransformDesc;
use crate::vlc::{HuffKind, HuffTab};

/// Number of generation buffers a band can own.
pub const NUM_BUFS: usize = 4;

/// Stream geometry. Any change forces a full reallocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PictureConfig {
    pub pic_width:     usize,
    pub pic_height:    usize,
    pub chroma_width:  usize,
    pub chroma_height: usize,
    pub tile_width:    usize,
    pub tile_height:   usize,
    pub luma_bands:    usize,
    pub chroma_bands:  usize,
}

impl PictureConfig {
    /// Single-band layout with one tile covering the picture.
    pub fn simple(width: usize, height: usize) -> Self {
        PictureConfig {
            pic_width:     width,
            pic_height:    height,
            chroma_width:  (width + 3) >> 2,
            chroma_height: (height + 3) >> 2,
            tile_width:    width,
            tile_height:   height,
            luma_bands:    1,
            chroma_bands:  1,
        }
    }

    pub fn is_scalable(&self) -> bool {
        self.luma_bands != 1 || self.chroma_bands != 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MbInfo {
    pub xpos:     usize,
    pub ypos:     usize,
    pub buf_offs: usize,
    /// 0 intra, 1 forward, 2 backward, 3 bidirectional
    pub mb_type:  u8,
    pub cbp:      u8,
    pub q_delta:  i32,
    pub mv_x:     i32,
    pub mv_y:     i32,
    pub b_mv_x:   i32,
    pub b_mv_y:   i32,
}

#[derive(Clone, Debug, Default)]
pub struct Tile {
    pub xpos:      usize,
    pub ypos:      usize,
    pub width:     usize,
    pub height:    usize,
    pub mb_size:   usize,
    pub is_empty:  bool,
    pub data_size: usize,
    pub num_mbs:   usize,
    pub mbs:       Vec<MbInfo>,
    /// Index of the luma band 0 tile used for MV/quant inheritance.
    pub ref_tile:  Option<usize>,
}

/// Macroblock count of a `width` x `height` area.
#[inline]
pub fn mbs_per_tile(width: usize, height: usize, mb_size: usize) -> usize {
    width.div_ceil(mb_size) * height.div_ceil(mb_size)
}

#[derive(Clone)]
pub struct BandDesc {
    pub plane:          usize,
    pub band_num:       usize,
    pub width:          usize,
    pub height:         usize,
    pub pitch:          usize,
    pub aheight:        usize,
    pub bufs:           [Vec<i16>; NUM_BUFS],

    pub mb_size:        usize,
    pub blk_size:       usize,
    pub is_empty:       bool,
    pub is_halfpel:     bool,
    pub inherit_mv:     bool,
    pub inherit_qdelta: bool,
    pub qdelta_present: bool,
    pub quant_mat:      usize,
    pub glob_quant:     i32,
    pub data_size:      usize,
    pub checksum:       Option<u16>,

    pub scan:           &'static [u8],
    pub transform:      Option<TransformDesc>,
    pub intra_base:     &'static [u16],
    pub inter_base:     &'static [u16],
    pub intra_scale:    Option<&'static [u8]>,
    pub inter_scale:    Option<&'static [u8]>,

    pub blk_vlc:          HuffTab,
    /// Use the picture-level block codebook instead of `blk_vlc`.
    pub blk_vlc_from_pic: bool,
    pub rvmap_sel:        usize,
    pub corr:             Corrections,

    pub tiles:          Vec<Tile>,
}

impl BandDesc {
    fn new(plane: usize, band_num: usize) -> Self {
        BandDesc {
            plane,
            band_num,
            width:          0,
            height:         0,
            pitch:          0,
            aheight:        0,
            bufs:           Default::default(),
            mb_size:        0,
            blk_size:       0,
            is_empty:       false,
            is_halfpel:     false,
            inherit_mv:     false,
            inherit_qdelta: false,
            qdelta_present: false,
            quant_mat:      0,
            glob_quant:     0,
            data_size:      0,
            checksum:       None,
            scan:           &[],
            transform:      None,
            intra_base:     &[],
            inter_base:     &[],
            intra_scale:    None,
            inter_scale:    None,
            blk_vlc:          HuffTab::new(HuffKind::Block),
            blk_vlc_from_pic: false,
            rvmap_sel:        8,
            corr:             Corrections::default(),
            tiles:          Vec::new(),
        }
    }

    #[inline]
    pub fn buf_size(&self) -> usize {
        self.pitch * self.aheight
    }

    #[inline]
    pub fn transform_size(&self) -> usize {
        self.transform.map_or(self.blk_size, |t| t.size())
    }

    pub fn has_buf(&self, idx: usize) -> bool {
        self.bufs.get(idx).is_some_and(|b| b.len() == self.buf_size() && !b.is_empty())
    }

    /// Wrapping 16-bit sum of the visible samples of buffer `idx`.
    pub fn checksum_of(&self, idx: usize) -> u16 {
        let mut sum = 0u16;
        if let Some(buf) = self.bufs.get(idx) {
            for row in buf.chunks(self.pitch.max(1)).take(self.height) {
                for &v in &row[..self.width.min(row.len())] {
                    sum = sum.wrapping_add(v as u16);
                }
            }
        }
        sum
    }
}

#[derive(Clone)]
pub struct PlaneDesc {
    pub width:  usize,
    pub height: usize,
    pub bands:  Vec<BandDesc>,
}

impl PlaneDesc {
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }
}

pub(crate) fn alloc_vec<T: Clone + Default>(len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| DecoderError::OutOfMemory)?;
    v.resize(len, T::default());
    Ok(v)
}

/// Build the three plane descriptors and their band buffers for `cfg`.
///
/// Luma bands are aligned to 16x16, chroma bands to 8x8. Two buffers per
/// band, a third when luma is split into 4 bands, and a fourth for Indeo 4.
pub fn init_planes(cfg: &PictureConfig, is_indeo4: bool) -> Result<Vec<PlaneDesc>> {
    let (w, h) = (cfg.pic_width, cfg.pic_height);
    if w == 0 || h == 0 || (w + 128).saturating_mul(h + 128) >= (i32::MAX / 8) as usize {
        return Err(DecoderError::InvalidData(format!("picture size {w}x{h}")));
    }
    if cfg.luma_bands < 1 || cfg.chroma_bands < 1 {
        return Err(DecoderError::InvalidData("no bands".into()));
    }

    let mut planes = Vec::with_capacity(3);
    for p in 0..3 {
        let (pw, ph, nb) = if p == 0 {
            (w, h, cfg.luma_bands)
        } else {
            ((w + 3) >> 2, (h + 3) >> 2, cfg.chroma_bands)
        };
        let (bw, bh) = if nb == 1 { (pw, ph) } else { ((pw + 1) >> 1, (ph + 1) >> 1) };
        let align = if p == 0 { 16 } else { 8 };
        let pitch = bw.next_multiple_of(align);
        let aheight = bh.next_multiple_of(align);
        let buf_size = pitch * aheight;

        let mut bands = Vec::with_capacity(nb);
        for b in 0..nb {
            let mut band = BandDesc::new(p, b);
            band.width = bw;
            band.height = bh;
            band.pitch = pitch;
            band.aheight = aheight;
            band.bufs[0] = alloc_vec(buf_size)?;
            band.bufs[1] = alloc_vec(buf_size)?;
            if cfg.luma_bands > 1 {
                band.bufs[2] = alloc_vec(buf_size)?;
            }
            if is_indeo4 {
                band.bufs[3] = alloc_vec(buf_size)?;
            }
            bands.push(band);
        }
        planes.push(PlaneDesc { width: pw, height: ph, bands });
    }
    Ok(planes)
}

/// Partition every band into tiles and wire them to luma band 0.
pub fn init_tiles(planes: &mut [PlaneDesc], tile_width: usize, tile_height: usize) -> Result<()> {
    let mut ref_mbs: Vec<usize> = Vec::new();
    for (p, plane) in planes.iter_mut().enumerate() {
        let (mut tw, mut th) = if p == 0 {
            (tile_width, tile_height)
        } else {
            ((tile_width + 3) >> 2, (tile_height + 3) >> 2)
        };
        if p == 0 && plane.num_bands() == 4 {
            tw >>= 1;
            th >>= 1;
        }
        if tw == 0 || th == 0 {
            return Err(DecoderError::InvalidData(format!("tile size {tw}x{th}")));
        }

        for (b, band) in plane.bands.iter_mut().enumerate() {
            let x_tiles = band.width.div_ceil(tw);
            let y_tiles = band.height.div_ceil(th);
            let mut tiles = Vec::new();
            tiles.try_reserve_exact(x_tiles * y_tiles).map_err(|_| DecoderError::OutOfMemory)?;

            let mut idx = 0;
            for y in (0..band.height).step_by(th) {
                for x in (0..band.width).step_by(tw) {
                    let width = (band.width - x).min(tw);
                    let height = (band.height - y).min(th);
                    let num_mbs = mbs_per_tile(width, height, band.mb_size.max(1));
                    let ref_tile = if p == 0 && b == 0 {
                        None
                    } else {
                        match ref_mbs.get(idx) {
                            Some(&n) if n == num_mbs => Some(idx),
                            _ => {
                                return Err(DecoderError::InvalidData(format!(
                                    "tile {idx} of plane {p} band {b} does not match its reference"
                                )))
                            }
                        }
                    };
                    tiles.push(Tile {
                        xpos: x,
                        ypos: y,
                        width,
                        height,
                        mb_size: band.mb_size,
                        is_empty: false,
                        data_size: 0,
                        num_mbs,
                        mbs: alloc_vec(num_mbs)?,
                        ref_tile,
                    });
                    idx += 1;
                }
            }
            if p == 0 && b == 0 {
                ref_mbs = tiles.iter().map(|t| t.num_mbs).collect();
            }
            band.tiles = tiles;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_sizes(planes: &mut [PlaneDesc], luma_mb: usize, chroma_mb: usize) {
        for (p, plane) in planes.iter_mut().enumerate() {
            for band in plane.bands.iter_mut() {
                band.mb_size = if p == 0 { luma_mb } else { chroma_mb };
                band.blk_size = if p == 0 { 8 } else { 4 };
            }
        }
    }

    #[test]
    fn plane_geometry() {
        let cfg = PictureConfig::simple(160, 120);
        let planes = init_planes(&cfg, true).unwrap();
        assert_eq!(planes.len(), 3);
        let y = &planes[0].bands[0];
        assert_eq!((y.width, y.height, y.pitch, y.aheight), (160, 120, 160, 128));
        assert!(y.has_buf(0) && y.has_buf(1) && !y.has_buf(2) && y.has_buf(3));
        let u = &planes[1].bands[0];
        assert_eq!((planes[1].width, planes[1].height), (40, 30));
        assert_eq!((u.pitch, u.aheight), (40, 32));
    }

    #[test]
    fn scalable_geometry() {
        let mut cfg = PictureConfig::simple(322, 240);
        cfg.luma_bands = 4;
        let planes = init_planes(&cfg, false).unwrap();
        assert_eq!(planes[0].num_bands(), 4);
        let b = &planes[0].bands[3];
        assert_eq!((b.width, b.height, b.pitch), (161, 120, 176));
        assert!(b.has_buf(2) && !b.has_buf(3));
        assert!(planes[2].bands[0].has_buf(2));
    }

    #[test]
    fn rejects_bad_config() {
        assert!(init_planes(&PictureConfig::simple(0, 16), false).is_err());
        let mut cfg = PictureConfig::simple(16, 16);
        cfg.chroma_bands = 0;
        assert!(init_planes(&cfg, false).is_err());
        assert!(init_planes(&PictureConfig::simple(40000, 40000), false).is_err());
    }

    #[test]
    fn tiles_reference_luma_band0() {
        let cfg = PictureConfig::simple(160, 120);
        let mut planes = init_planes(&cfg, false).unwrap();
        with_sizes(&mut planes, 16, 4);
        init_tiles(&mut planes, 64, 64).unwrap();
        let y = &planes[0].bands[0];
        assert_eq!(y.tiles.len(), 3 * 2);
        assert_eq!(y.tiles[2].width, 32);
        assert_eq!(y.tiles[5].height, 56);
        assert_eq!(y.tiles[0].num_mbs, 16);
        assert_eq!(y.tiles[5].num_mbs, 2 * 4);
        assert!(y.tiles.iter().all(|t| t.ref_tile.is_none()));
        // chroma tiles are 16x16 with 4x4 macroblocks
        let u = &planes[2].bands[0];
        assert_eq!(u.tiles.len(), 3 * 2);
        assert_eq!(u.tiles[4].ref_tile, Some(4));
        assert_eq!(u.tiles[0].num_mbs, 16);
    }

    #[test]
    fn tile_mismatch_is_rejected() {
        let cfg = PictureConfig::simple(64, 64);
        let mut planes = init_planes(&cfg, false).unwrap();
        with_sizes(&mut planes, 16, 8);
        assert!(init_tiles(&mut planes, 64, 64).is_err());
        with_sizes(&mut planes, 16, 4);
        assert!(init_tiles(&mut planes, 0, 64).is_err());
    }

    #[test]
    fn checksum_covers_visible_area() {
        let cfg = PictureConfig::simple(4, 4);
        let mut planes = init_planes(&cfg, false).unwrap();
        let band = &mut planes[0].bands[0];
        band.bufs[0].fill(1);
        assert_eq!(band.checksum_of(0), 16);
        band.bufs[0][0] = -1;
        assert_eq!(band.checksum_of(0), 14);
    }
}
