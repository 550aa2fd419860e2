//! Synthetic Indeo 4/5 bitstreams for the integration tests.
//!
//! Pictures are built with the default codebooks, run/value table 8, one
//! tile per band, 16x16 luma macroblocks of 8x8 blocks and 4x4 chroma
//! macroblocks. Sizes must be multiples of 16.

#![allow(dead_code)]

use indeo_decoder::rvmap::RVMAP_TABS;
use indeo_decoder::vlc::{HuffKind, DEFAULT_TAB};

// ─── Bit writer ──────────────────────────────────────────────────────────────

/// LSB-first bit writer matching the decoder's reader.
#[derive(Default)]
pub struct BitWriter {
    out: Vec<u8>,
    pos: usize,
}

impl BitWriter {
    pub fn put(&mut self, val: u32, n: u32) -> &mut Self {
        assert!(n <= 32, "at most 32 bits per write");
        for i in 0..n {
            self.bit((val >> i) & 1 != 0);
        }
        self
    }

    pub fn bit(&mut self, b: bool) -> &mut Self {
        if self.pos % 8 == 0 {
            self.out.push(0);
        }
        if b {
            self.out[self.pos / 8] |= 1 << (self.pos % 8);
        }
        self.pos += 1;
        self
    }

    /// Write an MSB-first codeword.
    pub fn code(&mut self, (code, len): (u16, u8)) -> &mut Self {
        for b in (0..len).rev() {
            self.bit((code >> b) & 1 != 0);
        }
        self
    }

    pub fn zeros(&mut self, mut n: usize) -> &mut Self {
        while n > 0 {
            let k = n.min(32);
            self.put(0, k as u32);
            n -= k;
        }
        self
    }

    pub fn align(&mut self) -> &mut Self {
        self.pos = self.pos.next_multiple_of(8);
        self
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.align();
        self.out.extend_from_slice(data);
        self.pos += data.len() * 8;
        self
    }

    pub fn bits(&self) -> usize {
        self.pos
    }

    pub fn finish(&mut self) -> Vec<u8> {
        self.align();
        std::mem::take(&mut self.out)
    }
}

// ─── Codes ───────────────────────────────────────────────────────────────────

pub fn mb_code(sym: usize) -> (u16, u8) {
    HuffKind::Macroblock.static_desc(DEFAULT_TAB).codewords_truncated().unwrap()[sym]
}

pub fn blk_code(sym: usize) -> (u16, u8) {
    HuffKind::Block.static_desc(DEFAULT_TAB).codewords_truncated().unwrap()[sym]
}

/// Codebook symbol of a signed value.
pub fn signed_sym(v: i32) -> usize {
    if v > 0 { (2 * v - 1) as usize } else { (-2 * v) as usize }
}

/// Symbol of `(run, val)` in run/value table 8.
pub fn rv_symbol(run: u8, val: i8) -> usize {
    let map = &RVMAP_TABS[8];
    (0..256)
        .find(|&s| s != map.eob_sym as usize && s != map.esc_sym as usize && map.runtab[s] == run && map.valtab[s] == val)
        .expect("run/value pair present in table 8")
}

pub fn eob_symbol() -> usize {
    RVMAP_TABS[8].eob_sym as usize
}

// ─── Tiles ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    Iv4,
    Iv5,
}

#[derive(Clone, Copy, Debug)]
pub enum Mb {
    /// Intra macroblock. `Some(v)` codes a DC level `v` in its first block.
    Intra(Option<i8>),
    /// Skipped macroblock.
    Skip,
    /// Forward predicted macroblock without residual.
    Inter(i32, i32),
    /// Zero vector with DC level `v` added to the first block.
    InterDc(i8),
    /// Indeo 4 B-frame macroblock of type 1 (forward), 2 (backward) or 3
    /// (both) with zero vectors.
    Bidir(u8),
}

#[derive(Clone, Debug)]
pub enum TileSpec {
    Empty,
    Coded(Vec<Mb>),
}

impl TileSpec {
    pub fn intra(n: usize) -> Self {
        TileSpec::Coded(vec![Mb::Intra(None); n])
    }

    /// First block carries DC level `v`, every other block repeats it.
    pub fn intra_dc(n: usize, v: i8) -> Self {
        let mut mbs = vec![Mb::Intra(None); n];
        mbs[0] = Mb::Intra(Some(v));
        TileSpec::Coded(mbs)
    }

    pub fn inter(n: usize) -> Self {
        TileSpec::Coded(vec![Mb::Inter(0, 0); n])
    }

    pub fn skipped(n: usize) -> Self {
        TileSpec::Coded(vec![Mb::Skip; n])
    }
}

/// Write one tile. `blks_per_mb` is 4 for luma and 1 for chroma.
pub fn write_tile(bw: &mut BitWriter, version: Version, blks_per_mb: u32, tile: &TileSpec) {
    let mbs = match tile {
        TileSpec::Empty => {
            bw.bit(true).align();
            return;
        }
        TileSpec::Coded(mbs) => mbs,
    };

    let mut body = BitWriter::default();
    let (mut mv_x, mut mv_y) = (0i32, 0i32);
    for mb in mbs {
        match *mb {
            Mb::Skip => {
                body.bit(true);
            }
            Mb::Intra(dc) => {
                let cbp = dc.is_some() as u32;
                body.bit(false).put(cbp, blks_per_mb);
                if cbp != 0 && version == Version::Iv4 {
                    body.code(mb_code(0));
                }
            }
            Mb::Inter(x, y) => {
                body.bit(false).bit(true).put(0, blks_per_mb);
                body.code(mb_code(signed_sym(y - mv_y)));
                body.code(mb_code(signed_sym(x - mv_x)));
                (mv_x, mv_y) = (x, y);
            }
            Mb::InterDc(_) => {
                body.bit(false).bit(true).put(1, blks_per_mb);
                if version == Version::Iv4 {
                    body.code(mb_code(0));
                }
                body.code(mb_code(signed_sym(-mv_y)));
                body.code(mb_code(signed_sym(-mv_x)));
                (mv_x, mv_y) = (0, 0);
            }
            Mb::Bidir(t) => {
                body.bit(false).put(t as u32, 2).put(0, blks_per_mb);
                body.code(mb_code(signed_sym(-mv_y)));
                body.code(mb_code(signed_sym(-mv_x)));
                if t == 3 {
                    body.code(mb_code(0)).code(mb_code(0));
                }
                (mv_x, mv_y) = (0, 0);
            }
        }
    }
    body.align();
    for mb in mbs {
        if let Mb::Intra(Some(v)) | Mb::InterDc(v) = *mb {
            body.code(blk_code(rv_symbol(1, v)));
            body.code(blk_code(eob_symbol()));
        }
    }
    let body = body.finish();

    let len = body.len() + 2;
    assert!(len < 255);
    bw.bit(false).bit(true).put(len as u32, 8).align();
    bw.bytes(&body);
}

pub fn luma_mbs(width: u32, height: u32) -> usize {
    (width.div_ceil(16) * height.div_ceil(16)) as usize
}

pub fn chroma_mbs(width: u32, height: u32) -> usize {
    let (cw, ch) = ((width + 3) >> 2, (height + 3) >> 2);
    (cw.div_ceil(4) * ch.div_ceil(4)) as usize
}

// ─── Indeo 4 ─────────────────────────────────────────────────────────────────

pub const IV4_LUMA_QUANT: u32 = 31;

pub mod iv4 {
    pub const INTRA: u32 = 0;
    pub const INTER: u32 = 2;
    pub const BIDIR: u32 = 3;
    pub const NULL_FIRST: u32 = 5;
    pub const NULL_LAST: u32 = 6;
}

pub fn iv4_picture_header(bw: &mut BitWriter, ftype: u32, width: u32, height: u32) {
    iv4_picture_header_with(bw, ftype, width, height, false);
}

/// Picture header; `scalable` splits luma into four bands.
pub fn iv4_picture_header_with(bw: &mut BitWriter, ftype: u32, width: u32, height: u32, scalable: bool) {
    bw.put(0x3FFF8, 18).put(ftype, 3);
    // transparency, sync bit, data size
    bw.bit(false).bit(false).bit(false);
    if ftype >= 5 {
        bw.align();
        return;
    }
    bw.bit(false).put(7, 3).put(height, 16).put(width, 16);
    // no tiling, YVU9
    bw.bit(false).put(0, 2);
    if scalable {
        bw.put(2, 2).put(3, 2).put(3, 2).put(3, 2).put(3, 2);
    } else {
        bw.put(3, 2);
    }
    bw.put(3, 2);
    // frame number, decode time, codebooks, rvmap
    bw.bit(false).bit(false).bit(false).bit(false).bit(false);
    // in_imf, in_q, global quant
    bw.bit(false).bit(false).put(12, 5);
    bw.bit(false).bit(false).bit(false).bit(false).align();
}

/// Indeo 4 band header fields.
#[derive(Clone, Copy, Debug)]
pub struct Iv4Band {
    pub plane:     u32,
    pub band:      u32,
    pub empty:     bool,
    pub halfpel:   bool,
    pub checksum:  Option<u16>,
    /// 0: 16x16 of 8x8, 1: 8x8 of 8x8, 2: 4x4 of 4x4.
    pub size_idx:  u32,
    pub transform: u32,
    pub scan:      u32,
}

impl Iv4Band {
    pub fn new(plane: u32) -> Self {
        let luma = plane == 0;
        Iv4Band {
            plane,
            band: 0,
            empty: false,
            halfpel: false,
            checksum: None,
            size_idx: if luma { 0 } else { 2 },
            transform: if luma { 4 } else { 11 },
            scan: if luma { 0 } else { 5 },
        }
    }

    /// Luma band `band` of a four band picture.
    pub fn scalable_luma(band: u32) -> Self {
        Iv4Band { band, size_idx: 1, ..Iv4Band::new(0) }
    }

    pub fn empty(self) -> Self {
        Iv4Band { empty: true, ..self }
    }

    pub fn blks_per_mb(&self) -> u32 {
        if self.size_idx == 0 { 4 } else { 1 }
    }
}

pub fn iv4_band_header(bw: &mut BitWriter, plane: u32) {
    iv4_band_header_with(bw, &Iv4Band::new(plane));
}

pub fn iv4_band_header_with(bw: &mut BitWriter, band: &Iv4Band) {
    bw.put(band.plane, 2).put(band.band, 4).bit(band.empty);
    if band.empty {
        bw.align();
        return;
    }
    // no header size
    bw.bit(false).put(band.halfpel as u32, 2);
    match band.checksum {
        Some(sum) => bw.bit(true).put(sum as u32, 16),
        None => bw.bit(false),
    };
    bw.put(band.size_idx, 2).bit(false).bit(false).put(IV4_LUMA_QUANT, 5);
    bw.bit(false).put(band.transform, 5).put(band.scan, 4).put(0, 5);
    bw.bit(false).bit(false).bit(false).align();
}

/// Write a picture made of `bands` in plane order. Empty bands carry no tile.
pub fn iv4_bands_into(bw: &mut BitWriter, ftype: u32, width: u32, height: u32, scalable: bool, bands: &[(Iv4Band, TileSpec)]) {
    iv4_picture_header_with(bw, ftype, width, height, scalable);
    for (band, tile) in bands {
        iv4_band_header_with(bw, band);
        if !band.empty {
            write_tile(bw, Version::Iv4, band.blks_per_mb(), tile);
        }
        bw.align();
    }
}

pub fn iv4_bands(ftype: u32, width: u32, height: u32, scalable: bool, bands: &[(Iv4Band, TileSpec)]) -> Vec<u8> {
    let mut bw = BitWriter::default();
    iv4_bands_into(&mut bw, ftype, width, height, scalable, bands);
    bw.finish()
}

/// A complete Indeo 4 frame. `tiles` holds the luma, V and U tiles.
pub fn iv4_frame(ftype: u32, width: u32, height: u32, tiles: &[TileSpec; 3]) -> Vec<u8> {
    let mut bw = BitWriter::default();
    iv4_frame_into(&mut bw, ftype, width, height, tiles);
    bw.finish()
}

pub fn iv4_frame_into(bw: &mut BitWriter, ftype: u32, width: u32, height: u32, tiles: &[TileSpec; 3]) {
    if ftype >= 5 {
        iv4_picture_header(bw, ftype, width, height);
        return;
    }
    let bands: Vec<_> = tiles.iter().enumerate().map(|(p, t)| (Iv4Band::new(p as u32), t.clone())).collect();
    iv4_bands_into(bw, ftype, width, height, false, &bands);
}

pub fn iv4_null(ftype: u32) -> Vec<u8> {
    let mut bw = BitWriter::default();
    iv4_picture_header(&mut bw, ftype, 0, 0);
    bw.finish()
}

pub fn iv4_intra(width: u32, height: u32) -> Vec<u8> {
    let (l, c) = (luma_mbs(width, height), chroma_mbs(width, height));
    iv4_frame(iv4::INTRA, width, height, &[TileSpec::intra(l), TileSpec::intra(c), TileSpec::intra(c)])
}

pub fn iv4_intra_dc(width: u32, height: u32, v: i8) -> Vec<u8> {
    let (l, c) = (luma_mbs(width, height), chroma_mbs(width, height));
    iv4_frame(iv4::INTRA, width, height, &[TileSpec::intra_dc(l, v), TileSpec::intra(c), TileSpec::intra(c)])
}

/// Macroblocks of one luma band when luma is split into four.
pub fn scalable_luma_mbs(width: u32, height: u32) -> usize {
    ((width / 2).div_ceil(8) * (height / 2).div_ceil(8)) as usize
}

/// Four band Indeo 4 intra picture, DC level `v` in luma band 0 only.
pub fn iv4_scalable_intra_dc(width: u32, height: u32, v: i8) -> Vec<u8> {
    let (l, c) = (scalable_luma_mbs(width, height), chroma_mbs(width, height));
    let mut bands: Vec<_> = (0..4)
        .map(|b| (Iv4Band::scalable_luma(b), if b == 0 { TileSpec::intra_dc(l, v) } else { TileSpec::intra(l) }))
        .collect();
    bands.push((Iv4Band::new(1), TileSpec::intra(c)));
    bands.push((Iv4Band::new(2), TileSpec::intra(c)));
    iv4_bands(iv4::INTRA, width, height, true, &bands)
}

// ─── Indeo 5 ─────────────────────────────────────────────────────────────────

pub const IV5_LUMA_QUANT: u32 = 23;

pub mod iv5 {
    pub const INTRA: u32 = 0;
    pub const INTER: u32 = 1;
    pub const NULL: u32 = 4;
}

pub fn iv5_picture_header(bw: &mut BitWriter, ftype: u32, frame_num: u32, width: u32, height: u32) {
    iv5_picture_header_with(bw, ftype, frame_num, width, height, false);
}

/// Picture header; `scalable` selects four 8x8 luma bands in the GOP.
pub fn iv5_picture_header_with(bw: &mut BitWriter, ftype: u32, frame_num: u32, width: u32, height: u32, scalable: bool) {
    bw.put(0x1F, 5).put(ftype, 3).put(frame_num, 8);
    if ftype == iv5::INTRA {
        // GOP: no flags, luma and chroma band counts, explicit size
        bw.put(0, 8).put(scalable as u32, 2).put(0, 1).put(15, 4).put(height, 13).put(width, 13);
        if scalable {
            // four fullpel bands of 8x8 macroblocks
            for _ in 0..4 {
                bw.bit(false).bit(true).bit(false).bit(false).put(0, 2);
            }
        } else {
            // luma: fullpel, 16x16 macroblocks of 8x8 blocks
            bw.bit(false).bit(false).bit(false).bit(false).put(0, 2);
        }
        // chroma: fullpel, 4x4 macroblocks of one 4x4 block
        bw.bit(false).bit(true).bit(true).bit(false).put(0, 2);
        bw.align().put(0, 23).bit(false).align();
    }
    if ftype != iv5::NULL {
        bw.put(0, 8).put(0, 3);
    }
    bw.align();
}

pub fn iv5_band_header(bw: &mut BitWriter) {
    bw.put(0, 8).bit(false).put(IV5_LUMA_QUANT, 5).align();
}

pub fn iv5_frame(ftype: u32, frame_num: u32, width: u32, height: u32, tiles: &[TileSpec; 3]) -> Vec<u8> {
    let bands: Vec<_> = tiles.iter().cloned().map(Some).collect();
    iv5_bands(ftype, frame_num, width, height, false, &bands)
}

/// Picture made of `bands` in plane order, `None` marking an empty band.
/// Luma takes four bands when `scalable` is set.
pub fn iv5_bands(ftype: u32, frame_num: u32, width: u32, height: u32, scalable: bool, bands: &[Option<TileSpec>]) -> Vec<u8> {
    let mut bw = BitWriter::default();
    iv5_picture_header_with(&mut bw, ftype, frame_num, width, height, scalable);
    if ftype != iv5::NULL {
        let luma_bands = if scalable { 4 } else { 1 };
        for (i, band) in bands.iter().enumerate() {
            match band {
                Some(tile) => {
                    iv5_band_header(&mut bw);
                    let blks = if i < luma_bands && !scalable { 4 } else { 1 };
                    write_tile(&mut bw, Version::Iv5, blks, tile);
                }
                None => {
                    bw.put(1, 8);
                }
            }
            bw.align();
        }
    }
    bw.finish()
}

pub fn iv5_intra(width: u32, height: u32) -> Vec<u8> {
    let (l, c) = (luma_mbs(width, height), chroma_mbs(width, height));
    iv5_frame(iv5::INTRA, 0, width, height, &[TileSpec::intra(l), TileSpec::intra(c), TileSpec::intra(c)])
}

pub fn iv5_intra_dc(width: u32, height: u32, v: i8) -> Vec<u8> {
    let (l, c) = (luma_mbs(width, height), chroma_mbs(width, height));
    iv5_frame(iv5::INTRA, 0, width, height, &[TileSpec::intra_dc(l, v), TileSpec::intra(c), TileSpec::intra(c)])
}

/// Four band Indeo 5 intra picture, DC level `v` in luma band 0 only.
pub fn iv5_scalable_intra_dc(width: u32, height: u32, v: i8) -> Vec<u8> {
    let (l, c) = (scalable_luma_mbs(width, height), chroma_mbs(width, height));
    let mut bands = vec![Some(TileSpec::intra_dc(l, v))];
    bands.extend((0..3).map(|_| Some(TileSpec::intra(l))));
    bands.push(Some(TileSpec::intra(c)));
    bands.push(Some(TileSpec::intra(c)));
    iv5_bands(iv5::INTRA, 0, width, height, true, &bands)
}

/// Intra picture whose GOP header misses the luma band end marker.
pub fn iv5_broken_gop(width: u32, height: u32) -> Vec<u8> {
    let mut bw = BitWriter::default();
    bw.put(0x1F, 5).put(iv5::INTRA, 3).put(0, 8);
    bw.put(0, 8).put(0, 2).put(0, 1).put(15, 4).put(height, 13).put(width, 13);
    bw.bit(false).bit(false).bit(false).bit(false).put(1, 2);
    bw.finish()
}

pub fn iv5_null(frame_num: u32) -> Vec<u8> {
    iv5_frame(iv5::NULL, frame_num, 0, 0, &[TileSpec::Empty, TileSpec::Empty, TileSpec::Empty])
}
