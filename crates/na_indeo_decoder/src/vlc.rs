/// Indeo VLC tables
///
/// Codebooks are described by a row count and a per-row count of "extra"
/// bits. Row `i` holds `2^xbits[i]` codes made of `i` one-bits, a terminating
/// zero (absent on the last row) and `xbits[i]` suffix bits. Codes are built
/// MSB-first and bit-reversed so a LSB-first peek indexes the table directly.

use lazy_static::lazy_static;
use log::error;

use crate::bitreader::BitReader;
use crate::error::{DecoderError, Result};

/// Maximum code length and lookup width.
pub const IVI_VLC_BITS: u32 = 13;

/// Hard cap on the number of codes a descriptor may generate.
pub const MAX_CODES: usize = 256;

// ─── Descriptors ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HuffDesc {
    pub num_rows: u8,
    pub xbits:    [u8; 16],
}

impl HuffDesc {
    /// Descriptor from a row list. Rows past 16 are ignored.
    pub fn from_rows(rows: &[u8]) -> Self {
        let mut xbits = [0u8; 16];
        let n = rows.len().min(16);
        xbits[..n].copy_from_slice(&rows[..n]);
        HuffDesc { num_rows: n as u8, xbits }
    }

    pub fn rows(&self) -> &[u8] {
        &self.xbits[..self.num_rows as usize]
    }

    /// Enumerate `(codeword, length)` pairs in symbol order, MSB-first.
    ///
    /// More than [`MAX_CODES`] codewords is an error.
    pub fn codewords(&self) -> Result<Vec<(u16, u8)>> {
        self.gen_codes(false)
    }

    /// Like [`codewords`](Self::codewords) but drop every code past
    /// [`MAX_CODES`]. The built-in block codebook 7 needs this.
    pub fn codewords_truncated(&self) -> Result<Vec<(u16, u8)>> {
        self.gen_codes(true)
    }

    fn gen_codes(&self, truncate: bool) -> Result<Vec<(u16, u8)>> {
        let rows = self.num_rows as usize;
        let mut codes = Vec::with_capacity(MAX_CODES);
        for i in 0..rows {
            let xb = self.xbits[i] as u32;
            let not_last = (i + 1 != rows) as u32;
            let len = i as u32 + xb + not_last;
            if len > IVI_VLC_BITS {
                return Err(DecoderError::InvalidHuffmanDescriptor);
            }
            let prefix = ((1u32 << i) - 1) << (xb + not_last);
            for j in 0..(1u32 << xb) {
                if codes.len() >= MAX_CODES {
                    if truncate {
                        return Ok(codes);
                    }
                    return Err(DecoderError::InvalidHuffmanDescriptor);
                }
                codes.push(((prefix | j) as u16, len.max(1) as u8));
            }
        }
        Ok(codes)
    }
}

/// Reverse the low `nbits` bits of `val`.
#[inline]
pub fn inv_bits(val: u16, nbits: u8) -> u16 {
    if nbits == 0 { return 0; }
    val.reverse_bits() >> (16 - nbits as u32)
}

// ─── Lookup table ────────────────────────────────────────────────────────────

/// Direct-indexed decode table: `entries[peek(13)] = (symbol, code_len)`.
#[derive(Clone)]
pub struct VlcTable {
    entries:   Vec<(u16, u8)>,
    num_codes: usize,
}

impl VlcTable {
    pub fn build(desc: &HuffDesc) -> Result<Self> {
        Self::from_codes(&desc.codewords()?)
    }

    fn from_codes(codes: &[(u16, u8)]) -> Result<Self> {
        let size = 1usize << IVI_VLC_BITS;
        let mut entries = vec![(0u16, 0u8); size];
        for (sym, &(code, len)) in codes.iter().enumerate() {
            let rev = inv_bits(code, len) as usize;
            let step = 1usize << len;
            let mut idx = rev;
            while idx < size {
                entries[idx] = (sym as u16, len);
                idx += step;
            }
        }
        Ok(VlcTable { entries, num_codes: codes.len() })
    }

    /// Table that rejects every code.
    fn empty() -> Self {
        VlcTable { entries: vec![(0, 0); 1 << IVI_VLC_BITS], num_codes: 0 }
    }

    pub fn num_codes(&self) -> usize {
        self.num_codes
    }

    /// Decode one symbol and advance the reader by its length.
    #[inline]
    pub fn decode(&self, br: &mut BitReader<'_>) -> Result<u32> {
        let peek = br.peek_bits(IVI_VLC_BITS) as usize;
        let (sym, len) = self.entries[peek];
        if len == 0 {
            return Err(DecoderError::CorruptTileData);
        }
        br.skip_bits(len as usize)?;
        Ok(sym as u32)
    }

    /// Decode a symbol and fold it into a signed value.
    #[inline]
    pub fn decode_signed(&self, br: &mut BitReader<'_>) -> Result<i32> {
        self.decode(br).map(to_signed)
    }
}

/// Map 0, 1, 2, 3, 4, ... to 0, 1, -1, 2, -2, ...
#[inline(always)]
pub fn to_signed(v: u32) -> i32 {
    let v = v as i32;
    -((v >> 1) ^ -(v & 1))
}

// ─── Static codebooks ────────────────────────────────────────────────────────

const MB_HUFF_DESCS: [&[u8]; 8] = [
    &[0, 4, 5, 4, 4, 4, 6, 6],
    &[0, 2, 2, 3, 3, 3, 3, 5, 3, 2, 2, 2],
    &[0, 2, 3, 4, 3, 3, 3, 3, 4, 3, 2, 2],
    &[0, 3, 4, 4, 3, 3, 3, 3, 3, 2, 2, 2],
    &[0, 4, 4, 3, 3, 3, 3, 2, 3, 3, 2, 1, 1],
    &[0, 4, 4, 4, 4, 3, 3, 3, 2],
    &[0, 4, 4, 4, 4, 3, 3, 2, 2, 2],
    &[0, 4, 4, 4, 3, 3, 2, 3, 2, 2, 2, 2],
];

const BLK_HUFF_DESCS: [&[u8]; 8] = [
    &[1, 2, 3, 4, 4, 7, 5, 5, 4, 1],
    &[2, 3, 4, 4, 4, 7, 5, 4, 3, 3, 2],
    &[2, 4, 5, 5, 5, 5, 6, 4, 4, 3, 1, 1],
    &[3, 3, 4, 4, 5, 6, 6, 4, 4, 3, 2, 1, 1],
    &[3, 4, 4, 5, 5, 5, 6, 5, 4, 2, 2],
    &[3, 4, 5, 5, 5, 5, 6, 4, 3, 3, 2, 1, 1],
    &[3, 4, 5, 5, 5, 6, 5, 4, 3, 3, 2, 1, 1],
    &[3, 4, 4, 5, 5, 5, 6, 5, 5],
];

/// Index of the table used when a descriptor is not coded.
pub const DEFAULT_TAB: usize = 7;

fn build_static(kind: &str, descs: &[&[u8]; 8]) -> Vec<VlcTable> {
    descs
        .iter()
        .enumerate()
        .map(|(idx, rows)| {
            HuffDesc::from_rows(rows)
                .codewords_truncated()
                .and_then(|codes| VlcTable::from_codes(&codes))
                .unwrap_or_else(|e| {
                    error!("static {kind} table {idx} cannot be built, every code is rejected: {e}");
                    VlcTable::empty()
                })
        })
        .collect()
}

lazy_static! {
    static ref MB_VLC_TABS: Vec<VlcTable> = build_static("macroblock", &MB_HUFF_DESCS);
    static ref BLK_VLC_TABS: Vec<VlcTable> = build_static("block", &BLK_HUFF_DESCS);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuffKind {
    Macroblock,
    Block,
}

impl HuffKind {
    pub fn static_desc(self, idx: usize) -> HuffDesc {
        match self {
            HuffKind::Macroblock => HuffDesc::from_rows(MB_HUFF_DESCS[idx]),
            HuffKind::Block      => HuffDesc::from_rows(BLK_HUFF_DESCS[idx]),
        }
    }

    pub fn static_table(self, idx: usize) -> &'static VlcTable {
        match self {
            HuffKind::Macroblock => &MB_VLC_TABS[idx],
            HuffKind::Block      => &BLK_VLC_TABS[idx],
        }
    }
}

// ─── Per-stream table slot ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ActiveTab {
    Static(usize),
    Custom,
}

/// A selectable codebook: one of the static tables or a cached custom one.
#[derive(Clone)]
pub struct HuffTab {
    kind:      HuffKind,
    active:    ActiveTab,
    cust_desc: HuffDesc,
    cust_tab:  Option<VlcTable>,
}

impl HuffTab {
    pub fn new(kind: HuffKind) -> Self {
        HuffTab {
            kind,
            active:    ActiveTab::Static(DEFAULT_TAB),
            cust_desc: HuffDesc::default(),
            cust_tab:  None,
        }
    }

    /// Read a codebook selection from the stream.
    ///
    /// The custom table is only rebuilt when its descriptor changes.
    pub fn decode_desc(&mut self, br: &mut BitReader<'_>, desc_coded: bool) -> Result<()> {
        if !desc_coded {
            self.active = ActiveTab::Static(DEFAULT_TAB);
            return Ok(());
        }
        let sel = br.read_bits(3)? as usize;
        if sel != 7 {
            self.active = ActiveTab::Static(sel);
            return Ok(());
        }
        let num_rows = br.read_bits(4)? as usize;
        if num_rows == 0 {
            return Err(DecoderError::InvalidHuffmanDescriptor);
        }
        let mut xbits = [0u8; 16];
        for x in xbits.iter_mut().take(num_rows) {
            *x = br.read_bits(4)? as u8;
        }
        let new_desc = HuffDesc { num_rows: num_rows as u8, xbits };
        if new_desc != self.cust_desc || self.cust_tab.is_none() {
            self.cust_desc = new_desc;
            self.cust_tab = None;
            match VlcTable::build(&new_desc) {
                Ok(tab) => self.cust_tab = Some(tab),
                Err(e) => {
                    self.cust_desc.num_rows = 0;
                    return Err(e);
                }
            }
        }
        self.active = ActiveTab::Custom;
        Ok(())
    }

    /// Forget the cached custom descriptor.
    pub fn reset_custom(&mut self) {
        self.cust_desc = HuffDesc::default();
        self.cust_tab = None;
        if self.active == ActiveTab::Custom {
            self.active = ActiveTab::Static(DEFAULT_TAB);
        }
    }

    pub fn is_custom(&self) -> bool {
        self.active == ActiveTab::Custom
    }

    pub fn table(&self) -> &VlcTable {
        match (self.active, self.cust_tab.as_ref()) {
            (ActiveTab::Custom, Some(tab)) => tab,
            (ActiveTab::Static(idx), _) => self.kind.static_table(idx),
            (ActiveTab::Custom, None) => self.kind.static_table(DEFAULT_TAB),
        }
    }
}
