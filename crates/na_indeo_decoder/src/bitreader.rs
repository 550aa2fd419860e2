/// Indeo bitstream reader.
///
/// The Indeo 4/5 formats store fields least-significant-bit first, so the
/// first bit of the stream is bit 0 of byte 0.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{DecoderError, Result};

#[derive(Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos:  usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BitReader { data, pos: 0 }
    }

    /// Create a reader positioned at an arbitrary bit offset.
    pub fn new_at(data: &'a [u8], bit_offset: usize) -> Self {
        BitReader { data, pos: bit_offset.min(data.len() * 8) }
    }

    /// Up to 57 bits starting at the cursor, zero-padded past the end.
    #[inline]
    fn window(&self) -> u64 {
        let byte = self.pos >> 3;
        let mut buf = [0u8; 8];
        let avail = self.data.len().saturating_sub(byte).min(8);
        if avail > 0 {
            buf[..avail].copy_from_slice(&self.data[byte..byte + avail]);
        }
        LittleEndian::read_u64(&buf) >> (self.pos & 7)
    }

    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        if n == 0 { return Ok(0); }
        debug_assert!(n <= 32);
        if n as usize > self.bits_remaining() {
            return Err(DecoderError::BitstreamExhausted);
        }
        let v = (self.window() & ((1u64 << n) - 1)) as u32;
        self.pos += n as usize;
        Ok(v)
    }

    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.read_bits(1).map(|b| b != 0)
    }

    /// Peek up to 32 bits without advancing. Bits past the end read as zero.
    #[inline]
    pub fn peek_bits(&self, n: u32) -> u32 {
        if n == 0 { return 0; }
        (self.window() & ((1u64 << n) - 1)) as u32
    }

    pub fn skip_bits(&mut self, n: usize) -> Result<()> {
        if n > self.bits_remaining() {
            return Err(DecoderError::BitstreamExhausted);
        }
        self.pos += n;
        Ok(())
    }

    pub fn align_to_byte(&mut self) {
        self.pos = ((self.pos + 7) & !7).min(self.data.len() * 8);
    }

    #[inline]
    pub fn bits_consumed(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Underlying buffer, for handing the tail of a packet to a nested decode.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// LSB-first writer for building test bitstreams.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct BitWriter {
    out: Vec<u8>,
    pos: usize,
}

#[cfg(test)]
impl BitWriter {
    pub fn put(&mut self, val: u32, n: u32) -> &mut Self {
        assert!(n <= 32, "at most 32 bits per write");
        for i in 0..n {
            if self.pos / 8 >= self.out.len() {
                self.out.push(0);
            }
            if (val >> i) & 1 != 0 {
                self.out[self.pos / 8] |= 1 << (self.pos % 8);
            }
            self.pos += 1;
        }
        self
    }

    pub fn bit(&mut self, b: bool) -> &mut Self {
        self.put(b as u32, 1)
    }

    /// Write an MSB-first codeword.
    pub fn code(&mut self, (code, len): (u16, u8)) -> &mut Self {
        for b in (0..len).rev() {
            self.put(((code >> b) & 1) as u32, 1);
        }
        self
    }

    pub fn align(&mut self) -> &mut Self {
        self.pos = (self.pos + 7) & !7;
        while self.out.len() < self.pos / 8 {
            self.out.push(0);
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_matches_reader() {
        let mut bw = BitWriter::default();
        bw.put(0x3FFF8, 18).bit(true).put(5, 3).align().put(0xAB, 8);
        let data = bw.finish();
        let mut br = BitReader::new(&data);
        assert_eq!(br.read_bits(18).unwrap(), 0x3FFF8);
        assert!(br.read_bit().unwrap());
        assert_eq!(br.read_bits(3).unwrap(), 5);
        br.align_to_byte();
        assert_eq!(br.read_bits(8).unwrap(), 0xAB);
    }

    #[test]
    fn reads_lsb_first() {
        let data = [0b1010_0110u8, 0xFF];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read_bits(1).unwrap(), 0);
        assert_eq!(br.read_bits(2).unwrap(), 0b11);
        assert_eq!(br.read_bits(5).unwrap(), 0b10100);
        assert_eq!(br.read_bits(8).unwrap(), 0xFF);
        assert_eq!(br.bits_remaining(), 0);
    }

    #[test]
    fn reads_across_bytes() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xAA];
        let mut br = BitReader::new(&data);
        br.skip_bits(4).unwrap();
        assert_eq!(br.read_bits(32).unwrap(), 0xA123_4567);
        assert_eq!(br.bits_consumed(), 36);
    }

    #[test]
    fn zero_bit_read_is_noop() {
        let data: [u8; 0] = [];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read_bits(0).unwrap(), 0);
        assert!(matches!(br.read_bit(), Err(DecoderError::BitstreamExhausted)));
    }

    #[test]
    fn exhausted_read_does_not_move_cursor() {
        let data = [0xFFu8];
        let mut br = BitReader::new(&data);
        br.skip_bits(5).unwrap();
        assert!(br.read_bits(4).is_err());
        assert_eq!(br.bits_consumed(), 5);
        assert_eq!(br.read_bits(3).unwrap(), 7);
    }

    #[test]
    fn peek_pads_with_zeros() {
        let data = [0x81u8];
        let mut br = BitReader::new(&data);
        br.skip_bits(7).unwrap();
        assert_eq!(br.peek_bits(13), 1);
        assert_eq!(br.bits_consumed(), 7);
    }

    #[test]
    fn align() {
        let data = [0u8; 3];
        let mut br = BitReader::new(&data);
        br.align_to_byte();
        assert_eq!(br.bits_consumed(), 0);
        br.skip_bits(9).unwrap();
        br.align_to_byte();
        assert_eq!(br.bits_consumed(), 16);
        assert!(br.skip_bits(9).is_err());
    }
}
