/// Conversion of decoded band buffers into 8-bit output planes.
///
/// Non-scalable planes only need the +128 bias and clipping. Scalable luma
/// is rebuilt from four half-resolution bands, with a Haar wavelet for
/// Indeo 4 and a 5/3 wavelet for Indeo 5.

use crate::error::{DecoderError, Result};
use crate::plane::PlaneDesc;

#[inline(always)]
fn clip8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline(always)]
fn px(buf: &[i16], idx: isize) -> i32 {
    if idx < 0 {
        return 0;
    }
    buf.get(idx as usize).map_or(0, |&v| v as i32)
}

/// Plane output sink that drops samples past the visible area.
struct Sink<'a> {
    dst:   &'a mut [u8],
    pitch: usize,
    w:     usize,
    h:     usize,
}

impl Sink<'_> {
    #[inline(always)]
    fn put(&mut self, x: usize, y: usize, v: u8) {
        if x < self.w && y < self.h {
            if let Some(d) = self.dst.get_mut(y * self.pitch + x) {
                *d = v;
            }
        }
    }
}

fn wavelet_bands(plane: &PlaneDesc, buf_idx: usize) -> Result<([&[i16]; 4], usize)> {
    if plane.num_bands() < 4 {
        return Err(DecoderError::InvalidData("recomposition needs four bands".into()));
    }
    let mut bands: [&[i16]; 4] = [&[]; 4];
    for (i, b) in bands.iter_mut().enumerate() {
        let band = &plane.bands[i];
        if !band.has_buf(buf_idx) {
            return Err(DecoderError::InvalidData(format!("band {i} has no decoded buffer")));
        }
        *b = &band.bufs[buf_idx];
    }
    Ok((bands, plane.bands[0].pitch))
}

/// Add the bias back to band 0 of `plane` and clip into `dst`.
pub fn output_plane(plane: &PlaneDesc, buf_idx: usize, dst: &mut [u8], dst_pitch: usize) {
    let Some(band) = plane.bands.first() else { return };
    if !band.has_buf(buf_idx) {
        return;
    }
    let src = &band.bufs[buf_idx];
    for y in 0..plane.height {
        let srow = &src[y * band.pitch..];
        let Some(drow) = dst.get_mut(y * dst_pitch..y * dst_pitch + plane.width) else { return };
        for (d, &s) in drow.iter_mut().zip(srow) {
            *d = clip8(s as i32 + 128);
        }
    }
}

/// Rebuild a four-band Haar decomposition.
pub fn recompose_haar(plane: &PlaneDesc, buf_idx: usize, dst: &mut [u8], dst_pitch: usize) -> Result<()> {
    let ([b0, b1, b2, b3], pitch) = wavelet_bands(plane, buf_idx)?;
    let mut out = Sink { dst, pitch: dst_pitch, w: plane.width, h: plane.height };

    for (row, y) in (0..plane.height).step_by(2).enumerate() {
        let base = (row * pitch) as isize;
        for (indx, x) in (0..plane.width).step_by(2).enumerate() {
            let i = base + indx as isize;
            let (c0, c1, c2, c3) = (px(b0, i), px(b1, i), px(b2, i), px(b3, i));

            let p0 = (c0 + c1 + c2 + c3 + 2) >> 2;
            let p1 = (c0 + c1 - c2 - c3 + 2) >> 2;
            let p2 = (c0 - c1 + c2 - c3 + 2) >> 2;
            let p3 = (c0 - c1 - c2 + c3 + 2) >> 2;

            out.put(x, y, clip8(p0 + 128));
            out.put(x + 1, y, clip8(p1 + 128));
            out.put(x, y + 1, clip8(p2 + 128));
            out.put(x + 1, y + 1, clip8(p3 + 128));
        }
    }
    Ok(())
}

/// Rebuild a four-band 5/3 decomposition (LL, HL, LH, HH).
///
/// Samples outside the band are mirrored by repeating the edge: the row
/// above the first one is the first row, the row below the last one is the
/// last row, and the last column reuses its left neighbour.
pub fn recompose53(plane: &PlaneDesc, buf_idx: usize, dst: &mut [u8], dst_pitch: usize) -> Result<()> {
    let ([b0, b1, b2, b3], band_pitch) = wavelet_bands(plane, buf_idx)?;
    let mut out = Sink { dst, pitch: dst_pitch, w: plane.width, h: plane.height };
    let bp = band_pitch as isize;

    let mut back: isize = 0;
    for (row, y) in (0..plane.height).step_by(2).enumerate() {
        let pitch: isize = if y + 2 >= plane.height { 0 } else { bp };
        let mut base = row as isize * bp;

        let mut b0_1 = px(b0, base);
        let mut b0_2 = px(b0, base + pitch);

        let mut b1_1 = px(b1, base + back);
        let mut b1_2 = px(b1, base);
        let mut b1_3 = b1_1 - b1_2 * 6 + px(b1, base + pitch);

        let mut b2_2 = px(b2, base);
        let mut b2_3 = b2_2;
        let mut b2_5 = px(b2, base + pitch);
        let mut b2_6 = b2_5;

        let mut b3_2 = px(b3, base + back);
        let mut b3_3 = b3_2;
        let mut b3_5 = px(b3, base);
        let mut b3_6 = b3_5;
        let mut b3_8 = b3_2 - b3_5 * 6 + px(b3, base + pitch);
        let mut b3_9 = b3_8;

        for (indx, x) in (0..plane.width).step_by(2).enumerate() {
            if x + 2 >= plane.width {
                base -= 1;
            }
            let i = base + indx as isize + 1;

            let b2_1 = b2_2;
            b2_2 = b2_3;
            let b2_4 = b2_5;
            b2_5 = b2_6;
            let b3_1 = b3_2;
            b3_2 = b3_3;
            let b3_4 = b3_5;
            b3_5 = b3_6;
            let b3_7 = b3_8;
            b3_8 = b3_9;

            // LL: low-pass both ways
            let tmp0 = b0_1;
            let tmp2 = b0_2;
            b0_1 = px(b0, i);
            b0_2 = px(b0, i + pitch);
            let tmp1 = tmp0 + b0_1;
            let mut p0 = tmp0 * 16;
            let mut p1 = tmp1 * 8;
            let mut p2 = (tmp0 + tmp2) * 8;
            let mut p3 = (tmp1 + tmp2 + b0_2) * 4;

            // HL: high-pass vertically, low-pass horizontally
            let tmp0 = b1_2;
            let tmp1 = b1_1;
            b1_2 = px(b1, i);
            b1_1 = px(b1, i + back);
            let tmp2 = tmp1 - tmp0 * 6 + b1_3;
            b1_3 = b1_1 - b1_2 * 6 + px(b1, i + pitch);
            p0 += (tmp0 + tmp1) * 8;
            p1 += (tmp0 + tmp1 + b1_1 + b1_2) * 4;
            p2 += tmp2 * 4;
            p3 += (tmp2 + b1_3) * 2;

            // LH: low-pass vertically, high-pass horizontally
            b2_3 = px(b2, i);
            b2_6 = px(b2, i + pitch);
            let tmp0 = b2_1 + b2_2;
            let tmp1 = b2_1 - b2_2 * 6 + b2_3;
            p0 += tmp0 * 8;
            p1 += tmp1 * 4;
            p2 += (tmp0 + b2_4 + b2_5) * 4;
            p3 += (tmp1 + b2_4 - b2_5 * 6 + b2_6) * 2;

            // HH: high-pass both ways
            b3_6 = px(b3, i);
            b3_3 = px(b3, i + back);
            let tmp0 = b3_1 + b3_4;
            let tmp1 = b3_2 + b3_5;
            let tmp2 = b3_3 + b3_6;
            b3_9 = b3_3 - b3_6 * 6 + px(b3, i + pitch);
            p0 += (tmp0 + tmp1) * 4;
            p1 += (tmp0 - tmp1 * 6 + tmp2) * 2;
            p2 += (b3_7 + b3_8) * 2;
            p3 += b3_7 - b3_8 * 6 + b3_9;

            out.put(x, y, clip8((p0 >> 6) + 128));
            out.put(x + 1, y, clip8((p1 >> 6) + 128));
            out.put(x, y + 1, clip8((p2 >> 6) + 128));
            out.put(x + 1, y + 1, clip8((p3 >> 6) + 128));
        }

        back = -bp;
    }
    Ok(())
}
