/// Motion compensation kernels
///
/// `mc_type` selects the half-pel phase: 0 copy, 1 horizontal average,
/// 2 vertical average, 3 average of four neighbours. "Delta" kernels add the
/// prediction to residual already present in `dst`; "no delta" kernels store.

#[inline(always)]
fn predict(src: &[i16], idx: usize, pitch: usize, mc_type: u8) -> i32 {
    let a = src[idx] as i32;
    match mc_type {
        0 => a,
        1 => (a + src[idx + 1] as i32) >> 1,
        2 => (a + src[idx + pitch] as i32) >> 1,
        _ => (a + src[idx + 1] as i32 + src[idx + pitch] as i32 + src[idx + pitch + 1] as i32) >> 2,
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn mc_block(
    dst: &mut [i16], doff: usize, dpitch: usize,
    src: &[i16],     soff: usize, spitch: usize,
    size: usize, mc_type: u8, add: bool,
) {
    for y in 0..size {
        let drow = doff + y * dpitch;
        let srow = soff + y * spitch;
        for x in 0..size {
            let p = predict(src, srow + x, spitch, mc_type);
            let d = &mut dst[drow + x];
            *d = if add { d.wrapping_add(p as i16) } else { p as i16 };
        }
    }
}

/// Store a prediction from `src` into `dst`. Both share `pitch`.
pub fn mc_no_delta(dst: &mut [i16], doff: usize, src: &[i16], soff: usize, pitch: usize, size: usize, mc_type: u8) {
    mc_block(dst, doff, pitch, src, soff, pitch, size, mc_type, false);
}

/// Add a prediction from `src` onto the residual in `dst`.
pub fn mc_delta(dst: &mut [i16], doff: usize, src: &[i16], soff: usize, pitch: usize, size: usize, mc_type: u8) {
    mc_block(dst, doff, pitch, src, soff, pitch, size, mc_type, true);
}

#[allow(clippy::too_many_arguments)]
fn mc_avg(
    dst: &mut [i16], doff: usize,
    src1: &[i16], soff1: usize,
    src2: &[i16], soff2: usize,
    pitch: usize, size: usize, mc_type1: u8, mc_type2: u8, add: bool,
) {
    let mut tmp = [0i16; 64];
    mc_block(&mut tmp, 0, size, src1, soff1, pitch, size, mc_type1, false);
    mc_block(&mut tmp, 0, size, src2, soff2, pitch, size, mc_type2, true);
    for y in 0..size {
        for x in 0..size {
            let v = tmp[y * size + x] >> 1;
            let d = &mut dst[doff + y * pitch + x];
            *d = if add { d.wrapping_add(v) } else { v };
        }
    }
}

/// Average of two predictions, stored.
#[allow(clippy::too_many_arguments)]
pub fn mc_avg_no_delta(
    dst: &mut [i16], doff: usize,
    src1: &[i16], soff1: usize,
    src2: &[i16], soff2: usize,
    pitch: usize, size: usize, mc_type1: u8, mc_type2: u8,
) {
    mc_avg(dst, doff, src1, soff1, src2, soff2, pitch, size, mc_type1, mc_type2, false);
}

/// Average of two predictions, added to the residual.
#[allow(clippy::too_many_arguments)]
pub fn mc_avg_delta(
    dst: &mut [i16], doff: usize,
    src1: &[i16], soff1: usize,
    src2: &[i16], soff2: usize,
    pitch: usize, size: usize, mc_type1: u8, mc_type2: u8,
) {
    mc_avg(dst, doff, src1, soff1, src2, soff2, pitch, size, mc_type1, mc_type2, true);
}
