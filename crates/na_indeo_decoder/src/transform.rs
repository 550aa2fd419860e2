//! Inverse Haar and slant transforms.
//!
//! Coefficients arrive as a row-major `N*N` vector (stride `N`). Output is
//! written to an `i16` plane slice that starts at the block origin. Column
//! flags mark the columns holding at least one non-zero coefficient.

// ─── Butterflies ─────────────────────────────────────────────────────────────

#[inline(always)]
fn haar_bfly(s1: i32, s2: i32) -> (i32, i32) {
    ((s1 + s2) >> 1, (s1 - s2) >> 1)
}

#[inline(always)]
fn slant_bfly(s1: i32, s2: i32) -> (i32, i32) {
    (s1 + s2, s1 - s2)
}

#[inline(always)]
fn ireflect(s1: i32, s2: i32) -> (i32, i32) {
    (((s1 + s2 * 2 + 2) >> 2) + s1, ((s1 * 2 - s2 + 2) >> 2) - s2)
}

#[inline(always)]
fn slant_part4(s1: i32, s2: i32) -> (i32, i32) {
    (s2 + ((s1 * 4 - s2 + 4) >> 3), s1 + ((-s1 - s2 * 4 + 4) >> 3))
}

fn inv_haar8(v: [i32; 8]) -> [i32; 8] {
    let (s1, s5, s3, s7, s2, s4, s6, s8) = (v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]);
    let (t1, t5) = haar_bfly(s1 * 2, s5 * 2);
    let (t1, t3) = haar_bfly(t1, s3);
    let (t5, t7) = haar_bfly(t5, s7);
    let (t1, t2) = haar_bfly(t1, s2);
    let (t3, t4) = haar_bfly(t3, s4);
    let (t5, t6) = haar_bfly(t5, s6);
    let (t7, t8) = haar_bfly(t7, s8);
    [t1, t2, t3, t4, t5, t6, t7, t8]
}

fn inv_haar4(v: [i32; 4]) -> [i32; 4] {
    let (s1, s3, s5, s7) = (v[0], v[1], v[2], v[3]);
    let (t0, t1) = haar_bfly(s1, s3);
    let (d1, d2) = haar_bfly(t0, s5);
    let (d3, d4) = haar_bfly(t1, s7);
    [d1, d2, d3, d4]
}

fn inv_slant8(v: [i32; 8]) -> [i32; 8] {
    let (s1, s4, s8, s5, s2, s6, s3, s7) = (v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7]);
    let (t4, t5) = slant_part4(s4, s5);

    let (t1, t5) = slant_bfly(s1, t5);
    let (t2, t6) = slant_bfly(s2, s6);
    let (t7, t3) = slant_bfly(s7, s3);
    let (t4, t8) = slant_bfly(t4, s8);

    let (t1, t2) = slant_bfly(t1, t2);
    let (t4, t3) = ireflect(t4, t3);
    let (t5, t6) = slant_bfly(t5, t6);
    let (t8, t7) = ireflect(t8, t7);
    let (t1, t4) = slant_bfly(t1, t4);
    let (t2, t3) = slant_bfly(t2, t3);
    let (t5, t8) = slant_bfly(t5, t8);
    let (t6, t7) = slant_bfly(t6, t7);
    [t1, t2, t3, t4, t5, t6, t7, t8]
}

fn inv_slant4(v: [i32; 4]) -> [i32; 4] {
    let (s1, s4, s2, s3) = (v[0], v[1], v[2], v[3]);
    let (t1, t2) = slant_bfly(s1, s2);
    let (t4, t3) = ireflect(s4, s3);
    let (t1, t4) = slant_bfly(t1, t4);
    let (t2, t3) = slant_bfly(t2, t3);
    [t1, t2, t3, t4]
}

#[inline(always)]
fn no_comp(x: i32) -> i32 { x }

#[inline(always)]
fn half_comp(x: i32) -> i32 { (x + 1) >> 1 }

// ─── Pass helpers ────────────────────────────────────────────────────────────

/// Column pass into a temporary vector followed by a row pass into `out`.
fn inverse_2d<const N: usize>(
    coeffs: &[i32; 64],
    out: &mut [i16],
    pitch: usize,
    flags: &[bool; 8],
    kernel: fn([i32; N]) -> [i32; N],
    pre_shift: bool,
    comp: fn(i32) -> i32,
) {
    let mut tmp = [0i32; 64];
    for i in 0..N {
        if !flags[i] { continue; }
        let shift = (pre_shift && i < N / 2) as u32;
        let mut col = [0i32; N];
        for (j, c) in col.iter_mut().enumerate() {
            let v = coeffs[j * N + i];
            *c = if j < N / 2 { v << shift } else { v };
        }
        let res = kernel(col);
        for (j, &r) in res.iter().enumerate() {
            tmp[j * N + i] = r;
        }
    }
    for y in 0..N {
        let src = &tmp[y * N..y * N + N];
        let dst = &mut out[y * pitch..y * pitch + N];
        if src.iter().all(|&v| v == 0) {
            dst.fill(0);
            continue;
        }
        let mut row = [0i32; N];
        row.copy_from_slice(src);
        for (d, r) in dst.iter_mut().zip(kernel(row)) {
            *d = comp(r) as i16;
        }
    }
}

fn inverse_rows<const N: usize>(
    coeffs: &[i32; 64],
    out: &mut [i16],
    pitch: usize,
    kernel: fn([i32; N]) -> [i32; N],
    comp: fn(i32) -> i32,
) {
    for y in 0..N {
        let src = &coeffs[y * N..y * N + N];
        let dst = &mut out[y * pitch..y * pitch + N];
        if src.iter().all(|&v| v == 0) {
            dst.fill(0);
            continue;
        }
        let mut row = [0i32; N];
        row.copy_from_slice(src);
        for (d, r) in dst.iter_mut().zip(kernel(row)) {
            *d = comp(r) as i16;
        }
    }
}

fn inverse_cols<const N: usize>(
    coeffs: &[i32; 64],
    out: &mut [i16],
    pitch: usize,
    flags: &[bool; 8],
    kernel: fn([i32; N]) -> [i32; N],
    comp: fn(i32) -> i32,
) {
    for i in 0..N {
        if !flags[i] {
            for j in 0..N {
                out[j * pitch + i] = 0;
            }
            continue;
        }
        let mut col = [0i32; N];
        for (j, c) in col.iter_mut().enumerate() {
            *c = coeffs[j * N + i];
        }
        for (j, r) in kernel(col).into_iter().enumerate() {
            out[j * pitch + i] = comp(r) as i16;
        }
    }
}

// ─── Transform selection ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvTransform {
    Haar8x8,
    RowHaar8,
    ColHaar8,
    PutPixels8x8,
    Slant8x8,
    RowSlant8,
    ColSlant8,
    Haar4x4,
    Slant4x4,
    RowHaar4,
    ColHaar4,
    RowSlant4,
    ColSlant4,
}

impl InvTransform {
    pub fn size(self) -> usize {
        match self {
            InvTransform::Haar8x8 | InvTransform::RowHaar8 | InvTransform::ColHaar8
            | InvTransform::PutPixels8x8 | InvTransform::Slant8x8
            | InvTransform::RowSlant8 | InvTransform::ColSlant8 => 8,
            _ => 4,
        }
    }

    pub fn is_haar(self) -> bool {
        matches!(
            self,
            InvTransform::Haar8x8 | InvTransform::RowHaar8 | InvTransform::ColHaar8
            | InvTransform::Haar4x4 | InvTransform::RowHaar4 | InvTransform::ColHaar4
        )
    }

    /// Reconstruct one block. `out` must hold `(size-1)*pitch + size` samples.
    pub fn apply(self, coeffs: &[i32; 64], out: &mut [i16], pitch: usize, flags: &[bool; 8]) {
        match self {
            InvTransform::Haar8x8   => inverse_2d::<8>(coeffs, out, pitch, flags, inv_haar8, true, no_comp),
            InvTransform::Haar4x4   => inverse_2d::<4>(coeffs, out, pitch, flags, inv_haar4, true, no_comp),
            InvTransform::Slant8x8  => inverse_2d::<8>(coeffs, out, pitch, flags, inv_slant8, false, half_comp),
            InvTransform::Slant4x4  => inverse_2d::<4>(coeffs, out, pitch, flags, inv_slant4, false, half_comp),
            InvTransform::RowHaar8  => inverse_rows::<8>(coeffs, out, pitch, inv_haar8, no_comp),
            InvTransform::RowHaar4  => inverse_rows::<4>(coeffs, out, pitch, inv_haar4, no_comp),
            InvTransform::RowSlant8 => inverse_rows::<8>(coeffs, out, pitch, inv_slant8, half_comp),
            InvTransform::RowSlant4 => inverse_rows::<4>(coeffs, out, pitch, inv_slant4, half_comp),
            InvTransform::ColHaar8  => inverse_cols::<8>(coeffs, out, pitch, flags, inv_haar8, no_comp),
            InvTransform::ColHaar4  => inverse_cols::<4>(coeffs, out, pitch, flags, inv_haar4, no_comp),
            InvTransform::ColSlant8 => inverse_cols::<8>(coeffs, out, pitch, flags, inv_slant8, half_comp),
            InvTransform::ColSlant4 => inverse_cols::<4>(coeffs, out, pitch, flags, inv_slant4, half_comp),
            InvTransform::PutPixels8x8 => {
                for y in 0..8 {
                    for x in 0..8 {
                        out[y * pitch + x] = coeffs[y * 8 + x] as i16;
                    }
                }
            }
        }
    }
}

/// DC-only shortcut kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DcTransform {
    Haar,
    Slant,
    RowSlant,
    ColSlant,
    PutPixel,
}

impl DcTransform {
    pub fn apply(self, dc: i32, out: &mut [i16], pitch: usize, blk_size: usize) {
        match self {
            DcTransform::Haar | DcTransform::Slant => {
                let v = (if self == DcTransform::Haar { dc >> 3 } else { (dc + 1) >> 1 }) as i16;
                for y in 0..blk_size {
                    out[y * pitch..y * pitch + blk_size].fill(v);
                }
            }
            DcTransform::RowSlant => {
                let v = ((dc + 1) >> 1) as i16;
                out[..blk_size].fill(v);
                for y in 1..blk_size {
                    out[y * pitch..y * pitch + blk_size].fill(0);
                }
            }
            DcTransform::ColSlant => {
                let v = ((dc + 1) >> 1) as i16;
                for y in 0..blk_size {
                    let row = &mut out[y * pitch..y * pitch + blk_size];
                    row.fill(0);
                    row[0] = v;
                }
            }
            DcTransform::PutPixel => {
                for y in 0..8 {
                    out[y * pitch..y * pitch + 8].fill(0);
                }
                out[0] = dc as i16;
            }
        }
    }
}

/// Full description of a band's transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformDesc {
    pub inv:   InvTransform,
    pub dc:    DcTransform,
    pub is_2d: bool,
}

impl TransformDesc {
    pub const fn new(inv: InvTransform, dc: DcTransform, is_2d: bool) -> Self {
        TransformDesc { inv, dc, is_2d }
    }

    pub fn size(&self) -> usize {
        self.inv.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tr: InvTransform, coeffs: &[i32; 64]) -> Vec<i16> {
        let n = tr.size();
        let mut flags = [false; 8];
        for (pos, &c) in coeffs.iter().enumerate().take(n * n) {
            if c != 0 { flags[pos % n] = true; }
        }
        let mut out = vec![0x55i16; 8 * 8];
        tr.apply(coeffs, &mut out, 8, &flags);
        out
    }

    fn run_dc(dc: DcTransform, val: i32, n: usize) -> Vec<i16> {
        let mut out = vec![0x55i16; 8 * 8];
        dc.apply(val, &mut out, 8, n);
        out
    }

    #[test]
    fn dc_matches_full_2d_transform() {
        let cases = [
            (InvTransform::Haar8x8, DcTransform::Haar),
            (InvTransform::Haar4x4, DcTransform::Haar),
            (InvTransform::Slant8x8, DcTransform::Slant),
            (InvTransform::Slant4x4, DcTransform::Slant),
        ];
        for (tr, dc) in cases {
            for val in [-1000, -17, -9, -8, -1, 1, 2, 7, 8, 9, 255, 4097] {
                let mut coeffs = [0i32; 64];
                coeffs[0] = val;
                assert_eq!(run(tr, &coeffs), run_dc(dc, val, tr.size()), "{tr:?} dc={val}");
            }
        }
    }

    #[test]
    fn dc_matches_one_dimensional_slants() {
        for (tr, dc) in [
            (InvTransform::RowSlant8, DcTransform::RowSlant),
            (InvTransform::ColSlant8, DcTransform::ColSlant),
            (InvTransform::RowSlant4, DcTransform::RowSlant),
            (InvTransform::ColSlant4, DcTransform::ColSlant),
        ] {
            for val in [-33, -2, 3, 64, 511] {
                let mut coeffs = [0i32; 64];
                coeffs[0] = val;
                assert_eq!(run(tr, &coeffs), run_dc(dc, val, tr.size()), "{tr:?} dc={val}");
            }
        }
    }

    #[test]
    fn put_pixels_copies() {
        let mut coeffs = [0i32; 64];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = i as i32 - 32;
        }
        let out = run(InvTransform::PutPixels8x8, &coeffs);
        for (i, &v) in out.iter().enumerate() {
            assert_eq!(v as i32, i as i32 - 32);
        }
        let dc = run_dc(DcTransform::PutPixel, 77, 8);
        assert_eq!(dc[0], 77);
        assert!(dc[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_input_clears_block() {
        let coeffs = [0i32; 64];
        for tr in [InvTransform::Haar8x8, InvTransform::Slant8x8, InvTransform::RowHaar8, InvTransform::ColSlant8] {
            assert!(run(tr, &coeffs).iter().all(|&v| v == 0));
        }
        // 4x4 kernels leave the rest of the 8-wide scratch untouched
        let out = run(InvTransform::Haar4x4, &coeffs);
        assert!(out[..4].iter().all(|&v| v == 0));
        assert_eq!(out[4], 0x55);
    }

    #[test]
    fn haar_single_ac_coefficient() {
        // coefficient (0,1) splits the block into +/- halves
        let mut coeffs = [0i32; 64];
        coeffs[1] = 16;
        let out = run(InvTransform::Haar8x8, &coeffs);
        assert_eq!(&out[..8], &[2, 2, 2, 2, -2, -2, -2, -2]);
        assert_eq!(&out[56..64], &[2, 2, 2, 2, -2, -2, -2, -2]);
    }

    #[test]
    fn slant_kernel_linearity_spot_check() {
        assert_eq!(inv_slant4([4, 0, 0, 0]), [4, 4, 4, 4]);
        assert_eq!(ireflect(0, 0), (0, 0));
        assert_eq!(slant_part4(0, 0), (0, 0));
        assert_eq!(inv_haar4([8, 0, 0, 0]), [2, 2, 2, 2]);
    }
}
