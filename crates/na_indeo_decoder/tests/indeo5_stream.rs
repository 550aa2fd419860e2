mod common;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use indeo_decoder::block::dequant;
use indeo_decoder::indeo5_tables::{QSCALE8_INTRA, QUANT8X8_INTRA};
use indeo_decoder::{DecodedFrame, DecoderConfig, DecoderError, FrameOutput, IndeoDecoder, IndeoVersion};

use common::*;

fn decoder(width: u32, height: u32) -> IndeoDecoder {
    IndeoDecoder::new(DecoderConfig { version: IndeoVersion::Indeo5, width, height }).unwrap()
}

fn picture(dec: &mut IndeoDecoder, data: &[u8]) -> Result<DecodedFrame> {
    match dec.decode_frame(data)? {
        FrameOutput::Picture(f) => Ok(f.clone()),
        FrameOutput::RepeatPrevious => anyhow::bail!("expected a new picture"),
    }
}

/// Band sample of a DC level `v` coded with luma quant matrix `mat`.
fn dc_sample(v: i8, mat: usize) -> i32 {
    let quant = QSCALE8_INTRA[mat][IV5_LUMA_QUANT as usize] as u32;
    let dc = dequant(v as i32, QUANT8X8_INTRA[mat][0], quant);
    (dc + 1) >> 1
}

fn intra_level(v: i8) -> u8 {
    (128 + dc_sample(v, 0)).clamp(0, 255) as u8
}

fn inter(frame_num: u32, luma: TileSpec) -> Vec<u8> {
    let c = chroma_mbs(32, 16);
    iv5_frame(iv5::INTER, frame_num, 32, 16, &[luma, TileSpec::inter(c), TileSpec::skipped(c)])
}

#[test]
fn intra_frame_decodes_to_a_flat_picture() -> Result<()> {
    let mut dec = decoder(32, 16);
    let df = picture(&mut dec, &iv5_intra(32, 16))?;
    assert!(df.is_key_frame);
    assert_eq!((df.frame.width, df.frame.height), (32, 16));
    assert!(df.frame.y.iter().chain(&df.frame.u).chain(&df.frame.v).all(|&p| p == 128));

    let df = picture(&mut dec, &iv5_intra_dc(32, 16, 8))?;
    let level = intra_level(8);
    assert!(level > 128);
    assert!(df.frame.y.iter().all(|&p| p == level));
    assert!(df.frame.u.iter().chain(&df.frame.v).all(|&p| p == 128));
    Ok(())
}

#[test]
fn inter_frame_without_change_repeats_the_picture() -> Result<()> {
    let mut dec = decoder(32, 16);
    let key = picture(&mut dec, &iv5_intra_dc(32, 16, -8))?;

    let p = picture(&mut dec, &inter(1, TileSpec::inter(luma_mbs(32, 16))))?;
    assert!(!p.is_key_frame);
    assert_eq!(p.frame, key.frame);

    let p = picture(&mut dec, &inter(2, TileSpec::skipped(luma_mbs(32, 16))))?;
    assert_eq!(p.frame, key.frame);

    let p = picture(&mut dec, &inter(3, TileSpec::Empty))?;
    assert_eq!(p.frame, key.frame);
    Ok(())
}

#[test]
fn inter_residual_accumulates_over_frames() -> Result<()> {
    let mut dec = decoder(32, 16);
    let key = picture(&mut dec, &iv5_intra(32, 16))?;
    let mut mbs = vec![Mb::Inter(0, 0); luma_mbs(32, 16)];
    mbs[1] = Mb::InterDc(8);

    let first = picture(&mut dec, &inter(1, TileSpec::Coded(mbs.clone())))?;
    let second = picture(&mut dec, &inter(2, TileSpec::Coded(mbs)))?;
    let (a, b, base) = (first.frame.y[16], second.frame.y[16], key.frame.y[16]);
    assert!(base < a && a < b);
    assert_eq!(b - a, a - base);
    assert_eq!(second.frame.y[0], base);
    Ok(())
}

#[test]
fn vector_outside_the_reference_is_rejected() -> Result<()> {
    let mut dec = decoder(32, 16);
    picture(&mut dec, &iv5_intra(32, 16))?;

    let mut mbs = vec![Mb::Inter(0, 0); luma_mbs(32, 16)];
    mbs[0] = Mb::Inter(0, -1);
    assert!(matches!(dec.decode_frame(&inter(1, TileSpec::Coded(mbs))), Err(DecoderError::CorruptMotionVector)));

    let mut mbs = vec![Mb::Inter(0, 0); luma_mbs(32, 16)];
    mbs[1] = Mb::Inter(0, 1);
    assert!(matches!(dec.decode_frame(&inter(2, TileSpec::Coded(mbs))), Err(DecoderError::CorruptMotionVector)));

    assert!(picture(&mut dec, &iv5_intra(32, 16))?.is_key_frame);
    Ok(())
}

#[test]
fn null_frame_repeats_the_previous_picture() -> Result<()> {
    let mut dec = decoder(32, 16);
    let key = picture(&mut dec, &iv5_intra_dc(32, 16, 3))?;
    assert!(matches!(dec.decode_frame(&iv5_null(1))?, FrameOutput::RepeatPrevious));
    assert_eq!(dec.current_frame().map(|f| f.frame.to_planar_u8()), Some(key.frame.to_planar_u8()));

    // prediction after the null frame still starts from the key picture
    let p = picture(&mut dec, &inter(2, TileSpec::inter(luma_mbs(32, 16))))?;
    assert_eq!(p.frame, key.frame);
    Ok(())
}

#[test]
fn broken_gop_blocks_decoding_until_the_next_key_frame() -> Result<()> {
    let mut dec = decoder(32, 16);
    let key = picture(&mut dec, &iv5_intra_dc(32, 16, 8))?;

    assert!(dec.decode_frame(&iv5_broken_gop(32, 16)).is_err());
    let r = dec.decode_frame(&inter(1, TileSpec::inter(luma_mbs(32, 16))));
    assert!(matches!(r, Err(DecoderError::InvalidData(_))));
    assert!(matches!(dec.decode_frame(&iv5_null(2)), Err(DecoderError::InvalidData(_))));
    assert_eq!(dec.current_frame().map(|f| &f.frame), Some(&key.frame));

    let df = picture(&mut dec, &iv5_intra(32, 16))?;
    assert!(df.frame.y.iter().all(|&p| p == 128));
    picture(&mut dec, &inter(3, TileSpec::inter(luma_mbs(32, 16))))?;
    Ok(())
}

#[test]
fn scalable_inter_frame_needs_a_scalable_stream() -> Result<()> {
    let mut dec = decoder(32, 16);
    picture(&mut dec, &iv5_intra(32, 16))?;
    let mut bw = BitWriter::default();
    bw.put(0x1F, 5).put(2, 3).put(1, 8).put(0, 8).put(0, 3);
    assert!(matches!(dec.decode_frame(&bw.finish()), Err(DecoderError::InvalidData(_))));
    Ok(())
}

#[test]
fn gop_header_sets_the_picture_size() -> Result<()> {
    // the container size is only a starting point
    let mut dec = decoder(160, 120);
    let df = picture(&mut dec, &iv5_intra(48, 32))?;
    assert_eq!((df.frame.width, df.frame.height), (48, 32));
    assert_eq!((df.frame.chroma_width, df.frame.chroma_height), (12, 8));

    let df = picture(&mut dec, &iv5_intra_dc(64, 16, 2))?;
    assert_eq!((df.frame.width, df.frame.height), (64, 16));
    assert_eq!(df.frame.y.len(), 64 * 16);
    assert!(df.frame.y.iter().all(|&p| p == intra_level(2)));
    Ok(())
}

#[test]
fn truncated_frames_are_errors() {
    let mut dec = decoder(32, 16);
    let data = iv5_intra_dc(32, 16, 8);
    for len in [1, 2, 8, 15, data.len() - 1] {
        assert!(dec.decode_frame(&data[..len]).is_err(), "length {len}");
    }
    assert!(dec.decode_frame(&data).is_ok());
}

#[test]
fn corrupted_tiles_never_panic() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x1E50);
    let clean = iv5_intra_dc(32, 16, 8);
    let header_len = 14 + 2;
    let mut dec = decoder(32, 16);

    for _ in 0..500 {
        let mut data = clean.clone();
        for _ in 0..rng.gen_range(1..4) {
            let byte = rng.gen_range(header_len..data.len());
            data[byte] ^= 1 << rng.gen_range(0..8);
        }
        let _ = dec.decode_frame(&data);
    }

    let df = picture(&mut dec, &clean)?;
    assert!(df.frame.y.iter().all(|&p| p == intra_level(8)));
    Ok(())
}

#[test]
fn empty_luma_band_copies_the_reference() -> Result<()> {
    let mut dec = decoder(32, 16);
    let c = chroma_mbs(32, 16);
    let key = picture(&mut dec, &iv5_intra_dc(32, 16, 8))?;
    let p = picture(&mut dec, &iv5_bands(iv5::INTER, 1, 32, 16, false, &[None, Some(TileSpec::inter(c)), None]))?;
    assert_eq!(p.frame, key.frame);
    Ok(())
}

#[test]
fn empty_band_in_intra_frame_loses_the_reference() -> Result<()> {
    let mut dec = decoder(32, 16);
    let (l, c) = (luma_mbs(32, 16), chroma_mbs(32, 16));
    let key = picture(&mut dec, &iv5_intra_dc(32, 16, 8))?;

    let broken = iv5_bands(iv5::INTRA, 1, 32, 16, false, &[None, Some(TileSpec::intra(c)), Some(TileSpec::intra(c))]);
    assert!(matches!(dec.decode_frame(&broken), Err(DecoderError::MissingReference)));
    assert_eq!(dec.current_frame().map(|f| &f.frame), Some(&key.frame));

    // the key picture's buffer was overwritten, so nothing is left to predict from
    let r = dec.decode_frame(&inter(2, TileSpec::inter(l)));
    assert!(matches!(r, Err(DecoderError::MissingReference)));

    let empty_tile = iv5_frame(iv5::INTRA, 3, 32, 16, &[TileSpec::intra(l), TileSpec::intra(c), TileSpec::Empty]);
    assert!(matches!(dec.decode_frame(&empty_tile), Err(DecoderError::MissingReference)));

    let key = picture(&mut dec, &iv5_intra_dc(32, 16, -8))?;
    let p = picture(&mut dec, &inter(4, TileSpec::inter(l)))?;
    assert_eq!(p.frame, key.frame);
    Ok(())
}

#[test]
fn four_band_luma_is_recomposed_with_the_5_3_wavelet() -> Result<()> {
    let mut dec = decoder(32, 16);
    let df = picture(&mut dec, &iv5_scalable_intra_dc(32, 16, 8))?;
    assert_eq!((df.frame.width, df.frame.height), (32, 16));
    let expected = (128 + (dc_sample(8, 1) >> 2)) as u8;
    assert!(expected > 128);
    assert!(df.frame.y.iter().all(|&px| px == expected));
    assert!(df.frame.u.iter().chain(&df.frame.v).all(|&px| px == 128));

    assert!(matches!(dec.decode_frame(&iv5_null(1)), Err(DecoderError::InvalidData(_))));

    // back to one band
    let df = picture(&mut dec, &iv5_intra_dc(32, 16, 8))?;
    assert!(df.frame.y.iter().all(|&px| px == intra_level(8)));
    Ok(())
}
