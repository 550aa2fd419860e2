//! Minimal C ABI for Indeo 4/5 decoding.
//!
//! This module is behind the `ffi` feature.
//! It decodes one compressed frame at a time and exposes the planes of the
//! last decoded picture.

use std::ffi::c_void;

use crate::api::{DecoderConfig, FrameOutput, IndeoDecoder, IndeoVersion};

#[repr(C)]
pub struct IndeoFrameView {
    pub width:    u32,
    pub height:   u32,
    pub is_key:   i32,

    pub y_ptr:    *const u8,
    pub y_len:    usize,
    pub y_stride: usize,

    pub u_ptr:    *const u8,
    pub u_len:    usize,
    pub u_stride: usize,

    pub v_ptr:    *const u8,
    pub v_len:    usize,
    pub v_stride: usize,
}

/// Create a decoder. `version` is 4 or 5.
///
/// Returns null on invalid arguments.
#[no_mangle]
pub extern "C" fn indeo_decoder_create(version: u32, width: u32, height: u32) -> *mut c_void {
    let version = match version {
        4 => IndeoVersion::Indeo4,
        5 => IndeoVersion::Indeo5,
        _ => return std::ptr::null_mut(),
    };
    match IndeoDecoder::new(DecoderConfig { version, width, height }) {
        Ok(dec) => Box::into_raw(Box::new(dec)) as *mut c_void,
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn indeo_decoder_destroy(handle: *mut c_void) {
    if handle.is_null() {
        return;
    }
    unsafe {
        let _ = Box::from_raw(handle as *mut IndeoDecoder);
    }
}

/// Decode one compressed frame.
///
/// Returns:
///   1  = new picture available
///   0  = repeat the previous picture
///  -1  = invalid arguments
///  -2  = decode error
#[no_mangle]
pub extern "C" fn indeo_decoder_decode(handle: *mut c_void, data: *const u8, data_len: usize) -> i32 {
    if handle.is_null() || data.is_null() || data_len == 0 {
        return -1;
    }

    let dec = unsafe { &mut *(handle as *mut IndeoDecoder) };
    let data = unsafe { std::slice::from_raw_parts(data, data_len) };

    match dec.decode_frame(data) {
        Ok(FrameOutput::Picture(_)) => 1,
        Ok(FrameOutput::RepeatPrevious) => 0,
        Err(_) => -2,
    }
}

/// Get the most recently decoded picture.
///
/// The returned pointers remain valid until the next successful decode call.
///
/// Returns:
///   1  = success
///   0  = no picture decoded yet
///  -1  = invalid arguments
#[no_mangle]
pub extern "C" fn indeo_decoder_get_frame(handle: *mut c_void, out: *mut IndeoFrameView) -> i32 {
    if handle.is_null() || out.is_null() {
        return -1;
    }

    let dec = unsafe { &*(handle as *const IndeoDecoder) };
    let Some(df) = dec.current_frame() else {
        return 0;
    };
    let f = &df.frame;

    unsafe {
        *out = IndeoFrameView {
            width:    f.width,
            height:   f.height,
            is_key:   df.is_key_frame as i32,
            y_ptr:    f.y.as_ptr(),
            y_len:    f.y.len(),
            y_stride: f.width as usize,
            u_ptr:    f.u.as_ptr(),
            u_len:    f.u.len(),
            u_stride: f.chroma_width as usize,
            v_ptr:    f.v.as_ptr(),
            v_len:    f.v.len(),
            v_stride: f.chroma_width as usize,
        };
    }

    1
}
