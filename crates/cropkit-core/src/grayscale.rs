//! Fast grayscale conversion for RGBA buffers.
//!
//! Uses the unbalanced integer approximation `(R + 2G + B) >> 2` rather than
//! BT.709 weights. Preview and export both go through [`grayscale_rgba`], so
//! the two always agree to the byte.

/// Approximate luma of an RGB triple.
///
/// # Example
///
/// ```ignore
/// use cropkit_core::grayscale::fast_luma;
///
/// assert_eq!(fast_luma(100, 50, 10), 52);
/// ```
#[inline]
pub fn fast_luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + 2 * g as u16 + b as u16) >> 2) as u8
}

/// Convert RGBA pixel data to grayscale in place.
///
/// Writes the luma to the R, G and B channels and leaves alpha untouched.
/// A trailing partial pixel is ignored.
pub fn grayscale_rgba(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let luma = fast_luma(px[0], px[1], px[2]);
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
}
