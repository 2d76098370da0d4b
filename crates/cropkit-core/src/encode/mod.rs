//! Image encoding for Cropkit.
//!
//! This module provides functionality for:
//! - Encoding cropped RGBA regions to PNG
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::encode_png;
//!
//! let pixels = vec![255u8; 100 * 100 * 4]; // Opaque white
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
