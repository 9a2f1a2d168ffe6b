//! The color table: a flat list of premultiplied-free ARGB8888 entries,
//! decoded from whichever of the four on-disk encodings the header names.

use std::io::Read;

use crate::error::{Result, TinyVgError};
use crate::header::ColorEncoding;
use crate::varuint::read_varuint;

/// Packed `0xAARRGGBB`, matching the layout a [`crate::sink::RasterSink`]
/// is handed.
pub type Argb8888 = u32;

fn argb(a: u8, r: u8, g: u8, b: u8) -> Argb8888 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn scale_channel(value: u32, max: u32) -> u8 {
    ((value * 255) / max) as u8
}

fn read_one<R: Read>(r: &mut R, encoding: ColorEncoding) -> Result<Argb8888> {
    match encoding {
        ColorEncoding::U8888 => {
            let mut bytes = [0u8; 4];
            r.read_exact(&mut bytes)?;
            let [red, green, blue, alpha] = bytes;
            Ok(argb(alpha, red, green, blue))
        }
        ColorEncoding::U565 => {
            let mut bytes = [0u8; 2];
            r.read_exact(&mut bytes)?;
            let raw = u16::from_le_bytes(bytes) as u32;
            let red = scale_channel((raw >> 11) & 0x1F, 31);
            let green = scale_channel((raw >> 5) & 0x3F, 63);
            let blue = scale_channel(raw & 0x1F, 31);
            Ok(argb(0xFF, red, green, blue))
        }
        ColorEncoding::F32 => {
            let mut bytes = [0u8; 16];
            r.read_exact(&mut bytes)?;
            let channel = |i: usize| -> u8 {
                let v = f32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
                (v.clamp(0.0, 1.0) * 255.0) as u8
            };
            Ok(argb(channel(3), channel(0), channel(1), channel(2)))
        }
        ColorEncoding::Custom => Err(TinyVgError::NotSupported { reason: "custom color encoding" }),
    }
}

pub fn parse_color_table<R: Read>(r: &mut R, encoding: ColorEncoding) -> Result<Vec<Argb8888>> {
    let count = read_varuint(r)?;
    if count == 0 {
        return Err(TinyVgError::InvalidFormat { reason: "empty color table" });
    }
    let mut colors = Vec::new();
    colors
        .try_reserve_exact(count as usize)
        .map_err(|_| TinyVgError::OutOfMemory)?;
    for _ in 0..count {
        colors.push(read_one(r, encoding)?);
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8888_reads_red_green_blue_alpha_in_wire_order() {
        let mut data: &[u8] = &[0x01, 0xFF, 0x00, 0xFF, 0x10, 0x20, 0x30, 0x40];
        let colors = parse_color_table(&mut data, ColorEncoding::U8888).unwrap();
        assert_eq!(colors, vec![argb(0xFF, 0xFF, 0x00, 0xFF), argb(0x40, 0x10, 0x20, 0x30)]);
    }

    #[test]
    fn u565_expands_five_and_six_bit_channels_to_eight_bits() {
        let mut data: &[u8] = &[0x01, 0xFF, 0xFF];
        let colors = parse_color_table(&mut data, ColorEncoding::U565).unwrap();
        assert_eq!(colors, vec![argb(0xFF, 0xFF, 0xFF, 0xFF)]);
    }

    #[test]
    fn f32_clamps_and_scales_to_eight_bit_channels() {
        let mut bytes = vec![0x01u8];
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        let mut data: &[u8] = &bytes;
        let colors = parse_color_table(&mut data, ColorEncoding::F32).unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0] >> 24, 0xFF); // alpha
        assert_eq!((colors[0] >> 16) & 0xFF, 0xFF); // red
    }

    #[test]
    fn custom_encoding_is_rejected() {
        let mut data: &[u8] = &[0x01, 0, 0, 0, 0];
        assert_eq!(
            parse_color_table(&mut data, ColorEncoding::Custom),
            Err(TinyVgError::NotSupported { reason: "custom color encoding" })
        );
    }

    #[test]
    fn zero_colors_is_a_format_error() {
        let mut data: &[u8] = &[0x00];
        assert_eq!(
            parse_color_table(&mut data, ColorEncoding::U8888),
            Err(TinyVgError::InvalidFormat { reason: "empty color table" })
        );
    }
}
