//! Interleaved component buffer -> pixels, adapting the channel count.
//!
//! | input | output | rule                                             |
//! |-------|--------|--------------------------------------------------|
//! | n     | n      | copy                                             |
//! | 1     | 3 / 4  | replicate gray, alpha = `default_alpha`          |
//! | 3     | 1      | luminance `(2125 r + 7154 g + 721 b) / 10000`    |
//! | 4     | 1      | luminance scaled by `a / default_alpha`          |
//! | 3     | 4      | append `default_alpha`                           |
//! | 4     | 3      | drop alpha                                       |

use crate::{Component, Pixel};
use layout_bridge_core::{check_channels, try_vec, BridgeError, Element};

#[inline]
fn luminance<C: Component>(c: &[C]) -> f64 {
    (2125.0 * c[0].to_f64() + 7154.0 * c[1].to_f64() + 721.0 * c[2].to_f64()) / 10000.0
}

/// Convert `pixel_count` interleaved pixels of `in_channels` components each
/// into `P` pixels.
pub fn convert_pixel_buffer<P: Pixel>(
    buffer: &[P::Component],
    in_channels: usize,
    pixel_count: usize,
) -> Result<Vec<P>, BridgeError> {
    check_channels(in_channels)?;
    check_channels(P::CHANNELS)?;

    let expected = pixel_count
        .checked_mul(in_channels)
        .ok_or(BridgeError::AllocationFailure {
            elements: usize::MAX,
        })?;
    if buffer.len() != expected {
        return Err(BridgeError::ShapeMismatch {
            expected,
            got: buffer.len(),
        });
    }

    let alpha = P::Component::default_alpha();
    let mut out = try_vec(pixel_count)?;
    let mut comps = [P::Component::default(); 4];

    for src in buffer.chunks_exact(in_channels) {
        match (in_channels, P::CHANNELS) {
            (i, o) if i == o => comps[..o].copy_from_slice(src),
            (1, o) => {
                comps[..3].fill(src[0]);
                if o == 4 {
                    comps[3] = alpha;
                }
            }
            (3, 1) => comps[0] = P::Component::from_f64(luminance(src)),
            (4, 1) => {
                let scale = src[3].to_f64() / alpha.to_f64();
                comps[0] = P::Component::from_f64(luminance(src) * scale);
            }
            (3, 4) => {
                comps[..3].copy_from_slice(src);
                comps[3] = alpha;
            }
            // (4, 3)
            _ => comps[..3].copy_from_slice(&src[..3]),
        }
        out.push(P::from_components(&comps[..P::CHANNELS]));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, Rgba};
    use approx::assert_relative_eq;

    #[test]
    fn matching_channels_copy() {
        let px = convert_pixel_buffer::<Rgb<u8>>(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(px, vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
    }

    #[test]
    fn gray_expands_to_color_with_opaque_alpha() {
        let rgb = convert_pixel_buffer::<Rgb<u16>>(&[9, 10], 1, 2).unwrap();
        assert_eq!(rgb, vec![Rgb::new(9, 9, 9), Rgb::new(10, 10, 10)]);

        let rgba = convert_pixel_buffer::<Rgba<f32>>(&[0.5], 1, 1).unwrap();
        assert_eq!(rgba, vec![Rgba::new(0.5, 0.5, 0.5, 1.0)]);
    }

    #[test]
    fn color_reduces_to_luminance() {
        let gray = convert_pixel_buffer::<f64>(&[1.0, 1.0, 1.0, 100.0, 0.0, 0.0], 3, 2).unwrap();
        assert_relative_eq!(gray[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(gray[1], 21.25, epsilon = 1e-12);

        let gray = convert_pixel_buffer::<u8>(&[200, 200, 200], 3, 1).unwrap();
        assert_eq!(gray, vec![200]);
    }

    #[test]
    fn alpha_weights_luminance() {
        let gray = convert_pixel_buffer::<f32>(&[1.0, 1.0, 1.0, 0.5], 4, 1).unwrap();
        assert_relative_eq!(gray[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn alpha_is_added_or_dropped() {
        let rgba = convert_pixel_buffer::<Rgba<u8>>(&[1, 2, 3], 3, 1).unwrap();
        assert_eq!(rgba, vec![Rgba::new(1, 2, 3, 255)]);

        let rgb = convert_pixel_buffer::<Rgb<u8>>(&[1, 2, 3, 4], 4, 1).unwrap();
        assert_eq!(rgb, vec![Rgb::new(1, 2, 3)]);
    }

    #[test]
    fn rejects_unsupported_channels_and_short_buffers() {
        assert_eq!(
            convert_pixel_buffer::<u8>(&[1, 2], 2, 1),
            Err(BridgeError::UnsupportedChannelCount { channels: 2 })
        );
        assert_eq!(
            convert_pixel_buffer::<[u8; 2]>(&[1], 1, 1),
            Err(BridgeError::UnsupportedChannelCount { channels: 2 })
        );
        assert_eq!(
            convert_pixel_buffer::<u8>(&[1, 2, 3], 3, 2),
            Err(BridgeError::ShapeMismatch { expected: 6, got: 3 })
        );
    }
}
