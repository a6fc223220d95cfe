//! Pixel component and pixel traits.

use layout_bridge_core::Element;
use std::fmt;

/// Numeric type usable as a pixel component (booleans are masks, not pixels).
pub trait Component: Element {
    /// Alpha assigned when a pixel gains an alpha channel: the type maximum
    /// for integers, `1.0` for floats.
    fn default_alpha() -> Self;
}

macro_rules! impl_int_component {
    ($($t:ty),*) => {
        $(impl Component for $t {
            #[inline]
            fn default_alpha() -> Self {
                <$t>::MAX
            }
        })*
    };
}

impl_int_component!(u8, i16, u16, i32);

impl Component for f32 {
    #[inline]
    fn default_alpha() -> Self {
        1.0
    }
}

impl Component for f64 {
    #[inline]
    fn default_alpha() -> Self {
        1.0
    }
}

/// Compile-time pixel layout: a fixed number of interleaved components.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    type Component: Component;

    const CHANNELS: usize;

    fn component(&self, channel: usize) -> Self::Component;

    /// Build a pixel from its components. `components` holds exactly
    /// `CHANNELS` values.
    fn from_components(components: &[Self::Component]) -> Self;
}

macro_rules! impl_scalar_pixel {
    ($($t:ty),*) => {
        $(impl Pixel for $t {
            type Component = $t;

            const CHANNELS: usize = 1;

            #[inline]
            fn component(&self, _channel: usize) -> $t {
                *self
            }

            #[inline]
            fn from_components(components: &[$t]) -> Self {
                components[0]
            }
        })*
    };
}

impl_scalar_pixel!(u8, i16, u16, i32, f32, f64);

/// Red, green, blue.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb<T> {
    pub r: T,
    pub g: T,
    pub b: T,
}

impl<T> Rgb<T> {
    pub const fn new(r: T, g: T, b: T) -> Self {
        Self { r, g, b }
    }
}

/// Red, green, blue, alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

impl<T> Rgba<T> {
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }
}

impl<T: Component> Pixel for Rgb<T> {
    type Component = T;

    const CHANNELS: usize = 3;

    #[inline]
    fn component(&self, channel: usize) -> T {
        match channel {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    #[inline]
    fn from_components(c: &[T]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl<T: Component> Pixel for Rgba<T> {
    type Component = T;

    const CHANNELS: usize = 4;

    #[inline]
    fn component(&self, channel: usize) -> T {
        match channel {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }

    #[inline]
    fn from_components(c: &[T]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Fixed-size component tuple. Any `N` is representable; only 1, 3 and 4
/// convert to and from planar arrays.
impl<T: Component, const N: usize> Pixel for [T; N]
where
    [T; N]: Default,
{
    type Component = T;

    const CHANNELS: usize = N;

    #[inline]
    fn component(&self, channel: usize) -> T {
        self[channel]
    }

    #[inline]
    fn from_components(c: &[T]) -> Self {
        std::array::from_fn(|i| c[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components<P: Pixel>(p: P) -> Vec<P::Component> {
        (0..P::CHANNELS).map(|c| p.component(c)).collect()
    }

    #[test]
    fn channel_counts() {
        assert_eq!(<u8 as Pixel>::CHANNELS, 1);
        assert_eq!(<Rgb<u16> as Pixel>::CHANNELS, 3);
        assert_eq!(<Rgba<f32> as Pixel>::CHANNELS, 4);
        assert_eq!(<[i16; 2] as Pixel>::CHANNELS, 2);
    }

    #[test]
    fn components_round_trip_in_channel_order() {
        let p = Rgba::new(1u8, 2, 3, 4);
        assert_eq!(components(p), vec![1, 2, 3, 4]);
        assert_eq!(Rgba::<u8>::from_components(&[1, 2, 3, 4]), p);

        let q = [7.5f64, -1.0, 0.25];
        assert_eq!(<[f64; 3]>::from_components(&components(q)), q);
    }

    #[test]
    fn default_alpha_is_opaque() {
        assert_eq!(u8::default_alpha(), 255);
        assert_eq!(i16::default_alpha(), i16::MAX);
        assert_eq!(f32::default_alpha(), 1.0);
    }
}
