use layout_bridge_core::{BridgeError, Element, ElementType, PlanarArray};
use layout_bridge_raster::{array_to_image, image_to_array, Component, Image, Pixel, Rgb, Rgba};

/// Deterministic pattern image whose components stay within `0..=250`.
fn pattern<P: Pixel>(width: usize, height: usize) -> Image<P, 2> {
    let mut comps = vec![P::Component::default(); P::CHANNELS];
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            for (c, v) in comps.iter_mut().enumerate() {
                *v = P::Component::from_f64(((x * 7 + y * 13 + c * 31) % 251) as f64);
            }
            pixels.push(P::from_components(&comps));
        }
    }
    Image::from_pixels([width, height], pixels).expect("pattern image")
}

fn assert_round_trip<P: Pixel>() {
    let img = pattern::<P>(5, 3);
    let planar = image_to_array(&img).expect("image -> array");
    assert_eq!(planar.dims(), [3, 5, P::CHANNELS, 1]);
    assert_eq!(planar.dtype(), <P::Component as Element>::DTYPE);

    let back = array_to_image::<P, 2>(&planar, false).expect("array -> image");
    assert_eq!(back.region(), img.region());
    assert_eq!(back.pixels(), img.pixels(), "{:?}", std::any::type_name::<P>());
}

fn assert_round_trip_all_layouts<T: Component + Pixel<Component = T>>() {
    assert_round_trip::<T>();
    assert_round_trip::<Rgb<T>>();
    assert_round_trip::<Rgba<T>>();
    assert_round_trip::<[T; 3]>();
}

#[test]
fn round_trip_is_exact_for_every_component_type() {
    assert_round_trip_all_layouts::<u8>();
    assert_round_trip_all_layouts::<i16>();
    assert_round_trip_all_layouts::<u16>();
    assert_round_trip_all_layouts::<i32>();
    assert_round_trip_all_layouts::<f32>();
    assert_round_trip_all_layouts::<f64>();
}

#[test]
fn array_round_trip_through_image() {
    // Native (height, width, channels) array -> image -> array.
    let dims = [4, 6, 3, 1];
    let n: usize = dims.iter().product();
    let data: Vec<u16> = (0..n as u16).map(|v| v * 3).collect();
    let planar = PlanarArray::from_vec(dims, data).unwrap();

    let img = array_to_image::<Rgb<u16>, 2>(&planar, false).unwrap();
    assert_eq!(img.size(), [6, 4]);
    assert_eq!(image_to_array(&img).unwrap(), planar);
}

#[test]
fn transposed_input_yields_the_same_image() {
    let img = pattern::<Rgb<f32>>(4, 2);
    let native = image_to_array(&img).unwrap();
    let natural = native.transpose().unwrap();
    assert_eq!(natural.dims(), [4, 2, 3, 1]);

    let from_natural = array_to_image::<Rgb<f32>, 2>(&natural, true).unwrap();
    assert_eq!(from_natural, img);
}

#[test]
fn element_type_is_cast_to_the_component() {
    let img = pattern::<u8>(3, 3);
    let planar = image_to_array(&img).unwrap().cast(ElementType::F64).unwrap();
    let back = array_to_image::<u8, 2>(&planar, false).unwrap();
    assert_eq!(back, img);

    let as_float = array_to_image::<f32, 2>(&planar, false).unwrap();
    for (a, b) in as_float.pixels().iter().zip(img.pixels()) {
        approx::assert_relative_eq!(*a, *b as f32);
    }
}

#[test]
fn unsupported_channel_counts_are_reported() {
    let img = Image::<[f32; 2], 2>::from_pixels([1, 1], vec![[0.0, 1.0]]).unwrap();
    assert_eq!(
        image_to_array(&img),
        Err(BridgeError::UnsupportedChannelCount { channels: 2 })
    );

    let planar = PlanarArray::zeros([2, 2, 5, 1], ElementType::F32).unwrap();
    assert_eq!(
        array_to_image::<f32, 2>(&planar, false),
        Err(BridgeError::UnsupportedChannelCount { channels: 5 })
    );
}
