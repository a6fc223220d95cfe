use layout_bridge_core::{ElementBuffer, ElementType, PlanarArray};
use layout_bridge_mat::{array_to_mat, mat_to_array, mats_to_array, Mat};
use layout_bridge_raster::{image_to_array, Image, Rgb};

fn rgb_mat(rows: usize, cols: usize) -> (Mat, Vec<Rgb<u8>>) {
    let pixels: Vec<Rgb<u8>> = (0..rows * cols)
        .map(|i| {
            let v = (i * 7 % 200) as u8;
            Rgb::new(v, v + 1, v + 2)
        })
        .collect();
    let data: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    (Mat::from_vec(rows, cols, 3, data).unwrap(), pixels)
}

#[test]
fn transposed_mat_matches_image_layout() {
    // Same row-major pixels seen as a matrix and as an image.
    let (mat, pixels) = rgb_mat(5, 7);
    let img = Image::<Rgb<u8>, 2>::from_pixels([7, 5], pixels).unwrap();

    let from_mat = mat_to_array(&mat, true).unwrap();
    let from_img = image_to_array(&img).unwrap();
    assert_eq!(from_mat.dims(), [5, 7, 3, 1]);
    assert_eq!(from_mat, from_img);
}

#[test]
fn padded_matrix_round_trips_without_padding() {
    let (rows, cols, channels, step) = (3, 4, 4, 20);
    let mut data = vec![0.0f64; (rows - 1) * step + cols * channels];
    for r in 0..rows {
        for c in 0..cols {
            for k in 0..channels {
                data[r * step + c * channels + k] = (r * 100 + c * 10 + k) as f64;
            }
        }
    }
    let padded = Mat::from_buffer(rows, cols, channels, step, ElementBuffer::from(data)).unwrap();

    let back = array_to_mat(&mat_to_array(&padded, false).unwrap(), true).unwrap();
    assert_eq!(back.step(), cols * channels);
    assert_eq!(back.dtype(), ElementType::F64);
    for r in 0..rows {
        for c in 0..cols {
            for k in 0..channels {
                assert_eq!(back.get_f64(r, c, k), padded.get_f64(r, c, k));
            }
        }
    }
}

#[test]
fn split_planes_rejoin_into_colour_array() {
    let (mat, _) = rgb_mat(2, 3);
    let whole = mat_to_array(&mat, false).unwrap();

    let planes: Vec<Mat> = (0..3)
        .map(|k| {
            let data: Vec<u8> = (0..6)
                .map(|i| mat.typed::<u8>().unwrap()[i * 3 + k])
                .collect();
            Mat::from_vec(2, 3, 1, data).unwrap()
        })
        .collect();
    let joined = mats_to_array(&planes, false).unwrap();
    assert_eq!(joined, whole);
}

#[test]
fn every_element_type_survives() {
    for dtype in ElementType::ALL {
        let a = PlanarArray::zeros([3, 2, 1, 1], dtype).unwrap();
        let m = array_to_mat(&a, false).unwrap();
        assert_eq!(m.dtype(), dtype);
        assert_eq!(mat_to_array(&m, true).unwrap(), a);
    }
}
