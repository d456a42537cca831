use crate::tensor::Tensor;

/// Checks that a tensor has `expected_shape` and elements within `tolerance` of `expected_data`.
///
/// Works for both dtypes: values are compared after widening to f64.
/// Panics on any mismatch.
pub(crate) fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data_vec = actual.buffer().to_f64_vec();
    assert_eq!(
        actual_data_vec.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data_vec.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e as f64).abs();
        if diff > tolerance as f64 {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a simple f32 tensor for testing purposes.
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

/// Helper to create a simple f32 leaf tensor that requires gradient.
pub(crate) fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    let tensor = create_test_tensor(data, shape);
    tensor
        .requires_grad_(true)
        .expect("Failed to set requires_grad on a fresh leaf");
    tensor
}
