use super::*;
use crate::tensor::Tensor;
use crate::types::DType;

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor).unwrap();
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert_eq!(zeros_t.dtype(), DType::F32);
    assert!(zeros_t.get_f32_data().unwrap().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones_like_keeps_f64() {
    let tensor = Tensor::new_f64(vec![4.0, 5.0], vec![2]).unwrap();
    let ones_t = ones_like(&tensor).unwrap();
    assert_eq!(ones_t.dtype(), DType::F64);
    assert_eq!(ones_t.get_f64_data().unwrap(), vec![1.0, 1.0]);
}

#[test]
fn test_ones_like_scalar() {
    let ones_t = ones_like(&Tensor::scalar(3.0)).unwrap();
    assert!(ones_t.shape().is_empty());
    assert_eq!(ones_t.item().unwrap(), 1.0);
}

#[test]
fn test_full() {
    let t = full(&[2, 2], 7.5).unwrap();
    assert_eq!(t.shape(), vec![2, 2]);
    assert_eq!(t.numel(), 4);
    assert_eq!(t.get_f32_data().unwrap(), vec![7.5; 4]);
}

#[test]
fn test_full_f64_empty_shape_is_scalar() {
    let t = full_f64(&[], -2.0).unwrap();
    assert_eq!(t.numel(), 1);
    assert_eq!(t.item().unwrap(), -2.0);
}
