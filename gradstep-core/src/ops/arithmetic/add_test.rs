use crate::error::GradstepError;
use crate::ops::arithmetic::add_op;
use crate::tensor::Tensor;
use crate::types::DType;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_add_tensors_ok() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
    let result = add_op(&t1, &t2).unwrap();
    check_tensor_near(&result, &[2, 2], &[6.0, 8.0, 10.0, 12.0], 1e-6);
    assert_eq!(result.dtype(), DType::F32);
    assert!(!result.requires_grad());
    assert!(result.grad_fn().is_none());
}

#[test]
fn test_add_tensors_shape_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let result = add_op(&t1, &t2);
    assert!(matches!(result, Err(GradstepError::BroadcastError { .. })));
}

#[test]
fn test_add_dtype_mismatch() {
    let t1 = Tensor::scalar(1.0);
    let t2 = Tensor::scalar_f64(1.0);
    let result = add_op(&t1, &t2);
    assert!(matches!(result, Err(GradstepError::DataTypeMismatch { .. })));
}

#[test]
fn test_add_scalar_broadcasting() {
    let vector = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
    let scalar = Tensor::scalar(10.0);
    let result = add_op(&scalar, &vector).unwrap();
    check_tensor_near(&result, &[3], &[11.0, 12.0, 13.0], 1e-6);
}

#[test]
fn test_add_backward_reduces_broadcast_operand() -> Result<(), GradstepError> {
    let single = create_test_tensor_with_grad(vec![4.0], vec![1]);
    let scalar = create_test_tensor_with_grad(vec![0.5], vec![]);
    let out = add_op(&single, &scalar)?;
    assert_eq!(out.shape(), vec![1]);
    out.backward()?;
    check_tensor_near(&single.grad().unwrap(), &[1], &[1.0], 1e-6);
    // The 0-d operand gets its gradient back in its own shape.
    check_tensor_near(&scalar.grad().unwrap(), &[], &[1.0], 1e-6);
    Ok(())
}

#[test]
fn test_add_same_tensor_twice_accumulates() -> Result<(), GradstepError> {
    let x = create_test_tensor_with_grad(vec![3.0], vec![]);
    let doubled = add_op(&x, &x)?;
    doubled.backward()?;
    check_tensor_near(&x.grad().unwrap(), &[], &[2.0], 1e-6);
    Ok(())
}
