use crate::error::GradstepError;
use crate::ops::arithmetic::sub_op;
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_sub_tensors_ok() {
    let t1 = create_test_tensor(vec![10.0, 20.0, 30.0, 40.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let result = sub_op(&t1, &t2).unwrap();
    check_tensor_near(&result, &[2, 2], &[9.0, 18.0, 27.0, 36.0], 1e-6);
}

#[test]
fn test_sub_tensors_shape_mismatch() {
    let t1 = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0], vec![2, 3]);
    let result = sub_op(&t1, &t2);
    assert!(matches!(result, Err(GradstepError::BroadcastError { .. })));
}

#[test]
fn test_sub_broadcast_scalar_on_right() {
    let t1 = create_test_tensor(vec![5.0, 6.0], vec![2]);
    let result = sub_op(&t1, &Tensor::scalar(1.0)).unwrap();
    check_tensor_near(&result, &[2], &[4.0, 5.0], 1e-6);
}

#[test]
fn test_sub_backward() -> Result<(), GradstepError> {
    let a = create_test_tensor_with_grad(vec![5.0], vec![]);
    let b = create_test_tensor_with_grad(vec![1.0], vec![]);
    let result = sub_op(&a, &b)?;
    assert!(result.requires_grad());
    result.backward()?;
    check_tensor_near(&a.grad().unwrap(), &[], &[1.0], 1e-6);
    check_tensor_near(&b.grad().unwrap(), &[], &[-1.0], 1e-6);
    Ok(())
}

#[test]
fn test_sub_backward_skips_constant_operand() -> Result<(), GradstepError> {
    let a = create_test_tensor_with_grad(vec![5.0], vec![]);
    let target = Tensor::scalar(1.0);
    sub_op(&a, &target)?.backward()?;
    assert!(a.grad().is_some());
    assert!(target.grad().is_none());
    Ok(())
}
