use super::*;
use crate::ops::arithmetic::{add_op, mul_op, pow_scalar_op, sub_op};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_requires_grad_flag() {
    let t = create_test_tensor(vec![1.0], vec![1]);
    assert!(!t.requires_grad());
    t.requires_grad_(true).unwrap();
    assert!(t.requires_grad());
    assert!(t.is_leaf());
}

#[test]
fn test_requires_grad_on_non_leaf_fails() {
    let a = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let b = add_op(&a, &a).unwrap();
    assert!(!b.is_leaf());
    assert_eq!(b.requires_grad_(false), Err(GradstepError::RequiresGradOnNonLeaf));
}

#[test]
fn test_detach_shares_values_but_not_graph() {
    let a = create_test_tensor_with_grad(vec![2.0], vec![]);
    let b = mul_op(&a, &a).unwrap();
    let d = b.detach();
    assert!(!d.requires_grad());
    assert!(d.grad_fn().is_none());
    assert_eq!(d.item().unwrap(), 4.0);
    assert_ne!(d.node_id(), b.node_id());
}

#[test]
fn test_backward_requires_grad() {
    let t = create_test_tensor(vec![1.0], vec![]);
    assert_eq!(t.backward(), Err(GradstepError::RequiresGradNotMet));
}

#[test]
fn test_backward_non_scalar() {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    assert_eq!(t.backward(), Err(GradstepError::BackwardNonScalar));
}

#[test]
fn test_backward_on_leaf_seeds_one() {
    let t = create_test_tensor_with_grad(vec![3.0], vec![]);
    t.backward().unwrap();
    check_tensor_near(&t.grad().unwrap(), &[], &[1.0], 0.0);
}

#[test]
fn test_backward_square_gradient() {
    // d/dx (x - 1)^2 at x = 5 is 8.
    let x = create_test_tensor_with_grad(vec![5.0], vec![]);
    let target = create_test_tensor(vec![1.0], vec![]);
    let loss = pow_scalar_op(&sub_op(&x, &target).unwrap(), 2.0).unwrap();
    loss.backward().unwrap();
    check_tensor_near(&x.grad().unwrap(), &[], &[8.0], 1e-5);
    assert!(target.grad().is_none());
}

#[test]
fn test_backward_diamond_accumulates() {
    // y = a*a + a  =>  dy/da = 2a + 1
    let a = create_test_tensor_with_grad(vec![3.0], vec![]);
    let y = add_op(&mul_op(&a, &a).unwrap(), &a).unwrap();
    y.backward().unwrap();
    check_tensor_near(&a.grad().unwrap(), &[], &[7.0], 1e-6);
}

#[test]
fn test_intermediate_grads_not_retained() {
    let a = create_test_tensor_with_grad(vec![3.0], vec![]);
    let b = mul_op(&a, &a).unwrap();
    let c = add_op(&b, &a).unwrap();
    c.backward().unwrap();
    assert!(b.grad().is_none());
    assert!(c.grad().is_none());
}

#[test]
fn test_backward_twice_accumulates_then_zero_grad() {
    let a = create_test_tensor_with_grad(vec![2.0], vec![]);
    let y = mul_op(&a, &a).unwrap();
    y.backward().unwrap();
    y.backward().unwrap();
    check_tensor_near(&a.grad().unwrap(), &[], &[8.0], 1e-6);

    a.zero_grad();
    assert!(a.grad().is_none());
}

#[test]
fn test_gradient_is_plain_tensor() {
    let a = create_test_tensor_with_grad(vec![2.0], vec![]);
    mul_op(&a, &a).unwrap().backward().unwrap();
    let grad = a.grad().unwrap();
    assert!(!grad.requires_grad());
    assert!(grad.grad_fn().is_none());
}

#[test]
fn test_acc_grad_checks() {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    assert!(matches!(
        a.acc_grad(create_test_tensor(vec![1.0], vec![1])),
        Err(GradstepError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.acc_grad(Tensor::new_f64(vec![1.0, 1.0], vec![2]).unwrap()),
        Err(GradstepError::DataTypeMismatch { .. })
    ));

    a.acc_grad(create_test_tensor(vec![1.0, 1.0], vec![2])).unwrap();
    a.acc_grad(create_test_tensor(vec![0.5, 2.0], vec![2])).unwrap();
    check_tensor_near(&a.grad().unwrap(), &[2], &[1.5, 3.0], 1e-6);
}

#[test]
fn test_backward_f64() {
    let x = Tensor::scalar_f64(5.0);
    x.requires_grad_(true).unwrap();
    let loss = pow_scalar_op(&sub_op(&x, &Tensor::scalar_f64(1.0)).unwrap(), 2.0).unwrap();
    loss.backward().unwrap();
    assert_eq!(x.grad().unwrap().get_f64_data().unwrap(), vec![8.0]);
}
