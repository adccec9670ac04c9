use policy::{RmsProp, Tensor};

#[test]
fn pending_gradients_are_zero_after_an_update() {
    let mut w1 = Tensor::from_vec(vec![2, 2], vec![0.0; 4]);
    let mut w2 = Tensor::from_vec(vec![2], vec![0.0; 2]);
    let mut optim = RmsProp::new(1e-2, 0.9, &[&w1, &w2]);
    let g1 = Tensor::from_vec(vec![2, 2], vec![1.0, -2.0, 3.0, -4.0]);
    let g2 = Tensor::from_vec(vec![2], vec![0.5, -0.5]);
    optim.accumulate(&[&g1, &g2]);
    optim.accumulate(&[&g1, &g2]);

    // Episode 3 of a batch of 2 does not land on a boundary.
    assert!(!optim.maybe_step(&mut [&mut w1, &mut w2], 3, 2));
    assert_eq!(optim.pending()[0][0], 2.0);

    assert!(optim.maybe_step(&mut [&mut w1, &mut w2], 4, 2));
    assert!(optim
        .pending()
        .iter()
        .all(|layer| layer.iter().all(|&g| g == 0.0)));
}

#[test]
fn update_follows_the_rms_rule() {
    let mut w = Tensor::from_vec(vec![1], vec![1.0]);
    let mut optim = RmsProp::new(0.1, 0.9, &[&w]);
    let g = Tensor::from_vec(vec![1], vec![2.0]);
    optim.accumulate(&[&g]);
    assert!(optim.maybe_step(&mut [&mut w], 1, 1));

    // grad_sq = 0.1 * 4; w += 0.1 * 2 / sqrt(grad_sq + 1e-5)
    let sq = 0.1_f32 * 4.0;
    assert!((optim.grad_sq()[0][0] - sq).abs() < 1e-7);
    let expected = 1.0 + 0.1 * 2.0 / (sq + 1e-5).sqrt();
    assert!((w.data[0] - expected).abs() < 1e-6);
}

#[test]
fn grad_sq_decays_toward_the_squared_gradient() {
    let mut w = Tensor::from_vec(vec![1], vec![0.0]);
    let mut optim = RmsProp::new(1e-3, 0.99, &[&w]);
    let g = Tensor::from_vec(vec![1], vec![3.0]);
    let target = 9.0_f32;
    let mut prev_gap = target;
    for episode in 1..=5 {
        optim.accumulate(&[&g]);
        optim.maybe_step(&mut [&mut w], episode, 1);
        let gap = (target - optim.grad_sq()[0][0]).abs();
        assert!(gap < prev_gap, "episode {episode}: {gap} vs {prev_gap}");
        prev_gap = gap;
    }
}
