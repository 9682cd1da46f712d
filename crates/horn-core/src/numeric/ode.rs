/// One Heun (explicit trapezoidal, RK2) predictor-corrector step of
/// `dy/dt = f(t, y)` from `(t, y)` with step `h`.
pub fn heun_step<F, const N: usize>(f: &F, t: f64, y: &[f64; N], h: f64) -> [f64; N]
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let k1 = f(t, y);
    let mut predicted = *y;
    for (p, k) in predicted.iter_mut().zip(&k1) {
        *p += h * k;
    }
    let k2 = f(t + h, &predicted);

    let mut next = *y;
    for i in 0..N {
        next[i] += 0.5 * h * (k1[i] + k2[i]);
    }
    next
}
