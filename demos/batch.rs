extern crate piecewise_interpolation;

use piecewise_interpolation::{ControlSequence, Interpolator, KernelKind};

fn main() {

    let sequence = ControlSequence::from_clamped(vec![0.0, 1.2, 0.4, 0.3, -0.1, 0.8]).unwrap();
    let mut interpolator = Interpolator::new();

    let x_min = 0.0;
    let x_max = sequence.segment_count() as f64;
    let number_of_steps = 50;
    let step = (x_max - x_min) / number_of_steps as f64;

    let mut x_vector = Vec::new();

    for i in 0..=number_of_steps {
        x_vector.push(x_min + step * i as f64);
    }

    let result = interpolator
        .batch_interpolate(KernelKind::MonotoneCubicHermite, &sequence, &x_vector)
        .unwrap();

    println!("x;y");
    for i in 0..=number_of_steps {
        println!("{:.2};{:.3}", x_vector[i], result[i]);
    }
}
