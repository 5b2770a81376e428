extern crate piecewise_interpolation;

use piecewise_interpolation::{ControlSequence, Interpolator, KernelKind};

fn main() {

    let sequence = ControlSequence::new(vec![0.2, 0.9, 0.1, 0.6, 0.6, 1.0]).unwrap();
    let mut interpolator = Interpolator::new();

    let samples_per_segment = 10;

    print!("x");
    for kind in KernelKind::ALL {
        print!(";{}", kind);
    }
    println!();

    let curves: Vec<Vec<(f64, f64)>> = KernelKind::ALL
        .iter()
        .map(|kind| interpolator.sample(*kind, &sequence, samples_per_segment).unwrap())
        .collect();

    for i in 0..curves[0].len() {
        print!("{:.2}", curves[0][i].0);
        for curve in &curves {
            print!(";{:.3}", curve[i].1);
        }
        println!();
    }
}
