extern crate piecewise_interpolation;

use piecewise_interpolation::{ControlSequence, SmoothestCubic, SolverConfig};

fn main() {

    let sequence = ControlSequence::new(vec![0.1, 0.8, 0.3, 0.9, 0.2]).unwrap();

    for early_exit in [true, false] {
        let mut solver = SmoothestCubic::with_config(SolverConfig { early_exit, ..SolverConfig::default() });
        let tangents = solver.tangents(&sequence).unwrap().to_vec();

        println!("early_exit: {}", early_exit);
        println!("upper bound: {:.4}", SmoothestCubic::maximum_second_derivative(sequence.values()));
        println!("bound: {:.4}", solver.bound().unwrap());
        println!("feasibility checks: {}", solver.stats().last_search_checks);
        println!("tangents: {:?}", tangents);

        println!("x;y");
        for i in 0..sequence.segment_count() {
            for step in 0..10 {
                let t = step as f64 / 10.0;
                println!("{:.2};{:.3}", i as f64 + t, solver.evaluate(&sequence, i, t).unwrap());
            }
        }
        println!();
    }
}
