use topc_privacy::{ScoreSequence, SelectionConfig, SerAnalysis};

fn main() {
    let scores = ScoreSequence::parse("120 95 90 64 40 33 12 8 5 1").expect("scores");

    // Threshold-only bound: ignores the score-release noise entirely.
    let threshold_only = |a: f64, _k: usize, epsilon1: f64, _epsilon2: f64| (-a * epsilon1).exp();

    let dist = SerAnalysis::new(1.0, SelectionConfig::new(3))
        .run(&scores, &threshold_only)
        .expect("distribution");

    println!("T = {}", dist.threshold);
    for (point, mass) in dist.cdf.points().iter().zip(&dist.pdf.mass) {
        println!(
            "a = {:>5}: SER = {:.4}, 1 - beta = {:.4}, mass = {:.4}",
            point.a, point.x, point.y, mass
        );
    }
}
