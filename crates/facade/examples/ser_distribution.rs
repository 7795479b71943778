use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use topc_privacy::{
    render_distribution, synthetic_zipf_counts, LaplaceTailBound, ScoreSequence, SelectionConfig,
    SerAnalysis,
};

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let counts = synthetic_zipf_counts(&mut rng, 5_000, 1.1, 20_000).expect("zipf counts");
    let scores = ScoreSequence::from_counts(counts);

    let dist = SerAnalysis::new(0.5, SelectionConfig::new(20))
        .with_step(10)
        .run(&scores, &LaplaceTailBound)
        .expect("distribution");

    let mut out = std::io::stdout().lock();
    render_distribution(&dist, "synthetic Zipf", &mut out).expect("render");
}
