use topc_privacy::{split_budget, SelectionConfig};

fn main() {
    let epsilon = 0.1;
    for c in [1usize, 10, 50, 200] {
        for monotonic in [true, false] {
            let split = split_budget(epsilon, c, monotonic).expect("split");
            let rescaled = split.rescaled(&SelectionConfig::new(c).with_monotonic(monotonic));
            println!(
                "c = {c:>3}, monotonic = {monotonic:<5}: epsilon1 = {:.5}, epsilon2 = {:.5}, \
                 per-query epsilon2 = {:.7}",
                split.epsilon1, split.epsilon2, rescaled.epsilon2
            );
        }
    }
}
