use std::fs;

use clap::Parser;
use topc_privacy::{render_distribution, Cli, DatasetSource, LaplaceTailBound};

#[test]
fn config_file_drives_full_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("counts.dat"), "40\n30\n20\n10\n5\n1\n").expect("dataset");
    let cfg_path = dir.path().join("run.toml");
    fs::write(
        &cfg_path,
        "[dataset]\npath = \"counts.dat\"\nname = \"toy\"\n\n[analysis]\nepsilon = 1.0\nc = 2\n",
    )
    .expect("config");

    let cli = Cli::try_parse_from([
        "topc-accuracy",
        "--config",
        cfg_path.to_str().expect("utf-8 path"),
        "--step",
        "5",
    ])
    .expect("parse");
    let config = cli.resolve().expect("resolve");
    assert!(matches!(config.source, Some(DatasetSource::File(_))));

    let scores = config.load_scores().expect("scores");
    let dist = config
        .analysis()
        .run(&scores, &LaplaceTailBound)
        .expect("distribution");
    assert_eq!(dist.threshold, 25.0);
    assert_eq!(dist.samples, 6);

    let mut buf = Vec::new();
    render_distribution(&dist, &config.display_name(), &mut buf).expect("render");
    let text = String::from_utf8(buf).expect("utf-8");
    assert!(text.starts_with("SER distribution on toy, k = 6, c = 2, epsilon = 1"));
}
