#![cfg(feature = "opencv")]

mod common;

use common::synthetic_image::{checkerboard, uniform, write_png};
use common::{list_files, read_lines, TempDir};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn featbench(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_featbench"))
        .args(args)
        .output()
        .expect("spawn featbench")
}

fn featbench_with(selector: &str, input: &Path, output: &Path) -> Output {
    featbench(&[Path::new(selector), input, output])
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout).lines().map(str::to_string).collect()
}

fn detector_column(stats: &Path) -> Vec<String> {
    read_lines(stats)
        .iter()
        .skip(1)
        .map(|l| l.split(',').next().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn sift_on_uniform_image_reports_zero_keypoints() {
    let tmp = TempDir::new("cli-sift");
    let out = tmp.subdir("out");
    let image = tmp.path().join("flat.png");
    write_png(&uniform(64, 64, 128), &image);

    let result = featbench_with("SIFT", &image, &out);
    assert!(result.status.success());
    assert_eq!(
        stdout_lines(&result),
        vec![format!("Open {}", image.display()), "Start SIFT".to_string()]
    );

    let stats = read_lines(&out.join("flat_stats.csv"));
    assert_eq!(stats[0], "detector,keypoints,r_min,r_max,r_mean,r_stddev,ms");
    assert!(stats[1].starts_with("SIFT,0,0,0,0,0,"));
    assert_eq!(read_lines(&out.join("flat_SIFT_keypoints.csv")).len(), 1);
    assert!(out.join("flat_SIFT.jpg").exists());
}

#[test]
fn desc_selector_runs_descriptor_detectors_in_order() {
    let tmp = TempDir::new("cli-desc");
    let out = tmp.subdir("out");
    let image = tmp.path().join("board.png");
    write_png(&checkerboard(128, 128, 16), &image);

    let result = featbench_with("desc", &image, &out);
    assert!(result.status.success());
    assert_eq!(
        detector_column(&out.join("board_stats.csv")),
        vec!["SIFT", "BRISK", "ORB", "AKAZE"]
    );
}

#[test]
fn all_selector_runs_nine_detectors_in_order() {
    let tmp = TempDir::new("cli-all");
    let out = tmp.subdir("out");
    let image = tmp.path().join("board.png");
    write_png(&checkerboard(128, 128, 16), &image);

    let result = featbench_with("all", &image, &out);
    assert!(result.status.success());

    let names = detector_column(&out.join("board_stats.csv"));
    assert_eq!(
        names,
        vec![
            "SIFT",
            "BRISK",
            "ORB",
            "AKAZE",
            "MSER",
            "FastFeatureDetector",
            "SimpleBlobDetector",
            "AgastFeatureDetector",
            "GFTTDetector",
        ]
    );

    for line in read_lines(&out.join("board_stats.csv")).iter().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        let name = fields[0];
        let count: usize = fields[1].parse().unwrap();
        let kp_rows = read_lines(&out.join(format!("board_{}_keypoints.csv", name))).len() - 1;
        assert_eq!(kp_rows, count, "{}", name);
        assert!(out.join(format!("board_{}.jpg", name)).exists());
    }
}

#[test]
fn unknown_selector_exits_with_one() {
    let tmp = TempDir::new("cli-bogus");
    let out = tmp.subdir("out");
    let image = tmp.path().join("a.png");
    write_png(&uniform(16, 16, 0), &image);

    let result = featbench_with("bogus", &image, &out);
    assert_eq!(result.status.code(), Some(1));
    assert_eq!(stdout_lines(&result), vec!["Unknown detector type: bogus"]);
    assert!(list_files(&out).is_empty());
}

#[test]
fn output_path_that_is_a_file_exits_with_one() {
    let tmp = TempDir::new("cli-outfile");
    let image = tmp.path().join("a.png");
    write_png(&uniform(16, 16, 0), &image);
    let not_a_dir = tmp.path().join("out.txt");
    fs::write(&not_a_dir, "x").unwrap();

    let result = featbench_with("ORB", &image, &not_a_dir);
    assert_eq!(result.status.code(), Some(1));
    assert_eq!(stdout_lines(&result).len(), 1);
}

#[test]
fn wrong_arity_prints_usage() {
    let result = featbench(&[Path::new("ORB")]);
    assert_eq!(result.status.code(), Some(1));
    let lines = stdout_lines(&result);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Usage: "));
}

#[test]
fn mixed_directory_processes_only_images() {
    let tmp = TempDir::new("cli-mixed");
    let input = tmp.subdir("in");
    let out = tmp.subdir("out");
    write_png(&checkerboard(64, 64, 8), &input.join("a.jpg"));
    write_png(&checkerboard(64, 64, 16), &input.join("b.png"));
    fs::write(input.join("c.txt"), "hello").unwrap();

    let result = featbench_with("FAST", &input, &out);
    assert!(result.status.success());

    let opened: Vec<String> = stdout_lines(&result)
        .into_iter()
        .filter(|l| l.starts_with("Open "))
        .collect();
    assert_eq!(opened.len(), 2);
    assert!(out.join("a_stats.csv").exists());
    assert!(out.join("b_stats.csv").exists());
    assert!(!out.join("c_stats.csv").exists());
}

#[test]
fn empty_directory_exits_cleanly() {
    let tmp = TempDir::new("cli-empty");
    let input = tmp.subdir("in");
    let out = tmp.subdir("out");

    let result = featbench_with("all", &input, &out);
    assert!(result.status.success());
    assert!(result.stdout.is_empty());
    assert!(list_files(&out).is_empty());
}
