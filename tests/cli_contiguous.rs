#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Stands in for `halLiftover --outPSL <hal> <src> <bed> <dest> <psl>`.
// By region name: ok* maps one-to-one at +1000, split* breaks into two far
// apart halves, rev* maps as two adjacent blocks on the reverse strand,
// none* does not map, bad* reports a '-' query strand, fail* exits 1.
const FAKE_LIFTOVER: &str = r#"#!/bin/sh
bed="$4"
psl="$6"
if grep -q "fail" "$bed"; then
    echo "liftover failed" >&2
    exit 1
fi
awk 'BEGIN { OFS = "\t" }
{
    s = $2; e = $3; len = e - s; h = int(len / 2)
    if ($4 ~ /^none/) next
    if ($4 ~ /^split/) {
        print len, 0, 0, 0, 0, 0, 0, 0, "+", $1, 100000, s, e, "chrT", 1000000, s + 1000, s + 60000, 2, h "," (len - h) ",", s "," (s + h) ",", (s + 1000) "," (s + h + 50000) ","
    } else if ($4 ~ /^rev/) {
        print len, 0, 0, 0, 0, 0, 0, 0, "+-", $1, 100000, s, e, "chrT", 1000000, 0, len, 2, h "," (len - h) ",", s "," (s + h) ",", s "," (s + h) ","
    } else if ($4 ~ /^bad/) {
        print len, 0, 0, 0, 0, 0, 0, 0, "-", $1, 100000, s, e, "chrT", 1000000, s, e, 1, len ",", s ",", s ","
    } else {
        print len, 0, 0, 0, 0, 0, 0, 0, "+", $1, 100000, s, e, "chrT", 1000000, s + 1000, e + 1000, 1, len ",", s ",", (s + 1000) ","
    }
}' "$bed" > "$psl"
"#;

fn fake_liftover(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("fakeLiftover");
    fs::write(&path, FAKE_LIFTOVER)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

fn contiguous(bin: &Path, regions: &Path, output: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("cgr")?;
    cmd.arg("contiguous")
        .arg("aln.hal")
        .arg("src")
        .arg(regions)
        .arg("dest")
        .arg("--liftover-bin")
        .arg(bin)
        .arg("-o")
        .arg(output);
    Ok(cmd)
}

#[test]
fn command_contiguous_records() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let output = temp.path().join("out.bed");

    let mut cmd = contiguous(&bin, Path::new("tests/bed/regions.bed"), &output)?;
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    assert_eq!(content, "chr1\t100\t200\tok1\nchr1\t500\t600\trev1\n");

    Ok(())
}

#[test]
fn command_contiguous_adjacencies() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let output = temp.path().join("out.txt");

    let mut cmd = contiguous(&bin, Path::new("tests/bed/regions.bed"), &output)?;
    cmd.arg("--print-adjacencies");
    cmd.assert().success();

    // ok1: 100 bases in one block; rev1: 98 inside two blocks plus the pair
    let content = fs::read_to_string(&output)?;
    assert_eq!(content, "99\n99\n");

    Ok(())
}

#[test]
fn command_contiguous_max_gap() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let output = temp.path().join("out.bed");

    // the split1 halves are 49000 apart
    let mut cmd = contiguous(&bin, Path::new("tests/bed/regions.bed"), &output)?;
    cmd.arg("--max-gap").arg("50000");
    cmd.assert().success();

    let content = fs::read_to_string(&output)?;
    assert_eq!(
        content,
        "chr1\t100\t200\tok1\nchr1\t300\t400\tsplit1\nchr1\t500\t600\trev1\n"
    );

    Ok(())
}

#[test]
fn command_contiguous_slices_keep_order() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let regions = temp.path().join("many.bed");

    let mut bed = String::from("track name=many\n");
    for i in 0..40 {
        let name = ["ok", "split", "rev", "none"][i % 4];
        bed += &format!("chr2\t{}\t{}\t{}{}\n", i * 1000, i * 1000 + 200, name, i);
    }
    fs::write(&regions, &bed)?;

    let single = temp.path().join("single.bed");
    let mut cmd = contiguous(&bin, &regions, &single)?;
    cmd.arg("--slices").arg("1");
    cmd.assert().success();

    let sliced = temp.path().join("sliced.bed");
    let mut cmd = contiguous(&bin, &regions, &sliced)?;
    cmd.arg("--slices").arg("7").arg("--parallel").arg("3");
    cmd.assert().success();

    let expected = fs::read_to_string(&single)?;
    assert_eq!(expected.lines().count(), 20);
    assert_eq!(fs::read_to_string(&sliced)?, expected);

    Ok(())
}

#[test]
fn command_contiguous_oracle_failure() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let regions = temp.path().join("fail.bed");
    let output = temp.path().join("out.bed");
    fs::write(&regions, "chr1\t100\t200\tok1\nchr1\t300\t400\tfail1\n")?;

    let mut cmd = contiguous(&bin, &regions, &output)?;
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Liftover invocation failed"));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn command_contiguous_reverse_query() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let regions = temp.path().join("bad.bed");
    let output = temp.path().join("out.bed");
    fs::write(&regions, "chr1\t100\t200\tbad1\n")?;

    let mut cmd = contiguous(&bin, &regions, &output)?;
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed projection"));

    Ok(())
}

#[test]
fn command_contiguous_malformed_region() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let regions = temp.path().join("broken.bed");
    let output = temp.path().join("out.bed");
    fs::write(
        &regions,
        "chr1\t100\t200\tok1\nchr1\t100\t400\ttx\t0\t+\t100\t400\t0\t3\t50,100,\t0,200,\n",
    )?;

    let mut cmd = contiguous(&bin, &regions, &output)?;
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed region record at line 2"));

    Ok(())
}

#[test]
fn command_contiguous_missing_liftover() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("out.bed");

    let mut cmd = contiguous(
        Path::new("/nonexistent/halLiftover"),
        Path::new("tests/bed/regions.bed"),
        &output,
    )?;
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Liftover invocation failed"));

    Ok(())
}

#[test]
fn command_contiguous_bad_fraction() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let bin = fake_liftover(temp.path())?;
    let output = temp.path().join("out.bed");

    let mut cmd = contiguous(&bin, Path::new("tests/bed/regions.bed"), &output)?;
    cmd.arg("--required-map-fraction").arg("1.5");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--required-map-fraction"));

    Ok(())
}
