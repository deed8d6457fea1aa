use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn generate_prints_a_text_report_by_default() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("music-cli"));
    cmd.arg("generate").arg("--tonic").arg("C5").arg("--mode").arg("major").arg("--pattern").arg("AA").arg("--seed").arg("1");

    cmd.assert().success().stdout(contains("Key: C5 Major").and(contains("Pattern: AA")).and(contains("MIDI events:")));
}

#[test]
fn generate_json_flag_emits_parseable_json() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("music-cli"));
    cmd.arg("generate").arg("--json").arg("--seed").arg("2");

    cmd.assert().success().stdout(contains("\"melody_note_count\""));
}

#[test]
fn generate_score_flag_prints_a_grand_staff() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("music-cli"));
    cmd.arg("generate").arg("--score").arg("--seed").arg("3");

    cmd.assert().success().stdout(contains("GrandStaff"));
}

#[test]
fn generate_rejects_an_unparseable_tonic() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("music-cli"));
    cmd.arg("generate").arg("--tonic").arg("H9");

    cmd.assert().failure().stderr(contains("not a valid tonic note"));
}
