//! Integration tests for the `sourdough` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sourdough"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Baker's percentage, levain, fermentation and starter calculators.",
        ));
}

#[test]
fn test_percent_scenario() {
    cli()
        .args(["percent", "--flour", "500", "--water", "70", "--salt", "2", "--starter", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("350 g"))
        .stdout(predicate::str::contains("10 g"))
        .stdout(predicate::str::contains("100 g"))
        .stdout(predicate::str::contains("960 g"))
        .stdout(predicate::str::contains("Overall hydration (incl. starter): 72.7%"))
        .stdout(predicate::str::contains("Fermentation speed: Fast"));
}

#[test]
fn test_percent_from_dough_weight() {
    cli()
        .args(["percent", "--dough-weight", "960"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500 g"));
}

#[test]
fn test_percent_rejects_zero_flour() {
    cli()
        .args(["percent", "--flour", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_hydration_needs_two_values() {
    cli()
        .args(["hydration", "--flour", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly two"));

    cli()
        .args(["hydration", "--flour", "500", "--water", "375"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hydration: 75%"));
}

#[test]
fn test_levain_split() {
    cli()
        .args(["levain", "--mass", "150", "--hydration", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 g"))
        .stdout(predicate::str::contains("50 g"));
}

#[test]
fn test_feed_build() {
    cli()
        .args(["feed", "--need", "100", "--current", "50", "--ratio", "1:2:2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feeding 1:2:2"))
        .stdout(predicate::str::contains("30 g"))
        .stdout(predicate::str::contains("40 g"));
}

#[test]
fn test_feed_rejects_bad_ratio() {
    cli()
        .args(["feed", "--need", "100", "--ratio", "1:0:2"])
        .assert()
        .failure();
}

#[test]
fn test_preferment_poolish() {
    cli()
        .args(["preferment", "--flour", "500", "--percent", "20", "--kind", "poolish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1 g"))
        .stdout(predicate::str::contains("Flour left for the final dough: 400 g"));
}

#[test]
fn test_blend_unachievable_shows_range() {
    cli()
        .args(["blend", "--target", "20", "--flour-a", "12.5", "--flour-b", "10.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unachievable"))
        .stderr(predicate::str::contains("Achievable protein range: 10.5% – 12.5%"));
}

#[test]
fn test_blend_components_by_name() {
    cli()
        .args(["blend", "--component", "50:bread", "--component", "40:rye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: shares add up to 90%"));
}

#[test]
fn test_bulk_baseline() {
    cli()
        .args(["bulk", "--temp", "24", "--starter", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.0 h"))
        .stdout(predicate::str::contains("3.0 h"))
        .stdout(predicate::str::contains("5.0 h"));
}

#[test]
fn test_bulk_cold_note() {
    cli()
        .args(["bulk", "--temp", "16", "--starter", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cold fermentation"));
}

#[test]
fn test_ddt_scenario() {
    cli()
        .args([
            "ddt",
            "--target",
            "78",
            "--room",
            "72",
            "--flour-temp",
            "70",
            "--starter-temp",
            "75",
            "--friction",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Water temperature: 70 °F"))
        .stdout(predicate::str::contains("Room temperature or cold water"));
}

#[test]
fn test_scale_doubles() {
    cli()
        .args(["scale", "--from", "1", "--to", "2", "--ingredient", "flour=500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000 g"));
}

#[test]
fn test_bake_loss() {
    cli()
        .args(["bake-loss", "--post", "900", "--loss", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000 g"));

    cli()
        .args(["bake-loss", "--post", "900", "--loss", "100"])
        .assert()
        .failure();
}

#[test]
fn test_starter_overdue() {
    cli()
        .args([
            "starter",
            "--last-fed",
            "2024-03-01T08:00:00Z",
            "--frequency",
            "12",
            "--now",
            "2024-03-01T21:30:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overdue by 2 hours"))
        .stdout(predicate::str::contains("Health: Fair"));
}

#[test]
fn test_starter_frequency_out_of_range() {
    cli()
        .args([
            "starter",
            "--last-fed",
            "2024-03-01T08:00:00Z",
            "--frequency",
            "4294967295",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_feed_wide_ratio() {
    cli()
        .args(["feed", "--need", "100", "--ratio", "4294967295:1:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feeding 4294967295:1:1"));
}

#[test]
fn test_starter_activity_and_inactive() {
    cli()
        .args([
            "starter",
            "--last-fed",
            "2024-03-01T08:00:00Z",
            "--frequency",
            "24",
            "--now",
            "2024-03-01T10:00:00Z",
            "--activity",
            "5",
            "--activity",
            "4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due in 22 hours"))
        .stdout(predicate::str::contains("Health: Excellent"));

    cli()
        .args(["starter", "--inactive", "--now", "2024-03-01T10:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Health: Inactive"));
}

#[test]
fn test_profile_save_then_load() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kitchen.json");

    cli()
        .args(["ddt", "--room", "68", "--save-profile"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved to"));

    let saved = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["room_temp_f"], 68.0);

    // 78*4 - 68 - 72 - 72 - 24
    cli()
        .args(["ddt", "--profile"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Water temperature: 76 °F"));

    // explicit flag beats the profile
    cli()
        .args(["ddt", "--room", "72", "--profile"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Water temperature: 72 °F"));
}

#[test]
fn test_missing_profile_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    cli()
        .args(["bulk", "--starter", "20", "--profile"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read profile"));
}
