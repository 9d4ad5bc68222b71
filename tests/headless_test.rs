//! Integration tests for the headless runner
//!
//! Run with: cargo test --test headless_test

use std::path::{Path, PathBuf};
use std::time::Duration;

use revfeed::{run_headless_to, HeadlessOptions};
use serde_json::Value;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reviews.json")
}

fn options(fixture: PathBuf, config_dir: &Path) -> HeadlessOptions {
    HeadlessOptions {
        config_dir: config_dir.to_path_buf(),
        settle_timeout: Duration::from_secs(10),
        ..HeadlessOptions::new(fixture)
    }
}

async fn run(options: &HeadlessOptions) -> Vec<Value> {
    let mut out = Vec::new();
    run_headless_to(options, &mut out)
        .await
        .expect("headless run should succeed");

    String::from_utf8(out)
        .expect("output is UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("every line is JSON"))
        .collect()
}

fn events<'a>(all: &'a [Value], name: &str) -> Vec<&'a Value> {
    all.iter().filter(|event| event["event"] == name).collect()
}

#[test]
fn test_fixture_is_a_valid_page_envelope() {
    let json = std::fs::read_to_string(fixture_path()).unwrap();
    let page: revfeed_core::ReviewsPage = serde_json::from_str(&json).unwrap();

    assert_eq!(page.count, 45);
    assert_eq!(page.items.len(), 45);
    assert!(page.items.iter().all(|review| (1..=5).contains(&review.rating)));
}

#[tokio::test]
async fn test_headless_loads_every_page() {
    let config = TempDir::new().unwrap();
    let all = run(&options(fixture_path(), config.path())).await;

    assert_eq!(all.first().unwrap()["event"], "started");
    assert_eq!(all.first().unwrap()["page_size"], 20);

    let rows = events(&all, "row");
    assert_eq!(rows.len(), 46);
    assert!(rows[..45].iter().all(|row| row["kind"] == "review"));
    assert_eq!(rows[45]["kind"], "summary");
    assert_eq!(rows[45]["text"], "45 reviews");
    assert!(rows.iter().all(|row| row["height"].as_f64().unwrap() > 0.0));

    let states = events(&all, "state_changed");
    assert_eq!(states[0]["is_loading"], true);
    assert_eq!(states[0]["row_count"], 0);
    let last_state = states.last().unwrap();
    assert_eq!(last_state["phase"], "idle");
    assert_eq!(last_state["offset"], 45);

    let finished = all.last().unwrap();
    assert_eq!(finished["event"], "finished");
    assert_eq!(finished["row_count"], 46);
    assert_eq!(finished["total_count"], 45);

    assert!(events(&all, "error").is_empty());
}

#[tokio::test]
async fn test_headless_reads_page_size_from_config() {
    let config = TempDir::new().unwrap();
    let revfeed_dir = config.path().join(".revfeed");
    std::fs::create_dir_all(&revfeed_dir).unwrap();
    std::fs::write(
        revfeed_dir.join("config.toml"),
        "[feed]\npage_size = 10\ndefault_line_limit = 1\n",
    )
    .unwrap();

    let all = run(&options(fixture_path(), config.path())).await;

    assert_eq!(all.first().unwrap()["page_size"], 10);
    let offsets: Vec<u64> = events(&all, "state_changed")
        .iter()
        .filter(|state| state["is_loading"] == false)
        .filter_map(|state| state["offset"].as_u64())
        .collect();
    assert!(offsets.contains(&10));
    assert!(offsets.contains(&40));
    assert_eq!(events(&all, "row").len(), 46);
    assert_eq!(events(&all, "row")[0]["line_limit"], 1);
}

#[tokio::test]
async fn test_headless_expand_all_lifts_line_limits() {
    let config = TempDir::new().unwrap();
    let opts = HeadlessOptions {
        expand_all: true,
        ..options(fixture_path(), config.path())
    };

    let all = run(&opts).await;

    let rows = events(&all, "row");
    assert!(rows
        .iter()
        .filter(|row| row["kind"] == "review")
        .all(|row| row["line_limit"] == 0 && row["frames"]["show_more"].is_null()));
}

#[tokio::test]
async fn test_headless_missing_fixture_reports_errors() {
    let config = TempDir::new().unwrap();
    let opts = HeadlessOptions {
        max_retries: 2,
        ..options(config.path().join("missing.json"), config.path())
    };

    let all = run(&opts).await;

    let errors = events(&all, "error");
    assert_eq!(errors.len(), 3);
    assert!(errors[..2].iter().all(|e| e["fatal"] == false));
    assert_eq!(errors[2]["fatal"], true);
    assert_eq!(all.last().unwrap()["row_count"], 0);
}

#[tokio::test]
async fn test_headless_loads_file_photos() {
    let dir = TempDir::new().unwrap();
    let photo = dir.path().join("photo.png");
    image::RgbaImage::new(3, 2).save(&photo).unwrap();

    let fixture = dir.path().join("reviews.json");
    let body = serde_json::json!([
        {
            "first_name": "Ada",
            "last_name": "Lovelace",
            "rating": 5,
            "text": "Lovely",
            "created": "10 December",
            "photo_urls": [
                format!("file://{}", photo.display()),
                format!("file://{}", dir.path().join("missing.png").display()),
                "https://cdn.example.com/remote.jpg",
            ]
        }
    ]);
    std::fs::write(&fixture, body.to_string()).unwrap();

    let all = run(&options(fixture, dir.path())).await;

    let rows = events(&all, "row");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["photos"], 1);
    assert_eq!(rows[0]["frames"]["photos"]["width"], 55.0);
    assert_eq!(rows[1]["text"], "1 review");
}
