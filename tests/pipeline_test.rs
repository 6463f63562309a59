use std::fs;

use menu_labeler::acquire::{DEFAULT_TIMEOUT, PageFetcher};
use menu_labeler::export::{export, export_csv, export_json};
use menu_labeler::labels::{Label, MenuLabelRecord};
use menu_labeler::pipeline::MenuPipeline;
use tempfile::tempdir;

fn pipeline() -> MenuPipeline {
    MenuPipeline::new(PageFetcher::new(DEFAULT_TIMEOUT).unwrap())
}

fn sample_records() -> Vec<MenuLabelRecord> {
    let mut p = pipeline();
    p.process_text(
        "Restaurant Rössli\nVorspeise\nNüsslisalat 14.50\nHauptgang\nRösti vegetarisch 26.00",
        "",
        "roessli.pdf",
    );
    p.process_text("Grilled Salmon 22.00", "Fischerstube", "https://example.com/menu");
    p.into_results()
}

#[tokio::test]
async fn broken_pdfs_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_broken.pdf"), b"not a pdf at all").unwrap();
    fs::write(dir.path().join("notes.txt"), b"Risotto 24.00").unwrap();

    let mut p = pipeline();
    let ok = p.process_pdfs_directory(dir.path()).await.unwrap();
    assert_eq!(ok, 0);
    assert!(p.results().is_empty());
}

#[tokio::test]
async fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let mut p = pipeline();
    assert!(p.process_pdfs_directory(&dir.path().join("nope")).await.is_err());
}

#[tokio::test]
async fn failing_restaurant_urls_do_not_abort_the_batch() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("restaurants.json");
    fs::write(
        &list,
        r#"{"Restaurants": {"Zum_Loewen": "not a url", "Bad_Entry": 42}}"#,
    )
    .unwrap();

    let mut p = pipeline();
    let ok = p.process_restaurants_json(&list).await.unwrap();
    assert_eq!(ok, 0);
    assert!(p.results().is_empty());
}

#[tokio::test]
async fn unreadable_restaurant_list_is_an_error() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("restaurants.json");
    fs::write(&list, "{ not json").unwrap();

    let mut p = pipeline();
    assert!(p.process_restaurants_json(&list).await.is_err());
}

#[test]
fn csv_export_has_fixed_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.csv");
    export_csv(&path, &sample_records()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "restaurant_name,source,regional_seasonal,multi_course_menu,small_menu,large_menu,\
         vegan_options,vegetarian_options,gluten_free_options,average_price,main_dish_count,\
         vegan_percentage,vegetarian_percentage,gluten_free_count"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("Restaurant Rössli,roessli.pdf,No,No,Yes,No,No,Yes,No,40.5,1,"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn csv_export_skips_empty_batch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.csv");
    export_csv(&path, &[]).unwrap();
    assert!(!path.exists());
}

#[test]
fn json_export_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.json");
    let records = sample_records();
    export_json(&path, &records).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Restaurant Rössli"), "non-ASCII must not be escaped");
    let back: Vec<MenuLabelRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(back, records);
    assert_eq!(back[1].gluten_free_options, Label::No);
}

#[test]
fn export_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    assert!(export(&dir.path().join("labels.xlsx"), &sample_records()).is_err());
}
