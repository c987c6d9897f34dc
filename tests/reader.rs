//! End-to-end: posts on disk → collection → search → rendered views

use std::fs;

use blog_reader::content::{ContentError, ContentLoader, Manifest};
use blog_reader::views::Views;
use blog_reader::Reader;
use tempfile::tempdir;

fn write_post(dir: &std::path::Path, name: &str, title: &str, date: &str, tags: &str) {
    let raw = format!(
        "---\ntitle: {title}\ndate: {date}\nauthor: Riley\ntags: {tags}\ndescription: Notes on {title}\n---\n\nIntro.\n\n```rust\nlet x = 1;\n```\n"
    );
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, raw).unwrap();
}

#[tokio::test]
async fn test_load_search_and_render() {
    let site = tempdir().unwrap();
    let posts = site.path().join("posts");
    write_post(&posts, "january.md", "January", "2024-01-01", "[rust]");
    write_post(&posts, "june.md", "June", "2024-06-01", "[ai, ml]");
    write_post(&posts, "2023/archive.md", "Archive", "2023-03-03", "[old]");
    fs::write(posts.join("draft.md"), "no metadata at all").unwrap();

    let reader = Reader::new(site.path()).unwrap();
    let collection = reader.load_collection().await.unwrap();

    let order: Vec<&str> = collection.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(order, vec!["june", "january", "2023/archive"]);
    assert_eq!(collection.skipped().len(), 1);
    assert_eq!(collection.skipped()[0].path, "draft");

    let found: Vec<&str> = collection
        .filter("ai")
        .iter()
        .map(|p| p.path.as_str())
        .collect();
    assert_eq!(found, vec!["june"]);
    assert_eq!(collection.filter("").len(), collection.len());

    let views = Views::new(reader.config.clone());
    let listing = views.listing(&collection.filter("riley"), "riley");
    assert!(listing.contains(r#"href="/blog/2023/archive""#));

    let post = collection.get("june").unwrap();
    let detail = views.detail(post);
    assert!(detail.contains("<h1>June</h1>"));
    assert!(detail.contains("highlight rust"));
}

#[tokio::test]
async fn test_missing_posts_dir_is_empty() {
    let site = tempdir().unwrap();
    let reader = Reader::new(site.path()).unwrap();
    let collection = reader.load_collection().await.unwrap();
    assert!(collection.is_empty());
}

#[tokio::test]
async fn test_unreadable_post_does_not_hide_the_rest() {
    let site = tempdir().unwrap();
    let posts = site.path().join("posts");
    write_post(&posts, "good.md", "Good", "2024-01-01", "[rust]");
    fs::write(posts.join("bad.md"), [0xff, 0xfe]).unwrap();

    let reader = Reader::new(site.path()).unwrap();
    let collection = reader.load_collection().await.unwrap();
    let order: Vec<&str> = collection.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(order, vec!["good"]);
}

#[tokio::test]
async fn test_missing_manifest_file_is_an_error() {
    let site = tempdir().unwrap();
    let reader = Reader::new(site.path())
        .unwrap()
        .with_manifest_file("missing.json");
    let err = reader.load_collection().await.unwrap_err();
    assert!(matches!(err, ContentError::Io { .. }));
}

#[test]
fn test_lookup_by_identifier() {
    let manifest = Manifest::from_entries([(
        "known",
        "---\ntitle: Known\ndate: 2024-01-01\nauthor: a\ntags: []\ndescription: d\n---\nbody",
    )]);
    let loader = ContentLoader::new(&manifest);

    assert_eq!(loader.load_post("known").unwrap().path, "known");
    assert!(matches!(
        loader.load_post("unknown"),
        Err(ContentError::NotFound(ref id)) if id == "unknown"
    ));
}
