use codexc::core::collect::Collector;
use codexc::core::config::CodexConfig;
use codexc::core::schema::NodeValidator;
use codexc::core::time::BuildStamp;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn fixed_stamp() -> BuildStamp {
    BuildStamp {
        built_utc: "2026-08-24T12:00:00.000000Z".to_string(),
        commit: "".to_string(),
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
    fs::write(path, content).expect("write fixture");
}

fn collect_tree(root: &Path) -> codexc::core::collect::Collection {
    let config = CodexConfig::resolve(root).expect("resolve config");
    let validator = NodeValidator::from_embedded();
    let stamp = fixed_stamp();
    Collector::new(&config, &validator, &stamp)
        .collect()
        .expect("collect succeeds")
}

#[test]
fn reingesting_from_the_same_origin_appends_duplicate_sources() {
    // The same block appearing twice in one ledger merges twice: sources
    // grow per merge invocation, versions stay empty.
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    let block = "```json\n{\"id\": \"C144N-001\", \"title\": \"Alpha\"}\n```\n";
    write(
        &root.join("shared/codex/Codex14499_archive.md"),
        &format!("{}\nmirror of the same definition:\n\n{}", block, block),
    );

    let collection = collect_tree(root);
    let node = collection.nodes.get("C144N-001").expect("node compiled");
    let sources = node["provenance"]["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["path"], sources[1]["path"]);
    assert!(node.get("versions").is_none());
}

#[test]
fn content_x_then_y_then_x_archives_only_y() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    write(
        &root.join("shared/nodes/a.json"),
        r#"{"id": "C144N-002", "title": "X"}"#,
    );
    // Both ledgers exist in the fixed list; first carries Y, second X again.
    write(
        &root.join("shared/codex/Codex14499_archive.md"),
        "```json\n{\"id\": \"C144N-002\", \"title\": \"Y\"}\n```\n",
    );
    write(
        &root.join("shared/codex/codex_temple_of_the_unbuilt.md"),
        "```json\n{\"id\": \"C144N-002\", \"title\": \"X\"}\n```\n",
    );

    let collection = collect_tree(root);
    let node = collection.nodes.get("C144N-002").expect("node compiled");

    let versions = node["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 1, "only the divergent Y variant is archived");
    assert_eq!(versions[0]["title"], "Y");

    // The third ingestion equals the live record, so it folds provenance
    // instead of re-archiving: two sources on the live record, one on Y.
    let live_sources = node["provenance"]["sources"].as_array().unwrap();
    assert_eq!(live_sources.len(), 2);
    let variant_sources = versions[0]["provenance"]["sources"].as_array().unwrap();
    assert_eq!(live_sources.len() + variant_sources.len(), 3);

    assert_eq!(node["title"], "X");
    assert_eq!(collection.nodes.versions_total(), 1);
}

#[test]
fn arcana_ids_merge_across_node_files_and_ledgers() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    write(
        &root.join("shared/nodes/moon.json"),
        r#"{"id": "C144N-ARCANA-MOON", "title": "Moon"}"#,
    );
    write(
        &root.join("shared/codex/Codex14499_archive.md"),
        "```json\n{\"id\": \"C144N-ARCANA-MOON\", \"title\": \"Moon\"}\n```\n",
    );

    let collection = collect_tree(root);
    assert_eq!(collection.nodes.len(), 1);
    let node = collection.nodes.get("C144N-ARCANA-MOON").unwrap();
    assert_eq!(node["provenance"]["sources"].as_array().unwrap().len(), 2);
}

#[test]
fn fragments_without_usable_ids_never_reach_the_node_set() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    write(&root.join("shared/nodes/empty-id.json"), r#"{"id": ""}"#);
    write(&root.join("shared/nodes/no-id.json"), r#"{"title": "stray"}"#);
    write(
        &root.join("shared/codex/Codex14499_archive.md"),
        "```json\n{\"note\": \"ledger block without id\"}\n```\n",
    );

    let collection = collect_tree(root);
    assert!(collection.nodes.is_empty());
}

#[test]
fn cards_aggregate_without_identity_or_validation() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    // Duplicate content and a non-node shape are both fine for cards.
    write(&root.join("shared/liber/one.json"), r#"{"name": "The Tower"}"#);
    write(&root.join("shared/liber/two.json"), r#"{"name": "The Tower"}"#);
    write(&root.join("shared/liber/three.json"), r#"{"id": "not-a-node-id"}"#);

    let collection = collect_tree(root);
    assert_eq!(collection.cards.len(), 3);
    let names: Vec<Option<&str>> = collection
        .cards
        .iter()
        .map(|card: &Value| card["name"].as_str())
        .collect();
    assert_eq!(names[0], Some("The Tower"));
    assert_eq!(names[1], Some("The Tower"));
}
