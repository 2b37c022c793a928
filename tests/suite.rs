// Integration suite for the showcase filter tools; exercises the bundled sample
// collections, the engine's published properties, and both binaries so changes
// surface in one place.
mod support;

use anyhow::{Context, Result};
use serde_json::json;
use showcase_filter::catalog::{IMPLEMENTED_FLAG, PRO_FLAG};
use showcase_filter::{
    CatalogItem, CatalogView, Collection, DocumentKind, FacetCatalog, FacetCode, FacetDimension,
    FilterState, FlagId, RankTable, ShowcaseConfig, SortKey, SortOrder, build_label_coverage,
    derive_facet_options, filter_and_sort, filter_and_sort_by, load_items_from_path,
    matches_search,
};
use std::process::Command;
use support::{Fixture, ndjson, run_command, sample_config_path};

fn names(items: &[&CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.name.clone()).collect()
}

fn sample_config() -> Result<ShowcaseConfig> {
    ShowcaseConfig::load(&sample_config_path())
}

fn alpha_beta() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("Alpha").with_facet(FacetDimension::Services, ["s3"]),
        CatalogItem::new("Beta").with_facet(FacetDimension::Services, ["lambda"]),
    ]
}

// Every collection in the checked-in config loads through the same path the
// binaries use.
#[test]
fn sample_collections_load() -> Result<()> {
    let config = sample_config()?;
    let names: Vec<&str> = config.names().collect();
    assert_eq!(names, ["applications", "tutorials", "persistence", "replicator"]);
    for name in names {
        let collection = Collection::load_named(&config, name)?;
        assert!(!collection.items().is_empty(), "{name} has items");
        assert!(!collection.labels().is_empty(), "{name} has labels");
    }

    let tutorials = Collection::load_named(&config, "tutorials")?;
    assert_eq!(tutorials.kind(), DocumentKind::Tutorials);
    let platforms = derive_facet_options(
        tutorials.items(),
        tutorials.labels(),
        &FacetDimension::Platforms,
    );
    let codes: Vec<&str> = platforms.iter().map(FacetCode::as_str).collect();
    assert_eq!(codes, ["java", "javascript", "python"]);
    Ok(())
}

#[test]
fn empty_state_returns_every_item_sorted_by_name() -> Result<()> {
    let config = sample_config()?;
    let apps = Collection::load_named(&config, "applications")?;
    let result = filter_and_sort(
        apps.items(),
        apps.labels(),
        &FilterState::new(),
        &SortKey::Name,
    );
    assert_eq!(result.len(), apps.items().len());
    assert_eq!(
        names(&result),
        [
            "Authenticated Notes API",
            "Event-Driven Order Pipeline",
            "Serverless Image Resizer"
        ]
    );
    Ok(())
}

#[test]
fn facet_selection_example() {
    let items = alpha_beta();
    let state = FilterState::new().toggle_facet(&FacetDimension::Services, &FacetCode::new("s3"));
    let result = filter_and_sort(&items, &FacetCatalog::new(), &state, &SortKey::Name);
    assert_eq!(names(&result), ["Alpha"]);
}

#[test]
fn search_example_and_identity() {
    let items = alpha_beta();
    let state = FilterState::new().with_search("beta");
    let result = filter_and_sort(&items, &FacetCatalog::new(), &state, &SortKey::Name);
    assert_eq!(names(&result), ["Beta"]);

    for item in &items {
        assert!(matches_search(item, &FacetCatalog::new(), ""));
    }

    let none = FilterState::new().with_search("no such thing");
    assert!(filter_and_sort(&items, &FacetCatalog::new(), &none, &SortKey::Name).is_empty());
}

#[test]
fn toggle_is_its_own_inverse_and_clear_all_empties() {
    let dimension = FacetDimension::Integrations;
    let code = FacetCode::new("terraform");
    let start = FilterState::new()
        .with_search("queue")
        .set_flag(&FlagId::new(PRO_FLAG), true);
    assert_eq!(
        start.toggle_facet(&dimension, &code).toggle_facet(&dimension, &code),
        start
    );

    let cleared = start.toggle_facet(&dimension, &code).clear_all();
    assert_eq!(cleared.search(), "");
    assert_eq!(cleared.selections().count(), 0);
    assert!(!cleared.flag(&FlagId::new(PRO_FLAG)));
    assert!(!cleared.has_active_filters());
}

// Searching by a facet label reaches items that only carry the code.
#[test]
fn tutorials_search_labels_and_filter_flags() -> Result<()> {
    let config = sample_config()?;
    let tutorials = Collection::load_named(&config, "tutorials")?;
    let by_label = FilterState::new().with_search("notification service");
    let result = filter_and_sort(
        tutorials.items(),
        tutorials.labels(),
        &by_label,
        &SortKey::Name,
    );
    assert_eq!(names(&result), ["Messaging with SQS and SNS"]);

    let pro = FilterState::new().set_flag(&FlagId::new(PRO_FLAG), true);
    let result = filter_and_sort(tutorials.items(), tutorials.labels(), &pro, &SortKey::Name);
    assert_eq!(names(&result), ["Deploying a Java app on ECS"]);

    let by_services = FilterState::new().with_search("").toggle_facet(
        &FacetDimension::Services,
        &FacetCode::new("s3"),
    );
    let order = SortOrder::ascending(SortKey::FacetCount(FacetDimension::Services));
    let result = filter_and_sort_by(
        tutorials.items(),
        tutorials.labels(),
        &by_services,
        &order,
    );
    assert_eq!(
        names(&result),
        ["Deploying a Java app on ECS", "Static website hosting"]
    );
    Ok(())
}

#[test]
fn persistence_defaults_to_name_order() -> Result<()> {
    let config = sample_config()?;
    let persistence = Collection::load_named(&config, "persistence")?;
    assert_eq!(persistence.default_sort(), &SortOrder::default());
    let view = CatalogView::build(
        persistence.items(),
        persistence.labels(),
        &FilterState::new(),
        persistence.default_sort(),
    );
    assert_eq!(
        names(view.matches()),
        [
            "DynamoDB",
            "Kinesis Data Streams",
            "Simple Storage Service (S3)"
        ]
    );

    let by_support = SortOrder::parse("rank:support_level")?;
    assert_eq!(
        by_support,
        SortOrder::ascending(SortKey::Rank(RankTable::support_level()))
    );
    let view = CatalogView::build(
        persistence.items(),
        persistence.labels(),
        &FilterState::new(),
        &by_support,
    );
    assert_eq!(
        names(view.matches()),
        [
            "Simple Storage Service (S3)",
            "DynamoDB",
            "Kinesis Data Streams"
        ]
    );

    // Limitations are display-only.
    let state = FilterState::new().with_search("restored");
    assert!(
        CatalogView::build(
            persistence.items(),
            persistence.labels(),
            &state,
            persistence.default_sort()
        )
        .is_empty()
    );
    Ok(())
}

#[test]
fn replicator_rows_search_by_required_action() -> Result<()> {
    let config = sample_config()?;
    let replicator = Collection::load_named(&config, "replicator")?;
    assert_eq!(replicator.kind(), DocumentKind::ReplicatorCoverage);
    let all = filter_and_sort(
        replicator.items(),
        replicator.labels(),
        &FilterState::new(),
        &SortKey::Name,
    );
    assert_eq!(
        names(&all),
        ["AWS::Lambda::Function", "AWS::S3::Bucket", "AWS::SQS::Queue"]
    );

    let state = FilterState::new().with_search("GetQueueAttributes");
    let result = filter_and_sort(replicator.items(), replicator.labels(), &state, &SortKey::Name);
    assert_eq!(names(&result), ["AWS::SQS::Queue"]);
    assert_eq!(result[0].attribute("identifier"), Some("QueueUrl"));
    Ok(())
}

#[test]
fn stable_order_for_equal_keys() {
    let items: Vec<CatalogItem> = ["delta", "Delta", "DELTA", "alpha"]
        .into_iter()
        .map(CatalogItem::new)
        .collect();
    let result = filter_and_sort(&items, &FacetCatalog::new(), &FilterState::new(), &SortKey::Name);
    assert_eq!(names(&result), ["alpha", "delta", "Delta", "DELTA"]);
}

#[test]
fn label_coverage_flags_unlabelled_codes() -> Result<()> {
    let config = sample_config()?;
    let apps = Collection::load_named(&config, "applications")?;
    let report = build_label_coverage(apps.items(), apps.labels());
    let services = &report[&FacetDimension::Services];
    assert_eq!(services.unlabelled, vec![FacetCode::new("kinesis")]);
    assert!(report[&FacetDimension::Integrations].is_complete());
    Ok(())
}

#[test]
fn native_items_are_schema_checked() -> Result<()> {
    let fixture = Fixture::new()?;
    fixture.write_json(
        "items.json",
        &json!([{"name": "Alpha", "facets": {"services": "s3"}}]),
    )?;
    fixture.write_json(
        "showcase.json",
        &json!({"collections": [{"name": "custom", "kind": "items", "items": "items.json"}]}),
    )?;
    let config = ShowcaseConfig::load(&fixture.config_path())?;
    let err = Collection::load_named(&config, "custom").unwrap_err();
    assert!(
        format!("{err:#}").contains("schema validation"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn feature_coverage_documents_load() -> Result<()> {
    let fixture = Fixture::new()?;
    let path = fixture.write_json(
        "coverage/s3.json",
        &json!({"service": "s3", "operations": [
            {"PutObject": {"implemented": true, "availability": "community"}},
            {"SelectObjectContent": {"implemented": false, "availability": "pro"}}
        ]}),
    )?;
    let items = load_items_from_path(&path, DocumentKind::FeatureCoverage)?;
    let implemented = FilterState::new().set_flag(&FlagId::new(IMPLEMENTED_FLAG), true);
    let result = filter_and_sort(&items, &FacetCatalog::new(), &implemented, &SortKey::Name);
    assert_eq!(names(&result), ["PutObject"]);
    Ok(())
}

#[test]
fn missing_label_file_names_the_collection() -> Result<()> {
    let fixture = Fixture::new()?;
    fixture.write_json("apps.json", &json!([]))?;
    fixture.write_json(
        "showcase.json",
        &json!({"collections": [{
            "name": "apps",
            "kind": "applications",
            "items": "apps.json",
            "labels": {"services": "missing.json"}
        }]}),
    )?;
    let config = ShowcaseConfig::load(&fixture.config_path())?;
    let err = format!("{:#}", Collection::load_named(&config, "apps").unwrap_err());
    assert!(err.contains("collection 'apps'"), "{err}");
    assert!(err.contains("missing.json"), "{err}");
    Ok(())
}

#[test]
fn query_cli_emits_filtered_ndjson() -> Result<()> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_showcase-query"));
    cmd.arg("--config")
        .arg(sample_config_path())
        .args(["-c", "tutorials", "-f", "services=s3", "--json"])
        .env_remove("SHOWCASE_LOG");
    let output = run_command(cmd)?;
    let records = ndjson(&output)?;
    let titles: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(titles, ["Deploying a Java app on ECS", "Static website hosting"]);
    Ok(())
}

#[test]
fn query_cli_lists_facet_options() -> Result<()> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_showcase-query"));
    cmd.arg("--config")
        .arg(sample_config_path())
        .args(["-c", "applications", "--options", "integrations", "--json"]);
    let output = run_command(cmd)?;
    let records = ndjson(&output)?;
    let labels: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("label").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(labels, ["AWS CDK", "AWS SAM", "CloudFormation", "Terraform"]);
    Ok(())
}

#[test]
fn query_cli_rejects_unknown_collection() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_showcase-query"))
        .arg("--config")
        .arg(sample_config_path())
        .args(["-c", "videos"])
        .output()
        .context("failed to run showcase-query")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown collection 'videos'"), "{stderr}");
    Ok(())
}

#[test]
fn lint_cli_strict_mode() -> Result<()> {
    let mut clean = Command::new(env!("CARGO_BIN_EXE_showcase-lint"));
    clean
        .arg("--config")
        .arg(sample_config_path())
        .args(["-c", "tutorials", "--strict"]);
    run_command(clean)?;

    let strict = Command::new(env!("CARGO_BIN_EXE_showcase-lint"))
        .arg("--config")
        .arg(sample_config_path())
        .arg("--strict")
        .output()
        .context("failed to run showcase-lint")?;
    assert!(!strict.status.success());
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("kinesis"), "{stderr}");
    Ok(())
}
