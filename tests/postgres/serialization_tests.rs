//! Metadata and status column handling in the `PostgreSQL` repository.

use super::helpers::{execute_sql, prepared_repo};
use eyre::{Report, eyre};
use node_registry::node::ports::{NodeRegistryError, NodeRegistryRepository};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

fn insert_raw_row(metadata_sql: &str, status: &str) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let sql = format!(
        "INSERT INTO nodes (id, name, fingerprint, status, registered_at, last_seen, node_metadata) \
         VALUES ('{id}', 'raw', 'fp-{id}', '{status}', NOW(), NOW(), {metadata_sql})"
    );
    (id, sql)
}

#[rstest]
#[case("NULL")]
#[case("'null'::jsonb")]
#[case("'{}'::jsonb")]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn missing_metadata_reads_as_empty_mapping(#[case] metadata_sql: &str) -> Result<(), Report> {
    let ctx = prepared_repo(1).await?;
    let (_, sql) = insert_raw_row(metadata_sql, "active");
    execute_sql(&ctx.temp_db, &sql)?;

    let listed = ctx.repo.list_all().await?;

    let node = listed.first().ok_or_else(|| eyre!("expected one node"))?;
    assert!(node.metadata().is_empty());
    assert_eq!(node.metadata().to_value(), json!({}));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn nested_metadata_round_trips() -> Result<(), Report> {
    let ctx = prepared_repo(1).await?;
    let (id, sql) = insert_raw_row(
        r#"'{"labels": {"env": "prod"}, "cores": 8, "tags": ["a", "b"]}'::jsonb"#,
        "active",
    );
    execute_sql(&ctx.temp_db, &sql)?;

    let node = ctx
        .repo
        .find_by_id(node_registry::node::domain::NodeId::from_uuid(id))
        .await?
        .ok_or_else(|| eyre!("expected node"))?;

    assert_eq!(
        node.metadata().to_value(),
        json!({"labels": {"env": "prod"}, "cores": 8, "tags": ["a", "b"]})
    );
    Ok(())
}

#[rstest]
#[case("'[1, 2]'::jsonb", "active")]
#[case("'{}'::jsonb", "retired")]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn malformed_rows_are_reported_as_invalid_data(
    #[case] metadata_sql: &str,
    #[case] status: &str,
) -> Result<(), Report> {
    let ctx = prepared_repo(1).await?;
    let (_, sql) = insert_raw_row(metadata_sql, status);
    execute_sql(&ctx.temp_db, &sql)?;

    let result = ctx.repo.list_all().await;

    assert!(matches!(
        result,
        Err(NodeRegistryError::InvalidPersistedData(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn rows_with_empty_names_are_still_listed() -> Result<(), Report> {
    let ctx = prepared_repo(1).await?;
    let id = Uuid::new_v4();
    execute_sql(
        &ctx.temp_db,
        &format!(
            "INSERT INTO nodes (id, name, fingerprint, status, registered_at, last_seen, node_metadata) \
             VALUES ('{id}', '', 'fp-empty-name', 'active', NOW(), NOW(), NULL)"
        ),
    )?;

    let listed = ctx.repo.list_all().await?;

    let node = listed.first().ok_or_else(|| eyre!("expected one node"))?;
    assert_eq!(node.id().into_inner(), id);
    assert_eq!(node.name().as_str(), "");
    Ok(())
}
