//! Registration behaviour of the service over `PostgreSQL`.

use std::sync::Arc;

use super::helpers::prepared_repo;
use eyre::{Report, eyre};
use crate::test_helpers::{SteppingClock, metadata};
use chrono::{Duration, TimeZone, Utc};
use mockable::DefaultClock;
use node_registry::node::{
    adapters::postgres::PostgresNodeRegistry,
    domain::NodeStatus,
    services::{NodeRegistryService, RegisterNodeRequest},
};
use rstest::rstest;
use serde_json::json;

fn service(repo: PostgresNodeRegistry) -> NodeRegistryService<PostgresNodeRegistry, SteppingClock> {
    NodeRegistryService::new(Arc::new(repo), Arc::new(SteppingClock::default()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn reregistration_merges_into_the_stored_row() -> Result<(), Report> {
    let ctx = prepared_repo(2).await?;
    let service = service(ctx.repo.clone());

    let first = service
        .register(RegisterNodeRequest::new("n1", "fp1").with_metadata(metadata(json!({"zone": "a"}))))
        .await?;
    let second = service
        .register(
            RegisterNodeRequest::new("n1-renamed", "fp1")
                .with_metadata(metadata(json!({"rack": "5"}))),
        )
        .await?;

    assert_eq!(second.id(), first.id());
    assert_eq!(second.name().as_str(), "n1");
    assert_eq!(second.status(), NodeStatus::Active);
    assert_eq!(second.registered_at(), first.registered_at());
    assert!(second.last_seen() > first.last_seen());
    assert_eq!(
        second.metadata().to_value(),
        json!({"zone": "a", "rack": "5"})
    );

    let stored = service.get(first.id()).await?;
    assert_eq!(stored, second);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn reregistration_reactivates_inactive_rows() -> Result<(), Report> {
    let ctx = prepared_repo(2).await?;
    let service = service(ctx.repo.clone());
    let created = service.register(RegisterNodeRequest::new("n1", "fp1")).await?;
    super::helpers::execute_sql(
        &ctx.temp_db,
        &format!("UPDATE nodes SET status = 'inactive' WHERE id = '{}'", created.id()),
    )?;

    let refreshed = service.register(RegisterNodeRequest::new("n1", "fp1")).await?;

    assert_eq!(refreshed.status(), NodeStatus::Active);
    assert_eq!(service.get(created.id()).await?.status(), NodeStatus::Active);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn concurrent_first_registrations_produce_one_row() -> Result<(), Report> {
    let ctx = prepared_repo(4).await?;
    let service = service(ctx.repo.clone());

    let mut handles = Vec::new();
    for index in 0..8 {
        let task_service = service.clone();
        handles.push(tokio::spawn(async move {
            task_service
                .register(
                    RegisterNodeRequest::new(format!("racer-{index}"), "shared-fp")
                        .with_metadata(metadata(json!({ format!("k{index}"): index }))),
                )
                .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??.id());
    }

    let listed = service.list().await?;
    assert_eq!(listed.len(), 1);
    let only = listed.first().ok_or_else(|| eyre!("expected one node"))?;
    assert!(ids.iter().all(|id| *id == only.id()));
    assert_eq!(only.metadata().len(), 8);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn registration_returns_the_stored_timestamps() -> Result<(), Report> {
    let ctx = prepared_repo(2).await?;
    let start = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre!("valid timestamp"))?
        + Duration::nanoseconds(123_456_789);
    let service = NodeRegistryService::new(
        Arc::new(ctx.repo.clone()),
        Arc::new(SteppingClock::starting_at(start)),
    );

    let created = service.register(RegisterNodeRequest::new("n1", "fp1")).await?;
    assert_eq!(created.registered_at().timestamp_subsec_nanos(), 123_456_000);
    assert_eq!(service.get(created.id()).await?, created);
    assert_eq!(service.list().await?, vec![created.clone()]);

    let refreshed = service.register(RegisterNodeRequest::new("n1", "fp1")).await?;
    assert_eq!(refreshed.last_seen().timestamp_subsec_nanos(), 123_456_000);
    assert_eq!(service.get(created.id()).await?, refreshed);
    assert_eq!(service.list().await?, vec![refreshed]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn wall_clock_registrations_match_later_reads() -> Result<(), Report> {
    let ctx = prepared_repo(2).await?;
    let service = NodeRegistryService::new(Arc::new(ctx.repo.clone()), Arc::new(DefaultClock));

    let created = service.register(RegisterNodeRequest::new("n1", "fp1")).await?;
    assert_eq!(service.list().await?, vec![created.clone()]);

    let refreshed = service
        .register(RegisterNodeRequest::new("n1", "fp1").with_metadata(metadata(json!({"zone": "a"}))))
        .await?;
    assert_eq!(service.get(created.id()).await?, refreshed);
    assert_eq!(service.list().await?, vec![refreshed]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a PostgreSQL server named by DATABASE_URL"]
async fn names_are_stored_exactly_as_submitted() -> Result<(), Report> {
    let ctx = prepared_repo(2).await?;
    let service = service(ctx.repo.clone());

    let created = service.register(RegisterNodeRequest::new(" n1 ", "fp1")).await?;

    assert_eq!(created.name().as_str(), " n1 ");
    assert_eq!(service.get(created.id()).await?.name().as_str(), " n1 ");
    Ok(())
}
