mod common;

use std::collections::HashSet;

use common::{settings, FakeStorage};
use grantline_mysql::{
    AccountIdentity, Catalog, Error, GrantReconciler, MySqlSettings, ResourceIdentity,
    ServerCapability,
};

const MODERN: &str = "8.0.36";
const LEGACY: &str = "5.7.44-log";

async fn grant_ids(
    storage: &FakeStorage,
    settings: &MySqlSettings,
    principal: &ResourceIdentity,
) -> Vec<String> {
    let catalog = Catalog::build();
    let capability = ServerCapability::from_version(&storage.server.version).unwrap();
    let server = storage.server.identity();
    let reconciler = GrantReconciler::new(storage, &catalog, settings, capability, &server);
    reconciler
        .grants_for(principal)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect()
}

fn user(name: &str, host: &str) -> ResourceIdentity {
    ResourceIdentity::User(AccountIdentity::new(name, host))
}

fn set(ids: &[String]) -> HashSet<&str> {
    ids.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn overlapping_rows_produce_one_grant_each() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_database_grant("alice", "%", "sales", "Select,Insert")
        .with_database_grant("alice", "%", "sales", "select")
        .with_table_grant("alice", "%", "sales", "orders", "Select");
    let alice = user("alice", "%");

    let ids = grant_ids(&storage, &settings(), &alice).await;
    assert_eq!(
        ids,
        vec![
            "grant:entitlement:insert:database:sales:user:alice@%",
            "grant:entitlement:select:database:sales:user:alice@%",
            "grant:entitlement:select:table:sales.orders:user:alice@%",
        ]
    );

    let again = grant_ids(&storage, &settings(), &alice).await;
    assert_eq!(ids, again);
}

#[tokio::test]
async fn skipped_databases_are_ignored() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_database_grant("alice", "%", "sys", "Select")
        .with_table_grant("alice", "%", "sys", "metrics", "Select")
        .with_column_grant("alice", "%", ("sys", "metrics", "value"), "Select")
        .with_database_grant("alice", "%", "sales", "Select");
    let mut settings = settings();
    settings.skip_databases.insert("sys".to_owned());

    let ids = grant_ids(&storage, &settings, &user("alice", "%")).await;
    assert_eq!(
        ids,
        vec!["grant:entitlement:select:database:sales:user:alice@%"]
    );
}

#[tokio::test]
async fn column_grants_roll_up_unless_expanded() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_column_grant("alice", "%", ("db", "t", "c1"), "Select")
        .with_column_grant("alice", "%", ("db", "t", "c2"), "Select")
        .with_column_grant("alice", "%", ("db", "other", "c1"), "Update");

    let rolled_up = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        rolled_up,
        vec![
            "grant:entitlement:select:table:db.t:user:alice@%",
            "grant:entitlement:update:table:db.other:user:alice@%",
        ]
    );

    let mut expanded = settings();
    expanded.expand_columns.insert("db.t".to_owned());
    let ids = grant_ids(&storage, &expanded, &user("alice", "%")).await;
    assert_eq!(
        set(&ids),
        HashSet::from([
            "grant:entitlement:select:column:db.t.c1:user:alice@%",
            "grant:entitlement:select:column:db.t.c2:user:alice@%",
            "grant:entitlement:update:table:db.other:user:alice@%",
        ])
    );
}

#[tokio::test]
async fn dynamic_privileges_with_grant_option_emit_both_variants() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "select,super")
        .with_global_grant("alice", "%", "BACKUP_ADMIN", true)
        .with_global_grant("alice", "%", "SYSTEM_USER", false);

    let ids = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        set(&ids),
        HashSet::from([
            "grant:entitlement:backup_admin:server:db-01:user:alice@%",
            "grant:entitlement:backup_admin_with_grant:server:db-01:user:alice@%",
            "grant:entitlement:system_user:server:db-01:user:alice@%",
            "grant:entitlement:select:server:db-01:user:alice@%",
            "grant:entitlement:super:server:db-01:user:alice@%",
        ])
    );
}

#[tokio::test]
async fn legacy_servers_skip_dynamic_privileges_and_roles() {
    let storage = FakeStorage::new(LEGACY)
        .with_user("alice", "%", "select")
        .with_role("analyst", "%")
        .with_global_grant("alice", "%", "BACKUP_ADMIN", true)
        .with_role_edge(("analyst", "%"), ("alice", "%"), false);

    let ids = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        ids,
        vec!["grant:entitlement:select:server:db-01:user:alice@%"]
    );
}

#[tokio::test]
async fn proxy_grants_resolve_their_targets() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_user("bob", "localhost", "")
        .with_proxy(("alice", "%"), ("alice", "%"), true)
        .with_proxy(("alice", "%"), ("", ""), false)
        .with_proxy(("alice", "%"), ("bob", "localhost"), true)
        .with_proxy(("alice", "%"), ("ghost", "%"), false);

    let ids = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        set(&ids),
        HashSet::from([
            "grant:entitlement:proxy:server:db-01:user:alice@%",
            "grant:entitlement:proxy:user:bob@localhost:user:alice@%",
            "grant:entitlement:proxy_with_grant:user:bob@localhost:user:alice@%",
        ])
    );
}

#[tokio::test]
async fn role_edges_point_at_the_held_role() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_role("analyst", "%")
        .with_role("admin", "%")
        .with_role_edge(("analyst", "%"), ("alice", "%"), false)
        .with_role_edge(("admin", "%"), ("alice", "%"), true)
        .with_role_edge(("dropped", "%"), ("alice", "%"), false)
        .with_role_edge(("alice", "%"), ("bob", "%"), false);

    let ids = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        set(&ids),
        HashSet::from([
            "grant:entitlement:role_assignment:role:admin@%:user:alice@%",
            "grant:entitlement:role_assignment_with_grant:role:admin@%:user:alice@%",
            "grant:entitlement:role_assignment:role:analyst@%:user:alice@%",
        ])
    );
}

#[tokio::test]
async fn collapsed_accounts_merge_every_host() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_user("alice", "localhost", "")
        .with_database_grant("alice", "%", "sales", "Select")
        .with_database_grant("alice", "localhost", "sales", "Select,Delete");

    let ids = grant_ids(&storage, &settings(), &user("alice", "%,localhost")).await;
    assert_eq!(
        ids,
        vec![
            "grant:entitlement:delete:database:sales:user:alice@%,localhost",
            "grant:entitlement:select:database:sales:user:alice@%,localhost",
        ]
    );
}

#[tokio::test]
async fn privileges_missing_from_the_catalog_are_dropped() {
    let storage = FakeStorage::new(MODERN)
        .with_user("alice", "%", "")
        .with_table_grant("alice", "%", "db", "t", "Select,Frobnicate")
        .with_database_grant("alice", "%", "db", "Execute");

    let ids = grant_ids(&storage, &settings(), &user("alice", "%")).await;
    assert_eq!(
        ids,
        vec![
            "grant:entitlement:execute:database:db:user:alice@%",
            "grant:entitlement:select:table:db.t:user:alice@%",
        ]
    );
}

#[tokio::test]
async fn missing_principal_yields_only_object_grants() {
    let storage = FakeStorage::new(MODERN).with_database_grant("ghost", "%", "db", "Select");

    let ids = grant_ids(&storage, &settings(), &user("ghost", "%")).await;
    assert_eq!(
        ids,
        vec!["grant:entitlement:select:database:db:user:ghost@%"]
    );
}

#[tokio::test]
async fn storage_errors_abort_the_whole_listing() {
    let alice = user("alice", "%");
    for method in ["proxy_grants", "get_account"] {
        let storage = FakeStorage::new(MODERN)
            .with_user("alice", "%", "select")
            .with_database_grant("alice", "%", "sales", "Select")
            .with_proxy(("alice", "%"), ("bob", "%"), false)
            .failing_on(method);
        let catalog = Catalog::build();
        let capability = ServerCapability::from_version(MODERN).unwrap();
        let server = storage.server.identity();
        let settings = settings();
        let reconciler = GrantReconciler::new(&storage, &catalog, &settings, capability, &server);

        let result = reconciler.grants_for(&alice).await;
        assert!(
            matches!(result, Err(Error::Storage(sqlx::Error::PoolClosed))),
            "{method}: {result:?}"
        );
    }
}
