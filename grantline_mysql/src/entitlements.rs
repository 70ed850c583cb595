//! Entitlement derivation: one entitlement per catalog entry valid for a
//! resource, labelled according to the resource kind.

use grantline_core::connectors::nodes::Entitlement;

use crate::catalog::{Catalog, CatalogEntry};
use crate::consts::{
    PROXY_PRIV, PROXY_WITH_GRANT_PRIV, ROLE, ROLE_ASSIGNMENT_PRIV,
    ROLE_ASSIGNMENT_WITH_GRANT_PRIV, USER,
};
use crate::identity::ResourceIdentity;

/// `entitlement:{privilege}:{resource id}`
pub fn entitlement_id(privilege: &str, resource: &ResourceIdentity) -> String {
    format!("entitlement:{privilege}:{resource}")
}

/// Resource kinds a grant can target on this server.
pub fn grantable_to(modern: bool) -> Vec<String> {
    let mut kinds = vec![USER.to_owned()];
    if modern {
        kinds.push(ROLE.to_owned());
    }
    kinds
}

/// Every entitlement for the resource.
pub fn entitlements_for(
    catalog: &Catalog,
    resource: &ResourceIdentity,
    modern: bool,
) -> Vec<Entitlement> {
    catalog
        .entries_for(resource.kind(), modern)
        .into_iter()
        .map(|entry| Entitlement {
            id: entitlement_id(&entry.id, resource),
            resource: resource.to_resource_id(),
            display_name: display_name(entry, resource),
            description: description(entry, resource),
            slug: slug(entry, resource).to_lowercase(),
            grantable_to: grantable_to(modern),
            purpose: entry.purpose,
        })
        .collect()
}

fn display_name(entry: &CatalogEntry, resource: &ResourceIdentity) -> String {
    let privilege = entry.display_name.to_uppercase();
    let body = resource.body();
    match resource {
        ResourceIdentity::Server { .. } => format!("{privilege} *.*"),
        ResourceIdentity::Database { .. } => format!("{privilege} {body}.*"),
        ResourceIdentity::Table { .. } | ResourceIdentity::Routine { .. } => {
            format!("{privilege} {body}")
        }
        ResourceIdentity::Column { column, .. } => format!("{privilege} ({column}) Column {body}"),
        ResourceIdentity::User(_) | ResourceIdentity::Role(_) => match entry.id.as_str() {
            PROXY_WITH_GRANT_PRIV => format!("GRANT PROXY {body}"),
            ROLE_ASSIGNMENT_WITH_GRANT_PRIV => format!("GRANT ROLE {body}"),
            PROXY_PRIV => format!("{privilege} {body}"),
            ROLE_ASSIGNMENT_PRIV => format!("{body} Role Member"),
            _ if entry.with_grant => format!("GRANT {body}"),
            _ => format!("{body} {}", entry.display_name),
        },
    }
}

fn description(entry: &CatalogEntry, resource: &ResourceIdentity) -> String {
    let base = entry.description;
    let body = resource.body();
    match resource {
        ResourceIdentity::Server { .. } => format!("{base} globally"),
        ResourceIdentity::Database { .. } => format!("{base} on the {body} database"),
        ResourceIdentity::Table { .. } => format!("{base} on the {body} table"),
        ResourceIdentity::Routine { .. } => format!("{base} on the {body} routine"),
        ResourceIdentity::Column {
            database,
            table,
            column,
        } => format!("{base} on the {column} column on the {database}.{table} table"),
        ResourceIdentity::User(_) | ResourceIdentity::Role(_) => match entry.id.as_str() {
            PROXY_WITH_GRANT_PRIV => format!(
                "Allows granting other users the ability to proxy to the {body} user"
            ),
            ROLE_ASSIGNMENT_WITH_GRANT_PRIV => format!(
                "Allows granting other users the ability to use SET ROLE with the {body} role"
            ),
            PROXY_PRIV => format!("Enables proxying to the {body} user"),
            ROLE_ASSIGNMENT_PRIV => format!("{base} on the {body} role"),
            _ => base.to_owned(),
        },
    }
}

fn slug<'a>(entry: &'a CatalogEntry, resource: &ResourceIdentity) -> &'a str {
    match (resource, entry.id.as_str()) {
        (ResourceIdentity::User(_) | ResourceIdentity::Role(_), PROXY_WITH_GRANT_PRIV) => {
            "grant proxy"
        }
        (ResourceIdentity::User(_) | ResourceIdentity::Role(_), ROLE_ASSIGNMENT_WITH_GRANT_PRIV) => {
            "grant role"
        }
        (ResourceIdentity::User(_) | ResourceIdentity::Role(_), PROXY_PRIV) => "proxy",
        (ResourceIdentity::User(_) | ResourceIdentity::Role(_), ROLE_ASSIGNMENT_PRIV) => "member",
        _ => &entry.display_name,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use grantline_core::connectors::nodes::EntitlementPurpose;

    use super::*;
    use crate::identity::AccountIdentity;

    fn find<'a>(entitlements: &'a [Entitlement], id: &str) -> &'a Entitlement {
        entitlements
            .iter()
            .find(|e| e.id == id)
            .unwrap_or_else(|| panic!("missing {id}"))
    }

    #[test]
    fn ids_are_unique_for_every_kind() {
        let catalog = Catalog::build();
        let resources = [
            ResourceIdentity::server("db-01"),
            ResourceIdentity::database("db"),
            ResourceIdentity::table("db", "t"),
            ResourceIdentity::column("db", "t", "c"),
            ResourceIdentity::routine("db", "r"),
            ResourceIdentity::User(AccountIdentity::new("alice", "%")),
            ResourceIdentity::Role(AccountIdentity::new("analyst", "%")),
        ];
        for resource in resources {
            for modern in [true, false] {
                let entitlements = entitlements_for(&catalog, &resource, modern);
                let ids: HashSet<_> = entitlements.iter().map(|e| &e.id).collect();
                assert_eq!(ids.len(), entitlements.len(), "{resource}");
            }
        }
    }

    #[test]
    fn object_labels() {
        let catalog = Catalog::build();

        let server = entitlements_for(&catalog, &ResourceIdentity::server("db-01"), true);
        let e = find(&server, "entitlement:select:server:db-01");
        assert_eq!(e.display_name, "SELECT *.*");
        assert_eq!(e.description, "Enable use of SELECT globally");
        assert_eq!(e.slug, "select");

        let db = entitlements_for(&catalog, &ResourceIdentity::database("sales"), true);
        assert_eq!(
            find(&db, "entitlement:create_view:database:sales").display_name,
            "CREATE VIEW sales.*"
        );

        let table = entitlements_for(&catalog, &ResourceIdentity::table("sales", "orders"), true);
        let e = find(&table, "entitlement:update:table:sales.orders");
        assert_eq!(e.display_name, "UPDATE sales.orders");
        assert_eq!(e.description, "Enable use of UPDATE on the sales.orders table");

        let column = entitlements_for(
            &catalog,
            &ResourceIdentity::column("sales", "orders", "total"),
            true,
        );
        let e = find(&column, "entitlement:select:column:sales.orders.total");
        assert_eq!(e.display_name, "SELECT (total) Column sales.orders.total");
        assert_eq!(
            e.description,
            "Enable use of SELECT on the total column on the sales.orders table"
        );
    }

    #[test]
    fn account_labels() {
        let catalog = Catalog::build();
        let role = ResourceIdentity::Role(AccountIdentity::new("analyst", "%"));
        let entitlements = entitlements_for(&catalog, &role, true);

        let member = find(&entitlements, "entitlement:role_assignment:role:analyst@%");
        assert_eq!(member.display_name, "analyst@% Role Member");
        assert_eq!(member.slug, "member");
        assert_eq!(member.purpose, EntitlementPurpose::Assignment);
        assert_eq!(member.description, "Enables SET ROLE on the analyst@% role");

        let admin = find(
            &entitlements,
            "entitlement:role_assignment_with_grant:role:analyst@%",
        );
        assert_eq!(admin.display_name, "GRANT ROLE analyst@%");
        assert_eq!(admin.slug, "grant role");

        let proxy = find(&entitlements, "entitlement:proxy:role:analyst@%");
        assert_eq!(proxy.display_name, "PROXY analyst@%");
        assert_eq!(proxy.slug, "proxy");
        assert_eq!(proxy.description, "Enables proxying to the analyst@% user");

        let grant_proxy = find(&entitlements, "entitlement:proxy_with_grant:role:analyst@%");
        assert_eq!(grant_proxy.display_name, "GRANT PROXY analyst@%");
        assert_eq!(grant_proxy.slug, "grant proxy");
    }

    #[test]
    fn legacy_servers_only_grant_to_users() {
        let catalog = Catalog::build();
        let user = ResourceIdentity::User(AccountIdentity::new("alice", "%"));
        let legacy = entitlements_for(&catalog, &user, false);
        assert!(legacy.iter().all(|e| e.grantable_to == vec!["user"]));
        assert!(legacy.iter().all(|e| !e.id.contains("role_assignment")));
        let modern = entitlements_for(&catalog, &user, true);
        assert!(modern.iter().all(|e| e.grantable_to == vec!["user", "role"]));
    }
}
