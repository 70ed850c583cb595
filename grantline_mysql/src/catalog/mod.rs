//! Privilege catalog
//!
//! Built once at startup from the fixed privilege table and handed to the
//! entitlement deriver, reconciler and translator.

mod privileges;

use std::collections::HashMap;

use grantline_core::connectors::nodes::EntitlementPurpose;

use crate::consts::{GRANT_PRIV, WITH_GRANT_SUFFIX};
use privileges::PRIVILEGES;

/// A privilege registered under one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Entry id. For grantable variants this is the base id plus `_with_grant`.
    pub id: String,
    /// The underlying privilege id.
    pub privilege: &'static str,
    pub display_name: String,
    pub description: &'static str,
    /// This is the WITH GRANT OPTION / WITH ADMIN OPTION variant.
    pub with_grant: bool,
    pub modern_only: bool,
    pub dynamic: bool,
    pub purpose: EntitlementPurpose,
}

impl CatalogEntry {
    /// The privilege as written in a GRANT or REVOKE statement.
    pub fn keyword(&self) -> String {
        if self.privilege == GRANT_PRIV {
            "GRANT OPTION".to_owned()
        } else if self.dynamic {
            self.privilege.to_uppercase()
        } else {
            self.privilege.replace('_', " ").to_uppercase()
        }
    }
}

/// Every known privilege, indexed by the resource kind it applies to.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_kind: HashMap<&'static str, Vec<CatalogEntry>>,
}

impl Catalog {
    /// Register every privilege under each kind it applies to, followed by
    /// its `_with_grant` variant when it has one.
    pub fn build() -> Self {
        let mut by_kind: HashMap<&'static str, Vec<CatalogEntry>> = HashMap::new();
        for def in PRIVILEGES {
            let base = CatalogEntry {
                id: def.id.to_owned(),
                privilege: def.id,
                display_name: def.display_name.to_owned(),
                description: def.description,
                with_grant: false,
                modern_only: def.modern_only,
                dynamic: def.dynamic,
                purpose: def.purpose,
            };
            for &kind in def.kinds {
                let entries = by_kind.entry(kind).or_default();
                entries.push(base.clone());
                if def.grantable {
                    entries.push(CatalogEntry {
                        id: format!("{}{WITH_GRANT_SUFFIX}", def.id),
                        display_name: format!("Grant {}", def.display_name),
                        with_grant: true,
                        ..base.clone()
                    });
                }
            }
        }
        Self { by_kind }
    }

    /// The entries valid for a kind, in table order. Modern-only entries are
    /// left out for legacy servers.
    pub fn entries_for(&self, kind: &str, modern: bool) -> Vec<&CatalogEntry> {
        self.by_kind
            .get(kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| modern || !e.modern_only)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a single entry by id.
    pub fn lookup(&self, kind: &str, id: &str, modern: bool) -> Option<&CatalogEntry> {
        self.entries_for(kind, modern).into_iter().find(|e| e.id == id)
    }
}
