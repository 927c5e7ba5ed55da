// Copyright (C) 2026 The ALMS Gateway Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The role-forwarding graph.
//!
//! A static directed graph mapping each workflow role to the ordered set
//! of roles it may forward an application to. Edge order is significant:
//! it determines the default-selected recipient in forwarding UIs. The
//! graph may contain cycles (e.g., ACP↔SHO, DCP↔ACP); bidirectional
//! escalation and de-escalation paths between adjacent ranks are valid.
//!
//! Lookups never fail. Unknown role codes degrade to an empty forward
//! list and the raw code as label.

use alms_domain::RoleCode;
use std::collections::HashMap;

/// One declared role: its label and its outgoing forwarding edges.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RoleEntry {
    /// The role code.
    code: RoleCode,
    /// The human-readable label.
    display_name: String,
    /// Outgoing edges, in declaration order.
    forwards_to: Vec<RoleCode>,
}

/// An immutable role-forwarding configuration.
///
/// Built once per deployment and injected where needed; tests can swap in
/// a custom graph instead of relying on a global static.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGraph {
    /// Roles in declaration order.
    entries: Vec<RoleEntry>,
    /// Role code to index into `entries`.
    index: HashMap<RoleCode, usize>,
}

impl RoleGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a role with its label and ordered outgoing edges.
    ///
    /// Redeclaring a code replaces its entry in place, keeping the
    /// original declaration position. Forward targets may reference roles
    /// declared later.
    pub fn define(&mut self, code: &str, display_name: &str, forwards_to: &[&str]) {
        let entry: RoleEntry = RoleEntry {
            code: RoleCode::new(code),
            display_name: display_name.to_string(),
            forwards_to: forwards_to.iter().map(|c| RoleCode::new(c)).collect(),
        };
        if let Some(position) = self.index.get(&entry.code) {
            self.entries[*position] = entry;
        } else {
            self.index.insert(entry.code.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    /// Returns the roles the given role may forward to, in declared order.
    ///
    /// Unknown and leaf roles yield an empty slice; absence of outgoing
    /// edges is not an error condition.
    #[must_use]
    pub fn next_roles(&self, code: &RoleCode) -> &[RoleCode] {
        self.index
            .get(code)
            .map_or(&[], |position| self.entries[*position].forwards_to.as_slice())
    }

    /// Returns the human-readable label for a role.
    ///
    /// Falls back to the raw code verbatim when no mapping exists, so a
    /// non-empty input never yields an empty label.
    #[must_use]
    pub fn display_name<'a>(&'a self, code: &'a RoleCode) -> &'a str {
        self.index
            .get(code)
            .map_or_else(|| code.value(), |position| {
                self.entries[*position].display_name.as_str()
            })
    }

    /// Returns true if the role is declared in the graph.
    #[must_use]
    pub fn contains(&self, code: &RoleCode) -> bool {
        self.index.contains_key(code)
    }

    /// Iterates over the declared role codes in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &RoleCode> {
        self.entries.iter().map(|entry| &entry.code)
    }

    /// Returns the number of declared roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no roles are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in deploy-time forwarding configuration.
    ///
    /// Clerical roles feed the police chain; adjacent police ranks hold
    /// bidirectional edges so an application can be escalated or sent
    /// back one rank. ADMIN is terminal.
    #[must_use]
    pub fn standard() -> Self {
        let mut graph: Self = Self::new();
        graph.define("ADMIN", "System Administrator (ADMIN)", &[]);
        graph.define("HC", "Head Clerk (HC)", &["LC", "AS"]);
        graph.define("LC", "License Clerk (LC)", &["DO"]);
        graph.define("DO", "Dealing Officer (DO)", &["SHO", "LC"]);
        graph.define("SHO", "Station House Officer (SHO)", &["ACP", "ZS"]);
        graph.define("ZS", "Zonal Supervisor (ZS)", &["ACP", "SHO"]);
        graph.define(
            "ACP",
            "Assistant Commissioner of Police (ACP)",
            &["DCP", "SHO"],
        );
        graph.define("AS", "Arms Superintendent (AS)", &["DCP", "HC"]);
        graph.define("ACO", "Arms Cell Officer (ACO)", &["DCP", "AS"]);
        graph.define(
            "DCP",
            "Deputy Commissioner of Police (DCP)",
            &["JCP", "ACP"],
        );
        graph.define("JCP", "Joint Commissioner of Police (JCP)", &["CP", "DCP"]);
        graph.define("CP", "Commissioner of Police (CP)", &["JCP", "DCP"]);
        graph
    }
}
