//! Host inventory and host-pattern resolution.
//!
//! The inventory is read from a YAML file in the usual group layout, or
//! given inline as a comma separated host list:
//!
//! ```yaml
//! all:
//!   hosts:
//!     bastion:
//!   children:
//!     webservers:
//!       hosts:
//!         web1:
//!         web2:
//!     dbservers:
//!       hosts:
//!         db1:
//! ```
//!
//! Patterns combine terms separated by `,` or `:`. A plain term adds hosts,
//! `&term` keeps only hosts also matched by `term`, and `!term` removes
//! them. `all` and `*` match every host, `*` inside a term is a wildcard over
//! host and group names.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde_yaml::Value;

use crate::error::{ListingError, Result, YamlResultExt};

const IMPLICIT_LOCALHOST: &str = "localhost";

/// A resolved inventory host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Host {
    name: String,
}

impl Host {
    /// Create a host with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Host name as written in the inventory.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Group {
    hosts: Vec<String>,
    children: Vec<String>,
}

/// Hosts and groups available to host patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    hosts: Vec<String>,
    groups: BTreeMap<String, Group>,
    limit: Option<String>,
}

impl Inventory {
    /// Inventory with no hosts; only the implicit localhost resolves.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inventory from an inline host list such as `web1,web2,`.
    pub fn from_host_list(list: &str) -> Self {
        let mut inventory = Self::default();
        for host in list.split(',').map(str::trim).filter(|h| !h.is_empty()) {
            inventory.add_host(host);
        }
        inventory
    }

    /// Inventory from YAML source text; `path` is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::Parse` if the text is not valid YAML or its
    /// top level is not a mapping of groups.
    pub fn from_yaml(source: &str, path: &Path) -> Result<Self> {
        let document: Value = serde_yaml::from_str(source).parse_context(path)?;
        let mut inventory = Self::default();
        match document {
            Value::Mapping(groups) => {
                for (name, body) in &groups {
                    let Some(name) = name.as_str() else {
                        continue;
                    };
                    inventory.add_group(name, body);
                }
            }
            Value::Null => {}
            _ => {
                return Err(ListingError::parse(path)
                    .with_message("an inventory must be a mapping of groups"))
            }
        }
        Ok(inventory)
    }

    /// Read a YAML inventory file.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::FileSystem` if the file cannot be read and
    /// `ListingError::Parse` if it is not a valid inventory.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading inventory {}", path.display());
        let source =
            std::fs::read_to_string(path).map_err(|e| ListingError::file_system(path, e))?;
        Self::from_yaml(&source, path)
    }

    /// Restrict every later lookup to hosts matching `pattern`.
    pub fn subset(&mut self, pattern: Option<&str>) {
        self.limit = pattern.map(String::from);
    }

    /// All hosts, in declaration order.
    pub fn list_hosts(&self) -> Vec<Host> {
        self.get_hosts("all")
    }

    /// Hosts matching `pattern`, in inventory order, narrowed by the subset.
    pub fn get_hosts(&self, pattern: &str) -> Vec<Host> {
        let mut selected = self.resolve(pattern);
        if let Some(limit) = &self.limit {
            let allowed = self.resolve(limit);
            selected.retain(|host| allowed.contains(host));
        }

        let mut ordered: Vec<Host> = self
            .hosts
            .iter()
            .filter(|host| selected.contains(host.as_str()))
            .map(Host::new)
            .collect();
        if selected.contains(IMPLICIT_LOCALHOST) && !self.hosts.iter().any(|h| h == IMPLICIT_LOCALHOST)
        {
            ordered.push(Host::new(IMPLICIT_LOCALHOST));
        }
        ordered
    }

    fn add_host(&mut self, host: &str) {
        if !self.hosts.iter().any(|h| h == host) {
            self.hosts.push(host.to_string());
        }
    }

    fn add_group(&mut self, name: &str, body: &Value) {
        let mut group = self.groups.remove(name).unwrap_or_default();

        if let Some(hosts) = body.get("hosts") {
            for host in member_names(hosts) {
                self.add_host(&host);
                if !group.hosts.contains(&host) {
                    group.hosts.push(host);
                }
            }
        }
        if let Some(Value::Mapping(children)) = body.get("children") {
            for (child, child_body) in children {
                let Some(child) = child.as_str() else {
                    continue;
                };
                if !group.children.iter().any(|c| c == child) {
                    group.children.push(child.to_string());
                }
                self.add_group(child, child_body);
            }
        }

        self.groups.insert(name.to_string(), group);
    }

    fn resolve(&self, pattern: &str) -> BTreeSet<String> {
        let terms: Vec<&str> = pattern
            .split([',', ':'])
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .collect();

        let mut selected = BTreeSet::new();
        for term in terms.iter().filter(|t| !t.starts_with(['!', '&'])) {
            selected.extend(self.match_term(term));
        }
        for term in terms.iter().filter_map(|t| t.strip_prefix('&')) {
            let matched = self.match_term(term);
            selected.retain(|host| matched.contains(host));
        }
        for term in terms.iter().filter_map(|t| t.strip_prefix('!')) {
            let matched = self.match_term(term);
            selected.retain(|host| !matched.contains(host));
        }
        selected
    }

    fn match_term(&self, term: &str) -> BTreeSet<String> {
        if term == "all" || term == "*" {
            return self.hosts.iter().cloned().collect();
        }
        if self.groups.contains_key(term) {
            return self.group_hosts(term);
        }
        if self.hosts.iter().any(|h| h == term) {
            return BTreeSet::from([term.to_string()]);
        }
        if term.contains('*') {
            let mut matched: BTreeSet<String> = self
                .hosts
                .iter()
                .filter(|host| wildcard_match(term, host))
                .cloned()
                .collect();
            for group in self.groups.keys().filter(|group| wildcard_match(term, group)) {
                matched.extend(self.group_hosts(group));
            }
            return matched;
        }
        if term == IMPLICIT_LOCALHOST || term == "127.0.0.1" {
            return BTreeSet::from([IMPLICIT_LOCALHOST.to_string()]);
        }

        warn!("Could not match supplied host pattern, ignoring: {term}");
        BTreeSet::new()
    }

    fn group_hosts(&self, name: &str) -> BTreeSet<String> {
        let mut hosts = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut pending = vec![name];

        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(group) = self.groups.get(current) {
                hosts.extend(group.hosts.iter().cloned());
                pending.extend(group.children.iter().map(String::as_str));
            }
        }
        hosts
    }
}

/// Names listed under a `hosts:` key, either as mapping keys or a sequence.
fn member_names(value: &Value) -> Vec<String> {
    match value {
        Value::Mapping(hosts) => hosts.keys().filter_map(Value::as_str).map(String::from).collect(),
        Value::Sequence(hosts) => hosts.iter().filter_map(Value::as_str).map(String::from).collect(),
        Value::String(host) => vec![host.clone()],
        _ => Vec::new(),
    }
}

/// Glob match supporting `*` only.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        return rest.is_empty();
    };
    for part in middle {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}

/// Builder resolving where the inventory comes from.
#[derive(Debug, Clone, Default)]
pub struct InventoryBuilder {
    source: Option<String>,
    limit: Option<String>,
}

impl InventoryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inventory source: a file path or an inline host list.
    ///
    /// If not specified, uses `$XDG_CONFIG_HOME/taskscope/hosts.yml` when
    /// that file exists, or an empty inventory otherwise.
    pub fn with_source<S: AsRef<str>>(mut self, source: Option<S>) -> Self {
        if let Some(source) = source {
            self.source = Some(source.as_ref().to_string());
        }
        self
    }

    /// Sets a pattern every lookup is narrowed to.
    pub fn with_limit<S: AsRef<str>>(mut self, limit: Option<S>) -> Self {
        if let Some(limit) = limit {
            self.limit = Some(limit.as_ref().to_string());
        }
        self
    }

    /// Builds the configured inventory.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::InvalidInput` if the source is neither an
    /// existing file nor a host list, and any error from [`Inventory::load`].
    pub fn build(self) -> Result<Inventory> {
        let mut inventory = match self.source {
            Some(source) if Path::new(&source).exists() => Inventory::load(Path::new(&source))?,
            Some(source) if source.contains(',') => Inventory::from_host_list(&source),
            Some(source) => {
                return Err(ListingError::invalid_input("inventory")
                    .with_reason(format!("{source} is neither a file nor a host list")))
            }
            None => match Self::default_inventory_path() {
                Some(path) => Inventory::load(&path)?,
                None => {
                    debug!("No inventory configured, using an empty inventory");
                    Inventory::empty()
                }
            },
        };
        inventory.subset(self.limit.as_deref());
        Ok(inventory)
    }

    /// Returns the default inventory path following the XDG Base Directory
    /// specification, if such a file exists.
    fn default_inventory_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("taskscope").find_config_file("hosts.yml")
    }
}
