use crate::error::ServiceError;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One record in the tabular dataset backing the data grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub created: String,
    pub last: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => "User",
            Role::Admin => "Admin",
            Role::Editor => "Editor",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Pending => "Pending",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Name,
    Email,
    Role,
    Status,
    Created,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// A paginated listing request: 1-based page, page size, free-text
/// query, sort column and direction. Missing fields fall back to the
/// grid's defaults (page 1, 20 rows, sorted by id ascending).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: usize,
    pub size: usize,
    pub q: String,
    pub sort: SortField,
    pub dir: SortDir,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            q: String::new(),
            sort: SortField::Id,
            dir: SortDir::Asc,
        }
    }
}

/// The response slice: the total match count plus the requested page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub total: usize,
    pub rows: Vec<Row>,
}

/// A partial row update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// In-memory row collection with server-side paging, sorting and search
/// semantics. Stands in for the real persistence tier.
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
}

const ROLES: [Role; 3] = [Role::User, Role::Admin, Role::Editor];
const STATUSES: [Status; 3] = [Status::Active, Status::Inactive, Status::Pending];

impl RowStore {
    /// Seeds a deterministic dataset of `count` rows. The same count
    /// always produces the same rows.
    pub fn seed(count: usize) -> Self {
        let rows = (1..=count as u64)
            .map(|id| {
                let i = (id - 1) as usize;
                Row {
                    id,
                    name: format!("User {}", id),
                    email: format!("user{}@example.com", id),
                    role: ROLES[id as usize % ROLES.len()],
                    status: STATUSES[id as usize % STATUSES.len()],
                    created: iso_date(i % 12 + 1, i % 28 + 1),
                    last: iso_date(i % 12 + 1, (i + 7) % 28 + 1),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: u64) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Runs one listing request: filter by the free-text query, sort by
    /// the requested column, slice out the requested page.
    pub fn query(&self, query: &PageQuery) -> PageResult {
        let needle = query.q.to_lowercase();
        let matched: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| needle.is_empty() || haystack(row).contains(&needle))
            .collect();
        let total = matched.len();

        let sorted = matched
            .into_iter()
            .sorted_by(|a, b| match query.dir {
                SortDir::Asc => compare(a, b, query.sort),
                SortDir::Desc => compare(b, a, query.sort),
            });

        let page = query.page.max(1);
        let start = (page - 1).saturating_mul(query.size);
        let rows: Vec<Row> = sorted.skip(start).take(query.size).cloned().collect();

        debug!(
            "row query q='{}' sort={:?} dir={:?} page={} -> {} of {} rows",
            query.q,
            query.sort,
            query.dir,
            page,
            rows.len(),
            total
        );
        PageResult { total, rows }
    }

    /// Merges a partial update into the row with the given id.
    pub fn patch(&mut self, id: u64, patch: &RowPatch) -> Result<Row, ServiceError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ServiceError::RowNotFound(id))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        if let Some(role) = patch.role {
            row.role = role;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        Ok(row.clone())
    }
}

/// The searchable text of a row: every displayed column, lowercased and
/// concatenated, matching how the grid's free-text search behaves.
fn haystack(row: &Row) -> String {
    format!(
        "{}{}{}{}{}",
        row.id, row.name, row.email, row.role, row.status
    )
    .to_lowercase()
}

fn compare(a: &Row, b: &Row, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Email => a.email.cmp(&b.email),
        SortField::Role => a.role.to_string().cmp(&b.role.to_string()),
        SortField::Status => a.status.to_string().cmp(&b.status.to_string()),
        SortField::Created => a.created.cmp(&b.created),
        SortField::Last => a.last.cmp(&b.last),
    }
}

fn iso_date(month: usize, day: usize) -> String {
    format!("2025-{:02}-{:02}T00:00:00.000Z", month, day)
}
