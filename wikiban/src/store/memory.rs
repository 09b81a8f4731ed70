//! In-memory store doubles for tests.
//!
//! Both stores are deterministic, support failure injection and keep enough
//! history (page writes, ticket updates) for tests to assert on what reached
//! the backend.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use wikiban_fields::FieldDef;

use super::{
    RawFieldChange, TicketData, TicketStore, TicketStoreError, WikiStore, WikiStoreError,
};

/// In-memory ticket store.
///
/// Seed tickets with [`MemoryTicketStore::insert`], inject fetch failures
/// with [`MemoryTicketStore::fail_fetch`], inspect writes with
/// [`MemoryTicketStore::updates`].
pub struct MemoryTicketStore {
    inner: Mutex<TicketStoreInner>,
}

struct TicketStoreInner {
    tickets: BTreeMap<u64, TicketData>,
    changelogs: BTreeMap<u64, Vec<RawFieldChange>>,
    fields: Vec<FieldDef>,
    fail_fetch: BTreeSet<u64>,
    updates: Vec<(u64, String)>,
    next_id: u64,
}

impl MemoryTicketStore {
    /// An empty store recognizing the basic ticket fields
    pub fn new() -> Self {
        Self::with_fields(vec![
            FieldDef::new("summary").with_label("Summary"),
            FieldDef::new("status").with_label("Status"),
            FieldDef::new("priority").with_label("Priority"),
            FieldDef::new("milestone").with_label("Milestone"),
            FieldDef::new("version").with_label("Version"),
        ])
    }

    /// An empty store recognizing exactly the given fields
    pub fn with_fields(fields: Vec<FieldDef>) -> Self {
        Self {
            inner: Mutex::new(TicketStoreInner {
                tickets: BTreeMap::new(),
                changelogs: BTreeMap::new(),
                fields,
                fail_fetch: BTreeSet::new(),
                updates: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed a ticket with just a summary and a status
    pub fn insert(&self, id: u64, summary: &str, status: &str) {
        let mut fields = Map::new();
        fields.insert("summary".into(), Value::String(summary.into()));
        fields.insert("status".into(), Value::String(status.into()));
        self.insert_data(TicketData {
            id,
            fields,
            time: epoch(),
            changetime: epoch(),
        });
    }

    /// Seed a fully specified ticket
    pub fn insert_data(&self, data: TicketData) {
        let mut inner = self.inner.lock().expect("ticket store lock");
        inner.next_id = inner.next_id.max(data.id + 1);
        inner.tickets.insert(data.id, data);
    }

    /// Seed a ticket's raw changelog
    pub fn set_changelog(&self, id: u64, log: Vec<RawFieldChange>) {
        self.inner
            .lock()
            .expect("ticket store lock")
            .changelogs
            .insert(id, log);
    }

    /// Make every `fetch` of the given id fail with a backend error
    pub fn fail_fetch(&self, id: u64) {
        self.inner
            .lock()
            .expect("ticket store lock")
            .fail_fetch
            .insert(id);
    }

    /// Current state of a ticket
    pub fn ticket(&self, id: u64) -> Option<TicketData> {
        self.inner
            .lock()
            .expect("ticket store lock")
            .tickets
            .get(&id)
            .cloned()
    }

    /// Every (id, author) pair passed to `update`, in call order
    pub fn updates(&self) -> Vec<(u64, String)> {
        self.inner.lock().expect("ticket store lock").updates.clone()
    }
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn fetch(&self, id: u64) -> Result<TicketData, TicketStoreError> {
        let inner = self.inner.lock().expect("ticket store lock");
        if inner.fail_fetch.contains(&id) {
            return Err(TicketStoreError::Backend {
                message: format!("injected fetch failure for ticket {id}"),
            });
        }
        inner
            .tickets
            .get(&id)
            .cloned()
            .ok_or(TicketStoreError::NotFound { id })
    }

    async fn create(
        &self,
        fields: &Map<String, Value>,
        _author: &str,
    ) -> Result<u64, TicketStoreError> {
        let mut inner = self.inner.lock().expect("ticket store lock");
        let id = inner.next_id;
        inner.next_id += 1;
        let mut fields = fields.clone();
        fields
            .entry("status".to_string())
            .or_insert_with(|| Value::String("new".into()));
        inner.tickets.insert(
            id,
            TicketData {
                id,
                fields,
                time: epoch(),
                changetime: epoch(),
            },
        );
        Ok(id)
    }

    async fn update(
        &self,
        id: u64,
        fields: &Map<String, Value>,
        author: &str,
        _comment: &str,
    ) -> Result<(), TicketStoreError> {
        let mut inner = self.inner.lock().expect("ticket store lock");
        let ticket = inner
            .tickets
            .get_mut(&id)
            .ok_or(TicketStoreError::NotFound { id })?;
        for (key, value) in fields {
            ticket.fields.insert(key.clone(), value.clone());
        }
        inner.updates.push((id, author.to_string()));
        Ok(())
    }

    async fn changelog(&self, id: u64) -> Result<Vec<RawFieldChange>, TicketStoreError> {
        let inner = self.inner.lock().expect("ticket store lock");
        if !inner.tickets.contains_key(&id) {
            return Err(TicketStoreError::NotFound { id });
        }
        Ok(inner.changelogs.get(&id).cloned().unwrap_or_default())
    }

    async fn fields(&self) -> Result<Vec<FieldDef>, TicketStoreError> {
        Ok(self.inner.lock().expect("ticket store lock").fields.clone())
    }
}

/// In-memory wiki page store.
pub struct MemoryWikiStore {
    inner: Mutex<WikiStoreInner>,
}

struct WikiStoreInner {
    pages: BTreeMap<String, String>,
    fail_writes: bool,
    writes: Vec<(String, String, String)>,
}

impl MemoryWikiStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(WikiStoreInner {
                pages: BTreeMap::new(),
                fail_writes: false,
                writes: Vec::new(),
            }),
        }
    }

    /// A store seeded with one page
    pub fn with_page(name: &str, text: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .expect("wiki store lock")
            .pages
            .insert(name.into(), text.into());
        store
    }

    /// Make every subsequent `write` fail with a backend error
    pub fn fail_writes(&self) {
        self.inner.lock().expect("wiki store lock").fail_writes = true;
    }

    /// Current text of a page
    pub fn page(&self, name: &str) -> Option<String> {
        self.inner
            .lock()
            .expect("wiki store lock")
            .pages
            .get(name)
            .cloned()
    }

    /// Every (page, author, comment) triple passed to `write`, in call order
    pub fn writes(&self) -> Vec<(String, String, String)> {
        self.inner.lock().expect("wiki store lock").writes.clone()
    }
}

impl Default for MemoryWikiStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WikiStore for MemoryWikiStore {
    async fn read(&self, name: &str) -> Result<String, WikiStoreError> {
        self.inner
            .lock()
            .expect("wiki store lock")
            .pages
            .get(name)
            .cloned()
            .ok_or_else(|| WikiStoreError::PageNotFound { name: name.into() })
    }

    async fn write(
        &self,
        name: &str,
        text: &str,
        author: &str,
        comment: &str,
    ) -> Result<(), WikiStoreError> {
        let mut inner = self.inner.lock().expect("wiki store lock");
        if inner.fail_writes {
            return Err(WikiStoreError::Backend {
                message: "injected write failure".into(),
            });
        }
        inner.pages.insert(name.into(), text.into());
        inner
            .writes
            .push((name.into(), author.into(), comment.into()));
        Ok(())
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid epoch")
}
