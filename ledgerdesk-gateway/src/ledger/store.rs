// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Ledger Entry Store
//!
//! Field-agnostic entries kept in memory, one list per module slug.
//! Entries keep insertion order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entry {id} not found in {module}")]
    NotFound { module: String, id: String },
}

/// One ledger row. `fields` is opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub module: String,
    pub fields: Map<String, Value>,
    /// Account id of the creator
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct LedgerStore {
    entries: RwLock<HashMap<String, Vec<LedgerEntry>>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, module: &str) -> Vec<LedgerEntry> {
        self.entries
            .read()
            .await
            .get(module)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn create(
        &self,
        module: &str,
        fields: Map<String, Value>,
        created_by: &str,
    ) -> LedgerEntry {
        let now = Utc::now();
        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            module: module.to_string(),
            fields,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.entries
            .write()
            .await
            .entry(module.to_string())
            .or_default()
            .push(entry.clone());
        entry
    }

    /// Replace the fields of an entry.
    pub async fn update(
        &self,
        module: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<LedgerEntry, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(module)
            .and_then(|list| list.iter_mut().find(|e| e.id.to_string() == id))
            .ok_or_else(|| not_found(module, id))?;

        entry.fields = fields;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    pub async fn delete(&self, module: &str, id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let list = entries.get_mut(module).ok_or_else(|| not_found(module, id))?;
        let position = list
            .iter()
            .position(|e| e.id.to_string() == id)
            .ok_or_else(|| not_found(module, id))?;

        list.remove(position);
        Ok(())
    }
}

fn not_found(module: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        module: module.to_string(),
        id: id.to_string(),
    }
}
