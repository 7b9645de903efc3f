// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Ledger entries for the general modules.

pub mod store;

pub use store::{LedgerEntry, LedgerStore, StoreError};
