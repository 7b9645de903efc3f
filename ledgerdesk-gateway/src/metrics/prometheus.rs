// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Prometheus metrics for logins and authorization decisions.
///
/// Cheap to clone; all clones share one registry.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    /// Login counter: ledgerdesk_login_total{result}
    login_total: CounterVec,

    /// Guard decisions: ledgerdesk_access_decisions_total{outcome}
    access_decisions_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics registry with all counters registered.
    pub fn new() -> Self {
        let registry = Registry::new();

        let login_total = CounterVec::new(
            Opts::new("ledgerdesk_login_total", "Login attempts by result"),
            &["result"],
        )
        .expect("failed to create login_total counter");

        let access_decisions_total = CounterVec::new(
            Opts::new(
                "ledgerdesk_access_decisions_total",
                "Authorization guard decisions by outcome",
            ),
            &["outcome"],
        )
        .expect("failed to create access_decisions_total counter");

        registry
            .register(Box::new(login_total.clone()))
            .expect("failed to register login_total");
        registry
            .register(Box::new(access_decisions_total.clone()))
            .expect("failed to register access_decisions_total");

        Self {
            registry: Arc::new(registry),
            login_total,
            access_decisions_total,
        }
    }

    /// Record a login attempt: `success`, `invalid_credentials` or `error`.
    pub fn record_login(&self, result: &str) {
        self.login_total.with_label_values(&[result]).inc();
    }

    pub fn record_access_decision(&self, granted: bool) {
        let outcome = if granted { "granted" } else { "denied" };
        self.access_decisions_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Encode metrics in Prometheus text format.
    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
