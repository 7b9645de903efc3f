// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Permission tag naming one manageable module.
///
/// Declaration order is the order modules appear in navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionTag {
    PayeeManagement,
    BatchManagement,
    SubjectManagement,
    LoanLedgerManagement,
    FuelAllowanceManagement,
    ConstructionPaymentManagement,
    MaintenanceManagement,
    PettyCashManagement,
    SalaryAdvanceManagement,
    UtilityBillManagement,
    TravelAllowanceManagement,
    StationeryManagement,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown permission tag: {0}")]
pub struct UnknownPermission(pub String);

impl PermissionTag {
    pub const ALL: [PermissionTag; 12] = [
        PermissionTag::PayeeManagement,
        PermissionTag::BatchManagement,
        PermissionTag::SubjectManagement,
        PermissionTag::LoanLedgerManagement,
        PermissionTag::FuelAllowanceManagement,
        PermissionTag::ConstructionPaymentManagement,
        PermissionTag::MaintenanceManagement,
        PermissionTag::PettyCashManagement,
        PermissionTag::SalaryAdvanceManagement,
        PermissionTag::UtilityBillManagement,
        PermissionTag::TravelAllowanceManagement,
        PermissionTag::StationeryManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionTag::PayeeManagement => "PAYEE_MANAGEMENT",
            PermissionTag::BatchManagement => "BATCH_MANAGEMENT",
            PermissionTag::SubjectManagement => "SUBJECT_MANAGEMENT",
            PermissionTag::LoanLedgerManagement => "LOAN_LEDGER_MANAGEMENT",
            PermissionTag::FuelAllowanceManagement => "FUEL_ALLOWANCE_MANAGEMENT",
            PermissionTag::ConstructionPaymentManagement => "CONSTRUCTION_PAYMENT_MANAGEMENT",
            PermissionTag::MaintenanceManagement => "MAINTENANCE_MANAGEMENT",
            PermissionTag::PettyCashManagement => "PETTY_CASH_MANAGEMENT",
            PermissionTag::SalaryAdvanceManagement => "SALARY_ADVANCE_MANAGEMENT",
            PermissionTag::UtilityBillManagement => "UTILITY_BILL_MANAGEMENT",
            PermissionTag::TravelAllowanceManagement => "TRAVEL_ALLOWANCE_MANAGEMENT",
            PermissionTag::StationeryManagement => "STATIONERY_MANAGEMENT",
        }
    }
}

impl FromStr for PermissionTag {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PermissionTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

impl fmt::Display for PermissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
