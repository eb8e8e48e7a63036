//! # Roles and Permission Levels
//!
//! Actor categories used for access control, and the permission lattice
//! `None < Read < ReadUpdate < CreateReadUpdate < CreateReadUpdateDelete`.
//!
//! A grant of at least [`Permission::CreateReadUpdate`] on an event is what
//! allows a role to trigger it; [`Permission::Read`] ("history only") lets
//! the role see that the event happened.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaseflowError;

/// An actor category recognised by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Applicant 1 as a citizen (the case creator).
    Creator,
    /// Applicant 2 (or respondent) as a citizen.
    Applicant2,
    /// Solicitor representing applicant 1.
    Applicant1Solicitor,
    /// Solicitor representing applicant 2.
    Applicant2Solicitor,
    /// Court administration staff.
    CaseWorker,
    /// Legal advisor considering orders and service applications.
    LegalAdvisor,
    /// Judge.
    Judge,
    /// Court superuser.
    SuperUser,
    /// System account used by scheduled tasks and downstream triggers.
    SystemUpdate,
}

impl Role {
    /// Every role in declaration order.
    pub const ALL: [Role; 9] = [
        Self::Creator,
        Self::Applicant2,
        Self::Applicant1Solicitor,
        Self::Applicant2Solicitor,
        Self::CaseWorker,
        Self::LegalAdvisor,
        Self::Judge,
        Self::SuperUser,
        Self::SystemUpdate,
    ];

    /// The kebab-case identifier used in configuration and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Applicant2 => "applicant2",
            Self::Applicant1Solicitor => "applicant1-solicitor",
            Self::Applicant2Solicitor => "applicant2-solicitor",
            Self::CaseWorker => "case-worker",
            Self::LegalAdvisor => "legal-advisor",
            Self::Judge => "judge",
            Self::SuperUser => "super-user",
            Self::SystemUpdate => "system-update",
        }
    }

    /// The role code the platform uses for this actor category.
    pub fn platform_code(&self) -> &'static str {
        match self {
            Self::Creator => "[CREATOR]",
            Self::Applicant2 => "[APPLICANTTWO]",
            Self::Applicant1Solicitor => "[APPONESOLICITOR]",
            Self::Applicant2Solicitor => "[APPTWOSOLICITOR]",
            Self::CaseWorker => "caseworker-divorce-courtadmin_beta",
            Self::LegalAdvisor => "caseworker-divorce-legaladvisor",
            Self::Judge => "caseworker-divorce-judge",
            Self::SuperUser => "caseworker-divorce-superuser",
            Self::SystemUpdate => "caseworker-divorce-systemupdate",
        }
    }

    /// Whether this role is a citizen acting for themselves.
    pub fn is_citizen(&self) -> bool {
        matches!(self, Self::Creator | Self::Applicant2)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CaseflowError;

    /// Accepts either the kebab-case identifier or the platform role code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.platform_code() == s)
            .ok_or_else(|| CaseflowError::UnknownRole(s.to_string()))
    }
}

// ─── Permission lattice ──────────────────────────────────────────────

/// A permission level. Ordered: a higher level implies every lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Permission {
    /// No access.
    #[default]
    None,
    /// Read-only ("history only").
    Read,
    /// Read and update.
    ReadUpdate,
    /// Create, read, and update — enough to trigger an event.
    CreateReadUpdate,
    /// Full access including delete.
    CreateReadUpdateDelete,
}

impl Permission {
    /// Whether this level is enough to trigger an event.
    pub fn can_trigger(&self) -> bool {
        *self >= Self::CreateReadUpdate
    }

    /// The platform's short code (`C`, `R`, `U`, `D` letters).
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Read => "R",
            Self::ReadUpdate => "RU",
            Self::CreateReadUpdate => "CRU",
            Self::CreateReadUpdateDelete => "CRUD",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("-"),
            other => f.write_str(other.code()),
        }
    }
}

impl FromStr for Permission {
    type Err = CaseflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "-" => Ok(Self::None),
            "R" => Ok(Self::Read),
            "RU" => Ok(Self::ReadUpdate),
            "CRU" => Ok(Self::CreateReadUpdate),
            "CRUD" => Ok(Self::CreateReadUpdateDelete),
            other => Err(CaseflowError::UnknownPermission(other.to_string())),
        }
    }
}
