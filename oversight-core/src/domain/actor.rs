// oversight-core/src/domain/actor.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Enterprise Technology Services reviewer.
    EtsAdmin,
    /// Independent Verification & Validation vendor.
    IvvVendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EtsAdmin => "ets-admin",
            Self::IvvVendor => "ivv-vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ets-admin" | "admin" => Ok(Self::EtsAdmin),
            "ivv-vendor" | "vendor" => Ok(Self::IvvVendor),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user: String,
    pub name: String,
    pub role: Role,
    /// Vendor organisation, set for IV&V users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl Actor {
    pub fn admin(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            name: user.clone(),
            user,
            role: Role::EtsAdmin,
            vendor: None,
        }
    }

    pub fn vendor(user: impl Into<String>, vendor: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            name: user.clone(),
            user,
            role: Role::IvvVendor,
            vendor: Some(vendor.into()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::EtsAdmin
    }

    pub fn require_admin(&self, action: &str) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(format!(
                "'{}' requires the ets-admin role ({} is {})",
                action, self.user, self.role
            )))
        }
    }

    /// Vendors may only act on projects assigned to their organisation.
    pub fn require_vendor_of(
        &self,
        assigned_vendor: &str,
        action: &str,
    ) -> Result<(), DomainError> {
        match (&self.role, &self.vendor) {
            (Role::IvvVendor, Some(vendor)) if vendor.eq_ignore_ascii_case(assigned_vendor) => {
                Ok(())
            }
            (Role::IvvVendor, _) => Err(DomainError::Unauthorized(format!(
                "'{}' is reserved to {} (assigned IV&V vendor)",
                action, assigned_vendor
            ))),
            (Role::EtsAdmin, _) => Err(DomainError::Unauthorized(format!(
                "'{}' requires the ivv-vendor role",
                action
            ))),
        }
    }
}
