//! # Customer Types
//!
//! Customer records handed to every use case by reference.

use serde::{Deserialize, Serialize};

/// How a customer can be reached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Contact info with no channels
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder: set phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Email, treating a blank string as absent
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Phone, treating a blank string as absent
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    /// Check if at least one channel is usable
    pub fn is_reachable(&self) -> bool {
        self.email().is_some() || self.phone().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    /// Display name
    pub name: String,

    /// Contact channels
    #[serde(default)]
    pub contact_info: ContactInfo,
}

impl CustomerData {
    pub fn new(name: impl Into<String>, contact_info: ContactInfo) -> Self {
        Self {
            name: name.into(),
            contact_info,
        }
    }
}
