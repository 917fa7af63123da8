//! Inputs for the single-row seed operations
//!
//! Every field left unset falls back to the fixture default when the row is
//! inserted, so `AdminSeed::default()` and `MemberSeed::default()` describe the
//! canonical test admin and test member.

use std::fmt;

use crate::defaults::{ADMIN_EMAIL, ADMIN_FIRST_NAME, ADMIN_LAST_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminRole {
    #[default]
    SuperAdmin,
    Editor,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Editor => "editor",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "editor" => Ok(AdminRole::Editor),
            other => Err(format!("Unknown admin role: {other}")),
        }
    }
}

/// Administrator account; unset or empty fields take the fixture defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: AdminRole,
}

impl AdminSeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn first_name<S: Into<String>>(mut self, first_name: S) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name<S: Into<String>>(mut self, last_name: S) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn role(mut self, role: AdminRole) -> Self {
        self.role = role;
        self
    }

    pub(crate) fn resolved_email(&self) -> &str {
        non_empty(&self.email).unwrap_or(ADMIN_EMAIL)
    }

    pub(crate) fn resolved_first_name(&self) -> &str {
        non_empty(&self.first_name).unwrap_or(ADMIN_FIRST_NAME)
    }

    pub(crate) fn resolved_last_name(&self) -> &str {
        non_empty(&self.last_name).unwrap_or(ADMIN_LAST_NAME)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberStatus {
    Pending,
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "pending",
            MemberStatus::Active => "active",
            MemberStatus::Expired => "expired",
            MemberStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MemberStatus::Pending),
            "active" => Ok(MemberStatus::Active),
            "expired" => Ok(MemberStatus::Expired),
            "cancelled" => Ok(MemberStatus::Cancelled),
            other => Err(format!("Unknown member status: {other}")),
        }
    }
}

/// A non-admin membership record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSeed {
    pub first_name: String,
    pub last_name: String,
    /// Randomised placeholder when unset
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    /// Store's configured year when unset
    pub membership_year: Option<i32>,
    /// Derived from the member count when unset
    pub member_number: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_zip: Option<String>,
    pub notes: Option<String>,
}

impl Default for MemberSeed {
    fn default() -> Self {
        Self {
            first_name: "Test".to_string(),
            last_name: "Member".to_string(),
            email: None,
            phone: None,
            status: MemberStatus::Active,
            membership_year: None,
            member_number: None,
            address_street: None,
            address_city: None,
            address_state: Some("MT".to_string()),
            address_zip: None,
            notes: None,
        }
    }
}

impl MemberSeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<String>>(mut self, first_name: S, last_name: S) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn membership_year(mut self, year: i32) -> Self {
        self.membership_year = Some(year);
        self
    }

    pub fn member_number<S: Into<String>>(mut self, number: S) -> Self {
        self.member_number = Some(number.into());
        self
    }

    pub fn address<S: Into<String>>(mut self, street: S, city: S, state: S, zip: S) -> Self {
        self.address_street = Some(street.into());
        self.address_city = Some(city.into());
        self.address_state = Some(state.into());
        self.address_zip = Some(zip.into());
        self
    }

    pub fn notes<S: Into<String>>(mut self, notes: S) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A payment attached to an existing member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSeed {
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub description: String,
    pub payment_method: String,
    pub stripe_session_id: Option<String>,
    pub stripe_payment_intent: Option<String>,
}

impl Default for PaymentSeed {
    fn default() -> Self {
        Self {
            amount_cents: 2500,
            currency: "usd".to_string(),
            status: "completed".to_string(),
            description: "Membership dues".to_string(),
            payment_method: "stripe".to_string(),
            stripe_session_id: None,
            stripe_payment_intent: None,
        }
    }
}

impl PaymentSeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount_cents(mut self, amount: i64) -> Self {
        self.amount_cents = amount;
        self
    }

    pub fn status<S: Into<String>>(mut self, status: S) -> Self {
        self.status = status.into();
        self
    }

    pub fn stripe_session<S: Into<String>>(mut self, session_id: S) -> Self {
        self.stripe_session_id = Some(session_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_seed_defaults() {
        let seed = AdminSeed::new();

        assert_eq!(seed.resolved_email(), "admin@test.example.com");
        assert_eq!(seed.resolved_first_name(), "Test");
        assert_eq!(seed.resolved_last_name(), "Admin");
        assert_eq!(seed.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_admin_seed_overrides_only_given_fields() {
        let seed = AdminSeed::new().email("editor@test.example.com").role(AdminRole::Editor);

        assert_eq!(seed.resolved_email(), "editor@test.example.com");
        assert_eq!(seed.resolved_first_name(), "Test");
        assert_eq!(seed.role.as_str(), "editor");
    }

    #[test]
    fn test_admin_seed_empty_values_fall_back() {
        let seed = AdminSeed::new().email("").first_name("").last_name("Jones");

        assert_eq!(seed.resolved_email(), "admin@test.example.com");
        assert_eq!(seed.resolved_first_name(), "Test");
        assert_eq!(seed.resolved_last_name(), "Jones");
    }

    #[test]
    fn test_role_and_status_parse() {
        assert_eq!("super_admin".parse::<AdminRole>(), Ok(AdminRole::SuperAdmin));
        assert!("owner".parse::<AdminRole>().is_err());
        assert_eq!("Expired".parse::<MemberStatus>(), Ok(MemberStatus::Expired));
    }

    #[test]
    fn test_member_seed_defaults() {
        let seed = MemberSeed::default();

        assert_eq!(seed.first_name, "Test");
        assert_eq!(seed.last_name, "Member");
        assert_eq!(seed.status, MemberStatus::Active);
        assert_eq!(seed.address_state.as_deref(), Some("MT"));
        assert!(seed.email.is_none());
        assert!(seed.member_number.is_none());
    }
}
