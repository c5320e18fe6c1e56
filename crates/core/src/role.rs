//! Role entity: a named category with a display color.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::RoleId;
use crate::value_object::ValueObject;

/// Color seeded into an empty role form.
pub const DEFAULT_ROLE_COLOR: &str = "#3B82F6";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// Role record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub color: String,
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> RoleId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Normalized hex color (`#RRGGBB`, upper case).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleColor(String);

impl ValueObject for RoleColor {}

impl RoleColor {
    /// Accepts `#RGB` or `#RRGGBB` in any case; short form is expanded.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .filter(|h| (h.len() == 3 || h.len() == 6) && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| DomainError::validation("color", "expected a hex color like #1A2B3C"))?;

        let upper = hex.to_ascii_uppercase();
        let expanded = if upper.len() == 3 {
            upper.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            upper
        };
        Ok(Self(format!("#{expanded}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RoleColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable role form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleForm {
    pub name: String,
    pub color: String,
}

impl Default for RoleForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: DEFAULT_ROLE_COLOR.to_string(),
        }
    }
}

impl From<&Role> for RoleForm {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            color: role.color.clone(),
        }
    }
}

/// Wire shape for role create/update: `{name, color}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    pub color: String,
}

impl RoleForm {
    /// Normalize into the wire payload.
    ///
    /// The name is trimmed and title-cased and must be 2..=50 characters.
    pub fn to_payload(&self) -> DomainResult<RolePayload> {
        let name = title_case(self.name.trim());
        let len = name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(DomainError::validation(
                "name",
                format!("must be between {NAME_MIN} and {NAME_MAX} characters"),
            ));
        }
        let color = RoleColor::parse(&self.color)?;
        Ok(RolePayload {
            name,
            color: color.as_str().to_string(),
        })
    }
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
