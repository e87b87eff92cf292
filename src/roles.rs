use serde::{Deserialize, Serialize};

/// Role label synthesized when the detector never produced a profile.
pub const GENERIC_ROLE: &str = "GENERIC";

/// Closed set of roles the weight model and benchmark tables understand.
/// Roles are never inferred here; they arrive from the external
/// role-detection component as labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Gk,
    Cb,
    Fullback,
    Midfielder,
    Winger,
    Attacker,
    Generic,
}

impl Role {
    /// Map a detector label onto the closed set. Unknown labels resolve
    /// to [`Role::Generic`] so every role string grades with *some*
    /// weight table.
    pub fn from_label(raw: &str) -> Role {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GK" | "GOALKEEPER" | "KEEPER" => Role::Gk,
            "CB" | "CENTREBACK" | "CENTERBACK" | "CENTRE-BACK" | "CENTER-BACK" => Role::Cb,
            "FULLBACK" | "WINGBACK" | "LB" | "RB" | "LWB" | "RWB" => Role::Fullback,
            "MIDFIELDER" | "CM" | "CDM" | "DM" | "CAM" | "AM" => Role::Midfielder,
            "WINGER" | "LW" | "RW" | "LM" | "RM" => Role::Winger,
            "ATTACKER" | "STRIKER" | "FORWARD" | "ST" | "CF" => Role::Attacker,
            _ => Role::Generic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Gk => "GK",
            Role::Cb => "CB",
            Role::Fullback => "FULLBACK",
            Role::Midfielder => "MIDFIELDER",
            Role::Winger => "WINGER",
            Role::Attacker => "ATTACKER",
            Role::Generic => GENERIC_ROLE,
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        matches!(self, Role::Gk)
    }
}

/// Role assignment consumed from the external role-detection component.
/// `role_confidence` is 0..=1; low confidence triggers secondary-role
/// blending during grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub primary_role: String,
    #[serde(default)]
    pub secondary_role: Option<String>,
    pub role_confidence: f64,
}

/// Whatever shape the store holds for the role-profile field. Older
/// detector versions wrote a bare role string instead of the structured
/// object; both deserialize here and normalize via
/// [`resolve_role_profile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRoleProfile {
    Full(RoleProfile),
    Legacy(String),
}

/// Normalize a stored role profile into the full shape. Missing and
/// legacy-string profiles synthesize a fully-confident profile; an empty
/// primary label falls back to [`GENERIC_ROLE`].
pub fn resolve_role_profile(stored: Option<&StoredRoleProfile>) -> RoleProfile {
    match stored {
        Some(StoredRoleProfile::Full(profile)) => {
            let mut profile = profile.clone();
            if profile.primary_role.trim().is_empty() {
                profile.primary_role = GENERIC_ROLE.to_string();
            }
            profile
        }
        Some(StoredRoleProfile::Legacy(label)) => RoleProfile {
            primary_role: if label.trim().is_empty() {
                GENERIC_ROLE.to_string()
            } else {
                label.clone()
            },
            secondary_role: None,
            role_confidence: 1.0,
        },
        None => RoleProfile {
            primary_role: GENERIC_ROLE.to_string(),
            secondary_role: None,
            role_confidence: 1.0,
        },
    }
}
