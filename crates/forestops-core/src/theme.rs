use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A plain 24-bit colour; renderers map it onto their own colour type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    Forestry,
    Emergency,
    Admin,
}

impl ThemeName {
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Forestry => "Forestry",
            ThemeName::Emergency => "Emergency",
            ThemeName::Admin => "Admin",
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Manager | Role::FieldOperative | Role::GisSpecialist => ThemeName::Forestry,
            Role::EmergencyCoordinator => ThemeName::Emergency,
            Role::Administrator => ThemeName::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub text: Rgb,
    pub surface: Rgb,
    pub muted: Rgb,
}

impl Palette {
    pub const FORESTRY: Palette = Palette {
        primary: Rgb(0x2E, 0x7D, 0x32),
        accent: Rgb(0x81, 0xC7, 0x84),
        background: Rgb(0xE8, 0xF5, 0xE9),
        text: Rgb(0x1B, 0x5E, 0x20),
        surface: Rgb(0xC8, 0xE6, 0xC9),
        muted: Rgb(0x99, 0x99, 0x99),
    };

    pub const EMERGENCY: Palette = Palette {
        primary: Rgb(0xD3, 0x2F, 0x2F),
        accent: Rgb(0xFF, 0x8A, 0x80),
        background: Rgb(0xFF, 0xEB, 0xEE),
        text: Rgb(0xB7, 0x1C, 0x1C),
        surface: Rgb(0xFF, 0xCD, 0xD2),
        muted: Rgb(0x99, 0x99, 0x99),
    };

    pub const ADMIN: Palette = Palette {
        primary: Rgb(0x19, 0x76, 0xD2),
        accent: Rgb(0x64, 0xB5, 0xF6),
        background: Rgb(0xE3, 0xF2, 0xFD),
        text: Rgb(0x0D, 0x47, 0xA1),
        surface: Rgb(0xBB, 0xDE, 0xFB),
        muted: Rgb(0x99, 0x99, 0x99),
    };
}

/// Fixed accents shared by every palette.
pub mod accents {
    use super::Rgb;

    pub const HIGH: Rgb = Rgb(0xF4, 0x43, 0x36);
    pub const MEDIUM: Rgb = Rgb(0xFB, 0x8C, 0x00);
    pub const LOW: Rgb = Rgb(0x4C, 0xAF, 0x50);

    pub const PENDING: Rgb = Rgb(0xFF, 0xA0, 0x00);
    pub const ACTIVE: Rgb = Rgb(0x1E, 0x88, 0xE5);
    pub const DONE: Rgb = Rgb(0x43, 0xA0, 0x47);
    pub const ALERT: Rgb = Rgb(0xF4, 0x43, 0x36);
}

/// The styling context handed to every renderer. Owned by the app, never global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: Palette,
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        let palette = match name {
            ThemeName::Forestry => Palette::FORESTRY,
            ThemeName::Emergency => Palette::EMERGENCY,
            ThemeName::Admin => Palette::ADMIN,
        };
        Self { name, palette }
    }

    pub fn for_role(role: Role) -> Self {
        Self::named(ThemeName::for_role(role))
    }

    pub fn set_for(&mut self, role: Role) {
        *self = Self::for_role(role);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named(ThemeName::Forestry)
    }
}
