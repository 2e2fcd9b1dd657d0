//! Expense categories and the free-text lookup table used by chat input.

use serde::{Deserialize, Serialize};

use crate::util::normalize_key;

/// Canonical expense categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Fuel,
    Maintenance,
    Fines,
    #[default]
    Other,
}

/// Normalized spellings (see `normalize_key`) and the category they map to.
/// Accented and unaccented variants collapse to the same key.
const ALIASES: &[(&str, ExpenseKind)] = &[
    ("combustivel", ExpenseKind::Fuel),
    ("fuel", ExpenseKind::Fuel),
    ("gasoleo", ExpenseKind::Fuel),
    ("gasolina", ExpenseKind::Fuel),
    ("diesel", ExpenseKind::Fuel),
    ("manutencao", ExpenseKind::Maintenance),
    ("maintenance", ExpenseKind::Maintenance),
    ("reparacao", ExpenseKind::Maintenance),
    ("multas", ExpenseKind::Fines),
    ("multa", ExpenseKind::Fines),
    ("fines", ExpenseKind::Fines),
    ("fine", ExpenseKind::Fines),
    ("outros", ExpenseKind::Other),
    ("outro", ExpenseKind::Other),
    ("other", ExpenseKind::Other),
];

impl ExpenseKind {
    pub const ALL: [ExpenseKind; 4] = [
        ExpenseKind::Fuel,
        ExpenseKind::Maintenance,
        ExpenseKind::Fines,
        ExpenseKind::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Maintenance => "maintenance",
            Self::Fines => "fines",
            Self::Other => "other",
        }
    }

    /// Portuguese label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fuel => "Combustível",
            Self::Maintenance => "Manutenção",
            Self::Fines => "Multas",
            Self::Other => "Outros",
        }
    }

    /// Maps a free-text label to a category. Unknown or missing labels are
    /// `Other`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(key) = label.and_then(normalize_key) else {
            return Self::Other;
        };
        ALIASES
            .iter()
            .find_map(|(alias, kind)| (*alias == key).then_some(*kind))
            .unwrap_or(Self::Other)
    }
}
