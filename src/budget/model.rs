use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type PeriodId = i64;
pub type ExpenseId = i64;

/// The whole budget document. It is always saved as one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetData {
    #[serde(default)]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub period_id: PeriodId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    /// ISO calendar date, `YYYY-MM-DD`. Kept verbatim so user edits round-trip.
    #[serde(default)]
    pub date: String,
    pub status: ExpenseStatus,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: i64,
    #[serde(default)]
    pub period_id: Option<PeriodId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Oplacony,
    Zaplanowany,
}

impl Default for ExpenseStatus {
    fn default() -> Self {
        ExpenseStatus::Oplacony
    }
}

impl ExpenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Oplacony => "Opłacony",
            Self::Zaplanowany => "Zaplanowany",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Oplacony => Self::Zaplanowany,
            Self::Zaplanowany => Self::Oplacony,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rachunki,
    Zakupy,
    Hobby,
    Inne,
}

impl Default for Category {
    fn default() -> Self {
        Category::Rachunki
    }
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Rachunki,
        Category::Zakupy,
        Category::Hobby,
        Category::Inne,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rachunki => "Rachunki",
            Self::Zakupy => "Zakupy",
            Self::Hobby => "Hobby",
            Self::Inne => "Inne",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Rachunki => 0,
            Self::Zakupy => 1,
            Self::Hobby => 2,
            Self::Inne => 3,
        }
    }
}

/// Currency amount. Written as a JSON number; read leniently, anything
/// that is not a number or a numeric string counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(pub Decimal);

impl Money {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Money)
            .unwrap_or_default()
    }

    fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Number(n) => Self::parse_lenient(&n.to_string()),
            serde_json::Value::String(s) => Self::parse_lenient(s),
            _ => Self::zero(),
        }
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money(d)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // exact decimal text, carried through by serde_json's arbitrary_precision
        let n = serde_json::Number::from_str(&self.0.normalize().to_string())
            .map_err(serde::ser::Error::custom)?;
        n.serialize(serializer)
    }
}

/// `a + b`, pinned to the representable range instead of overflowing.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `a - b`, pinned to the representable range instead of overflowing.
pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = serde_json::Value::deserialize(deserializer)?;
        Ok(Money::from_json(&v))
    }
}
