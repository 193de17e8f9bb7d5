use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// One untyped sheet value.
///
/// Values read back from CSV sheets are always `Text` (or `Empty`); the
/// other variants appear when rows are built from JSON imports or
/// computed by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

/// A sheet row, positionally aligned with the sheet's header row.
pub type RawRow = Vec<Cell>;

/// Date layouts accepted for date-like text cells, most specific first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%d-%b-%Y", "%b %d, %Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

impl Cell {
    /// Text cell, or `Empty` for an empty string.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// Convert a JSON value from a report import into a cell.
    /// Nested arrays/objects are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Cell::Empty,
            serde_json::Value::Bool(b) => Cell::Text(b.to_string()),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Cell::Number(f),
                None => Cell::Text(n.to_string()),
            },
            serde_json::Value::String(s) => Cell::text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Empty, or text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }

    /// Spreadsheet truthiness: non-empty text, non-zero number, any date.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Text(s) => !s.is_empty(),
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Date(_) => true,
        }
    }

    /// Interpret the cell as a calendar date.
    ///
    /// Text is tried against the date layouts the sign-up form and the
    /// sheets produce; date-times keep only their date part.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => parse_date(s.trim()),
            Cell::Empty | Cell::Number(_) => None,
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

// ---------------------------------------------------------------------------
// Contact records
// ---------------------------------------------------------------------------

/// One sign-up, keyed by canonical field name.
///
/// Columns whose canonical name is not a known field land in `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactRecord {
    pub submitted: Cell,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub occupation: String,
    pub age: String,
    pub referer: String,
    pub emergency_name: String,
    pub emergency_phone: String,
    pub interest: String,
    pub designation: String,
    pub expectations: String,
    pub contact_method: String,
    pub contact_method2: String,
    pub experience: String,
    pub promotion: String,
    /// Raw class day cell as submitted.
    pub class_day_raw: Cell,
    /// Parsed class day; `None` when missing or unparseable.
    pub class_day: Option<NaiveDate>,
    pub waiver: String,
    pub verification: String,
    pub groupon: Cell,
    pub payment: String,
    pub login: String,
    pub ip: String,
    pub extra: BTreeMap<String, Cell>,
}

impl ContactRecord {
    /// Store `cell` under the canonical field name `field`.
    /// A later column mapped to the same field overwrites the earlier one.
    pub fn set(&mut self, field: &str, cell: Cell) {
        let slot = match field {
            "submitted" => {
                self.submitted = cell;
                return;
            }
            "groupon" => {
                self.groupon = cell;
                return;
            }
            "class_day" => {
                self.class_day = cell.as_date();
                if self.class_day.is_none() && !cell.is_blank() {
                    log::debug!("unparseable class day {:?}", cell.to_string());
                }
                self.class_day_raw = cell;
                return;
            }
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "address" => &mut self.address,
            "phone" => &mut self.phone,
            "email" => &mut self.email,
            "occupation" => &mut self.occupation,
            "age" => &mut self.age,
            "referer" => &mut self.referer,
            "emergency_name" => &mut self.emergency_name,
            "emergency_phone" => &mut self.emergency_phone,
            "interest" => &mut self.interest,
            "designation" => &mut self.designation,
            "expectations" => &mut self.expectations,
            "contact_method" => &mut self.contact_method,
            "contact_method2" => &mut self.contact_method2,
            "experience" => &mut self.experience,
            "promotion" => &mut self.promotion,
            "waiver" => &mut self.waiver,
            "verification" => &mut self.verification,
            "payment" => &mut self.payment,
            "login" => &mut self.login,
            "ip" => &mut self.ip,
            other => {
                self.extra.insert(other.to_string(), cell);
                return;
            }
        };
        *slot = cell.to_string();
    }

    /// "First Last", as the name column and the contact name show it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Membership length derived from the promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Months {
    Count(u32),
    Observing,
    Intro,
}

impl Months {
    pub fn from_promotion(promotion: &str) -> Self {
        match promotion {
            "One Month" => Months::Count(1),
            "Three Months" => Months::Count(3),
            "Observing" => Months::Observing,
            _ => Months::Intro,
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Months::Count(n) => Some(*n),
            Months::Observing | Months::Intro => None,
        }
    }
}

impl fmt::Display for Months {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Months::Count(n) => write!(f, "{}", n),
            Months::Observing => f.write_str("Observing"),
            Months::Intro => f.write_str("Intro"),
        }
    }
}

/// A contact with its membership notes and dates worked out.
///
/// `months` is `None` only when the contact had no class day; `expires`
/// is empty exactly when `months` is not a count.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedContact {
    pub contact: ContactRecord,
    pub notes: String,
    pub months: Option<Months>,
    pub starts: String,
    pub expires: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cell_empty_string_is_empty() {
        assert_eq!(Cell::text(""), Cell::Empty);
        assert_eq!(Cell::text("x"), Cell::Text("x".into()));
    }

    #[test]
    fn number_display_drops_integer_fraction() {
        assert_eq!(Cell::Number(120.0).to_string(), "120");
        assert_eq!(Cell::Number(49.5).to_string(), "49.5");
    }

    #[test]
    fn as_date_accepts_sheet_layouts() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(Cell::text("2026-03-05").as_date(), Some(d));
        assert_eq!(Cell::text("3/5/2026").as_date(), Some(d));
        assert_eq!(Cell::text("2026-03-05 18:30:00").as_date(), Some(d));
        assert_eq!(Cell::text("2026-03-05T18:30:00-05:00").as_date(), Some(d));
        assert_eq!(Cell::Date(d).as_date(), Some(d));
        assert_eq!(Cell::text("next tuesday").as_date(), None);
        assert_eq!(Cell::Empty.as_date(), None);
    }

    #[test]
    fn truthiness_matches_sheet_semantics() {
        assert!(!Cell::Empty.is_truthy());
        assert!(!Cell::Number(0.0).is_truthy());
        assert!(Cell::text("GRP-123").is_truthy());
        assert!(Cell::Number(7.0).is_truthy());
    }

    #[test]
    fn from_json_keeps_scalars() {
        assert_eq!(Cell::from_json(&serde_json::json!(null)), Cell::Empty);
        assert_eq!(Cell::from_json(&serde_json::json!(3)), Cell::Number(3.0));
        assert_eq!(Cell::from_json(&serde_json::json!("a")), Cell::text("a"));
        assert_eq!(Cell::from_json(&serde_json::json!(true)), Cell::text("true"));
        assert_eq!(
            Cell::from_json(&serde_json::json!(["a", 1])),
            Cell::text("[\"a\",1]")
        );
    }

    #[test]
    fn set_routes_unknown_fields_to_extra() {
        let mut c = ContactRecord::default();
        c.set("email", Cell::text("a@x.com"));
        c.set("not_used", Cell::text("Tuesday"));
        c.set("class_day", Cell::text("2026-11-03"));
        assert_eq!(c.email, "a@x.com");
        assert_eq!(c.extra.get("not_used"), Some(&Cell::text("Tuesday")));
        assert_eq!(c.class_day, NaiveDate::from_ymd_opt(2026, 11, 3));
    }

    #[test]
    fn months_from_promotion() {
        assert_eq!(Months::from_promotion("One Month"), Months::Count(1));
        assert_eq!(Months::from_promotion("Three Months"), Months::Count(3));
        assert_eq!(Months::from_promotion("Observing"), Months::Observing);
        assert_eq!(Months::from_promotion("Introduction Class"), Months::Intro);
        assert_eq!(Months::Intro.to_string(), "Intro");
        assert_eq!(Months::Count(3).to_string(), "3");
    }
}
