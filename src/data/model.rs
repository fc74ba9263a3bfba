use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell value pulled out of a passenger record
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Charts group and colour by these, so the
/// type must be `Ord` to key `BTreeMap` / `BTreeSet` downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Int(_) => 1,
                Float(_) => 2,
                Str(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Str(a), Str(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Str(s) => s.hash(state),
            FieldValue::Int(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Null => write!(f, "<missing>"),
        }
    }
}

impl FieldValue {
    /// Try to interpret the value as an `f64` for a linear axis.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Field – the closed set of plottable columns
// ---------------------------------------------------------------------------

/// The columns a chart can plot, group, or colour by. Identifier columns
/// (ticket, cabin, passenger_id, sibsp, parch) are carried in the record but
/// never plotted, so they are not in this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Fare,
    Class,
    Sex,
    Survived,
    EmbarkTown,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Age,
        Field::Fare,
        Field::Class,
        Field::Sex,
        Field::Survived,
        Field::EmbarkTown,
    ];

    /// Column name as it appears in the dataset.
    pub fn key(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Fare => "fare",
            Field::Class => "class",
            Field::Sex => "sex",
            Field::Survived => "survived",
            Field::EmbarkTown => "embark_town",
        }
    }

    /// Column name with the first letter upper-cased, for chart titles.
    pub fn title(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Numeric fields get a linear axis; the rest get ordinal positions.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Age | Field::Fare | Field::Survived)
    }

    /// Pull this field's value out of a record.
    pub fn value(self, p: &Passenger) -> FieldValue {
        match self {
            Field::Age => match p.age {
                Some(age) => FieldValue::Float(age),
                None => FieldValue::Null,
            },
            Field::Fare => FieldValue::Float(p.fare),
            Field::Class => FieldValue::Str(p.class.clone()),
            Field::Sex => FieldValue::Str(p.sex.clone()),
            Field::Survived => FieldValue::Int(i64::from(p.survived)),
            Field::EmbarkTown => match &p.embark_town {
                Some(town) => FieldValue::Str(town.clone()),
                None => FieldValue::Null,
            },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the dataset
// ---------------------------------------------------------------------------

/// A single passenger record (one row of the source table).
#[derive(Debug, Clone)]
pub struct Passenger {
    pub passenger_id: i64,
    pub survived: bool,
    /// Class label as found in the file ("1", "2", "3").
    pub class: String,
    pub name: String,
    pub sex: String,
    /// Missing for roughly a fifth of the real dataset.
    pub age: Option<f64>,
    pub sibsp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: f64,
    pub cabin: Option<String>,
    pub embark_town: Option<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after load; every view downstream is a
/// row-index subset recomputed from scratch.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All passengers (rows), in file order.
    pub passengers: Vec<Passenger>,
    /// Sorted distinct class labels, drives the class checklist.
    pub class_labels: Vec<String>,
}

impl Dataset {
    /// Build the class-label index from the loaded rows.
    pub fn from_passengers(passengers: Vec<Passenger>) -> Self {
        let labels: BTreeSet<String> =
            passengers.iter().map(|p| p.class.clone()).collect();
        Dataset {
            passengers,
            class_labels: labels.into_iter().collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}
