use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Dataset, Passenger};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – Kaggle/plotly column layout (`PassengerId`, `Survived`, …)
/// * `.json` – `[{ "passenger_id": 1, "survived": 0, ...}, ...]` with the
///   renamed column keys
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Source column names as shipped in the Kaggle/plotly file. They are renamed
/// on load (`Pclass` → class, `Embarked` → embark_town, and so on); the rest
/// of the crate only ever sees the renamed schema.
const CSV_COLUMNS: [&str; 12] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Ticket",
    "Fare",
    "Cabin",
    "Embarked",
];

fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_csv(reader)
}

/// Parse an open CSV reader into a [`Dataset`]. Split from [`load_csv`] so
/// tests can feed in-memory data.
pub fn parse_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Resolve every required column up front; extra columns are ignored.
    let mut idx = [0usize; CSV_COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(CSV_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))?;
    }
    let [id_i, surv_i, class_i, name_i, sex_i, age_i, sibsp_i, parch_i, ticket_i, fare_i, cabin_i, embark_i] =
        idx;

    let mut passengers = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim();

        let passenger = Passenger {
            passenger_id: cell(id_i)
                .parse()
                .with_context(|| format!("Row {row_no}: bad PassengerId"))?,
            survived: parse_survived(cell(surv_i))
                .with_context(|| format!("Row {row_no}: bad Survived"))?,
            class: cell(class_i).to_string(),
            name: cell(name_i).to_string(),
            sex: cell(sex_i).to_string(),
            age: parse_optional_f64(cell(age_i))
                .with_context(|| format!("Row {row_no}: bad Age"))?,
            sibsp: cell(sibsp_i)
                .parse()
                .with_context(|| format!("Row {row_no}: bad SibSp"))?,
            parch: cell(parch_i)
                .parse()
                .with_context(|| format!("Row {row_no}: bad Parch"))?,
            ticket: cell(ticket_i).to_string(),
            fare: cell(fare_i)
                .parse()
                .with_context(|| format!("Row {row_no}: bad Fare"))?,
            cabin: non_empty(cell(cabin_i)),
            embark_town: non_empty(cell(embark_i)),
        };

        passengers.push(passenger);
    }

    Ok(Dataset::from_passengers(passengers))
}

fn parse_survived(s: &str) -> Result<bool> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        other => bail!("'{other}' is not 0 or 1"),
    }
}

fn parse_optional_f64(s: &str) -> Result<Option<f64>> {
    if s.is_empty() {
        return Ok(None);
    }
    let v = s
        .parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))?;
    Ok(Some(v))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, renamed keys):
///
/// ```json
/// [
///   {
///     "passenger_id": 1,
///     "survived": 0,
///     "class": "3",
///     "name": "Braund, Mr. Owen Harris",
///     "sex": "male",
///     "age": 22.0,
///     "sibsp": 1,
///     "parch": 0,
///     "ticket": "A/5 21171",
///     "fare": 7.25,
///     "cabin": null,
///     "embark_town": "S"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// One record as serialized by `df.to_json(orient='records')` after the
/// column rename.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    passenger_id: i64,
    survived: u8,
    /// pandas exports class labels as numbers; accept both spellings.
    class: ClassLabel,
    name: String,
    sex: String,
    #[serde(default)]
    age: Option<f64>,
    sibsp: u32,
    parch: u32,
    ticket: String,
    fare: f64,
    #[serde(default)]
    cabin: Option<String>,
    #[serde(default)]
    embark_town: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassLabel {
    Text(String),
    Number(i64),
}

impl From<ClassLabel> for String {
    fn from(label: ClassLabel) -> String {
        match label {
            ClassLabel::Text(s) => s,
            ClassLabel::Number(n) => n.to_string(),
        }
    }
}

impl From<JsonRecord> for Passenger {
    fn from(rec: JsonRecord) -> Passenger {
        Passenger {
            passenger_id: rec.passenger_id,
            survived: rec.survived != 0,
            class: rec.class.into(),
            name: rec.name,
            sex: rec.sex,
            age: rec.age,
            sibsp: rec.sibsp,
            parch: rec.parch,
            ticket: rec.ticket,
            fare: rec.fare,
            cabin: rec.cabin.filter(|s| !s.is_empty()),
            embark_town: rec.embark_town.filter(|s| !s.is_empty()),
        }
    }
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let records: Vec<JsonRecord> = serde_json::from_str(text).context("parsing JSON")?;
    let passengers = records.into_iter().map(Passenger::from).collect();
    Ok(Dataset::from_passengers(passengers))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,7.925,,S
";

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn csv_parses_and_renames_columns() {
        let ds = parse_csv(reader(SAMPLE_CSV)).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.passengers[0];
        assert_eq!(first.passenger_id, 1);
        assert!(!first.survived);
        assert_eq!(first.class, "3");
        assert_eq!(first.name, "Braund, Mr. Owen Harris");
        assert_eq!(first.sex, "male");
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.fare, 7.25);
        assert_eq!(first.cabin, None);
        assert_eq!(first.embark_town.as_deref(), Some("S"));
    }

    #[test]
    fn csv_empty_cells_parse_to_missing() {
        let ds = parse_csv(reader(SAMPLE_CSV)).unwrap();
        let third = &ds.passengers[2];
        assert_eq!(third.age, None);
        assert_eq!(third.cabin, None);
    }

    #[test]
    fn csv_class_labels_are_sorted_and_distinct() {
        let ds = parse_csv(reader(SAMPLE_CSV)).unwrap();
        assert_eq!(ds.class_labels, vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let data = "PassengerId,Survived\n1,0\n";
        let err = parse_csv(reader(data)).unwrap_err();
        assert!(err.to_string().contains("Pclass"));
    }

    #[test]
    fn csv_bad_survived_is_an_error() {
        let data = SAMPLE_CSV.replace("1,0,3", "1,yes,3");
        assert!(parse_csv(reader(&data)).is_err());
    }

    #[test]
    fn json_records_round_out_the_same_dataset() {
        let text = r#"[
            {"passenger_id": 1, "survived": 0, "class": 3,
             "name": "Braund, Mr. Owen Harris", "sex": "male", "age": 22.0,
             "sibsp": 1, "parch": 0, "ticket": "A/5 21171", "fare": 7.25,
             "cabin": null, "embark_town": "S"},
            {"passenger_id": 3, "survived": 1, "class": "3",
             "name": "Heikkinen, Miss. Laina", "sex": "female", "age": null,
             "sibsp": 0, "parch": 0, "ticket": "STON/O2. 3101282",
             "fare": 7.925, "cabin": null, "embark_town": "S"}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.passengers[0].class, "3");
        assert!(ds.passengers[1].survived);
        assert_eq!(ds.passengers[1].age, None);
        assert_eq!(ds.class_labels, vec!["3".to_string()]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("parquet"));
    }
}
