//! Records and datasets.
//!
//! A [`Dataset`] is an ordered sequence of [`Record`]s. Records keep their
//! fields in insertion order so the schema of a dataset loaded from JSON or
//! CSV lists columns in the order the source file does.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use super::value::CellValue;
use crate::error::GridfmtError;
use crate::Result;

static NULL: CellValue = CellValue::Null;

/// One row of a dataset: field name to scalar value, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a field and return the record.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field. An existing field keeps its position and takes the new value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Value of a field, reading missing fields as null.
    pub fn value(&self, field: &str) -> &CellValue {
        self.get(field).unwrap_or(&NULL)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a record mapping field names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((field, value)) = access.next_entry::<String, CellValue>()? {
            record.insert(field, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// An ordered sequence of records, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of all field names, in first-seen order.
    pub fn schema(&self) -> Vec<String> {
        let mut schema: Vec<String> = Vec::new();
        for record in &self.records {
            for field in record.fields() {
                if !schema.iter().any(|known| known == field) {
                    schema.push(field.to_string());
                }
            }
        }
        schema
    }

    /// Whether at least one record carries the field.
    pub fn has_field(&self, field: &str) -> bool {
        self.records.iter().any(|record| record.contains(field))
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON array of records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read CSV with a header row, inferring numbers and nulls per cell.
    ///
    /// Short rows are allowed: missing trailing cells are null. Cells past
    /// the last header are dropped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record: Record = headers
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    let value = row.get(index).map_or(CellValue::Null, CellValue::infer);
                    (field, value)
                })
                .collect();
            records.push(record);
        }
        Ok(Self::new(records))
    }

    /// Load a dataset from a `.json` or `.csv` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GridfmtError::PathNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let file = File::open(path).map_err(|source| GridfmtError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let dataset = match extension.as_deref() {
            Some("json") => Self::from_json_reader(reader)?,
            Some("csv") => Self::from_csv_reader(reader)?,
            _ => return Err(GridfmtError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            records = dataset.len(),
            fields = dataset.schema().len(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const GAPMINDER_JSON: &str = r#"[
        {"country": "Afghanistan", "continent": "Asia", "year": 1952, "lifeExp": 28.801, "pop": 8425333, "gdpPercap": 779.4453145},
        {"country": "Albania", "continent": "Europe", "year": 1952, "lifeExp": 55.23, "pop": 1282697, "gdpPercap": 1601.056136}
    ]"#;

    #[test]
    fn test_record_keeps_insertion_order() {
        let record = Record::new().with("b", 1.0).with("a", 2.0).with("b", 3.0);
        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.value("b"), &CellValue::Number(3.0));
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let record = Record::new().with("a", 1.0);
        assert!(record.value("missing").is_null());
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_schema_first_seen_order() {
        let dataset = Dataset::new(vec![
            Record::new().with("country", "A").with("pop", 1.0),
            Record::new().with("year", 1952.0).with("country", "B"),
        ]);
        assert_eq!(dataset.schema(), vec!["country", "pop", "year"]);
        assert!(dataset.has_field("year"));
        assert!(!dataset.has_field("nonexistent"));
    }

    #[test]
    fn test_json_preserves_key_order() {
        let dataset = Dataset::from_json_str(GAPMINDER_JSON).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.schema(),
            vec!["country", "continent", "year", "lifeExp", "pop", "gdpPercap"]
        );
        assert_eq!(
            dataset.records()[1].value("pop"),
            &CellValue::Number(1282697.0)
        );
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let dataset = Dataset::from_json_str(GAPMINDER_JSON).unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.starts_with(r#"[{"country":"Afghanistan","continent":"Asia","year":1952"#));
    }

    #[test]
    fn test_json_rejects_nested_values() {
        let result = Dataset::from_json_str(r#"[{"a": {"nested": 1}}]"#);
        assert!(matches!(result, Err(GridfmtError::Json(_))));
    }

    #[test]
    fn test_csv_infers_types() {
        let csv = "country,year,lifeExp\nAfghanistan,1952,28.801\nAlbania,,55.23\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.schema(), vec!["country", "year", "lifeExp"]);
        let albania = &dataset.records()[1];
        assert_eq!(albania.value("country"), &CellValue::Text("Albania".into()));
        assert!(albania.value("year").is_null());
        assert_eq!(albania.value("lifeExp"), &CellValue::Number(55.23));

        let ragged = "country,year,lifeExp\nAlgeria,1952\nAngola\nBenin,1952,38.2,extra\n";
        let dataset = Dataset::from_csv_reader(ragged.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.schema(), vec!["country", "year", "lifeExp"]);
        let algeria = &dataset.records()[0];
        assert_eq!(algeria.value("year"), &CellValue::Number(1952.0));
        assert!(algeria.contains("lifeExp"));
        assert!(algeria.value("lifeExp").is_null());
        assert!(dataset.records()[1].value("year").is_null());
        assert_eq!(dataset.records()[2].len(), 3);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("data.json");
        fs::write(&json_path, GAPMINDER_JSON).unwrap();
        let csv_path = dir.path().join("data.csv");
        fs::write(&csv_path, "a,b\n1,x\n").unwrap();

        assert_eq!(Dataset::load(&json_path).unwrap().len(), 2);
        assert_eq!(Dataset::load(&csv_path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Dataset::load(&missing),
            Err(GridfmtError::PathNotFound(_))
        ));

        let txt = dir.path().join("data.txt");
        fs::write(&txt, "a,b\n").unwrap();
        assert!(matches!(
            Dataset::load(&txt),
            Err(GridfmtError::UnsupportedFormat(_))
        ));
    }
}
