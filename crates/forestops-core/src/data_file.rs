use std::cmp::Ordering;
use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Draft, Record, SortKey};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    pub last_updated: NaiveDate,
}

impl DataFile {
    pub fn details(&self) -> String {
        format!(
            "Name: {}\nType: {}\nSize: {}\nLast Updated: {}",
            self.name,
            self.kind,
            self.size,
            validate::format_date(self.last_updated)
        )
    }
}

/// Upper-cased text after the last dot; a name without a dot is its own kind.
pub fn kind_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFileSort {
    Name,
    Date,
}

impl SortKey for DataFileSort {
    const ALL: &'static [Self] = &[DataFileSort::Name, DataFileSort::Date];

    fn label(&self) -> &'static str {
        match self {
            DataFileSort::Name => "Name",
            DataFileSort::Date => "Date",
        }
    }
}

impl Record for DataFile {
    type Status = Infallible;
    type Key = DataFileSort;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn compare(&self, other: &Self, key: DataFileSort) -> Ordering {
        match key {
            DataFileSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            DataFileSort::Date => self.last_updated.cmp(&other.last_updated),
        }
    }
}

/// A picked file waiting for upload confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub name: String,
    pub on: NaiveDate,
}

impl Draft<DataFile> for Upload {
    fn build(self) -> Result<DataFile, ForestError> {
        let name = validate::required(&self.name, "No file selected")?;
        Ok(DataFile {
            id: String::new(),
            kind: kind_of(&name),
            name,
            size: "0 KB".to_string(),
            last_updated: self.on,
        })
    }
}
