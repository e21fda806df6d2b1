use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// One weighted category of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub value: f64,
    pub color: Color,
}

impl CategoryRecord {
    pub fn new(value: f64, color: Color) -> ChartResult<Self> {
        let record = Self { value, color };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_value(self.value)?;
        self.color.validate()
    }
}

/// Addresses a category either by sequence position or by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryRef {
    Index(usize),
    Label(String),
}

impl CategoryRef {
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Label(label) => write!(f, "`{label}`"),
        }
    }
}

/// Ordered, label-keyed category sequence.
///
/// Insertion order is the angular order of the chart: the first record starts
/// at angle 0 and each following record continues where the previous ended.
/// Records are validated on the way in so nothing downstream ever sees a
/// negative or non-finite value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorDataModel {
    records: IndexMap<String, CategoryRecord>,
}

impl SectorDataModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-slice dataset the chart opens with.
    #[must_use]
    pub fn reference_dataset() -> Self {
        let mut records = IndexMap::with_capacity(3);
        for (label, value, color) in [
            ("value 1", 25.0, Color::from_rgb8(0x00, 0x62, 0x43)),
            ("value 2", 10.0, Color::from_rgb8(0x1a, 0x91, 0x5d)),
            ("value 3", 30.0, Color::from_rgb8(0x56, 0xc2, 0x78)),
        ] {
            records.insert(label.to_owned(), CategoryRecord { value, color });
        }
        Self { records }
    }

    pub fn from_records<I, L>(records: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (L, CategoryRecord)>,
        L: Into<String>,
    {
        let mut model = Self::new();
        for (label, record) in records {
            model.push(label, record)?;
        }
        Ok(model)
    }

    /// Appends a category at the end of the sequence.
    pub fn push(&mut self, label: impl Into<String>, record: CategoryRecord) -> ChartResult<()> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ChartError::invalid_configuration(
                "category label must not be empty",
            ));
        }
        if self.records.contains_key(&label) {
            return Err(ChartError::invalid_configuration(format!(
                "category `{label}` is already present"
            )));
        }
        record.validate()?;
        self.records.insert(label, record);
        Ok(())
    }

    /// Removes a category, shifting every later record one slot back.
    pub fn remove(&mut self, target: &CategoryRef) -> ChartResult<(String, CategoryRecord)> {
        let index = self.resolve(target)?;
        self.records
            .shift_remove_index(index)
            .ok_or_else(|| ChartError::UnknownCategory(target.to_string()))
    }

    /// Replaces the value of one category and returns the previous value.
    pub fn set_value(&mut self, target: &CategoryRef, value: f64) -> ChartResult<f64> {
        validate_value(value)?;
        let index = self.resolve(target)?;
        let (_, record) = self
            .records
            .get_index_mut(index)
            .ok_or_else(|| ChartError::UnknownCategory(target.to_string()))?;
        Ok(std::mem::replace(&mut record.value, value))
    }

    pub fn set_color(&mut self, target: &CategoryRef, color: Color) -> ChartResult<()> {
        color.validate()?;
        let index = self.resolve(target)?;
        if let Some((_, record)) = self.records.get_index_mut(index) {
            record.color = color;
        }
        Ok(())
    }

    /// Resolves a reference to its sequence position.
    pub fn resolve(&self, target: &CategoryRef) -> ChartResult<usize> {
        let index = match target {
            CategoryRef::Index(index) => (*index < self.records.len()).then_some(*index),
            CategoryRef::Label(label) => self.records.get_index_of(label.as_str()),
        };
        index.ok_or_else(|| ChartError::UnknownCategory(target.to_string()))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<(&str, &CategoryRecord)> {
        self.records
            .get_index(index)
            .map(|(label, record)| (label.as_str(), record))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryRecord)> {
        self.records
            .iter()
            .map(|(label, record)| (label.as_str(), record))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.values().map(|record| record.value)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, CategoryRecord> {
        &self.records
    }
}

fn validate_value(value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::invalid_configuration(format!(
            "category value must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CategoryRecord, CategoryRef, SectorDataModel};
    use crate::core::Color;
    use crate::error::ChartError;

    fn record(value: f64) -> CategoryRecord {
        CategoryRecord::new(value, Color::WHITE).expect("valid record")
    }

    #[test]
    fn reference_dataset_keeps_insertion_order() {
        let model = SectorDataModel::reference_dataset();
        let labels: Vec<&str> = model.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["value 1", "value 2", "value 3"]);
        assert_eq!(model.values().collect::<Vec<_>>(), [25.0, 10.0, 30.0]);
        assert_eq!(model.get(0).map(|(_, r)| r.color.to_hex()), Some(0x006243));
        assert_eq!(model.total(), 65.0);
    }

    #[test]
    fn set_value_by_label_and_index_returns_previous_value() {
        let mut model = SectorDataModel::reference_dataset();
        let previous = model
            .set_value(&CategoryRef::label("value 2"), 40.0)
            .expect("set by label");
        assert_eq!(previous, 10.0);

        let previous = model
            .set_value(&CategoryRef::Index(2), 5.0)
            .expect("set by index");
        assert_eq!(previous, 30.0);
        assert_eq!(model.values().collect::<Vec<_>>(), [25.0, 40.0, 5.0]);
    }

    #[test]
    fn negative_value_is_rejected_without_touching_the_record() {
        let mut model = SectorDataModel::reference_dataset();
        let err = model
            .set_value(&CategoryRef::Index(0), -1.0)
            .expect_err("negative value");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        assert_eq!(model.get(0).map(|(_, r)| r.value), Some(25.0));
    }

    #[test]
    fn unknown_targets_are_reported() {
        let mut model = SectorDataModel::reference_dataset();
        assert!(matches!(
            model.set_value(&CategoryRef::Index(3), 1.0),
            Err(ChartError::UnknownCategory(_))
        ));
        assert!(matches!(
            model.resolve(&CategoryRef::label("missing")),
            Err(ChartError::UnknownCategory(_))
        ));
    }

    #[test]
    fn push_rejects_duplicate_and_empty_labels() {
        let mut model = SectorDataModel::new();
        model.push("a", record(1.0)).expect("first push");
        assert!(model.push("a", record(2.0)).is_err());
        assert!(model.push("  ", record(2.0)).is_err());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn remove_shifts_later_records_forward() {
        let mut model =
            SectorDataModel::from_records([("a", record(1.0)), ("b", record(2.0)), ("c", record(3.0))])
                .expect("model");
        let (label, removed) = model.remove(&CategoryRef::Index(0)).expect("remove");
        assert_eq!(label, "a");
        assert_eq!(removed.value, 1.0);
        assert_eq!(model.resolve(&CategoryRef::label("b")).expect("b"), 0);
    }

    #[test]
    fn malformed_color_is_rejected_at_the_boundary() {
        assert!(CategoryRecord::new(1.0, Color::rgb(2.0, 0.0, 0.0)).is_err());
        let mut model = SectorDataModel::reference_dataset();
        assert!(
            model
                .set_color(&CategoryRef::Index(0), Color::rgb(0.0, -0.1, 0.0))
                .is_err()
        );
    }
}
