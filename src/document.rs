use crate::element::DrawingRecord;

/// Append-only history of everything committed during the session.
///
/// Insertion order is paint order: later records paint over earlier ones. The
/// only way to remove entries is to clear the whole history.
#[derive(Debug, Default, Clone)]
pub struct Document {
    records: Vec<DrawingRecord>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: impl Into<DrawingRecord>) {
        let record = record.into();
        log::debug!("Appending {} record #{}", record.kind_name(), self.records.len());
        self.records.push(record);
    }

    /// All records in paint order
    pub fn all(&self) -> &[DrawingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. There is no way back.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
