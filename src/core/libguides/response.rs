use serde::{Deserialize, Serialize};

/// One guide scraped from the LibGuides search output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibGuidesDocument {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibGuidesResponse {
    #[serde(rename = "recordCount")]
    pub record_count: usize,
    pub documents: Vec<LibGuidesDocument>,
}

pub trait RecordDriver {
    fn unique_id(&self) -> &str;
    fn source_identifier(&self) -> &str;
    fn set_source_identifier(&mut self, identifier: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibGuidesRecord {
    raw: LibGuidesDocument,
    source_identifier: String,
}

impl LibGuidesRecord {
    pub fn from_raw(raw: LibGuidesDocument) -> Self {
        Self {
            raw,
            source_identifier: String::new(),
        }
    }

    pub fn raw_data(&self) -> &LibGuidesDocument {
        &self.raw
    }

    pub fn title(&self) -> &str {
        &self.raw.title
    }

    /// Guides are identified by their URL.
    pub fn url(&self) -> &str {
        &self.raw.id
    }

    pub fn description(&self) -> &str {
        &self.raw.description
    }
}

impl RecordDriver for LibGuidesRecord {
    fn unique_id(&self) -> &str {
        &self.raw.id
    }

    fn source_identifier(&self) -> &str {
        &self.source_identifier
    }

    fn set_source_identifier(&mut self, identifier: &str) {
        self.source_identifier = identifier.to_string();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordCollection<R> {
    total: usize,
    offset: usize,
    records: Vec<R>,
    source_identifier: String,
}

impl<R: RecordDriver> RecordCollection<R> {
    pub fn new(total: usize, offset: usize, records: Vec<R>) -> Self {
        Self {
            total,
            offset,
            records,
            source_identifier: String::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_identifier(&self) -> &str {
        &self.source_identifier
    }

    /// Tag the collection and every record with the backend that produced them.
    pub fn inject_source_identifier(&mut self, identifier: &str) {
        self.source_identifier = identifier.to_string();
        for record in &mut self.records {
            record.set_source_identifier(identifier);
        }
    }
}

type RecordCallback<R> = Box<dyn Fn(LibGuidesDocument) -> R + Send + Sync>;

/// Builds record collections, turning each raw document into a record via a callback.
pub struct RecordCollectionFactory<R = LibGuidesRecord> {
    callback: RecordCallback<R>,
}

impl<R: RecordDriver> RecordCollectionFactory<R> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(LibGuidesDocument) -> R + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    pub fn factory(&self, response: LibGuidesResponse, offset: usize) -> RecordCollection<R> {
        let records = response
            .documents
            .into_iter()
            .map(|document| (self.callback)(document))
            .collect();
        RecordCollection::new(response.record_count, offset, records)
    }
}

impl Default for RecordCollectionFactory<LibGuidesRecord> {
    fn default() -> Self {
        Self::new(LibGuidesRecord::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(n: usize) -> LibGuidesDocument {
        LibGuidesDocument {
            id: format!("https://guides.example.edu/g{}", n),
            title: format!("Guide {}", n),
            description: String::new(),
        }
    }

    #[test]
    fn test_factory_uses_callback_and_keeps_total() {
        let factory = RecordCollectionFactory::new(|doc: LibGuidesDocument| {
            let mut record = LibGuidesRecord::from_raw(doc);
            record.set_source_identifier("callback");
            record
        });
        let response = LibGuidesResponse {
            record_count: 12,
            documents: vec![document(1), document(2)],
        };

        let collection = factory.factory(response, 10);
        assert_eq!(collection.total(), 12);
        assert_eq!(collection.offset(), 10);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0].source_identifier(), "callback");
        assert_eq!(collection.records()[1].url(), "https://guides.example.edu/g2");
    }

    #[test]
    fn test_inject_source_identifier_reaches_records() {
        let factory = RecordCollectionFactory::default();
        let mut collection = factory.factory(
            LibGuidesResponse {
                record_count: 1,
                documents: vec![document(7)],
            },
            0,
        );

        collection.inject_source_identifier("LibGuides");
        assert_eq!(collection.source_identifier(), "LibGuides");
        assert_eq!(collection.records()[0].source_identifier(), "LibGuides");
        assert_eq!(collection.records()[0].unique_id(), "https://guides.example.edu/g7");
    }
}
