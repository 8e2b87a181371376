use crate::model::{MetaCollection, ModelMetaData, ModelsMetaData};
use crate::payload::{MetaDataPayload, ModelsMetaDataPayload};

use super::ModelLinker;

impl ModelLinker {
    /// Meta-data collections with resolved descriptions
    pub fn link_meta_data(&self, payload: &ModelsMetaDataPayload) -> ModelsMetaData {
        ModelsMetaData {
            semantics: self.link_meta_collection(&payload.semantics),
            definitions: self.link_meta_collection(&payload.definitions),
            properties: self.link_meta_collection(&payload.properties),
            fields: self.link_meta_collection(&payload.fields),
            regions: self.link_meta_collection(&payload.regions),
            controls: self.link_meta_collection(&payload.controls),
            headers: self.link_meta_collection(&payload.headers),
            actions: self.link_meta_collection(&payload.actions),
        }
    }

    pub fn link_meta_collection(&self, records: &[MetaDataPayload]) -> MetaCollection {
        MetaCollection::from_records(records.iter().map(|record| self.link_meta_record(record)))
    }

    fn link_meta_record(&self, record: &MetaDataPayload) -> ModelMetaData {
        let mut meta = record.to_meta_data();
        self.descriptions()
            .link_descriptions(&mut meta.descriptions, &record.id, record.labels.as_ref());
        meta
    }
}
