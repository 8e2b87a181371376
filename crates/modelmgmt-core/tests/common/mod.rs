use modelmgmt_core::hierarchy::{HierarchyBuilder, ModelHierarchy};
use modelmgmt_core::model::ModelsMetaData;
use modelmgmt_core::payload::{ClassDescriptor, ModelPayload, ModelsMetaDataPayload};
use modelmgmt_core::{LanguageConfig, ModelGraph, ModelLinker};
use serde_json::json;

/// Graph with the sample hierarchy built and the media model linked
#[allow(dead_code)]
pub struct LoadedModel {
    pub graph: ModelGraph,
    pub hierarchy: ModelHierarchy,
    pub linker: ModelLinker,
    pub meta: ModelsMetaData,
}

#[allow(dead_code)]
pub fn linker() -> ModelLinker {
    ModelLinker::new(LanguageConfig {
        default_language: "en".to_string(),
        user_language: "bg".to_string(),
        supported_languages: vec!["en".to_string(), "bg".to_string()],
    })
}

#[allow(dead_code)]
pub fn hierarchy_payload() -> Vec<ClassDescriptor> {
    serde_json::from_value(json!([
        {
            "id": "emf:Entity",
            "parentId": null,
            "labels": {"BG": "emf:Елемент", "EN": "emf:Entity"},
            "subTypes": [
                {"id": "entity", "parentId": null, "labels": {"BG": "Обект", "EN": "Entity"}, "abstract": true},
                {"id": "media", "parentId": "entity", "labels": {"BG": "Медия", "EN": "Media"}, "abstract": true}
            ]
        },
        {
            "id": "emf:Object",
            "parentId": "emf:Entity",
            "labels": {"BG": "emf:Обект", "EN": "emf:Object"},
            "subTypes": [
                {"id": "audio", "parentId": "media", "labels": {"BG": "Аудио", "EN": "Audio"}, "abstract": false},
                {"id": "video", "parentId": "media", "labels": {"BG": "Видео", "EN": "Video"}, "abstract": false}
            ]
        }
    ]))
    .unwrap()
}

#[allow(dead_code)]
pub fn meta_payload() -> ModelsMetaDataPayload {
    serde_json::from_value(json!({
        "semantics": [
            {"id": "title", "uri": "http://purl.org/dc/terms/title", "type": "label", "defaultValue": "",
             "validationModel": {"mandatory": true}, "labels": {"en": "Title", "bg": "Заглавие"}}
        ],
        "definitions": [
            {"id": "identifier", "type": "identifier", "defaultValue": "", "validationModel": {"mandatory": true},
             "labels": {"en": "Identifier", "bg": "Идентификатор"}},
            {"id": "label", "type": "label", "defaultValue": "", "labels": {"en": "Label", "bg": "Етикет"}},
            {"id": "abstract", "type": "boolean", "defaultValue": true, "labels": {"en": "Is abstract", "bg": "Абстрактна"}}
        ],
        "fields": [
            {"id": "name", "type": "identifier", "defaultValue": "", "validationModel": {"mandatory": true}},
            {"id": "type", "type": "type", "defaultValue": "", "validationModel": {"mandatory": true}},
            {"id": "label", "type": "label", "defaultValue": ""},
            {"id": "displayType", "type": "displayType", "defaultValue": "HIDDEN"},
            {"id": "mandatory", "type": "boolean", "defaultValue": false},
            {"id": "uri", "type": "uri", "defaultValue": "", "validationModel": {"visible": false}}
        ],
        "regions": [
            {"id": "label", "type": "label", "defaultValue": "", "validationModel": {"mandatory": true}},
            {"id": "displayType", "type": "displayType", "defaultValue": "EDITABLE"},
            {"id": "order", "type": "integer", "defaultValue": 0}
        ],
        "controls": [
            {"id": "type", "type": "string", "defaultValue": ""}
        ]
    }))
    .unwrap()
}

fn field(id: &str, region: Option<&str>, en: &str, bg: &str) -> serde_json::Value {
    json!({
        "id": id,
        "regionId": region,
        "attributes": [
            {"name": "uri", "type": "uri", "value": format!("emf:{}", id)},
            {"name": "label", "type": "label", "value": {"en": en, "bg": bg}},
            {"name": "type", "type": "type", "value": "an..180"},
            {"name": "displayType", "type": "displayType", "value": "EDITABLE"},
            {"name": "mandatory", "type": "boolean", "value": true}
        ]
    })
}

fn region(id: &str, en: &str, order: i64) -> serde_json::Value {
    json!({
        "id": id,
        "attributes": [
            {"name": "label", "type": "label", "value": {"en": en}},
            {"name": "displayType", "type": "displayType", "value": "EDITABLE"},
            {"name": "order", "type": "integer", "value": order}
        ]
    })
}

/// Media model plus the entity model it inherits from
#[allow(dead_code)]
pub fn model_payload() -> ModelPayload {
    serde_json::from_value(json!({
        "classes": [
            {
                "id": "emf:Entity",
                "parent": null,
                "attributes": [
                    {"name": "http://purl.org/dc/terms/title", "type": "label",
                     "value": {"en": "Entity", "bg": "Обект"}}
                ]
            }
        ],
        "definitions": [
            {
                "id": "media",
                "parent": "entity",
                "attributes": [
                    {"name": "abstract", "type": "boolean", "value": false},
                    {"name": "label", "type": "label", "value": {"en": "Media", "bg": "Медиа"}}
                ],
                "fields": [
                    field("title", Some("generalDetails"), "Title", "Наименование"),
                    {
                        "id": "description",
                        "regionId": null,
                        "attributes": [
                            {"name": "label", "type": "label", "value": {"en": "Media description", "bg": "Описание на медия"}}
                        ],
                        "controls": [
                            {"id": "RICHTEXT", "attributes": [{"name": "type", "value": "RICHTEXT"}]}
                        ]
                    }
                ],
                "regions": [
                    region("generalDetails", "Base details", 10)
                ]
            },
            {
                "id": "entity",
                "parent": null,
                "attributes": [
                    {"name": "identifier", "type": "identifier", "value": "entity"},
                    {"name": "abstract", "type": "boolean", "value": true},
                    {"name": "label", "type": "label", "value": {"en": "Entity", "bg": "Обект"}}
                ],
                "fields": [
                    field("description", None, "Description", "Описание"),
                    field("emailAddress", Some("specificDetails"), "E-mail address", "Електронна поща")
                ],
                "regions": [
                    region("generalDetails", "Entity details", 10),
                    region("specificDetails", "Specific details", 20)
                ]
            }
        ]
    }))
    .unwrap()
}

/// Build the sample hierarchy and link the media model
#[allow(dead_code)]
pub fn load_media() -> LoadedModel {
    let linker = linker();
    let mut graph = ModelGraph::new();
    let hierarchy = HierarchyBuilder::new(linker.descriptions())
        .build(&mut graph, &hierarchy_payload())
        .unwrap();
    let meta = linker.link_meta_data(&meta_payload());
    linker
        .link_model(&mut graph, &hierarchy, &model_payload(), &meta)
        .unwrap();
    LoadedModel {
        graph,
        hierarchy,
        linker,
        meta,
    }
}
