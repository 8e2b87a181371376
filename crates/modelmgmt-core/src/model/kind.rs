use serde::{Deserialize, Serialize};

/// The variant of a model node
///
/// Classes and definitions are base types: model paths are rooted at them
/// and they are registered in the graph's base index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    Class,
    Definition,
    Field,
    Region,
    Property,
    Action,
    ActionExecution,
    Header,
    Control,
    ControlParam,
    Attribute,
}

// (kind, path segment, icon)
const KIND_TABLE: [(ModelKind, &str, &str); 11] = [
    (ModelKind::Class, "class", "folder"),
    (ModelKind::Definition, "definition", "file"),
    (ModelKind::Field, "field", "input"),
    (ModelKind::Region, "region", "layout"),
    (ModelKind::Property, "property", "tag"),
    (ModelKind::Action, "action", "play"),
    (ModelKind::ActionExecution, "actionExecution", "cog"),
    (ModelKind::Header, "header", "heading"),
    (ModelKind::Control, "control", "sliders"),
    (ModelKind::ControlParam, "controlParam", "sliders"),
    (ModelKind::Attribute, "attribute", "list"),
];

impl ModelKind {
    /// Type token used in model path segments
    pub fn segment(self) -> &'static str {
        KIND_TABLE[self as usize].1
    }

    /// Default icon for nodes of this kind
    pub fn icon(self) -> &'static str {
        KIND_TABLE[self as usize].2
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(_, s, _)| *s == segment)
            .map(|(kind, _, _)| *kind)
    }

    pub fn is_base_type(self) -> bool {
        matches!(self, ModelKind::Class | ModelKind::Definition)
    }

    /// Child collections a node of this kind carries
    ///
    /// Every kind except `Attribute` owns an attribute collection.
    pub fn child_kinds(self) -> &'static [ModelKind] {
        use ModelKind::*;
        match self {
            Class => &[Attribute, Property],
            Definition => &[Attribute, Field, Region, Header, Action],
            Field => &[Attribute, Control],
            Control => &[Attribute, ControlParam],
            Action => &[Attribute, ActionExecution],
            Region | Property | Header | ControlParam | ActionExecution => &[Attribute],
            Attribute => &[],
        }
    }

    pub fn accepts_child(self, child: ModelKind) -> bool {
        self.child_kinds().contains(&child)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}
