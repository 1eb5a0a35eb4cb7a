//! Block-level node types.
//!
//! The set is closed: a renderer matching on [`BlockNode`] exhaustively
//! handles every tree the parser can produce.

use serde::{Deserialize, Serialize};

use crate::inline::InlineNode;

/// Column alignment for table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// No alignment specified.
    #[default]
    None,
    /// Left-aligned (`:---`).
    Left,
    /// Center-aligned (`:---:`).
    Center,
    /// Right-aligned (`---:`).
    Right,
}

/// One list entry. Nested lists hang off `children`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListItem {
    pub content: Vec<InlineNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ListItem>>,
}

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub checked: bool,
    pub children: Vec<InlineNode>,
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub date: String,
    pub title: Vec<InlineNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<InlineNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One row of a two-column comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareItem {
    pub left: Vec<InlineNode>,
    pub right: Vec<InlineNode>,
}

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Task status. Unknown values fall back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Cancelled,
}

/// Task priority. Unknown values fall back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Flat task record decoded from a `task` fence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "blockId", default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<u64>,
}

/// A top-level structural unit of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockNode {
    Paragraph {
        children: Vec<InlineNode>,
    },
    Heading {
        /// Heading level (1-6).
        level: u8,
        children: Vec<InlineNode>,
    },
    List {
        ordered: bool,
        /// Number of the first item of an ordered list.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
        items: Vec<ListItem>,
    },
    Checklist {
        items: Vec<ChecklistItem>,
    },
    /// Blockquote holding a full sub-document.
    Quote {
        children: Vec<BlockNode>,
    },
    /// Generic fenced code, also the fallback for rejected extension fences.
    CodeBlock {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Table {
        headers: Vec<Vec<InlineNode>>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<Vec<InlineNode>>>,
    },
    /// Thematic break.
    Hr,
    Timeline {
        items: Vec<TimelineItem>,
    },
    Compare {
        #[serde(rename = "leftTitle")]
        left_title: Vec<InlineNode>,
        #[serde(rename = "rightTitle")]
        right_title: Vec<InlineNode>,
        items: Vec<CompareItem>,
    },
    Gallery {
        images: Vec<GalleryImage>,
    },
    LocalGraph {
        #[serde(rename = "blockId")]
        block_id: u64,
    },
    TaskCard {
        task: TaskCard,
    },
}

impl BlockNode {
    /// Stable lowercase variant name, as written in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::List { .. } => "list",
            Self::Checklist { .. } => "checklist",
            Self::Quote { .. } => "quote",
            Self::CodeBlock { .. } => "codeblock",
            Self::Table { .. } => "table",
            Self::Hr => "hr",
            Self::Timeline { .. } => "timeline",
            Self::Compare { .. } => "compare",
            Self::Gallery { .. } => "gallery",
            Self::LocalGraph { .. } => "localgraph",
            Self::TaskCard { .. } => "taskcard",
        }
    }

    /// The single image of a paragraph whose only content is one image,
    /// ignoring breaks and blank text.
    pub fn single_image(&self) -> Option<(&str, &str)> {
        let Self::Paragraph { children } = self else {
            return None;
        };
        let mut found = None;
        for child in children {
            match child {
                InlineNode::Image { src, alt } if found.is_none() => {
                    found = Some((src.as_str(), alt.as_str()));
                }
                node if node.is_blank() => {}
                _ => return None,
            }
        }
        found
    }
}
