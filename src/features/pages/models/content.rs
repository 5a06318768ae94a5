use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured body of a page or template: an ordered tree of elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One node of the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub block: Block,
    /// Free-form presentation properties (css-like key/value pairs)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Block kinds, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Block {
    Heading {
        text: String,
        level: u8,
    },
    Text {
        text: String,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
        caption: Option<String>,
    },
    Video {
        url: String,
        poster: Option<String>,
    },
    Button {
        label: String,
        href: String,
        variant: Option<String>,
    },
    Hero {
        heading: String,
        subheading: Option<String>,
        cta_label: Option<String>,
        cta_href: Option<String>,
        background_image: Option<String>,
    },
    Quote {
        text: String,
        author: Option<String>,
    },
    List {
        items: Vec<String>,
        #[serde(default)]
        ordered: bool,
    },
    Code {
        code: String,
        language: Option<String>,
    },
    Cta {
        heading: String,
        text: Option<String>,
        button_label: String,
        button_href: String,
    },
    Faq {
        items: Vec<FaqItem>,
    },
    Spacer {
        height: u32,
    },
    Divider,
    Section {
        background: Option<String>,
    },
    Columns {
        count: u8,
    },
}

impl Block {
    /// Only layout blocks may hold children
    pub fn is_container(&self) -> bool {
        matches!(self, Block::Section { .. } | Block::Columns { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Text { .. } => "text",
            Block::Image { .. } => "image",
            Block::Video { .. } => "video",
            Block::Button { .. } => "button",
            Block::Hero { .. } => "hero",
            Block::Quote { .. } => "quote",
            Block::List { .. } => "list",
            Block::Code { .. } => "code",
            Block::Cta { .. } => "cta",
            Block::Faq { .. } => "faq",
            Block::Spacer { .. } => "spacer",
            Block::Divider => "divider",
            Block::Section { .. } => "section",
            Block::Columns { .. } => "columns",
        }
    }
}

pub fn new_element_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Element {
    pub fn new(block: Block) -> Self {
        Self {
            id: new_element_id(),
            block,
            style: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Deep copy with new ids for this element and every descendant
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            id: new_element_id(),
            block: self.block.clone(),
            style: self.style.clone(),
            children: self.children.iter().map(Element::with_fresh_ids).collect(),
        }
    }

    fn check(&self, seen: &mut HashSet<String>) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Element id must not be empty".to_string());
        }
        if !seen.insert(self.id.clone()) {
            return Err(format!("Duplicate element id '{}'", self.id));
        }
        if !self.children.is_empty() && !self.block.is_container() {
            return Err(format!(
                "Element '{}' of type {} cannot contain children",
                self.id,
                self.block.kind()
            ));
        }
        match &self.block {
            Block::Heading { level, .. } if !(1..=6).contains(level) => {
                return Err(format!("Heading '{}' level must be between 1 and 6", self.id));
            }
            Block::Columns { count } if !(1..=6).contains(count) => {
                return Err(format!("Columns '{}' count must be between 1 and 6", self.id));
            }
            _ => {}
        }
        self.children.iter().try_for_each(|child| child.check(seen))
    }
}

impl PageContent {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Structural checks: non-empty unique ids, children only under layout
    /// blocks, heading levels and column counts in range
    pub fn check(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .try_for_each(|element| element.check(&mut seen))
    }

    pub fn with_fresh_ids(&self) -> Self {
        Self {
            elements: self.elements.iter().map(Element::with_fresh_ids).collect(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        find_in(&self.elements, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_in_mut(&mut self.elements, id)
    }

    /// Number of elements in the whole tree
    pub fn len(&self) -> usize {
        fn count(elements: &[Element]) -> usize {
            elements.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.elements)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn find_in<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    elements.iter().find_map(|element| {
        if element.id == id {
            Some(element)
        } else {
            find_in(&element.children, id)
        }
    })
}

fn find_in_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in elements.iter_mut() {
        if element.id == id {
            return Some(element);
        }
        if let Some(found) = find_in_mut(&mut element.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PageContent {
        let mut section = Element::new(Block::Section { background: None });
        section.children.push(Element::new(Block::Text {
            text: "We build websites.".into(),
        }));
        PageContent::new(vec![
            Element::new(Block::Heading {
                text: "About Us".into(),
                level: 1,
            }),
            section,
        ])
    }

    #[test]
    fn deserializes_tagged_blocks() {
        let content: PageContent = serde_json::from_value(json!({
            "elements": [
                { "id": "h1", "type": "heading", "text": "Welcome", "level": 2 },
                { "id": "b1", "type": "button", "label": "Contact", "href": "/contact",
                  "style": { "color": "primary" } },
                { "id": "d1", "type": "divider" },
                { "id": "c1", "type": "cta", "heading": "Ready?", "buttonLabel": "Start",
                  "buttonHref": "/contact" }
            ]
        }))
        .unwrap();

        assert_eq!(content.elements.len(), 4);
        assert_eq!(
            content.elements[0].block,
            Block::Heading {
                text: "Welcome".into(),
                level: 2
            }
        );
        assert_eq!(content.elements[1].style.get("color").unwrap(), "primary");
        assert_eq!(content.elements[2].block, Block::Divider);
        assert!(content.check().is_ok());
    }

    #[test]
    fn rejects_unknown_block_type() {
        let result = serde_json::from_value::<PageContent>(json!({
            "elements": [{ "id": "x", "type": "marquee", "text": "no" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_type_tag_next_to_fields() {
        let value = serde_json::to_value(Element {
            id: "v1".into(),
            block: Block::Video {
                url: "https://video.example/intro.mp4".into(),
                poster: None,
            },
            style: BTreeMap::new(),
            children: vec![],
        })
        .unwrap();
        assert_eq!(value["type"], "video");
        assert_eq!(value["id"], "v1");
        assert!(value.get("children").is_none());
    }

    #[test]
    fn check_rejects_duplicate_ids_and_bad_nesting() {
        let mut content = sample();
        let dup_id = content.elements[0].id.clone();
        content.elements[1].children[0].id = dup_id;
        assert!(content.check().unwrap_err().contains("Duplicate"));

        let mut content = sample();
        let child = Element::new(Block::Divider);
        content.elements[0].children.push(child);
        assert!(content.check().unwrap_err().contains("cannot contain children"));

        let content = PageContent::new(vec![Element::new(Block::Heading {
            text: "Too deep".into(),
            level: 9,
        })]);
        assert!(content.check().is_err());
    }

    #[test]
    fn fresh_ids_replace_every_id_in_tree() {
        let original = sample();
        let copy = original.with_fresh_ids();

        assert_eq!(copy.len(), original.len());
        assert_ne!(copy.elements[0].id, original.elements[0].id);
        assert_ne!(copy.elements[1].children[0].id, original.elements[1].children[0].id);
        assert_eq!(copy.elements[1].children[0].block, original.elements[1].children[0].block);
        assert!(copy.check().is_ok());
    }

    #[test]
    fn find_descends_into_children() {
        let mut content = sample();
        let nested_id = content.elements[1].children[0].id.clone();
        assert!(content.find(&nested_id).is_some());

        if let Some(element) = content.find_mut(&nested_id) {
            element.block = Block::Text {
                text: "Updated".into(),
            };
        }
        assert_eq!(
            content.find(&nested_id).unwrap().block,
            Block::Text {
                text: "Updated".into()
            }
        );
        assert!(content.find("missing").is_none());
    }
}
