use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::history::History;
use crate::features::pages::dtos::{CreatePageDto, PageResponseDto, UpdatePageDto};
use crate::features::pages::models::{Block, Element, PageContent, PageStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Element '{0}' not found")]
    ElementNotFound(String),

    #[error("Element '{0}' cannot contain children")]
    NotAContainer(String),

    #[error("Cannot move element '{0}' into itself")]
    InvalidMove(String),
}

/// Page-level SEO fields edited in the side panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
}

/// What the inspector shows for the current selection
#[derive(Debug, Clone, PartialEq)]
pub struct Inspector<'a> {
    pub element: &'a Element,
    pub seo: &'a SeoMetadata,
}

/// Everything needed to persist the page being edited
#[derive(Debug, Clone, PartialEq)]
pub struct PageDraft {
    pub id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub status: PageStatus,
    pub content: PageContent,
    pub seo: SeoMetadata,
}

impl PageDraft {
    pub fn to_create_dto(&self) -> CreatePageDto {
        CreatePageDto {
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: Some(self.content.clone()),
            status: Some(self.status),
            meta_title: self.seo.meta_title.clone(),
            meta_description: self.seo.meta_description.clone(),
            canonical_url: self.seo.canonical_url.clone(),
            og_title: self.seo.og_title.clone(),
            og_description: self.seo.og_description.clone(),
            og_image: self.seo.og_image.clone(),
            parent_id: None,
            sort_order: None,
            template_id: None,
        }
    }

    pub fn to_update_dto(&self) -> UpdatePageDto {
        UpdatePageDto {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            content: Some(self.content.clone()),
            status: Some(self.status),
            // Blank clears a stored field; null would leave it in place
            meta_title: Some(blank_if_unset(&self.seo.meta_title)),
            meta_description: Some(blank_if_unset(&self.seo.meta_description)),
            canonical_url: Some(blank_if_unset(&self.seo.canonical_url)),
            og_title: Some(blank_if_unset(&self.seo.og_title)),
            og_description: Some(blank_if_unset(&self.seo.og_description)),
            og_image: Some(blank_if_unset(&self.seo.og_image)),
            parent_id: None,
            sort_order: None,
        }
    }
}

fn blank_if_unset(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    title: String,
    slug: String,
    status: PageStatus,
    content: PageContent,
    seo: SeoMetadata,
}

/// In-memory state of the visual page editor.
///
/// Every mutation records an undo snapshot and bumps `revision`. A save
/// acknowledges a revision; the document is dirty while newer edits exist.
#[derive(Debug)]
pub struct EditorDocument {
    page_id: Option<i64>,
    state: Snapshot,
    selected: Option<String>,
    history: History<Snapshot>,
    revision: u64,
    saved_revision: u64,
}

impl EditorDocument {
    /// Blank, unsaved page
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            page_id: None,
            state: Snapshot {
                title: title.into(),
                slug: slug.into(),
                status: PageStatus::Draft,
                content: PageContent::default(),
                seo: SeoMetadata::default(),
            },
            selected: None,
            history: History::default(),
            revision: 1,
            saved_revision: 0,
        }
    }

    /// Open an existing page; starts clean
    pub fn from_page(page: PageResponseDto) -> Self {
        Self {
            page_id: Some(page.id),
            state: Snapshot {
                title: page.title,
                slug: page.slug,
                status: page.status,
                content: page.content.unwrap_or_default(),
                seo: SeoMetadata {
                    meta_title: page.meta_title,
                    meta_description: page.meta_description,
                    canonical_url: page.canonical_url,
                    og_title: page.og_title,
                    og_description: page.og_description,
                    og_image: page.og_image,
                },
            },
            selected: None,
            history: History::default(),
            revision: 0,
            saved_revision: 0,
        }
    }

    pub fn page_id(&self) -> Option<i64> {
        self.page_id
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    pub fn slug(&self) -> &str {
        &self.state.slug
    }

    pub fn status(&self) -> PageStatus {
        self.state.status
    }

    pub fn content(&self) -> &PageContent {
        &self.state.content
    }

    pub fn seo(&self) -> &SeoMetadata {
        &self.state.seo
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---------------------------------------------------------------------
    // Page fields
    // ---------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.checkpoint();
        self.state.title = title.into();
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.checkpoint();
        self.state.slug = slug.into();
    }

    pub fn set_status(&mut self, status: PageStatus) {
        self.checkpoint();
        self.state.status = status;
    }

    pub fn update_seo(&mut self, edit: impl FnOnce(&mut SeoMetadata)) {
        self.checkpoint();
        edit(&mut self.state.seo);
    }

    // ---------------------------------------------------------------------
    // Elements
    // ---------------------------------------------------------------------

    /// Insert a new element under `parent` (top level when `None`) at
    /// `index`, or at the end. The new element becomes the selection.
    pub fn add_element(
        &mut self,
        block: Block,
        parent: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        self.ensure_container(parent)?;
        self.checkpoint();

        let element = Element::new(block);
        let id = element.id.clone();
        let siblings = siblings_mut(&mut self.state.content, parent)?;
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, element);

        self.selected = Some(id.clone());
        Ok(id)
    }

    pub fn update_element(&mut self, id: &str, block: Block) -> Result<(), EditorError> {
        let existing = self
            .state
            .content
            .find(id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        if !existing.children.is_empty() && !block.is_container() {
            return Err(EditorError::NotAContainer(id.to_string()));
        }

        self.checkpoint();
        if let Some(element) = self.state.content.find_mut(id) {
            element.block = block;
        }
        Ok(())
    }

    /// Set or clear (`None`) one style property
    pub fn set_style(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: Option<String>,
    ) -> Result<(), EditorError> {
        if self.state.content.find(id).is_none() {
            return Err(EditorError::ElementNotFound(id.to_string()));
        }

        self.checkpoint();
        if let Some(element) = self.state.content.find_mut(id) {
            let key = key.into();
            match value {
                Some(value) => {
                    element.style.insert(key, value);
                }
                None => {
                    element.style.remove(&key);
                }
            }
        }
        Ok(())
    }

    /// Remove an element and its subtree
    pub fn remove_element(&mut self, id: &str) -> Result<Element, EditorError> {
        if self.state.content.find(id).is_none() {
            return Err(EditorError::ElementNotFound(id.to_string()));
        }

        self.checkpoint();
        let removed = take_element(&mut self.state.content.elements, id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;

        let selection_removed = self
            .selected
            .as_deref()
            .is_some_and(|s| s == id || contains(&removed.children, s));
        if selection_removed {
            self.selected = None;
        }
        Ok(removed)
    }

    /// Copy an element (with fresh ids) right after the original
    pub fn duplicate_element(&mut self, id: &str) -> Result<String, EditorError> {
        let (parent, index) = locate(&self.state.content.elements, None, id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        let copy = self
            .state
            .content
            .find(id)
            .map(Element::with_fresh_ids)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;

        self.checkpoint();
        let new_id = copy.id.clone();
        let siblings = siblings_mut(&mut self.state.content, parent.as_deref())?;
        siblings.insert(index + 1, copy);

        self.selected = Some(new_id.clone());
        Ok(new_id)
    }

    /// Move an element to `index` within `new_parent` (top level when `None`)
    pub fn move_element(
        &mut self,
        id: &str,
        new_parent: Option<&str>,
        index: usize,
    ) -> Result<(), EditorError> {
        let element = self
            .state
            .content
            .find(id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        if let Some(target) = new_parent {
            if target == id || contains(&element.children, target) {
                return Err(EditorError::InvalidMove(id.to_string()));
            }
        }
        self.ensure_container(new_parent)?;

        self.checkpoint();
        let moved = take_element(&mut self.state.content.elements, id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        let siblings = siblings_mut(&mut self.state.content, new_parent)?;
        let at = index.min(siblings.len());
        siblings.insert(at, moved);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub fn select(&mut self, id: &str) -> Result<(), EditorError> {
        if self.state.content.find(id).is_none() {
            return Err(EditorError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected
            .as_deref()
            .and_then(|id| self.state.content.find(id))
    }

    /// Properties of the selected element alongside the page SEO panel
    pub fn inspector(&self) -> Option<Inspector<'_>> {
        self.selected_element().map(|element| Inspector {
            element,
            seo: &self.state.seo,
        })
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn to_draft(&self) -> PageDraft {
        PageDraft {
            id: self.page_id,
            title: self.state.title.clone(),
            slug: self.state.slug.clone(),
            status: self.state.status,
            content: self.state.content.clone(),
            seo: self.state.seo.clone(),
        }
    }

    /// Record a successful save of `revision`. Edits made while the save was
    /// in flight keep the document dirty.
    pub fn mark_saved(&mut self, revision: u64, page_id: i64) {
        self.page_id = Some(page_id);
        if revision > self.saved_revision {
            self.saved_revision = revision;
        }
    }

    fn checkpoint(&mut self) {
        self.history.record(self.state.clone());
        self.revision += 1;
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.state = snapshot;
        self.revision += 1;
        let selection_gone = self
            .selected
            .as_deref()
            .is_some_and(|id| self.state.content.find(id).is_none());
        if selection_gone {
            self.selected = None;
        }
    }

    fn ensure_container(&self, parent: Option<&str>) -> Result<(), EditorError> {
        let Some(parent) = parent else {
            return Ok(());
        };
        let element = self
            .state
            .content
            .find(parent)
            .ok_or_else(|| EditorError::ElementNotFound(parent.to_string()))?;
        if element.block.is_container() {
            Ok(())
        } else {
            Err(EditorError::NotAContainer(parent.to_string()))
        }
    }
}

fn siblings_mut<'a>(
    content: &'a mut PageContent,
    parent: Option<&str>,
) -> Result<&'a mut Vec<Element>, EditorError> {
    match parent {
        None => Ok(&mut content.elements),
        Some(id) => content
            .find_mut(id)
            .map(|element| &mut element.children)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string())),
    }
}

/// Parent id and index of `id` within its sibling list
fn locate(elements: &[Element], parent: Option<&str>, id: &str) -> Option<(Option<String>, usize)> {
    for (index, element) in elements.iter().enumerate() {
        if element.id == id {
            return Some((parent.map(str::to_string), index));
        }
        if let Some(found) = locate(&element.children, Some(&element.id), id) {
            return Some(found);
        }
    }
    None
}

fn take_element(elements: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(index) = elements.iter().position(|e| e.id == id) {
        return Some(elements.remove(index));
    }
    elements
        .iter_mut()
        .find_map(|element| take_element(&mut element.children, id))
}

fn contains(elements: &[Element], id: &str) -> bool {
    elements
        .iter()
        .any(|e| e.id == id || contains(&e.children, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use validator::Validate;

    fn heading(text: &str) -> Block {
        Block::Heading {
            text: text.to_string(),
            level: 2,
        }
    }

    fn section() -> Block {
        Block::Section { background: None }
    }

    fn top_level_ids(doc: &EditorDocument) -> Vec<String> {
        doc.content().elements.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn new_document_is_dirty_draft() {
        let doc = EditorDocument::new("About Us", "about-us");
        assert!(doc.is_dirty());
        assert_eq!(doc.status(), PageStatus::Draft);
        assert!(doc.content().is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn add_selects_and_inspector_shows_seo() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        doc.update_seo(|seo| seo.meta_title = Some("About IeNet".into()));
        let id = doc.add_element(heading("Who we are"), None, None).unwrap();

        let inspector = doc.inspector().unwrap();
        assert_eq!(inspector.element.id, id);
        assert_eq!(inspector.seo.meta_title.as_deref(), Some("About IeNet"));
    }

    #[test]
    fn children_only_under_layout_blocks() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let text = doc.add_element(heading("Title"), None, None).unwrap();
        let err = doc
            .add_element(Block::Divider, Some(&text), None)
            .unwrap_err();
        assert_eq!(err, EditorError::NotAContainer(text));

        let wrapper = doc.add_element(section(), None, None).unwrap();
        let child = doc.add_element(Block::Divider, Some(&wrapper), None).unwrap();
        assert_eq!(doc.content().find(&wrapper).unwrap().children[0].id, child);
        assert_eq!(doc.content().len(), 3);
        assert!(doc.content().check().is_ok());
    }

    #[test]
    fn duplicate_inserts_copy_after_original() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let first = doc.add_element(heading("One"), None, None).unwrap();
        let last = doc.add_element(heading("Two"), None, None).unwrap();

        let copy = doc.duplicate_element(&first).unwrap();

        assert_ne!(copy, first);
        assert_eq!(top_level_ids(&doc), vec![first.clone(), copy.clone(), last]);
        assert_eq!(
            doc.content().find(&copy).unwrap().block,
            doc.content().find(&first).unwrap().block
        );
        assert_eq!(doc.selected_element().unwrap().id, copy);
    }

    #[test]
    fn move_into_section_and_reject_cycles() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let wrapper = doc.add_element(section(), None, None).unwrap();
        let inner = doc.add_element(section(), Some(&wrapper), None).unwrap();
        let title = doc.add_element(heading("Title"), None, None).unwrap();

        doc.move_element(&title, Some(&inner), 0).unwrap();
        assert_eq!(top_level_ids(&doc), vec![wrapper.clone()]);
        assert_eq!(doc.content().find(&inner).unwrap().children[0].id, title);

        assert_eq!(
            doc.move_element(&wrapper, Some(&inner), 0),
            Err(EditorError::InvalidMove(wrapper.clone()))
        );
    }

    #[test]
    fn remove_clears_selection_inside_subtree() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let wrapper = doc.add_element(section(), None, None).unwrap();
        let child = doc.add_element(heading("Inner"), Some(&wrapper), None).unwrap();
        doc.select(&child).unwrap();

        let removed = doc.remove_element(&wrapper).unwrap();

        assert_eq!(removed.children.len(), 1);
        assert!(doc.selected_element().is_none());
        assert!(doc.content().is_empty());
        assert_eq!(
            doc.remove_element(&wrapper),
            Err(EditorError::ElementNotFound(wrapper))
        );
    }

    #[test]
    fn undo_and_redo_restore_content_and_fields() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let id = doc.add_element(heading("Hello"), None, None).unwrap();
        doc.set_style(&id, "textAlign", Some("center".into())).unwrap();
        doc.set_title("About IeNet");

        assert!(doc.undo());
        assert_eq!(doc.title(), "About Us");
        assert!(doc.undo());
        assert!(doc.content().find(&id).unwrap().style.is_empty());
        assert!(doc.undo());
        assert!(doc.content().is_empty());
        assert!(doc.selected_element().is_none());
        assert!(!doc.undo());

        assert!(doc.redo());
        assert!(doc.content().find(&id).is_some());
    }

    #[test]
    fn saving_clears_dirty_unless_edited_meanwhile() {
        let mut doc = EditorDocument::new("About Us", "about-us");
        let revision = doc.revision();
        doc.mark_saved(revision, 12);
        assert!(!doc.is_dirty());
        assert_eq!(doc.page_id(), Some(12));

        let in_flight = doc.revision();
        doc.add_element(Block::Divider, None, None).unwrap();
        doc.mark_saved(in_flight, 12);
        assert!(doc.is_dirty());
    }

    #[test]
    fn loaded_page_starts_clean_and_round_trips_to_dtos() {
        let now = Utc::now();
        let page = PageResponseDto {
            id: 5,
            title: "Contact".into(),
            slug: "contact".into(),
            content: None,
            status: PageStatus::Published,
            meta_title: None,
            meta_description: Some("Reach the IeNet team".into()),
            canonical_url: Some("https://ienet.online/contact".into()),
            og_title: None,
            og_description: None,
            og_image: None,
            author_id: None,
            parent_id: None,
            sort_order: 0,
            view_count: 3,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        };

        let doc = EditorDocument::from_page(page);
        assert!(!doc.is_dirty());

        let draft = doc.to_draft();
        assert_eq!(draft.id, Some(5));
        let update = draft.to_update_dto();
        assert!(update.validate().is_ok());
        assert_eq!(update.canonical_url.as_deref(), Some("https://ienet.online/contact"));
        assert_eq!(draft.to_create_dto().status, Some(PageStatus::Published));
    }

    #[test]
    fn cleared_seo_field_is_sent_blank_on_update() {
        let mut doc = EditorDocument::new("Contact", "contact");
        doc.update_seo(|seo| {
            seo.meta_title = Some("Old title".into());
            seo.og_title = Some("Say hello".into());
        });
        doc.update_seo(|seo| seo.meta_title = None);

        let update = doc.to_draft().to_update_dto();
        assert!(update.validate().is_ok());
        assert_eq!(update.meta_title.as_deref(), Some(""));
        assert_eq!(update.og_title.as_deref(), Some("Say hello"));
        assert_eq!(update.og_image.as_deref(), Some(""));

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["metaTitle"], "");
    }
}
