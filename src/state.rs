//! Client-side application state
//!
//! The in-memory state tree: one collection slice per domain entity plus
//! the enrollment id-lists and the current user. Slices are plain data
//! updated through a small set of merge functions; every durable fact
//! lives on the backend, and the client resynchronizes by refetching the
//! affected collection after each mutation rather than patching
//! incrementally. The auth slice is the only part that persists across
//! runs (see `session`).

use orator_protocol::{Class, Course, Group, Pagination, Presentation, Topic, User};

use crate::client::Page;

/// Entities addressable by their backend-assigned id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Course {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Class {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Topic {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Group {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Presentation {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for User {
    fn key(&self) -> i64 {
        self.id
    }
}

/// One domain collection plus its server-supplied pagination.
///
/// Merge rules:
/// - a fetch stores the returned page verbatim;
/// - create puts the new entity at the head, displacing any stale copy
///   with the same id;
/// - update replaces exactly the id-matched entry;
/// - delete filters the entry out and decrements the tracked total.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T: Keyed> CollectionState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }

    pub fn set_page(&mut self, page: Page<T>) {
        self.items = page.items;
        self.pagination = page.pagination;
    }

    pub fn insert_front(&mut self, item: T) {
        let id = item.key();
        self.items.retain(|existing| existing.key() != id);
        self.items.insert(0, item);
    }

    /// Replace the id-matched entry in place; a miss is a no-op (the next
    /// refetch reconciles).
    pub fn replace(&mut self, item: T) {
        let id = item.key();
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.key() == id) {
            *slot = item;
        }
    }

    pub fn remove(&mut self, id: i64) {
        let before = self.items.len();
        self.items.retain(|existing| existing.key() != id);

        if self.items.len() < before {
            if let Some(pagination) = &mut self.pagination {
                pagination.total = pagination.total.saturating_sub(1);
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pagination = None;
    }
}

/// Flat id-lists recording which courses, topics and classes the current
/// student participates in. Membership checks back the enroll/drop UI.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentState {
    pub course_ids: Vec<i64>,
    pub topic_ids: Vec<i64>,
    pub class_ids: Vec<i64>,
}

impl EnrollmentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_course_ids(&mut self, ids: Vec<i64>) {
        self.course_ids = ids;
    }

    pub fn set_topic_ids(&mut self, ids: Vec<i64>) {
        self.topic_ids = ids;
    }

    pub fn set_class_ids(&mut self, ids: Vec<i64>) {
        self.class_ids = ids;
    }

    pub fn add_course(&mut self, id: i64) {
        if !self.course_ids.contains(&id) {
            self.course_ids.push(id);
        }
    }

    pub fn add_topic(&mut self, id: i64) {
        if !self.topic_ids.contains(&id) {
            self.topic_ids.push(id);
        }
    }

    pub fn add_class(&mut self, id: i64) {
        if !self.class_ids.contains(&id) {
            self.class_ids.push(id);
        }
    }

    pub fn remove_course(&mut self, id: i64) {
        self.course_ids.retain(|&existing| existing != id);
    }

    pub fn remove_topic(&mut self, id: i64) {
        self.topic_ids.retain(|&existing| existing != id);
    }

    pub fn has_course(&self, id: i64) -> bool {
        self.course_ids.contains(&id)
    }

    pub fn has_topic(&self, id: i64) -> bool {
        self.topic_ids.contains(&id)
    }

    pub fn has_class(&self, id: i64) -> bool {
        self.class_ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.course_ids.clear();
        self.topic_ids.clear();
        self.class_ids.clear();
    }
}

/// The full client state tree.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: Option<User>,
    pub courses: CollectionState<Course>,
    pub classes: CollectionState<Class>,
    pub topics: CollectionState<Topic>,
    pub groups: CollectionState<Group>,
    pub users: CollectionState<User>,
    pub presentations: CollectionState<Presentation>,
    pub enrollments: EnrollmentState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything tied to the authenticated user. Called on logout.
    pub fn clear_session(&mut self) {
        self.user = None;
        self.enrollments.clear();
        self.groups.clear();
        self.presentations.clear();
    }
}
