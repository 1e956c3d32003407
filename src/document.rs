//! In-process stand-in for the page: mounted containers, text fields,
//! input values, transient notices, open comment sections and the
//! navigation target. Renderers only ever patch this through keyed diffs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::{comment_input_post, comments_section_id};
use crate::view::{self, Node, Patch};

#[derive(Debug, Default)]
pub struct Container {
    nodes: Vec<Node>,
    last_patches: Vec<Patch>,
}

impl Container {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn html(&self) -> String {
        view::render_html(&self.nodes)
    }

    /// Patches applied by the most recent render.
    pub fn last_patches(&self) -> &[Patch] {
        &self.last_patches
    }

    fn patch(&mut self, next: Vec<Node>) {
        let patches = view::diff(&self.nodes, &next);
        let prev = std::mem::take(&mut self.nodes);
        self.nodes = view::apply(prev, &patches, &next);
        self.last_patches = patches;
    }
}

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct Document {
    location: Option<String>,
    containers: BTreeMap<String, Container>,
    fields: BTreeMap<String, String>,
    inputs: BTreeMap<String, String>,
    notices: BTreeMap<String, Notice>,
    open_sections: BTreeSet<i64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // === Navigation ===

    pub fn navigate(&mut self, to: &str) {
        log::debug!("navigate -> {}", to);
        self.location = Some(to.to_string());
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    // === Containers ===

    pub fn mount(&mut self, id: &str) {
        self.containers.entry(id.to_string()).or_default();
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    /// Replace a mounted container's children by diffing. Returns false
    /// when the container is not mounted.
    pub fn patch(&mut self, id: &str, next: Vec<Node>) -> bool {
        match self.containers.get_mut(id) {
            Some(container) => {
                container.patch(next);
                self.forget_unrendered();
                true
            }
            None => false,
        }
    }

    /// Post ids with a card in any mounted container.
    fn rendered_posts(&self) -> BTreeSet<i64> {
        self.containers
            .values()
            .flat_map(|c| c.nodes.iter())
            .filter_map(|n| n.key()?.strip_prefix("post-")?.parse().ok())
            .collect()
    }

    // Section state and comment drafts only live as long as their post.
    fn forget_unrendered(&mut self) {
        let rendered = self.rendered_posts();
        self.open_sections.retain(|id| rendered.contains(id));
        self.inputs.retain(|id, _| match comment_input_post(id) {
            Some(post_id) => rendered.contains(&post_id),
            None => true,
        });
    }

    // === Text fields ===

    pub fn set_field(&mut self, id: &str, value: impl Into<String>) {
        self.fields.insert(id.to_string(), value.into());
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    // === Inputs ===

    pub fn set_input(&mut self, id: &str, value: impl Into<String>) {
        self.inputs.insert(id.to_string(), value.into());
    }

    pub fn input(&self, id: &str) -> &str {
        self.inputs.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn clear_input(&mut self, id: &str) {
        self.inputs.remove(id);
    }

    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    // === Notices ===

    pub fn show_notice(&mut self, id: &str, message: impl Into<String>, ttl: Duration) {
        self.notices.insert(
            id.to_string(),
            Notice {
                message: message.into(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Message of a notice that has not yet auto-dismissed.
    pub fn notice(&self, id: &str) -> Option<&str> {
        self.notices
            .get(id)
            .filter(|n| Instant::now() < n.expires_at)
            .map(|n| n.message.as_str())
    }

    pub fn visible_notices(&self) -> Vec<(&str, &str)> {
        let now = Instant::now();
        self.notices
            .iter()
            .filter(|(_, n)| now < n.expires_at)
            .map(|(id, n)| (id.as_str(), n.message.as_str()))
            .collect()
    }

    // === Comment sections ===

    pub fn open_section(&mut self, post_id: i64) {
        self.open_sections.insert(post_id);
        self.sync_section(post_id);
    }

    /// Flip a section; returns whether it is now open.
    pub fn toggle_section(&mut self, post_id: i64) -> bool {
        let open = if self.open_sections.remove(&post_id) {
            false
        } else {
            self.open_sections.insert(post_id);
            true
        };
        self.sync_section(post_id);
        open
    }

    // Rendered sections pick up the new state without a re-fetch.
    fn sync_section(&mut self, post_id: i64) {
        let id = comments_section_id(post_id);
        let style = if self.open_sections.contains(&post_id) {
            "display: block;"
        } else {
            "display: none;"
        };
        for container in self.containers.values_mut() {
            for node in container.nodes.iter_mut() {
                if let Some(section) = node.find_by_id_mut(&id) {
                    section.set_attr("style", style);
                }
            }
        }
    }

    pub fn is_section_open(&self, post_id: i64) -> bool {
        self.open_sections.contains(&post_id)
    }

    pub fn open_sections(&self) -> &BTreeSet<i64> {
        &self.open_sections
    }
}

/// Modal interactions: yes/no confirmation and blocking alerts.
pub trait Dialogs: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Answers every confirmation the same way and records what was shown.
pub struct RecordingDialogs {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingDialogs {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        log::info!("alert: {}", message);
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
