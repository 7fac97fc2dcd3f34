use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::watcher::Rect;
use super::Surface;

#[derive(Default)]
struct NodeState {
    classes: Vec<String>,
    text: String,
    styles: BTreeMap<String, String>,
    children: Vec<FakeNode>,
    rect: Option<Rect>,
}

/// In-memory element. Clones share state, like handles to the same DOM node.
#[derive(Clone, Default)]
pub struct FakeNode(Rc<RefCell<NodeState>>);

impl FakeNode {
    pub fn set_rect(&self, rect: Rect) {
        self.0.borrow_mut().rect = Some(rect);
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn children(&self) -> Vec<FakeNode> {
        self.0.borrow().children.clone()
    }
}

impl Surface for FakeNode {
    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn append_div(&self) -> Option<Self> {
        let child = FakeNode::default();
        self.0.borrow_mut().children.push(child.clone());
        Some(child)
    }

    fn client_rect(&self) -> Option<Rect> {
        self.0.borrow().rect
    }
}
