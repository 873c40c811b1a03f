use std::collections::HashMap;

/// Handle to a node in a [`PageDocument`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A single element in the page model.
///
/// Carries the attributes the scanner cares about: tag name, optional id,
/// class list, attribute map (`src`, `href`, `data-*`), and text content.
/// `activations` counts how many times the element's primary action was
/// triggered via [`PageDocument::click`].
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub detached: bool,
    pub activations: u32,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            detached: false,
            activations: 0,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// The class list joined with spaces, as it would appear in markup.
    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }
}

/// Owned, mutable model of one loaded page.
///
/// Nodes live in an arena indexed by [`NodeId`]. Removal detaches a node and
/// its entire subtree; detached nodes keep their arena slot so stale handles
/// stay valid but are excluded from queries. Removing an already-detached
/// node is a no-op, never an error.
pub struct PageDocument {
    hostname: String,
    nodes: Vec<ElementNode>,
    root: Option<NodeId>,
}

impl PageDocument {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Creates the root element. Replaces any previous root wholesale.
    pub fn create_root(&mut self, element: ElementNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        self.root = Some(id);
        id
    }

    /// Appends `element` as the last child of `parent`.
    /// Returns `None` if the parent does not exist or is detached.
    pub fn append_child(&mut self, parent: NodeId, element: ElementNode) -> Option<NodeId> {
        if !self.is_attached(parent) {
            return None;
        }
        let id = NodeId(self.nodes.len());
        let mut element = element;
        element.parent = Some(parent);
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).map(|n| !n.detached).unwrap_or(false)
    }

    /// Detaches `id` and its whole subtree and unlinks it from its parent.
    /// Returns true if the node was attached before the call.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            self.nodes[node.0].detached = true;
            stack.extend(self.nodes[node.0].children.iter().copied());
        }
        if self.root == Some(id) {
            self.root = None;
        }
        true
    }

    /// All attached nodes matching `pred`, in arena (document) order.
    pub fn query<F>(&self, pred: F) -> Vec<NodeId>
    where
        F: Fn(&ElementNode) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.detached && pred(n))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Walks up from `id` (inclusive) looking for the nearest attached
    /// ancestor matching `pred`.
    pub fn closest<F>(&self, id: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&ElementNode) -> bool,
    {
        let mut current = Some(id);
        while let Some(node) = current {
            let element = self.nodes.get(node.0)?;
            if !element.detached && pred(element) {
                return Some(node);
            }
            current = element.parent;
        }
        None
    }

    /// Triggers the element's primary action. No-op when detached.
    pub fn click(&mut self, id: NodeId) {
        if self.is_attached(id) {
            self.nodes[id.0].activations += 1;
        }
    }

    pub fn activations(&self, id: NodeId) -> u32 {
        self.nodes.get(id.0).map(|n| n.activations).unwrap_or(0)
    }

    pub fn attached_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.detached).count()
    }

    /// Direct children of `id`, the scope the mutation observer watches.
    pub fn direct_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }
}
