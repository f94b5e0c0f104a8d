//! ASCII tree output
//!
//! ```text
//! #42 - Acme external
//! ├── 5 days remaining
//! ├── Clients
//! │   └── Wile Coyote (Acme)
//! └── Scope
//!     └── #7 - www.acme.test
//! ```

/// A node of a rendered tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Append a leaf and return `self` for chaining.
    pub fn leaf(mut self, label: impl Into<String>) -> Self {
        self.children.push(TreeNode::new(label));
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Render the tree, root label first.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.label);
        output.push('\n');

        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_child(&mut output, "", i + 1 == count);
        }

        output
    }

    fn render_child(&self, output: &mut String, prefix: &str, is_last: bool) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(&self.label);
        output.push('\n');

        let child_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };

        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_child(output, &child_prefix, i + 1 == count);
        }
    }
}
