use super::{JsonCache, NodeId, NodeState, ROOT};
use crate::source::Source;

impl<S: Source> JsonCache<S> {
    /// Renders the current cache contents as indented pseudo-JSON, one block
    /// per node with its offset, leaf flag, and value. Key order within a
    /// branch is unspecified. Intended for debugging only.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        self.dump_node(ROOT, 1, &mut out);
        out.push_str("}\n");
        out
    }

    fn dump_node(&self, node_id: NodeId, level: usize, out: &mut String) {
        let node = &self.nodes[node_id];
        push_line(level, &format!("position: {},", node.position), out);
        push_line(
            level,
            &format!("leaf: {},", matches!(node.state, NodeState::Leaf(_))),
            out,
        );
        match &node.state {
            NodeState::Unscanned => push_line(level, "value: <unscanned>,", out),
            NodeState::Leaf(value) => push_line(level, &format!("value: {value},"), out),
            NodeState::Branch(children) => {
                push_line(level, "value: {", out);
                for (key, &child) in children {
                    push_line(level + 1, &format!("{key}: {{"), out);
                    self.dump_node(child, level + 2, out);
                    push_line(level + 1, "},", out);
                }
                push_line(level, "},", out);
            }
        }
    }
}

fn push_line(level: usize, text: &str, out: &mut String) {
    for _ in 0..level {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
