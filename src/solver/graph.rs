use std::borrow::Cow;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::process::Command;

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};

use super::a_star::SearchNode;

type Nd = usize;
type Ed = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Type {
    Queued,
    Duplicate,
    Unique,
}

/// The search tree as it was explored, nodes are indexed by the order they were pushed in.
#[derive(Debug)]
pub(crate) struct Graph {
    nodes: Vec<(String, Type)>,
    edges: Vec<Ed>,
}

impl Graph {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub(crate) fn add<S: Debug>(&mut self, node: &SearchNode<'_, S>, prev_seq: Option<usize>) {
        assert_eq!(node.seq, self.nodes.len());

        let label = format!(
            "g: {}, h: {}\nf: {}\n{:?}",
            node.dist,
            node.cost - node.dist,
            node.cost,
            node.state
        );
        self.nodes.push((label, Type::Queued));

        if let Some(prev) = prev_seq {
            self.edges.push((prev, node.seq));
        }
    }

    pub(crate) fn mark_duplicate(&mut self, seq: usize) {
        self.nodes[seq].1 = Type::Duplicate;
    }

    pub(crate) fn mark_unique(&mut self, seq: usize) {
        self.nodes[seq].1 = Type::Unique;
    }

    /// Writes `state-space.dot` and renders it to svg, needs graphviz installed.
    pub(crate) fn draw_states(&self) -> io::Result<()> {
        let mut writer = Vec::new();
        dot::render(self, &mut writer)?;
        let s = String::from_utf8_lossy(&writer).replace(
            "digraph G {",
            "digraph G {\n    graph [fontname = \"hack\"];\n    node [fontname = \"hack\"];\n    edge [fontname = \"hack\"];",
        );
        fs::write("state-space.dot", &s)?;

        let status = Command::new("dot")
            .args(&["-Tsvg", "-O", "state-space.dot"])
            .status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("dot exited with {}", status),
            ));
        }
        Ok(())
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for Graph {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a> Labeller<'a, Nd, Ed> for Graph {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("G").expect("G is a valid dot id")
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).expect("N<number> is a valid dot id")
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        LabelText::EscStr(self.nodes[*n].0.as_str().into())
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.nodes[*n].1 == Type::Queued {
            Style::Solid
        } else {
            Style::Filled
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        Some(LabelText::LabelStr(
            match self.nodes[*n].1 {
                Type::Unique => "red",
                Type::Duplicate => "gray",
                Type::Queued => return None,
            }
            .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_the_tree() {
        let (a, b) = ("a", "b");
        let mut graph = Graph::new();
        graph.add(&SearchNode::new(&a, 0, 2, 0, 0), None);
        graph.add(&SearchNode::new(&b, 1, 1, 1, 1), Some(0));
        graph.mark_unique(0);
        graph.mark_duplicate(1);

        assert_eq!(graph.edges, vec![(0, 1)]);
        assert_eq!(graph.nodes[0].1, Type::Unique);
        assert_eq!(graph.nodes[1].1, Type::Duplicate);
        assert!(graph.nodes[1].0.starts_with("g: 1, h: 1\nf: 2\n"));

        let mut writer = Vec::new();
        dot::render(&graph, &mut writer).unwrap();
        let rendered = String::from_utf8(writer).unwrap();
        assert!(rendered.contains("N0 -> N1"));
    }
}
