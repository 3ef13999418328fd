//! Read-only connectivity view for netlist consumers.
//!
//! Nets and devices become nodes of a petgraph [`DiGraph`]. Edges run in
//! signal-flow direction: net to device for input pins, device to net for
//! output pins, each labelled with the pin name.

use crate::design::Design;
use crate::device::{PinDirection, PinName};
use crate::ids::{DeviceId, NetId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use std::collections::HashMap;

/// A node of the connectivity graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GraphNode {
    /// A net.
    Net(NetId),
    /// A device.
    Device(DeviceId),
}

/// Snapshot of a design's connectivity.
#[derive(Debug)]
pub struct ConnectivityGraph {
    graph: DiGraph<GraphNode, PinName>,
    nets: HashMap<NetId, NodeIndex>,
}

impl ConnectivityGraph {
    /// Builds the view from the current design contents.
    pub fn build(design: &Design) -> Self {
        let mut graph = DiGraph::new();
        let mut nets = HashMap::new();
        for (id, _) in design.nets.iter() {
            nets.insert(id, graph.add_node(GraphNode::Net(id)));
        }
        for (id, device) in design.devices.iter() {
            let node = graph.add_node(GraphNode::Device(id));
            for pin in &device.pins {
                let net = nets[&pin.net.net()];
                match pin.direction {
                    PinDirection::Input => graph.add_edge(net, node, pin.name),
                    PinDirection::Output => graph.add_edge(node, net, pin.name),
                };
            }
        }
        Self { graph, nets }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &DiGraph<GraphNode, PinName> {
        &self.graph
    }

    /// The device driving `net`, if any.
    pub fn driver_of(&self, net: NetId) -> Option<DeviceId> {
        let idx = *self.nets.get(&net)?;
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .find_map(|n| self.device_at(n))
    }

    /// Devices reading `net`, each listed once.
    pub fn readers_of(&self, net: NetId) -> Vec<DeviceId> {
        let Some(&idx) = self.nets.get(&net) else {
            return Vec::new();
        };
        let mut readers: Vec<DeviceId> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.device_at(n))
            .collect();
        readers.sort();
        readers.dedup();
        readers
    }

    /// Every device `net` transitively depends on.
    pub fn fanin_cone(&self, net: NetId) -> Vec<DeviceId> {
        let Some(&start) = self.nets.get(&net) else {
            return Vec::new();
        };
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, start);
        let mut cone = Vec::new();
        while let Some(node) = dfs.next(reversed) {
            if let Some(dev) = self.device_at(node) {
                cone.push(dev);
            }
        }
        cone.sort();
        cone
    }

    fn device_at(&self, node: NodeIndex) -> Option<DeviceId> {
        match self.graph[node] {
            GraphNode::Device(id) => Some(id),
            GraphNode::Net(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceKind, GateKind};
    use crate::types::ValueDomain;
    use vire_source::Span;

    fn gate(design: &mut Design, a: NetId, b: NetId, width: u32) -> (DeviceId, NetId) {
        let root = design.root_scope();
        let y = design
            .add_local_net(root, width, ValueDomain::Logic, false, Span::DUMMY)
            .unwrap();
        let dev = design
            .add_device(
                root,
                DeviceKind::Logic {
                    gate: GateKind::And,
                    width,
                    inputs: 2,
                },
                vec![
                    (PinName::Out, y.into()),
                    (PinName::In(0), a.into()),
                    (PinName::In(1), b.into()),
                ],
                Span::DUMMY,
            )
            .unwrap();
        (dev, y)
    }

    #[test]
    fn driver_readers_and_cone() {
        let mut design = Design::new("top");
        let root = design.root_scope();
        let a = design
            .add_signal(root, "a", 2, ValueDomain::Logic, false, Span::DUMMY)
            .unwrap();
        let b = design
            .add_signal(root, "b", 2, ValueDomain::Logic, false, Span::DUMMY)
            .unwrap();
        let (d0, t) = gate(&mut design, a, b, 2);
        let (d1, y) = gate(&mut design, t, a, 2);

        let view = ConnectivityGraph::build(&design);
        assert_eq!(view.driver_of(y), Some(d1));
        assert_eq!(view.driver_of(a), None);
        assert_eq!(view.readers_of(a), vec![d0, d1]);
        assert_eq!(view.fanin_cone(y), vec![d0, d1]);
        assert_eq!(view.fanin_cone(t), vec![d0]);
        assert_eq!(view.graph().node_count(), design.nets.len() + 2);
    }
}
