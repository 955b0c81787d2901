//! Dependency-graph program representation.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::register::{ClassicalRegister, ClbitId, QregKind, QuantumRegister, QubitId};

/// Node index type for the program DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the program DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a wire.
    In(WireId),
    /// Output node for a wire.
    Out(WireId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// An edge in the program DAG representing a wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// A program as a directed acyclic dependency graph.
///
/// - Nodes are either input nodes, output nodes, or operation nodes
/// - Edges represent wires (quantum or classical)
/// - Each wire has exactly one input and one output node
/// - Operations are connected along their wires in dependency order
///
/// A classically guarded instruction depends on the wires of its guard
/// bits in addition to its operand wires, so it is ordered after the
/// measurement that produces the guarded value.
///
/// ## Performance
///
/// The DAG maintains a `wire_front` index that maps each wire to the
/// last node before the output node. This enables O(1) predecessor
/// lookups in `append()` instead of scanning all incoming edges of the
/// output node.
#[derive(Debug)]
pub struct DagProgram {
    name: String,
    /// The underlying graph.
    graph: DiGraph<DagNode, DagEdge, u32>,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    /// Map from qubit to its input node.
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from qubit to its output node.
    qubit_outputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from classical bit to its input node.
    clbit_inputs: FxHashMap<ClbitId, NodeIndex>,
    /// Map from classical bit to its output node.
    clbit_outputs: FxHashMap<ClbitId, NodeIndex>,
    /// Wire front: maps each wire to the node just before the output node.
    wire_front: FxHashMap<WireId, NodeIndex>,
    next_qubit: u32,
    next_clbit: u32,
}

impl DagProgram {
    /// Create a new empty program DAG.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::default(),
            qregs: vec![],
            cregs: vec![],
            qubit_inputs: FxHashMap::default(),
            qubit_outputs: FxHashMap::default(),
            clbit_inputs: FxHashMap::default(),
            clbit_outputs: FxHashMap::default(),
            wire_front: FxHashMap::default(),
            next_qubit: 0,
            next_clbit: 0,
        }
    }

    /// Get the program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The quantum registers in insertion order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// The classical registers in insertion order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Number of operation nodes.
    #[inline]
    pub fn num_ops(&self) -> usize {
        let io_nodes = 2 * (self.qubit_inputs.len() + self.clbit_inputs.len());
        self.graph.node_count().saturating_sub(io_nodes)
    }

    fn add_qubit(&mut self) -> QubitId {
        let qubit = QubitId(self.next_qubit);
        self.next_qubit += 1;
        let wire = WireId::Qubit(qubit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.qubit_inputs.insert(qubit, in_node);
        self.qubit_outputs.insert(qubit, out_node);
        // Wire front: initially the input node is the predecessor of the output.
        self.wire_front.insert(wire, in_node);
        qubit
    }

    fn add_clbit(&mut self) -> ClbitId {
        let clbit = ClbitId(self.next_clbit);
        self.next_clbit += 1;
        let wire = WireId::Clbit(clbit);
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.clbit_inputs.insert(clbit, in_node);
        self.clbit_outputs.insert(clbit, out_node);
        self.wire_front.insert(wire, in_node);
        clbit
    }

    /// Thread `op_node` onto `wire`, between the current front and the
    /// output node.
    fn thread_wire(&mut self, op_node: NodeIndex, wire: WireId, out_node: NodeIndex) -> IrResult<()> {
        let prev_node = self.wire_front[&wire];

        let edge_id = self
            .graph
            .edges_directed(prev_node, Direction::Outgoing)
            .find(|e| e.weight().wire == wire && e.target() == out_node)
            .map(|e| e.id());

        let eid = edge_id.ok_or_else(|| {
            IrError::InvalidDag(format!(
                "missing edge from predecessor to output for wire {wire:?}"
            ))
        })?;
        self.graph.remove_edge(eid);
        self.graph.add_edge(prev_node, op_node, DagEdge { wire });
        self.graph.add_edge(op_node, out_node, DagEdge { wire });
        // This op is now the predecessor of the output.
        self.wire_front.insert(wire, op_node);
        Ok(())
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        for &qubit in &instruction.qubits {
            if !self.qubit_inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        let guard_bits = instruction
            .condition
            .iter()
            .flat_map(|c| c.clbits.iter().copied());
        for clbit in instruction.clbits.iter().copied().chain(guard_bits) {
            if !self.clbit_inputs.contains_key(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Iterate over operations in topological order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        let sorted: Vec<_> = petgraph::algo::toposort(&self.graph, None)
            .expect("DAG must be acyclic — cycle detected in program graph")
            .into_iter()
            .filter_map(|idx| {
                if let DagNode::Op(inst) = &self.graph[idx] {
                    Some((idx, inst))
                } else {
                    None
                }
            })
            .collect();

        sorted.into_iter()
    }

    /// Calculate the program depth (longest operation chain).
    pub fn depth(&self) -> usize {
        let node_count = self.graph.node_count();
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(node_count, Default::default());

        let mut max_depth = 0usize;

        for node in petgraph::algo::toposort(&self.graph, None)
            .expect("DAG must be acyclic — cycle detected in program graph")
        {
            let max_pred_depth = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);

            let node_depth = if matches!(self.graph[node], DagNode::Op(_)) {
                max_pred_depth + 1
            } else {
                max_pred_depth
            };

            if node_depth > max_depth {
                max_depth = node_depth;
            }
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks that:
    /// - The graph is acyclic
    /// - Every wire has exactly one In node and one Out node
    /// - Wire edges form valid paths from In to Out for each wire
    /// - All operation nodes are reachable from some In node
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("graph contains a cycle".into()));
        }

        for &qubit in self.qubit_inputs.keys() {
            if !self.qubit_outputs.contains_key(&qubit) {
                return Err(IrError::InvalidDag(format!(
                    "qubit {qubit} has an In node but no Out node"
                )));
            }
        }
        for &clbit in self.clbit_inputs.keys() {
            if !self.clbit_outputs.contains_key(&clbit) {
                return Err(IrError::InvalidDag(format!(
                    "clbit {clbit} has an In node but no Out node"
                )));
            }
        }

        // Walk each wire from In to Out.
        let qubit_wires = self
            .qubit_inputs
            .iter()
            .map(|(&q, &n)| (WireId::Qubit(q), n, self.qubit_outputs[&q]));
        let clbit_wires = self
            .clbit_inputs
            .iter()
            .map(|(&c, &n)| (WireId::Clbit(c), n, self.clbit_outputs[&c]));

        for (wire, in_node, out_node) in qubit_wires.chain(clbit_wires) {
            let mut current = in_node;
            let mut steps = 0;
            let max_steps = self.graph.node_count();

            while current != out_node {
                let next = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .find(|e| e.weight().wire == wire)
                    .map(|e| e.target());

                match next {
                    Some(n) => current = n,
                    None => {
                        return Err(IrError::InvalidDag(format!(
                            "wire {wire:?} is broken: no outgoing edge from node {current:?}"
                        )));
                    }
                }

                steps += 1;
                if steps > max_steps {
                    return Err(IrError::InvalidDag(format!(
                        "wire {wire:?} has too many steps (possible loop)"
                    )));
                }
            }
        }

        // A successful toposort visits all nodes; if the sorted set covers
        // the whole graph, every op node is reachable.
        let topo_nodes = petgraph::algo::toposort(&self.graph, None).unwrap_or_default();
        if topo_nodes.len() != self.graph.node_count() {
            return Err(IrError::InvalidDag(
                "unreachable operation node found in DAG".into(),
            ));
        }

        Ok(())
    }
}

impl Program for DagProgram {
    fn add_qreg(&mut self, kind: QregKind, name: &str, size: u32) -> IrResult<QuantumRegister> {
        if self.has_register(name) {
            return Err(IrError::DuplicateRegister(name.to_string()));
        }
        let wires = (0..size).map(|_| self.add_qubit()).collect();
        let reg = QuantumRegister::new(name, kind, wires);
        self.qregs.push(reg.clone());
        Ok(reg)
    }

    fn add_creg(&mut self, name: &str, size: u32) -> IrResult<ClassicalRegister> {
        if self.has_register(name) {
            return Err(IrError::DuplicateRegister(name.to_string()));
        }
        let bits = (0..size).map(|_| self.add_clbit()).collect();
        let reg = ClassicalRegister::new(name, bits);
        self.cregs.push(reg.clone());
        Ok(reg)
    }

    fn has_register(&self, name: &str) -> bool {
        self.qregs.iter().any(|r| r.name() == name) || self.cregs.iter().any(|r| r.name() == name)
    }

    fn append(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;

        let op_node = self.graph.add_node(DagNode::Op(instruction.clone()));

        // Quantum operand wires.
        for &qubit in &instruction.qubits {
            let out_node = self.qubit_outputs[&qubit];
            self.thread_wire(op_node, WireId::Qubit(qubit), out_node)?;
        }

        // Classical operand wires, then guard wires. A bit appearing both
        // as operand and guard is threaded once.
        let mut threaded = FxHashSet::default();
        let guard_bits = instruction
            .condition
            .iter()
            .flat_map(|c| c.clbits.iter().copied());
        for clbit in instruction.clbits.iter().copied().chain(guard_bits) {
            if !threaded.insert(clbit) {
                continue;
            }
            let out_node = self.clbit_outputs[&clbit];
            self.thread_wire(op_node, WireId::Clbit(clbit), out_node)?;
        }

        Ok(())
    }

    fn num_qubits(&self) -> usize {
        self.next_qubit as usize
    }

    fn num_clbits(&self) -> usize {
        self.next_clbit as usize
    }

    fn instructions(&self) -> Vec<Instruction> {
        self.topological_ops().map(|(_, inst)| inst.clone()).collect()
    }
}

impl Default for DagProgram {
    fn default() -> Self {
        Self::new("program")
    }
}

impl Clone for DagProgram {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            graph: self.graph.clone(),
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            qubit_inputs: self.qubit_inputs.clone(),
            qubit_outputs: self.qubit_outputs.clone(),
            clbit_inputs: self.clbit_inputs.clone(),
            clbit_outputs: self.clbit_outputs.clone(),
            wire_front: self.wire_front.clone(),
            next_qubit: self.next_qubit,
            next_clbit: self.next_clbit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use crate::instruction::Condition;

    #[test]
    fn test_empty_dag() {
        let dag = DagProgram::new("test");
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_clbits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut dag = DagProgram::new("test");
        let q = dag.add_qreg(QregKind::Data, "q0", 2).unwrap();
        dag.add_creg("measure0", 2).unwrap();
        assert_eq!(q.wires(), [QubitId(0), QubitId(1)]);
        assert_eq!(dag.num_qubits(), 2);
        assert_eq!(dag.num_clbits(), 2);
        assert!(dag.has_register("q0"));
        assert!(!dag.has_register("q1"));
    }

    #[test]
    fn test_append_gate() {
        let mut dag = DagProgram::new("test");
        dag.add_qreg(QregKind::Data, "q0", 1).unwrap();

        dag.append(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();

        assert_eq!(dag.num_ops(), 1);
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_parallel_gates_depth() {
        let mut dag = DagProgram::new("test");
        dag.add_qreg(QregKind::Data, "q0", 2).unwrap();

        dag.append(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.append(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();

        assert_eq!(dag.num_ops(), 2);
        // Parallel gates have depth 1
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_guard_orders_after_measurement() {
        let mut dag = DagProgram::new("test");
        dag.add_qreg(QregKind::Data, "q0", 2).unwrap();
        dag.add_creg("measure0", 1).unwrap();

        dag.append(Instruction::measure(QubitId(0), ClbitId(0)))
            .unwrap();
        // Guarded gate on a different qubit: only the classical wire links it
        // to the measurement.
        dag.append(
            Instruction::single_qubit_gate(StandardGate::X, QubitId(1))
                .with_condition(Condition::new([ClbitId(0)], 1)),
        )
        .unwrap();

        let names: Vec<_> = dag
            .instructions()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, ["measure", "x"]);
        // The classical dependency makes the chain depth 2.
        assert_eq!(dag.depth(), 2);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_qubit_not_found() {
        let mut dag = DagProgram::new("test");
        dag.add_qreg(QregKind::Data, "q0", 1).unwrap();

        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(99));
        assert!(matches!(
            dag.append(inst),
            Err(IrError::QubitNotFound { qubit, .. }) if qubit == QubitId(99)
        ));
    }

    #[test]
    fn test_verify_integrity_after_build() {
        let mut dag = DagProgram::new("test");
        dag.add_qreg(QregKind::Data, "q0", 3).unwrap();
        dag.add_creg("measure0", 3).unwrap();

        dag.append(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.append(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(0),
            QubitId(1),
        ))
        .unwrap();
        dag.append(Instruction::two_qubit_gate(
            StandardGate::CX,
            QubitId(1),
            QubitId(2),
        ))
        .unwrap();
        for i in 0..3u32 {
            dag.append(Instruction::measure(QubitId(i), ClbitId(i)))
                .unwrap();
        }

        dag.verify_integrity().unwrap();
        assert_eq!(dag.num_ops(), 6);
    }
}
