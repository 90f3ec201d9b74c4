//! Owning storage for every flow in a system.
//!
//! Devices hold `FlowId` handles into the arena, so a flow written by its
//! producing device is read by its consumer without copying.

use sf_core::{FlowId, Id};
use sf_thermo::Flow;

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, Default)]
pub struct FlowArena {
    flows: Vec<Flow>,
}

impl FlowArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flow: Flow) -> GraphResult<FlowId> {
        let id = Id::from_index(self.flows.len())?;
        self.flows.push(flow);
        Ok(id)
    }

    pub fn get(&self, id: FlowId) -> GraphResult<&Flow> {
        self.flows
            .get(id.slot())
            .ok_or(GraphError::IdNotFound { what: "Flow", id })
    }

    pub fn get_mut(&mut self, id: FlowId) -> GraphResult<&mut Flow> {
        self.flows
            .get_mut(id.slot())
            .ok_or(GraphError::IdNotFound { what: "Flow", id })
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FlowId, &Flow)> {
        self.flows
            .iter()
            .enumerate()
            .filter_map(|(i, f)| Some((Id::from_index(i).ok()?, f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_thermo::EnergyFlow;

    #[test]
    fn handles_are_stable() {
        let mut arena = FlowArena::new();
        let a = arena.insert(Flow::from(EnergyFlow::new("a", 1.0))).unwrap();
        let b = arena.insert(Flow::from(EnergyFlow::new("b", 2.0))).unwrap();
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a).unwrap().name(), "a");

        arena
            .get_mut(b)
            .unwrap()
            .as_energy_mut()
            .unwrap()
            .set_energy(5.0)
            .unwrap();
        assert_eq!(arena.get(b).unwrap().energy().unwrap(), 5.0);

        let names: Vec<_> = arena.iter().map(|(_, f)| f.name().to_string()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn unknown_handle_is_error() {
        let arena = FlowArena::new();
        assert!(matches!(
            arena.get(Id::from_index(3).unwrap()),
            Err(GraphError::IdNotFound { .. })
        ));
    }
}
