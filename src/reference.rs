//! Client-side joins from launches to the independently fetched reference
//! collections. Lookups never fail; a dangling key yields an empty label.
use std::collections::HashMap;

use crate::model::{Launch, Launchpad, Payload, Rocket};

#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    rockets: Vec<Rocket>,
    launchpads: Vec<Launchpad>,
    rocket_by_id: HashMap<String, usize>,
    launchpad_by_id: HashMap<String, usize>,
    payload_by_id: HashMap<String, Payload>,
}

impl ReferenceIndex {
    pub fn new(rockets: Vec<Rocket>, launchpads: Vec<Launchpad>, payloads: Vec<Payload>) -> Self {
        // First record wins on duplicate ids, matching a linear find.
        let mut rocket_by_id = HashMap::new();
        for (i, r) in rockets.iter().enumerate() {
            rocket_by_id.entry(r.id.clone()).or_insert(i);
        }
        let mut launchpad_by_id = HashMap::new();
        for (i, p) in launchpads.iter().enumerate() {
            launchpad_by_id.entry(p.id.clone()).or_insert(i);
        }
        let mut payload_by_id = HashMap::new();
        for p in payloads {
            payload_by_id.entry(p.id.clone()).or_insert(p);
        }
        Self {
            rockets,
            launchpads,
            rocket_by_id,
            launchpad_by_id,
            payload_by_id,
        }
    }

    /// Rockets in fetch order, for filter options.
    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// Launchpads in fetch order, for filter options.
    pub fn launchpads(&self) -> &[Launchpad] {
        &self.launchpads
    }

    pub fn rocket_name(&self, launch: &Launch) -> &str {
        launch
            .rocket
            .as_deref()
            .and_then(|id| self.rocket_by_id.get(id))
            .map(|&i| self.rockets[i].name.as_str())
            .unwrap_or("")
    }

    pub fn launchpad_name(&self, launch: &Launch) -> &str {
        launch
            .launchpad
            .as_deref()
            .and_then(|id| self.launchpad_by_id.get(id))
            .map(|&i| self.launchpads[i].name.as_str())
            .unwrap_or("")
    }

    fn payloads_of<'a>(&'a self, launch: &'a Launch) -> impl Iterator<Item = &'a Payload> + 'a {
        launch
            .payload_ids()
            .iter()
            .filter_map(move |id| self.payload_by_id.get(id))
    }

    /// Space-joined payload types of a launch.
    pub fn payload_types(&self, launch: &Launch) -> String {
        self.payloads_of(launch)
            .map(|p| p.kind.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Space-joined customer names across every payload of a launch.
    pub fn payload_customers(&self, launch: &Launch) -> String {
        self.payloads_of(launch)
            .flat_map(|p| p.customers.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
