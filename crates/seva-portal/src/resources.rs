//! ---
//! seva_section: "07-portal-services"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Certificate and resource services gated by role view."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Numeric resource identifier, assigned sequentially from 1.
pub type ResourceId = u32;

/// Category of a bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Hall or meeting room.
    Room,
    /// Portable equipment.
    Equipment,
    /// Transport.
    Vehicle,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::Room => "Room",
            ResourceKind::Equipment => "Equipment",
            ResourceKind::Vehicle => "Vehicle",
        };
        f.write_str(label)
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "room" => Ok(ResourceKind::Room),
            "equipment" => Ok(ResourceKind::Equipment),
            "vehicle" => Ok(ResourceKind::Vehicle),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

/// Booking state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceStatus {
    /// Free to book.
    #[default]
    Available,
    /// Already taken.
    Booked,
    /// Out of service.
    Maintenance,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceStatus::Available => "Available",
            ResourceStatus::Booked => "Booked",
            ResourceStatus::Maintenance => "Maintenance",
        };
        f.write_str(label)
    }
}

/// A bookable room, piece of equipment or vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: ResourceKind,
    /// Seats or passengers; zero when not applicable.
    pub capacity: u32,
    /// Booking state.
    pub status: ResourceStatus,
}

/// Resource inventory in insertion order.
#[derive(Debug, Clone)]
pub struct ResourceBook {
    resources: IndexMap<ResourceId, Resource>,
    next_id: ResourceId,
}

impl Default for ResourceBook {
    fn default() -> Self {
        Self {
            resources: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl ResourceBook {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource and return its id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        kind: ResourceKind,
        capacity: u32,
        status: ResourceStatus,
    ) -> ResourceId {
        let id = self.next_id;
        self.next_id += 1;
        self.resources.insert(
            id,
            Resource {
                id,
                name: name.into(),
                kind,
                capacity,
                status,
            },
        );
        id
    }

    /// Book an available resource.
    pub fn book(&mut self, id: ResourceId) -> Result<Resource, PortalError> {
        let resource = self
            .resources
            .get_mut(&id)
            .ok_or(PortalError::UnknownResource(id))?;
        if resource.status != ResourceStatus::Available {
            return Err(PortalError::ResourceUnavailable {
                id,
                status: resource.status,
            });
        }
        resource.status = ResourceStatus::Booked;
        Ok(resource.clone())
    }

    /// Resource by id.
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    /// All resources in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Resources that can currently be booked.
    pub fn available(&self) -> usize {
        self.list()
            .filter(|resource| resource.status == ResourceStatus::Available)
            .count()
    }

    /// Total number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
