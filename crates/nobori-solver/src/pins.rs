//! Pin sets: particle slots held at their rest position.

use nobori_types::{NoboriError, NoboriResult, ParticleId};
use serde::{Deserialize, Serialize};

use crate::topology::ClothTopology;

/// Ordered list of pinned particle slots.
///
/// Validated against the particle count it was built for; the simulation
/// re-checks it when the set is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSet {
    ids: Vec<ParticleId>,
}

impl PinSet {
    /// No pins: the cloth falls freely.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(ids: Vec<ParticleId>, particle_count: usize) -> NoboriResult<Self> {
        let pins = Self { ids };
        pins.validate(particle_count)?;
        Ok(pins)
    }

    /// Pins from raw slot numbers, as a host would list them.
    pub fn from_indices(indices: &[u32], particle_count: usize) -> NoboriResult<Self> {
        Self::new(indices.iter().copied().map(ParticleId).collect(), particle_count)
    }

    /// Every particle of grid row `v`, in increasing `u`.
    pub fn row(topology: &ClothTopology, v: u32) -> NoboriResult<Self> {
        let ids = (0..=topology.width_segments())
            .map(|u| topology.index(u, v))
            .collect::<NoboriResult<Vec<_>>>()?;
        Ok(Self { ids })
    }

    /// Every particle of grid column `u`, in increasing `v`.
    pub fn column(topology: &ClothTopology, u: u32) -> NoboriResult<Self> {
        let ids = (0..=topology.height_segments())
            .map(|v| topology.index(u, v))
            .collect::<NoboriResult<Vec<_>>>()?;
        Ok(Self { ids })
    }

    /// Fails with [`NoboriError::IndexOutOfBounds`] on the first slot
    /// outside `0..particle_count`.
    pub fn validate(&self, particle_count: usize) -> NoboriResult<()> {
        match self.ids.iter().find(|id| id.index() >= particle_count) {
            Some(id) => Err(NoboriError::IndexOutOfBounds {
                index: id.index(),
                count: particle_count,
            }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn ids(&self) -> &[ParticleId] {
        &self.ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.ids.contains(&id)
    }
}
