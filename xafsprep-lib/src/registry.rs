use log::info;

use crate::error::{PrepError, Result};
use crate::sample::Sample;

/// Ordered collection of the session's samples.
///
/// A sample's ID is its position. Samples are only ever appended, so an ID
/// stays valid for the rest of the session.
#[derive(Debug, Default, Clone)]
pub struct SampleRegistry {
    samples: Vec<Sample>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample` and return its ID.
    pub fn append(&mut self, sample: Sample) -> usize {
        info!("registered sample '{}' as ID {}", sample.name(), self.samples.len());
        self.samples.push(sample);
        self.samples.len() - 1
    }

    /// `(id, name)` pairs in ID order; [`PrepError::NoSamples`] if empty.
    pub fn list(&self) -> Result<Vec<(usize, &str)>> {
        if self.samples.is_empty() {
            return Err(PrepError::NoSamples);
        }
        Ok(self
            .samples
            .iter()
            .enumerate()
            .map(|(id, s)| (id, s.name()))
            .collect())
    }

    pub fn get(&self, id: usize) -> Result<&Sample> {
        let len = self.samples.len();
        self.samples.get(id).ok_or(PrepError::InvalidId { id, len })
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut Sample> {
        let len = self.samples.len();
        self.samples
            .get_mut(id)
            .ok_or(PrepError::InvalidId { id, len })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
