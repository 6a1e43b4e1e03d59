//! Ordered source registry.
//!
//! Pure in-memory CRUD over the ordered source list. Order is
//! user-controlled and meaningful, so every mutation keeps it stable except
//! an explicit [`SourceRegistry::reorder`].

use std::collections::HashMap;

use crate::error::AppError;
use crate::model::{normalize_url, Bounds, Source, SourceId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an already validated list, keeping its order.
    pub fn from_sources(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn all(&self) -> &[Source] {
        &self.sources
    }

    pub fn ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id).collect()
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.sources.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut Source> {
        self.sources.iter_mut().find(|s| s.id == id)
    }

    /// Append a source. Ids are minted fresh, so a repeat is a caller bug and
    /// is rejected rather than stored twice.
    pub fn add(&mut self, source: Source) -> Result<(), AppError> {
        if self.contains(source.id) {
            return Err(AppError::InvariantViolation(format!(
                "source {} is already registered",
                source.id
            )));
        }
        self.sources.push(source);
        Ok(())
    }

    pub fn remove(&mut self, id: SourceId) -> Option<Source> {
        let index = self.sources.iter().position(|s| s.id == id)?;
        Some(self.sources.remove(index))
    }

    /// Replace the order wholesale.
    ///
    /// `new_order` must be a permutation of the current ids: nothing added,
    /// dropped or repeated. Anything else is rejected and the registry is
    /// left untouched.
    pub fn reorder(&mut self, new_order: &[SourceId]) -> Result<(), AppError> {
        if new_order.len() != self.sources.len() {
            return Err(AppError::InvariantViolation(format!(
                "expected {} ids, got {}",
                self.sources.len(),
                new_order.len()
            )));
        }

        let mut slots: HashMap<SourceId, Option<usize>> = self
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, Some(i)))
            .collect();

        let mut picks = Vec::with_capacity(new_order.len());
        for id in new_order {
            match slots.get_mut(id) {
                Some(slot) => match slot.take() {
                    Some(index) => picks.push(index),
                    None => {
                        return Err(AppError::InvariantViolation(format!(
                            "id {} appears more than once",
                            id
                        )))
                    }
                },
                None => {
                    return Err(AppError::InvariantViolation(format!(
                        "id {} is not registered",
                        id
                    )))
                }
            }
        }

        let mut taken: Vec<Option<Source>> = self.sources.drain(..).map(Some).collect();
        self.sources = picks
            .into_iter()
            .filter_map(|index| taken[index].take())
            .collect();
        Ok(())
    }

    pub fn rename(&mut self, id: SourceId, name: &str) -> Result<(), AppError> {
        let source = self.get_mut(id).ok_or(AppError::UnknownSource(id))?;
        source.display_name = name.trim().to_string();
        Ok(())
    }

    /// Store a new URL after normalizing it; returns the normalized form.
    pub fn set_url(&mut self, id: SourceId, url: &str) -> Result<String, AppError> {
        let normalized = normalize_url(url)?;
        let source = self.get_mut(id).ok_or(AppError::UnknownSource(id))?;
        source.url = normalized.clone();
        Ok(normalized)
    }

    pub fn set_bounds(&mut self, id: SourceId, bounds: Bounds) -> Result<(), AppError> {
        let source = self.get_mut(id).ok_or(AppError::UnknownSource(id))?;
        source.bounds = bounds.sanitized();
        Ok(())
    }
}
