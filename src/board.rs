use crate::error::{Error, ReferenceKind, Result};
use crate::structs::*;

use std::collections::HashMap;

/// Accumulated search results.
///
/// Collections only ever grow by appending whole pages. The id indices point
/// at the first entity seen with a given id, so a repeated entity is kept in
/// the collection but never shadows the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureBoard {
    locations: Vec<Location>,
    departures: Vec<Departure>,
    operators: Vec<Operator>,
    complete: bool,
    location_index: HashMap<String, usize>,
    operator_index: HashMap<String, usize>,
}

/// A departure with its references looked up.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDeparture<'a> {
    pub departure: &'a Departure,
    pub origin: &'a Location,
    pub destination: &'a Location,
    pub operator: &'a Operator,
}

impl DepartureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page and takes over its `complete` flag.
    pub fn merge(&mut self, page: SearchPage) {
        for location in page.locations {
            self.location_index
                .entry(location.id.clone())
                .or_insert(self.locations.len());
            self.locations.push(location);
        }
        for operator in page.operators {
            self.operator_index
                .entry(operator.id.clone())
                .or_insert(self.operators.len());
            self.operators.push(operator);
        }
        self.departures.extend(page.departures);
        self.complete = page.complete;
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    pub fn operator(&self, id: &str) -> Option<&Operator> {
        self.operator_index.get(id).map(|&i| &self.operators[i])
    }

    pub fn resolve<'a>(&'a self, departure: &'a Departure) -> Result<ResolvedDeparture<'a>> {
        let missing = |kind, id: &str| Error::MissingReference {
            departure_id: departure.id.clone(),
            kind,
            id: id.to_string(),
        };

        let origin = self
            .location(&departure.origin_location_id)
            .ok_or_else(|| missing(ReferenceKind::Origin, &departure.origin_location_id))?;
        let destination = self
            .location(&departure.destination_location_id)
            .ok_or_else(|| {
                missing(ReferenceKind::Destination, &departure.destination_location_id)
            })?;
        let operator = self
            .operator(&departure.operator_id)
            .ok_or_else(|| missing(ReferenceKind::Operator, &departure.operator_id))?;

        Ok(ResolvedDeparture {
            departure,
            origin,
            destination,
            operator,
        })
    }

    /// Resolves every departure in arrival order, failing on the first
    /// dangling reference.
    pub fn resolved(&self) -> Result<Vec<ResolvedDeparture<'_>>> {
        self.departures.iter().map(|d| self.resolve(d)).collect()
    }
}
