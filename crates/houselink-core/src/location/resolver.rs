//! Synchronous location state machine.
//!
//! The resolver owns the area catalog and the address being composed. It
//! never performs I/O itself: `on_map_click` hands back a `GeocodeTicket`
//! and the caller later feeds the geocode result to `apply_geocode`.
//! Tickets from superseded clicks are rejected, so responses arriving out
//! of order cannot overwrite a newer resolution.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geocode::GeocodeResult;

use super::{Coordinate, LocationArea, LocationError, ResolvedAddress};

/// Per-form lifecycle of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ResolverState {
    Empty,
    AreaSelected,
    DistrictSelected,
    /// A map click is waiting for its reverse geocode
    CoordinatePending,
    Resolved,
}

/// Identifies the click a geocode request belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeTicket {
    pub generation: u64,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    areas: Vec<LocationArea>,
    address: ResolvedAddress,
    manual_street: Option<String>,
    manual_building: Option<String>,
    /// Last geocode applied for the current coordinate
    geocoded: Option<GeocodeResult>,
    generation: u64,
    pending: Option<u64>,
}

/// Trimmed value, or `None` when blank
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl LocationResolver {
    /// Empty resolver for a create form
    pub fn new(areas: Vec<LocationArea>) -> Self {
        Self {
            areas,
            address: ResolvedAddress::default(),
            manual_street: None,
            manual_building: None,
            geocoded: None,
            generation: 0,
            pending: None,
        }
    }

    /// Resolver hydrated from an existing record (edit mode).
    ///
    /// Stored street and building number count as manual input. An unknown
    /// area, or a district outside the stored area, is dropped.
    pub fn hydrate(areas: Vec<LocationArea>, existing: &ResolvedAddress) -> Self {
        let mut resolver = Self::new(areas);
        let mut address = existing.clone();

        let area = address
            .location_id
            .as_deref()
            .and_then(|id| resolver.areas.iter().find(|a| a.id == id));
        match area {
            Some(area) => {
                if let Some(ref district) = address.district {
                    if !area.contains(district) {
                        warn!(area = %area.id, district = %district, "Stored district not valid for area, dropping");
                        address.district = None;
                    }
                }
            }
            None => {
                if address.location_id.is_some() {
                    warn!(location_id = ?address.location_id, "Stored location area unknown, dropping");
                }
                address.location_id = None;
                address.district = None;
            }
        }

        if address.coordinate().is_none() {
            address.latitude = None;
            address.longitude = None;
        }

        resolver.manual_street = address.street.as_deref().and_then(non_blank);
        resolver.manual_building = address.building_number.as_deref().and_then(non_blank);
        // Stored advisory fields stand in for the last geocode until the next click
        resolver.geocoded = Some(GeocodeResult {
            place_name: address.address.clone(),
            street: None,
            building_number: None,
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            province: address.province.clone(),
            country: address.country.clone(),
            postal_code: address.postal_code.clone(),
            district_hint: address.district_hint.clone(),
        });
        resolver.address = address;
        resolver
    }

    pub fn areas(&self) -> &[LocationArea] {
        &self.areas
    }

    /// Replace the area catalog, e.g. after a refresh. The current selection
    /// is kept only if it is still valid.
    pub fn set_areas(&mut self, areas: Vec<LocationArea>) {
        self.areas = areas;
        let still_valid = match self.active_area() {
            Some(area) => self.address.district.as_ref().map_or(true, |d| area.contains(d)),
            None => false,
        };
        if !still_valid {
            if self.active_area().is_none() {
                self.address.location_id = None;
            }
            self.address.district = None;
        }
    }

    pub fn active_area(&self) -> Option<&LocationArea> {
        let id = self.address.location_id.as_deref()?;
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn address(&self) -> &ResolvedAddress {
        &self.address
    }

    pub fn into_address(self) -> ResolvedAddress {
        self.address
    }

    pub fn is_complete(&self) -> bool {
        self.address.is_complete()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> ResolverState {
        if self.pending.is_some() {
            ResolverState::CoordinatePending
        } else if self.address.coordinate().is_some() {
            ResolverState::Resolved
        } else if self.address.district.is_some() {
            ResolverState::DistrictSelected
        } else if self.address.location_id.is_some() {
            ResolverState::AreaSelected
        } else {
            ResolverState::Empty
        }
    }

    /// Select the active area. Always clears the district.
    pub fn select_area(&mut self, area_id: &str) -> Result<(), LocationError> {
        if !self.areas.iter().any(|a| a.id == area_id) {
            return Err(LocationError::UnknownArea(area_id.to_string()));
        }
        debug!(area = area_id, "Location area selected");
        self.address.location_id = Some(area_id.to_string());
        self.address.district = None;
        Ok(())
    }

    /// Select a district of the active area.
    pub fn select_district(&mut self, name: &str) -> Result<(), LocationError> {
        let area = self.active_area().ok_or(LocationError::NoAreaSelected)?;
        let district = area.district(name)?;
        debug!(district = %district, "District selected");
        self.address.district = Some(district);
        Ok(())
    }

    /// Manual street edit. A blank value releases the field back to the geocoder.
    pub fn set_street(&mut self, value: &str) {
        self.manual_street = non_blank(value);
        self.sync_derived();
    }

    /// Manual building number edit. A blank value releases the field back to the geocoder.
    pub fn set_building_number(&mut self, value: &str) {
        self.manual_building = non_blank(value);
        self.sync_derived();
    }

    /// Record a map click. Invalid coordinates are ignored and return `None`.
    ///
    /// The coordinate is stored immediately; the returned ticket must be
    /// passed to `apply_geocode` together with the reverse geocode result.
    pub fn on_map_click(&mut self, latitude: f64, longitude: f64) -> Option<GeocodeTicket> {
        let Some(coordinate) = Coordinate::new(latitude, longitude) else {
            warn!(latitude, longitude, "Ignoring map click with invalid coordinate");
            return None;
        };

        self.generation += 1;
        self.pending = Some(self.generation);
        self.address.latitude = Some(coordinate.latitude);
        self.address.longitude = Some(coordinate.longitude);
        debug!(generation = self.generation, latitude, longitude, "Map click recorded");

        Some(GeocodeTicket {
            generation: self.generation,
            coordinate,
        })
    }

    /// Merge a reverse geocode result. Returns `false` if the ticket was
    /// superseded by a later click (or a `clear`) and nothing changed.
    ///
    /// `None` means the lookup failed; advisory fields are cleared and the
    /// address falls back to the manual street or the coordinate string.
    pub fn apply_geocode(&mut self, ticket: GeocodeTicket, result: Option<GeocodeResult>) -> bool {
        if self.pending != Some(ticket.generation) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding superseded geocode result"
            );
            return false;
        }
        self.pending = None;

        if let Some(ref result) = result {
            if self.address.district.is_none() {
                let adopted = result
                    .district_hint
                    .as_deref()
                    .and_then(|hint| self.active_area().and_then(|area| area.match_district(hint)));
                if let Some(district) = adopted {
                    debug!(district = %district, "Adopted district from geocoder hint");
                    self.address.district = Some(district);
                }
            }
        } else {
            debug!(generation = ticket.generation, "Geocode failed, using coordinate fallback");
        }

        self.geocoded = result;
        self.sync_derived();
        true
    }

    /// Reset address and area/district selection. Any in-flight geocode
    /// is invalidated.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.address = ResolvedAddress::default();
        self.manual_street = None;
        self.manual_building = None;
        self.geocoded = None;
    }

    /// Recompute street, building number, advisory fields and the display
    /// address from manual input and the last geocode.
    fn sync_derived(&mut self) {
        let geocoded = self.geocoded.as_ref();

        self.address.street = self
            .manual_street
            .clone()
            .or_else(|| geocoded.and_then(|g| g.street.clone()));
        self.address.building_number = self
            .manual_building
            .clone()
            .or_else(|| geocoded.and_then(|g| g.building_number.clone()));

        self.address.city = geocoded.and_then(|g| g.city.clone());
        self.address.province = geocoded.and_then(|g| g.province.clone());
        self.address.country = geocoded.and_then(|g| g.country.clone());
        self.address.postal_code = geocoded.and_then(|g| g.postal_code.clone());
        self.address.neighborhood = geocoded.and_then(|g| g.neighborhood.clone());
        self.address.district_hint = geocoded.and_then(|g| g.district_hint.clone());

        let place_name = geocoded
            .map(|g| g.place_name.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        self.address.address = self
            .address
            .street
            .clone()
            .or_else(|| self.address.neighborhood.clone())
            .or(place_name)
            .or_else(|| self.address.coordinate().map(|c| c.fallback_label()))
            .unwrap_or_default();
    }
}
