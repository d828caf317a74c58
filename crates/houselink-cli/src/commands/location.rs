use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use houselink_core::services::LocationService;
use houselink_core::{Coordinate, LocationForm, ResolvedAddress, ResolverState};

use super::print_json;
use crate::app::App;

pub async fn areas(app: &App, refresh: bool) -> Result<()> {
    let areas = LocationService::new(app.api())
        .areas_cached(&app.cache, refresh)
        .await?;
    for area in &areas {
        println!("{:<8} {}", area.id, area.name);
        for district in area.districts() {
            println!("         - {}", district);
        }
    }
    Ok(())
}

pub async fn geocode(app: &App, lat: f64, lng: f64) -> Result<()> {
    let coordinate = Coordinate::new(lat, lng).context("Coordinate out of range")?;
    match app.geocoder()?.try_reverse_geocode(coordinate).await? {
        Some(result) => print_json(&result),
        None => {
            println!("No address found; fallback: {}", coordinate.fallback_label());
            Ok(())
        }
    }
}

/// Inputs in the order a user fills the location form
pub struct LocateInput {
    pub area: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub building: Option<String>,
    pub point: Option<(f64, f64)>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateOutput<'a> {
    state: ResolverState,
    complete: bool,
    address: &'a ResolvedAddress,
}

pub async fn locate(app: &App, input: LocateInput) -> Result<()> {
    let areas = LocationService::new(app.api())
        .areas_cached(&app.cache, false)
        .await?;
    let mut form = LocationForm::create(areas, Arc::new(app.geocoder()?));

    if let Some(ref area) = input.area {
        form.select_area(area)?;
    }
    if let Some(ref district) = input.district {
        form.select_district(district)?;
    }
    if let Some(ref street) = input.street {
        form.set_street(street);
    }
    if let Some(ref building) = input.building {
        form.set_building_number(building);
    }
    if let Some((lat, lng)) = input.point {
        if !form.click(lat, lng) {
            anyhow::bail!("Coordinate out of range: {}, {}", lat, lng);
        }
        form.wait_for_geocode().await;
    }

    print_json(&LocateOutput {
        state: form.state(),
        complete: form.is_complete(),
        address: form.address(),
    })
}
