use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::VehicleSpec;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("The vehicle catalog must contain at least one vehicle")]
    Empty,
    #[error("Vehicle {id} appears more than once in the catalog")]
    DuplicateVehicle { id: String },
    #[error("Vehicle {id} has an invalid {field}: {value}")]
    InvalidVehicle {
        id: String,
        field: &'static str,
        value: f64,
    },
    #[error("Default vehicle {id} is not part of the catalog")]
    DefaultNotFound { id: String },
}

/// Read-only table of vehicle specifications.
///
/// Lookups never fail: an unknown id resolves to the designated default
/// entry.
#[derive(Debug, Clone)]
pub struct VehicleCatalog {
    vehicles: Vec<VehicleSpec>,
    index: HashMap<String, usize>,
    default_idx: usize,
}

impl VehicleCatalog {
    /// Build a catalog whose default entry is the first vehicle.
    pub fn new(vehicles: Vec<VehicleSpec>) -> Result<Self, CatalogError> {
        Self::with_default(vehicles, None)
    }

    pub fn with_default(
        vehicles: Vec<VehicleSpec>,
        default_id: Option<&str>,
    ) -> Result<Self, CatalogError> {
        if vehicles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            if !seen.insert(vehicle.id.as_str()) {
                return Err(CatalogError::DuplicateVehicle {
                    id: vehicle.id.clone(),
                });
            }
            validate_vehicle(vehicle)?;
        }

        let index: HashMap<String, usize> = vehicles
            .iter()
            .enumerate()
            .map(|(idx, vehicle)| (vehicle.id.clone(), idx))
            .collect();

        let default_idx = match default_id {
            Some(id) => *index
                .get(id)
                .ok_or_else(|| CatalogError::DefaultNotFound { id: id.to_string() })?,
            None => 0,
        };

        Ok(VehicleCatalog {
            vehicles,
            index,
            default_idx,
        })
    }

    /// Return the vehicle with this id, or the default vehicle.
    pub fn lookup(&self, id: &str) -> &VehicleSpec {
        self.get(id).unwrap_or_else(|| self.default_vehicle())
    }

    /// Return the vehicle with exactly this id, if any.
    pub fn get(&self, id: &str) -> Option<&VehicleSpec> {
        self.index.get(id).map(|&idx| &self.vehicles[idx])
    }

    pub fn default_vehicle(&self) -> &VehicleSpec {
        &self.vehicles[self.default_idx]
    }

    pub fn vehicles(&self) -> &[VehicleSpec] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        let vehicles = builtin_vehicles();
        let index = vehicles
            .iter()
            .enumerate()
            .map(|(idx, vehicle)| (vehicle.id.clone(), idx))
            .collect();
        VehicleCatalog {
            vehicles,
            index,
            default_idx: 0,
        }
    }
}

fn validate_vehicle(vehicle: &VehicleSpec) -> Result<(), CatalogError> {
    let positive_fields = [
        ("battery capacity", vehicle.battery_capacity_kwh),
        ("max AC power", vehicle.max_ac_power_kw),
        ("max DC power", vehicle.max_dc_power_kw),
    ];
    for (field, value) in positive_fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(CatalogError::InvalidVehicle {
                id: vehicle.id.clone(),
                field,
                value,
            });
        }
    }
    if !(vehicle.wltp_range_km.is_finite() && vehicle.wltp_range_km >= 0.0) {
        return Err(CatalogError::InvalidVehicle {
            id: vehicle.id.clone(),
            field: "WLTP range",
            value: vehicle.wltp_range_km,
        });
    }
    Ok(())
}

/// The built-in BMW line-up.
pub fn builtin_vehicles() -> Vec<VehicleSpec> {
    vec![
        VehicleSpec::new("ix1-edrive20", "BMW iX1 eDrive20", 64.7, 11.0, 130.0, 430.0),
        VehicleSpec::new("ix1", "BMW iX1 xDrive30", 64.7, 11.0, 130.0, 440.0),
        VehicleSpec::new("ix3", "BMW iX3", 80.0, 11.0, 150.0, 461.0),
        VehicleSpec::new("i4-edrive35", "BMW i4 eDrive35", 70.2, 11.0, 180.0, 490.0),
        VehicleSpec::new("i4-edrive40", "BMW i4 eDrive40", 83.9, 11.0, 200.0, 590.0),
        VehicleSpec::new("i4-m50", "BMW i4 M50", 83.9, 11.0, 200.0, 520.0),
        VehicleSpec::new("ix-xdrive40", "BMW iX xDrive40", 76.6, 11.0, 150.0, 425.0),
        VehicleSpec::new("ix-xdrive50", "BMW iX xDrive50", 111.5, 22.0, 195.0, 630.0),
        VehicleSpec::new("ix-m60", "BMW iX M60", 111.5, 22.0, 195.0, 566.0),
        VehicleSpec::new("i7-xdrive60", "BMW i7 xDrive60", 101.7, 22.0, 195.0, 625.0),
        VehicleSpec::new("i7-m70", "BMW i7 M70 xDrive", 101.7, 22.0, 195.0, 488.0),
        VehicleSpec::new("i5-edrive40", "BMW i5 eDrive40", 81.2, 11.0, 205.0, 582.0),
        VehicleSpec::new("i5-m60", "BMW i5 M60 xDrive", 81.2, 11.0, 205.0, 516.0),
        VehicleSpec::new("i3-120ah", "BMW i3 120Ah", 42.2, 11.0, 50.0, 308.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, capacity: f64) -> VehicleSpec {
        VehicleSpec::new(id, id.to_uppercase(), capacity, 11.0, 100.0, 300.0)
    }

    #[test]
    fn test_lookup_known_vehicle() {
        let catalog = VehicleCatalog::default();
        let spec = catalog.lookup("ix-xdrive50");

        assert_eq!(spec.name, "BMW iX xDrive50");
        assert_eq!(spec.battery_capacity_kwh, 111.5);
        assert_eq!(spec.max_ac_power_kw, 22.0);
    }

    #[test]
    fn test_lookup_unknown_vehicle_falls_back_to_default() {
        let catalog = VehicleCatalog::default();

        let spec = catalog.lookup("model-that-does-not-exist");
        assert_eq!(spec.id, "ix1-edrive20");
        assert_eq!(spec, catalog.default_vehicle());
        assert!(catalog.get("model-that-does-not-exist").is_none());

        // Empty id is just another unknown id
        assert_eq!(catalog.lookup("").id, "ix1-edrive20");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = VehicleCatalog::new(builtin_vehicles()).expect("built-in catalog is valid");
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.default_vehicle().id, "ix1-edrive20");
    }

    #[test]
    fn test_designated_default() {
        let vehicles = vec![vehicle("a", 50.0), vehicle("b", 60.0)];
        let catalog = VehicleCatalog::with_default(vehicles, Some("b")).unwrap();

        assert_eq!(catalog.lookup("zzz").id, "b");
        assert_eq!(catalog.lookup("a").id, "a");
    }

    #[test]
    fn test_invalid_catalogs() {
        assert_eq!(
            VehicleCatalog::new(vec![]).unwrap_err(),
            CatalogError::Empty
        );

        match VehicleCatalog::new(vec![vehicle("a", 50.0), vehicle("a", 60.0)]) {
            Err(CatalogError::DuplicateVehicle { id }) => assert_eq!(id, "a"),
            _ => panic!("Expected DuplicateVehicle error"),
        }

        match VehicleCatalog::new(vec![vehicle("a", 0.0)]) {
            Err(CatalogError::InvalidVehicle { id, field, .. }) => {
                assert_eq!(id, "a");
                assert_eq!(field, "battery capacity");
            }
            _ => panic!("Expected InvalidVehicle error"),
        }

        match VehicleCatalog::with_default(vec![vehicle("a", 50.0)], Some("b")) {
            Err(CatalogError::DefaultNotFound { id }) => assert_eq!(id, "b"),
            _ => panic!("Expected DefaultNotFound error"),
        }
    }
}
