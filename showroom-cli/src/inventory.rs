//! Vehicle inventory sources for the CLI: JSON files or the built-in demo lot.

use anyhow::{Context, Result};
use showroom_core::{BodyShape, Vehicle};
use std::fs;
use std::path::Path;

/// Load vehicles from a JSON array file, or fall back to the demo lot.
pub fn load(path: Option<&Path>) -> Result<Vec<Vehicle>> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
            let vehicles: Vec<Vehicle> =
                serde_json::from_str(&raw).with_context(|| format!("parse {}", p.display()))?;
            Ok(vehicles)
        }
        None => Ok(demo_lot()),
    }
}

/// A small built-in lot so `showroom chat` works without any files.
pub fn demo_lot() -> Vec<Vehicle> {
    vec![
        Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500).with_new_vehicle(true),
        Vehicle::new("Toyota", "Camry", BodyShape::Sedan, 28400).with_new_vehicle(true),
        Vehicle::new("Honda", "Civic", BodyShape::Sedan, 24900)
            .with_description("Reliable commuter, hybrid drivetrain available"),
        Vehicle::new("Honda", "CR-V", BodyShape::Suv, 29800)
            .with_description("Hybrid trim with excellent mpg")
            .with_new_vehicle(true),
        Vehicle::new("Ford", "F-150", BodyShape::Truck, 41900).with_new_vehicle(true),
        Vehicle::new("Ford", "Mustang", BodyShape::Coupe, 33400),
        Vehicle::new("Tesla", "Model 3", BodyShape::Sedan, 42990)
            .with_description("Fully electric, long range battery")
            .with_new_vehicle(true),
        Vehicle::new("BMW", "X5", BodyShape::Suv, 65200).with_description("Luxury midsize SUV"),
        Vehicle::new("Hyundai", "Elantra", BodyShape::Sedan, 21600),
        Vehicle::new("Chevrolet", "Silverado", BodyShape::Truck, 38700).with_accident(true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_lot_covers_core_shapes() {
        let lot = demo_lot();
        assert!(lot.iter().any(|v| v.shape == BodyShape::Suv));
        assert!(lot.iter().any(|v| v.shape == BodyShape::Sedan));
        assert!(lot.iter().any(|v| v.shape == BodyShape::Truck));
    }

    #[test]
    fn test_load_parses_json_file() {
        let dir = std::env::temp_dir().join("showroom-inventory-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lot.json");
        std::fs::write(
            &path,
            r#"[{"brand":"Kia","model":"Sportage","shape":"SUV","price":27900}]"#,
        )
        .unwrap();

        let vehicles = load(Some(&path)).unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].brand, "Kia");
        assert_eq!(vehicles[0].shape, BodyShape::Suv);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load(Some(Path::new("/nonexistent/lot.json"))).is_err());
    }
}
