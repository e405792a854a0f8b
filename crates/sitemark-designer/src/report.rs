//! Plain-text takeoff of a design: roof areas, module and equipment
//! counts, cable lengths per type.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sitemark_core::units::{format_area, format_length};
use sitemark_core::MeasurementSystem;

use crate::design_state::DesignState;
use crate::model::{CableType, EquipmentType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofSummary {
    pub pitch: f64,
    pub direction: f64,
    pub area_m2: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteSummary {
    pub calibrated: bool,
    pub roofs: Vec<RoofSummary>,
    pub total_roof_area_m2: f64,
    pub array_count: usize,
    pub module_count: u64,
    pub equipment: BTreeMap<String, usize>,
    pub dc_cable_m: f64,
    pub ac_cable_m: f64,
    pub cable_count: usize,
    pub walkway_count: usize,
    pub cable_tray_count: usize,
}

impl SiteSummary {
    pub fn from_state(state: &DesignState, meters_per_pixel: Option<f64>) -> Self {
        let roofs: Vec<RoofSummary> = state
            .roof_masks()
            .iter()
            .map(|m| RoofSummary {
                pitch: m.pitch,
                direction: m.direction,
                area_m2: m.area,
            })
            .collect();

        let mut equipment = BTreeMap::new();
        for t in EquipmentType::ALL {
            let n = state.equipment().iter().filter(|e| e.equipment_type == t).count();
            if n > 0 {
                equipment.insert(t.label().to_string(), n);
            }
        }

        let cable = |cable_type: CableType| -> f64 {
            state
                .lines()
                .iter()
                .filter(|l| l.cable_type == cable_type)
                .map(|l| l.length)
                .sum()
        };

        Self {
            calibrated: meters_per_pixel.is_some(),
            total_roof_area_m2: roofs.iter().map(|r| r.area_m2).sum(),
            roofs,
            array_count: state.pv_arrays().len(),
            module_count: state.pv_arrays().iter().map(|a| u64::from(a.module_count())).sum(),
            equipment,
            dc_cable_m: cable(CableType::Dc),
            ac_cable_m: cable(CableType::Ac),
            cable_count: state.lines().len(),
            walkway_count: state.placed_walkways().len(),
            cable_tray_count: state.placed_cable_trays().len(),
        }
    }

    /// Text report in the given measurement system.
    pub fn format(&self, system: MeasurementSystem) -> String {
        SummaryDisplay { summary: self, system }.to_string()
    }
}

struct SummaryDisplay<'a> {
    summary: &'a SiteSummary,
    system: MeasurementSystem,
}

impl fmt::Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        if !s.calibrated {
            writeln!(f, "Scale not calibrated: areas and lengths are zero")?;
        }
        writeln!(f, "Roofs: {}", s.roofs.len())?;
        for (i, roof) in s.roofs.iter().enumerate() {
            writeln!(
                f,
                "  #{} {} (pitch {:.0}°, facing {:.0}°)",
                i + 1,
                format_area(roof.area_m2, self.system),
                roof.pitch,
                roof.direction
            )?;
        }
        writeln!(f, "  total {}", format_area(s.total_roof_area_m2, self.system))?;
        writeln!(f, "PV arrays: {} ({} modules)", s.array_count, s.module_count)?;
        if !s.equipment.is_empty() {
            writeln!(f, "Equipment:")?;
            for (label, n) in &s.equipment {
                writeln!(f, "  {}: {}", label, n)?;
            }
        }
        writeln!(f, "Cables: {}", s.cable_count)?;
        writeln!(f, "  DC {}", format_length(s.dc_cable_m, self.system))?;
        writeln!(f, "  AC {}", format_length(s.ac_cable_m, self.system))?;
        write!(f, "Walkways: {}, cable trays: {}", s.walkway_count, s.cable_tray_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArraySpec, EquipmentItem, Orientation, Point, PvArrayItem, RoofMask, SupplyLine};

    fn state() -> DesignState {
        DesignState::default()
            .with_roof_masks(vec![RoofMask::new(
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(1000.0, 0.0),
                    Point::new(1000.0, 500.0),
                    Point::new(0.0, 500.0),
                ],
                20.0,
                180.0,
                Some(0.01),
            )])
            .with_pv_arrays(vec![PvArrayItem::new(
                ArraySpec::new(2, 3, Orientation::Portrait),
                Point::new(200.0, 200.0),
                0.0,
            )])
            .with_equipment(vec![
                EquipmentItem::new(EquipmentType::Inverter, Point::new(0.0, 0.0), 0.0),
                EquipmentItem::new(EquipmentType::Inverter, Point::new(50.0, 0.0), 0.0),
            ])
            .with_lines(vec![
                SupplyLine::new("DC 1", CableType::Dc, vec![Point::new(0.0, 0.0), Point::new(300.0, 400.0)], Some(0.01)),
                SupplyLine::new("AC 1", CableType::Ac, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)], Some(0.01)),
            ])
    }

    #[test]
    fn test_summary_totals() {
        let summary = SiteSummary::from_state(&state(), Some(0.01));
        assert!(summary.calibrated);
        assert!((summary.total_roof_area_m2 - 50.0).abs() < 1e-9);
        assert_eq!(summary.module_count, 6);
        assert_eq!(summary.equipment.get(EquipmentType::Inverter.label()), Some(&2));
        assert!((summary.dc_cable_m - 5.0).abs() < 1e-9);
        assert!((summary.ac_cable_m - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncalibrated_note() {
        let summary = SiteSummary::from_state(&DesignState::default(), None);
        let text = summary.format(MeasurementSystem::Metric);
        assert!(text.starts_with("Scale not calibrated"));
        assert!(text.contains("Roofs: 0"));
    }
}
