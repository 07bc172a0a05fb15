//! Office geofence and the check-in policy built on it.

use thiserror::Error;

use hrms_core::{DomainError, OfficeId};
use hrms_models::Office;

use crate::geo::Coordinates;

/// Parsed, validated geofence of a registered office.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfficeLocation {
    office_id: OfficeId,
    coordinates: Coordinates,
    radius_m: f64,
    max_accuracy_m: f64,
}

impl OfficeLocation {
    pub fn new(
        office_id: OfficeId,
        coordinates: Coordinates,
        radius_m: f64,
        max_accuracy_m: f64,
    ) -> Result<Self, DomainError> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(DomainError::validation(format!("office radius {radius_m} is not a distance")));
        }
        if !max_accuracy_m.is_finite() || max_accuracy_m < 0.0 {
            return Err(DomainError::validation(format!(
                "office max accuracy {max_accuracy_m} is not a distance"
            )));
        }
        Ok(Self {
            office_id,
            coordinates,
            radius_m,
            max_accuracy_m,
        })
    }

    pub fn office_id(&self) -> OfficeId {
        self.office_id
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn max_accuracy_m(&self) -> f64 {
        self.max_accuracy_m
    }
}

impl TryFrom<&Office> for OfficeLocation {
    type Error = DomainError;

    fn try_from(office: &Office) -> Result<Self, Self::Error> {
        let parse = |field: &str, raw: &str| {
            raw.trim().parse::<f64>().map_err(|_| {
                DomainError::validation(format!("office {} {field} {raw:?} is not a number", office.id))
            })
        };

        let latitude = parse("latitude", &office.latitude)?;
        let longitude = parse("longitude", &office.longitude)?;
        let coordinates = Coordinates::new(latitude, longitude)
            .map_err(|e| DomainError::validation(format!("office {}: {e}", office.id)))?;

        Self::new(office.id, coordinates, office.radius, office.max_accuracy)
    }
}

/// Measurements of an accepted check-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckInAssessment {
    pub distance_m: f64,
    pub accuracy_m: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CheckInRejection {
    #[error("reported accuracy {0} is not a distance")]
    InvalidAccuracy(f64),

    #[error("location accuracy {accuracy_m:.0} m is worse than the allowed {max_accuracy_m:.0} m")]
    AccuracyTooLow { accuracy_m: f64, max_accuracy_m: f64 },

    #[error("{distance_m:.0} m from the office, outside the {radius_m:.0} m radius")]
    OutOfRange { distance_m: f64, radius_m: f64 },
}

/// Decide whether a reported position may be used to check in.
///
/// The reading must be precise enough (`accuracy <= max_accuracy`) and close
/// enough (`distance <= radius`); both bounds are inclusive.
pub fn evaluate_check_in(
    office: &OfficeLocation,
    position: &Coordinates,
    accuracy_m: f64,
) -> Result<CheckInAssessment, CheckInRejection> {
    if !accuracy_m.is_finite() || accuracy_m < 0.0 {
        return Err(CheckInRejection::InvalidAccuracy(accuracy_m));
    }
    if accuracy_m > office.max_accuracy_m {
        return Err(CheckInRejection::AccuracyTooLow {
            accuracy_m,
            max_accuracy_m: office.max_accuracy_m,
        });
    }

    let distance_m = office.coordinates.distance_to(position);
    tracing::debug!(office_id = %office.office_id, distance_m, accuracy_m, "check-in position measured");

    if distance_m > office.radius_m {
        return Err(CheckInRejection::OutOfRange {
            distance_m,
            radius_m: office.radius_m,
        });
    }

    Ok(CheckInAssessment {
        distance_m,
        accuracy_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta_office(radius: f64, max_accuracy: f64) -> Office {
        Office {
            id: OfficeId::new(1),
            app_name: "HRMS".to_string(),
            latitude: "-6.2000000".to_string(),
            longitude: "106.8166660".to_string(),
            radius,
            max_accuracy,
            start_time: "08:00:00".to_string(),
            end_time: "17:00:00".to_string(),
        }
    }

    fn location(radius: f64, max_accuracy: f64) -> OfficeLocation {
        OfficeLocation::try_from(&jakarta_office(radius, max_accuracy)).unwrap()
    }

    #[test]
    fn parses_string_coordinates() {
        let office = location(100.0, 50.0);
        assert_eq!(office.coordinates().latitude(), -6.2);
        assert_eq!(office.coordinates().longitude(), 106.816666);
    }

    #[test]
    fn malformed_office_coordinates_are_rejected() {
        let mut office = jakarta_office(100.0, 50.0);
        office.latitude = "south-ish".to_string();
        assert!(matches!(OfficeLocation::try_from(&office), Err(DomainError::Validation(_))));

        let mut office = jakarta_office(100.0, 50.0);
        office.longitude = "200".to_string();
        assert!(OfficeLocation::try_from(&office).is_err());

        assert!(OfficeLocation::try_from(&jakarta_office(-1.0, 50.0)).is_err());
    }

    #[test]
    fn position_at_the_office_is_accepted() {
        let office = location(100.0, 50.0);
        let here = office.coordinates();
        let assessment = evaluate_check_in(&office, &here, 10.0).unwrap();
        assert_eq!(assessment.distance_m, 0.0);
    }

    #[test]
    fn position_beyond_radius_is_rejected() {
        let office = location(100.0, 50.0);
        // ~0.002 degrees of latitude is ~222 m.
        let away = Coordinates::new(-6.202, 106.816666).unwrap();
        match evaluate_check_in(&office, &away, 10.0) {
            Err(CheckInRejection::OutOfRange { distance_m, radius_m }) => {
                assert!(distance_m > 200.0 && distance_m < 250.0, "{distance_m}");
                assert_eq!(radius_m, 100.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn radius_bound_is_inclusive() {
        let here = Coordinates::new(-6.2, 106.816666).unwrap();
        let near = Coordinates::new(-6.2005, 106.816666).unwrap();
        let exact = here.distance_to(&near);
        let office = OfficeLocation::new(OfficeId::new(1), here, exact, 50.0).unwrap();
        assert!(evaluate_check_in(&office, &near, 50.0).is_ok());
    }

    #[test]
    fn imprecise_or_invalid_readings_are_rejected_before_distance() {
        let office = location(100.0, 50.0);
        let far = Coordinates::new(10.0, 10.0).unwrap();

        assert_eq!(
            evaluate_check_in(&office, &far, 80.0),
            Err(CheckInRejection::AccuracyTooLow {
                accuracy_m: 80.0,
                max_accuracy_m: 50.0
            })
        );
        assert!(matches!(
            evaluate_check_in(&office, &far, f64::NAN),
            Err(CheckInRejection::InvalidAccuracy(_))
        ));
        assert!(matches!(
            evaluate_check_in(&office, &far, -3.0),
            Err(CheckInRejection::InvalidAccuracy(_))
        ));
    }
}
