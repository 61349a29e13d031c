//! # Logistics Module
//!
//! Delivery cost estimation for the logistics cost calculator.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw        = base_fee + distance_km × per_km + weight_kg × per_kg      │
//! │  multiplier = vehicle multiplier ∘ urgency multiplier                   │
//! │  adjusted   = raw × multiplier                 (half-up, minor units)   │
//! │  insurance  = declared_value × insurance_rate  (only if declared)       │
//! │  total      = adjusted + insurance                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The estimate is illustrative: it is what the calculator shows before a
//! carrier quotes, not a billing amount.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Rate;

/// Longest haul the calculator will estimate.
pub const MAX_DISTANCE_KM: i64 = 5_000;

/// Heaviest single shipment the calculator will estimate (40 t).
pub const MAX_WEIGHT_KG: i64 = 40_000;

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Bike,
    Pickup,
    Truck,
    /// Refrigerated truck for perishables.
    Reefer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Standard,
    Express,
    SameDay,
}

/// Inputs of the cost calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub distance_km: i64,
    pub weight_kg: i64,
    pub vehicle: VehicleType,
    #[serde(default)]
    pub urgency: Urgency,
    /// Goods value to insure; no insurance when absent.
    #[serde(default)]
    pub declared_value: Option<Money>,
}

// =============================================================================
// Rate Card
// =============================================================================

/// Multiplier per vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleMultipliers {
    pub bike: Rate,
    pub pickup: Rate,
    pub truck: Rate,
    pub reefer: Rate,
}

impl Default for VehicleMultipliers {
    fn default() -> Self {
        VehicleMultipliers {
            bike: Rate::from_bps(8_000),
            pickup: Rate::ONE,
            truck: Rate::from_bps(15_000),
            reefer: Rate::from_bps(20_000),
        }
    }
}

/// Multiplier per urgency level. Standard is always 1.0x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct UrgencyMultipliers {
    pub express: Rate,
    pub same_day: Rate,
}

impl Default for UrgencyMultipliers {
    fn default() -> Self {
        UrgencyMultipliers {
            express: Rate::from_bps(15_000),
            same_day: Rate::from_bps(20_000),
        }
    }
}

/// Fees and multipliers used by [`estimate_delivery_cost`].
///
/// Every field has a default, so a config file may override only some.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RateCard {
    pub base_fee: Money,
    pub per_km: Money,
    pub per_kg: Money,
    pub vehicles: VehicleMultipliers,
    pub urgency: UrgencyMultipliers,
    pub insurance_rate: Rate,
}

impl Default for RateCard {
    /// Base 50.00, 12.00/km, 0.50/kg, insurance 0.5%.
    fn default() -> Self {
        RateCard {
            base_fee: Money::from_minor(5_000),
            per_km: Money::from_minor(1_200),
            per_kg: Money::from_minor(50),
            vehicles: VehicleMultipliers::default(),
            urgency: UrgencyMultipliers::default(),
            insurance_rate: Rate::from_bps(50),
        }
    }
}

impl RateCard {
    pub fn vehicle_multiplier(&self, vehicle: VehicleType) -> Rate {
        match vehicle {
            VehicleType::Bike => self.vehicles.bike,
            VehicleType::Pickup => self.vehicles.pickup,
            VehicleType::Truck => self.vehicles.truck,
            VehicleType::Reefer => self.vehicles.reefer,
        }
    }

    pub fn urgency_multiplier(&self, urgency: Urgency) -> Rate {
        match urgency {
            Urgency::Standard => Rate::ONE,
            Urgency::Express => self.urgency.express,
            Urgency::SameDay => self.urgency.same_day,
        }
    }
}

// =============================================================================
// Estimate
// =============================================================================

/// Itemized estimate shown under the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub base_fee: Money,
    pub distance_charge: Money,
    pub weight_charge: Money,
    /// `base_fee + distance_charge + weight_charge`.
    pub subtotal: Money,
    pub multiplier: Rate,
    /// Effect of the multiplier; negative for discounted vehicle classes.
    pub adjustment: Money,
    pub insurance: Money,
    pub total: Money,
}

/// Estimates the delivery cost of a shipment.
///
/// ## Errors
/// - `distance_km` or `weight_kg` not positive → `MustBePositive`
/// - above [`MAX_DISTANCE_KM`] / [`MAX_WEIGHT_KG`] → `OutOfRange`
/// - negative declared value → `OutOfRange`
///
/// ```rust
/// use agrimart_core::{estimate_delivery_cost, RateCard, ShipmentRequest, Urgency, VehicleType};
///
/// let request = ShipmentRequest {
///     distance_km: 100,
///     weight_kg: 1_000,
///     vehicle: VehicleType::Pickup,
///     urgency: Urgency::Standard,
///     declared_value: None,
/// };
/// let cost = estimate_delivery_cost(&request, &RateCard::default()).unwrap();
/// // 50.00 + 100 × 12.00 + 1000 × 0.50
/// assert_eq!(cost.total.minor(), 175_000);
/// ```
pub fn estimate_delivery_cost(
    request: &ShipmentRequest,
    rates: &RateCard,
) -> CoreResult<CostBreakdown> {
    check_bounded("distance_km", request.distance_km, MAX_DISTANCE_KM)?;
    check_bounded("weight_kg", request.weight_kg, MAX_WEIGHT_KG)?;

    if let Some(value) = request.declared_value {
        if value.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "declared_value".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }
    }

    let distance_charge = rates.per_km.multiply_quantity(request.distance_km);
    let weight_charge = rates.per_kg.multiply_quantity(request.weight_kg);
    let subtotal = rates.base_fee + distance_charge + weight_charge;

    let multiplier = rates
        .vehicle_multiplier(request.vehicle)
        .compose(rates.urgency_multiplier(request.urgency));
    let adjusted = subtotal.apply_rate(multiplier);

    let insurance = request
        .declared_value
        .map_or(Money::zero(), |value| value.apply_rate(rates.insurance_rate));

    Ok(CostBreakdown {
        base_fee: rates.base_fee,
        distance_charge,
        weight_charge,
        subtotal,
        multiplier,
        adjustment: adjusted - subtotal,
        insurance,
        total: adjusted + insurance,
    })
}

fn check_bounded(field: &str, value: i64, max: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn request(vehicle: VehicleType, urgency: Urgency) -> ShipmentRequest {
        ShipmentRequest {
            distance_km: 100,
            weight_kg: 1_000,
            vehicle,
            urgency,
            declared_value: None,
        }
    }

    fn quote(vehicle: VehicleType, urgency: Urgency) -> CostBreakdown {
        estimate_delivery_cost(&request(vehicle, urgency), &RateCard::default()).unwrap()
    }

    #[test]
    fn test_standard_pickup_has_no_adjustment() {
        let cost = quote(VehicleType::Pickup, Urgency::Standard);
        assert_eq!(cost.distance_charge.minor(), 120_000);
        assert_eq!(cost.weight_charge.minor(), 50_000);
        assert_eq!(cost.subtotal.minor(), 175_000);
        assert_eq!(cost.multiplier, Rate::ONE);
        assert!(cost.adjustment.is_zero());
        assert_eq!(cost.total.minor(), 175_000);
    }

    #[test]
    fn test_multipliers_compose() {
        // Reefer 2.0x, same day 2.0x → 4.0x
        let cost = quote(VehicleType::Reefer, Urgency::SameDay);
        assert_eq!(cost.multiplier.bps(), 40_000);
        assert_eq!(cost.total.minor(), 700_000);
        assert_eq!(cost.adjustment.minor(), 525_000);
    }

    #[test]
    fn test_bike_is_discounted() {
        let cost = quote(VehicleType::Bike, Urgency::Standard);
        assert_eq!(cost.total.minor(), 140_000);
        assert_eq!(cost.adjustment.minor(), -35_000);
    }

    #[test]
    fn test_insurance_added_after_multiplier() {
        let mut req = request(VehicleType::Truck, Urgency::Express);
        req.declared_value = Some(Money::from_minor(10_000_000)); // 100,000.00
        let cost = estimate_delivery_cost(&req, &RateCard::default()).unwrap();
        // 1.5 × 1.5 = 2.25x
        assert_eq!(cost.multiplier.bps(), 22_500);
        assert_eq!(cost.insurance.minor(), 50_000);
        assert_eq!(cost.total.minor(), 175_000 * 225 / 100 + 50_000);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let rates = RateCard::default();

        let mut req = request(VehicleType::Pickup, Urgency::Standard);
        req.distance_km = 0;
        assert!(matches!(
            estimate_delivery_cost(&req, &rates),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let mut req = request(VehicleType::Pickup, Urgency::Standard);
        req.weight_kg = MAX_WEIGHT_KG + 1;
        assert!(matches!(
            estimate_delivery_cost(&req, &rates),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let mut req = request(VehicleType::Pickup, Urgency::Standard);
        req.distance_km = MAX_DISTANCE_KM + 1;
        assert!(estimate_delivery_cost(&req, &rates).is_err());

        let mut req = request(VehicleType::Pickup, Urgency::Standard);
        req.declared_value = Some(Money::from_minor(-1));
        assert!(estimate_delivery_cost(&req, &rates).is_err());
    }

    #[test]
    fn test_rate_card_partial_override() {
        let rates: RateCard =
            serde_json::from_str(r#"{ "perKm": 1500, "vehicles": { "truck": 18000 } }"#).unwrap();
        assert_eq!(rates.per_km.minor(), 1_500);
        assert_eq!(rates.base_fee, RateCard::default().base_fee);
        assert_eq!(rates.vehicles.truck.bps(), 18_000);
        assert_eq!(rates.vehicles.reefer.bps(), 20_000);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: ShipmentRequest =
            serde_json::from_str(r#"{ "distanceKm": 40, "weightKg": 300, "vehicle": "reefer" }"#)
                .unwrap();
        assert_eq!(req.urgency, Urgency::Standard);
        assert_eq!(Urgency::default(), Urgency::Standard);
        assert!(req.declared_value.is_none());
    }
}
