use crate::error::FormulaError;

/// Water density at room temperature, kg/L.
pub const WATER_DENSITY: f64 = 0.997;
/// Standard gravity, m/s^2.
pub const EARTH_GRAVITY: f64 = 9.807;

#[derive(Debug, Clone, PartialEq)]
pub struct Pump {
    /// kg/L
    pub density_rho: f64,
    /// m/s^2
    pub gravitational_acceleration_g: f64,
    /// Height the pump can raise the fluid, m.
    pub head: f64,
    /// L/s
    pub flow_q: f64,
}

impl Pump {
    /// Pump moving water on Earth.
    pub fn new(head: f64, flow_q: f64) -> Self {
        Pump::with_fluid(WATER_DENSITY, EARTH_GRAVITY, head, flow_q)
    }

    pub fn with_fluid(
        density_rho: f64,
        gravitational_acceleration_g: f64,
        head: f64,
        flow_q: f64,
    ) -> Self {
        Pump {
            density_rho,
            gravitational_acceleration_g,
            head,
            flow_q,
        }
    }

    /// Power delivered to the fluid, W.
    pub fn fluid_power_wdot(&self) -> f64 {
        self.density_rho * self.gravitational_acceleration_g * self.head * self.flow_q
    }

    /// Heads add, flow is unchanged.
    pub fn add_in_series(&self, other: &Pump) -> Result<Pump, FormulaError> {
        self.check_same_fluid(other)?;
        Ok(Pump::with_fluid(
            self.density_rho,
            self.gravitational_acceleration_g,
            self.head + other.head,
            self.flow_q,
        ))
    }

    /// Flows add, head is unchanged.
    pub fn add_in_parallel(&self, other: &Pump) -> Result<Pump, FormulaError> {
        self.check_same_fluid(other)?;
        Ok(Pump::with_fluid(
            self.density_rho,
            self.gravitational_acceleration_g,
            self.head,
            self.flow_q + other.flow_q,
        ))
    }

    fn check_same_fluid(&self, other: &Pump) -> Result<(), FormulaError> {
        if self.density_rho != other.density_rho
            || self.gravitational_acceleration_g != other.gravitational_acceleration_g
        {
            return Err(FormulaError::IncompatiblePumps(
                format!("rho={} g={}", self.density_rho, self.gravitational_acceleration_g),
                format!("rho={} g={}", other.density_rho, other.gravitational_acceleration_g),
            ));
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn round(value: f64, digits: i32) -> f64 {
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    }

    #[test]
    fn test_annual_pumping_cost() {
        // 200 L/min at 10 m of head, 55% pump and 80% motor efficiency, $0.15/kWh
        let p = Pump::new(10.0, 200.0 / 60.0);
        let power = p.fluid_power_wdot() / 0.55 / 0.8;
        let hours = 24 * 365;
        let work = power * hours as f64 / 1000.0;
        let cost = work * 0.15;

        assert_eq!(round(power, 1), 740.7);
        assert_eq!(hours, 8760);
        assert_eq!(round(work, 1), 6488.8);
        assert_eq!(round(cost, 0), 973.0);
    }

    #[test]
    fn test_identical_pumps_in_parallel() {
        // 20 gpm at 150 ft each
        let p = Pump::new(150.0 / 3.281, 20.0 / 15.85);
        let ans = p.add_in_parallel(&p).unwrap();

        assert!((ans.head * 3.281 - 150.0).abs() < 1e-9);
        assert!((ans.flow_q - 2.0 * p.flow_q).abs() < 1e-12);
    }

    #[test]
    fn test_pumps_in_series() {
        let ans = Pump::new(10.0, 2.0).add_in_series(&Pump::new(5.0, 3.0)).unwrap();
        assert_eq!(ans.head, 15.0);
        assert_eq!(ans.flow_q, 2.0);
    }

    #[test]
    fn test_incompatible_pumps() {
        let water = Pump::new(10.0, 2.0);
        let brine = Pump::with_fluid(1.2, EARTH_GRAVITY, 10.0, 2.0);
        assert!(matches!(
            water.add_in_series(&brine),
            Err(FormulaError::IncompatiblePumps(_, _))
        ));
        assert!(water.add_in_parallel(&brine).is_err());
    }
}
