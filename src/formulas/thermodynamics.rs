/// Stream in a system where no heat is lost to the surroundings; all added
/// heat raises the enthalpy of the components.
#[derive(Debug, Clone, PartialEq)]
pub struct AdiabaticSystem {
    /// lbm/hr
    pub mass_flow_rate_mdot: f64,
    /// F
    pub temperature_t: f64,
    /// Btu/lbm-F
    pub specific_heat_c: f64,
}

impl AdiabaticSystem {
    pub fn new(mass_flow_rate_mdot: f64, temperature_t: f64, specific_heat_c: f64) -> Self {
        AdiabaticSystem {
            mass_flow_rate_mdot,
            temperature_t,
            specific_heat_c,
        }
    }

    fn heat_to_reach(&self, temperature: f64) -> f64 {
        self.mass_flow_rate_mdot * self.specific_heat_c * (temperature - self.temperature_t)
    }

    /// Heat rate (Btu/hr) needed to bring both streams to `mixture_temperature`.
    pub fn heat_needed_to_mix_at_temperature(
        &self,
        other: &AdiabaticSystem,
        mixture_temperature: f64,
    ) -> f64 {
        self.heat_to_reach(mixture_temperature) + other.heat_to_reach(mixture_temperature)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_needed_to_mix() {
        let water = AdiabaticSystem::new(2000.0, 60.0, 1.0);
        let oil = AdiabaticSystem::new(1000.0, 100.0, 0.6);

        // 2000 * 1 * (140 - 60) + 1000 * 0.6 * (140 - 100)
        assert_eq!(water.heat_needed_to_mix_at_temperature(&oil, 140.0), 184000.0);
        assert_eq!(
            water.heat_needed_to_mix_at_temperature(&oil, 140.0),
            oil.heat_needed_to_mix_at_temperature(&water, 140.0)
        );
    }

    #[test]
    fn test_mixing_at_own_temperature() {
        let a = AdiabaticSystem::new(500.0, 80.0, 1.0);
        assert_eq!(a.heat_needed_to_mix_at_temperature(&a, 80.0), 0.0);
    }
}
