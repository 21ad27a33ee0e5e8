//! The generator catalog and its cost and output math.

use crate::perks::PerkSet;

// ---------------------------------------------------------------------------
// Catalog

/// Generator families. A family shares one cost-growth curve and one
/// upgrade line across every model in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    HandCrank,
    Potato,
    WindTurbine,
    SolarPanel,
    Burner,
    FuelCell,
    HydroDam,
    Generator,
    PowerPlant,
    Nuclear,
    Geothermal,
    Tidal,
}

impl Family {
    /// Per-purchase price multiplier for models of this family.
    pub fn cost_growth(self) -> f64 {
        match self {
            Family::HandCrank => 1.0,
            Family::Potato => 1.05,
            Family::WindTurbine => 1.3,
            Family::SolarPanel => 1.15,
            Family::Burner => 1.5,
            Family::FuelCell => 1.2,
            Family::HydroDam => 2.0,
            Family::Generator => 1.5,
            Family::PowerPlant => 1.5,
            Family::Nuclear => 1.1,
            Family::Geothermal => 5.0,
            Family::Tidal => 3.0,
        }
    }

    /// The upgrade line sold for models of this family.
    pub fn upgrades(self) -> &'static [UpgradeDef] {
        match self {
            Family::HandCrank => &[],
            Family::Potato => POTATO_UPGRADES,
            Family::WindTurbine => WIND_UPGRADES,
            Family::SolarPanel => SOLAR_UPGRADES,
            Family::Burner => BURNER_UPGRADES,
            Family::FuelCell => FUEL_CELL_UPGRADES,
            Family::HydroDam => HYDRO_UPGRADES,
            Family::Generator => GENERATOR_UPGRADES,
            Family::PowerPlant => POWER_PLANT_UPGRADES,
            Family::Nuclear => NUCLEAR_UPGRADES,
            Family::Geothermal => GEOTHERMAL_UPGRADES,
            Family::Tidal => TIDAL_UPGRADES,
        }
    }
}

/// An output-boosting add-on, priced relative to the model's base cost.
#[derive(Debug)]
pub struct UpgradeDef {
    pub name: &'static str,
    pub cost_percent: u32,
    pub mult_percent: u32,
}

const POTATO_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Yukon Gold Potato", cost_percent: 100, mult_percent: 50 },
    UpgradeDef { name: "Magnesium Electrode", cost_percent: 250, mult_percent: 100 },
];

const WIND_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Taller Mast", cost_percent: 50, mult_percent: 15 },
    UpgradeDef { name: "Smart Inverter", cost_percent: 80, mult_percent: 10 },
    UpgradeDef { name: "Carbon Blades", cost_percent: 120, mult_percent: 20 },
    UpgradeDef { name: "Variable Pitch Blades", cost_percent: 150, mult_percent: 35 },
];

const SOLAR_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Low-Resistance Cabling", cost_percent: 50, mult_percent: 10 },
    UpgradeDef { name: "Autocleaning", cost_percent: 65, mult_percent: 10 },
    UpgradeDef { name: "Bifacial Cells", cost_percent: 125, mult_percent: 20 },
    UpgradeDef { name: "Sun Tracking", cost_percent: 200, mult_percent: 50 },
];

const BURNER_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Improved Nozzle", cost_percent: 30, mult_percent: 10 },
    UpgradeDef { name: "Exhaust Heat Recovery", cost_percent: 50, mult_percent: 10 },
    UpgradeDef { name: "Heat Pipes", cost_percent: 90, mult_percent: 25 },
];

const FUEL_CELL_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Water Recycling Loop", cost_percent: 50, mult_percent: 10 },
    UpgradeDef { name: "High-Efficiency Membrane", cost_percent: 60, mult_percent: 10 },
    UpgradeDef { name: "High-Quality Fuel", cost_percent: 80, mult_percent: 15 },
    UpgradeDef { name: "Platinum Catalyst", cost_percent: 150, mult_percent: 25 },
];

const HYDRO_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Water Filtration", cost_percent: 25, mult_percent: 5 },
    UpgradeDef { name: "Improved Turbine", cost_percent: 60, mult_percent: 15 },
    UpgradeDef { name: "Variable-Speed Generator", cost_percent: 125, mult_percent: 20 },
];

const GENERATOR_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Low-Friction Oil", cost_percent: 20, mult_percent: 5 },
    UpgradeDef { name: "Improved ECU", cost_percent: 35, mult_percent: 10 },
    UpgradeDef { name: "Fuel Injection", cost_percent: 60, mult_percent: 15 },
    UpgradeDef { name: "Turbocharging", cost_percent: 150, mult_percent: 35 },
];

const POWER_PLANT_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Improved Heat Recovery", cost_percent: 35, mult_percent: 10 },
    UpgradeDef { name: "Advanced Turbine Blades", cost_percent: 60, mult_percent: 15 },
    UpgradeDef { name: "Combined Cycle Add-on", cost_percent: 100, mult_percent: 20 },
    UpgradeDef { name: "Supercritical Steam", cost_percent: 150, mult_percent: 40 },
];

const NUCLEAR_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Richer Fuel Rods", cost_percent: 100, mult_percent: 15 },
    UpgradeDef { name: "Molten Salt Loop", cost_percent: 500, mult_percent: 75 },
];

const GEOTHERMAL_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Anti-Scale Protection", cost_percent: 30, mult_percent: 5 },
    UpgradeDef { name: "Reinjection Loop", cost_percent: 80, mult_percent: 10 },
    UpgradeDef { name: "Deeper Reservoirs", cost_percent: 200, mult_percent: 25 },
];

const TIDAL_UPGRADES: &[UpgradeDef] = &[
    UpgradeDef { name: "Corrosion-Proof Blades", cost_percent: 50, mult_percent: 5 },
    UpgradeDef { name: "Gearless Generator", cost_percent: 150, mult_percent: 15 },
    UpgradeDef { name: "Optimised Blade Profile", cost_percent: 200, mult_percent: 25 },
];

/// One model in the shop.
#[derive(Debug)]
pub struct GenDef {
    pub name: &'static str,
    pub base_cost: f64,
    pub watts: f64,
    pub family: Family,
}

/// Every model, cheapest first.
pub const CATALOG: &[GenDef] = &[
    GenDef { name: "Hand Crank", base_cost: 0.0, watts: 0.05, family: Family::HandCrank },
    GenDef { name: "Potato Battery", base_cost: 1.0, watts: 0.1, family: Family::Potato },
    GenDef { name: "Handheld Wind Turbine", base_cost: 10.0, watts: 1.0, family: Family::WindTurbine },
    GenDef { name: "Portable Solar Panel", base_cost: 100.0, watts: 2.0, family: Family::SolarPanel },
    GenDef { name: "Alcohol Burner w TEG", base_cost: 250.0, watts: 5.0, family: Family::Burner },
    GenDef { name: "Small Wind Turbine", base_cost: 800.0, watts: 10.0, family: Family::WindTurbine },
    GenDef { name: "Kerosene Burner w TEG", base_cost: 1_100.0, watts: 22.0, family: Family::Burner },
    GenDef { name: "Medium Solar Panel", base_cost: 3_500.0, watts: 70.0, family: Family::SolarPanel },
    GenDef { name: "Methanol Fuel Cell", base_cost: 4_500.0, watts: 80.0, family: Family::FuelCell },
    GenDef { name: "Medium Wind Turbine", base_cost: 28_000.0, watts: 225.0, family: Family::WindTurbine },
    GenDef { name: "Small Solar Array", base_cost: 35_000.0, watts: 500.0, family: Family::SolarPanel },
    GenDef { name: "Stream Hydro Dam", base_cost: 55_000.0, watts: 900.0, family: Family::HydroDam },
    GenDef { name: "Portable Generator", base_cost: 125_000.0, watts: 1_100.0, family: Family::Generator },
    GenDef { name: "Medium Solar Array", base_cost: 300_000.0, watts: 2_500.0, family: Family::SolarPanel },
    GenDef { name: "Large Wind Turbine", base_cost: 400_000.0, watts: 4_500.0, family: Family::WindTurbine },
    GenDef { name: "Propane Generator", base_cost: 800_000.0, watts: 7_500.0, family: Family::Generator },
    GenDef { name: "Small Hydro Dam", base_cost: 1_300_000.0, watts: 11_000.0, family: Family::HydroDam },
    GenDef { name: "Large Solar Array", base_cost: 2_200_000.0, watts: 18_000.0, family: Family::SolarPanel },
    GenDef { name: "Biogas Generator", base_cost: 4_000_000.0, watts: 30_000.0, family: Family::Generator },
    GenDef { name: "Huge Wind Turbine", base_cost: 6_000_000.0, watts: 80_000.0, family: Family::WindTurbine },
    GenDef { name: "Large Diesel Generator", base_cost: 25_000_000.0, watts: 200_000.0, family: Family::Generator },
    GenDef { name: "Small Solar Farm", base_cost: 65_000_000.0, watts: 500_000.0, family: Family::SolarPanel },
    GenDef { name: "Landfill-Gas Engine", base_cost: 100_000_000.0, watts: 600_000.0, family: Family::PowerPlant },
    GenDef { name: "Onshore Wind Turbine", base_cost: 150_000_000.0, watts: 700_000.0, family: Family::WindTurbine },
    GenDef { name: "Tiny Nuclear Reactor", base_cost: 250_000_000.0, watts: 1_000_000.0, family: Family::Nuclear },
    GenDef { name: "Offshore Wind Turbine", base_cost: 400_000_000.0, watts: 1_500_000.0, family: Family::WindTurbine },
    GenDef { name: "Large Solar Farm", base_cost: 650_000_000.0, watts: 3_000_000.0, family: Family::SolarPanel },
    GenDef { name: "Tidal Turbine Array", base_cost: 1_500_000_000.0, watts: 6_000_000.0, family: Family::Tidal },
    GenDef { name: "Geothermal Power Plant", base_cost: 2_500_000_000.0, watts: 8_000_000.0, family: Family::Geothermal },
    GenDef { name: "Biomass Power Plant", base_cost: 5_000_000_000.0, watts: 25_000_000.0, family: Family::PowerPlant },
    GenDef { name: "Medium Hydro Dam", base_cost: 12_000_000_000.0, watts: 50_000_000.0, family: Family::HydroDam },
    GenDef { name: "Small Nuclear Reactor", base_cost: 30_000_000_000.0, watts: 80_000_000.0, family: Family::Nuclear },
    GenDef { name: "Gas Turbine Plant", base_cost: 65_000_000_000.0, watts: 250_000_000.0, family: Family::PowerPlant },
    GenDef { name: "Coal Power Station", base_cost: 200_000_000_000.0, watts: 500_000_000.0, family: Family::PowerPlant },
    GenDef { name: "Large Hydro Dam", base_cost: 500_000_000_000.0, watts: 1_200_000_000.0, family: Family::HydroDam },
    GenDef { name: "Large Nuclear Reactor", base_cost: 1_000_000_000_000.0, watts: 2_500_000_000.0, family: Family::Nuclear },
];

/// Catalog index of the crank the player starts with.
pub const HAND_CRANK: usize = 0;

/// Catalog index of the final reactor. Owning one opens the prestige
/// door; rows listed past it need the Research Lab.
pub const LARGE_NUKE: usize = CATALOG.len() - 1;

// ---------------------------------------------------------------------------
// Owned state

/// One shop line as the player owns it: the model plus purchase count
/// and bought upgrades.
#[derive(Debug, Clone)]
pub struct Generator {
    pub def: &'static GenDef,
    pub count: u32,
    bought: Vec<bool>,
}

impl Generator {
    fn new(def: &'static GenDef) -> Self {
        Self { def, count: 0, bought: vec![false; def.family.upgrades().len()] }
    }

    /// Price of the next unit. Each unit owned compounds the base cost
    /// by the family growth factor.
    pub fn current_cost(&self) -> f64 {
        (self.def.base_cost * self.def.family.cost_growth().powi(self.count as i32)).round()
    }

    pub fn upgrades(&self) -> &'static [UpgradeDef] {
        self.def.family.upgrades()
    }

    pub fn upgrade_bought(&self, idx: usize) -> bool {
        self.bought[idx]
    }

    /// Price of an upgrade: a percentage of the model's base cost.
    pub fn upgrade_cost(&self, idx: usize) -> f64 {
        (self.def.base_cost * self.upgrades()[idx].cost_percent as f64 / 100.0).round()
    }

    pub fn buy_upgrade(&mut self, idx: usize) {
        self.bought[idx] = true;
    }

    /// Combined output factor of the bought upgrades.
    pub fn upgrade_multiplier(&self) -> f64 {
        self.upgrades()
            .iter()
            .zip(&self.bought)
            .filter(|&(_, &b)| b)
            .map(|(u, _)| 1.0 + u.mult_percent as f64 / 100.0)
            .product()
    }

    /// Watts one unit produces after perk boosts.
    pub fn unit_watts(&self, perks: &PerkSet) -> f64 {
        perks.boosted_watts(self.def.watts, self.def.family)
    }

    /// Live output of the whole line.
    pub fn power_output(&self, perks: &PerkSet) -> f64 {
        self.unit_watts(perks) * self.count as f64 * self.upgrade_multiplier()
    }

    pub(crate) fn reset(&mut self) {
        self.count = 0;
        self.bought.fill(false);
    }
}

/// A fresh plant: one unowned line per catalog row.
pub fn fresh_plant() -> Vec<Generator> {
    CATALOG.iter().map(Generator::new).collect()
}
