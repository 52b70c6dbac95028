use crate::utils::constants::{UNIT_MICROGRAMS, UNIT_MILLIGRAMS};
use serde::Serialize;

/// Pollutants reported by the city monitoring network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Benzene,
    CarbonMonoxide8h,
    NitrogenDioxide,
    SulphurDioxide,
    Ozone,
    Pm10,
    Pm25,
}

impl Pollutant {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C6H6" => Some(Pollutant::Benzene),
            "CO_8h" => Some(Pollutant::CarbonMonoxide8h),
            "NO2" => Some(Pollutant::NitrogenDioxide),
            "SO2" => Some(Pollutant::SulphurDioxide),
            "O3" => Some(Pollutant::Ozone),
            "PM10" => Some(Pollutant::Pm10),
            "PM25" => Some(Pollutant::Pm25),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Pollutant::Benzene => "C6H6",
            Pollutant::CarbonMonoxide8h => "CO_8h",
            Pollutant::NitrogenDioxide => "NO2",
            Pollutant::SulphurDioxide => "SO2",
            Pollutant::Ozone => "O3",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM25",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::Benzene => "Benzene",
            Pollutant::CarbonMonoxide8h => "Carbon monoxide (8h mean)",
            Pollutant::NitrogenDioxide => "Nitrogen dioxide",
            Pollutant::SulphurDioxide => "Sulphur dioxide",
            Pollutant::Ozone => "Ozone",
            Pollutant::Pm10 => "Particulate matter ≤ 10µm",
            Pollutant::Pm25 => "Particulate matter ≤ 2.5µm",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Pollutant::CarbonMonoxide8h => UNIT_MILLIGRAMS,
            _ => UNIT_MICROGRAMS,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Pollutant::Benzene => {
                "Volatile organic compound from traffic, refineries and chemical plants; \
                 carcinogenic on long exposure."
            }
            Pollutant::CarbonMonoxide8h => {
                "Colourless, odourless gas from traffic and domestic heating that reduces \
                 oxygen transport in blood."
            }
            Pollutant::NitrogenDioxide => {
                "Pungent gas from traffic and power plants; irritates airways and drives \
                 smog and acid rain."
            }
            Pollutant::SulphurDioxide => {
                "Irritant gas from burning sulphur-bearing fuels; the main cause of acid rain."
            }
            Pollutant::Ozone => {
                "Secondary pollutant formed from NOx and VOCs in strong sunlight, \
                 typically in summer."
            }
            Pollutant::Pm10 => {
                "Particles up to 10µm from traffic, heating and industry that reach the \
                 upper airways."
            }
            Pollutant::Pm25 => {
                "Fine particles up to 2.5µm that penetrate to the lung alveoli and the \
                 bloodstream."
            }
        }
    }
}

/// Presentation details for a pollutant code, known or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantInfo {
    pub code: String,
    pub name: String,
    pub units: String,
    pub description: Option<String>,
}

impl PollutantInfo {
    pub fn for_code(code: &str) -> Self {
        match Pollutant::from_code(code) {
            Some(p) => Self {
                code: p.code().to_string(),
                name: p.display_name().to_string(),
                units: p.units().to_string(),
                description: Some(p.description().to_string()),
            },
            None => Self {
                code: code.to_string(),
                name: code.to_string(),
                units: UNIT_MICROGRAMS.to_string(),
                description: None,
            },
        }
    }
}
