use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label of the whole-country selector entry
pub const COUNTRY_LABEL: &str = "Colombia";

/// Geographic region of Colombia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Caribe")]
    Caribe,
    #[serde(rename = "Andina")]
    Andina,
    #[serde(rename = "Pacífica")]
    Pacifica,
    #[serde(rename = "Orinoquía")]
    Orinoquia,
    #[serde(rename = "Amazónica")]
    Amazonica,
    #[serde(rename = "Insular")]
    Insular,
}

impl Region {
    /// All regions in selector order
    pub const ALL: [Region; 6] = [
        Region::Caribe,
        Region::Andina,
        Region::Pacifica,
        Region::Orinoquia,
        Region::Amazonica,
        Region::Insular,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Caribe => "Caribe",
            Region::Andina => "Andina",
            Region::Pacifica => "Pacífica",
            Region::Orinoquia => "Orinoquía",
            Region::Amazonica => "Amazónica",
            Region::Insular => "Insular",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Accepts the display name, with or without accents, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_accents(s.trim());
        Region::ALL
            .iter()
            .copied()
            .find(|r| fold_accents(r.name()) == wanted)
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

/// Static city -> region table
///
/// Cities missing from the table have no region. Records bought there still
/// show up in the whole-country view but never under a named region.
pub fn region_for_city(city: &str) -> Option<Region> {
    let region = match city {
        "Bogotá" | "Medellín" | "Pereira" | "Cúcuta" | "Bucaramanga" | "Pasto"
        | "Manizales" | "Neiva" | "Armenia" | "Soacha" => Region::Andina,
        "Cali" => Region::Pacifica,
        "Barranquilla" | "Cartagena" | "Riohacha" | "Santa Marta" | "Valledupar" => {
            Region::Caribe
        }
        "Leticia" | "Inírida" => Region::Amazonica,
        "Villavicencio" => Region::Orinoquia,
        _ => return None,
    };
    Some(region)
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
