use serde::{Deserialize, Serialize};
use std::fmt;

/// Plot size class (the `k` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProofSize {
    #[default]
    K32,
    K33,
    K34,
}

impl ProofSize {
    pub const ALL: [ProofSize; 3] = [ProofSize::K32, ProofSize::K33, ProofSize::K34];

    pub fn k(self) -> u8 {
        match self {
            ProofSize::K32 => 32,
            ProofSize::K33 => 33,
            ProofSize::K34 => 34,
        }
    }
}

impl TryFrom<u8> for ProofSize {
    type Error = String;

    fn try_from(k: u8) -> Result<Self, Self::Error> {
        match k {
            32 => Ok(ProofSize::K32),
            33 => Ok(ProofSize::K33),
            34 => Ok(ProofSize::K34),
            other => Err(format!("unsupported proof size k={other}")),
        }
    }
}

impl From<ProofSize> for u8 {
    fn from(size: ProofSize) -> u8 {
        size.k()
    }
}

impl fmt::Display for ProofSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}", self.k())
    }
}

/// Plot compression level. Level 8 does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CompressionLevel {
    #[default]
    C0,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C9,
}

impl CompressionLevel {
    pub const ALL: [CompressionLevel; 9] = [
        CompressionLevel::C0,
        CompressionLevel::C1,
        CompressionLevel::C2,
        CompressionLevel::C3,
        CompressionLevel::C4,
        CompressionLevel::C5,
        CompressionLevel::C6,
        CompressionLevel::C7,
        CompressionLevel::C9,
    ];

    pub fn level(self) -> u8 {
        match self {
            CompressionLevel::C0 => 0,
            CompressionLevel::C1 => 1,
            CompressionLevel::C2 => 2,
            CompressionLevel::C3 => 3,
            CompressionLevel::C4 => 4,
            CompressionLevel::C5 => 5,
            CompressionLevel::C6 => 6,
            CompressionLevel::C7 => 7,
            CompressionLevel::C9 => 9,
        }
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        CompressionLevel::ALL
            .into_iter()
            .find(|c| c.level() == level)
            .ok_or_else(|| format!("unsupported compression level C{level}"))
    }
}

impl From<CompressionLevel> for u8 {
    fn from(level: CompressionLevel) -> u8 {
        level.level()
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.level())
    }
}

/// Footprint of a k32/C0 plot; used for any pair missing from the table.
pub const DEFAULT_FOOTPRINT_GIB: f64 = 101.4;

// Rows follow `CompressionLevel::ALL` order.
// Source: https://docs.chia.net/chia-blockchain/resources/k-sizes/
const FOOTPRINT_GIB: [(ProofSize, [f64; 9]); 3] = [
    (
        ProofSize::K32,
        [101.4, 87.5, 86.0, 84.5, 82.9, 81.3, 79.6, 78.0, 75.2],
    ),
    (
        ProofSize::K33,
        [208.8, 179.6, 176.6, 173.4, 170.2, 167.0, 163.8, 160.6, 154.1],
    ),
    (
        ProofSize::K34,
        [429.9, 368.2, 362.1, 355.9, 349.4, 343.0, 336.6, 330.2, 315.5],
    ),
];

/// On-disk size of one plot in GiB for the given proof size and compression.
/// Never fails: a pair missing from the table maps to [`DEFAULT_FOOTPRINT_GIB`].
pub fn footprint_gib(proof_size: ProofSize, compression: CompressionLevel) -> f64 {
    let column = CompressionLevel::ALL
        .iter()
        .position(|c| *c == compression);

    FOOTPRINT_GIB
        .iter()
        .find(|(size, _)| *size == proof_size)
        .zip(column)
        .map(|((_, row), col)| row[col])
        .unwrap_or(DEFAULT_FOOTPRINT_GIB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k32_reference_sizes() {
        assert_eq!(footprint_gib(ProofSize::K32, CompressionLevel::C0), 101.4);
        assert_eq!(footprint_gib(ProofSize::K32, CompressionLevel::C5), 81.3);
        assert_eq!(footprint_gib(ProofSize::K34, CompressionLevel::C9), 315.5);
    }

    #[test]
    fn every_pair_has_a_positive_entry() {
        for size in ProofSize::ALL {
            let mut previous = f64::INFINITY;
            for level in CompressionLevel::ALL {
                let gib = footprint_gib(size, level);
                assert!(gib > 0.0);
                // higher compression never grows the plot
                assert!(gib < previous, "{size} {level} not shrinking");
                previous = gib;
            }
        }
    }

    #[test]
    fn compression_eight_is_not_a_level() {
        assert!(CompressionLevel::try_from(8).is_err());
        assert_eq!(CompressionLevel::try_from(9), Ok(CompressionLevel::C9));
        assert_eq!(CompressionLevel::ALL.len(), 9);
    }

    #[test]
    fn proof_size_parsing_and_labels() {
        assert_eq!(ProofSize::try_from(33), Ok(ProofSize::K33));
        assert!(ProofSize::try_from(31).is_err());
        assert_eq!(ProofSize::K34.to_string(), "k=34");
        assert_eq!(CompressionLevel::C7.to_string(), "C7");
    }

    #[test]
    fn serde_uses_integer_values() {
        let json = serde_json::to_string(&(ProofSize::K33, CompressionLevel::C9)).unwrap();
        assert_eq!(json, "[33,9]");

        let level: Result<CompressionLevel, _> = serde_json::from_str("8");
        assert!(level.is_err());
    }
}
