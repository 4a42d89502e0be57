use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Applicant age in years. Clients send any JSON number, so fractional and
/// negative values reach validation instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Age(f64);

/// Largest integer an `f64` holds exactly.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

impl Age {
    pub fn years(self) -> f64 {
        self.0
    }

    /// Inclusive range check against whole-year plan bounds.
    pub fn within(self, min_age: u32, max_age: u32) -> bool {
        self.0 >= f64::from(min_age) && self.0 <= f64::from(max_age)
    }
}

impl From<u32> for Age {
    fn from(years: u32) -> Self {
        Self(f64::from(years))
    }
}

impl From<f64> for Age {
    fn from(years: f64) -> Self {
        Self(years)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < EXACT_INTEGER_LIMIT {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Age {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self)
    }
}
