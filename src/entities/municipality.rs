// 🏘️ Municipality Entity - hosts one or more mountain huts
//
// Identity is the name. Province and reference altitude are fixed when the
// municipality is first created; later records with the same name do not
// overwrite them.

use super::store::StoreId;
use std::fmt;

/// Handle to a municipality, valid only in the `EntityStore` that issued it.
/// Handles cannot be built outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MunicipalityId {
    pub(crate) store: StoreId,
    pub(crate) index: usize,
}

impl fmt::Display for MunicipalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "municipality#{}", self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    name: String,
    province: String,

    /// Reference altitude, used for huts that have none recorded
    altitude: i32,
}

impl Municipality {
    pub(crate) fn new(name: impl Into<String>, province: impl Into<String>, altitude: i32) -> Self {
        Municipality {
            name: name.into(),
            province: province.into(),
            altitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn altitude(&self) -> i32 {
        self.altitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_municipality_creation() {
        let m = Municipality::new("Alagna Valsesia", "VC", 1191);

        assert_eq!(m.name(), "Alagna Valsesia");
        assert_eq!(m.province(), "VC");
        assert_eq!(m.altitude(), 1191);
    }

    #[test]
    fn test_municipality_id_display() {
        let id = MunicipalityId {
            store: StoreId::next(),
            index: 3,
        };
        assert_eq!(id.to_string(), "municipality#3");
    }
}
