// 🛖 Mountain Hut Entity
//
// A hut may or may not have its own altitude on record. "Not recorded" is a
// distinct state from altitude zero and is kept as `None`; bucketing falls back
// to the municipality's altitude at query time.

use super::municipality::{Municipality, MunicipalityId};
use super::store::StoreId;

/// Handle to a mountain hut, valid only in the `EntityStore` that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HutId {
    pub(crate) store: StoreId,
    pub(crate) index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountainHut {
    name: String,
    altitude: Option<i32>,

    /// e.g. "Rifugio alpino", "Bivacco fisso"
    category: String,
    beds_number: u32,

    /// Relation to the owning municipality (not a copy)
    municipality: MunicipalityId,
}

impl MountainHut {
    pub(crate) fn new(
        name: impl Into<String>,
        altitude: Option<i32>,
        category: impl Into<String>,
        beds_number: u32,
        municipality: MunicipalityId,
    ) -> Self {
        MountainHut {
            name: name.into(),
            altitude,
            category: category.into(),
            beds_number,
            municipality,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn altitude(&self) -> Option<i32> {
        self.altitude
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn beds_number(&self) -> u32 {
        self.beds_number
    }

    pub fn municipality_id(&self) -> MunicipalityId {
        self.municipality
    }

    /// Own altitude if recorded, else the given municipality's altitude
    pub fn effective_altitude(&self, municipality: &Municipality) -> i32 {
        self.altitude.unwrap_or_else(|| municipality.altitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town_id() -> MunicipalityId {
        MunicipalityId {
            store: StoreId::next(),
            index: 0,
        }
    }

    #[test]
    fn test_hut_creation() {
        let town = town_id();
        let hut = MountainHut::new("Capanna Regina Margherita", Some(4554), "Rifugio", 70, town);

        assert_eq!(hut.name(), "Capanna Regina Margherita");
        assert_eq!(hut.altitude(), Some(4554));
        assert_eq!(hut.category(), "Rifugio");
        assert_eq!(hut.beds_number(), 70);
        assert_eq!(hut.municipality_id(), town);
    }

    #[test]
    fn test_effective_altitude_prefers_own() {
        let town = Municipality::new("Alagna Valsesia", "VC", 1191);
        let hut = MountainHut::new("Rifugio Pastore", Some(1575), "Rifugio", 40, town_id());

        assert_eq!(hut.effective_altitude(&town), 1575);
    }

    #[test]
    fn test_effective_altitude_falls_back_to_municipality() {
        let town = Municipality::new("Alagna Valsesia", "VC", 1191);
        let hut = MountainHut::new("Bivacco Senza Quota", None, "Bivacco", 6, town_id());

        assert_eq!(hut.effective_altitude(&town), 1191);
    }

    #[test]
    fn test_zero_altitude_is_not_absent() {
        let town = Municipality::new("Riva", "TN", 70);
        let hut = MountainHut::new("Sea Level Hut", Some(0), "Rifugio", 4, town_id());

        assert_eq!(hut.effective_altitude(&town), 0);
    }
}
