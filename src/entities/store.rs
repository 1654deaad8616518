// 📇 Entity Store - deduplicated municipalities and huts keyed by name
//
// Entities live in insertion-ordered vectors; a name index maps each unique
// name to its handle. Get-or-create is a single check-then-insert, so the
// first record for a name wins and later attributes are ignored.
//
// Every store gets a process-unique id that is stamped into the handles it
// issues; a handle from another store never resolves here.

use super::mountain_hut::{HutId, MountainHut};
use super::municipality::{Municipality, MunicipalityId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_STORE_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StoreId(usize);

impl StoreId {
    pub(crate) fn next() -> Self {
        StoreId(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub struct EntityStore {
    id: StoreId,

    municipalities: Vec<Municipality>,
    municipality_index: HashMap<String, MunicipalityId>,

    huts: Vec<MountainHut>,
    hut_index: HashMap<String, HutId>,
}

impl Default for EntityStore {
    fn default() -> Self {
        EntityStore {
            id: StoreId::next(),
            municipalities: Vec::new(),
            municipality_index: HashMap::new(),
            huts: Vec::new(),
            hut_index: HashMap::new(),
        }
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // GET-OR-CREATE
    // ========================================================================

    /// Return the municipality named `name`, creating it if absent.
    /// On repeat calls `province` and `altitude` are ignored.
    pub fn get_or_create_municipality(
        &mut self,
        name: &str,
        province: &str,
        altitude: i32,
    ) -> MunicipalityId {
        if let Some(id) = self.municipality_index.get(name) {
            return *id;
        }

        let id = MunicipalityId {
            store: self.id,
            index: self.municipalities.len(),
        };
        self.municipalities
            .push(Municipality::new(name, province, altitude));
        self.municipality_index.insert(name.to_string(), id);
        id
    }

    /// Return the hut named `name`, creating it if absent.
    ///
    /// # Panics
    /// If `municipality` was not issued by this store.
    pub fn get_or_create_mountain_hut(
        &mut self,
        name: &str,
        altitude: Option<i32>,
        category: &str,
        beds_number: u32,
        municipality: MunicipalityId,
    ) -> HutId {
        if let Some(id) = self.hut_index.get(name) {
            return *id;
        }

        assert!(
            self.municipality(municipality).is_some(),
            "{} was not issued by this store",
            municipality
        );

        let id = HutId {
            store: self.id,
            index: self.huts.len(),
        };
        self.huts.push(MountainHut::new(
            name,
            altitude,
            category,
            beds_number,
            municipality,
        ));
        self.hut_index.insert(name.to_string(), id);
        id
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// `None` for a handle issued by another store
    pub fn municipality(&self, id: MunicipalityId) -> Option<&Municipality> {
        if id.store != self.id {
            return None;
        }
        self.municipalities.get(id.index)
    }

    pub fn mountain_hut(&self, id: HutId) -> Option<&MountainHut> {
        if id.store != self.id {
            return None;
        }
        self.huts.get(id.index)
    }

    pub fn find_municipality(&self, name: &str) -> Option<&Municipality> {
        self.municipality_index
            .get(name)
            .and_then(|id| self.municipality(*id))
    }

    pub fn find_mountain_hut(&self, name: &str) -> Option<&MountainHut> {
        self.hut_index.get(name).and_then(|id| self.mountain_hut(*id))
    }

    /// Follow a hut's relation to its municipality; `None` if the hut
    /// belongs to another store
    pub fn municipality_of(&self, hut: &MountainHut) -> Option<&Municipality> {
        self.municipality(hut.municipality_id())
    }

    // ========================================================================
    // ENUMERATION
    // ========================================================================

    /// All municipalities, in creation order
    pub fn municipalities(&self) -> &[Municipality] {
        &self.municipalities
    }

    /// All mountain huts, in creation order
    pub fn mountain_huts(&self) -> &[MountainHut] {
        &self.huts
    }

    /// Huts paired with their municipality
    pub fn huts_with_municipality(&self) -> impl Iterator<Item = (&MountainHut, &Municipality)> {
        self.huts
            .iter()
            .filter_map(move |hut| self.municipality_of(hut).map(|m| (hut, m)))
    }

    pub fn municipality_count(&self) -> usize {
        self.municipalities.len()
    }

    pub fn hut_count(&self) -> usize {
        self.huts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.municipalities.is_empty() && self.huts.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_municipality_is_idempotent() {
        let mut store = EntityStore::new();

        let first = store.get_or_create_municipality("Alpe", "TO", 800);
        let second = store.get_or_create_municipality("Alpe", "CN", 1200);

        assert_eq!(first, second);
        assert_eq!(store.municipality_count(), 1);

        // First write wins
        let alpe = store.municipality(first).unwrap();
        assert_eq!(alpe.province(), "TO");
        assert_eq!(alpe.altitude(), 800);
    }

    #[test]
    fn test_get_or_create_hut_is_idempotent() {
        let mut store = EntityStore::new();
        let town = store.get_or_create_municipality("Alpe", "TO", 800);
        let other = store.get_or_create_municipality("Balme", "TO", 1432);

        let first = store.get_or_create_mountain_hut("Rifugio Gastaldi", Some(2659), "Rifugio", 80, town);
        let second = store.get_or_create_mountain_hut("Rifugio Gastaldi", None, "Bivacco", 3, other);

        assert_eq!(first, second);
        assert_eq!(store.hut_count(), 1);

        let hut = store.mountain_hut(first).unwrap();
        assert_eq!(hut.altitude(), Some(2659));
        assert_eq!(hut.category(), "Rifugio");
        assert_eq!(hut.beds_number(), 80);
        assert_eq!(store.municipality_of(hut).unwrap().name(), "Alpe");
    }

    #[test]
    fn test_enumeration_keeps_creation_order() {
        let mut store = EntityStore::new();
        store.get_or_create_municipality("Zubiena", "BI", 620);
        store.get_or_create_municipality("Acceglio", "CN", 1200);
        store.get_or_create_municipality("Zubiena", "BI", 620);

        let names: Vec<&str> = store.municipalities().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Zubiena", "Acceglio"]);
    }

    #[test]
    fn test_find_by_name() {
        let mut store = EntityStore::new();
        let town = store.get_or_create_municipality("Ceresole Reale", "TO", 1612);
        store.get_or_create_mountain_hut("Rifugio Jervis", Some(2250), "Rifugio", 50, town);

        assert_eq!(store.find_municipality("Ceresole Reale").unwrap().altitude(), 1612);
        assert_eq!(store.find_mountain_hut("Rifugio Jervis").unwrap().beds_number(), 50);
        assert!(store.find_municipality("Nowhere").is_none());
        assert!(store.find_mountain_hut("Nowhere").is_none());
    }

    #[test]
    fn test_huts_with_municipality() {
        let mut store = EntityStore::new();
        let a = store.get_or_create_municipality("A", "P1", 100);
        let b = store.get_or_create_municipality("B", "P2", 200);
        store.get_or_create_mountain_hut("H1", None, "Rifugio", 10, a);
        store.get_or_create_mountain_hut("H2", None, "Rifugio", 20, b);

        let pairs: Vec<(&str, &str)> = store
            .huts_with_municipality()
            .map(|(h, m)| (h.name(), m.name()))
            .collect();
        assert_eq!(pairs, vec![("H1", "A"), ("H2", "B")]);
    }

    #[test]
    fn test_empty_store() {
        let store = EntityStore::new();
        assert!(store.is_empty());
        assert_eq!(store.municipalities().len(), 0);
        assert_eq!(store.mountain_huts().len(), 0);
    }

    #[test]
    #[should_panic(expected = "was not issued by this store")]
    fn test_foreign_municipality_handle_panics() {
        let mut other = EntityStore::new();
        other.get_or_create_municipality("A", "P", 1);
        let foreign = other.get_or_create_municipality("B", "P", 2);

        let mut store = EntityStore::new();
        store.get_or_create_municipality("Only", "P", 1);
        store.get_or_create_mountain_hut("Hut", None, "Rifugio", 1, foreign);
    }

    #[test]
    #[should_panic(expected = "was not issued by this store")]
    fn test_foreign_handle_in_range_panics() {
        let mut other = EntityStore::new();
        let foreign = other.get_or_create_municipality("Other", "P", 1);

        // Same index as the foreign handle, but a different store
        let mut store = EntityStore::new();
        store.get_or_create_municipality("Local", "P", 1);
        store.get_or_create_mountain_hut("Hut", None, "Rifugio", 1, foreign);
    }

    #[test]
    fn test_foreign_handles_do_not_resolve() {
        let mut other = EntityStore::new();
        let town = other.get_or_create_municipality("Other", "P", 1);
        let hut = other.get_or_create_mountain_hut("Hut", None, "Rifugio", 1, town);

        let mut store = EntityStore::new();
        let local = store.get_or_create_municipality("Local", "P", 1);
        store.get_or_create_mountain_hut("Local Hut", None, "Rifugio", 1, local);

        assert!(store.municipality(town).is_none());
        assert!(store.mountain_hut(hut).is_none());

        let foreign_hut = other.mountain_hut(hut).unwrap();
        assert!(store.municipality_of(foreign_hut).is_none());
        assert!(EntityStore::new().municipality_of(foreign_hut).is_none());
    }
}
