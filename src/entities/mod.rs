// Entity Models - municipalities and the mountain huts they host
//
// Each entity has:
// - Identity = its name, unique within a Region
// - Values fixed at construction (first write wins)
// - A store that hands out stable handles via get-or-create

pub mod municipality;
pub mod mountain_hut;
pub mod store;

pub use municipality::{Municipality, MunicipalityId};
pub use mountain_hut::{HutId, MountainHut};
pub use store::EntityStore;
