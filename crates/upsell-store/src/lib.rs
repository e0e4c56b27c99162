//! Selection store for the upsell product picker.
//!
//! [`Store`] owns a [`StoreState`] and changes it only through [`Action`]s run
//! by the pure [`reduce`] function. Slot mutations write a snapshot to
//! [`SessionStorage`] afterwards; [`Store::hydrate`] reads it back at startup.

pub mod action;
pub mod drag;
pub mod error;
pub mod persist;
pub mod picker;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::Action;
pub use drag::{SlotDrag, VariantDrop};
pub use error::{PersistError, PickerError, StoreError};
pub use persist::{FileSessionStorage, MemorySessionStorage, SessionStorage, SNAPSHOT_KEY};
pub use picker::{PickerDialog, StagedSelection};
pub use reducer::reduce;
pub use state::{SearchStatus, StoreState};
pub use store::{FetchTicket, Store};
