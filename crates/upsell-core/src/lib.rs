pub mod app_config;
pub mod catalog;
pub mod config;
pub mod discount;
pub mod error;
pub mod reorder;
pub mod selection;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogImage, CatalogItem, Price, Variant};
pub use config::{load_app_config, load_app_config_from_env, API_KEY_VAR};
pub use discount::{Discount, DiscountKind};
pub use error::{ConfigError, DiscountError, ReorderError, SelectionError};
pub use reorder::reorder;
pub use selection::{SelectedProduct, Slot, SlotId};
