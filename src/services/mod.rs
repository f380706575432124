pub mod save_sink;
pub mod saved_service;
pub mod cart_service;

pub use save_sink::{SaveSink, SavedItemsSink};
pub use saved_service::SavedService;
pub use cart_service::CartService;
