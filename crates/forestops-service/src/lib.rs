pub mod device;
mod entity_list;
mod memory;
mod traits;

pub use entity_list::EntityList;
pub use memory::MemoryRepository;
pub use traits::{Repository, ServiceError};
