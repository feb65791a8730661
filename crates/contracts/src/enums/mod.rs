pub mod naf_level;
pub mod view_id;

pub use naf_level::NafLevel;
pub use view_id::ViewId;
