mod capabilities;
mod expand_volume;
mod get_info;
mod publish_volume;
mod stage_volume;
mod unpublish_volume;
mod unstage_volume;

pub use crate::volume::*;
pub use capabilities::*;
pub use expand_volume::*;
pub use get_info::*;
pub use publish_volume::*;
pub use stage_volume::*;
pub use unpublish_volume::*;
pub use unstage_volume::*;
