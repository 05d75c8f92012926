mod capabilities;
mod create_volume;
mod delete_volume;
mod expand_volume;
mod publish_volume;
mod unpublish_volume;

pub use crate::volume::*;
pub use capabilities::*;
pub use create_volume::*;
pub use delete_volume::*;
pub use expand_volume::*;
pub use publish_volume::*;
pub use unpublish_volume::*;
