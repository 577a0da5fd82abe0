mod constants;
mod modify_aware;
mod type_utils;
mod value;

pub use constants::*;
pub use modify_aware::*;
pub use type_utils::*;
pub use value::*;
