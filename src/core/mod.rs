pub mod code;
pub mod evade;
pub mod flow;
pub mod meter;
pub mod particles;
pub mod record;
pub mod scratch;
pub mod spring;

pub use code::*;
pub use evade::*;
pub use flow::*;
pub use meter::*;
pub use particles::*;
pub use record::*;
pub use scratch::*;
pub use spring::*;
