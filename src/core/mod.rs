pub mod angle;
pub mod category;
pub mod color;
pub mod types;

pub use angle::{
    AngularSpan, allocate_spans, degrees_to_radians, lerp, percentage_to_radians,
    radians_to_degrees, total_sweep, value_to_percentage,
};
pub use category::{CategoryRecord, CategoryRef, SectorDataModel};
pub use color::Color;
pub use types::Viewport;
