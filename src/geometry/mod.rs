pub mod carrier;
pub mod cross_section;
pub mod generalised_cylinder;
pub mod interpolator;
pub mod shape_library;

pub use carrier::{Carrier, CarrierCurve, CarrierMode};
pub use cross_section::{CrossSection, CrossSectionCurve, CrossSectionMode};
pub use generalised_cylinder::{DomainBreakpoint, GeneralisedCylinder, SurfaceSample};
pub use interpolator::{Interpolate, Interpolator, InterpolatorDomain, InterpolatorKind};
pub use shape_library::{ShapeId, ShapeLibrary};
