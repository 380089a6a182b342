pub mod annotate;
pub mod contour;
pub mod fingertip;
pub mod intensity;
pub mod moment;
pub mod pixel;
pub mod region;
pub mod utils;
