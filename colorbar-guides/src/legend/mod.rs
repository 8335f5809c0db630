pub mod colorbar;
pub mod ramp;
