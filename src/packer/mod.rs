mod bins;


pub use bins::{pack, plan_bins, Bin, MergedBin, PackPlan, Packing};

/// Default file name prefix for merged bins
pub const DEFAULT_BIN_PREFIX: &str = "concatenated";
