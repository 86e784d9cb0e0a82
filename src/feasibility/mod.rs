mod estimate;


pub use estimate::{assess, estimate_parts, is_feasible, FeasibilityReport};
