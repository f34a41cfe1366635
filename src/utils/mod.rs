pub use algebra::{dot_product, hyperplane_intercepts, perpendicular_distance, vector_magnitude};
pub use non_dominated_sort::non_dominated_sort;
pub use reference_points::DasDennis;
pub use vectors::{argmin, median, vector_max, vector_min};

mod algebra;
mod non_dominated_sort;
mod reference_points;
mod vectors;
