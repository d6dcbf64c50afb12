// Pipeline processing: normalization and qualification

pub mod normalize;
pub mod quality_gate;
