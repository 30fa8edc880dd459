pub mod d400_performance;
pub mod d401_trends;
