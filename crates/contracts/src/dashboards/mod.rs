pub mod d400_performance {
    mod dto;
    pub use dto::*;
}

pub mod d401_trends {
    mod dto;
    pub use dto::*;
}
