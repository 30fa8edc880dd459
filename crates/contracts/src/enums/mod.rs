pub mod activity_channel;
pub mod entity_kind;

pub use activity_channel::ActivityChannel;
pub use entity_kind::EntityKind;
