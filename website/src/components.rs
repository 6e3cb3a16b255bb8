mod back_button;
mod data_block;
mod hello_world;
mod listing_block;

pub use back_button::BackButton;
pub use data_block::DataBlock;
pub use hello_world::HelloWorld;
pub use listing_block::ListingBlock;
