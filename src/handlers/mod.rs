pub mod health;
pub mod list;
pub mod get;
pub mod create;
pub mod update;
pub mod remove;
pub mod color;

pub use health::health_handler;
pub use list::list_handler;
pub use get::get_handler;
pub use create::create_handler;
pub use update::update_handler;
pub use remove::remove_handler;
pub use color::{
    add_color_handler, add_colors_handler, color_detail_handler, modify_color_handler,
    remove_color_handler,
};
