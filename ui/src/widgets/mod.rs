mod delete_modal;
mod filters;
mod message_banner;
mod pagination;
mod users_table;

pub use delete_modal::{DeleteModalAction, delete_modal};
pub use filters::filters;
pub use message_banner::message_banner;
pub use pagination::{PageNav, pagination};
pub use users_table::{RowAction, users_table};
