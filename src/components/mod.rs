//! UI Components
//!
//! Board page building blocks. State lives in the app store; components
//! only read it and hand intents to the sync coordinator.

mod board_grid;
mod card_details;
mod delete_confirm_button;
mod drop_zone;
mod file_picker;
mod list_column;
mod new_card_form;
mod new_list_form;
mod notices;

pub use board_grid::BoardGrid;
pub use card_details::{open_card, CardDetails};
pub use delete_confirm_button::DeleteConfirmButton;
pub use drop_zone::DropZone;
pub use file_picker::FilePicker;
pub use list_column::{ConfirmDeleteCard, ListColumn};
pub use new_card_form::NewCardForm;
pub use new_list_form::NewListForm;
pub use notices::Notices;
