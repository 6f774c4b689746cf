pub mod cursor;
pub mod status_bar;
pub mod toast;
pub mod value_field;

pub use cursor::{Cursor, CursorManager, CursorState, CursorSupport};
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
pub use toast::{Toast, ToastManager, ToastType, ToastWidget};
pub use value_field::{ValueField, VALUE_FIELD_CONTEXT};
