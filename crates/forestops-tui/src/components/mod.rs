pub mod form;
pub mod list_view;
pub mod notice;
pub mod styles;
