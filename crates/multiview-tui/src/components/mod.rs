pub mod help_overlay;
pub mod icon_list;
pub mod log_panel;
pub mod stream_grid;
