pub mod client;
pub mod error;
pub mod render;

pub use {
    client::SheetsClient,
    error::SheetsError,
    render::format_row,
};
