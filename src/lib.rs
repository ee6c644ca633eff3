pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod host;
pub mod panel;
pub mod ui;
pub(crate) mod utils;
pub mod view;

pub use api::{EntityApi, HttpEntityApi};
pub use error::PanelError;
pub use panel::{EntityContext, EntityPanel, Page, PageEvent};
