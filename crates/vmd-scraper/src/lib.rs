//! Platform adapters that fetch vaccination center data and appointment
//! availability and normalize them into [`vmd_core`] types.

pub mod doctolib;
pub mod error;
pub mod http;
pub mod mesoigner;

pub use doctolib::DoctolibClient;
pub use error::ScraperError;
pub use mesoigner::{MesoignerConfig, MesoignerSlots};
