//! Mainta is the lightweight core of a machine maintenance tracker:
//! flat-file record stores, a rule-based condition classifier and an
//! account gate with a persisted session. The UI layer is an external
//! collaborator calling into [`App`].

#[forbid(unsafe_code)]
#[deny(missing_docs, unused_mut)]
mod store;

pub mod classify;
pub mod config;
pub mod error;
pub mod gate;
pub mod machine;
pub mod part;
pub mod selection;
pub mod session;
pub mod telemetry;
pub mod user;

use std::sync::Arc;

use error::Result;

pub use store::Record;

/// State sharing between the core services and the UI layer.
///
/// Repositories are owned here and passed by reference; there are no
/// process-wide singletons.
pub struct App {
    pub config: Arc<config::Configuration>,
    pub users: user::UserRepository,
    pub machines: machine::MachineRepository,
    pub parts: part::PartRepository,
    pub selections: selection::SelectionRepository,
    pub session: session::SessionManager,
    pub gate: gate::Gate,
    pub assessor: machine::Assessor,
}

impl App {
    /// Open every store described by `config`.
    pub fn with_config(config: Arc<config::Configuration>) -> Result<Self> {
        let storage = &config.storage;

        Ok(Self {
            users: user::UserRepository::open(storage.users_path())?,
            machines: machine::MachineRepository::open(
                storage.machines_path(),
            )?,
            parts: part::PartRepository::open(storage.parts_path())?,
            selections: selection::SelectionRepository::open(
                storage.selections_path(),
            )?,
            session: session::SessionManager::new(storage.session_path()),
            gate: gate::Gate::new(config.password),
            assessor: machine::Assessor::new(config.rules.table()),
            config,
        })
    }
}

/// Initialize the application state.
///
/// Reads the configuration file from the default location, then opens the
/// record stores it points at.
pub fn initialize_state() -> Result<App> {
    let config = config::Configuration::default().read();
    App::with_config(config)
}
