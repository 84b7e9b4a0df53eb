// Record-store modules: flat-file roster, import/export, error modeling.
pub mod error;
pub mod export;
pub mod import;
pub mod roster;
