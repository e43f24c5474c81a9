pub mod editable;
pub mod sites;
pub mod snapshot;
