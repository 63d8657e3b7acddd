pub(crate) mod prompt;
pub(crate) mod settings;
pub(crate) mod state;
