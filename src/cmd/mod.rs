pub mod generate;
pub mod verify;

/// Data-file locations shared by every subcommand.
pub struct DataPaths {
    pub words: String,
    pub profiles: String,
    pub store: String,
}
