use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("alignment table '{table}' maps '{source_name}' more than once")]
    DuplicateAlignmentSource { table: String, source_name: String },

    #[error("alignment table '{table}' has a blank entry near '{source_name}'")]
    BlankAlignmentEntry { table: String, source_name: String },

    #[error(
        "alignment table '{table}' chains '{source_name}' -> '{target}', and '{target}' is itself rewritten"
    )]
    AlignmentChain {
        table: String,
        source_name: String,
        target: String,
    },

    #[error("indicator column '{column}' is declared more than once")]
    DuplicateIndicator { column: String },

    #[error("indicator column '{column}' collides with a reserved column name")]
    ReservedIndicatorColumn { column: String },

    #[error("at least one indicator must be configured")]
    NoIndicators,
}

pub type Result<T> = std::result::Result<T, ModelError>;
