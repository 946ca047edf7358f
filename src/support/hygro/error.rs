use thiserror::Error;

/// Errors that may occur when evaluating hygrothermal properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The input is outside the model's valid domain.
    ///
    /// For example, a positive moisture potential or a temperature outside
    /// the range of the saturation vapor pressure correlation.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The calculation failed due to a numerical error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }
}
