//! Error types for cmt-kinematics

use cmt_tensor::TensorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KinematicsError>;

/// Category of a failure, independent of where in a call chain it surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Sizes inconsistent or a tensor is not square
    ShapeMismatch,
    /// Parameter outside its admissible range
    InvalidDomain,
    /// Operator that must be inverted is singular
    SingularMatrix,
    /// Volumetric decomposition of a non-physical strain
    NegativeJacobianDeterminant,
}

#[derive(Error, Debug)]
pub enum KinematicsError {
    #[error("{operation}: shape mismatch: {message}")]
    ShapeMismatch {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: invalid domain: {message}")]
    InvalidDomain {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: singular matrix: {message}")]
    SingularMatrix {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: negative Jacobian determinant: {message}")]
    NegativeJacobianDeterminant {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: {source}")]
    Tensor {
        operation: &'static str,
        #[source]
        source: TensorError,
    },

    #[error("{operation}: {message}")]
    Propagated {
        operation: &'static str,
        message: String,
        #[source]
        source: Box<KinematicsError>,
    },
}

impl KinematicsError {
    pub fn shape_mismatch(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_domain(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            operation,
            message: message.into(),
        }
    }

    pub fn singular(operation: &'static str, message: impl Into<String>) -> Self {
        Self::SingularMatrix {
            operation,
            message: message.into(),
        }
    }

    /// Wrap this error as the cause of a failure in `operation`.
    pub fn context(self, operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(operation, cause = %self, "{message}");
        Self::Propagated {
            operation,
            message,
            source: Box::new(self),
        }
    }

    /// Kind of the root cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::InvalidDomain { .. } => ErrorKind::InvalidDomain,
            Self::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            Self::NegativeJacobianDeterminant { .. } => ErrorKind::NegativeJacobianDeterminant,
            Self::Tensor { source, .. } => match source {
                TensorError::Singular(_) => ErrorKind::SingularMatrix,
                TensorError::NotSquare { .. }
                | TensorError::WrongDimension { .. }
                | TensorError::ShapeMismatch(_) => ErrorKind::ShapeMismatch,
            },
            Self::Propagated { source, .. } => source.kind(),
        }
    }

    /// Name of the operation that raised this error.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { operation, .. }
            | Self::InvalidDomain { operation, .. }
            | Self::SingularMatrix { operation, .. }
            | Self::NegativeJacobianDeterminant { operation, .. }
            | Self::Tensor { operation, .. }
            | Self::Propagated { operation, .. } => operation,
        }
    }

    /// Errors from the outermost wrapper down to the root cause.
    pub fn chain(&self) -> impl Iterator<Item = &KinematicsError> {
        std::iter::successors(Some(self), |err| match err {
            Self::Propagated { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }
}

/// Attach the calling operation's name to a collaborator failure.
pub(crate) fn tensor(operation: &'static str) -> impl FnOnce(TensorError) -> KinematicsError {
    move |source| KinematicsError::Tensor { operation, source }
}
