//! State of a collection card's edit modal.
//!
//! ```text
//! Closed ──open──▶ Open ──submit──▶ Submitting ──resolve(Ok)──▶ Closed
//!                   ▲                    │
//!                   └────resolve(Err)────┘
//! ```

use super::*;

pub const UPDATE_SUCCEEDED: &str = "collection updated.";
pub const UPDATE_FAILED: &str = "Failed to update collection";

#[derive(Debug, PartialEq, Clone, Default)]
pub enum Modal {
  #[default]
  Closed,
  Open(CollectionUpdate),
  Submitting(CollectionUpdate),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Notification {
  Success(String),
  Error(String),
}

impl Notification {
  pub fn message(&self) -> &str {
    match self {
      Self::Success(message) | Self::Error(message) => message,
    }
  }

  pub(crate) fn class(&self) -> &'static str {
    match self {
      Self::Success(_) => "success",
      Self::Error(_) => "error",
    }
  }
}

impl Modal {
  /// Open the modal with `values` prefilled. Opening an open modal keeps the
  /// values it already holds.
  pub fn open(self, values: CollectionUpdate) -> Result<Self> {
    match self {
      Self::Closed => Ok(Self::Open(values)),
      Self::Open(current) => Ok(Self::Open(current)),
      Self::Submitting(_) => bail!("cannot reopen a modal that is submitting"),
    }
  }

  pub fn submit(self, values: CollectionUpdate) -> Result<Self> {
    match self {
      Self::Open(_) => Ok(Self::Submitting(values)),
      Self::Closed => bail!("cannot submit a closed modal"),
      Self::Submitting(_) => bail!("modal is already submitting"),
    }
  }

  /// Settle a submission: success closes the modal, failure reopens it with
  /// the submitted values. Either way the modal is no longer submitting.
  pub fn resolve<E: Display>(self, outcome: &Result<(), E>) -> Result<(Self, Notification)> {
    let Self::Submitting(values) = self else {
      bail!("cannot resolve a modal that is not submitting");
    };

    Ok(match outcome {
      Ok(()) => (
        Self::Closed,
        Notification::Success(UPDATE_SUCCEEDED.into()),
      ),
      Err(error) => {
        log::error!("Updating collection: {error}");
        (Self::Open(values), Notification::Error(UPDATE_FAILED.into()))
      }
    })
  }

  pub fn is_submitting(&self) -> bool {
    matches!(self, Self::Submitting(_))
  }

  pub fn values(&self) -> Option<&CollectionUpdate> {
    match self {
      Self::Closed => None,
      Self::Open(values) | Self::Submitting(values) => Some(values),
    }
  }
}
