//! One-or-many collector argument for `search`

use crate::error::{ClientError, ClientResult};
use crate::proto::{collector, Collector};

/// Collectors for a search call, normalized to a list
///
/// Built from a single [`Collector`] (or a bare collector variant), a `Vec`,
/// or an array. Order is kept as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collectors(Vec<Collector>);

impl Collectors {
    /// Collectors in send order
    pub fn as_slice(&self) -> &[Collector] {
        &self.0
    }

    /// Validate and unwrap into the wire list
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the list is empty or any collector has no
    /// variant set.
    pub fn into_vec(self) -> ClientResult<Vec<Collector>> {
        if self.0.is_empty() {
            return Err(ClientError::invalid_argument(
                "search requires at least one collector",
            ));
        }
        if let Some(position) = self.0.iter().position(|c| c.collector.is_none()) {
            return Err(ClientError::invalid_argument(format!(
                "collector at position {position} has no variant set"
            )));
        }
        Ok(self.0)
    }
}

impl From<Collector> for Collectors {
    fn from(collector: Collector) -> Self {
        Collectors(vec![collector])
    }
}

impl From<collector::Collector> for Collectors {
    fn from(variant: collector::Collector) -> Self {
        Collectors(vec![Collector::from(variant)])
    }
}

impl From<Vec<Collector>> for Collectors {
    fn from(collectors: Vec<Collector>) -> Self {
        Collectors(collectors)
    }
}

impl<const N: usize> From<[Collector; N]> for Collectors {
    fn from(collectors: [Collector; N]) -> Self {
        Collectors(collectors.into())
    }
}

impl FromIterator<Collector> for Collectors {
    fn from_iter<I: IntoIterator<Item = Collector>>(iter: I) -> Self {
        Collectors(iter.into_iter().collect())
    }
}

impl From<collector::Collector> for Collector {
    fn from(variant: collector::Collector) -> Self {
        Collector {
            collector: Some(variant),
        }
    }
}
