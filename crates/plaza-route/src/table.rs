//! The `RouteTable` — every loop in the scene, keyed by `RouteId`.

use plaza_core::RouteId;

use crate::{Route, RouteError, RouteResult};

/// All routes known to a simulation.
///
/// Scenes carry a handful of loops at most, so lookup is a linear scan over
/// a dense `Vec` — cheaper than hashing at this cardinality and trivially
/// shareable (`&RouteTable`) across the parallel movement pass.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateRoute`] if a route with the same id is
    /// already present.
    pub fn insert(&mut self, route: Route) -> RouteResult<()> {
        if self.get(route.id()).is_some() {
            return Err(RouteError::DuplicateRoute(route.id()));
        }
        self.routes.push(route);
        Ok(())
    }

    /// Look up a route by id.  `None` is a configuration fault the engine
    /// reports; it never panics.
    #[inline]
    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over all routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
